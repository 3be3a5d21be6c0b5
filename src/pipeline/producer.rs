use std::sync::Arc;
use std::thread::JoinHandle;

use crate::foundation::core::{Canvas, FrameIndex};
use crate::foundation::error::{LineboilError, LineboilResult};
use crate::pipeline::context::PipelineContext;
use crate::render::frame::Frame;

/// Handle to the background frame producer.
///
/// Dropping the handle stops and joins the thread.
#[derive(Debug)]
pub struct ProducerHandle {
    ctx: Arc<PipelineContext>,
    thread: Option<JoinHandle<LineboilResult<()>>>,
}

impl ProducerHandle {
    /// Return `true` while the producer has not been asked to stop and has not failed.
    pub fn is_running(&self) -> bool {
        self.ctx.run.is_running()
    }

    /// Ask the producer to stop and wait for it to finish its current iteration.
    pub fn stop_and_join(mut self) -> LineboilResult<()> {
        self.join_inner()
    }

    fn join_inner(&mut self) -> LineboilResult<()> {
        self.ctx.run.stop();
        let Some(thread) = self.thread.take() else {
            return Ok(());
        };
        thread
            .join()
            .map_err(|_| LineboilError::pipeline("frame producer thread panicked"))?
    }
}

impl Drop for ProducerHandle {
    fn drop(&mut self) {
        if let Err(e) = self.join_inner() {
            tracing::error!(error = %e, "frame producer exited with an error");
        }
    }
}

/// Start the single producer thread, generating from frame `start` onward.
pub fn spawn_producer(
    ctx: Arc<PipelineContext>,
    start: FrameIndex,
) -> LineboilResult<ProducerHandle> {
    spawn_producer_with(ctx, start, Frame::try_new)
}

pub(crate) fn spawn_producer_with<A>(
    ctx: Arc<PipelineContext>,
    start: FrameIndex,
    alloc: A,
) -> LineboilResult<ProducerHandle>
where
    A: FnMut(Canvas) -> LineboilResult<Frame> + Send + 'static,
{
    let worker_ctx = ctx.clone();
    let thread = std::thread::Builder::new()
        .name("lineboil-producer".to_owned())
        .spawn(move || run_producer(&worker_ctx, start, alloc))
        .map_err(|e| LineboilError::pipeline(format!("spawn frame producer: {e}")))?;
    tracing::info!(start = start.0, "frame producer started");
    Ok(ProducerHandle {
        ctx,
        thread: Some(thread),
    })
}

/// Producer loop body. Runs until the run flag is cleared or composition fails.
///
/// The index advances before allocation, so a failed allocation skips that timestamp rather
/// than retrying it.
fn run_producer<A>(ctx: &PipelineContext, start: FrameIndex, mut alloc: A) -> LineboilResult<()>
where
    A: FnMut(Canvas) -> LineboilResult<Frame>,
{
    let mut idx = start;
    let res = loop {
        if !ctx.run.is_running() {
            break Ok(());
        }
        let current = idx;
        idx = idx.next();

        let frame = match alloc(ctx.canvas) {
            Ok(frame) => frame,
            Err(e) => {
                ctx.stats.record_alloc_failure();
                tracing::warn!(frame = current.0, error = %e, "frame allocation failed, skipping timestamp");
                std::thread::sleep(ctx.timing.alloc_retry);
                continue;
            }
        };

        let frame = match ctx.compose_into(frame, current) {
            Ok(frame) => frame,
            Err(e) => {
                break Err(LineboilError::pipeline(format!(
                    "compose frame {}: {e}",
                    current.0
                )));
            }
        };

        let pending = ctx.sequence.push(frame);
        ctx.stats.record_generated();
        tracing::trace!(frame = current.0, pending, "frame generated");

        std::thread::sleep(ctx.timing.producer_throttle);
    };

    ctx.run.stop();
    match &res {
        Ok(()) => tracing::info!(next = idx.0, "frame producer stopped"),
        Err(e) => tracing::error!(error = %e, "frame producer failed"),
    }
    res
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/producer.rs"]
mod tests;
