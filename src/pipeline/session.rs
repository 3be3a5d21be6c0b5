use std::sync::Arc;

use crate::config::BoilConfig;
use crate::display::surface::DisplaySurface;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::LineboilResult;
use crate::glyph::cache::GlyphCache;
use crate::pipeline::context::PipelineContext;
use crate::pipeline::playback::{PlaybackOpts, PlaybackReport, Player, PrerollOutcome};
use crate::pipeline::producer::{ProducerHandle, spawn_producer};
use crate::pipeline::state::StatsSnapshot;

/// What [`Pipeline::shutdown`] cleaned up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShutdownReport {
    /// Frames still pending in the sequence, dropped without being shown.
    pub pending_released: u64,
    /// Final accounting.
    pub stats: StatsSnapshot,
}

/// Result of [`Pipeline::run`].
#[derive(Debug)]
pub struct RunReport<D> {
    /// Playback summary; `None` when the display quit during pre-roll.
    pub playback: Option<PlaybackReport>,
    /// Shutdown summary.
    pub shutdown: ShutdownReport,
    /// The display surface, handed back once every resource has been released.
    pub display: D,
}

/// One independent boil pipeline: context, producer and consumer.
#[derive(Debug)]
pub struct Pipeline {
    ctx: Arc<PipelineContext>,
    producer: Option<ProducerHandle>,
}

impl Pipeline {
    /// Build a pipeline. Every glyph the configured lines use is loaded before returning.
    #[tracing::instrument(skip(config, cache))]
    pub fn new(config: &BoilConfig, mut cache: GlyphCache) -> LineboilResult<Self> {
        config.validate()?;
        for line in &config.lines {
            cache.ensure_text_loaded(line);
        }
        let ctx = PipelineContext::new(config, Arc::new(cache))?;
        tracing::info!(
            lines = config.lines.len(),
            width = config.canvas.width,
            height = config.canvas.height,
            "pipeline ready"
        );
        Ok(Self { ctx, producer: None })
    }

    /// Shared context.
    pub fn context(&self) -> &Arc<PipelineContext> {
        &self.ctx
    }

    /// Start the producer at the first index after pre-roll. No-op if already started.
    pub fn start_producer(&mut self) -> LineboilResult<()> {
        if self.producer.is_none() {
            let start = FrameIndex(self.ctx.preroll);
            self.producer = Some(spawn_producer(self.ctx.clone(), start)?);
        }
        Ok(())
    }

    /// Pre-roll, start the producer, play, then shut down.
    ///
    /// A quit during pre-roll skips the producer and playback entirely.
    pub fn run<D: DisplaySurface>(
        mut self,
        display: D,
        opts: PlaybackOpts,
    ) -> LineboilResult<RunReport<D>> {
        let mut player = Player::new(self.ctx.clone(), display);
        let playback = match player.preroll()? {
            PrerollOutcome::Quit => None,
            PrerollOutcome::Completed => {
                self.start_producer()?;
                Some(player.run(opts)?)
            }
        };
        let shutdown = self.shutdown()?;
        Ok(RunReport {
            playback,
            shutdown,
            display: player.into_display(),
        })
    }

    /// Stop and join the producer, then drop every frame still pending.
    pub fn shutdown(&mut self) -> LineboilResult<ShutdownReport> {
        let joined = match self.producer.take() {
            Some(handle) => handle.stop_and_join(),
            None => {
                self.ctx.run.stop();
                Ok(())
            }
        };
        let released = self.ctx.sequence.drain_batch().len() as u64;
        self.ctx.stats.record_released(released);
        let stats = self.ctx.stats.snapshot();
        tracing::info!(
            released,
            generated = stats.generated,
            consumed = stats.consumed,
            "pipeline shut down"
        );
        joined?;
        Ok(ShutdownReport {
            pending_released: released,
            stats,
        })
    }
}

impl Drop for Pipeline {
    fn drop(&mut self) {
        if self.producer.is_some()
            && let Err(e) = self.shutdown()
        {
            tracing::error!(error = %e, "pipeline shutdown failed");
        }
    }
}
