use std::sync::Arc;
use std::time::Instant;

use crate::display::surface::DisplaySurface;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::LineboilResult;
use crate::pipeline::context::PipelineContext;

/// Options for [`Player::run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaybackOpts {
    /// Stop after this many ticks. `None` plays until quit or starvation.
    pub max_ticks: Option<u64>,
    /// Skip tick pacing (headless runs and tests).
    pub unpaced: bool,
}

/// Outcome of [`Player::preroll`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrerollOutcome {
    /// Every pre-roll frame was composed and converted.
    Completed,
    /// The display asked to quit; the producer must not be started.
    Quit,
}

/// Why playback ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackEnd {
    /// The display requested quit.
    Quit,
    /// `max_ticks` was reached.
    TickBudget,
    /// The producer stopped and every generated frame was shown.
    ProducerStopped,
}

/// Summary returned by [`Player::run`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaybackReport {
    /// Pre-rolled frames presented.
    pub presented_preroll: usize,
    /// Generated frames presented.
    pub presented_generated: usize,
    /// Ticks executed, including starvation waits.
    pub ticks: u64,
    /// Reason playback ended.
    pub end: PlaybackEnd,
}

/// Fixed-rate consumer.
///
/// Owns the display resources of the pre-rolled frames and of every drained frame; dropping
/// the player releases them.
pub struct Player<D: DisplaySurface> {
    ctx: Arc<PipelineContext>,
    display: D,
    preroll: Vec<D::Resource>,
    generated: Vec<D::Resource>,
}

impl<D: DisplaySurface> std::fmt::Debug for Player<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("preroll", &self.preroll.len())
            .field("generated", &self.generated.len())
            .finish_non_exhaustive()
    }
}

impl<D: DisplaySurface> Player<D> {
    /// Create a player presenting to `display`.
    pub fn new(ctx: Arc<PipelineContext>, display: D) -> Self {
        Self {
            ctx,
            display,
            preroll: Vec::new(),
            generated: Vec::new(),
        }
    }

    /// Display surface.
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Give the display surface back, releasing every held resource.
    pub fn into_display(self) -> D {
        self.display
    }

    /// Number of converted pre-roll frames.
    pub fn preroll_len(&self) -> usize {
        self.preroll.len()
    }

    /// Number of converted generated frames.
    pub fn generated_len(&self) -> usize {
        self.generated.len()
    }

    /// Compose and convert frames `0..preroll` on the calling thread.
    ///
    /// Conversion failures abort with the error; a quit request aborts with
    /// [`PrerollOutcome::Quit`].
    #[tracing::instrument(skip(self), fields(frames = self.ctx.preroll))]
    pub fn preroll(&mut self) -> LineboilResult<PrerollOutcome> {
        let started = Instant::now();
        let count = usize::try_from(self.ctx.preroll).unwrap_or(usize::MAX);
        self.preroll.reserve(count.min(4096));
        for i in 0..self.ctx.preroll {
            if self.display.poll_quit() {
                tracing::info!(done = i, "quit requested during pre-roll");
                return Ok(PrerollOutcome::Quit);
            }
            let frame = self.ctx.compose_frame(FrameIndex(i))?;
            let res = self.display.create_resource(&frame)?;
            self.preroll.push(res);
            tracing::debug!(frame = i, "pre-roll frame ready");
        }
        tracing::info!(
            frames = self.preroll.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "pre-roll complete"
        );
        Ok(PrerollOutcome::Completed)
    }

    /// Move every pending frame into the generated array, converting as it goes.
    ///
    /// Frames whose resource cannot be created are dropped and counted. Returns how many frames
    /// were taken off the sequence.
    pub fn drain(&mut self) -> usize {
        let batch = self.ctx.sequence.drain_batch();
        let n = batch.len();
        for frame in batch {
            match self.display.create_resource(&frame) {
                Ok(res) => self.generated.push(res),
                Err(e) => {
                    self.ctx.stats.record_conversion_failure();
                    tracing::warn!(frame = frame.index().0, error = %e, "dropping frame, conversion failed");
                }
            }
        }
        self.ctx.stats.record_consumed(n as u64);
        n
    }

    /// Play the pre-rolled frames, then generated frames, at the context's frame rate.
    pub fn run(&mut self, opts: PlaybackOpts) -> LineboilResult<PlaybackReport> {
        let budget = self.ctx.fps.tick_budget();
        let mut report = PlaybackReport {
            presented_preroll: 0,
            presented_generated: 0,
            ticks: 0,
            end: PlaybackEnd::ProducerStopped,
        };

        let tick_limit_hit = |ticks: u64| opts.max_ticks.is_some_and(|max| ticks >= max);

        for i in 0..self.preroll.len() {
            if tick_limit_hit(report.ticks) {
                report.end = PlaybackEnd::TickBudget;
                return Ok(report);
            }
            let tick_start = Instant::now();
            report.ticks += 1;
            self.drain();
            if self.display.poll_quit() {
                report.end = PlaybackEnd::Quit;
                return Ok(report);
            }
            self.display.present(&self.preroll[i])?;
            report.presented_preroll += 1;
            if !opts.unpaced {
                sleep_remaining(tick_start, budget);
            }
        }
        tracing::info!(frames = report.presented_preroll, "pre-roll playback finished");

        let mut next = 0usize;
        loop {
            if tick_limit_hit(report.ticks) {
                report.end = PlaybackEnd::TickBudget;
                break;
            }
            let tick_start = Instant::now();
            report.ticks += 1;
            self.drain();
            if self.display.poll_quit() {
                report.end = PlaybackEnd::Quit;
                break;
            }
            if let Some(res) = self.generated.get(next) {
                self.display.present(res)?;
                next += 1;
                report.presented_generated += 1;
                if !opts.unpaced {
                    sleep_remaining(tick_start, budget);
                }
            } else if !self.ctx.run.is_running() && self.ctx.sequence.is_empty() {
                report.end = PlaybackEnd::ProducerStopped;
                break;
            } else {
                std::thread::sleep(self.ctx.timing.starvation_wait);
            }
        }

        tracing::info!(
            preroll = report.presented_preroll,
            generated = report.presented_generated,
            ticks = report.ticks,
            end = ?report.end,
            "playback ended"
        );
        Ok(report)
    }
}

fn sleep_remaining(tick_start: Instant, budget: std::time::Duration) {
    if let Some(rest) = budget.checked_sub(tick_start.elapsed()) {
        std::thread::sleep(rest);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/playback.rs"]
mod tests;
