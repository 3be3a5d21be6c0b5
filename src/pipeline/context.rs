use std::sync::Arc;
use std::time::Duration;

use crate::compose::compositor::{ComposeParams, compose};
use crate::compose::layout::TextLine;
use crate::config::BoilConfig;
use crate::foundation::core::{Canvas, Fps, FrameIndex};
use crate::foundation::error::LineboilResult;
use crate::glyph::cache::GlyphCache;
use crate::pipeline::sequence::FrameSequence;
use crate::pipeline::state::{PipelineStats, RunState};
use crate::render::frame::Frame;

/// Sleep intervals used by the producer and consumer loops.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PipelineTiming {
    /// Producer pause after each appended frame.
    pub producer_throttle: Duration,
    /// Producer pause after a failed frame allocation.
    pub alloc_retry: Duration,
    /// Consumer pause when no generated frame is available yet.
    pub starvation_wait: Duration,
}

impl Default for PipelineTiming {
    fn default() -> Self {
        Self {
            producer_throttle: Duration::from_millis(1),
            alloc_retry: Duration::from_millis(5),
            starvation_wait: Duration::from_millis(5),
        }
    }
}

/// State shared by the producer thread and the consumer.
///
/// The glyph cache must be fully loaded before the context is built; both sides only read it.
#[derive(Debug)]
pub struct PipelineContext {
    pub(crate) fps: Fps,
    pub(crate) canvas: Canvas,
    pub(crate) preroll: u64,
    pub(crate) lines: Vec<TextLine>,
    pub(crate) params: ComposeParams,
    pub(crate) timing: PipelineTiming,
    pub(crate) cache: Arc<GlyphCache>,
    pub(crate) sequence: FrameSequence,
    pub(crate) run: RunState,
    pub(crate) stats: PipelineStats,
}

impl PipelineContext {
    /// Build a context from a validated configuration and a loaded cache.
    pub fn new(config: &BoilConfig, cache: Arc<GlyphCache>) -> LineboilResult<Arc<Self>> {
        config.validate()?;
        Ok(Arc::new(Self {
            fps: config.fps,
            canvas: config.canvas,
            preroll: config.preroll,
            lines: config.text_lines(),
            params: config.compose_params(),
            timing: PipelineTiming {
                producer_throttle: Duration::from_millis(config.producer_throttle_ms),
                alloc_retry: Duration::from_millis(config.alloc_retry_ms),
                starvation_wait: Duration::from_millis(config.starvation_wait_ms),
            },
            cache,
            sequence: FrameSequence::new(config.drain_order),
            run: RunState::default(),
            stats: PipelineStats::default(),
        }))
    }

    /// Frame rate.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Frame dimensions.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Number of pre-rolled frames; also the producer's first index.
    pub fn preroll(&self) -> u64 {
        self.preroll
    }

    /// Pending-frame queue.
    pub fn sequence(&self) -> &FrameSequence {
        &self.sequence
    }

    /// Shared run flag.
    pub fn run_state(&self) -> &RunState {
        &self.run
    }

    /// Frame accounting.
    pub fn stats(&self) -> &PipelineStats {
        &self.stats
    }

    /// Timestamp of frame `idx`.
    pub fn frame_time(&self, idx: FrameIndex) -> f32 {
        self.fps.frame_time(idx)
    }

    /// Compose frame `idx` into a freshly allocated buffer.
    pub fn compose_frame(&self, idx: FrameIndex) -> LineboilResult<Frame> {
        let frame = Frame::try_new(self.canvas)?;
        self.compose_into(frame, idx)
    }

    pub(crate) fn compose_into(&self, mut frame: Frame, idx: FrameIndex) -> LineboilResult<Frame> {
        let t = self.frame_time(idx);
        compose(&mut frame, &self.lines, &self.cache, t, &self.params)?;
        frame.set_stamp(idx, t);
        Ok(frame)
    }
}
