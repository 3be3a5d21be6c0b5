//! lineboil renders lines of text whose glyphs continuously "boil" under a time-varying
//! cellular noise field, producing a hand-drawn animated-ink look.
//!
//! The public API is pipeline-oriented:
//!
//! - Build a [`GlyphCache`] from font bytes (or any [`Rasterizer`])
//! - Describe the run with a [`BoilConfig`]
//! - Create a [`Pipeline`] and [`Pipeline::run`] it against a [`DisplaySurface`]
//!
//! Frames for a single timestamp can also be composed directly with [`compose`], and glyph
//! animations can be baked to GIFs with [`export_glyph_gifs`] and played back from disk.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Line layout and frame composition.
pub mod compose;
/// Startup configuration.
pub mod config;
/// Display surfaces.
pub mod display;
/// Per-glyph GIF export and playback.
pub mod export;
/// Glyph rasterization and caching.
pub mod glyph;
/// Noise field and boil distortion.
pub mod noise;
/// Pre-roll, producer and consumer.
pub mod pipeline;
/// Frame buffers.
pub mod render;

pub use crate::foundation::core::{Canvas, Fps, FrameIndex};
pub use crate::foundation::error::{LineboilError, LineboilResult};

pub use crate::compose::compositor::{ComposeParams, compose};
pub use crate::compose::layout::{LineMetrics, TextLine};
pub use crate::config::{BoilConfig, DEFAULT_LINES};
pub use crate::display::png::PngDirDisplay;
pub use crate::display::surface::{CapturedFrame, DisplaySurface, InMemoryDisplay};
pub use crate::export::gif::{ExportedGlyph, GifExportOpts, export_glyph_gifs};
pub use crate::export::playback::{
    GifGlyph, GifGlyphSet, GifPlaybackOpts, compose_gif_frame, play_gifs,
};
pub use crate::glyph::cache::{CoverageBitmap, GlyphCache, GlyphEntry};
pub use crate::glyph::raster::{FontdueRasterizer, MapRasterizer, RasterGlyph, Rasterizer};
pub use crate::noise::boil::{NoiseParams, boil};
pub use crate::noise::voronoi::noise;
pub use crate::pipeline::context::PipelineContext;
pub use crate::pipeline::playback::{
    PlaybackEnd, PlaybackOpts, PlaybackReport, Player, PrerollOutcome,
};
pub use crate::pipeline::producer::{ProducerHandle, spawn_producer};
pub use crate::pipeline::sequence::{DrainOrder, FrameSequence};
pub use crate::pipeline::session::{Pipeline, RunReport, ShutdownReport};
pub use crate::pipeline::state::{PipelineStats, RunState, StatsSnapshot};
pub use crate::render::frame::Frame;
