use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::compose::compositor::ComposeParams;
use crate::compose::layout::{LineMetrics, TextLine};
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{LineboilError, LineboilResult};
use crate::glyph::cache::{DEFAULT_FONT_PX, GLYPH_SLOTS};
use crate::noise::boil::NoiseParams;
use crate::pipeline::sequence::DrainOrder;

/// Lines rendered when no configuration overrides them.
pub const DEFAULT_LINES: [&str; 9] = [
    "SPHINX OF BLACK QUARTZ, JUDGE MY VOW!",
    "sphinx of black quartz, judge my vow!",
    "0123456789",
    "\"Hello!\" he said.",
    "We need: eggs, spam, ham, etc.",
    "Some of them are going with us: Tiffin and co; Tyler, among others.",
    "'Who are you?' he asked.",
    "What!",
    "I went to Arby's recently (really?)",
];

/// Startup configuration for the frame pipeline.
///
/// Every field has a default, so a JSON file only needs the keys it changes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoilConfig {
    /// Playback and generation rate.
    pub fps: Fps,
    /// Frame dimensions.
    pub canvas: Canvas,
    /// Frames composed synchronously before the producer thread starts.
    pub preroll: u64,
    /// Text lines, top to bottom. ASCII only.
    pub lines: Vec<String>,
    /// Line spacing.
    pub metrics: LineMetrics,
    /// Glyph rasterization pixel height.
    pub font_px: f32,
    /// Boil displacement.
    pub noise: NoiseParams,
    /// Discipline used when the consumer drains pending frames.
    pub drain_order: DrainOrder,
    /// Producer sleep after each appended frame, in milliseconds.
    pub producer_throttle_ms: u64,
    /// Producer sleep after a failed frame allocation, in milliseconds.
    pub alloc_retry_ms: u64,
    /// Consumer wait when it has caught up with the producer, in milliseconds.
    pub starvation_wait_ms: u64,
}

impl Default for BoilConfig {
    fn default() -> Self {
        Self {
            fps: Fps::default(),
            canvas: Canvas::default(),
            preroll: 144,
            lines: DEFAULT_LINES.iter().map(|s| (*s).to_owned()).collect(),
            metrics: LineMetrics::default(),
            font_px: DEFAULT_FONT_PX,
            noise: NoiseParams::default(),
            drain_order: DrainOrder::default(),
            producer_throttle_ms: 1,
            alloc_retry_ms: 5,
            starvation_wait_ms: 5,
        }
    }
}

impl BoilConfig {
    /// Parse a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> LineboilResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| LineboilError::validation(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> LineboilResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            LineboilError::validation(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check the configuration for values the pipeline cannot run with.
    pub fn validate(&self) -> LineboilResult<()> {
        Fps::new(self.fps.num, self.fps.den)?;
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(LineboilError::validation("canvas width/height must be non-zero"));
        }
        if !self.font_px.is_finite() || self.font_px <= 0.0 {
            return Err(LineboilError::validation("font_px must be finite and > 0"));
        }
        self.noise.validate()?;
        self.metrics.validate(self.lines.len())?;
        if let Some(line) = self
            .lines
            .iter()
            .find(|l| l.chars().any(|c| c as usize >= GLYPH_SLOTS))
        {
            return Err(LineboilError::validation(format!(
                "line {line:?} contains characters outside ASCII"
            )));
        }
        Ok(())
    }

    /// Lines positioned on the canvas.
    pub fn text_lines(&self) -> Vec<TextLine> {
        TextLine::stack(&self.lines, &self.metrics)
    }

    /// Compositor parameters.
    pub fn compose_params(&self) -> ComposeParams {
        ComposeParams {
            metrics: self.metrics,
            noise: self.noise,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
