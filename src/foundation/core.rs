use std::time::Duration;

use crate::foundation::error::{LineboilError, LineboilResult};

/// Absolute 0-based frame index on the animation time axis.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// The index immediately after this one.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> LineboilResult<Self> {
        if den == 0 {
            return Err(LineboilError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(LineboilError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in seconds, in the `f32` precision the noise field runs at.
    pub fn frame_dt(self) -> f32 {
        self.den as f32 / self.num as f32
    }

    /// Animation timestamp of frame `idx` (`frame_dt * idx`).
    pub fn frame_time(self, idx: FrameIndex) -> f32 {
        self.frame_dt() * idx.0 as f32
    }

    /// Wall-clock budget of one playback tick, truncated to whole milliseconds.
    pub fn tick_budget(self) -> Duration {
        let ms = (1000u64 * u64::from(self.den)) / u64::from(self.num.max(1));
        Duration::from_millis(ms)
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 12, den: 1 }
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Number of pixels covered by the canvas.
    pub fn pixel_count(self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 500,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
