use crate::foundation::core::{Canvas, FrameIndex};
use crate::foundation::error::{LineboilError, LineboilResult};

/// Colour bits OR-ed onto every covered pixel: opaque white in the top three bytes.
pub const INK_RGB: u32 = 0xFFFF_FF00;

/// Pack a coverage sample into the frame pixel format.
pub fn pack_coverage(a: u8) -> u32 {
    INK_RGB | u32::from(a)
}

/// One composed frame for a single timestamp.
///
/// Pixels are packed `u32`, row-major: the high three bytes hold the ink colour and the low byte
/// holds coverage. `0` is fully transparent. Read as big-endian bytes this is RGBA8 with straight
/// alpha.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    index: FrameIndex,
    time: f32,
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl Frame {
    /// Allocate a transparent frame, reporting allocation failure instead of aborting.
    pub fn try_new(canvas: Canvas) -> LineboilResult<Self> {
        if canvas.width == 0 || canvas.height == 0 {
            return Err(LineboilError::validation("frame dimensions must be non-zero"));
        }
        let len = canvas.pixel_count();
        let mut pixels = Vec::new();
        pixels.try_reserve_exact(len).map_err(|e| {
            LineboilError::pipeline(format!(
                "allocate {}x{} frame: {e}",
                canvas.width, canvas.height
            ))
        })?;
        pixels.resize(len, 0);
        Ok(Self {
            index: FrameIndex(0),
            time: 0.0,
            width: canvas.width,
            height: canvas.height,
            pixels,
        })
    }

    /// Position on the time axis this frame was composed for.
    pub fn index(&self) -> FrameIndex {
        self.index
    }

    /// Animation timestamp this frame was composed for.
    pub fn time(&self) -> f32 {
        self.time
    }

    pub(crate) fn set_stamp(&mut self, index: FrameIndex, time: f32) {
        self.index = index;
        self.time = time;
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Packed pixels.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Mutable packed pixels.
    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Coverage at `(x, y)`, or `None` outside the frame.
    pub fn coverage_at(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let px = self.pixels[y as usize * self.width as usize + x as usize];
        Some((px & 0xFF) as u8)
    }

    /// Number of pixels with non-zero coverage.
    pub fn covered_pixels(&self) -> usize {
        self.pixels.iter().filter(|&&p| p & 0xFF != 0).count()
    }

    /// Write `a` at `(x, y)` when it is inside the frame and non-zero.
    ///
    /// Zero coverage leaves the destination untouched; out-of-bounds writes are dropped.
    pub fn stamp(&mut self, x: i64, y: i64, a: u8) {
        if a == 0 || x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height)
        {
            return;
        }
        self.pixels[y as usize * self.width as usize + x as usize] = pack_coverage(a);
    }

    /// Unpack into straight-alpha RGBA8 bytes.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        for px in &self.pixels {
            out.extend_from_slice(&px.to_be_bytes());
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
