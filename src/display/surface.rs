use crate::foundation::core::FrameIndex;
use crate::foundation::error::{LineboilError, LineboilResult};
use crate::render::frame::Frame;

/// Destination for played-back frames.
///
/// The consumer converts every frame into a [`DisplaySurface::Resource`] as soon as it takes it
/// off the pending queue, drops the raw frame, and later presents resources in playback order.
pub trait DisplaySurface {
    /// Display-side copy of a frame (a texture, an encoded image, ...).
    type Resource;

    /// Convert a raw frame into a presentable resource.
    fn create_resource(&mut self, frame: &Frame) -> LineboilResult<Self::Resource>;

    /// Show `resource` for the current tick.
    fn present(&mut self, resource: &Self::Resource) -> LineboilResult<()>;

    /// Return `true` once the user (or host) asked playback to end.
    fn poll_quit(&mut self) -> bool {
        false
    }
}

/// Resource created by [`InMemoryDisplay`].
#[derive(Clone, Debug, PartialEq)]
pub struct CapturedFrame {
    /// Index of the source frame.
    pub index: FrameIndex,
    /// Timestamp of the source frame.
    pub time: f32,
    /// Straight-alpha RGBA8 pixels, when the display keeps pixels.
    pub rgba: Option<Vec<u8>>,
}

/// In-memory surface for tests and debugging.
///
/// Records what was presented, and can simulate a window close after a number of presents or
/// reject the first few resource creations.
#[derive(Debug, Default)]
pub struct InMemoryDisplay {
    keep_pixels: bool,
    quit_after: Option<usize>,
    failing_creates: usize,
    created: usize,
    presented: Vec<(FrameIndex, f32)>,
    last_rgba: Option<Vec<u8>>,
}

impl InMemoryDisplay {
    /// Create a surface that records indices and timestamps only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep converted pixels (the last presented frame stays readable).
    pub fn keep_pixels(mut self) -> Self {
        self.keep_pixels = true;
        self
    }

    /// Request quit once `n` frames have been presented.
    pub fn quit_after(mut self, n: usize) -> Self {
        self.quit_after = Some(n);
        self
    }

    /// Make the next `n` resource creations fail.
    pub fn fail_creates(mut self, n: usize) -> Self {
        self.failing_creates = n;
        self
    }

    /// Indices and timestamps presented so far, in order.
    pub fn presented(&self) -> &[(FrameIndex, f32)] {
        &self.presented
    }

    /// Number of successfully created resources.
    pub fn created(&self) -> usize {
        self.created
    }

    /// Pixels of the most recently presented frame, if pixels are kept.
    pub fn last_rgba(&self) -> Option<&[u8]> {
        self.last_rgba.as_deref()
    }
}

impl DisplaySurface for InMemoryDisplay {
    type Resource = CapturedFrame;

    fn create_resource(&mut self, frame: &Frame) -> LineboilResult<CapturedFrame> {
        if self.failing_creates > 0 {
            self.failing_creates -= 1;
            return Err(LineboilError::display("simulated resource creation failure"));
        }
        self.created += 1;
        Ok(CapturedFrame {
            index: frame.index(),
            time: frame.time(),
            rgba: self.keep_pixels.then(|| frame.to_rgba8()),
        })
    }

    fn present(&mut self, resource: &CapturedFrame) -> LineboilResult<()> {
        self.presented.push((resource.index, resource.time));
        if let Some(rgba) = &resource.rgba {
            self.last_rgba = Some(rgba.clone());
        }
        Ok(())
    }

    fn poll_quit(&mut self) -> bool {
        self.quit_after.is_some_and(|n| self.presented.len() >= n)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/display/surface.rs"]
mod tests;
