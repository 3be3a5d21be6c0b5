use std::path::{Path, PathBuf};

use crate::display::surface::DisplaySurface;
use crate::foundation::error::{LineboilError, LineboilResult};
use crate::render::frame::Frame;

/// Surface that writes every presented frame to `<dir>/frame_NNNNNN.png`.
///
/// Files are numbered by presentation order, not by frame index, so the directory replays the
/// exact sequence the player showed.
#[derive(Debug)]
pub struct PngDirDisplay {
    dir: PathBuf,
    written: u64,
    max_presents: Option<u64>,
}

impl PngDirDisplay {
    /// Create the output directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> LineboilResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            written: 0,
            max_presents: None,
        })
    }

    /// Ask playback to end after `n` presented frames.
    pub fn max_presents(mut self, n: u64) -> Self {
        self.max_presents = Some(n);
        self
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Number of PNG files written.
    pub fn written(&self) -> u64 {
        self.written
    }
}

impl DisplaySurface for PngDirDisplay {
    type Resource = image::RgbaImage;

    fn create_resource(&mut self, frame: &Frame) -> LineboilResult<image::RgbaImage> {
        image::RgbaImage::from_raw(frame.width(), frame.height(), frame.to_rgba8())
            .ok_or_else(|| LineboilError::display("frame buffer size does not match its dimensions"))
    }

    fn present(&mut self, resource: &image::RgbaImage) -> LineboilResult<()> {
        let path = self.dir.join(format!("frame_{:06}.png", self.written));
        resource
            .save_with_format(&path, image::ImageFormat::Png)
            .map_err(|e| LineboilError::codec(format!("write png '{}': {e}", path.display())))?;
        self.written += 1;
        Ok(())
    }

    fn poll_quit(&mut self) -> bool {
        self.max_presents.is_some_and(|n| self.written >= n)
    }
}
