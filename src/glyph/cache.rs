use std::path::Path;
use std::sync::Arc;

use crate::compose::layout::baseline_of;
use crate::foundation::error::{LineboilError, LineboilResult};
use crate::glyph::raster::{FontdueRasterizer, Rasterizer};

/// Number of cache slots; codes at or above this are not rendered.
pub const GLYPH_SLOTS: usize = 128;

/// Default rasterization pixel height.
pub const DEFAULT_FONT_PX: f32 = 64.0;

/// Immutable single-channel coverage grid, row-major with a top-left origin.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CoverageBitmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl CoverageBitmap {
    /// Wrap `data` as a `width x height` bitmap.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> LineboilResult<Self> {
        let expected = (width as usize).saturating_mul(height as usize);
        if data.len() != expected {
            return Err(LineboilError::validation(format!(
                "coverage bitmap {width}x{height} needs {expected} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major coverage bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Return `true` when the bitmap has no drawable area.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// One cache slot.
///
/// `loaded` distinguishes "never attempted" from "attempted and empty"; callers must check both
/// `loaded` and a non-zero size before drawing.
#[derive(Clone, Debug, Default)]
pub struct GlyphEntry {
    /// Whether a load has been attempted.
    pub loaded: bool,
    /// Width in pixels (0 for empty glyphs).
    pub width: u32,
    /// Height in pixels (0 for empty glyphs).
    pub height: u32,
    /// Base bitmap, shared read-only after load.
    pub bitmap: Arc<CoverageBitmap>,
}

impl GlyphEntry {
    /// Return the base bitmap when the entry is loaded and has drawable area.
    pub fn drawable(&self) -> Option<&CoverageBitmap> {
        (self.loaded && self.width > 0 && self.height > 0).then_some(&*self.bitmap)
    }
}

/// Return `true` for codes whose glyph hangs below the common baseline.
pub fn has_descender(code: u32) -> bool {
    matches!(
        char::from_u32(code),
        Some('g' | 'j' | 'p' | 'q' | 'y' | ',' | ';')
    )
}

/// Return `true` for quote characters, which align to the top of the line.
pub fn is_quote(code: u32) -> bool {
    matches!(char::from_u32(code), Some('\'' | '"'))
}

/// Per-code coverage cache in front of a [`Rasterizer`].
///
/// Populated single-threaded during setup, then shared read-only (typically behind an `Arc`)
/// with the frame producer and the consumer.
pub struct GlyphCache {
    rasterizer: Box<dyn Rasterizer>,
    px_height: f32,
    entries: Vec<GlyphEntry>,
}

impl std::fmt::Debug for GlyphCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphCache")
            .field("px_height", &self.px_height)
            .field("loaded", &self.entries.iter().filter(|e| e.loaded).count())
            .finish_non_exhaustive()
    }
}

impl GlyphCache {
    /// Create an empty cache over `rasterizer`.
    pub fn new(rasterizer: Box<dyn Rasterizer>, px_height: f32) -> LineboilResult<Self> {
        if !px_height.is_finite() || px_height <= 0.0 {
            return Err(LineboilError::validation(
                "glyph px height must be finite and > 0",
            ));
        }
        Ok(Self {
            rasterizer,
            px_height,
            entries: vec![GlyphEntry::default(); GLYPH_SLOTS],
        })
    }

    /// Create a cache from in-memory font bytes.
    pub fn from_font_bytes(bytes: &[u8], px_height: f32) -> LineboilResult<Self> {
        let raster = FontdueRasterizer::from_bytes(bytes, px_height)?;
        Self::new(Box::new(raster), px_height)
    }

    /// Read a font file and create a cache from it.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_font_path(path: impl AsRef<Path>, px_height: f32) -> LineboilResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            LineboilError::font(format!("open font file '{}': {e}", path.display()))
        })?;
        tracing::debug!(bytes = bytes.len(), "font file read");
        Self::from_font_bytes(&bytes, px_height)
    }

    /// Pixel height glyphs are rasterized at.
    pub fn px_height(&self) -> f32 {
        self.px_height
    }

    /// Load `code` on first use. No-op when already loaded or outside the ASCII table.
    pub fn ensure_loaded(&mut self, code: u32) {
        let Some(entry) = self.entries.get_mut(code as usize) else {
            return;
        };
        if entry.loaded {
            return;
        }
        let Some(ch) = char::from_u32(code) else {
            return;
        };

        let glyph = self.rasterizer.rasterize(ch, self.px_height);
        if glyph.is_empty() {
            *entry = GlyphEntry {
                loaded: true,
                ..GlyphEntry::default()
            };
            return;
        }

        let (width, height) = (glyph.width, glyph.height);
        match CoverageBitmap::new(width, height, glyph.coverage) {
            Ok(bitmap) => {
                *entry = GlyphEntry {
                    loaded: true,
                    width,
                    height,
                    bitmap: Arc::new(bitmap),
                };
            }
            Err(e) => {
                tracing::warn!(code, error = %e, "rasterizer returned a malformed bitmap");
                *entry = GlyphEntry {
                    loaded: true,
                    ..GlyphEntry::default()
                };
            }
        }
    }

    /// Load every character appearing in `text`.
    pub fn ensure_text_loaded(&mut self, text: &str) {
        for ch in text.chars() {
            self.ensure_loaded(ch as u32);
        }
    }

    /// Borrow the slot for `code`, if it is inside the table.
    pub fn entry(&self, code: u32) -> Option<&GlyphEntry> {
        self.entries.get(code as usize)
    }

    /// Borrow the base bitmap for `code` when it is loaded and drawable.
    pub fn drawable(&self, code: u32) -> Option<&CoverageBitmap> {
        self.entry(code).and_then(GlyphEntry::drawable)
    }

    /// Tallest loaded, non-descender glyph among the characters of `text`.
    ///
    /// Glyphs on a line align their bottoms to this height so descenders don't stretch it.
    pub fn baseline_height(&self, text: &str) -> u32 {
        baseline_of(text, |code| {
            self.entry(code).filter(|e| e.loaded).map(|e| e.height)
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/glyph/cache.rs"]
mod tests;
