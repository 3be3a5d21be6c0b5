use std::collections::HashMap;

use crate::foundation::error::{LineboilError, LineboilResult};

/// Single-channel coverage bitmap produced by a [`Rasterizer`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RasterGlyph {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major coverage, `width * height` bytes.
    pub coverage: Vec<u8>,
}

impl RasterGlyph {
    /// A glyph with no pixels (space, control codes, rasterizer failure).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Return `true` when the glyph has no drawable area.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// External glyph rasterizer.
///
/// Implementations are synchronous and infallible per glyph: anything that cannot be rendered
/// comes back as [`RasterGlyph::empty`].
pub trait Rasterizer: Send + Sync {
    /// Rasterize `ch` at a pixel height of `px_height`.
    fn rasterize(&self, ch: char, px_height: f32) -> RasterGlyph;
}

/// [`Rasterizer`] backed by a parsed `fontdue` font.
pub struct FontdueRasterizer {
    font: fontdue::Font,
}

impl FontdueRasterizer {
    /// Parse TrueType/OpenType font bytes.
    pub fn from_bytes(bytes: &[u8], px_height: f32) -> LineboilResult<Self> {
        let settings = fontdue::FontSettings {
            scale: px_height,
            ..fontdue::FontSettings::default()
        };
        let font = fontdue::Font::from_bytes(bytes, settings)
            .map_err(|e| LineboilError::font(format!("parse font: {e}")))?;
        Ok(Self { font })
    }
}

impl Rasterizer for FontdueRasterizer {
    fn rasterize(&self, ch: char, px_height: f32) -> RasterGlyph {
        let (metrics, coverage) = self.font.rasterize(ch, px_height);
        let (Ok(width), Ok(height)) = (
            u32::try_from(metrics.width),
            u32::try_from(metrics.height),
        ) else {
            return RasterGlyph::empty();
        };
        if width == 0 || height == 0 || coverage.len() != metrics.width * metrics.height {
            return RasterGlyph::empty();
        }
        RasterGlyph {
            width,
            height,
            coverage,
        }
    }
}

/// [`Rasterizer`] serving pre-built bitmaps from a lookup table.
///
/// Useful for bitmap fonts and for driving the pipeline without font files.
#[derive(Clone, Debug, Default)]
pub struct MapRasterizer {
    glyphs: HashMap<char, RasterGlyph>,
}

impl MapRasterizer {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `glyph` for `ch`, replacing any previous entry.
    pub fn insert(&mut self, ch: char, glyph: RasterGlyph) -> &mut Self {
        self.glyphs.insert(ch, glyph);
        self
    }

    /// Register a solid `width x height` block of full coverage for `ch`.
    pub fn insert_block(&mut self, ch: char, width: u32, height: u32) -> &mut Self {
        let len = (width as usize).saturating_mul(height as usize);
        self.insert(
            ch,
            RasterGlyph {
                width,
                height,
                coverage: vec![255; len],
            },
        )
    }
}

impl Rasterizer for MapRasterizer {
    fn rasterize(&self, ch: char, _px_height: f32) -> RasterGlyph {
        self.glyphs.get(&ch).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/glyph/raster.rs"]
mod tests;
