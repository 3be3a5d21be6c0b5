use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, RgbaImage};

use crate::export::glyph_file_name;
use crate::foundation::error::{LineboilError, LineboilResult};
use crate::glyph::cache::{CoverageBitmap, GLYPH_SLOTS, GlyphCache};
use crate::noise::boil::{NoiseParams, boil};

/// First code baked (unit separator, which most fonts leave empty).
pub const FIRST_EXPORT_CODE: u32 = 31;

/// Coverage at or above this value is written as opaque ink; anything lower is transparent.
pub const ALPHA_THRESHOLD: u8 = 128;

/// Parameters for [`export_glyph_gifs`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GifExportOpts {
    /// Animation frames per glyph.
    pub frames: u32,
    /// Boil displacement strength.
    pub strength: f32,
    /// Boil spatial frequency.
    pub freq: f32,
    /// Delay between GIF frames in centiseconds.
    pub delay_centis: u32,
    /// Boil time advance per frame.
    pub time_step: f32,
}

impl Default for GifExportOpts {
    fn default() -> Self {
        Self {
            frames: 60,
            strength: 3.0,
            freq: 0.04,
            delay_centis: 8,
            time_step: 0.3,
        }
    }
}

impl GifExportOpts {
    /// Reject settings that cannot produce a playable GIF.
    pub fn validate(&self) -> LineboilResult<()> {
        if self.frames == 0 {
            return Err(LineboilError::validation("GIF export needs at least one frame"));
        }
        if self.delay_centis == 0 {
            return Err(LineboilError::validation("GIF frame delay must be > 0"));
        }
        if !self.time_step.is_finite() {
            return Err(LineboilError::validation("GIF time_step must be finite"));
        }
        self.noise().validate()
    }

    fn noise(&self) -> NoiseParams {
        NoiseParams {
            strength: self.strength,
            freq: self.freq,
        }
    }
}

/// One file written by [`export_glyph_gifs`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportedGlyph {
    /// Character code.
    pub code: u32,
    /// Glyph width in pixels.
    pub width: u32,
    /// Glyph height in pixels.
    pub height: u32,
    /// Written file.
    pub path: PathBuf,
}

/// Bake a looping GIF for every non-empty glyph from code 31 through 127.
///
/// Frame `f` boils the cached bitmap at `t = f * time_step`. Codes whose glyph is empty are
/// skipped. Files are named `glyph_NNN.gif` inside `out_dir`, which is created if missing.
#[tracing::instrument(skip(cache, opts), fields(out_dir = %out_dir.display()))]
pub fn export_glyph_gifs(
    cache: &mut GlyphCache,
    opts: &GifExportOpts,
    out_dir: &Path,
) -> LineboilResult<Vec<ExportedGlyph>> {
    opts.validate()?;
    std::fs::create_dir_all(out_dir)?;

    let mut written = Vec::new();
    for code in FIRST_EXPORT_CODE..GLYPH_SLOTS as u32 {
        cache.ensure_loaded(code);
        let Some(bitmap) = cache.drawable(code) else {
            tracing::debug!(code, "empty glyph, not exported");
            continue;
        };
        let path = out_dir.join(glyph_file_name(code));
        write_glyph_gif(bitmap, opts, &path)?;
        tracing::info!(
            code,
            width = bitmap.width(),
            height = bitmap.height(),
            frames = opts.frames,
            path = %path.display(),
            "glyph GIF written"
        );
        written.push(ExportedGlyph {
            code,
            width: bitmap.width(),
            height: bitmap.height(),
            path,
        });
    }
    Ok(written)
}

/// Encode the boil animation of one bitmap to `path`.
pub fn write_glyph_gif(
    bitmap: &CoverageBitmap,
    opts: &GifExportOpts,
    path: &Path,
) -> LineboilResult<()> {
    let (w, h) = (bitmap.width(), bitmap.height());
    let file = File::create(path)?;
    let mut encoder = GifEncoder::new(BufWriter::new(file));
    encoder
        .set_repeat(Repeat::Infinite)
        .map_err(|e| codec_err(path, e))?;

    let delay = Delay::from_numer_denom_ms(opts.delay_centis * 10, 1);
    let mut boiled = vec![0u8; bitmap.data().len()];
    for f in 0..opts.frames {
        let t = f as f32 * opts.time_step;
        boil(
            &mut boiled,
            bitmap.data(),
            w as usize,
            h as usize,
            t,
            opts.noise(),
        )?;
        let rgba = threshold_rgba(&boiled, w, h)?;
        encoder
            .encode_frame(image::Frame::from_parts(rgba, 0, 0, delay))
            .map_err(|e| codec_err(path, e))?;
    }
    Ok(())
}

/// White ink where coverage passes [`ALPHA_THRESHOLD`], fully transparent elsewhere.
fn threshold_rgba(coverage: &[u8], width: u32, height: u32) -> LineboilResult<RgbaImage> {
    let mut bytes = Vec::with_capacity(coverage.len() * 4);
    for &a in coverage {
        if a >= ALPHA_THRESHOLD {
            bytes.extend_from_slice(&[255, 255, 255, 255]);
        } else {
            bytes.extend_from_slice(&[0, 0, 0, 0]);
        }
    }
    RgbaImage::from_raw(width, height, bytes)
        .ok_or_else(|| LineboilError::codec("glyph bitmap does not match its dimensions"))
}

fn codec_err(path: &Path, e: image::ImageError) -> LineboilError {
    LineboilError::codec(format!("encode GIF '{}': {e}", path.display()))
}

#[cfg(test)]
#[path = "../../tests/unit/export/gif.rs"]
mod tests;
