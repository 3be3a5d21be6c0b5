use crate::compose::layout::{LineMetrics, TextLine, glyph_time, glyph_top};
use crate::foundation::error::LineboilResult;
use crate::glyph::cache::GlyphCache;
use crate::noise::boil::{NoiseParams, boil};
use crate::render::frame::Frame;

/// Everything besides the glyphs that shapes a composed frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ComposeParams {
    /// Line spacing and fallback advance.
    pub metrics: LineMetrics,
    /// Boil displacement.
    pub noise: NoiseParams,
}

/// Compose `lines` into `frame` for animation time `t`.
///
/// The frame is cleared first. Each line is laid out left to right from `x = 0`; glyphs are
/// boiled into a private scratch bitmap (the cached base bitmap is never touched) and blitted
/// with zero-coverage pixels skipped and out-of-frame pixels clipped. Missing or empty glyphs
/// advance the cursor by the fallback width. The `n`-th character of a line boils at
/// [`glyph_time`]`(t, n)`, counting skipped characters too.
pub fn compose(
    frame: &mut Frame,
    lines: &[TextLine],
    cache: &GlyphCache,
    t: f32,
    params: &ComposeParams,
) -> LineboilResult<()> {
    frame.clear();

    let mut scratch = Vec::<u8>::new();
    for line in lines {
        let baseline = cache.baseline_height(&line.text);
        let mut cursor: i64 = 0;

        for (n, code) in line.codes().enumerate() {
            let Some(base) = cache.drawable(code) else {
                cursor += i64::from(params.metrics.fallback_advance);
                continue;
            };

            let (w, h) = (base.width() as usize, base.height() as usize);
            let len = w * h;
            scratch.clear();
            if let Err(e) = scratch.try_reserve_exact(len) {
                tracing::warn!(code, error = %e, "glyph scratch allocation failed, skipping glyph");
                cursor += i64::from(base.width());
                continue;
            }
            scratch.resize(len, 0);
            boil(
                &mut scratch,
                base.data(),
                w,
                h,
                glyph_time(t, n),
                params.noise,
            )?;

            let top = i64::from(glyph_top(code, line.y, baseline, base.height()));
            blit(frame, &scratch, w, cursor, top);
            cursor += i64::from(base.width());
        }
    }
    Ok(())
}

fn blit(frame: &mut Frame, coverage: &[u8], width: usize, x0: i64, y0: i64) {
    if width == 0 {
        return;
    }
    for (row_idx, row) in coverage.chunks_exact(width).enumerate() {
        let y = y0 + row_idx as i64;
        for (col, &a) in row.iter().enumerate() {
            frame.stamp(x0 + col as i64, y, a);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/compositor.rs"]
mod tests;
