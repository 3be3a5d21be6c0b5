use crate::foundation::error::{LineboilError, LineboilResult};
use crate::glyph::cache::{has_descender, is_quote};

/// Extra drop applied to descender glyphs below the shared baseline, in pixels.
pub const DESCENDER_DROP: i32 = 13;

/// Cursor advance for glyphs that are missing or empty, in pixels.
pub const FALLBACK_ADVANCE: i32 = 20;

/// Nominal height of a text row before the inter-line gap, in pixels.
pub const GLYPH_ROW_HEIGHT: i32 = 24;

/// Phase offset added per character so glyphs on a line do not pulse in lock-step.
pub const GLYPH_PHASE_STEP: f32 = 0.5;

/// Scale from frame time to glyph boil time.
pub const GLYPH_TIME_SCALE: f32 = 0.3;

/// Vertical metrics shared by every line of a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LineMetrics {
    /// Height of a text row in pixels.
    pub glyph_row_height: i32,
    /// Gap between consecutive rows in pixels.
    pub line_gap: i32,
    /// Cursor advance for missing glyphs.
    pub fallback_advance: i32,
}

impl Default for LineMetrics {
    fn default() -> Self {
        Self {
            glyph_row_height: GLYPH_ROW_HEIGHT,
            line_gap: 30,
            fallback_advance: FALLBACK_ADVANCE,
        }
    }
}

impl LineMetrics {
    /// Distance between the tops of consecutive lines.
    ///
    /// Saturates instead of overflowing; [`LineMetrics::validate`] rejects metrics where that
    /// would matter.
    pub fn pitch(&self) -> i32 {
        self.glyph_row_height.saturating_add(self.line_gap)
    }

    /// Reject negative spacing and layouts whose last line would not fit in `i32`.
    pub fn validate(&self, line_count: usize) -> LineboilResult<()> {
        if self.glyph_row_height < 0 || self.line_gap < 0 {
            return Err(LineboilError::validation(
                "glyph_row_height and line_gap must be >= 0",
            ));
        }
        if self.fallback_advance < 0 {
            return Err(LineboilError::validation("fallback_advance must be >= 0"));
        }
        let last = i32::try_from(line_count.saturating_sub(1)).ok();
        let fits = self
            .glyph_row_height
            .checked_add(self.line_gap)
            .zip(last)
            .and_then(|(pitch, last)| pitch.checked_mul(last))
            .is_some();
        if !fits {
            return Err(LineboilError::validation(format!(
                "{line_count} lines at pitch {} + {} overflow the vertical range",
                self.glyph_row_height, self.line_gap
            )));
        }
        Ok(())
    }
}

/// A line of text pinned to a vertical position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextLine {
    /// Characters drawn left to right.
    pub text: String,
    /// Top of the line in frame pixels.
    pub y: i32,
}

impl TextLine {
    /// Position `texts` top to bottom, `metrics.pitch()` apart.
    pub fn stack<S: AsRef<str>>(texts: &[S], metrics: &LineMetrics) -> Vec<TextLine> {
        texts
            .iter()
            .zip(0i32..)
            .map(|(text, i)| TextLine {
                text: text.as_ref().to_owned(),
                y: i.saturating_mul(metrics.pitch()),
            })
            .collect()
    }

    /// Character codes in drawing order.
    pub fn codes(&self) -> impl Iterator<Item = u32> + '_ {
        self.text.chars().map(|c| c as u32)
    }
}

/// Boil time for the `n`-th character of a line at frame time `t`.
pub fn glyph_time(t: f32, n: usize) -> f32 {
    (t + GLYPH_PHASE_STEP * n as f32) * GLYPH_TIME_SCALE
}

/// Tallest non-descender glyph in `text`, as reported by `height_of`.
///
/// `height_of` returns `None` for glyphs that are not loaded; they do not contribute.
pub fn baseline_of(text: &str, height_of: impl Fn(u32) -> Option<u32>) -> u32 {
    text.chars()
        .map(|ch| ch as u32)
        .filter(|&code| !has_descender(code))
        .filter_map(height_of)
        .max()
        .unwrap_or(0)
}

/// Top edge of a glyph of height `glyph_height` on a line starting at `line_y`.
///
/// Descenders drop below the shared baseline, quotes hug the top of the line, everything else
/// bottom-aligns to `baseline`.
pub fn glyph_top(code: u32, line_y: i32, baseline: u32, glyph_height: u32) -> i32 {
    let lift = baseline as i32 - glyph_height as i32;
    if has_descender(code) {
        line_y + lift + DESCENDER_DROP
    } else if is_quote(code) {
        line_y
    } else {
        line_y + lift
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/layout.rs"]
mod tests;
