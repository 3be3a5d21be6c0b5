//! Per-glyph animated GIF baking and GIF-driven playback.
//!
//! The export side boils every printable ASCII glyph into its own looping GIF; the playback
//! side reads those files back and composes text by picking each glyph's animation frame from
//! wall-clock time instead of boiling live.

/// Bake one looping GIF per glyph.
pub mod gif;
/// Compose frames from baked glyph GIFs.
pub mod playback;

/// File name used for the GIF of `code`.
pub fn glyph_file_name(code: u32) -> String {
    format!("glyph_{code:03}.gif")
}
