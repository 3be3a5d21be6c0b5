//! Line layout and full-frame composition of boiled glyphs.

/// Boil and blit every glyph of every line into a frame.
pub mod compositor;
/// Line positions, baselines and glyph placement rules.
pub mod layout;
