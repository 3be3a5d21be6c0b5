//! Procedural noise and the glyph "boil" distortion built on it.

/// Coverage-bitmap distortion driven by the noise field.
pub mod boil;
/// Animated cellular (Voronoi) distance noise.
pub mod voronoi;
