//! Glyph rasterization and the per-code coverage cache.

/// Lazily populated coverage-bitmap cache keyed by ASCII code.
pub mod cache;
/// Rasterizer seam and the `fontdue` implementation.
pub mod raster;
