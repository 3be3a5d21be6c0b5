//! Full-canvas frame buffers handed from the compositor to display surfaces.

/// Packed-pixel frame buffer.
pub mod frame;
