//! Display surfaces the playback loop converts frames for and presents to.
//!
//! Window and GPU presentation live outside this crate; the headless surfaces here cover tests,
//! debugging and offline PNG dumps.

/// PNG-sequence surface.
pub mod png;
/// Surface trait and the in-memory surface.
pub mod surface;
