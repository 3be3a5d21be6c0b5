/// Shared value types (frame indices, fps, canvas size).
pub(crate) mod core;
/// Crate error type.
pub(crate) mod error;
/// Integer hashing helpers.
pub(crate) mod math;
