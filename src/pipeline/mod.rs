//! Frame pipeline: synchronous pre-roll, one background producer, and a fixed-rate consumer.
//!
//! [`context::PipelineContext`] replaces process-wide state; every piece of the pipeline
//! reaches shared data through an `Arc` of it.

/// Shared pipeline state and frame composition helpers.
pub mod context;
/// Pre-roll and fixed-rate playback.
pub mod playback;
/// Background frame producer thread.
pub mod producer;
/// Pending-frame hand-off queue.
pub mod sequence;
/// End-to-end orchestration and shutdown.
pub mod session;
/// Run flag and frame accounting.
pub mod state;
