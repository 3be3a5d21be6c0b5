use std::collections::VecDeque;

use parking_lot::Mutex;

use crate::render::frame::Frame;

/// Capacity reserved on the first append.
pub const INITIAL_SEQUENCE_CAPACITY: usize = 512;

/// Order in which a drain hands pending frames to the consumer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrainOrder {
    /// Oldest first: frames play in generation order.
    #[default]
    Fifo,
    /// Newest first: pop from the end, reversing each drained batch.
    Lifo,
}

#[derive(Debug, Default)]
struct Pending {
    frames: VecDeque<Frame>,
    capacity: usize,
}

/// Lock-guarded hand-off queue between the frame producer and the consumer.
///
/// The lock covers only queue bookkeeping; frames are composed before [`FrameSequence::push`]
/// and converted after [`FrameSequence::drain_batch`], both outside the critical section.
#[derive(Debug, Default)]
pub struct FrameSequence {
    order: DrainOrder,
    pending: Mutex<Pending>,
}

impl FrameSequence {
    /// Create an empty sequence with the given drain discipline.
    pub fn new(order: DrainOrder) -> Self {
        Self {
            order,
            pending: Mutex::new(Pending::default()),
        }
    }

    /// Drain discipline.
    pub fn order(&self) -> DrainOrder {
        self.order
    }

    /// Append a frame, growing capacity geometrically when full. Returns the new length.
    pub fn push(&self, frame: Frame) -> usize {
        let mut p = self.pending.lock();
        if p.frames.len() == p.capacity {
            let target = if p.capacity == 0 {
                INITIAL_SEQUENCE_CAPACITY
            } else {
                p.capacity.saturating_mul(2)
            };
            let additional = target - p.frames.len();
            p.frames.reserve_exact(additional);
            p.capacity = target;
        }
        p.frames.push_back(frame);
        p.frames.len()
    }

    /// Remove a single frame according to the drain discipline.
    pub fn pop(&self) -> Option<Frame> {
        let mut p = self.pending.lock();
        match self.order {
            DrainOrder::Fifo => p.frames.pop_front(),
            DrainOrder::Lifo => p.frames.pop_back(),
        }
    }

    /// Remove every pending frame, in the order the consumer should receive them.
    pub fn drain_batch(&self) -> Vec<Frame> {
        let mut p = self.pending.lock();
        match self.order {
            DrainOrder::Fifo => p.frames.drain(..).collect(),
            DrainOrder::Lifo => p.frames.drain(..).rev().collect(),
        }
    }

    /// Number of pending frames.
    pub fn len(&self) -> usize {
        self.pending.lock().frames.len()
    }

    /// Return `true` when nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Logical capacity of the backing store (0 until the first append).
    pub fn capacity(&self) -> usize {
        self.pending.lock().capacity
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/sequence.rs"]
mod tests;
