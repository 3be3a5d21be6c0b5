use super::*;
use crate::foundation::core::{Canvas, FrameIndex};

fn stamped(idx: u64) -> Frame {
    let mut f = Frame::try_new(Canvas {
        width: 1,
        height: 1,
    })
    .unwrap();
    f.set_stamp(FrameIndex(idx), idx as f32 / 12.0);
    f
}

fn indices(frames: &[Frame]) -> Vec<u64> {
    frames.iter().map(|f| f.index().0).collect()
}

#[test]
fn fifo_drain_preserves_generation_order() {
    let seq = FrameSequence::new(DrainOrder::Fifo);
    for i in 0..3 {
        seq.push(stamped(i));
    }
    assert_eq!(indices(&seq.drain_batch()), vec![0, 1, 2]);
    assert!(seq.is_empty());
}

#[test]
fn lifo_drain_reverses_the_batch() {
    let seq = FrameSequence::new(DrainOrder::Lifo);
    for i in 0..3 {
        seq.push(stamped(i));
    }
    assert_eq!(indices(&seq.drain_batch()), vec![2, 1, 0]);
    assert!(seq.is_empty());
}

#[test]
fn single_pops_follow_the_discipline() {
    let fifo = FrameSequence::new(DrainOrder::Fifo);
    let lifo = FrameSequence::new(DrainOrder::Lifo);
    for i in 0..2 {
        fifo.push(stamped(i));
        lifo.push(stamped(i));
    }
    assert_eq!(fifo.pop().map(|f| f.index().0), Some(0));
    assert_eq!(lifo.pop().map(|f| f.index().0), Some(1));
}

#[test]
fn capacity_starts_at_512_and_doubles() {
    let seq = FrameSequence::default();
    assert_eq!(seq.capacity(), 0);
    seq.push(stamped(0));
    assert_eq!(seq.capacity(), INITIAL_SEQUENCE_CAPACITY);
    for i in 1..INITIAL_SEQUENCE_CAPACITY as u64 {
        seq.push(stamped(i));
    }
    assert_eq!(seq.capacity(), INITIAL_SEQUENCE_CAPACITY);
    assert_eq!(seq.push(stamped(512)), 513);
    assert_eq!(seq.capacity(), 2 * INITIAL_SEQUENCE_CAPACITY);
}

#[test]
fn draining_an_empty_sequence_is_a_no_op() {
    let seq = FrameSequence::new(DrainOrder::Lifo);
    assert!(seq.drain_batch().is_empty());
    assert!(seq.pop().is_none());
}
