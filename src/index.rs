//! Pure index arithmetic over `(head, tail, mask)`.
//!
//! All wraparound is modular via bitwise AND against the mask, which is why
//! the capacity must stay a power of two. Subtraction uses wrapping u16
//! arithmetic so a head that has wrapped past the tail still yields the
//! correct masked distance.

use crate::capacity::RingIndex;

/// True when the ring holds no items.
#[inline]
pub(crate) fn is_empty(head: RingIndex, tail: RingIndex) -> bool {
    head == tail
}

/// True when the ring holds `capacity - 1` items, the most it can hold.
#[inline]
pub(crate) fn is_full(head: RingIndex, tail: RingIndex, mask: RingIndex) -> bool {
    count(head, tail, mask) == mask
}

/// Number of items currently held, in `[0, capacity - 1]`.
#[inline]
pub(crate) fn count(head: RingIndex, tail: RingIndex, mask: RingIndex) -> RingIndex {
    head.wrapping_sub(tail) & mask
}

/// The position one past `index`, wrapped to `[0, capacity)`.
#[inline]
pub(crate) fn advance(index: RingIndex, mask: RingIndex) -> RingIndex {
    index.wrapping_add(1) & mask
}
