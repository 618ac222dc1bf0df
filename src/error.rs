//! Error types for ring buffer operations.

use thiserror::Error;

/// Ring buffer operation error.
///
/// Every fallible operation reports failure through this enum; nothing is
/// signalled via panics or a shared stream. An empty buffer is not an error:
/// [`RingBuffer::pop`](crate::RingBuffer::pop) returns `None` and
/// [`RingBuffer::pop_slice`](crate::RingBuffer::pop_slice) returns a count of
/// zero instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RingError {
    /// Requested capacity exceeds [`MAX_CAPACITY`](crate::MAX_CAPACITY).
    #[error("ring: requested capacity {requested} exceeds maximum {max}")]
    TooLarge { requested: usize, max: usize },

    /// The allocator could not provide storage for an owning buffer.
    #[error("ring: allocation of {bytes} bytes failed")]
    AllocationFailed { bytes: usize },

    /// An invalid external storage region was passed to attach.
    #[error("ring: invalid attach argument: {reason}")]
    InvalidArgument { reason: &'static str },

    /// A bulk push larger than the usable capacity was rejected wholesale.
    #[error("ring: pushing {len} bytes exceeds usable capacity {usable}")]
    CapacityExceeded { len: usize, usable: usize },

    /// A peek index at or beyond the current item count.
    #[error("ring: peek index {index} out of range, {len} items buffered")]
    OutOfRange { index: usize, len: usize },
}
