//! Convenience constructors for common ring sizes.

use crate::error::RingError;
use crate::ring_buffer::RingBuffer;

/// Creates a 256-byte owning ring.
pub fn ring_256b() -> Result<RingBuffer, RingError> {
    RingBuffer::with_capacity(256)
}

/// Creates a 1KB owning ring.
pub fn ring_1kb() -> Result<RingBuffer, RingError> {
    RingBuffer::with_capacity(1024)
}

/// Creates a 4KB owning ring.
pub fn ring_4kb() -> Result<RingBuffer, RingError> {
    RingBuffer::with_capacity(4096)
}

/// Creates a 16KB owning ring.
pub fn ring_16kb() -> Result<RingBuffer, RingError> {
    RingBuffer::with_capacity(16384)
}
