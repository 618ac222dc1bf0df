//! Opt-in synchronized wrapper around an owning ring.
//!
//! The plain [`RingBuffer`] deliberately carries no internal locking: the
//! caller serializes access. `SyncRingBuffer` is the additive alternative for
//! callers inside one process who want that serialization handled for them.

use std::sync::{Arc, Mutex};

use crate::error::RingError;
use crate::ring_buffer::RingBuffer;

/// A cloneable, mutex-guarded handle to an owning [`RingBuffer`].
///
/// Clones share the same underlying ring. Every operation takes the lock for
/// its whole duration, so the overwrite-on-full and wholesale-rejection
/// semantics are preserved atomically per call.
///
/// # Example
///
/// ```
/// use shmring::SyncRingBuffer;
///
/// let ring = SyncRingBuffer::with_capacity(64)?;
/// let writer = ring.clone();
///
/// writer.push_slice(b"hello")?;
/// assert_eq!(ring.len(), 5);
/// assert_eq!(ring.pop(), Some(b'h'));
/// # Ok::<(), shmring::RingError>(())
/// ```
pub struct SyncRingBuffer {
    inner: Arc<Mutex<RingBuffer>>,
}

impl Clone for SyncRingBuffer {
    fn clone(&self) -> Self {
        SyncRingBuffer {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl SyncRingBuffer {
    /// Creates a synchronized owning ring sized for at least `requested`
    /// bytes.
    ///
    /// # Errors
    /// Same as [`RingBuffer::with_capacity`].
    pub fn with_capacity(requested: usize) -> Result<Self, RingError> {
        Ok(SyncRingBuffer {
            inner: Arc::new(Mutex::new(RingBuffer::with_capacity(requested)?)),
        })
    }

    /// See [`RingBuffer::push`].
    pub fn push(&self, byte: u8) {
        self.inner.lock().unwrap().push(byte);
    }

    /// See [`RingBuffer::push_slice`].
    pub fn push_slice(&self, bytes: &[u8]) -> Result<(), RingError> {
        self.inner.lock().unwrap().push_slice(bytes)
    }

    /// See [`RingBuffer::pop`].
    pub fn pop(&self) -> Option<u8> {
        self.inner.lock().unwrap().pop()
    }

    /// See [`RingBuffer::pop_slice`].
    pub fn pop_slice(&self, out: &mut [u8]) -> usize {
        self.inner.lock().unwrap().pop_slice(out)
    }

    /// See [`RingBuffer::peek`].
    pub fn peek(&self, index: usize) -> Result<u8, RingError> {
        self.inner.lock().unwrap().peek(index)
    }

    /// See [`RingBuffer::reset`].
    pub fn reset(&self) {
        self.inner.lock().unwrap().reset();
    }

    /// See [`RingBuffer::len`].
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    /// See [`RingBuffer::is_empty`].
    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().is_empty()
    }

    /// See [`RingBuffer::is_full`].
    pub fn is_full(&self) -> bool {
        self.inner.lock().unwrap().is_full()
    }

    /// See [`RingBuffer::capacity`].
    pub fn capacity(&self) -> usize {
        self.inner.lock().unwrap().capacity()
    }

    /// See [`RingBuffer::usable_capacity`].
    pub fn usable_capacity(&self) -> usize {
        self.inner.lock().unwrap().usable_capacity()
    }
}
