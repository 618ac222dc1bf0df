//! Fixed-capacity power-of-two byte ring buffer for owned or shared memory.
//!
//! This crate provides a circular byte buffer whose capacity is fixed at
//! construction and always a power of two, so every index wraps with a
//! bitmask instead of a modulo. One slot is kept free to tell a full ring
//! apart from an empty one: a ring of capacity `n` holds at most `n - 1`
//! bytes. When full, a push overwrites the oldest byte rather than blocking
//! or failing — the ring keeps the most recent data.
//!
//! # Ownership modes
//!
//! A [`RingBuffer`] either owns its storage or is placed atop memory the
//! caller provides:
//!
//! - [`RingBuffer::with_capacity`] allocates and owns the storage, which is
//!   freed when the ring drops.
//! - [`RingBuffer::attach`] binds the ring to an external region — typically
//!   inter-process shared memory — sized in advance with [`region_size`].
//!   The ring never frees attached storage; [`RingBuffer::detach`] hands the
//!   region back to its provider.
//!
//! # Example
//!
//! ```
//! use shmring::RingBuffer;
//!
//! let mut ring = RingBuffer::with_capacity(128)?;
//!
//! ring.push_slice(b"hello")?;
//! assert_eq!(ring.len(), 5);
//! assert_eq!(ring.peek(0)?, b'h');
//!
//! let mut out = [0u8; 5];
//! assert_eq!(ring.pop_slice(&mut out), 5);
//! assert_eq!(&out, b"hello");
//! # Ok::<(), shmring::RingError>(())
//! ```
//!
//! # Concurrency
//!
//! [`RingBuffer`] has no internal synchronization; callers serialize access.
//! [`SyncRingBuffer`] is an opt-in mutex-guarded wrapper for sharing an
//! owning ring between threads in one process. For attached rings shared
//! across processes, mutual exclusion is entirely the callers' contract.

mod bytes;
mod capacity;
mod error;
mod index;
mod ring_buffer;
pub mod shared;
mod sync;

pub use bytes::{ring_1kb, ring_4kb, ring_16kb, ring_256b};
pub use capacity::{Capacity, MAX_CAPACITY, RingIndex, region_size};
pub use error::RingError;
pub use ring_buffer::RingBuffer;
pub use shared::HEADER_SIZE;
pub use sync::SyncRingBuffer;

#[cfg(test)]
mod tests;
