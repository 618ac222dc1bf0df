//! Overwriting byte ring buffer with owned or attached storage.

use std::ptr::NonNull;

use tracing::{debug, trace};

use crate::capacity::{Capacity, RingIndex};
use crate::error::RingError;
use crate::index;
use crate::shared::SharedRegion;

/// Backing storage for a ring, tagged by ownership.
///
/// Destruction is matched exhaustively on this tag: dropping `Owned` frees
/// the boxed storage, dropping `Shared` only severs the reference, so an
/// owning free can never be applied to borrowed memory.
enum Storage {
    /// Storage allocated by the ring and freed when it drops. Head and tail
    /// live alongside it rather than in a header.
    Owned {
        buf: Box<[u8]>,
        head: RingIndex,
        tail: RingIndex,
    },
    /// Caller-provided storage, e.g. inter-process shared memory. Head and
    /// tail live in the region's header so peers observe the same indices.
    Shared(SharedRegion),
}

/// A fixed-capacity, power-of-two-sized circular byte buffer.
///
/// The capacity is fixed at construction and always a power of two, so all
/// wraparound arithmetic is a bitmask rather than a modulo. One slot is kept
/// free to tell a full ring apart from an empty one: a ring of capacity `n`
/// holds at most `n - 1` bytes, reported by [`usable_capacity`].
///
/// When the ring is full, [`push`] overwrites the oldest byte instead of
/// blocking or failing: the ring keeps the most recent `n - 1` bytes. Bulk
/// pushes larger than the usable capacity are rejected wholesale with no
/// partial write.
///
/// # Ownership
///
/// A ring either owns its storage ([`with_capacity`], freed on drop) or is
/// attached atop caller-supplied memory ([`attach`], never freed here —
/// see [`detach`]). The attached form is intended for regions shared across
/// independent execution contexts, such as POSIX shared memory.
///
/// # Concurrency
///
/// Operations take `&mut self` and provide no internal synchronization.
/// Concurrent mutation from multiple threads or processes is the caller's
/// problem to serialize, by contract; see [`SyncRingBuffer`](crate::SyncRingBuffer)
/// for an opt-in locked wrapper within one process.
///
/// # Example
///
/// ```
/// use shmring::RingBuffer;
///
/// let mut ring = RingBuffer::with_capacity(10)?; // rounds up to 16
/// assert_eq!(ring.capacity(), 16);
/// assert_eq!(ring.usable_capacity(), 15);
///
/// ring.push_slice(b"DEFG")?;
/// assert_eq!(ring.len(), 4);
/// assert_eq!(ring.peek(0)?, b'D');
/// assert_eq!(ring.pop(), Some(b'D'));
/// # Ok::<(), shmring::RingError>(())
/// ```
///
/// [`push`]: RingBuffer::push
/// [`usable_capacity`]: RingBuffer::usable_capacity
/// [`with_capacity`]: RingBuffer::with_capacity
/// [`attach`]: RingBuffer::attach
/// [`detach`]: RingBuffer::detach
pub struct RingBuffer {
    storage: Storage,
    capacity: Capacity,
}

impl RingBuffer {
    /// Creates a ring that owns its storage, sized for at least `requested`
    /// bytes (rounded up to the next power of two).
    ///
    /// # Errors
    /// - [`RingError::TooLarge`] if `requested` exceeds
    ///   [`MAX_CAPACITY`](crate::MAX_CAPACITY).
    /// - [`RingError::AllocationFailed`] if the allocator cannot provide the
    ///   storage. Retrying is the caller's prerogative.
    pub fn with_capacity(requested: usize) -> Result<Self, RingError> {
        let capacity = Capacity::for_length(requested)?;

        let mut buf = Vec::new();
        buf.try_reserve_exact(capacity.get())
            .map_err(|_| RingError::AllocationFailed {
                bytes: capacity.get(),
            })?;
        buf.resize(capacity.get(), 0);

        debug!(
            "allocated ring buffer: requested={}, capacity={}, usable={}",
            requested,
            capacity.get(),
            capacity.usable()
        );

        Ok(RingBuffer {
            storage: Storage::Owned {
                buf: buf.into_boxed_slice(),
                head: 0,
                tail: 0,
            },
            capacity,
        })
    }

    /// Places a ring atop caller-provided storage of `total_len` bytes and
    /// initializes it empty. Nothing is allocated or freed; the provider
    /// keeps ownership of the memory.
    ///
    /// The caller sizes the region with [`region_size`](crate::region_size)
    /// and passes the same total length here, so both sides derive the same
    /// capacity (`total_len` minus the header). Re-attaching to a live region
    /// resets its indices, exactly like constructing over it; when two
    /// processes share a region, only the creating side attaches and the
    /// peers must coordinate externally.
    ///
    /// # Errors
    /// [`RingError::InvalidArgument`] if `region` is null or misaligned, or
    /// if `total_len` does not leave a power-of-two data capacity within
    /// bounds after the header.
    ///
    /// # Safety
    /// `region` must point to `total_len` bytes that are valid for reads and
    /// writes, are not accessed through any other handle while this ring is
    /// in use, and outlive it. Cross-process use additionally requires the
    /// peers to agree on the layout contract in [`shared`](crate::shared).
    pub unsafe fn attach(region: *mut u8, total_len: usize) -> Result<Self, RingError> {
        // Safety: forwarded caller contract.
        let shared = unsafe { SharedRegion::bind(region, total_len)? };
        let capacity = shared.capacity();

        debug!(
            "attached ring buffer: total_len={}, capacity={}, usable={}",
            total_len,
            capacity.get(),
            capacity.usable()
        );

        Ok(RingBuffer {
            storage: Storage::Shared(shared),
            capacity,
        })
    }

    /// Severs an attached ring's reference to its storage without freeing
    /// it, returning the region pointer so the provider can reclaim or reuse
    /// the memory. Returns `None` for an owning ring, whose storage is freed
    /// when it drops instead.
    pub fn detach(self) -> Option<NonNull<u8>> {
        match self.storage {
            Storage::Shared(shared) => {
                trace!("detached ring buffer from shared region");
                Some(shared.into_raw())
            }
            Storage::Owned { .. } => None,
        }
    }

    /// Total capacity in bytes, a power of two.
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Bytes the ring can actually hold: `capacity() - 1`. One slot stays
    /// free to disambiguate full from empty.
    pub fn usable_capacity(&self) -> usize {
        self.capacity.usable()
    }

    /// True when the ring was placed atop caller-provided storage.
    pub fn is_attached(&self) -> bool {
        matches!(self.storage, Storage::Shared(_))
    }

    /// Number of bytes currently buffered.
    pub fn len(&self) -> usize {
        index::count(self.head(), self.tail(), self.capacity.mask()) as usize
    }

    /// True when no bytes are buffered.
    pub fn is_empty(&self) -> bool {
        index::is_empty(self.head(), self.tail())
    }

    /// True when the ring holds `usable_capacity()` bytes and the next
    /// [`push`](RingBuffer::push) will overwrite the oldest one.
    pub fn is_full(&self) -> bool {
        index::is_full(self.head(), self.tail(), self.capacity.mask())
    }

    /// Empties the ring, from any state. Also usable as an explicit clear.
    pub fn reset(&mut self) {
        self.set_head(0);
        self.set_tail(0);
    }

    /// Appends one byte. When the ring is full the oldest byte is discarded
    /// first, so the ring always keeps the most recent bytes. Never blocks
    /// and never fails.
    pub fn push(&mut self, byte: u8) {
        let mask = self.capacity.mask();
        if self.is_full() {
            // Overwrite-on-full: drop the oldest byte.
            let tail = self.tail();
            self.set_tail(index::advance(tail, mask));
        }

        let head = self.head();
        self.data_mut()[head as usize] = byte;
        self.set_head(index::advance(head, mask));
    }

    /// Appends a slice of bytes in order.
    ///
    /// Rejected wholesale, with no bytes written, when `bytes.len()` exceeds
    /// the usable capacity. A slice within the usable capacity is always
    /// accepted and may overwrite unread data exactly as repeated single
    /// pushes would — the threshold is total usable capacity, not currently
    /// free space.
    ///
    /// # Errors
    /// [`RingError::CapacityExceeded`] for an oversized slice; the ring is
    /// left completely unchanged.
    pub fn push_slice(&mut self, bytes: &[u8]) -> Result<(), RingError> {
        if bytes.len() > self.capacity.usable() {
            return Err(RingError::CapacityExceeded {
                len: bytes.len(),
                usable: self.capacity.usable(),
            });
        }
        for &byte in bytes {
            self.push(byte);
        }
        Ok(())
    }

    /// Removes and returns the oldest byte, or `None` when the ring is
    /// empty. An empty ring is a normal query result, not an error.
    pub fn pop(&mut self) -> Option<u8> {
        if self.is_empty() {
            return None;
        }
        let tail = self.tail();
        let byte = self.data()[tail as usize];
        self.set_tail(index::advance(tail, self.capacity.mask()));
        Some(byte)
    }

    /// Pops up to `out.len()` bytes into `out`, oldest first, stopping early
    /// when the ring runs empty. Returns the number of bytes transferred,
    /// zero when already empty.
    pub fn pop_slice(&mut self, out: &mut [u8]) -> usize {
        let mut transferred = 0;
        while transferred < out.len() {
            match self.pop() {
                Some(byte) => {
                    out[transferred] = byte;
                    transferred += 1;
                }
                None => break,
            }
        }
        transferred
    }

    /// Returns the byte at `index` without removing anything. Index 0 is the
    /// oldest unread byte; [`peek(0)`](RingBuffer::peek) agrees with what
    /// [`pop`](RingBuffer::pop) would return next.
    ///
    /// # Errors
    /// [`RingError::OutOfRange`] when `index >= len()`.
    pub fn peek(&self, index: usize) -> Result<u8, RingError> {
        let len = self.len();
        if index >= len {
            return Err(RingError::OutOfRange { index, len });
        }
        let pos = self.tail().wrapping_add(index as RingIndex) & self.capacity.mask();
        Ok(self.data()[pos as usize])
    }

    fn head(&self) -> RingIndex {
        match &self.storage {
            Storage::Owned { head, .. } => *head,
            Storage::Shared(shared) => shared.head(),
        }
    }

    fn tail(&self) -> RingIndex {
        match &self.storage {
            Storage::Owned { tail, .. } => *tail,
            Storage::Shared(shared) => shared.tail(),
        }
    }

    fn set_head(&mut self, value: RingIndex) {
        match &mut self.storage {
            Storage::Owned { head, .. } => *head = value,
            Storage::Shared(shared) => shared.set_head(value),
        }
    }

    fn set_tail(&mut self, value: RingIndex) {
        match &mut self.storage {
            Storage::Owned { tail, .. } => *tail = value,
            Storage::Shared(shared) => shared.set_tail(value),
        }
    }

    fn data(&self) -> &[u8] {
        match &self.storage {
            Storage::Owned { buf, .. } => buf,
            Storage::Shared(shared) => shared.data(),
        }
    }

    fn data_mut(&mut self) -> &mut [u8] {
        match &mut self.storage {
            Storage::Owned { buf, .. } => buf,
            Storage::Shared(shared) => shared.data_mut(),
        }
    }
}

impl std::fmt::Debug for RingBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RingBuffer")
            .field("capacity", &self.capacity.get())
            .field("len", &self.len())
            .field("attached", &self.is_attached())
            .finish()
    }
}
