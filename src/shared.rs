//! Shared-region layout and the attach-mode raw-memory boundary.
//!
//! A shared region begins with the ring's bookkeeping header, immediately
//! followed by the data region of `capacity` bytes:
//!
//! ```text
//! ┌──────────────────────────────┬───────────────────────────────┐
//! │ RingHeader (repr(C))         │ data                          │
//! │ capacity: u16                │ capacity bytes, power of two  │
//! │ head:     u16                │                               │
//! │ tail:     u16                │                               │
//! └──────────────────────────────┴───────────────────────────────┘
//! ```
//!
//! Any two processes attaching to the same region must agree on this exact
//! layout and on the 16-bit index width, or corruption results. Callers size
//! the region with [`region_size`](crate::region_size) so both sides compute
//! the same capacity from the same total length.
//!
//! All raw-pointer work in the crate is confined to this module; the buffer
//! operations above it only see safe accessors.

use std::mem::{align_of, size_of};
use std::ptr::NonNull;
use std::slice;

use crate::capacity::{Capacity, RingIndex};
use crate::error::RingError;

/// Bookkeeping header leading every shared region.
///
/// `#[repr(C)]` fixes the field order so independently built processes agree
/// on the byte layout.
#[repr(C)]
pub(crate) struct RingHeader {
    pub capacity: RingIndex,
    pub head: RingIndex,
    pub tail: RingIndex,
}

/// Size of the bookkeeping header that leads a shared region.
pub const HEADER_SIZE: usize = size_of::<RingHeader>();

/// A borrowed, externally owned storage region holding a header plus data.
///
/// The region is never freed here; dropping a `SharedRegion` only severs the
/// reference. The external provider keeps ownership of the memory for its
/// whole lifetime.
#[derive(Debug)]
pub(crate) struct SharedRegion {
    region: NonNull<u8>,
    capacity: Capacity,
}

// Safety: binding a region requires the caller to guarantee exclusive access
// for the handle's lifetime, so moving the handle between threads cannot
// introduce aliasing. Mutation always goes through `&mut self`.
unsafe impl Send for SharedRegion {}
unsafe impl Sync for SharedRegion {}

impl SharedRegion {
    /// Binds a caller-provided region of `total_len` bytes and initializes
    /// its header with `head = tail = 0`, as the attach lifecycle requires.
    ///
    /// # Errors
    /// [`RingError::InvalidArgument`] if the pointer is null or misaligned
    /// for the header, or if `total_len` minus the header does not leave a
    /// power-of-two capacity within bounds.
    ///
    /// # Safety
    /// `region` must point to `total_len` writable bytes that stay valid, and
    /// are not mutated through any other handle, for as long as the returned
    /// `SharedRegion` is in use.
    pub unsafe fn bind(region: *mut u8, total_len: usize) -> Result<Self, RingError> {
        let Some(region) = NonNull::new(region) else {
            return Err(RingError::InvalidArgument {
                reason: "storage pointer is null",
            });
        };
        if region.as_ptr().align_offset(align_of::<RingHeader>()) != 0 {
            return Err(RingError::InvalidArgument {
                reason: "storage pointer is misaligned for the ring header",
            });
        }
        if total_len < HEADER_SIZE + 1 {
            return Err(RingError::InvalidArgument {
                reason: "region too small to hold the header and any data",
            });
        }
        let Some(capacity) = Capacity::from_raw(total_len - HEADER_SIZE) else {
            return Err(RingError::InvalidArgument {
                reason: "region length minus header is not a power of two within bounds",
            });
        };

        let shared = SharedRegion { region, capacity };
        // Safety: validity and exclusivity of the region are the caller's
        // contract; alignment and length were checked above.
        unsafe {
            shared.header_ptr().write(RingHeader {
                capacity: capacity.get() as RingIndex,
                head: 0,
                tail: 0,
            });
        }
        Ok(shared)
    }

    fn header_ptr(&self) -> *mut RingHeader {
        self.region.as_ptr().cast::<RingHeader>()
    }

    fn data_ptr(&self) -> *mut u8 {
        // Safety: bind() checked the region holds HEADER_SIZE + capacity bytes.
        unsafe { self.region.as_ptr().add(HEADER_SIZE) }
    }

    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    pub fn head(&self) -> RingIndex {
        // Safety: header_ptr is valid and aligned per bind(); shared access
        // is serialized by the caller contract.
        unsafe { (*self.header_ptr()).head }
    }

    pub fn tail(&self) -> RingIndex {
        unsafe { (*self.header_ptr()).tail }
    }

    pub fn set_head(&mut self, head: RingIndex) {
        unsafe { (*self.header_ptr()).head = head }
    }

    pub fn set_tail(&mut self, tail: RingIndex) {
        unsafe { (*self.header_ptr()).tail = tail }
    }

    pub fn data(&self) -> &[u8] {
        // Safety: the data region holds exactly capacity bytes per bind().
        unsafe { slice::from_raw_parts(self.data_ptr(), self.capacity.get()) }
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        unsafe { slice::from_raw_parts_mut(self.data_ptr(), self.capacity.get()) }
    }

    /// Severs the binding and hands the region pointer back to the caller
    /// without touching the memory.
    pub fn into_raw(self) -> NonNull<u8> {
        self.region
    }
}
