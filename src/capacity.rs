//! Capacity planning: power-of-two rounding and storage sizing.

use crate::error::RingError;
use crate::shared::HEADER_SIZE;

/// Largest allowed ring capacity, in bytes.
///
/// The ring indexes its storage with a [`u16`] so that the bookkeeping header
/// stays compact and byte-identical across processes. A 16-bit index can
/// address at most 2^15 usable slots while still telling a full ring apart
/// from an empty one, so the ceiling is 32768.
pub const MAX_CAPACITY: usize = 32768;

/// The index type used for head/tail positions and the shared header fields.
///
/// Both sides of a shared-memory attachment must agree on this width; see the
/// layout contract in [`shared`](crate::shared).
pub type RingIndex = u16;

/// A validated power-of-two ring capacity.
///
/// There is no public way to construct a non-power-of-two `Capacity`; the
/// wraparound mask is always derived from it, never stored separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity(RingIndex);

impl Capacity {
    /// Plans the capacity for a requested byte count: the smallest power of
    /// two that can hold `requested` bytes.
    ///
    /// A request of zero is treated as a request for the smallest ring
    /// (capacity 1, usable 0) rather than an error.
    ///
    /// # Errors
    /// Returns [`RingError::TooLarge`] if `requested` exceeds
    /// [`MAX_CAPACITY`].
    ///
    /// # Example
    /// ```
    /// use shmring::Capacity;
    ///
    /// let cap = Capacity::for_length(10).unwrap();
    /// assert_eq!(cap.get(), 16);
    /// assert_eq!(cap.usable(), 15);
    /// ```
    pub fn for_length(requested: usize) -> Result<Self, RingError> {
        if requested > MAX_CAPACITY {
            return Err(RingError::TooLarge {
                requested,
                max: MAX_CAPACITY,
            });
        }
        let cap = requested.max(1).next_power_of_two();
        Ok(Capacity(cap as RingIndex))
    }

    /// Validates a raw capacity value read from, or destined for, a shared
    /// header. Returns `None` unless it is a power of two within bounds.
    pub(crate) fn from_raw(raw: usize) -> Option<Self> {
        if raw == 0 || raw > MAX_CAPACITY || !raw.is_power_of_two() {
            return None;
        }
        Some(Capacity(raw as RingIndex))
    }

    /// The total capacity in bytes, a power of two.
    pub fn get(self) -> usize {
        self.0 as usize
    }

    /// The usable capacity: one slot is always kept free to tell a full ring
    /// apart from an empty one, so `usable() == get() - 1`.
    pub fn usable(self) -> usize {
        self.0 as usize - 1
    }

    /// The wraparound bitmask, `capacity - 1`. Valid for masking only because
    /// the capacity is a power of two.
    pub(crate) fn mask(self) -> RingIndex {
        self.0 - 1
    }
}

/// Total storage a provider must reserve for a shared ring holding
/// `requested` bytes: the bookkeeping header plus the rounded data region.
///
/// The caller of [`RingBuffer::attach`](crate::RingBuffer::attach) sizes its
/// region with this function and passes the returned total length to attach,
/// so both sides agree on the layout.
///
/// # Errors
/// Returns [`RingError::TooLarge`] if `requested` exceeds [`MAX_CAPACITY`].
pub fn region_size(requested: usize) -> Result<usize, RingError> {
    Ok(HEADER_SIZE + Capacity::for_length(requested)?.get())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounds_to_smallest_power_of_two() {
        assert_eq!(Capacity::for_length(1).unwrap().get(), 1);
        assert_eq!(Capacity::for_length(2).unwrap().get(), 2);
        assert_eq!(Capacity::for_length(3).unwrap().get(), 4);
        assert_eq!(Capacity::for_length(10).unwrap().get(), 16);
        assert_eq!(Capacity::for_length(128).unwrap().get(), 128);
        assert_eq!(Capacity::for_length(129).unwrap().get(), 256);
        assert_eq!(Capacity::for_length(32768).unwrap().get(), 32768);
    }

    #[test]
    fn test_rounding_is_minimal() {
        // The result is a power of two >= the request, and halving it would
        // no longer fit the request.
        for requested in 1..=4096usize {
            let cap = Capacity::for_length(requested).unwrap().get();
            assert!(cap.is_power_of_two());
            assert!(cap >= requested);
            assert!(cap / 2 < requested, "capacity {cap} not minimal for {requested}");
        }
    }

    #[test]
    fn test_zero_request_gives_smallest_ring() {
        let cap = Capacity::for_length(0).unwrap();
        assert_eq!(cap.get(), 1);
        assert_eq!(cap.usable(), 0);
    }

    #[test]
    fn test_too_large() {
        let err = Capacity::for_length(MAX_CAPACITY + 1).unwrap_err();
        assert_eq!(
            err,
            RingError::TooLarge {
                requested: MAX_CAPACITY + 1,
                max: MAX_CAPACITY
            }
        );
        assert!(region_size(usize::MAX).is_err());
    }

    #[test]
    fn test_region_size_includes_header() {
        assert_eq!(region_size(10).unwrap(), HEADER_SIZE + 16);
        assert_eq!(region_size(128).unwrap(), HEADER_SIZE + 128);
    }

    #[test]
    fn test_from_raw_rejects_bad_capacities() {
        assert!(Capacity::from_raw(0).is_none());
        assert!(Capacity::from_raw(3).is_none());
        assert!(Capacity::from_raw(MAX_CAPACITY * 2).is_none());
        assert_eq!(Capacity::from_raw(16).unwrap().get(), 16);
    }

    #[test]
    fn test_mask() {
        assert_eq!(Capacity::for_length(16).unwrap().mask(), 15);
        assert_eq!(Capacity::for_length(0).unwrap().mask(), 0);
    }
}
