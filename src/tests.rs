//! Cross-cutting tests: the original ring-buffer scenarios plus the attach
//! lifecycle over a caller-provided region.

use std::alloc::{self, Layout};

use super::*;

/// A stand-in for an external raw-memory provider (e.g. a shared-memory
/// segment): allocates a region sized for `requested` ring bytes and frees it
/// on drop, independently of any ring attached to it.
struct Region {
    ptr: *mut u8,
    layout: Layout,
    total_len: usize,
}

impl Region {
    fn reserve(requested: usize) -> Region {
        let total_len = region_size(requested).unwrap();
        let layout = Layout::from_size_align(total_len, 2).unwrap();
        let ptr = unsafe { alloc::alloc_zeroed(layout) };
        assert!(!ptr.is_null());
        Region {
            ptr,
            layout,
            total_len,
        }
    }
}

impl Drop for Region {
    fn drop(&mut self) {
        unsafe { alloc::dealloc(self.ptr, self.layout) };
    }
}

#[test]
fn test_single_queue_dequeue_round_trip() {
    // Capacity request 128, usable 127: 100 sequential bytes round-trip
    // exactly, no overwrite.
    let mut ring = RingBuffer::with_capacity(128).unwrap();
    assert_eq!(ring.capacity(), 128);

    for byte in 0..100u8 {
        ring.push(byte);
    }
    for byte in 0..100u8 {
        assert_eq!(ring.pop(), Some(byte));
    }
    assert!(ring.is_empty());
}

#[test]
fn test_slice_round_trip() {
    let mut ring = RingBuffer::with_capacity(128).unwrap();
    let input: Vec<u8> = (0..100).collect();

    ring.push_slice(&input).unwrap();
    let mut output = vec![0u8; 100];
    assert_eq!(ring.pop_slice(&mut output), 100);
    assert_eq!(input, output);
}

#[test]
fn test_peek_defg() {
    let mut ring = RingBuffer::with_capacity(128).unwrap();
    for byte in [b'D', b'E', b'F', b'G'] {
        ring.push(byte);
    }
    assert_eq!(ring.len(), 4);
    assert_eq!(ring.peek(0).unwrap(), b'D');
    assert_eq!(ring.peek(1).unwrap(), b'E');
    assert_eq!(ring.peek(2).unwrap(), b'F');
    assert_eq!(ring.peek(3).unwrap(), b'G');
}

#[test]
fn test_attach_lifecycle() {
    // The provider sizes the region with region_size; attach derives the
    // same capacity from the total length.
    let region = Region::reserve(10);
    assert_eq!(region.total_len, HEADER_SIZE + 16);

    let mut ring = unsafe { RingBuffer::attach(region.ptr, region.total_len) }.unwrap();
    assert!(ring.is_attached());
    assert_eq!(ring.capacity(), 16);
    assert_eq!(ring.usable_capacity(), 15);
    assert!(ring.is_empty());

    for byte in 0..10u8 {
        ring.push(byte);
    }
    for byte in 0..10u8 {
        assert_eq!(ring.pop(), Some(byte));
    }

    // Detach severs the handle and returns the region untouched; the
    // provider (Region) stays responsible for freeing it.
    let returned = ring.detach().unwrap();
    assert_eq!(returned.as_ptr(), region.ptr);
}

#[test]
fn test_attach_slice_round_trip_with_wraparound() {
    let region = Region::reserve(10); // capacity 16, usable 15
    let mut ring = unsafe { RingBuffer::attach(region.ptr, region.total_len) }.unwrap();

    // Offset the indices first so the slice wraps the physical end.
    for byte in 0..10u8 {
        ring.push(byte);
    }
    let mut scratch = [0u8; 10];
    assert_eq!(ring.pop_slice(&mut scratch), 10);

    let input: Vec<u8> = (100..115).collect();
    ring.push_slice(&input).unwrap();
    assert!(ring.is_full());

    let mut output = vec![0u8; 15];
    assert_eq!(ring.pop_slice(&mut output), 15);
    assert_eq!(input, output);
}

#[test]
fn test_attach_rejects_null_region() {
    let err = unsafe { RingBuffer::attach(std::ptr::null_mut(), 64) }.unwrap_err();
    assert!(matches!(err, RingError::InvalidArgument { .. }));
}

#[test]
fn test_reattach_resets_indices() {
    let region = Region::reserve(16);

    let mut ring = unsafe { RingBuffer::attach(region.ptr, region.total_len) }.unwrap();
    ring.push_slice(b"stale").unwrap();
    ring.detach().unwrap();

    // Attaching again re-initializes the header, as the original attach
    // operation does: the new handle starts empty.
    let ring = unsafe { RingBuffer::attach(region.ptr, region.total_len) }.unwrap();
    assert!(ring.is_empty());
    assert_eq!(ring.len(), 0);
}

#[test]
fn test_owned_and_attached_agree() {
    // The same operation sequence yields identical observable state in both
    // ownership modes.
    let region = Region::reserve(32);
    let mut attached = unsafe { RingBuffer::attach(region.ptr, region.total_len) }.unwrap();
    let mut owned = RingBuffer::with_capacity(32).unwrap();

    for ring in [&mut owned, &mut attached] {
        for byte in 0..40u8 {
            ring.push(byte);
        }
        ring.pop();
        ring.push_slice(b"tail").unwrap();
    }

    assert_eq!(owned.len(), attached.len());
    for index in 0..owned.len() {
        assert_eq!(owned.peek(index).unwrap(), attached.peek(index).unwrap());
    }
}
