//! The bit buffer and its backing storage.

use alloc::vec::Vec;

use crate::error::{Error, Result, bail};

/// The number of bytes preallocated by [`BitBuffer::new_default`].
pub const DEFAULT_CAPACITY: usize = 32;

/// A growable, bit-addressable buffer.
///
/// Bit `0` is the most significant bit of byte `0`, bit `7` its least
/// significant bit, bit `8` the most significant bit of byte `1`, and so on.
///
/// Writes past the current end grow the buffer to exactly cover the highest
/// bit written. The backing storage is allocated in whole bytes, is never
/// released before the buffer is dropped, and every bit between the logical
/// end and the end of the storage is kept at zero.
///
/// Reads either take an explicit bit index ([`BitBuffer::get_bits`],
/// [`BitBuffer::get_bytes`]) or consume from an internal read cursor
/// ([`BitBuffer::read_bits`], [`BitBuffer::read_bytes`]). The two never
/// interact.
#[derive(Clone)]
pub struct BitBuffer {
    /// The backing storage. Its length is the capacity in bytes.
    pub(crate) data: Vec<u8>,
    /// The logical length in bits.
    pub(crate) size: usize,
    /// The bit index at which the next sequential read starts.
    pub(crate) read_pos: usize,
}

impl BitBuffer {
    /// Create a new, empty buffer with `capacity` zeroed bytes of storage.
    pub fn new(capacity: usize) -> Self {
        Self {
            data: alloc::vec![0; capacity],
            size: 0,
            read_pos: 0,
        }
    }

    /// Create a new, empty buffer with [`DEFAULT_CAPACITY`] bytes of storage.
    pub fn new_default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }

    /// Create a buffer holding a copy of `bytes`.
    ///
    /// The size of the buffer is `bytes.len() * 8` bits and its capacity is
    /// exactly `bytes.len()` bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::from(bytes.to_vec())
    }

    /// The current size of the buffer in bits.
    #[inline]
    pub fn size_bits(&self) -> usize {
        self.size
    }

    /// The number of bytes currently allocated for storage.
    #[inline]
    pub fn capacity_bytes(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer holds no bits at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Grow the logical size of the buffer to `new_size` bits.
    ///
    /// Storage is extended to exactly `new_size.div_ceil(8)` bytes if it
    /// doesn't cover that many yet, and the new bytes are zeroed. A `new_size`
    /// that does not exceed the current size is a no-op: the buffer never
    /// shrinks.
    ///
    /// On allocation failure the buffer is left unchanged and
    /// [`Error::MallocFailed`] is returned.
    pub fn ensure_capacity(&mut self, new_size: usize) -> Result<()> {
        if new_size <= self.size {
            return Ok(());
        }

        let new_capacity = new_size.div_ceil(8);
        let old_capacity = self.data.len();

        if new_capacity > old_capacity {
            if self
                .data
                .try_reserve_exact(new_capacity - old_capacity)
                .is_err()
            {
                lwarn!(
                    "failed to grow storage from {} to {} bytes",
                    old_capacity,
                    new_capacity
                );
                bail!(Error::MallocFailed);
            }

            self.data.resize(new_capacity, 0);
            ltrace!(
                "grew storage from {} to {} bytes ({} bits)",
                old_capacity,
                new_capacity,
                new_size
            );
        }

        self.size = new_size;

        Ok(())
    }

    /// Grow the buffer so that it covers `[index, index + num_bits)`.
    ///
    /// An extent that is not addressable is reported as an allocation
    /// failure.
    #[inline]
    pub(crate) fn grow_to_cover(&mut self, index: usize, num_bits: usize) -> Result<()> {
        let Some(end) = index.checked_add(num_bits) else {
            bail!(Error::MallocFailed);
        };

        if end > self.size {
            self.ensure_capacity(end)?;
        }

        Ok(())
    }
}

impl Default for BitBuffer {
    fn default() -> Self {
        Self::new_default()
    }
}

impl From<Vec<u8>> for BitBuffer {
    fn from(data: Vec<u8>) -> Self {
        Self {
            size: data.len() * 8,
            data,
            read_pos: 0,
        }
    }
}

impl From<&[u8]> for BitBuffer {
    fn from(bytes: &[u8]) -> Self {
        Self::from_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_empty_and_zeroed() {
        let buf = BitBuffer::new(32);
        assert_eq!(buf.size_bits(), 0);
        assert_eq!(buf.capacity_bytes(), 32);
        assert!(buf.is_empty());
        assert!(buf.data.iter().all(|b| *b == 0));
    }

    #[test]
    fn default_capacity() {
        let buf = BitBuffer::default();
        assert_eq!(buf.capacity_bytes(), DEFAULT_CAPACITY);
        assert_eq!(buf.size_bits(), 0);
    }

    #[test]
    fn from_bytes_copies_input() {
        let bytes = [0xab, 0xcd, 0xef, 0x12];
        let buf = BitBuffer::from_bytes(&bytes);
        assert_eq!(buf.size_bits(), 32);
        assert_eq!(buf.capacity_bytes(), 4);
        assert_eq!(buf.data, bytes);

        let buf = BitBuffer::from(&[0_u8; 0][..]);
        assert_eq!(buf.size_bits(), 0);
        assert_eq!(buf.capacity_bytes(), 0);
    }

    #[test]
    fn ensure_capacity_grows_exactly() {
        let mut buf = BitBuffer::new(0);

        buf.ensure_capacity(1).unwrap();
        assert_eq!(buf.size_bits(), 1);
        assert_eq!(buf.capacity_bytes(), 1);

        buf.ensure_capacity(8).unwrap();
        assert_eq!(buf.size_bits(), 8);
        assert_eq!(buf.capacity_bytes(), 1);

        buf.ensure_capacity(9).unwrap();
        assert_eq!(buf.size_bits(), 9);
        assert_eq!(buf.capacity_bytes(), 2);

        buf.ensure_capacity(48).unwrap();
        assert_eq!(buf.capacity_bytes(), 6);
    }

    #[test]
    fn ensure_capacity_keeps_larger_storage() {
        let mut buf = BitBuffer::new(4);
        buf.ensure_capacity(11).unwrap();
        assert_eq!(buf.size_bits(), 11);
        assert_eq!(buf.capacity_bytes(), 4);
    }

    #[test]
    fn ensure_capacity_never_shrinks() {
        let mut buf = BitBuffer::new(0);
        buf.ensure_capacity(20).unwrap();
        buf.ensure_capacity(3).unwrap();
        assert_eq!(buf.size_bits(), 20);
        assert_eq!(buf.capacity_bytes(), 3);
    }

    #[test]
    fn unaddressable_extent() {
        let mut buf = BitBuffer::new(1);
        assert_eq!(
            buf.grow_to_cover(usize::MAX, 2),
            Err(Error::MallocFailed)
        );
        assert_eq!(buf.size_bits(), 0);
        assert_eq!(buf.capacity_bytes(), 1);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn failed_allocation_leaves_buffer_unchanged() {
        let mut buf = BitBuffer::from_bytes(&[0xaa]);
        assert_eq!(buf.ensure_capacity(usize::MAX), Err(Error::MallocFailed));
        assert_eq!(buf.size_bits(), 8);
        assert_eq!(buf.capacity_bytes(), 1);
        assert_eq!(buf.data, [0xaa]);
    }
}
