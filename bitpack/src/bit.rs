//! Single-bit access.

use crate::BitBuffer;
use crate::error::{Error, Result, bail};

/// Return the byte holding bit `index` and the mask selecting it.
#[inline(always)]
fn locate(index: usize) -> (usize, u8) {
    (index / 8, 0x80 >> (index % 8))
}

impl BitBuffer {
    /// Set the bit at `index` to `1`.
    ///
    /// If `index` is past the end of the buffer, the buffer grows to
    /// `index + 1` bits and any bits in between are `0`.
    pub fn set_bit(&mut self, index: usize) -> Result<()> {
        self.set(index, true)
    }

    /// Set the bit at `index` to `0`.
    ///
    /// Grows the buffer like [`BitBuffer::set_bit`].
    pub fn clear_bit(&mut self, index: usize) -> Result<()> {
        self.set(index, false)
    }

    /// Set the bit at `index` to `bit`, growing the buffer if necessary.
    pub fn set(&mut self, index: usize, bit: bool) -> Result<()> {
        if index >= self.size {
            self.grow_to_cover(index, 1)?;
        }

        let (byte, mask) = locate(index);

        if bit {
            self.data[byte] |= mask;
        } else {
            self.data[byte] &= !mask;
        }

        Ok(())
    }

    /// Return the bit at `index` as `0` or `1`.
    ///
    /// Reading never grows the buffer: an empty buffer reports
    /// [`Error::Empty`] and an index past the end reports
    /// [`Error::InvalidIndex`].
    pub fn get_bit(&self, index: usize) -> Result<u8> {
        if self.size == 0 {
            bail!(Error::Empty);
        }

        if index >= self.size {
            bail!(Error::InvalidIndex {
                index,
                size: self.size,
            });
        }

        Ok(self.bit_at(index))
    }

    /// Return whether the bit at `index` is set.
    ///
    /// Fails like [`BitBuffer::get_bit`].
    pub fn get(&self, index: usize) -> Result<bool> {
        self.get_bit(index).map(|bit| bit == 1)
    }

    /// Return the bit at `index`, which must be below the size.
    #[inline(always)]
    pub(crate) fn bit_at(&self, index: usize) -> u8 {
        let (byte, mask) = locate(index);
        u8::from(self.data[byte] & mask != 0)
    }
}
