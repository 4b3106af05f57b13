//! Packing and unpacking of multi-bit unsigned integer fields.

use core::ops::{Bound, RangeBounds};

use crate::BitBuffer;
use crate::error::{Error, Result, bail};

/// The widest field, in bits, that can be packed or unpacked at once.
///
/// Fixed at the width of `u64` on every target.
pub const MAX_FIELD_BITS: usize = u64::BITS as usize;

/// Get the largest value that fits into `num_bits` bits.
///
/// Widths of [`MAX_FIELD_BITS`] or more saturate to `u64::MAX`.
#[inline]
pub(crate) fn bit_mask(num_bits: usize) -> u64 {
    if num_bits >= MAX_FIELD_BITS {
        u64::MAX
    } else {
        (1 << num_bits) - 1
    }
}

impl BitBuffer {
    /// Pack `value` into the `num_bits` bits starting at bit `index`.
    ///
    /// The most significant bit of the field lands at `index`. The buffer
    /// grows if the field extends past its current end.
    ///
    /// Fails with [`Error::RangeTooBig`] if `num_bits` exceeds
    /// [`MAX_FIELD_BITS`] and with [`Error::ValueTooBig`] if `value` needs more
    /// than `num_bits` bits. Both are checked before anything is written.
    pub fn set_bits(&mut self, value: u64, num_bits: usize, index: usize) -> Result<()> {
        if num_bits > MAX_FIELD_BITS {
            bail!(Error::RangeTooBig { num_bits });
        }

        if value > bit_mask(num_bits) {
            bail!(Error::ValueTooBig { value, num_bits });
        }

        self.grow_to_cover(index, num_bits)?;
        self.write_field(value, num_bits, index);

        Ok(())
    }

    /// Append `value` as a `num_bits` wide field at the end of the buffer.
    ///
    /// Equivalent to `set_bits(value, num_bits, size_bits())`.
    pub fn append_bits(&mut self, value: u64, num_bits: usize) -> Result<()> {
        self.set_bits(value, num_bits, self.size)
    }

    /// Pack `value` into the bits covered by `range`.
    ///
    /// The width of the field is the length of the range. An unbounded start
    /// means bit `0`, an unbounded end means the current end of the buffer.
    /// A range that ends before it starts fails with [`Error::RangeTooBig`]
    /// and leaves the buffer untouched.
    ///
    /// ```
    /// use bitpack::BitBuffer;
    ///
    /// let mut buf = BitBuffer::new(2);
    /// buf.set_field(0..8, 0xab).unwrap();
    /// buf.set_field(8..=15, 0xcd).unwrap();
    /// assert_eq!(buf.as_bytes(), [0xab, 0xcd]);
    /// ```
    pub fn set_field(&mut self, range: impl RangeBounds<usize>, value: u64) -> Result<()> {
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => match start.checked_add(1) {
                Some(start) => start,
                None => bail!(Error::MallocFailed),
            },
            Bound::Unbounded => 0,
        };

        let end = match range.end_bound() {
            Bound::Included(&end) => end.saturating_add(1),
            Bound::Excluded(&end) => end,
            Bound::Unbounded => self.size.max(start),
        };

        let Some(num_bits) = end.checked_sub(start) else {
            bail!(Error::RangeTooBig {
                num_bits: end.wrapping_sub(start),
            });
        };

        self.set_bits(value, num_bits, start)
    }

    /// Unpack the `num_bits` wide field starting at bit `index`.
    ///
    /// Fails with [`Error::InvalidIndex`] if `index` is not below the size of
    /// the buffer, with [`Error::ReadPastEnd`] if the field extends past the
    /// end and with [`Error::RangeTooBig`] if `num_bits` exceeds
    /// [`MAX_FIELD_BITS`], checked in that order.
    pub fn get_bits(&self, num_bits: usize, index: usize) -> Result<u64> {
        self.check_span(index, num_bits)?;

        if num_bits > MAX_FIELD_BITS {
            bail!(Error::RangeTooBig { num_bits });
        }

        Ok(self.read_field(num_bits, index))
    }

    /// Check that `index` is inside the buffer and that `num_bits` bits
    /// starting there are, too.
    pub(crate) fn check_span(&self, index: usize, num_bits: usize) -> Result<()> {
        if index >= self.size {
            bail!(Error::InvalidIndex {
                index,
                size: self.size,
            });
        }

        match index.checked_add(num_bits) {
            Some(end) if end <= self.size => Ok(()),
            _ => bail!(Error::ReadPastEnd { size: self.size }),
        }
    }

    /// Write a field that has already been validated and fits into the
    /// storage. Bits are written a byte-chunk at a time.
    pub(crate) fn write_field(&mut self, value: u64, num_bits: usize, index: usize) {
        let mut bits_left = num_bits;

        while bits_left > 0 {
            let absolute_pos = index + (num_bits - bits_left);
            let byte_pos = absolute_pos / 8;
            let bit_pos = absolute_pos % 8;
            let bits_in_byte = (8 - bit_pos).min(bits_left);
            let shift = bits_left - bits_in_byte;
            let chunk_mask = bit_mask(bits_in_byte) as u8;
            let chunk = (value >> shift) as u8 & chunk_mask;

            let shift_in_byte = 8 - bits_in_byte - bit_pos;
            let byte_mask = chunk_mask << shift_in_byte;
            let byte = &mut self.data[byte_pos];

            *byte = (*byte & !byte_mask) | (chunk << shift_in_byte);

            bits_left -= bits_in_byte;
        }
    }

    /// Read a field whose span has already been checked.
    pub(crate) fn read_field(&self, num_bits: usize, index: usize) -> u64 {
        let mut value = 0;
        let mut pos = index;
        let mut bits_left = num_bits;

        while bits_left > 0 {
            let bit_pos = pos % 8;
            let bits_in_byte = (8 - bit_pos).min(bits_left);
            let shift_in_byte = 8 - bits_in_byte - bit_pos;
            let chunk = (self.data[pos / 8] >> shift_in_byte) & bit_mask(bits_in_byte) as u8;

            value = (value << bits_in_byte) | u64::from(chunk);

            pos += bits_in_byte;
            bits_left -= bits_in_byte;
        }

        value
    }
}
