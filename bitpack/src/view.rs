//! Whole-buffer views: binary strings and byte copies.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Write};

use crate::BitBuffer;

impl BitBuffer {
    /// Render the buffer as a string of `'0'` and `'1'` characters, one per
    /// bit, starting at bit `0`.
    pub fn to_binary_string(&self) -> String {
        (0..self.size)
            .map(|i| if self.bit_at(i) == 1 { '1' } else { '0' })
            .collect()
    }

    /// Return a copy of the bytes in use together with their number.
    ///
    /// The byte count is `size_bits().div_ceil(8)`. If the size is not a
    /// multiple of eight, the unused low bits of the last byte are zero.
    pub fn to_byte_slice(&self) -> (Vec<u8>, usize) {
        let bytes = self.as_bytes().to_vec();
        let len = bytes.len();

        (bytes, len)
    }

    /// Borrow the bytes in use, without the unused tail of the storage.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.size.div_ceil(8)]
    }

    /// Consume the buffer and return the bytes in use.
    pub fn into_bytes(mut self) -> Vec<u8> {
        self.data.truncate(self.size.div_ceil(8));
        self.data
    }
}

impl fmt::Display for BitBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.size {
            f.write_char(if self.bit_at(i) == 1 { '1' } else { '0' })?;
        }

        Ok(())
    }
}

impl fmt::Debug for BitBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitBuffer")
            .field("size_bits", &self.size)
            .field("capacity_bytes", &self.data.len())
            .field("read_cursor", &self.read_pos)
            .field("bits", &format_args!("{self}"))
            .finish()
    }
}
