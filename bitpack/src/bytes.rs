//! Packing and unpacking of byte ranges at arbitrary bit offsets.

use alloc::vec::Vec;

use crate::BitBuffer;
use crate::error::{Error, Result, bail};

impl BitBuffer {
    /// Pack `bytes` into the buffer starting at bit `index`.
    ///
    /// The buffer grows if the bytes extend past its current end. A
    /// byte-aligned `index` copies the bytes straight into storage; any other
    /// offset packs them one 8-bit field at a time.
    pub fn set_bytes(&mut self, bytes: &[u8], index: usize) -> Result<()> {
        let Some(num_bits) = bytes.len().checked_mul(8) else {
            bail!(Error::MallocFailed);
        };

        self.grow_to_cover(index, num_bits)?;

        if index.is_multiple_of(8) {
            let start = index / 8;
            self.data[start..start + bytes.len()].copy_from_slice(bytes);
        } else {
            for (i, byte) in bytes.iter().enumerate() {
                self.write_field(u64::from(*byte), 8, index + i * 8);
            }
        }

        Ok(())
    }

    /// Append `bytes` at the end of the buffer.
    ///
    /// Equivalent to `set_bytes(bytes, size_bits())`.
    pub fn append_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.set_bytes(bytes, self.size)
    }

    /// Unpack `num_bytes` bytes starting at bit `index`.
    ///
    /// Fails with [`Error::InvalidIndex`] if `index` is not below the size of
    /// the buffer and with [`Error::ReadPastEnd`] if the bytes extend past the
    /// end.
    pub fn get_bytes(&self, num_bytes: usize, index: usize) -> Result<Vec<u8>> {
        self.check_span(index, num_bytes.checked_mul(8).unwrap_or(usize::MAX))?;

        let mut bytes = Vec::new();

        if bytes.try_reserve_exact(num_bytes).is_err() {
            bail!(Error::MallocFailed);
        }

        if index.is_multiple_of(8) {
            let start = index / 8;
            bytes.extend_from_slice(&self.data[start..start + num_bytes]);
        } else {
            bytes.extend((0..num_bytes).map(|i| self.read_field(8, index + i * 8) as u8));
        }

        Ok(bytes)
    }
}
