//! Sequential reads through the buffer's read cursor.

use alloc::vec::Vec;

use crate::BitBuffer;
use crate::error::{Error, Result, bail};

impl BitBuffer {
    /// The bit index at which the next [`BitBuffer::read_bits`] or
    /// [`BitBuffer::read_bytes`] starts.
    #[inline]
    pub fn read_cursor(&self) -> usize {
        self.read_pos
    }

    /// The number of bits between the read cursor and the end of the buffer.
    #[inline]
    pub fn remaining_bits(&self) -> usize {
        self.size - self.read_pos
    }

    /// Move the read cursor back to the start of the buffer.
    #[inline]
    pub fn reset_read_cursor(&mut self) {
        self.read_pos = 0;
    }

    /// Unpack the next `num_bits` wide field and advance the read cursor past
    /// it.
    ///
    /// Fails with [`Error::ReadPastEnd`] if fewer than `num_bits` bits are
    /// left, and otherwise like [`BitBuffer::get_bits`]. The cursor only moves
    /// on success.
    pub fn read_bits(&mut self, num_bits: usize) -> Result<u64> {
        if num_bits > self.remaining_bits() {
            bail!(Error::ReadPastEnd { size: self.size });
        }

        let value = self.get_bits(num_bits, self.read_pos)?;
        self.read_pos += num_bits;

        Ok(value)
    }

    /// Unpack the next `num_bytes` bytes and advance the read cursor past
    /// them.
    ///
    /// Fails like [`BitBuffer::read_bits`] and [`BitBuffer::get_bytes`].
    pub fn read_bytes(&mut self, num_bytes: usize) -> Result<Vec<u8>> {
        let fits = num_bytes
            .checked_mul(8)
            .is_some_and(|num_bits| num_bits <= self.remaining_bits());

        if !fits {
            bail!(Error::ReadPastEnd { size: self.size });
        }

        let bytes = self.get_bytes(num_bytes, self.read_pos)?;
        self.read_pos += num_bytes * 8;

        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BYTES_1: [u8; 3] = [0x01, 0x02, 0x03];
    const BYTES_2: [u8; 3] = [0xff, 0xfe, 0xfd];
    const BYTES_3: [u8; 6] = [0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff];

    #[test]
    fn read_fields() {
        let mut buf = BitBuffer::new(4);
        buf.append_bits(0xff, 8).unwrap();
        buf.append_bits(5, 3).unwrap();
        buf.append_bits(21, 5).unwrap();
        buf.append_bits(0xffff_ffff, 32).unwrap();

        assert_eq!(buf.read_cursor(), 0);
        assert_eq!(buf.read_bits(8).unwrap(), 0xff);
        assert_eq!(buf.read_cursor(), 8);
        assert_eq!(buf.read_bits(3).unwrap(), 5);
        assert_eq!(buf.read_cursor(), 11);
        assert_eq!(buf.read_bits(5).unwrap(), 21);
        assert_eq!(buf.read_cursor(), 16);
        assert_eq!(buf.read_bits(32).unwrap(), 0xffff_ffff);
        assert_eq!(buf.read_cursor(), 48);
        assert_eq!(buf.remaining_bits(), 0);

        assert_eq!(buf.read_bits(1), Err(Error::ReadPastEnd { size: 48 }));
        assert_eq!(buf.read_cursor(), 48);

        buf.reset_read_cursor();
        assert_eq!(buf.read_cursor(), 0);
        assert_eq!(buf.read_bits(8).unwrap(), 0xff);
        assert_eq!(buf.read_cursor(), 8);
    }

    #[test]
    fn read_byte_ranges() {
        let mut buf = BitBuffer::new(4);
        buf.append_bytes(&BYTES_1).unwrap();
        buf.append_bytes(&BYTES_2).unwrap();
        buf.append_bits(2, 2).unwrap();
        buf.append_bytes(&BYTES_3).unwrap();

        assert_eq!(buf.read_bytes(3).unwrap(), BYTES_1);
        assert_eq!(buf.read_cursor(), 24);
        assert_eq!(buf.read_bytes(3).unwrap(), BYTES_2);
        assert_eq!(buf.read_cursor(), 48);
        assert_eq!(buf.read_bits(2).unwrap(), 2);
        assert_eq!(buf.read_cursor(), 50);
        assert_eq!(buf.read_bytes(6).unwrap(), BYTES_3);
        assert_eq!(buf.read_cursor(), 98);

        assert_eq!(buf.read_bytes(1), Err(Error::ReadPastEnd { size: 98 }));
        assert_eq!(buf.read_cursor(), 98);

        buf.reset_read_cursor();
        assert_eq!(buf.read_bytes(3).unwrap(), BYTES_1);
        assert_eq!(buf.read_cursor(), 24);
    }

    #[test]
    fn failed_reads_keep_cursor() {
        let mut buf = BitBuffer::from_bytes(&[0_u8; 16]);
        buf.read_bits(7).unwrap();

        assert_eq!(
            buf.read_bits(65),
            Err(Error::RangeTooBig { num_bits: 65 })
        );
        assert_eq!(buf.read_bits(122), Err(Error::ReadPastEnd { size: 128 }));
        assert_eq!(
            buf.read_bytes(usize::MAX),
            Err(Error::ReadPastEnd { size: 128 })
        );
        assert_eq!(buf.read_bytes(16), Err(Error::ReadPastEnd { size: 128 }));
        assert_eq!(buf.read_cursor(), 7);
    }

    #[test]
    fn cursor_ignores_explicit_reads_and_writes() {
        let mut buf = BitBuffer::from_bytes(&[0x12, 0x34, 0x56]);
        assert_eq!(buf.read_bits(4).unwrap(), 0x1);

        assert_eq!(buf.get_bits(8, 8).unwrap(), 0x34);
        buf.set_bits(0xf, 4, 4).unwrap();
        buf.append_bytes(&[0x78]).unwrap();
        assert_eq!(buf.read_cursor(), 4);

        assert_eq!(buf.read_bits(4).unwrap(), 0xf);
        assert_eq!(buf.read_bytes(3).unwrap(), [0x34, 0x56, 0x78]);
        assert_eq!(buf.remaining_bits(), 0);
    }

    #[test]
    fn cursor_is_sum_of_consumed_bits() {
        let widths = [1, 7, 13, 64, 3, 33, 8];
        let mut buf = BitBuffer::new(0);

        for (i, width) in widths.iter().enumerate() {
            buf.append_bits(i as u64, *width).unwrap();
        }

        let mut consumed = 0;
        for (i, width) in widths.iter().enumerate() {
            assert_eq!(buf.read_bits(*width).unwrap(), i as u64);
            consumed += width;
            assert_eq!(buf.read_cursor(), consumed);
        }

        buf.reset_read_cursor();
        for (i, width) in widths.iter().enumerate() {
            assert_eq!(buf.read_bits(*width).unwrap(), i as u64);
        }
    }
}
