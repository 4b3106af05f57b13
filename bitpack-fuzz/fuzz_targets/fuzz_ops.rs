#![no_main]

use bitpack::{BitBuffer, ErrorKind, MAX_FIELD_BITS};
use libfuzzer_sys::fuzz_target;

// Input layout:
// [0]     initial capacity in bytes
// [1..]   operations, each an opcode byte followed by its arguments:
//         0: set_bit      index (u16 LE)
//         1: clear_bit    index (u16 LE)
//         2: get_bit      index (u16 LE)
//         3: set_bits     width (u8), index (u16 LE), value (u64 LE)
//         4: set_bytes    len (u8), index (u16 LE), bytes
//         5: read_bits    width (u8)
//         6: read_bytes   len (u8)
//         7: reset_read_cursor
// Operations are decoded until the input runs out.

struct Input<'a> {
    data: &'a [u8],
}

impl<'a> Input<'a> {
    fn u8(&mut self) -> Option<u8> {
        let (first, rest) = self.data.split_first()?;
        self.data = rest;
        Some(*first)
    }

    fn u16(&mut self) -> Option<usize> {
        Some(u16::from_le_bytes([self.u8()?, self.u8()?]) as usize)
    }

    fn u64(&mut self) -> Option<u64> {
        let bytes = self.bytes(8)?;
        Some(u64::from_le_bytes(bytes.try_into().ok()?))
    }

    fn bytes(&mut self, len: usize) -> Option<&'a [u8]> {
        if self.data.len() < len {
            return None;
        }

        let (head, rest) = self.data.split_at(len);
        self.data = rest;
        Some(head)
    }
}

/// Check the invariants that must hold after every operation.
fn check(buf: &BitBuffer, expected_capacity: usize) {
    assert_eq!(buf.capacity_bytes(), expected_capacity);
    assert!(buf.read_cursor() <= buf.size_bits());

    let used = buf.as_bytes();
    assert_eq!(used.len(), buf.size_bits().div_ceil(8));

    let tail_bits = buf.size_bits() % 8;
    if tail_bits != 0 {
        let padding = used[used.len() - 1] & (0xff >> tail_bits);
        assert_eq!(padding, 0, "padding bits must stay zero");
    }
}

fuzz_target!(|data: &[u8]| {
    let mut input = Input { data };
    let Some(capacity) = input.u8() else {
        return;
    };

    let mut buf = BitBuffer::new(capacity as usize);
    let mut expected_capacity = capacity as usize;

    while let Some(op) = input.u8() {
        let size_before = buf.size_bits();
        let cursor_before = buf.read_cursor();

        match op % 8 {
            0 | 1 => {
                let Some(index) = input.u16() else { break };
                if op % 8 == 0 {
                    buf.set_bit(index).unwrap();
                } else {
                    buf.clear_bit(index).unwrap();
                }
                assert_eq!(buf.get_bit(index).unwrap(), u8::from(op % 8 == 0));
                assert_eq!(buf.size_bits(), size_before.max(index + 1));
            }
            2 => {
                let Some(index) = input.u16() else { break };
                match buf.get_bit(index) {
                    Ok(bit) => assert!(bit <= 1),
                    Err(e) if size_before == 0 => assert_eq!(e.kind(), ErrorKind::Empty),
                    Err(e) => assert_eq!(e.kind(), ErrorKind::InvalidIndex),
                }
            }
            3 => {
                let (Some(width), Some(index), Some(value)) =
                    (input.u8(), input.u16(), input.u64())
                else {
                    break;
                };
                let width = width as usize % (MAX_FIELD_BITS + 4);
                let snapshot = buf.as_bytes().to_vec();

                match buf.set_bits(value, width, index) {
                    Ok(()) => {
                        assert_eq!(buf.size_bits(), size_before.max(index + width));
                        if width > 0 {
                            assert_eq!(buf.get_bits(width, index).unwrap(), value);
                        }
                    }
                    Err(e) => {
                        assert!(matches!(
                            e.kind(),
                            ErrorKind::RangeTooBig | ErrorKind::ValueTooBig
                        ));
                        assert_eq!(buf.size_bits(), size_before);
                        assert_eq!(buf.as_bytes(), snapshot);
                    }
                }
            }
            4 => {
                let (Some(len), Some(index)) = (input.u8(), input.u16()) else {
                    break;
                };
                let Some(bytes) = input.bytes(len as usize) else {
                    break;
                };

                buf.set_bytes(bytes, index).unwrap();
                assert_eq!(buf.size_bits(), size_before.max(index + bytes.len() * 8));
                if !bytes.is_empty() {
                    assert_eq!(buf.get_bytes(bytes.len(), index).unwrap(), bytes);
                }
            }
            5 => {
                let Some(width) = input.u8() else { break };
                let width = width as usize % (MAX_FIELD_BITS + 4);

                match buf.read_bits(width) {
                    Ok(value) => {
                        assert_eq!(buf.read_cursor(), cursor_before + width);
                        assert_eq!(buf.get_bits(width, cursor_before).unwrap(), value);
                    }
                    Err(_) => assert_eq!(buf.read_cursor(), cursor_before),
                }
            }
            6 => {
                let Some(len) = input.u8() else { break };
                let len = len as usize;

                match buf.read_bytes(len) {
                    Ok(bytes) => {
                        assert_eq!(bytes.len(), len);
                        assert_eq!(buf.read_cursor(), cursor_before + len * 8);
                    }
                    Err(_) => assert_eq!(buf.read_cursor(), cursor_before),
                }
            }
            _ => {
                buf.reset_read_cursor();
                assert_eq!(buf.read_cursor(), 0);
            }
        }

        expected_capacity = expected_capacity.max(buf.size_bits().div_ceil(8));
        check(&buf, expected_capacity);
    }

    assert_eq!(buf.to_binary_string().len(), buf.size_bits());
});
