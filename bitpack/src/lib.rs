/*!
A growable, bit-addressable buffer for packing and unpacking arbitrary-width
fields.

[`BitBuffer`] is a building block for compact binary formats such as protocol
headers, flag sets and variable-width integer fields. It does not define a
format itself: callers decide where each field lives.

The buffer supports
- setting, clearing and reading single bits,
- packing and unpacking unsigned integer fields of up to [`MAX_FIELD_BITS`]
  bits at any bit offset,
- packing and unpacking byte ranges at any bit offset, with a bulk copy for
  byte-aligned offsets,
- sequential reads through an internal read cursor,
- rendering the contents as a binary string or a byte vector.

Bits are numbered most-significant-bit first within each byte, and fields are
stored with their most significant bit at the lowest bit index:

```
use bitpack::BitBuffer;

let mut buf = BitBuffer::new(4);
buf.set_bits(0xff, 8, 0).unwrap();
buf.set_bits(5, 3, 8).unwrap();
buf.set_bits(21, 5, 11).unwrap();

assert_eq!(buf.to_binary_string(), "1111111110110101");
assert_eq!(buf.get_bits(5, 11).unwrap(), 21);
```

Writing past the end grows the buffer to exactly cover the highest bit
written, rounded up to a whole byte. Storage is never released, and reads
never grow the buffer.

## Errors
Every fallible operation returns a [`Result`]. A failed operation leaves the
contents, size and read cursor of the buffer untouched, so the buffer remains
usable afterwards.

## Features
- `logging`: log storage growth and rejected operations through the `log`
  crate.

## Safety
This crate forbids unsafe code via a crate-level attribute.
*/

#![no_std]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

extern crate alloc;

#[macro_use]
mod log;

mod bit;
mod buffer;
mod bytes;
mod cursor;
mod error;
mod field;
mod view;

pub use buffer::{BitBuffer, DEFAULT_CAPACITY};
pub use error::{Error, ErrorKind, Result};
pub use field::MAX_FIELD_BITS;
