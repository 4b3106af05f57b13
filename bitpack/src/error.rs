//! Error types for bit buffer operations.

use core::fmt;

use crate::MAX_FIELD_BITS;

/// A specialized [`Result`] type for bit buffer operations.
pub type Result<T> = core::result::Result<T, Error>;

/// An error returned by a [`BitBuffer`](crate::BitBuffer) operation.
///
/// A failed operation never modifies the buffer, so it stays usable and the
/// call can be retried with corrected arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Growing the backing storage failed.
    MallocFailed,
    /// A read referenced a bit index at or past the end of the buffer.
    InvalidIndex {
        /// The requested bit index.
        index: usize,
        /// The size of the buffer in bits.
        size: usize,
    },
    /// A value does not fit into the requested number of bits.
    ValueTooBig {
        /// The rejected value.
        value: u64,
        /// The requested field width.
        num_bits: usize,
    },
    /// The requested field width exceeds [`MAX_FIELD_BITS`].
    RangeTooBig {
        /// The requested field width.
        num_bits: usize,
    },
    /// A read would extend past the end of the buffer.
    ReadPastEnd {
        /// The size of the buffer in bits.
        size: usize,
    },
    /// A single bit was read from an empty buffer.
    Empty,
}

impl Error {
    /// Return the kind of this error, without its associated data.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MallocFailed => ErrorKind::MallocFailed,
            Self::InvalidIndex { .. } => ErrorKind::InvalidIndex,
            Self::ValueTooBig { .. } => ErrorKind::ValueTooBig,
            Self::RangeTooBig { .. } => ErrorKind::RangeTooBig,
            Self::ReadPastEnd { .. } => ErrorKind::ReadPastEnd,
            Self::Empty => ErrorKind::Empty,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::MallocFailed => f.write_str("memory allocation failed"),
            Self::InvalidIndex { index, size: 0 } => {
                write!(f, "invalid index ({index}), bitpack is empty")
            }
            Self::InvalidIndex { index, size } => {
                write!(f, "invalid index ({index}), max index is {}", size - 1)
            }
            Self::ValueTooBig { value, num_bits } => {
                write!(f, "value {value} does not fit in {num_bits} bits")
            }
            Self::RangeTooBig { num_bits } => write!(
                f,
                "range size {num_bits} bits is too large (maximum size is {MAX_FIELD_BITS} bits)"
            ),
            Self::ReadPastEnd { size: 0 } => {
                f.write_str("attempted to read past end of bitpack (bitpack is empty)")
            }
            Self::ReadPastEnd { size } => write!(
                f,
                "attempted to read past end of bitpack (last index is {})",
                size - 1
            ),
            Self::Empty => f.write_str("bitpack is empty"),
        }
    }
}

impl core::error::Error for Error {}

/// The kind of an [`Error`].
///
/// The discriminants are stable and can be handed across a language boundary.
/// Code `0` is reserved for "no error", which is represented by `Ok(_)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorKind {
    /// See [`Error::MallocFailed`].
    MallocFailed = 1,
    /// See [`Error::InvalidIndex`].
    InvalidIndex = 2,
    /// See [`Error::ValueTooBig`].
    ValueTooBig = 3,
    /// See [`Error::RangeTooBig`].
    RangeTooBig = 4,
    /// See [`Error::ReadPastEnd`].
    ReadPastEnd = 5,
    /// See [`Error::Empty`].
    Empty = 6,
}

impl ErrorKind {
    /// Return the numeric code of this kind.
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Log the rejection of an operation and return the error from the enclosing
/// function.
macro_rules! bail {
    ($err:expr) => {{
        let err: $crate::Error = $err;
        ldebug!("operation rejected: {}", err);
        return Err(err);
    }};
}

pub(crate) use bail;

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn messages() {
        assert_eq!(Error::MallocFailed.to_string(), "memory allocation failed");
        assert_eq!(
            Error::InvalidIndex { index: 10, size: 10 }.to_string(),
            "invalid index (10), max index is 9"
        );
        assert_eq!(
            Error::InvalidIndex { index: 3, size: 0 }.to_string(),
            "invalid index (3), bitpack is empty"
        );
        assert_eq!(
            Error::ValueTooBig {
                value: 8,
                num_bits: 3
            }
            .to_string(),
            "value 8 does not fit in 3 bits"
        );
        assert_eq!(
            Error::RangeTooBig { num_bits: 65 }.to_string(),
            "range size 65 bits is too large (maximum size is 64 bits)"
        );
        assert_eq!(
            Error::ReadPastEnd { size: 48 }.to_string(),
            "attempted to read past end of bitpack (last index is 47)"
        );
        assert_eq!(Error::Empty.to_string(), "bitpack is empty");
    }

    #[test]
    fn kind_codes() {
        assert_eq!(Error::MallocFailed.kind().code(), 1);
        assert_eq!(Error::InvalidIndex { index: 0, size: 0 }.kind().code(), 2);
        assert_eq!(
            Error::ValueTooBig {
                value: 2,
                num_bits: 1
            }
            .kind(),
            ErrorKind::ValueTooBig
        );
        assert_eq!(Error::RangeTooBig { num_bits: 70 }.kind().code(), 4);
        assert_eq!(Error::ReadPastEnd { size: 1 }.kind(), ErrorKind::ReadPastEnd);
        assert_eq!(Error::Empty.kind().code(), 6);
    }
}
