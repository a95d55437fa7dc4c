//! Errors for invalid encoding and decoding arguments.

use thiserror::Error;

use crate::text::TextEncoding;

/// An invalid argument passed to an encoding or decoding operation.
///
/// Running out of data is never an error. See the [`crate::decode`] module
/// for how short reads are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The text encoding has no fixed code unit width.
    #[error("Unsupported text encoding ({0:?}).")]
    UnsupportedEncoding(TextEncoding),
    /// A length prefix must be one or two bytes wide.
    #[error("Length prefix must be 1 or 2 bytes wide, not {0}.")]
    PrefixWidth(u8),
    /// The encoded string cannot be described by its length prefix.
    #[error("String of {length} bytes exceeds the {capacity} byte capacity of its length prefix.")]
    TooLong { length: usize, capacity: usize },
    /// The character needs a surrogate pair and cannot be written as a
    /// single UTF-16 code unit.
    #[error("Character {0:?} does not fit a single UTF-16 code unit.")]
    WideCharacter(char),
}
