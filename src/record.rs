//! Composite layouts built from scalars and strings.

use crate::{decode::Cursor, encode::Encoder, error::Error, scalar::Scalar};

/// Derive [`Record`] for a struct of fields encoded back to back.
///
/// _Requires Cargo feature `derive`._
///
/// # Example
///
/// Fields are encoded in declaration order. Any field implementing
/// [`Record`] (every scalar, `char`, and other derived records) needs no
/// attribute. `String` fields must state their framing with `text`:
///
/// - `prefix = 1` or `prefix = 2` for a length-prefixed string,
/// - `terminated` for a null-terminated string, optionally with
///   `include_nul` to keep the terminator when decoding,
/// - `encoding = ...` to name a [`TextEncoding`](crate::TextEncoding)
///   variant, `Utf16Le` if omitted.
///
/// ```
/// #[derive(Debug, Default, Record)]
/// struct Player {
///     id: u32,
///     address: Ipv4Addr,
///     #[text(prefix = 1, encoding = Utf8)]
///     name: String,
///     #[text(terminated)]
///     motto: String,
///     is_admin: bool,
/// }
/// ```
#[cfg(feature = "derive")]
pub use bytewise_derive::Record;

/// A value decoded from and encoded to a sequence of scalars.
///
/// Decoding follows the short read policy of [`crate::decode`]: a record
/// read from truncated data has its missing fields defaulted. Errors are
/// reserved for invalid arguments, such as an unsupported text encoding.
///
/// See the [`Record`](macro@Record) derive macro for an automatic
/// implementation of this trait.
pub trait Record: Sized {
    /// Decode a value at the cursor, advancing it.
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self, Error>;

    /// Append the encoded value.
    fn encode(&self, encoder: &mut Encoder) -> Result<(), Error>;
}

impl<T: Scalar> Record for T {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self, Error> {
        Ok(cursor.read())
    }

    fn encode(&self, encoder: &mut Encoder) -> Result<(), Error> {
        encoder.put(self);
        Ok(())
    }
}

impl Record for char {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self, Error> {
        Ok(cursor.read_char())
    }

    fn encode(&self, encoder: &mut Encoder) -> Result<(), Error> {
        encoder.put_char(*self)?;
        Ok(())
    }
}
