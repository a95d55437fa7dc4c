//! Conversion of scalars and strings to bytes.
//!
//! The free functions here return fresh byte sequences and hold no state;
//! output is built by concatenating their results. [`Encoder`] does the same
//! concatenation into an owned buffer under a fixed [`ByteOrder`].

use alloc::vec::Vec;

use crate::{
    error::Error,
    order::ByteOrder,
    record::Record,
    scalar::Scalar,
    text::{Prefix, TextEncoding},
};

/// Encode a scalar.
pub fn to_bytes<T: Scalar>(value: &T, order: ByteOrder) -> T::Bytes {
    value.to_bytes(order)
}

/// Encode a character as a single little-endian UTF-16 code unit.
pub fn char_bytes(c: char) -> Result<[u8; 2], Error> {
    let mut units = [0; 2];

    match c.encode_utf16(&mut units) {
        [unit] => Ok(unit.to_le_bytes()),
        _ => Err(Error::WideCharacter(c)),
    }
}

/// Encode a string as UTF-16LE followed by a two byte null terminator.
pub fn string_terminated(text: &str) -> Vec<u8> {
    let mut r: Vec<u8> = text.encode_utf16().flat_map(u16::to_le_bytes).collect();
    r.extend_from_slice(&[0, 0]);
    r
}

/// Encode a string followed by a null terminator one code unit wide.
///
/// Every encoding is accepted here, UTF-32 and UTF-7 included. The
/// terminator is [`TextEncoding::terminator_width`] zero bytes.
pub fn string_terminated_with(text: &str, encoding: TextEncoding) -> Vec<u8> {
    let mut r = encoding.encode_any(text);
    r.resize(r.len() + encoding.terminator_width(), 0);
    r
}

/// Encode a string preceded by its length in bytes.
///
/// An empty string is written as a single zero byte whatever the prefix
/// width, which a two byte prefix cannot tell apart from a string starting
/// with a zero byte. Readers of such data see a short read on the second
/// prefix byte.
///
/// The prefix leaves one code unit of headroom: a one byte prefix carries at
/// most 254 bytes of a single-byte encoding, or 252 bytes of UTF-16. The
/// length is checked before anything is encoded.
pub fn string_by_length(
    text: &str,
    prefix: Prefix,
    encoding: TextEncoding,
    order: ByteOrder,
) -> Result<Vec<u8>, Error> {
    let width = encoding.unit_width()?;

    if text.is_empty() {
        return Ok(alloc::vec![0]);
    }

    let length = encoding.encoded_len(text)?;
    let capacity = (prefix.max() - width) / width * width;

    if length > capacity {
        Err(Error::TooLong { length, capacity })?;
    }

    let mut r = Vec::with_capacity(prefix.width() + length);

    match prefix {
        // Bounded by the capacity check.
        Prefix::One => r.push(length as u8),
        Prefix::Two => r.extend_from_slice(&(length as u16).to_bytes(order)),
    }

    r.extend(encoding.encode(text)?);

    Ok(r)
}

/// Builder concatenating encoded values into an owned buffer.
#[derive(Debug, Clone)]
pub struct Encoder {
    bytes: Vec<u8>,
    order: ByteOrder,
}

impl Encoder {
    /// Create an empty encoder writing integers in `order`.
    pub const fn new(order: ByteOrder) -> Self {
        Self {
            bytes: Vec::new(),
            order,
        }
    }

    /// Create an empty encoder with space reserved for `capacity` bytes.
    pub fn with_capacity(order: ByteOrder, capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
            order,
        }
    }

    /// The byte order used for integers and length prefixes.
    pub const fn order(&self) -> ByteOrder {
        self.order
    }

    /// Append a scalar.
    pub fn put<T: Scalar>(&mut self, value: &T) -> &mut Self {
        self.bytes.extend_from_slice(value.to_bytes(self.order).as_ref());
        self
    }

    /// Append a character as a UTF-16LE code unit.
    pub fn put_char(&mut self, c: char) -> Result<&mut Self, Error> {
        self.bytes.extend_from_slice(&char_bytes(c)?);
        Ok(self)
    }

    /// Append a null-terminated UTF-16LE string.
    pub fn put_str_terminated(&mut self, text: &str) -> &mut Self {
        self.bytes.extend(string_terminated(text));
        self
    }

    /// Append a null-terminated string in `encoding`.
    pub fn put_str_terminated_with(&mut self, text: &str, encoding: TextEncoding) -> &mut Self {
        self.bytes.extend(string_terminated_with(text, encoding));
        self
    }

    /// Append a length-prefixed string. See [`string_by_length`].
    pub fn put_str_by_length(
        &mut self,
        text: &str,
        prefix: Prefix,
        encoding: TextEncoding,
    ) -> Result<&mut Self, Error> {
        self.bytes.extend(string_by_length(text, prefix, encoding, self.order)?);
        Ok(self)
    }

    /// Append a record.
    pub fn put_record<R: Record>(&mut self, record: &R) -> Result<&mut Self, Error> {
        record.encode(self)?;
        Ok(self)
    }

    /// The bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Consume the encoder, returning the bytes written.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
