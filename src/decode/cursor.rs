//! Slice-based decoder implementation.

use alloc::string::String;
use core::char::REPLACEMENT_CHARACTER;

use tracing::{trace, warn};

use crate::{
    error::Error,
    order::ByteOrder,
    record::Record,
    scalar::Scalar,
    text::{Prefix, TextEncoding},
};

/// Decode the scalar at an offset in a slice, advancing the offset by its
/// width.
///
/// Returns [`Scalar::DEFAULT`] if fewer than [`Scalar::WIDTH`] bytes remain.
/// The offset advances regardless.
pub fn next<T: Scalar>(r: &[u8], i: &mut usize, order: ByteOrder) -> T {
    take(r, i, T::WIDTH)
        .and_then(|b| T::from_slice(b, order))
        .unwrap_or(T::DEFAULT)
}

/// Decode a little-endian UTF-16 code unit as a character, advancing the
/// offset by two bytes.
///
/// Returns `'\0'` if fewer than two bytes remain. A lone surrogate decodes
/// as U+FFFD.
pub fn next_char(r: &[u8], i: &mut usize) -> char {
    match take(r, i, 2) {
        Some(&[lo, hi]) => char::from_u32(u16::from_le_bytes([lo, hi]).into())
            .unwrap_or(REPLACEMENT_CHARACTER),
        _ => '\0',
    }
}

/// Decode a null-terminated UTF-16LE string.
///
/// Reads two byte code units until a null unit or the end of the slice. The
/// offset advances past every unit read, terminator included. With
/// `include_nul`, a found terminator is kept at the end of the string.
pub fn next_string(r: &[u8], i: &mut usize, include_nul: bool) -> String {
    let (payload, terminated) = take_terminated(r, i, 2);

    // Always a whole number of code units.
    let mut text = decode_units(payload);

    if terminated && include_nul {
        text.push('\0');
    }

    text
}

/// Decode a string terminated by a null code unit of `encoding`.
///
/// Behaves as [`next_string`], stepping by the code unit width of
/// `encoding`.
pub fn next_string_with(
    r: &[u8],
    i: &mut usize,
    encoding: TextEncoding,
    include_nul: bool,
) -> Result<String, Error> {
    let width = encoding.unit_width()?;
    let (payload, terminated) = take_terminated(r, i, width);

    let mut text = encoding.decode(payload)?;

    if terminated && include_nul {
        text.push('\0');
    }

    Ok(text)
}

/// Decode a string preceded by its length in bytes.
///
/// The prefix is read like any integer, advancing the offset by its width.
/// Payload bytes are then consumed up to the announced length or the end of
/// the slice, whichever comes first. If the payload is cut short, the bytes
/// that were present are consumed and an empty string is returned.
pub fn next_string_by_length(
    r: &[u8],
    i: &mut usize,
    prefix: Prefix,
    encoding: TextEncoding,
    order: ByteOrder,
) -> Result<String, Error> {
    encoding.unit_width()?;

    let length = match prefix {
        Prefix::One => usize::from(next::<u8>(r, i, order)),
        Prefix::Two => usize::from(next::<u16>(r, i, order)),
    };

    let start = *i;
    let end = start.saturating_add(length).min(r.len());
    let payload = r.get(start..end).unwrap_or_default();

    *i += payload.len();

    if payload.len() < length {
        warn!(
            position = start,
            length,
            available = payload.len(),
            "truncated string payload"
        );
        return Ok(String::new());
    }

    encoding.decode(payload)
}

/// Take bytes from an offset in a slice, advancing the offset whether or not
/// they exist.
fn take<'a>(r: &'a [u8], i: &mut usize, n: usize) -> Option<&'a [u8]> {
    let s = *i;
    *i = s.saturating_add(n);

    let bytes = r.get(s..*i);

    if bytes.is_none() {
        trace!(position = s, width = n, length = r.len(), "short read");
    }

    bytes
}

/// Take whole code units up to and including a null unit, advancing the
/// offset past them.
///
/// Returns the units before the terminator, and whether one was found.
fn take_terminated<'a>(r: &'a [u8], i: &mut usize, width: usize) -> (&'a [u8], bool) {
    let tail = r.get(*i..).unwrap_or_default();

    let found = tail
        .chunks_exact(width)
        .position(|unit| unit.iter().all(|b| *b == 0));

    match found {
        Some(n) => {
            *i += (n + 1) * width;
            (&tail[..n * width], true)
        }
        None => {
            let walked = tail.len() / width * width;
            *i += walked;
            (&tail[..walked], false)
        }
    }
}

fn decode_units(r: &[u8]) -> String {
    let units = r.chunks_exact(2).map(|c| u16::from_le_bytes([c[0], c[1]]));

    char::decode_utf16(units)
        .map(|c| c.unwrap_or(REPLACEMENT_CHARACTER))
        .collect()
}

/// A slice with a read position and byte order.
///
/// Wraps the free functions of this module for callers that would rather
/// not thread an offset and byte order through every call.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    data: &'a [u8],
    position: usize,
    order: ByteOrder,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at the start of `data`.
    pub const fn new(data: &'a [u8], order: ByteOrder) -> Self {
        Self {
            data,
            position: 0,
            order,
        }
    }

    /// The underlying slice.
    pub const fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Offset of the next read. May lie past the end of the data after
    /// short reads.
    pub const fn position(&self) -> usize {
        self.position
    }

    pub fn set_position(&mut self, position: usize) {
        self.position = position;
    }

    pub const fn order(&self) -> ByteOrder {
        self.order
    }

    /// Bytes not yet read.
    pub fn remaining(&self) -> &'a [u8] {
        self.data.get(self.position..).unwrap_or_default()
    }

    pub fn is_exhausted(&self) -> bool {
        self.position >= self.data.len()
    }

    /// See [`next`].
    pub fn read<T: Scalar>(&mut self) -> T {
        next(self.data, &mut self.position, self.order)
    }

    /// See [`next_char`].
    pub fn read_char(&mut self) -> char {
        next_char(self.data, &mut self.position)
    }

    /// See [`next_string`].
    pub fn read_string(&mut self, include_nul: bool) -> String {
        next_string(self.data, &mut self.position, include_nul)
    }

    /// See [`next_string_with`].
    pub fn read_string_with(
        &mut self,
        encoding: TextEncoding,
        include_nul: bool,
    ) -> Result<String, Error> {
        next_string_with(self.data, &mut self.position, encoding, include_nul)
    }

    /// See [`next_string_by_length`].
    pub fn read_string_by_length(
        &mut self,
        prefix: Prefix,
        encoding: TextEncoding,
    ) -> Result<String, Error> {
        next_string_by_length(self.data, &mut self.position, prefix, encoding, self.order)
    }

    /// Decode a record.
    pub fn read_record<R: Record>(&mut self) -> Result<R, Error> {
        R::decode(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_past_the_end() {
        let r = [1, 2, 3];
        let i = &mut 2;

        assert_eq!(take(&r, i, 2), None);
        assert_eq!(*i, 4);
        assert_eq!(take(&r, i, 1), None);
        assert_eq!(*i, 5);
    }

    #[test]
    fn take_terminated_stops_at_null_unit() {
        let r = [0x41, 0x00, 0x00, 0x42, 0x00, 0x00, 0x43];
        let i = &mut 0;

        // The zero byte at index 2 starts a unit, not a terminator.
        let (payload, terminated) = take_terminated(&r, i, 2);

        assert_eq!(payload, &[0x41, 0x00, 0x00, 0x42]);
        assert!(terminated);
        assert_eq!(*i, 6);
    }

    #[test]
    fn take_terminated_leaves_dangling_byte() {
        let r = [0x41, 0x00, 0x42];
        let i = &mut 0;

        let (payload, terminated) = take_terminated(&r, i, 2);

        assert_eq!(payload, &[0x41, 0x00]);
        assert!(!terminated);
        assert_eq!(*i, 2);
    }
}
