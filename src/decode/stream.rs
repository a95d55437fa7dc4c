//! Reader-based decoder implementation.
//!
//! _Requires Cargo feature `std`._

use std::{
    fs::File,
    io::{self, BufReader, Read, Seek, SeekFrom},
    path::Path,
    string::String,
    vec,
    vec::Vec,
};

use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    order::ByteOrder,
    scalar::Scalar,
    text::{Prefix, TextEncoding},
};

/// Errors occurring while decoding from a stream.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the underlying source.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// An invalid decoding argument.
    #[error(transparent)]
    Codec(#[from] crate::Error),
}

/// Decoder reading scalars from a sequential, seekable source.
///
/// The size of the source is fixed when the decoder is created. Reads that
/// would pass it return the type's default value and leave the position
/// untouched.
#[derive(Debug)]
pub struct StreamDecoder<R> {
    source: R,
    size: u64,
    position: u64,
    order: ByteOrder,
}

impl StreamDecoder<BufReader<File>> {
    /// Open a file for exclusive, buffered reading.
    ///
    /// The file is locked against other handles that respect advisory locks
    /// until the decoder is dropped. Failure to open or lock the file is
    /// reported here rather than on the first read.
    pub fn open(path: impl AsRef<Path>, order: ByteOrder) -> Result<Self, Error> {
        let path = path.as_ref();

        let file = File::open(path)?;
        file.try_lock().map_err(io::Error::from)?;

        let decoder = Self::new(BufReader::new(file), order)?;
        debug!(path = %path.display(), size = decoder.size, "opened stream");

        Ok(decoder)
    }
}

impl<R: Read + Seek> StreamDecoder<R> {
    /// Wrap a source, reading from its current position.
    pub fn new(mut source: R, order: ByteOrder) -> Result<Self, Error> {
        let position = source.stream_position()?;
        let size = source.seek(SeekFrom::End(0))?;
        source.seek(SeekFrom::Start(position))?;

        Ok(Self {
            source,
            size,
            position,
            order,
        })
    }

    /// Total size of the source, in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Offset of the next read.
    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn order(&self) -> ByteOrder {
        self.order
    }

    /// Recover the source, positioned at the next unread byte.
    pub fn into_inner(self) -> R {
        self.source
    }

    /// Decode the next scalar.
    ///
    /// Returns [`Scalar::DEFAULT`] without moving if fewer than
    /// [`Scalar::WIDTH`] bytes remain.
    pub fn next<T: Scalar>(&mut self) -> Result<T, Error> {
        let order = self.order;

        Ok(self
            .take(T::WIDTH)?
            .and_then(|b| T::from_slice(&b, order))
            .unwrap_or(T::DEFAULT))
    }

    /// Decode the next little-endian UTF-16 code unit as a character.
    ///
    /// Returns `'\0'` without moving if fewer than two bytes remain.
    pub fn next_char(&mut self) -> Result<char, Error> {
        let c = match self.take(2)?.as_deref() {
            Some(&[lo, hi]) => char::from_u32(u16::from_le_bytes([lo, hi]).into())
                .unwrap_or(char::REPLACEMENT_CHARACTER),
            _ => '\0',
        };

        Ok(c)
    }

    /// Decode a null-terminated UTF-16LE string.
    ///
    /// See [`crate::decode::cursor::next_string`].
    pub fn next_string(&mut self, include_nul: bool) -> Result<String, Error> {
        self.next_string_with(TextEncoding::Utf16Le, include_nul)
    }

    /// Decode a string terminated by a null code unit of `encoding`.
    ///
    /// See [`crate::decode::cursor::next_string_with`].
    pub fn next_string_with(
        &mut self,
        encoding: TextEncoding,
        include_nul: bool,
    ) -> Result<String, Error> {
        let width = encoding.unit_width()?;

        let mut payload = Vec::new();
        let mut terminated = false;

        while let Some(unit) = self.take(width)? {
            if unit.iter().all(|b| *b == 0) {
                terminated = true;
                break;
            }

            payload.extend_from_slice(&unit);
        }

        let mut text = encoding.decode(&payload)?;

        if terminated && include_nul {
            text.push('\0');
        }

        Ok(text)
    }

    /// Decode a string preceded by its length in bytes.
    ///
    /// If the announced payload runs past the end of the source, the prefix
    /// is consumed, the payload is not, and an empty string is returned.
    pub fn next_string_by_length(
        &mut self,
        prefix: Prefix,
        encoding: TextEncoding,
    ) -> Result<String, Error> {
        encoding.unit_width()?;

        let length = match prefix {
            Prefix::One => usize::from(self.next::<u8>()?),
            Prefix::Two => usize::from(self.next::<u16>()?),
        };

        match self.take(length)? {
            Some(payload) => Ok(encoding.decode(&payload)?),
            None => Ok(String::new()),
        }
    }

    /// Read exactly `n` bytes if the source holds that many more.
    fn take(&mut self, n: usize) -> Result<Option<Vec<u8>>, Error> {
        let end = self.position.saturating_add(n as u64);

        if end > self.size {
            trace!(
                position = self.position,
                width = n,
                size = self.size,
                "short read"
            );
            return Ok(None);
        }

        let mut buf = vec![0; n];

        if let Err(err) = self.source.read_exact(&mut buf) {
            // The source may have moved by part of `n`.
            self.source.seek(SeekFrom::Start(self.position))?;
            return Err(err.into());
        }

        self.position = end;

        Ok(Some(buf))
    }
}
