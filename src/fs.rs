//! Whole-file read and write helpers.
//!
//! _Requires Cargo feature `std`._

use std::{
    fs,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::Path,
    string::String,
    vec::Vec,
};

use thiserror::Error;

/// Errors occurring while reading or writing files.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the file system.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Read a file into memory.
///
/// Returns `None` if the file does not exist.
pub fn read_binary(path: impl AsRef<Path>) -> Result<Option<Vec<u8>>, Error> {
    not_found_as_none(fs::read(path))
}

/// Read a text file as lines, without line terminators.
///
/// Returns `None` if the file does not exist.
pub fn read_text_lines(path: impl AsRef<Path>) -> Result<Option<Vec<String>>, Error> {
    let Some(file) = not_found_as_none(fs::File::open(path))? else {
        return Ok(None);
    };

    let lines = BufReader::new(file).lines().collect::<io::Result<_>>()?;

    Ok(Some(lines))
}

/// Create or truncate a file and write `contents` to it.
pub fn write_binary(path: impl AsRef<Path>, contents: &[u8]) -> Result<(), Error> {
    Ok(fs::write(path, contents)?)
}

/// Create or truncate a file and write each line followed by a newline.
pub fn write_text_lines<I>(path: impl AsRef<Path>, lines: I) -> Result<(), Error>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut w = BufWriter::new(fs::File::create(path)?);

    for line in lines {
        writeln!(w, "{}", line.as_ref())?;
    }

    w.flush()?;
    Ok(())
}

fn not_found_as_none<T>(result: io::Result<T>) -> Result<Option<T>, Error> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}
