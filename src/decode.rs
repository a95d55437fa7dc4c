//! Tolerant conversion of bytes to scalars and strings.
//!
//! Decoding comes in two flavours sharing one wire format: [`cursor`] reads
//! from an in-memory slice at a caller-held offset, and [`stream`] reads from
//! a sequential source such as an open file.
//!
//! # Short reads
//!
//! Running out of data is not an error. A read that needs more bytes than
//! remain produces the type's default value (`false`, `0`, `'\0'`,
//! [`Ipv4Addr::UNSPECIFIED`](core::net::Ipv4Addr::UNSPECIFIED), or an empty
//! string), so a record decoded from truncated data comes back with zeroed
//! fields rather than aborting midway.
//!
//! The flavours differ in what a short read consumes:
//!
//! - A cursor always advances by the nominal width of a fixed-width scalar,
//!   so loops stepping through a buffer terminate predictably.
//! - A stream never moves on a short read.
//!
//! Only invalid arguments, such as an unsupported [`TextEncoding`], are
//! reported as errors, along with I/O failures of a stream's source.
//!
//! [`TextEncoding`]: crate::TextEncoding

pub mod cursor;
#[cfg(feature = "std")]
pub mod stream;

pub use cursor::Cursor;
#[cfg(feature = "std")]
pub use stream::StreamDecoder;
