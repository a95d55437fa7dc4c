#![no_std]

//! Byte-order explicit encoding and tolerant decoding of primitive scalars.
//!
//! Bytewise converts booleans, integers, UTF-16 code units, IPv4 addresses
//! and framed strings to and from raw bytes. Encoding is strict: arguments
//! that cannot be represented are refused. Decoding is forgiving: reading
//! past the end of the data yields default values instead of errors, which
//! suits picking records out of truncated legacy files.
//!
//! Most users should begin with [`encode`] and the [`decode::cursor`]
//! module, or compose both through the [`Record`] trait and its derive
//! macro. Files too large to hold in memory can be read with
//! [`decode::StreamDecoder`].
//!
//! ```
//! let order = ByteOrder::BigEndian;
//!
//! let mut bytes = encode::to_bytes(&0x1234u16, order).to_vec();
//! bytes.extend(encode::string_by_length("hi", Prefix::One, TextEncoding::Utf8, order)?);
//!
//! let i = &mut 0;
//! assert_eq!(decode::cursor::next::<u16>(&bytes, i, order), 0x1234);
//! assert_eq!(
//!     decode::cursor::next_string_by_length(&bytes, i, Prefix::One, TextEncoding::Utf8, order)?,
//!     "hi"
//! );
//! ```
//!
//! Integers carry no byte order marker, and data in circulation uses both
//! big-endian and host-native layouts. [`ByteOrder`] must therefore be chosen
//! by the caller everywhere an integer is read or written.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `derive`: enable the [`Record`](macro@Record) derive macro (default).
//! - `std`: enable the stream decoder and file helpers (default).

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod collections;
pub mod decode;
pub mod encode;
mod error;
#[cfg(feature = "std")]
pub mod fs;
mod order;
mod record;
mod scalar;
pub mod strings;
mod text;

pub use encode::Encoder;
pub use error::Error;
pub use order::ByteOrder;
pub use record::Record;
pub use scalar::Scalar;
pub use text::{Prefix, TextEncoding};
