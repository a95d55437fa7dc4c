//! Fixed-width scalars and their encoded forms.

use core::net::Ipv4Addr;

use zerocopy::{
    FromBytes,
    byteorder::{BigEndian, I16, I32, I64, LittleEndian, U16, U32, U64},
};

use crate::order::ByteOrder;

/// A value with a fixed-width byte representation.
///
/// Decoders fall back to [`Scalar::DEFAULT`] when fewer than
/// [`Scalar::WIDTH`] bytes remain, so every implementation must name one.
pub trait Scalar: Sized {
    /// The encoded form of this scalar.
    type Bytes: AsRef<[u8]>;

    /// Number of bytes occupied by the encoded form.
    const WIDTH: usize = size_of::<Self::Bytes>();

    /// Value produced for a read past the end of the data.
    const DEFAULT: Self;

    /// Convert encoded bytes to a value.
    ///
    /// Returns `None` if `r` is not exactly [`Scalar::WIDTH`] bytes long.
    fn from_slice(r: &[u8], order: ByteOrder) -> Option<Self>;

    /// Convert a value to its encoded bytes.
    fn to_bytes(&self, order: ByteOrder) -> Self::Bytes;
}

impl Scalar for bool {
    type Bytes = [u8; 1];
    const DEFAULT: Self = false;

    /// Only `0x01` is true. Any other pattern, valid or not, is false.
    fn from_slice(r: &[u8], _: ByteOrder) -> Option<Self> {
        match r {
            [b] => Some(*b == 1),
            _ => None,
        }
    }

    fn to_bytes(&self, _: ByteOrder) -> Self::Bytes {
        [u8::from(*self)]
    }
}

impl Scalar for u8 {
    type Bytes = [u8; 1];
    const DEFAULT: Self = 0;

    fn from_slice(r: &[u8], _: ByteOrder) -> Option<Self> {
        match r {
            [b] => Some(*b),
            _ => None,
        }
    }

    fn to_bytes(&self, _: ByteOrder) -> Self::Bytes {
        [*self]
    }
}

impl Scalar for i8 {
    type Bytes = [u8; 1];
    const DEFAULT: Self = 0;

    fn from_slice(r: &[u8], _: ByteOrder) -> Option<Self> {
        match r {
            [b] => Some(i8::from_ne_bytes([*b])),
            _ => None,
        }
    }

    fn to_bytes(&self, _: ByteOrder) -> Self::Bytes {
        self.to_ne_bytes()
    }
}

/// Four octets in network order, whatever the integer byte order.
impl Scalar for Ipv4Addr {
    type Bytes = [u8; 4];
    const DEFAULT: Self = Ipv4Addr::UNSPECIFIED;

    fn from_slice(r: &[u8], _: ByteOrder) -> Option<Self> {
        <[u8; 4]>::read_from_bytes(r).ok().map(Ipv4Addr::from)
    }

    fn to_bytes(&self, _: ByteOrder) -> Self::Bytes {
        self.octets()
    }
}

macro_rules! integer {
    ($t:ty, $wire:ident, $(#[$attr:meta])*) => {
        $(#[$attr])*
        impl Scalar for $t {
            type Bytes = [u8; size_of::<$t>()];
            const DEFAULT: Self = 0;

            fn from_slice(r: &[u8], order: ByteOrder) -> Option<Self> {
                if order.is_big_endian() {
                    $wire::<BigEndian>::read_from_bytes(r).ok().map(|x| x.get())
                } else {
                    $wire::<LittleEndian>::read_from_bytes(r).ok().map(|x| x.get())
                }
            }

            fn to_bytes(&self, order: ByteOrder) -> Self::Bytes {
                if order.is_big_endian() {
                    $wire::<BigEndian>::new(*self).to_bytes()
                } else {
                    $wire::<LittleEndian>::new(*self).to_bytes()
                }
            }
        }
    };
}

integer!(u16, U16, /** Two bytes in the selected order. */);
integer!(i16, I16, /** Two bytes in the selected order. */);
integer!(u32, U32, /** Four bytes in the selected order. */);
integer!(i32, I32, /** Four bytes in the selected order. */);
integer!(u64, U64, /** Eight bytes in the selected order. */);
integer!(i64, I64, /** Eight bytes in the selected order. */);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths() {
        assert_eq!(bool::WIDTH, 1);
        assert_eq!(i8::WIDTH, 1);
        assert_eq!(u16::WIDTH, 2);
        assert_eq!(i32::WIDTH, 4);
        assert_eq!(u64::WIDTH, 8);
        assert_eq!(Ipv4Addr::WIDTH, 4);
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert_eq!(u32::from_slice(&[1, 2, 3], ByteOrder::BigEndian), None);
        assert_eq!(bool::from_slice(&[], ByteOrder::BigEndian), None);
        assert_eq!(Ipv4Addr::from_slice(&[1, 2, 3, 4, 5], ByteOrder::BigEndian), None);
    }

    #[test]
    fn bool_accepts_only_one() {
        assert_eq!(bool::from_slice(&[1], ByteOrder::Native), Some(true));
        assert_eq!(bool::from_slice(&[0], ByteOrder::Native), Some(false));
        assert_eq!(bool::from_slice(&[2], ByteOrder::Native), Some(false));
        assert_eq!(bool::from_slice(&[0xFF], ByteOrder::Native), Some(false));
    }
}
