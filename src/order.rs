//! Byte order selection for multi-byte integers.

/// The byte order used for integers and length prefixes.
///
/// Two incompatible conventions exist for data produced by this library's
/// predecessors: big-endian, and whatever the producing host used natively.
/// Neither is assumed. Every encoder and decoder takes an explicit order, and
/// callers reading legacy data must know which convention produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    /// Most significant byte first (network order).
    BigEndian,
    /// Least significant byte first.
    LittleEndian,
    /// The order of the compiling target.
    Native,
}

impl ByteOrder {
    /// Resolve [`ByteOrder::Native`] to the concrete order of the target.
    pub const fn resolve(self) -> Self {
        match self {
            Self::Native if cfg!(target_endian = "big") => Self::BigEndian,
            Self::Native => Self::LittleEndian,
            order => order,
        }
    }

    /// Whether integers are written most significant byte first.
    pub const fn is_big_endian(self) -> bool {
        matches!(self.resolve(), Self::BigEndian)
    }
}

#[cfg(test)]
mod tests {
    use super::ByteOrder;

    #[test]
    fn native_resolves_to_target() {
        let expected = if cfg!(target_endian = "big") {
            ByteOrder::BigEndian
        } else {
            ByteOrder::LittleEndian
        };

        assert_eq!(ByteOrder::Native.resolve(), expected);
        assert_eq!(ByteOrder::BigEndian.resolve(), ByteOrder::BigEndian);
        assert_eq!(ByteOrder::LittleEndian.resolve(), ByteOrder::LittleEndian);
    }
}
