//! Text encodings and string framing.

use alloc::{string::String, vec::Vec};
use core::char::REPLACEMENT_CHARACTER;

use either::Either::{Left, Right};

use crate::error::Error;

/// A text encoding for string payloads.
///
/// Framed strings count and terminate their payload in code units, so only
/// encodings with a fixed code unit width are usable. [`TextEncoding::Utf32`]
/// and [`TextEncoding::Utf7`] exist so that requests for them can be named
/// and refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextEncoding {
    /// UTF-16 with little-endian code units.
    Utf16Le,
    /// UTF-16 with big-endian code units.
    Utf16Be,
    /// UTF-8.
    Utf8,
    /// 7-bit ASCII. Other characters are replaced with `?`.
    Ascii,
    /// ISO 8859-1. Characters above U+00FF are replaced with `?`.
    Latin1,
    /// UTF-32 (unsupported).
    Utf32,
    /// UTF-7 (unsupported).
    Utf7,
}

impl TextEncoding {
    /// Width in bytes of a single code unit.
    ///
    /// UTF-32 and UTF-7 are refused: framed payloads are counted and walked
    /// in units of this width.
    pub const fn unit_width(self) -> Result<usize, Error> {
        match self {
            Self::Utf16Le | Self::Utf16Be => Ok(2),
            Self::Utf8 | Self::Ascii | Self::Latin1 => Ok(1),
            Self::Utf32 | Self::Utf7 => Err(Error::UnsupportedEncoding(self)),
        }
    }

    /// Width in bytes of the null terminator ending a string.
    ///
    /// Defined for every encoding, including those without a fixed code unit
    /// width.
    pub const fn terminator_width(self) -> usize {
        match self {
            Self::Utf16Le | Self::Utf16Be => 2,
            Self::Utf8 | Self::Ascii | Self::Latin1 | Self::Utf7 => 1,
            Self::Utf32 => 4,
        }
    }

    /// Number of bytes `text` occupies once encoded.
    pub fn encoded_len(self, text: &str) -> Result<usize, Error> {
        let length = match self {
            Self::Utf16Le | Self::Utf16Be => text.encode_utf16().count() * 2,
            Self::Utf8 => text.len(),
            Self::Ascii | Self::Latin1 => text.chars().count(),
            Self::Utf32 | Self::Utf7 => Err(Error::UnsupportedEncoding(self))?,
        };

        Ok(length)
    }

    /// Encode text to bytes in any encoding.
    ///
    /// Unlike [`TextEncoding::encode`], UTF-32 (little-endian) and UTF-7 are
    /// accepted. Their output is not self-delimiting in code units, so it is
    /// only suitable for null-terminated framing.
    pub fn encode_any(self, text: &str) -> Vec<u8> {
        match self {
            Self::Utf32 => text.chars().flat_map(|c| u32::from(c).to_le_bytes()).collect(),
            Self::Utf7 => encode_utf7(text),
            _ => self.encode(text).into_iter().flatten().collect(),
        }
    }

    /// Encode text to bytes.
    pub fn encode<'a>(self, text: &'a str) -> Result<impl Iterator<Item = u8> + 'a, Error> {
        let bytes = match self {
            Self::Utf16Le | Self::Utf16Be => {
                let is_be = self == Self::Utf16Be;

                Left(text.encode_utf16().flat_map(move |u| {
                    if is_be { u.to_be_bytes() } else { u.to_le_bytes() }
                }))
            }
            Self::Utf8 => Right(Left(text.bytes())),
            Self::Ascii | Self::Latin1 => {
                let limit = if self == Self::Ascii { 0x7F } else { 0xFF };

                Right(Right(text.chars().map(move |c| {
                    u8::try_from(c).ok().filter(|b| *b <= limit).unwrap_or(b'?')
                })))
            }
            Self::Utf32 | Self::Utf7 => Err(Error::UnsupportedEncoding(self))?,
        };

        Ok(bytes)
    }

    /// Decode bytes to text, replacing malformed sequences.
    pub fn decode(self, r: &[u8]) -> Result<String, Error> {
        let text = match self {
            Self::Utf16Le => decode_utf16(r, u16::from_le_bytes),
            Self::Utf16Be => decode_utf16(r, u16::from_be_bytes),
            Self::Utf8 => String::from_utf8_lossy(r).into_owned(),
            Self::Ascii => r
                .iter()
                .map(|&b| if b.is_ascii() { char::from(b) } else { '?' })
                .collect(),
            Self::Latin1 => r.iter().copied().map(char::from).collect(),
            Self::Utf32 | Self::Utf7 => Err(Error::UnsupportedEncoding(self))?,
        };

        Ok(text)
    }
}

fn decode_utf16(r: &[u8], unit: fn([u8; 2]) -> u16) -> String {
    let units = r.chunks_exact(2).map(|c| unit([c[0], c[1]]));

    let mut text: String = char::decode_utf16(units)
        .map(|c| c.unwrap_or(REPLACEMENT_CHARACTER))
        .collect();

    // A dangling half code unit.
    if r.len() % 2 != 0 {
        text.push(REPLACEMENT_CHARACTER);
    }

    text
}

/// Encode as UTF-7 (RFC 2152) without optional direct characters.
///
/// Shifted runs are always closed with `-`.
fn encode_utf7(text: &str) -> Vec<u8> {
    const BASE64: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

    let mut r = Vec::with_capacity(text.len());
    let mut bits = 0u32;
    let mut count = 0u32;
    let mut shifted = false;

    let close = |r: &mut Vec<u8>, bits: u32, count: u32| {
        if count > 0 {
            r.push(BASE64[((bits << (6 - count)) & 0x3F) as usize]);
        }
        r.push(b'-');
    };

    for c in text.chars() {
        let is_direct = c.is_ascii_alphanumeric() || "'(),-./:? \t\r\n".contains(c);

        if is_direct || c == '+' {
            if shifted {
                close(&mut r, bits, count);
                (bits, count, shifted) = (0, 0, false);
            }

            match c {
                '+' => r.extend_from_slice(b"+-"),
                // Direct characters are all ASCII.
                _ => r.push(c as u8),
            }

            continue;
        }

        if !shifted {
            r.push(b'+');
            shifted = true;
        }

        let mut units = [0; 2];

        for unit in c.encode_utf16(&mut units) {
            bits = (bits << 16) | u32::from(*unit);
            count += 16;

            while count >= 6 {
                count -= 6;
                r.push(BASE64[((bits >> count) & 0x3F) as usize]);
            }

            bits &= (1 << count) - 1;
        }
    }

    if shifted {
        close(&mut r, bits, count);
    }

    r
}

/// Width of the length prefix framing a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prefix {
    /// A single byte, describing at most 255 bytes.
    One,
    /// Two bytes in the integer byte order, describing at most 65535 bytes.
    Two,
}

impl Prefix {
    /// Width of the prefix in bytes.
    pub const fn width(self) -> usize {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }

    /// Largest value the prefix can hold.
    pub const fn max(self) -> usize {
        match self {
            Self::One => u8::MAX as usize,
            Self::Two => u16::MAX as usize,
        }
    }
}

impl TryFrom<u8> for Prefix {
    type Error = Error;

    fn try_from(width: u8) -> Result<Self, Error> {
        match width {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            _ => Err(Error::PrefixWidth(width)),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn utf16_orders() {
        let le: Vec<u8> = TextEncoding::Utf16Le.encode("Az").unwrap().collect();
        let be: Vec<u8> = TextEncoding::Utf16Be.encode("Az").unwrap().collect();

        assert_eq!(le, [0x41, 0x00, 0x7A, 0x00]);
        assert_eq!(be, [0x00, 0x41, 0x00, 0x7A]);
    }

    #[test]
    fn narrow_encodings_replace_unmappable() {
        let ascii: Vec<u8> = TextEncoding::Ascii.encode("café").unwrap().collect();
        let latin1: Vec<u8> = TextEncoding::Latin1.encode("café€").unwrap().collect();

        assert_eq!(ascii, b"caf?");
        assert_eq!(latin1, [b'c', b'a', b'f', 0xE9, b'?']);
        assert_eq!(TextEncoding::Ascii.decode(&[b'h', 0xC0]).unwrap(), "h?");
        assert_eq!(TextEncoding::Latin1.decode(&[0xE9]).unwrap(), "é");
    }

    #[test]
    fn odd_utf16_payload() {
        assert_eq!(
            TextEncoding::Utf16Le.decode(&[0x41, 0x00, 0x42]).unwrap(),
            "A\u{FFFD}"
        );
    }

    #[test]
    fn unsupported_encodings() {
        for encoding in [TextEncoding::Utf32, TextEncoding::Utf7] {
            assert_eq!(
                encoding.unit_width(),
                Err(Error::UnsupportedEncoding(encoding))
            );
            assert!(encoding.encode("x").is_err());
            assert!(encoding.decode(b"x").is_err());
        }
    }

    #[test]
    fn encoded_lengths() {
        assert_eq!(TextEncoding::Utf8.encoded_len("hé"), Ok(3));
        assert_eq!(TextEncoding::Latin1.encoded_len("hé"), Ok(2));
        assert_eq!(TextEncoding::Utf16Be.encoded_len("a😀"), Ok(6));
        assert!(TextEncoding::Utf32.encoded_len("a").is_err());
    }

    #[test]
    fn utf32_and_utf7_encode_for_termination() {
        assert_eq!(TextEncoding::Utf32.encode_any("a€"), [0x61, 0, 0, 0, 0xAC, 0x20, 0, 0]);
        assert_eq!(TextEncoding::Utf32.terminator_width(), 4);
        assert_eq!(TextEncoding::Utf7.terminator_width(), 1);
    }

    #[test]
    fn utf7_shifts_non_direct_characters() {
        assert_eq!(TextEncoding::Utf7.encode_any("A≢Α."), b"A+ImIDkQ-.");
        assert_eq!(TextEncoding::Utf7.encode_any("Hi Mom -☺-"), b"Hi Mom -+Jjo--");
        assert_eq!(TextEncoding::Utf7.encode_any("1+1"), b"1+-1");
        assert_eq!(TextEncoding::Utf7.encode_any("!"), b"+ACE-");
    }

    #[test]
    fn prefix_widths() {
        assert_eq!(Prefix::try_from(1), Ok(Prefix::One));
        assert_eq!(Prefix::try_from(2), Ok(Prefix::Two));
        assert_eq!(Prefix::try_from(4), Err(Error::PrefixWidth(4)));
        assert_eq!(Prefix::try_from(0), Err(Error::PrefixWidth(0)));
    }
}
