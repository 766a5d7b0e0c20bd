//! Various utility modules.
//!
//! The submodules deal with the text encodings of binary data used in the
//! presentation format of record data.

use core::fmt;
use std::vec::Vec;

pub mod base16;
pub mod base32;
pub mod base64;

//------------ Bits ----------------------------------------------------------

/// Collects the values of encoding characters into octets.
///
/// Base 32 and Base 64 characters each carry a fixed number of bits. They
/// are shifted in at the bottom and whole octets are taken off the top as
/// soon as they are complete.
#[derive(Clone, Debug, Default)]
struct Bits {
    /// The bits not yet turned into an octet.
    pending: u16,

    /// The number of valid bits in `pending`.
    len: u8,

    /// The number of characters pushed so far.
    chars: usize,

    /// The complete octets.
    octets: Vec<u8>,
}

impl Bits {
    fn push(&mut self, value: u8, width: u8) {
        self.pending = (self.pending << width) | u16::from(value);
        self.len += width;
        self.chars += 1;
        if self.len >= 8 {
            self.len -= 8;
            self.octets.push((self.pending >> self.len) as u8);
            self.pending &= (1 << self.len) - 1;
        }
    }
}

/// Writes the characters for `octets` read as groups of `width` bits.
///
/// A trailing partial group is filled with zero bits.
fn write_groups<W: fmt::Write>(
    octets: &[u8],
    width: u8,
    alphabet: &[u8],
    f: &mut W,
) -> fmt::Result {
    let mask = (1u16 << width) - 1;
    let mut pending = 0u16;
    let mut len = 0u8;
    for &octet in octets {
        pending = (pending << 8) | u16::from(octet);
        len += 8;
        while len >= width {
            len -= width;
            let index = usize::from((pending >> len) & mask);
            f.write_char(alphabet[index].into())?;
        }
        pending &= (1 << len) - 1;
    }
    if len > 0 {
        let index = (pending << (width - len)) & mask;
        f.write_char(alphabet[usize::from(index)].into())?;
    }
    Ok(())
}

//------------ DecodeError ---------------------------------------------------

/// Encoded binary data could not be decoded.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DecodeError {
    /// A character was pushed that isn’t allowed in the encoding.
    IllegalChar(char),

    /// There was trailing data after a padding sequence.
    TrailingInput,

    /// The input ended with an incomplete sequence.
    ShortInput,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            DecodeError::IllegalChar(ch) => {
                write!(f, "illegal character '{}'", ch)
            }
            DecodeError::TrailingInput => f.write_str("trailing input"),
            DecodeError::ShortInput => f.write_str("incomplete input"),
        }
    }
}

impl std::error::Error for DecodeError {}

//------------ Serde Support -------------------------------------------------

/// Binary fields as encoded strings in human readable formats.
///
/// All other formats get the raw octets. The `serde` submodules of the
/// encodings plug their functions in here.
#[cfg(feature = "serde")]
mod text {
    use super::DecodeError;
    use core::fmt;
    use std::vec::Vec;

    pub fn serialize<S: serde::Serializer>(
        octets: &[u8],
        text: impl fmt::Display,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.collect_str(&text)
        } else {
            serializer.serialize_bytes(octets)
        }
    }

    pub fn deserialize<'de, D: serde::Deserializer<'de>>(
        deserializer: D,
        expecting: &'static str,
        decode: fn(&str) -> Result<Vec<u8>, DecodeError>,
    ) -> Result<Vec<u8>, D::Error> {
        struct Visitor {
            expecting: &'static str,
            decode: fn(&str) -> Result<Vec<u8>, DecodeError>,
        }

        impl<'de> serde::de::Visitor<'de> for Visitor {
            type Value = Vec<u8>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str(self.expecting)
            }

            fn visit_str<E: serde::de::Error>(
                self,
                v: &str,
            ) -> Result<Self::Value, E> {
                (self.decode)(v).map_err(E::custom)
            }

            fn visit_bytes<E: serde::de::Error>(
                self,
                v: &[u8],
            ) -> Result<Self::Value, E> {
                Ok(v.to_vec())
            }

            fn visit_byte_buf<E: serde::de::Error>(
                self,
                v: Vec<u8>,
            ) -> Result<Self::Value, E> {
                Ok(v)
            }
        }

        let visitor = Visitor { expecting, decode };
        if deserializer.is_human_readable() {
            deserializer.deserialize_str(visitor)
        } else {
            deserializer.deserialize_byte_buf(visitor)
        }
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use std::string::String;

    #[test]
    fn bits_into_octets() {
        let mut bits = Bits::default();
        for value in [0b110011, 0b001100, 0b111100, 0b000011] {
            bits.push(value, 6);
        }
        assert_eq!(bits.octets, [0b1100_1100, 0b1100_1111, 0b0000_0011]);
        assert_eq!((bits.len, bits.chars), (0, 4));

        let mut bits = Bits::default();
        bits.push(0b11111, 5);
        bits.push(0b10000, 5);
        assert_eq!(bits.octets, [0xFC]);
        assert_eq!(bits.len, 2);
    }

    #[test]
    fn groups_from_octets() {
        let mut s = String::new();
        let alphabet = b"0123456789ABCDEFGHIJKLMNOPQRSTUV";
        write_groups(b"\xFF\x00", 5, alphabet, &mut s).unwrap();
        assert_eq!(s, "VS00");
    }
}
