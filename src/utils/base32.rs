//! Decoding and encoding of *base32hex*.
//!
//! [RFC 4648] defines two Base 32 alphabets. NSEC3 records use the
//! ‘extended hex’ one for hashed owner names since it keeps the sort order
//! of the data, and they use it without padding. That is the only variant
//! provided here.
//!
//! [RFC 4648]: https://tools.ietf.org/html/rfc4648

use super::Bits;
use core::fmt;
use std::vec::Vec;

pub use super::DecodeError;

const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHIJKLMNOPQRSTUV";

/// Decodes unpadded *base32hex*. Letters may be in either case.
pub fn decode_hex(s: &str) -> Result<Vec<u8>, DecodeError> {
    let mut bits = Bits::default();
    for ch in s.chars() {
        let value = match ch.to_digit(32) {
            Some(value) => value as u8,
            None => return Err(DecodeError::IllegalChar(ch)),
        };
        bits.push(value, 5);
    }

    // One, three, or six characters of a group of eight can’t carry a
    // whole number of octets.
    match bits.chars % 8 {
        1 | 3 | 6 => Err(DecodeError::ShortInput),
        _ => Ok(bits.octets),
    }
}

/// Writes binary data in unpadded *base32hex* into a format stream.
pub fn display_hex<B, W>(bytes: &B, f: &mut W) -> fmt::Result
where
    B: AsRef<[u8]> + ?Sized,
    W: fmt::Write,
{
    super::write_groups(bytes.as_ref(), 5, ALPHABET, f)
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rfc4648_vectors() {
        let vectors: [(&[u8], &str); 7] = [
            (b"", ""),
            (b"f", "CO"),
            (b"fo", "CPNG"),
            (b"foo", "CPNMU"),
            (b"foob", "CPNMUOG"),
            (b"fooba", "CPNMUOJ1"),
            (b"foobar", "CPNMUOJ1E8"),
        ];
        for (data, text) in vectors {
            let mut encoded = String::new();
            display_hex(data, &mut encoded).unwrap();
            assert_eq!(encoded, text);
            assert_eq!(decode_hex(text).unwrap(), data);
            assert_eq!(decode_hex(&text.to_lowercase()).unwrap(), data);
        }
    }

    #[test]
    fn malformed() {
        assert_eq!(decode_hex("C"), Err(DecodeError::ShortInput));
        assert_eq!(decode_hex("CPN"), Err(DecodeError::ShortInput));
        assert_eq!(decode_hex("CW"), Err(DecodeError::IllegalChar('W')));
        assert_eq!(decode_hex("CO=="), Err(DecodeError::IllegalChar('=')));
    }
}
