//! Decoding and encoding of Base 64.
//!
//! The Base 64 encoding is defined in [RFC 4648]. Zone files use the
//! original *base64* alphabet, not the URL safe one, for DNSKEY public keys
//! and RRSIG signatures.
//!
//! Base 64 data in a zone file may be broken up by white space, so the
//! [`Decoder`] keeps its state between runs of characters.
//!
//! [RFC 4648]: https://tools.ietf.org/html/rfc4648

use super::Bits;
use core::fmt;
use std::vec::Vec;

pub use super::DecodeError;

const ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

const PAD: char = '=';

/// Decodes a string with *base64* encoded data.
pub fn decode(s: &str) -> Result<Vec<u8>, DecodeError> {
    let mut decoder = Decoder::new();
    s.chars().try_for_each(|ch| decoder.push(ch))?;
    decoder.finalize()
}

/// Writes binary data in *base64* into a format stream.
///
/// The output is padded to a multiple of four characters.
pub fn display<B, W>(bytes: &B, f: &mut W) -> fmt::Result
where
    B: AsRef<[u8]> + ?Sized,
    W: fmt::Write,
{
    let bytes = bytes.as_ref();
    super::write_groups(bytes, 6, ALPHABET, f)?;
    for _ in 0..(3 - bytes.len() % 3) % 3 {
        f.write_char(PAD)?;
    }
    Ok(())
}

/// Returns a value that displays the given data in *base64*.
pub fn encode_display<Octets: AsRef<[u8]> + ?Sized>(
    octets: &Octets,
) -> impl fmt::Display + '_ {
    struct Display<'a>(&'a [u8]);

    impl<'a> fmt::Display for Display<'a> {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            display(self.0, f)
        }
    }

    Display(octets.as_ref())
}

fn value(ch: char) -> Option<u8> {
    let value = match ch {
        'A'..='Z' => ch as u32 - 'A' as u32,
        'a'..='z' => ch as u32 - 'a' as u32 + 26,
        '0'..='9' => ch as u32 - '0' as u32 + 52,
        '+' => 62,
        '/' => 63,
        _ => return None,
    };
    Some(value as u8)
}

//------------ Decoder -------------------------------------------------------

/// A *base64* decoder fed one character at a time.
///
/// Once a character was rejected, the decoder keeps failing with the same
/// error.
#[derive(Clone, Debug, Default)]
pub struct Decoder {
    bits: Bits,

    /// The number of padding characters seen.
    padding: usize,

    error: Option<DecodeError>,
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes one more character.
    pub fn push(&mut self, ch: char) -> Result<(), DecodeError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        let res = if ch == PAD {
            // Padding can only take the place of the last one or two
            // characters of a group.
            if (self.bits.chars + self.padding) % 4 < 2 {
                Err(DecodeError::IllegalChar(ch))
            } else {
                self.padding += 1;
                Ok(())
            }
        } else if self.padding > 0 {
            Err(DecodeError::TrailingInput)
        } else {
            value(ch)
                .map(|value| self.bits.push(value, 6))
                .ok_or(DecodeError::IllegalChar(ch))
        };
        if let Err(err) = res {
            self.error = Some(err);
        }
        res
    }

    /// Finishes decoding and returns the data.
    ///
    /// Fails if the last group of four characters is incomplete.
    pub fn finalize(self) -> Result<Vec<u8>, DecodeError> {
        if let Some(err) = self.error {
            Err(err)
        } else if (self.bits.chars + self.padding) % 4 != 0 {
            Err(DecodeError::ShortInput)
        } else {
            Ok(self.bits.octets)
        }
    }
}

//------------ serde ---------------------------------------------------------

/// Binary data as a *base64* string.
///
/// Use with `#[serde(with = "...")]` on `Vec<u8>` fields. Formats that
/// aren’t human readable get the raw octets.
#[cfg(feature = "serde")]
pub mod serde {
    use std::vec::Vec;

    pub fn serialize<Octets, S>(
        octets: &Octets,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        Octets: AsRef<[u8]> + ?Sized,
        S: serde::Serializer,
    {
        let octets = octets.as_ref();
        super::super::text::serialize(
            octets,
            super::encode_display(octets),
            serializer,
        )
    }

    pub fn deserialize<'de, D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<u8>, D::Error> {
        super::super::text::deserialize(
            deserializer,
            "base64 encoded binary data",
            super::decode,
        )
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    fn encode(data: &[u8]) -> String {
        encode_display(data).to_string()
    }

    #[test]
    fn rfc4648_vectors() {
        let vectors: [(&[u8], &str); 7] = [
            (b"", ""),
            (b"f", "Zg=="),
            (b"fo", "Zm8="),
            (b"foo", "Zm9v"),
            (b"foob", "Zm9vYg=="),
            (b"fooba", "Zm9vYmE="),
            (b"foobar", "Zm9vYmFy"),
        ];
        for (data, text) in vectors {
            assert_eq!(encode(data), text);
            assert_eq!(decode(text).unwrap(), data);
        }
        assert_eq!(encode(b"\xfb\xff"), "+/8=");
    }

    #[test]
    fn malformed() {
        assert_eq!(decode("FPucA"), Err(DecodeError::ShortInput));
        assert_eq!(decode("FPucA="), Err(DecodeError::IllegalChar('=')));
        assert_eq!(decode("FPucAw="), Err(DecodeError::ShortInput));
        assert_eq!(decode("FPucAw=a"), Err(DecodeError::TrailingInput));
        assert_eq!(decode("FPucAw==a"), Err(DecodeError::TrailingInput));
        assert_eq!(decode("Zm9v-"), Err(DecodeError::IllegalChar('-')));
    }

    #[test]
    fn push_in_runs() {
        let mut decoder = Decoder::new();
        for ch in "Zm9v".chars().chain("YmFy".chars()) {
            decoder.push(ch).unwrap();
        }
        assert_eq!(decoder.finalize().unwrap(), b"foobar");

        // Errors stick.
        let mut decoder = Decoder::new();
        assert!(decoder.push('!').is_err());
        assert_eq!(decoder.push('Z'), Err(DecodeError::IllegalChar('!')));
        assert_eq!(decoder.finalize(), Err(DecodeError::IllegalChar('!')));
    }
}
