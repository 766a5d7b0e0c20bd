//! Decoding and encoding of Base 16, i.e., hex digits.
//!
//! Zone files use hex for DS digests, NSEC3 salts, and generic record
//! data. Digits are accepted in either case and written in upper case.

use core::fmt;
use std::vec::Vec;

pub use super::DecodeError;

/// Decodes a string of hex digits.
pub fn decode(s: &str) -> Result<Vec<u8>, DecodeError> {
    let mut res = Vec::with_capacity(s.len() / 2);
    let mut high = None;
    for ch in s.chars() {
        let digit = ch.to_digit(16).ok_or(DecodeError::IllegalChar(ch))?;
        match high.take() {
            Some(high) => res.push((high << 4 | digit) as u8),
            None => high = Some(digit),
        }
    }
    match high {
        Some(_) => Err(DecodeError::ShortInput),
        None => Ok(res),
    }
}

/// Writes binary data as upper case hex digits into a format stream.
pub fn display<Octets, Target>(octets: &Octets, f: &mut Target) -> fmt::Result
where
    Octets: AsRef<[u8]> + ?Sized,
    Target: fmt::Write,
{
    octets
        .as_ref()
        .iter()
        .try_for_each(|octet| write!(f, "{:02X}", octet))
}

/// Returns a value that displays the given data as hex digits.
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

//------------ serde ---------------------------------------------------------

/// Binary data as a hex string.
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
            "hex encoded binary data",
            super::decode,
        )
    }
}

//============ Testing =======================================================
