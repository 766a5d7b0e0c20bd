//! Character strings.
//!
//! The somewhat ill-named `<character-string>` is defined in [RFC 1035] as
//! binary information of up to 255 octets. As such, it doesn’t necessarily
//! contain (ASCII-) characters nor is it a string in a Rust-sense.
//!
//! On the wire, a character string is preceded by a single octet giving its
//! length. In presentation format it is usually enclosed in double quotes
//! with quotes, backslashes, and non-printable octets escaped.
//!
//! [RFC 1035]: https://tools.ietf.org/html/rfc1035

use super::wire::{Compose, ParseError};
use core::fmt;
use octseq::builder::OctetsBuilder;
use octseq::parse::Parser;
use std::vec::Vec;

//------------ CharStr -------------------------------------------------------

/// The content of a DNS character string.
///
/// A character string consists of up to 255 octets of binary data. The
/// limit is enforced when the value is created.
#[derive(Clone, Default, Eq, Hash, PartialEq)]
pub struct CharStr(Vec<u8>);

impl CharStr {
    /// The maximum length of the content of a character string.
    pub const MAX_LEN: usize = 255;

    /// Creates a new empty character string.
    #[must_use]
    pub fn empty() -> Self {
        CharStr(Vec::new())
    }

    /// Creates a character string from its content.
    pub fn from_octets(octets: Vec<u8>) -> Result<Self, CharStrError> {
        if octets.len() > Self::MAX_LEN {
            Err(CharStrError)
        } else {
            Ok(CharStr(octets))
        }
    }

    /// Creates a character string from a slice of its content.
    pub fn from_slice(slice: &[u8]) -> Result<Self, CharStrError> {
        Self::from_octets(slice.into())
    }

    /// Returns the content as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Converts the character string into its content.
    #[must_use]
    pub fn into_octets(self) -> Vec<u8> {
        self.0
    }

    /// Returns the length of the content.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the character string is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the length of the wire format including the length octet.
    #[must_use]
    pub fn compose_len(&self) -> u16 {
        // Can’t overflow since the content is at most 255 octets.
        self.0.len() as u16 + 1
    }

    /// Parses a length-prefixed character string.
    pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<Octs>,
    ) -> Result<Self, ParseError> {
        let len = usize::from(parser.parse_u8()?);
        super::wire::parse_vec(parser, len).map(CharStr)
    }

    /// Skips over a length-prefixed character string.
    pub fn skip<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<Octs>,
    ) -> Result<(), ParseError> {
        let len = parser.parse_u8()?;
        parser.advance(len.into()).map_err(Into::into)
    }

    /// Appends the wire format of the character string.
    pub fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        (self.0.len() as u8).compose(target)?;
        target.append_slice(&self.0)
    }

    /// Writes the content escaped for use within a quoted string.
    ///
    /// Double quotes and backslashes are preceded by a backslash, octets
    /// outside printable ASCII are written as `\DDD`.
    pub fn display_escaped(
        content: &[u8],
        f: &mut impl fmt::Write,
    ) -> fmt::Result {
        for &ch in content {
            if ch == b'"' || ch == b'\\' {
                write!(f, "\\{}", ch as char)?;
            } else if !(0x20..0x7F).contains(&ch) {
                write!(f, "\\{:03}", ch)?;
            } else {
                f.write_char(ch as char)?;
            }
        }
        Ok(())
    }
}

//--- AsRef

impl AsRef<[u8]> for CharStr {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

//--- Display and Debug

impl fmt::Display for CharStr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("\"")?;
        Self::display_escaped(&self.0, f)?;
        f.write_str("\"")
    }
}

impl fmt::Debug for CharStr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "CharStr({})", self)
    }
}

//------------ CharStrError --------------------------------------------------

/// A byte sequence does not represent a valid character string.
///
/// This can only mean that the sequence is longer than 255 octets.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CharStrError;

impl fmt::Display for CharStrError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("long character string")
    }
}

impl std::error::Error for CharStrError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use octseq::builder::infallible;

    #[test]
    fn from_octets() {
        assert!(CharStr::from_octets(vec![b'x'; 255]).is_ok());
        assert_eq!(CharStr::from_octets(vec![b'x'; 256]), Err(CharStrError));
    }

    #[test]
    fn compose_parse() {
        let mut buf = Vec::new();
        let s = CharStr::from_slice(b"foo").unwrap();
        infallible(s.compose(&mut buf));
        infallible(CharStr::empty().compose(&mut buf));
        assert_eq!(buf, b"\x03foo\x00");
        assert_eq!(s.compose_len(), 4);

        let mut parser = Parser::from_ref(buf.as_slice());
        assert_eq!(CharStr::parse(&mut parser).unwrap(), s);
        assert!(CharStr::parse(&mut parser).unwrap().is_empty());
        assert_eq!(parser.remaining(), 0);

        let mut parser = Parser::from_ref(b"\x04foo".as_slice());
        assert_eq!(CharStr::parse(&mut parser), Err(ParseError::ShortInput));
    }

    #[test]
    fn display() {
        let s = CharStr::from_slice(b"a \"b\"\\\x07").unwrap();
        assert_eq!(format!("{}", s), "\"a \\\"b\\\"\\\\\\007\"");
    }
}
