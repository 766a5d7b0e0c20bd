//! Domain names.
//!
//! This module provides [`Name`], an owned absolute domain name kept in
//! uncompressed wire format. All record data in this crate owns its names,
//! so names are copied out of the message when parsed and compression
//! pointers are resolved on the way.
//!
//! Domain names compare ASCII-case-insensitively as required by
//! [RFC 4343].
//!
//! [RFC 4343]: https://tools.ietf.org/html/rfc4343

use super::wire::{FormError, ParseError};
use core::{fmt, hash, str};
use octseq::builder::OctetsBuilder;
use octseq::parse::Parser;
use std::vec::Vec;

//------------ Name ----------------------------------------------------------

/// An absolute domain name.
///
/// The name is stored as the sequence of its labels in wire format, each
/// label preceded by its length octet and the whole sequence ending in the
/// empty root label. The total length never exceeds 255 octets and no label
/// is longer than 63 octets.
#[derive(Clone)]
pub struct Name(Vec<u8>);

/// # Creating Values
///
impl Name {
    /// Returns the root name.
    #[must_use]
    pub fn root() -> Self {
        Name(vec![0])
    }

    /// Creates a name from its wire format.
    ///
    /// The octets must contain an uncompressed absolute name and nothing
    /// else.
    pub fn from_octets(octets: Vec<u8>) -> Result<Self, NameError> {
        let mut pos = 0;
        loop {
            let len = match octets.get(pos) {
                Some(&len) => usize::from(len),
                None => return Err(NameError::RelativeName),
            };
            if len > 63 {
                return Err(NameError::LongLabel);
            }
            pos += len + 1;
            if pos > 255 {
                return Err(NameError::LongName);
            }
            if len == 0 {
                break;
            }
        }
        if pos != octets.len() {
            return Err(NameError::TrailingData);
        }
        Ok(Name(octets))
    }

    /// Creates a name from its presentation format relative to an origin.
    ///
    /// A name consisting only of `@` is the origin itself. A name ending in
    /// an unescaped dot is absolute. Any other name is relative and has the
    /// origin appended.
    pub fn from_relative(s: &str, origin: &Name) -> Result<Self, NameError> {
        if s == "@" {
            return Ok(origin.clone());
        }
        let (mut octets, absolute) = Self::parse_presentation(s)?;
        if absolute {
            octets.push(0);
        } else {
            octets.extend_from_slice(origin.as_slice());
        }
        if octets.len() > 255 {
            return Err(NameError::LongName);
        }
        Ok(Name(octets))
    }

    /// Parses the labels of a name in presentation format.
    ///
    /// Returns the labels in wire format without the root label and whether
    /// the name ended in a dot.
    fn parse_presentation(s: &str) -> Result<(Vec<u8>, bool), NameError> {
        if s == "." {
            return Ok((Vec::new(), true));
        }
        if s.is_empty() {
            return Err(NameError::EmptyLabel);
        }

        let mut res = Vec::new();
        let mut label_start = 0;
        res.push(0);
        let mut chars = s.chars();
        while let Some(ch) = chars.next() {
            let octet = match ch {
                '.' => {
                    let len = res.len() - label_start - 1;
                    if len == 0 {
                        return Err(NameError::EmptyLabel);
                    }
                    res[label_start] = len as u8;
                    label_start = res.len();
                    res.push(0);
                    continue;
                }
                '\\' => Self::parse_escape(&mut chars)?,
                ' '..='~' => ch as u8,
                _ => return Err(NameError::IllegalChar(ch)),
            };
            res.push(octet);
            if res.len() - label_start - 1 > 63 {
                return Err(NameError::LongLabel);
            }
            if res.len() > 255 {
                return Err(NameError::LongName);
            }
        }

        // The last label is either a real one or the placeholder pushed
        // after a final dot.
        let len = res.len() - label_start - 1;
        if len == 0 {
            res.truncate(label_start);
            Ok((res, true))
        } else {
            res[label_start] = len as u8;
            Ok((res, false))
        }
    }

    /// Parses the remainder of an escape sequence.
    fn parse_escape(chars: &mut str::Chars) -> Result<u8, NameError> {
        let ch = chars.next().ok_or(NameError::IllegalEscape)?;
        if let Some(first) = ch.to_digit(10) {
            let mut value = first;
            for _ in 0..2 {
                let digit = chars
                    .next()
                    .and_then(|ch| ch.to_digit(10))
                    .ok_or(NameError::IllegalEscape)?;
                value = value * 10 + digit;
            }
            u8::try_from(value).map_err(|_| NameError::IllegalEscape)
        } else if ch.is_ascii() {
            Ok(ch as u8)
        } else {
            Err(NameError::IllegalChar(ch))
        }
    }
}

/// # Properties
///
impl Name {
    /// Returns the wire format of the name.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Returns the length of the wire format of the name.
    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether this is the root name.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.len() == 1
    }

    /// Returns the number of labels not counting the root label.
    ///
    /// This is the value the labels field of an RRSIG covering a
    /// non-wildcard name would have.
    #[must_use]
    pub fn label_count(&self) -> usize {
        self.iter_labels().count()
    }

    /// Returns an iterator over the non-root labels.
    ///
    /// Each item is the position of the label’s length octet within the wire
    /// format and the content of the label.
    pub fn iter_labels(&self) -> impl Iterator<Item = (usize, &[u8])> + '_ {
        let mut pos = 0;
        core::iter::from_fn(move || {
            let len = usize::from(*self.0.get(pos)?);
            if len == 0 {
                return None;
            }
            let start = pos;
            pos += len + 1;
            Some((start, &self.0[start + 1..pos]))
        })
    }

    /// Returns the wire format with all ASCII letters in lower case.
    #[must_use]
    pub fn to_canonical_vec(&self) -> Vec<u8> {
        self.0.to_ascii_lowercase()
    }
}

/// # Parsing and Composing
///
impl Name {
    /// Parses a possibly compressed name.
    ///
    /// Compression pointers are followed within the octets the parser
    /// works on. They have to point backwards from where they are found.
    /// When the function returns, the parser is positioned right after the
    /// first pointer or the root label if there wasn’t any.
    pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<Octs>,
    ) -> Result<Self, ParseError> {
        let mut res = Vec::new();
        let mut cur = *parser;
        let mut end = None;
        loop {
            match LabelType::parse(&mut cur)? {
                LabelType::Normal(0) => {
                    res.push(0);
                    break;
                }
                LabelType::Normal(len) => {
                    res.push(len as u8);
                    res.extend_from_slice(cur.peek(len)?);
                    cur.advance(len)?;
                    if res.len() >= 255 {
                        return Err(NameError::LongName.into());
                    }
                }
                LabelType::Compressed(ptr) => {
                    // The pointer’s two octets have been read, so it needs
                    // to be less than the current position minus 2 which
                    // also stops it pointing to itself.
                    if ptr >= cur.pos() - 2 {
                        return Err(NameError::BadPointer.into());
                    }
                    if end.is_none() {
                        end = Some(cur.pos())
                    }
                    cur.seek(ptr)?;
                }
            }
        }
        if let Some(end) = end {
            cur.seek(end)?;
        }
        *parser = cur;
        Ok(Name(res))
    }

    /// Skips over a possibly compressed name.
    pub fn skip<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<Octs>,
    ) -> Result<(), ParseError> {
        loop {
            match LabelType::parse(parser)? {
                LabelType::Normal(0) | LabelType::Compressed(_) => {
                    return Ok(())
                }
                LabelType::Normal(len) => parser.advance(len)?,
            }
        }
    }

    /// Appends the uncompressed wire format of the name.
    pub fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        target.append_slice(&self.0)
    }
}

//--- FromStr

impl str::FromStr for Name {
    type Err = NameError;

    /// Parses a name in presentation format.
    ///
    /// The name is always taken to be absolute, the final dot is optional.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (mut octets, _) = Self::parse_presentation(s)?;
        octets.push(0);
        if octets.len() > 255 {
            return Err(NameError::LongName);
        }
        Ok(Name(octets))
    }
}

//--- PartialEq, Eq, and Hash

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for Name {}

impl hash::Hash for Name {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        for ch in &self.0 {
            ch.to_ascii_lowercase().hash(state)
        }
    }
}

//--- Display and Debug

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_root() {
            return f.write_str(".");
        }
        for (_, label) in self.iter_labels() {
            for &ch in label {
                if matches!(ch, b' ' | b'.' | b'\\' | b'"' | b'(' | b')' | b';')
                {
                    write!(f, "\\{}", ch as char)?;
                } else if !(0x20..0x7F).contains(&ch) {
                    write!(f, "\\{:03}", ch)?;
                } else {
                    write!(f, "{}", (ch as char))?;
                }
            }
            f.write_str(".")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Name({})", self)
    }
}

//--- Serialize and Deserialize

#[cfg(feature = "serde")]
impl serde::Serialize for Name {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Name {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        struct Visitor;

        impl<'de> serde::de::Visitor<'de> for Visitor {
            type Value = Name;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a domain name")
            }

            fn visit_str<E: serde::de::Error>(
                self,
                v: &str,
            ) -> Result<Self::Value, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(Visitor)
    }
}

//------------ LabelType -----------------------------------------------------

/// The type of a label in wire format.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum LabelType {
    /// A normal label with its size in octets.
    Normal(usize),

    /// A compressed label with the position of where to continue.
    Compressed(usize),
}

impl LabelType {
    fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<Octs>,
    ) -> Result<Self, ParseError> {
        let ltype = parser.parse_u8()?;
        match ltype {
            0..=0x3F => Ok(LabelType::Normal(ltype.into())),
            0xC0..=0xFF => {
                let res = usize::from(parser.parse_u8()?);
                let res = res | ((usize::from(ltype) & 0x3F) << 8);
                Ok(LabelType::Compressed(res))
            }
            _ => Err(ParseError::Form(FormError::new("invalid label type"))),
        }
    }
}

//------------ NameError -----------------------------------------------------

/// A domain name could not be created.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NameError {
    /// An empty label was encountered.
    EmptyLabel,

    /// A label was longer than 63 octets.
    LongLabel,

    /// The name was longer than 255 octets.
    LongName,

    /// An illegal escape sequence was encountered.
    IllegalEscape,

    /// An illegal character was encountered.
    IllegalChar(char),

    /// Wire data ended before the root label.
    RelativeName,

    /// Wire data continued after the root label.
    TrailingData,

    /// A compression pointer didn’t point backwards.
    BadPointer,
}

impl From<NameError> for FormError {
    fn from(err: NameError) -> FormError {
        FormError::new(match err {
            NameError::EmptyLabel => "empty label",
            NameError::LongLabel => "long label",
            NameError::LongName => "long domain name",
            NameError::IllegalEscape => "illegal escape sequence",
            NameError::IllegalChar(_) => "illegal character",
            NameError::RelativeName => "relative domain name",
            NameError::TrailingData => "trailing data",
            NameError::BadPointer => "invalid compression pointer",
        })
    }
}

impl From<NameError> for ParseError {
    fn from(err: NameError) -> ParseError {
        ParseError::Form(err.into())
    }
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            NameError::IllegalChar(ch) => {
                write!(f, "illegal character '{}'", ch)
            }
            err => FormError::from(err).fmt(f),
        }
    }
}

impl std::error::Error for NameError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use core::str::FromStr;
    use octseq::builder::infallible;

    fn name(s: &str) -> Name {
        Name::from_str(s).unwrap()
    }

    #[test]
    fn from_str() {
        assert_eq!(name(".").as_slice(), b"\0");
        assert_eq!(name("www.example.com.").as_slice(), b"\x03www\x07example\x03com\0");
        assert_eq!(name("www.example.com").as_slice(), b"\x03www\x07example\x03com\0");
        assert_eq!(name("a\\.b.c").as_slice(), b"\x03a.b\x01c\0");
        assert_eq!(name("\\065\\.x").as_slice(), b"\x03A.x\0");
        assert_eq!(Name::from_str("a..b"), Err(NameError::EmptyLabel));
        assert_eq!(Name::from_str(".a"), Err(NameError::EmptyLabel));
        assert_eq!(Name::from_str(""), Err(NameError::EmptyLabel));
        assert_eq!(Name::from_str("a\\25"), Err(NameError::IllegalEscape));
        assert_eq!(Name::from_str("a\\256"), Err(NameError::IllegalEscape));
        assert_eq!(
            Name::from_str(&"x".repeat(64)),
            Err(NameError::LongLabel)
        );
        let long = ["abcdefghi"; 26].join(".");
        assert_eq!(Name::from_str(&long), Err(NameError::LongName));
    }

    #[test]
    fn from_relative() {
        let origin = name("example.com.");
        assert_eq!(Name::from_relative("@", &origin).unwrap(), origin);
        assert_eq!(
            Name::from_relative("www", &origin).unwrap(),
            name("www.example.com.")
        );
        assert_eq!(
            Name::from_relative("www.example.org.", &origin).unwrap(),
            name("www.example.org.")
        );
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Name::root()), ".");
        assert_eq!(format!("{}", name("WWW.Example.com")), "WWW.Example.com.");
        assert_eq!(format!("{}", name("a\\.b\\032c")), "a\\.b\\ c.");
        assert_eq!(format!("{}", name("\\007")), "\\007.");
    }

    #[test]
    fn eq_and_hash() {
        use std::collections::hash_map::DefaultHasher;
        use core::hash::{Hash, Hasher};

        fn hash(name: &Name) -> u64 {
            let mut hasher = DefaultHasher::new();
            name.hash(&mut hasher);
            hasher.finish()
        }

        assert_eq!(name("www.EXAMPLE.com"), name("WWW.example.COM"));
        assert_ne!(name("www.example.com"), name("ww.example.com"));
        assert_eq!(
            hash(&name("www.EXAMPLE.com")),
            hash(&name("WWW.example.COM"))
        );
    }

    #[test]
    fn labels() {
        let n = name("www.example.com");
        assert_eq!(n.label_count(), 3);
        assert_eq!(Name::root().label_count(), 0);
        let labels: Vec<_> = n.iter_labels().collect();
        assert_eq!(labels[1], (4, &b"example"[..]));
    }

    #[test]
    fn parse_compressed() {
        // "example.com" at 0, "www" + pointer to 0 at 13.
        let data = b"\x07example\x03com\x00\x03www\xC0\x00\x01";
        let mut parser = Parser::from_ref(data.as_slice());
        assert_eq!(Name::parse(&mut parser).unwrap(), name("example.com"));
        assert_eq!(parser.pos(), 13);
        assert_eq!(Name::parse(&mut parser).unwrap(), name("www.example.com"));
        assert_eq!(parser.pos(), 19);
        assert_eq!(parser.remaining(), 1);

        let mut parser = Parser::from_ref(data.as_slice());
        Name::skip(&mut parser).unwrap();
        Name::skip(&mut parser).unwrap();
        assert_eq!(parser.pos(), 19);
    }

    #[test]
    fn parse_bad_pointer() {
        // A pointer pointing to itself.
        let data = b"\x03www\xC0\x04";
        let mut parser = Parser::from_ref(data.as_slice());
        assert!(Name::parse(&mut parser).is_err());

        // A pointer pointing forward.
        let data = b"\xC0\x02\x00";
        let mut parser = Parser::from_ref(data.as_slice());
        assert!(Name::parse(&mut parser).is_err());
    }

    #[test]
    fn compose() {
        let mut buf = Vec::new();
        infallible(name("www.example.com").compose(&mut buf));
        assert_eq!(buf, b"\x03www\x07example\x03com\0");
        assert_eq!(Name::from_octets(buf).unwrap(), name("www.example.com"));
        assert_eq!(
            Name::from_octets(b"\x03www".to_vec()),
            Err(NameError::RelativeName)
        );
        assert_eq!(
            Name::from_octets(b"\x00\x00".to_vec()),
            Err(NameError::TrailingData)
        );
    }
}
