//! Reading and writing the wire format.
//!
//! Values with a fixed encoding implement [`Compose`] and [`Parse`]. Record
//! data is written into a [`Composer`], which is an octets builder that may
//! know how to compress domain names. Reading goes through an
//! [`octseq::parse::Parser`] and fails with a [`ParseError`].

use super::name::Name;
use core::fmt;
use octseq::builder::{OctetsBuilder, Truncate};
use octseq::parse::{Parser, ShortInput};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::vec::Vec;

//------------ Composer ------------------------------------------------------

/// A target for record data.
pub trait Composer:
    OctetsBuilder + AsRef<[u8]> + AsMut<[u8]> + Truncate
{
    /// Appends a domain name, compressed if the target supports it.
    ///
    /// The default appends the name as is.
    fn append_compressed_name(
        &mut self,
        name: &Name,
    ) -> Result<(), Self::AppendError> {
        name.compose(self)
    }

    /// Returns whether `append_compressed_name` may emit pointers.
    ///
    /// Record data containing names has no fixed length in such a target.
    fn can_compress(&self) -> bool {
        false
    }
}

impl Composer for Vec<u8> {}

#[cfg(feature = "bytes")]
impl Composer for bytes::BytesMut {}

/// Runs `op` and prefixes its output with its 16 bit length.
///
/// Nothing is left behind in `target` if `op` fails.
///
/// # Panics
///
/// Panics if `op` appends more than 65,535 octets. Record data types keep
/// their content below that limit.
pub fn compose_len_prefixed<Target, F>(
    target: &mut Target,
    op: F,
) -> Result<(), Target::AppendError>
where
    Target: Composer + ?Sized,
    F: FnOnce(&mut Target) -> Result<(), Target::AppendError>,
{
    let start = target.as_ref().len();
    target.append_slice(&[0; 2])?;
    if let Err(err) = op(target) {
        target.truncate(start);
        return Err(err);
    }
    let len = target.as_ref().len() - start - 2;
    let len = match u16::try_from(len) {
        Ok(len) => len,
        Err(_) => panic!("{} octets of record data", len),
    };
    target.as_mut()[start..start + 2].copy_from_slice(&len.to_be_bytes());
    Ok(())
}

//------------ Compose and Parse ---------------------------------------------

/// A value with a fixed wire format.
pub trait Compose {
    /// The encoded length if it is the same for all values, else zero.
    const COMPOSE_LEN: u16 = 0;

    fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError>;
}

/// A value that can be taken from the front of a parser.
///
/// Values own their data, so the parser’s octets are only borrowed while
/// parsing. After an error, the position of the parser is unspecified.
pub trait Parse<'a, Octs: ?Sized>: Sized {
    fn parse(parser: &mut Parser<'a, Octs>) -> Result<Self, ParseError>;
}

/// Implements both traits for values that are a fixed size array of octets
/// on the wire.
macro_rules! fixed_wire {
    ( $( $type:ty: $len:literal, $to:expr, $from:expr; )* ) => {
        $(
            impl Compose for $type {
                const COMPOSE_LEN: u16 = $len;

                fn compose<Target: OctetsBuilder + ?Sized>(
                    &self,
                    target: &mut Target,
                ) -> Result<(), Target::AppendError> {
                    target.append_slice(&$to(*self))
                }
            }

            impl<'a, Octs> Parse<'a, Octs> for $type
            where
                Octs: AsRef<[u8]> + ?Sized,
            {
                fn parse(
                    parser: &mut Parser<'a, Octs>,
                ) -> Result<Self, ParseError> {
                    let mut buf = [0u8; $len];
                    parser.parse_buf(&mut buf)?;
                    Ok($from(buf))
                }
            }
        )*
    };
}

fixed_wire! {
    u8: 1, u8::to_be_bytes, u8::from_be_bytes;
    u16: 2, u16::to_be_bytes, u16::from_be_bytes;
    i32: 4, i32::to_be_bytes, i32::from_be_bytes;
    u32: 4, u32::to_be_bytes, u32::from_be_bytes;
    Ipv4Addr: 4, |addr: Ipv4Addr| addr.octets(), Ipv4Addr::from;
    Ipv6Addr: 16, |addr: Ipv6Addr| addr.octets(), Ipv6Addr::from;
}

/// Takes the next `len` octets.
pub fn parse_vec<Octs: AsRef<[u8]> + ?Sized>(
    parser: &mut Parser<Octs>,
    len: usize,
) -> Result<Vec<u8>, ParseError> {
    let mut res = vec![0; len];
    parser.parse_buf(&mut res)?;
    Ok(res)
}

/// Takes everything up to the end of the parser.
///
/// Used for the last field of record data, so the parser has to be limited
/// to the record data.
pub fn parse_rest<Octs: AsRef<[u8]> + ?Sized>(
    parser: &mut Parser<Octs>,
) -> Vec<u8> {
    let res = parser.peek_all().to_vec();
    parser.advance_to_end();
    res
}

//============ Error Types ===================================================

//------------ ParseError ----------------------------------------------------

/// Wire data could not be parsed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// The data ended early.
    ShortInput,

    /// The data is malformed.
    Form(FormError),

    /// A field has a value whose wire format isn’t known.
    ///
    /// Digest types and hash algorithms determine the length of a later
    /// field, so data using an unknown one can’t be taken apart.
    Unsupported(FormError),
}

impl ParseError {
    pub fn form_error(msg: &'static str) -> Self {
        ParseError::Form(FormError(msg))
    }

    pub fn unsupported(msg: &'static str) -> Self {
        ParseError::Unsupported(FormError(msg))
    }
}

impl From<ShortInput> for ParseError {
    fn from(_: ShortInput) -> Self {
        ParseError::ShortInput
    }
}

impl From<FormError> for ParseError {
    fn from(err: FormError) -> Self {
        ParseError::Form(err)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseError::ShortInput => f.write_str("unexpected end of input"),
            ParseError::Form(err) => err.fmt(f),
            ParseError::Unsupported(err) => {
                write!(f, "unsupported: {}", err)
            }
        }
    }
}

impl std::error::Error for ParseError {}

//------------ FormError -----------------------------------------------------

/// Malformed data, described by a static message.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FormError(&'static str);

impl FormError {
    pub fn new(msg: &'static str) -> Self {
        FormError(msg)
    }
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl std::error::Error for FormError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use octseq::builder::infallible;

    #[test]
    fn len_prefixed() {
        let mut buf = vec![0xAA];
        infallible(compose_len_prefixed(&mut buf, |target| {
            1u32.compose(target)?;
            7u8.compose(target)
        }));
        assert_eq!(buf, b"\xAA\x00\x05\x00\x00\x00\x01\x07");
    }

    #[test]
    fn fixed_values() {
        let data = b"\x01\x02\x03\xFF\xFF\xFF\xFE\xC0\x00\x02\x01";
        let mut parser = Parser::from_ref(data.as_slice());
        assert_eq!(u8::parse(&mut parser), Ok(1));
        assert_eq!(u16::parse(&mut parser), Ok(0x0203));
        assert_eq!(i32::parse(&mut parser), Ok(-2));
        assert_eq!(
            Ipv4Addr::parse(&mut parser),
            Ok(Ipv4Addr::new(192, 0, 2, 1))
        );
        assert_eq!(u8::parse(&mut parser), Err(ParseError::ShortInput));

        let mut buf = Vec::new();
        infallible(Ipv4Addr::new(192, 0, 2, 1).compose(&mut buf));
        infallible((-2i32).compose(&mut buf));
        assert_eq!(buf, b"\xC0\x00\x02\x01\xFF\xFF\xFF\xFE");
        assert_eq!(Ipv6Addr::COMPOSE_LEN, 16);
    }

    #[test]
    fn parse_vec_and_rest() {
        let data = b"abcdef";
        let mut parser = Parser::from_ref(data.as_slice());
        assert_eq!(parse_vec(&mut parser, 2).unwrap(), b"ab");
        assert_eq!(parse_rest(&mut parser), b"cdef");
        assert_eq!(parser.remaining(), 0);
        assert_eq!(parse_vec(&mut parser, 1), Err(ParseError::ShortInput));
    }

    #[test]
    fn error_display() {
        assert_eq!(
            ParseError::unsupported("digest type 9").to_string(),
            "unsupported: digest type 9"
        );
        assert_eq!(
            ParseError::ShortInput.to_string(),
            "unexpected end of input"
        );
    }
}
