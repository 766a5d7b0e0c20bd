//! Record data from [RFC 5155]: NSEC3 and NSEC3PARAM records.
//!
//! [RFC 5155]: https://tools.ietf.org/html/rfc5155

use super::dnssec::RtypeBitmap;
use crate::base::iana::{Nsec3HashAlg, Rtype};
use crate::base::rdata::{ComposeRecordData, ParseRecordData};
use crate::base::wire::{parse_vec, Compose, Composer, Parse, ParseError};
use crate::utils::{base16, base32};
use core::{fmt, str};
use octseq::builder::OctetsBuilder;
use octseq::parse::Parser;
use std::vec::Vec;

/// Checks that the hash algorithm has a defined wire shape.
fn check_hash_algorithm(alg: Nsec3HashAlg) -> Result<(), ParseError> {
    if alg.is_supported() {
        Ok(())
    } else {
        Err(ParseError::unsupported("NSEC3 hash algorithm"))
    }
}

//------------ Nsec3 ---------------------------------------------------------

/// NSEC3 record data.
///
/// The type bitmap extends to the end of the record data, so the parser
/// must be limited to exactly the record data.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Nsec3 {
    hash_algorithm: Nsec3HashAlg,
    flags: u8,
    iterations: u16,
    salt: Nsec3Salt,
    next_owner: OwnerHash,
    types: RtypeBitmap,
}

impl Nsec3 {
    /// The rtype of this record data type.
    pub(crate) const RTYPE: Rtype = Rtype::NSEC3;

    #[must_use]
    pub fn new(
        hash_algorithm: Nsec3HashAlg,
        flags: u8,
        iterations: u16,
        salt: Nsec3Salt,
        next_owner: OwnerHash,
        types: RtypeBitmap,
    ) -> Self {
        Nsec3 {
            hash_algorithm,
            flags,
            iterations,
            salt,
            next_owner,
            types,
        }
    }

    #[must_use]
    pub fn hash_algorithm(&self) -> Nsec3HashAlg {
        self.hash_algorithm
    }

    #[must_use]
    pub fn flags(&self) -> u8 {
        self.flags
    }

    /// Returns whether the Opt-Out flag is set.
    ///
    /// See [RFC 5155, section 3.1.2.1].
    ///
    /// [RFC 5155, section 3.1.2.1]: https://tools.ietf.org/html/rfc5155#section-3.1.2.1
    #[must_use]
    pub fn opt_out(&self) -> bool {
        self.flags & 0x01 != 0
    }

    #[must_use]
    pub fn iterations(&self) -> u16 {
        self.iterations
    }

    #[must_use]
    pub fn salt(&self) -> &Nsec3Salt {
        &self.salt
    }

    #[must_use]
    pub fn next_owner(&self) -> &OwnerHash {
        &self.next_owner
    }

    #[must_use]
    pub fn types(&self) -> &RtypeBitmap {
        &self.types
    }

    pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<Octs>,
    ) -> Result<Self, ParseError> {
        let hash_algorithm = Nsec3HashAlg::parse(parser)?;
        check_hash_algorithm(hash_algorithm)?;
        let flags = u8::parse(parser)?;
        let iterations = u16::parse(parser)?;
        let salt = Nsec3Salt::parse(parser)?;
        let next_owner = OwnerHash::parse(parser)?;
        let types = RtypeBitmap::parse(parser)?;
        Ok(Self::new(
            hash_algorithm,
            flags,
            iterations,
            salt,
            next_owner,
            types,
        ))
    }
}

//--- ParseRecordData, ComposeRecordData

impl<'a, Octs: AsRef<[u8]> + ?Sized> ParseRecordData<'a, Octs> for Nsec3 {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser<'a, Octs>,
    ) -> Result<Option<Self>, ParseError> {
        if rtype == Nsec3::RTYPE {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeRecordData for Nsec3 {
    fn rtype(&self) -> Rtype {
        Nsec3::RTYPE
    }

    fn rdlen(&self, _compress: bool) -> Option<u16> {
        // Salt and hash are at most 256 octets each, the bitmap at most
        // 256 windows of 34 octets.
        Some(
            Nsec3HashAlg::COMPOSE_LEN
                + u8::COMPOSE_LEN
                + u16::COMPOSE_LEN
                + self.salt.compose_len()
                + self.next_owner.compose_len()
                + self.types.compose_len() as u16,
        )
    }

    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        self.hash_algorithm.compose(target)?;
        self.flags.compose(target)?;
        self.iterations.compose(target)?;
        self.salt.compose(target)?;
        self.next_owner.compose(target)?;
        self.types.compose(target)
    }
}

//--- Display

impl fmt::Display for Nsec3 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.hash_algorithm,
            self.flags,
            self.iterations,
            self.salt,
            self.next_owner
        )?;
        if !self.types.is_empty() {
            write!(f, " {}", self.types)?;
        }
        Ok(())
    }
}

//------------ Nsec3param ----------------------------------------------------

/// NSEC3PARAM record data.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Nsec3param {
    hash_algorithm: Nsec3HashAlg,
    flags: u8,
    iterations: u16,
    salt: Nsec3Salt,
}

impl Nsec3param {
    /// The rtype of this record data type.
    pub(crate) const RTYPE: Rtype = Rtype::NSEC3PARAM;

    #[must_use]
    pub fn new(
        hash_algorithm: Nsec3HashAlg,
        flags: u8,
        iterations: u16,
        salt: Nsec3Salt,
    ) -> Self {
        Nsec3param {
            hash_algorithm,
            flags,
            iterations,
            salt,
        }
    }

    #[must_use]
    pub fn hash_algorithm(&self) -> Nsec3HashAlg {
        self.hash_algorithm
    }

    #[must_use]
    pub fn flags(&self) -> u8 {
        self.flags
    }

    #[must_use]
    pub fn iterations(&self) -> u16 {
        self.iterations
    }

    #[must_use]
    pub fn salt(&self) -> &Nsec3Salt {
        &self.salt
    }

    pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<Octs>,
    ) -> Result<Self, ParseError> {
        let hash_algorithm = Nsec3HashAlg::parse(parser)?;
        check_hash_algorithm(hash_algorithm)?;
        Ok(Self::new(
            hash_algorithm,
            u8::parse(parser)?,
            u16::parse(parser)?,
            Nsec3Salt::parse(parser)?,
        ))
    }
}

//--- ParseRecordData, ComposeRecordData

impl<'a, Octs: AsRef<[u8]> + ?Sized> ParseRecordData<'a, Octs>
    for Nsec3param
{
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser<'a, Octs>,
    ) -> Result<Option<Self>, ParseError> {
        if rtype == Nsec3param::RTYPE {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeRecordData for Nsec3param {
    fn rtype(&self) -> Rtype {
        Nsec3param::RTYPE
    }

    fn rdlen(&self, _compress: bool) -> Option<u16> {
        Some(
            Nsec3HashAlg::COMPOSE_LEN
                + u8::COMPOSE_LEN
                + u16::COMPOSE_LEN
                + self.salt.compose_len(),
        )
    }

    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        self.hash_algorithm.compose(target)?;
        self.flags.compose(target)?;
        self.iterations.compose(target)?;
        self.salt.compose(target)
    }
}

//--- Display

impl fmt::Display for Nsec3param {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.hash_algorithm, self.flags, self.iterations, self.salt
        )
    }
}

//------------ Nsec3Salt -----------------------------------------------------

/// The salt value of NSEC3 and NSEC3PARAM records.
///
/// The salt is at most 255 octets long and preceded by a length octet on
/// the wire. In presentation format it is hex encoded or a single `-` if
/// empty.
#[derive(Clone, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<u8>", into = "Vec<u8>")
)]
pub struct Nsec3Salt(Vec<u8>);

impl Nsec3Salt {
    /// The salt has a maximum length 255 octets since its length is encoded
    /// as a single octet.
    pub const MAX_LEN: usize = 255;

    /// Creates an empty salt value.
    #[must_use]
    pub fn empty() -> Self {
        Nsec3Salt(Vec::new())
    }

    /// Creates a new salt value from the given octets.
    pub fn from_octets(octets: Vec<u8>) -> Result<Self, Nsec3SaltError> {
        if octets.len() > Self::MAX_LEN {
            Err(Nsec3SaltError(()))
        } else {
            Ok(Nsec3Salt(octets))
        }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<Octs>,
    ) -> Result<Self, ParseError> {
        let len = u8::parse(parser)?;
        parse_vec(parser, usize::from(len)).map(Nsec3Salt)
    }

    #[must_use]
    pub fn compose_len(&self) -> u16 {
        self.0.len() as u16 + 1
    }

    pub fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        (self.0.len() as u8).compose(target)?;
        target.append_slice(&self.0)
    }
}

//--- TryFrom, From, and FromStr

impl TryFrom<Vec<u8>> for Nsec3Salt {
    type Error = Nsec3SaltError;

    fn try_from(octets: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_octets(octets)
    }
}

impl From<Nsec3Salt> for Vec<u8> {
    fn from(salt: Nsec3Salt) -> Self {
        salt.0
    }
}

impl str::FromStr for Nsec3Salt {
    type Err = Nsec3SaltError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(Self::empty())
        } else {
            base16::decode(s)
                .map_err(|_| Nsec3SaltError(()))
                .and_then(Self::from_octets)
        }
    }
}

//--- Display and Debug

impl fmt::Display for Nsec3Salt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("-")
        } else {
            base16::display(&self.0, f)
        }
    }
}

impl fmt::Debug for Nsec3Salt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Nsec3Salt")
            .field(&format_args!("{}", self))
            .finish()
    }
}

//------------ OwnerHash -----------------------------------------------------

/// The hash of the next owner name in an NSEC3 record.
///
/// On the wire, the hash is preceded by a single length octet. The
/// presentation format is unpadded *base32hex*.
#[derive(Clone, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<u8>", into = "Vec<u8>")
)]
pub struct OwnerHash(Vec<u8>);

impl OwnerHash {
    pub const MAX_LEN: usize = 255;

    pub fn from_octets(octets: Vec<u8>) -> Result<Self, OwnerHashError> {
        if octets.len() > Self::MAX_LEN {
            Err(OwnerHashError(()))
        } else {
            Ok(OwnerHash(octets))
        }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<Octs>,
    ) -> Result<Self, ParseError> {
        let len = u8::parse(parser)?;
        parse_vec(parser, usize::from(len)).map(OwnerHash)
    }

    #[must_use]
    pub fn compose_len(&self) -> u16 {
        self.0.len() as u16 + 1
    }

    pub fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        (self.0.len() as u8).compose(target)?;
        target.append_slice(&self.0)
    }
}

impl TryFrom<Vec<u8>> for OwnerHash {
    type Error = OwnerHashError;

    fn try_from(octets: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_octets(octets)
    }
}

impl From<OwnerHash> for Vec<u8> {
    fn from(hash: OwnerHash) -> Self {
        hash.0
    }
}

impl str::FromStr for OwnerHash {
    type Err = OwnerHashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        base32::decode_hex(s)
            .map_err(|_| OwnerHashError(()))
            .and_then(Self::from_octets)
    }
}

impl fmt::Display for OwnerHash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        base32::display_hex(&self.0, f)
    }
}

impl fmt::Debug for OwnerHash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("OwnerHash")
            .field(&format_args!("{}", self))
            .finish()
    }
}

//============ Error Types ===================================================

/// A byte sequence does not represent a valid NSEC3 salt.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Nsec3SaltError(());

impl fmt::Display for Nsec3SaltError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("illegal NSEC3 salt")
    }
}

impl std::error::Error for Nsec3SaltError {}

/// A byte sequence does not represent a valid owner hash.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct OwnerHashError(());

impl fmt::Display for OwnerHashError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("illegal owner name hash")
    }
}

impl std::error::Error for OwnerHashError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::rdata::test::{test_compose_parse, test_rdlen};
    use core::str::FromStr;
    use octseq::builder::infallible;

    fn nsec3(types: RtypeBitmap) -> Nsec3 {
        Nsec3::new(
            Nsec3HashAlg::SHA1,
            1,
            10,
            Nsec3Salt::from_str("AABBCCDD").unwrap(),
            OwnerHash::from_str("2T7B4G4VSA5SMI47K61MV5BV1A22BOJR").unwrap(),
            types,
        )
    }

    #[test]
    fn nsec3_compose_parse() {
        let rdata = nsec3(RtypeBitmap::from_types([Rtype::A, Rtype::RRSIG]));
        assert!(rdata.opt_out());
        assert_eq!(rdata.next_owner().as_slice().len(), 20);
        test_rdlen(&rdata);
        test_compose_parse(&rdata, Nsec3::parse);
        assert_eq!(
            rdata.to_string(),
            "1 1 10 AABBCCDD 2T7B4G4VSA5SMI47K61MV5BV1A22BOJR A RRSIG"
        );
    }

    #[test]
    fn nsec3_empty_bitmap() {
        let rdata = nsec3(RtypeBitmap::default());
        test_compose_parse(&rdata, Nsec3::parse);
        assert_eq!(
            rdata.to_string(),
            "1 1 10 AABBCCDD 2T7B4G4VSA5SMI47K61MV5BV1A22BOJR"
        );
    }

    #[test]
    fn nsec3_one_octet_hash_length() {
        let mut buf = Vec::new();
        infallible(nsec3(RtypeBitmap::default()).compose_rdata(&mut buf));
        // alg, flags, iterations, salt length and salt, then hash length.
        assert_eq!(buf[9], 20);
        assert_eq!(buf.len(), 10 + 20);
    }

    #[test]
    fn nsec3_unsupported_algorithm() {
        let data = b"\x02\x00\x00\x0a\x00\x01\xff";
        assert!(matches!(
            Nsec3::parse(&mut Parser::from_ref(data.as_slice())),
            Err(ParseError::Unsupported(_))
        ));
        assert!(matches!(
            Nsec3param::parse(&mut Parser::from_ref(&data[..5])),
            Err(ParseError::Unsupported(_))
        ));
    }

    #[test]
    fn nsec3param_compose_parse() {
        let rdata =
            Nsec3param::new(Nsec3HashAlg::SHA1, 0, 0, Nsec3Salt::empty());
        test_rdlen(&rdata);
        test_compose_parse(&rdata, Nsec3param::parse);
        assert_eq!(rdata.to_string(), "1 0 0 -");
    }

    #[test]
    fn salt_from_str() {
        assert_eq!(Nsec3Salt::from_str("-"), Ok(Nsec3Salt::empty()));
        assert_eq!(
            Nsec3Salt::from_str("aabb").unwrap().as_slice(),
            b"\xaa\xbb"
        );
        assert!(Nsec3Salt::from_str("xyz").is_err());
        assert!(Nsec3Salt::from_octets(vec![0; 256]).is_err());
    }
}
