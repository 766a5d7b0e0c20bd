//! Record data from [RFC 4034]: DS, DNSKEY, and RRSIG records.
//!
//! This RFC defines the record types for DNSSEC. The DS record was
//! originally introduced by [RFC 3658]. The NSEC record is not implemented
//! but the type bitmap it introduced is, since NSEC3 records reuse it.
//!
//! [RFC 3658]: https://tools.ietf.org/html/rfc3658
//! [RFC 4034]: https://tools.ietf.org/html/rfc4034

use crate::base::iana::{DigestAlg, Rtype, SecAlg};
use crate::base::name::Name;
use crate::base::rdata::{ComposeRecordData, ParseRecordData};
use crate::base::wire::{
    parse_rest, parse_vec, Compose, Composer, FormError, Parse, ParseError,
};
use crate::utils::{base16, base64};
use core::fmt;
use core::str::FromStr;
use octseq::builder::OctetsBuilder;
use octseq::parse::Parser;
use std::collections::BTreeSet;
use std::vec::Vec;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

/// The presentation format of signature times.
const SIGNATURE_TIME: &[FormatItem<'static>] =
    format_description!("[year][month][day][hour][minute][second]");

//------------ Dnskey --------------------------------------------------------

/// DNSKEY record data.
///
/// A DNSKEY record holds a public key used for DNSSEC. The wire format is
/// the flags, the protocol, the algorithm, and then the key material up to
/// the end of the record data. The key material must not be empty.
///
/// The DNSKEY record type is defined in [RFC 4034, section 2].
///
/// [RFC 4034, section 2]: https://tools.ietf.org/html/rfc4034#section-2
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dnskey {
    flags: u16,
    protocol: u8,
    algorithm: SecAlg,
    #[cfg_attr(feature = "serde", serde(with = "crate::utils::base64::serde"))]
    public_key: Vec<u8>,
}

impl Dnskey {
    /// The rtype of this record data type.
    pub(crate) const RTYPE: Rtype = Rtype::DNSKEY;

    /// The only protocol value defined for DNSSEC keys.
    pub const PROTOCOL: u8 = 3;

    /// Creates new DNSKEY record data using protocol 3.
    #[must_use]
    pub fn new(flags: u16, algorithm: SecAlg, public_key: Vec<u8>) -> Self {
        Self::with_protocol(flags, Self::PROTOCOL, algorithm, public_key)
    }

    /// Creates new DNSKEY record data with an explicit protocol value.
    #[must_use]
    pub fn with_protocol(
        flags: u16,
        protocol: u8,
        algorithm: SecAlg,
        public_key: Vec<u8>,
    ) -> Self {
        Dnskey {
            flags,
            protocol,
            algorithm,
            public_key,
        }
    }

    #[must_use]
    pub fn flags(&self) -> u16 {
        self.flags
    }

    #[must_use]
    pub fn protocol(&self) -> u8 {
        self.protocol
    }

    #[must_use]
    pub fn algorithm(&self) -> SecAlg {
        self.algorithm
    }

    #[must_use]
    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<Octs>,
    ) -> Result<Self, ParseError> {
        let flags = u16::parse(parser)?;
        let protocol = u8::parse(parser)?;
        let algorithm = SecAlg::parse(parser)?;
        if parser.remaining() == 0 {
            return Err(ParseError::form_error("no key data"));
        }
        Ok(Self::with_protocol(
            flags,
            protocol,
            algorithm,
            parse_rest(parser),
        ))
    }
}

//--- ParseRecordData, ComposeRecordData

impl<'a, Octs: AsRef<[u8]> + ?Sized> ParseRecordData<'a, Octs> for Dnskey {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser<'a, Octs>,
    ) -> Result<Option<Self>, ParseError> {
        if rtype == Dnskey::RTYPE {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeRecordData for Dnskey {
    fn rtype(&self) -> Rtype {
        Dnskey::RTYPE
    }

    fn rdlen(&self, _compress: bool) -> Option<u16> {
        u16::try_from(self.public_key.len())
            .ok()?
            .checked_add(
                u16::COMPOSE_LEN + u8::COMPOSE_LEN + SecAlg::COMPOSE_LEN,
            )
    }

    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        self.flags.compose(target)?;
        self.protocol.compose(target)?;
        self.algorithm.compose(target)?;
        target.append_slice(&self.public_key)
    }
}

//--- Display

impl fmt::Display for Dnskey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {} ", self.flags, self.protocol, self.algorithm)?;
        base64::display(&self.public_key, f)
    }
}

//------------ Ds -----------------------------------------------------------

/// DS record data.
///
/// The DS record refers to a DNSKEY record in the child zone by its key
/// tag, algorithm, and a digest of the key. The length of the digest isn’t
/// part of the wire format but follows from the digest type. Data with a
/// digest type of unknown length can therefore not be parsed.
///
/// The DS record type is defined in [RFC 4034, section 5].
///
/// [RFC 4034, section 5]: https://tools.ietf.org/html/rfc4034#section-5
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ds {
    key_tag: u16,
    algorithm: SecAlg,
    digest_type: DigestAlg,
    #[cfg_attr(feature = "serde", serde(with = "crate::utils::base16::serde"))]
    digest: Vec<u8>,
}

impl Ds {
    /// The rtype of this record data type.
    pub(crate) const RTYPE: Rtype = Rtype::DS;

    /// Creates new DS record data from its components.
    ///
    /// The length of `digest` is not checked against the digest type.
    #[must_use]
    pub fn new(
        key_tag: u16,
        algorithm: SecAlg,
        digest_type: DigestAlg,
        digest: Vec<u8>,
    ) -> Self {
        Ds {
            key_tag,
            algorithm,
            digest_type,
            digest,
        }
    }

    #[must_use]
    pub fn key_tag(&self) -> u16 {
        self.key_tag
    }

    #[must_use]
    pub fn algorithm(&self) -> SecAlg {
        self.algorithm
    }

    #[must_use]
    pub fn digest_type(&self) -> DigestAlg {
        self.digest_type
    }

    #[must_use]
    pub fn digest(&self) -> &[u8] {
        &self.digest
    }

    pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<Octs>,
    ) -> Result<Self, ParseError> {
        let key_tag = u16::parse(parser)?;
        let algorithm = SecAlg::parse(parser)?;
        let digest_type = DigestAlg::parse(parser)?;
        let len = digest_type
            .digest_len()
            .ok_or_else(|| ParseError::unsupported("digest type"))?;
        Ok(Self::new(
            key_tag,
            algorithm,
            digest_type,
            parse_vec(parser, len)?,
        ))
    }
}

//--- ParseRecordData, ComposeRecordData

impl<'a, Octs: AsRef<[u8]> + ?Sized> ParseRecordData<'a, Octs> for Ds {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser<'a, Octs>,
    ) -> Result<Option<Self>, ParseError> {
        if rtype == Ds::RTYPE {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeRecordData for Ds {
    fn rtype(&self) -> Rtype {
        Ds::RTYPE
    }

    fn rdlen(&self, _compress: bool) -> Option<u16> {
        u16::try_from(self.digest.len()).ok()?.checked_add(
            u16::COMPOSE_LEN + SecAlg::COMPOSE_LEN + DigestAlg::COMPOSE_LEN,
        )
    }

    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        self.key_tag.compose(target)?;
        self.algorithm.compose(target)?;
        self.digest_type.compose(target)?;
        target.append_slice(&self.digest)
    }
}

//--- Display

impl fmt::Display for Ds {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} ",
            self.key_tag, self.algorithm, self.digest_type
        )?;
        base16::display(&self.digest, f)
    }
}

//------------ Timestamp -----------------------------------------------------

/// The signature expiration or inception time of an RRSIG record.
///
/// On the wire this is a 32 bit number of seconds since the Unix epoch,
/// see [RFC 4034, section 3.1.5]. The presentation format is the UTC date
/// as `YYYYMMDDHHmmSS`. A plain number of seconds is accepted when reading.
///
/// [RFC 4034, section 3.1.5]: https://tools.ietf.org/html/rfc4034#section-3.1.5
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(u32);

impl Timestamp {
    pub const COMPOSE_LEN: u16 = u32::COMPOSE_LEN;

    #[must_use]
    pub fn into_int(self) -> u32 {
        self.0
    }

    pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<Octs>,
    ) -> Result<Self, ParseError> {
        u32::parse(parser).map(Self)
    }

    pub fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        self.0.compose(target)
    }
}

impl From<u32> for Timestamp {
    fn from(secs: u32) -> Self {
        Self(secs)
    }
}

impl FromStr for Timestamp {
    type Err = IllegalSignatureTime;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        if src.is_empty() || !src.bytes().all(|ch| ch.is_ascii_digit()) {
            return Err(IllegalSignatureTime(()));
        }
        let secs = if src.len() == 14 {
            PrimitiveDateTime::parse(src, SIGNATURE_TIME)
                .map_err(|_| IllegalSignatureTime(()))?
                .assume_utc()
                .unix_timestamp()
        } else {
            src.parse().map_err(|_| IllegalSignatureTime(()))?
        };
        u32::try_from(secs)
            .map(Self)
            .map_err(|_| IllegalSignatureTime(()))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = OffsetDateTime::from_unix_timestamp(i64::from(self.0))
            .ok()
            .and_then(|time| time.format(SIGNATURE_TIME).ok())
            .ok_or(fmt::Error)?;
        f.write_str(&text)
    }
}

//------------ Rrsig ---------------------------------------------------------

/// RRSIG record data.
///
/// The RRSIG record holds a signature over a record set. The signer’s name
/// is never compressed since the signature is calculated over the
/// uncompressed data. The signature extends to the end of the record data
/// and must not be empty.
///
/// The RRSIG record type is defined in [RFC 4034, section 3].
///
/// [RFC 4034, section 3]: https://tools.ietf.org/html/rfc4034#section-3
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rrsig {
    type_covered: Rtype,
    algorithm: SecAlg,
    labels: u8,
    original_ttl: i32,
    expiration: Timestamp,
    inception: Timestamp,
    key_tag: u16,
    signer_name: Name,
    #[cfg_attr(feature = "serde", serde(with = "crate::utils::base64::serde"))]
    signature: Vec<u8>,
}

impl Rrsig {
    /// The rtype of this record data type.
    pub(crate) const RTYPE: Rtype = Rtype::RRSIG;

    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        type_covered: Rtype,
        algorithm: SecAlg,
        labels: u8,
        original_ttl: i32,
        expiration: Timestamp,
        inception: Timestamp,
        key_tag: u16,
        signer_name: Name,
        signature: Vec<u8>,
    ) -> Self {
        Rrsig {
            type_covered,
            algorithm,
            labels,
            original_ttl,
            expiration,
            inception,
            key_tag,
            signer_name,
            signature,
        }
    }

    #[must_use]
    pub fn type_covered(&self) -> Rtype {
        self.type_covered
    }

    #[must_use]
    pub fn algorithm(&self) -> SecAlg {
        self.algorithm
    }

    #[must_use]
    pub fn labels(&self) -> u8 {
        self.labels
    }

    #[must_use]
    pub fn original_ttl(&self) -> i32 {
        self.original_ttl
    }

    #[must_use]
    pub fn expiration(&self) -> Timestamp {
        self.expiration
    }

    #[must_use]
    pub fn inception(&self) -> Timestamp {
        self.inception
    }

    #[must_use]
    pub fn key_tag(&self) -> u16 {
        self.key_tag
    }

    #[must_use]
    pub fn signer_name(&self) -> &Name {
        &self.signer_name
    }

    #[must_use]
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<Octs>,
    ) -> Result<Self, ParseError> {
        let type_covered = Rtype::parse(parser)?;
        let algorithm = SecAlg::parse(parser)?;
        let labels = u8::parse(parser)?;
        let original_ttl = i32::parse(parser)?;
        let expiration = Timestamp::parse(parser)?;
        let inception = Timestamp::parse(parser)?;
        let key_tag = u16::parse(parser)?;
        let signer_name = Name::parse(parser)?;
        if parser.remaining() == 0 {
            return Err(ParseError::form_error("no signature data"));
        }
        Ok(Self::new(
            type_covered,
            algorithm,
            labels,
            original_ttl,
            expiration,
            inception,
            key_tag,
            signer_name,
            parse_rest(parser),
        ))
    }
}

//--- ParseRecordData, ComposeRecordData

impl<'a, Octs: AsRef<[u8]> + ?Sized> ParseRecordData<'a, Octs> for Rrsig {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser<'a, Octs>,
    ) -> Result<Option<Self>, ParseError> {
        if rtype == Rrsig::RTYPE {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeRecordData for Rrsig {
    fn rtype(&self) -> Rtype {
        Rrsig::RTYPE
    }

    fn rdlen(&self, _compress: bool) -> Option<u16> {
        let fixed = Rtype::COMPOSE_LEN
            + SecAlg::COMPOSE_LEN
            + u8::COMPOSE_LEN
            + i32::COMPOSE_LEN
            + Timestamp::COMPOSE_LEN
            + Timestamp::COMPOSE_LEN
            + u16::COMPOSE_LEN;
        u16::try_from(self.signer_name.len() + self.signature.len())
            .ok()?
            .checked_add(fixed)
    }

    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        self.type_covered.compose(target)?;
        self.algorithm.compose(target)?;
        self.labels.compose(target)?;
        self.original_ttl.compose(target)?;
        self.expiration.compose(target)?;
        self.inception.compose(target)?;
        self.key_tag.compose(target)?;
        self.signer_name.compose(target)?;
        target.append_slice(&self.signature)
    }
}

//--- Display

impl fmt::Display for Rrsig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {} {} ",
            self.type_covered,
            self.algorithm,
            self.labels,
            self.original_ttl,
            self.expiration,
            self.inception,
            self.key_tag,
            self.signer_name
        )?;
        base64::display(&self.signature, f)
    }
}

//------------ RtypeBitmap ---------------------------------------------------

/// The set of record types present at a name.
///
/// The bitmap is kept in its wire format defined in [RFC 4034, section
/// 4.1.2]: a sequence of windows, each consisting of the window number, the
/// length of the bitmap in octets between 1 and 32, and the bitmap itself.
/// Windows appear in increasing order.
///
/// [RFC 4034, section 4.1.2]: https://tools.ietf.org/html/rfc4034#section-4.1.2
#[derive(Clone, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RtypeBitmap(Vec<u8>);

impl RtypeBitmap {
    /// Creates a bitmap from its wire format.
    pub fn from_octets(octets: Vec<u8>) -> Result<Self, RtypeBitmapError> {
        let mut data = octets.as_slice();
        let mut last = None;
        while !data.is_empty() {
            // At least bitmap number and length must be present.
            if data.len() < 2 {
                return Err(RtypeBitmapError::ShortInput);
            }
            // https://tools.ietf.org/html/rfc4034#section-4.1.2:
            //  Blocks with no types present MUST NOT be included.
            let len = usize::from(data[1]);
            if len == 0 || len > 32 {
                return Err(RtypeBitmapError::BadWindow);
            }
            if last.map(|last| last >= data[0]).unwrap_or(false) {
                return Err(RtypeBitmapError::BadWindow);
            }
            if data.len() < len + 2 {
                return Err(RtypeBitmapError::ShortInput);
            }
            last = Some(data[0]);
            data = &data[len + 2..];
        }
        Ok(RtypeBitmap(octets))
    }

    /// Creates a bitmap containing the given record types.
    pub fn from_types(types: impl IntoIterator<Item = Rtype>) -> Self {
        let types: BTreeSet<u16> =
            types.into_iter().map(Rtype::to_int).collect();
        let mut res = Vec::new();
        let mut window: Option<(u8, [u8; 32], usize)> = None;
        for rtype in types {
            let (block, octet, mask) = split_rtype(rtype);
            if window.map(|(current, _, _)| current) != Some(block) {
                if let Some((block, bits, len)) = window.take() {
                    push_window(&mut res, block, &bits[..len]);
                }
                window = Some((block, [0; 32], 0));
            }
            if let Some((_, ref mut bits, ref mut len)) = window {
                bits[octet] |= mask;
                *len = core::cmp::max(*len, octet + 1);
            }
        }
        if let Some((block, bits, len)) = window {
            push_window(&mut res, block, &bits[..len]);
        }
        RtypeBitmap(res)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the record types in increasing order.
    pub fn iter(&self) -> impl Iterator<Item = Rtype> + '_ {
        iter_windows(&self.0).flat_map(|(block, bits)| {
            bits.iter().enumerate().flat_map(move |(octet, &byte)| {
                (0..8u16)
                    .filter(move |bit| byte & (0x80 >> bit) != 0)
                    .map(move |bit| {
                        Rtype::from_int(
                            u16::from(block) << 8 | (octet as u16) << 3 | bit,
                        )
                    })
            })
        })
    }

    #[must_use]
    pub fn contains(&self, rtype: Rtype) -> bool {
        let (block, octet, mask) = split_rtype(rtype.to_int());
        iter_windows(&self.0)
            .find(|(window, _)| *window == block)
            .and_then(|(_, bits)| bits.get(octet))
            .map(|byte| byte & mask != 0)
            .unwrap_or(false)
    }

    /// Parses a bitmap extending to the end of the parser.
    pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<Octs>,
    ) -> Result<Self, ParseError> {
        Self::from_octets(parse_rest(parser)).map_err(Into::into)
    }

    #[must_use]
    pub fn compose_len(&self) -> usize {
        self.0.len()
    }

    pub fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        target.append_slice(&self.0)
    }
}

/// Splits an rtype value into window number, octet, and bit mask.
fn split_rtype(rtype: u16) -> (u8, usize, u8) {
    let [block, low] = rtype.to_be_bytes();
    (block, usize::from(low >> 3), 0x80 >> (low & 0x07))
}

fn push_window(target: &mut Vec<u8>, block: u8, bits: &[u8]) {
    target.push(block);
    target.push(bits.len() as u8);
    target.extend_from_slice(bits);
}

/// Iterates over the windows of a validated bitmap.
fn iter_windows(data: &[u8]) -> impl Iterator<Item = (u8, &[u8])> {
    let mut data = data;
    core::iter::from_fn(move || {
        let (&block, rest) = data.split_first()?;
        let (&len, rest) = rest.split_first()?;
        let len = core::cmp::min(usize::from(len), rest.len());
        let (bits, rest) = rest.split_at(len);
        data = rest;
        Some((block, bits))
    })
}

//--- IntoIterator

impl<'a> IntoIterator for &'a RtypeBitmap {
    type Item = Rtype;
    type IntoIter = std::boxed::Box<dyn Iterator<Item = Rtype> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        std::boxed::Box::new(self.iter())
    }
}

//--- Display and Debug

impl fmt::Display for RtypeBitmap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut iter = self.iter();
        if let Some(rtype) = iter.next() {
            rtype.fmt(f)?;
        }
        for rtype in iter {
            write!(f, " {}", rtype)?
        }
        Ok(())
    }
}

impl fmt::Debug for RtypeBitmap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("RtypeBitmap(")?;
        fmt::Display::fmt(self, f)?;
        f.write_str(")")
    }
}

//============ Error Types ===================================================

//------------ RtypeBitmapError ----------------------------------------------

/// The wire format of a record type bitmap is invalid.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RtypeBitmapError {
    /// A window was cut short.
    ShortInput,

    /// A window was empty, too long, or out of order.
    BadWindow,
}

impl From<RtypeBitmapError> for ParseError {
    fn from(err: RtypeBitmapError) -> ParseError {
        match err {
            RtypeBitmapError::ShortInput => ParseError::ShortInput,
            RtypeBitmapError::BadWindow => {
                FormError::new("invalid NSEC bitmap").into()
            }
        }
    }
}

impl fmt::Display for RtypeBitmapError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            RtypeBitmapError::ShortInput => ParseError::ShortInput.fmt(f),
            RtypeBitmapError::BadWindow => f.write_str("invalid bitmap"),
        }
    }
}

impl std::error::Error for RtypeBitmapError {}

//------------ IllegalSignatureTime ------------------------------------------

/// An illegal time value was encountered.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct IllegalSignatureTime(());

impl fmt::Display for IllegalSignatureTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("illegal signature time")
    }
}

impl std::error::Error for IllegalSignatureTime {}

//============ Testing =======================================================
