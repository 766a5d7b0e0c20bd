//! Resource record data.
//!
//! Each resource record type has its own definition of the content and
//! formatting of its data. This module provides the traits that all these
//! types implement so the record envelope and the record data enum in
//! [`crate::rdata`] can treat them uniformly.

use super::iana::Rtype;
use super::wire::{
    compose_len_prefixed, parse_rest, Compose, Composer, ParseError,
};
use core::fmt;
use octseq::parse::Parser;
use std::vec::Vec;

//------------ ComposeRecordData ---------------------------------------------

/// A type of record data that can be composed.
pub trait ComposeRecordData {
    /// Returns the record type associated with this record data instance.
    ///
    /// This is a method rather than an associated constant because the
    /// data enum and the data of unknown types only know their type at
    /// run time.
    fn rtype(&self) -> Rtype;

    /// Returns the length of the record data if available.
    ///
    /// The method should return `None`, if the length is not known or is
    /// not the same for all targets.
    ///
    /// If `compress` is `true`, name compression is available in the
    /// target. If name compression would be used in `compose_rdata`, the
    /// method should `None` if `compress` is `true` since it can’t know
    /// the final size.
    fn rdlen(&self, compress: bool) -> Option<u16>;

    /// Appends the wire format of the record data into `target`.
    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError>;

    /// Appends the record data prefixed with its length.
    fn compose_len_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        if let Some(rdlen) = self.rdlen(target.can_compress()) {
            rdlen.compose(target)?;
            self.compose_rdata(target)
        } else {
            compose_len_prefixed(target, |target| {
                self.compose_rdata(target)
            })
        }
    }
}

//------------ ParseRecordData -----------------------------------------------

/// A record data type that can be parsed from a message.
///
/// When record data types are generic – typically over a octets type –, the
/// wire format trait only really makes sense for the concrete type. This
/// trait is therefore implemented for every record data type with the
/// type selected at run time through `rtype`.
pub trait ParseRecordData<'a, Octs: ?Sized>: Sized {
    /// Parses the record data.
    ///
    /// The record data is for a record of type `rtype`. The function may
    /// decide whether it wants to parse data for that type. It should return
    /// `Ok(None)` if it doesn’t.
    ///
    /// The `parser` is positioned at the beginning of the record data and
    /// is is limited to the length of the data. The method only needs to
    /// parse as much data as it needs. The caller has to make sure to deal
    /// with data remaining in the parser.
    ///
    /// If the function doesn’t want to process the data, it must not touch
    /// the parser. In particual, it must not advance it.
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser<'a, Octs>,
    ) -> Result<Option<Self>, ParseError>;
}

//------------ UnknownRecordData ---------------------------------------------

/// A type for parsing any type of record data.
///
/// This type accepts any record type and stores the plain, unparsed record
/// data as an octets sequence. It is used for all record types this crate
/// doesn’t implement so that their data survives parsing and composing
/// unchanged.
///
/// The octets are copied out of the message when parsing.
///
/// The presentation format is the generic format defined in [RFC 3597],
/// `\#` followed by the length of the data and the data in hex digits.
///
/// [RFC 3597]: https://tools.ietf.org/html/rfc3597
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnknownRecordData {
    /// The record type of this data.
    rtype: Rtype,

    /// The record data.
    #[cfg_attr(feature = "serde", serde(with = "crate::utils::base16::serde"))]
    data: Vec<u8>,
}

impl UnknownRecordData {
    /// Creates generic record data from an octets sequence.
    ///
    /// The function will fail if `data` is longer than 65,535 octets.
    pub fn from_octets(
        rtype: Rtype,
        data: Vec<u8>,
    ) -> Result<Self, LongRecordData> {
        LongRecordData::check_len(data.len())?;
        Ok(UnknownRecordData { rtype, data })
    }

    /// Returns the record type this data is for.
    #[must_use]
    pub fn rtype(&self) -> Rtype {
        self.rtype
    }

    /// Returns a reference to the record data.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Parses any record type as unknown record data.
    ///
    /// This takes all the remaining octets of the parser, so it must be
    /// limited to exactly the record data.
    pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
        rtype: Rtype,
        parser: &mut Parser<Octs>,
    ) -> Result<Self, ParseError> {
        let data = parse_rest(parser);
        // The parser can’t be longer than 65,535 octets if it came from a
        // record but may have been created from anything.
        LongRecordData::check_len(data.len())
            .map_err(|_| ParseError::form_error("long record data"))?;
        Ok(UnknownRecordData { rtype, data })
    }
}

//--- ComposeRecordData and ParseRecordData

impl ComposeRecordData for UnknownRecordData {
    fn rtype(&self) -> Rtype {
        self.rtype
    }

    fn rdlen(&self, _compress: bool) -> Option<u16> {
        Some(self.data.len() as u16)
    }

    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        target.append_slice(&self.data)
    }
}

impl<'a, Octs: AsRef<[u8]> + ?Sized> ParseRecordData<'a, Octs>
    for UnknownRecordData
{
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser<'a, Octs>,
    ) -> Result<Option<Self>, ParseError> {
        Self::parse(rtype, parser).map(Some)
    }
}

//--- Display

impl fmt::Display for UnknownRecordData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\\# {}", self.data.len())?;
        for ch in &self.data {
            write!(f, " {:02x}", *ch)?
        }
        Ok(())
    }
}

//------------ LongRecordData ------------------------------------------------

/// The octets sequence to be used for record data is too long.
///
/// Record data is limited to 65535 octets by the two octet length field of
/// the record envelope.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LongRecordData(());

impl LongRecordData {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        "record data too long"
    }

    /// Checks that record data of length `len` fits into a record.
    pub fn check_len(len: usize) -> Result<(), Self> {
        if len > usize::from(u16::MAX) {
            Err(Self(()))
        } else {
            Ok(())
        }
    }
}

impl fmt::Display for LongRecordData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::error::Error for LongRecordData {}

//============ Testing =======================================================
