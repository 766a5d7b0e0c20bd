//! Record data for negative caching.
//!
//! The NODATA and NXDOMAIN types never appear in DNS messages. They use
//! record types from the private use range so that a cache can keep
//! negative answers alongside ordinary records.

use crate::base::iana::Rtype;
use crate::base::rdata::{ComposeRecordData, ParseRecordData};
use crate::base::wire::{Composer, ParseError};
use core::fmt;
use octseq::parse::Parser;

//------------ Nodata --------------------------------------------------------

/// NODATA record data.
///
/// Records that the owner exists but has no records of the covered type.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Nodata {
    covered: Rtype,
}

impl Nodata {
    /// The rtype of this record data type.
    pub(crate) const RTYPE: Rtype = Rtype::NODATA;

    #[must_use]
    pub fn new(covered: Rtype) -> Self {
        Nodata { covered }
    }

    /// The record type that is known not to exist.
    #[must_use]
    pub fn covered(&self) -> Rtype {
        self.covered
    }

    pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<Octs>,
    ) -> Result<Self, ParseError> {
        Rtype::parse(parser).map(Self::new)
    }
}

impl<'a, Octs: AsRef<[u8]> + ?Sized> ParseRecordData<'a, Octs> for Nodata {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser<'a, Octs>,
    ) -> Result<Option<Self>, ParseError> {
        if rtype == Nodata::RTYPE {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeRecordData for Nodata {
    fn rtype(&self) -> Rtype {
        Nodata::RTYPE
    }

    fn rdlen(&self, _compress: bool) -> Option<u16> {
        Some(Rtype::COMPOSE_LEN)
    }

    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        self.covered.compose(target)
    }
}

impl fmt::Display for Nodata {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.covered.fmt(f)
    }
}

//------------ Nxdomain ------------------------------------------------------

/// NXDOMAIN record data.
///
/// Records that the owner does not exist. The data is empty.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Nxdomain;

impl Nxdomain {
    /// The rtype of this record data type.
    pub(crate) const RTYPE: Rtype = Rtype::NXDOMAIN;

    #[must_use]
    pub fn new() -> Self {
        Nxdomain
    }

    pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
        _parser: &mut Parser<Octs>,
    ) -> Result<Self, ParseError> {
        Ok(Nxdomain)
    }
}

impl<'a, Octs: AsRef<[u8]> + ?Sized> ParseRecordData<'a, Octs>
    for Nxdomain
{
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser<'a, Octs>,
    ) -> Result<Option<Self>, ParseError> {
        if rtype == Nxdomain::RTYPE {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeRecordData for Nxdomain {
    fn rtype(&self) -> Rtype {
        Nxdomain::RTYPE
    }

    fn rdlen(&self, _compress: bool) -> Option<u16> {
        Some(0)
    }

    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        _target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        Ok(())
    }
}

impl fmt::Display for Nxdomain {
    fn fmt(&self, _f: &mut fmt::Formatter) -> fmt::Result {
        Ok(())
    }
}

//============ Testing =======================================================
