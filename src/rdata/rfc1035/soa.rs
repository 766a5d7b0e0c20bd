//! Record data for the SOA record.
//!
//! This is a private module. It’s content is re-exported by the parent.

use crate::base::iana::Rtype;
use crate::base::name::Name;
use crate::base::rdata::{ComposeRecordData, ParseRecordData};
use crate::base::wire::{Compose, Composer, Parse, ParseError};
use core::fmt;
use octseq::parse::Parser;

//------------ Soa ----------------------------------------------------------

/// Soa record data.
///
/// Soa records mark the top of a zone and contain information pertinent to
/// name server maintenance operations.
///
/// The Soa record type is defined in RFC 1035, section 3.3.13.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Soa {
    mname: Name,
    rname: Name,
    serial: u32,
    refresh: u32,
    retry: u32,
    expire: u32,
    minimum: u32,
}

impl Soa {
    /// The rtype of this record data type.
    pub(crate) const RTYPE: Rtype = Rtype::SOA;

    /// Creates new Soa record data from content.
    #[must_use]
    pub fn new(
        mname: Name,
        rname: Name,
        serial: u32,
        refresh: u32,
        retry: u32,
        expire: u32,
        minimum: u32,
    ) -> Self {
        Soa {
            mname,
            rname,
            serial,
            refresh,
            retry,
            expire,
            minimum,
        }
    }

    /// The primary name server for the zone.
    #[must_use]
    pub fn mname(&self) -> &Name {
        &self.mname
    }

    /// The mailbox for the person responsible for this zone.
    #[must_use]
    pub fn rname(&self) -> &Name {
        &self.rname
    }

    /// The serial number of the original copy of the zone.
    #[must_use]
    pub fn serial(&self) -> u32 {
        self.serial
    }

    /// The time interval before the zone should be refreshed.
    #[must_use]
    pub fn refresh(&self) -> u32 {
        self.refresh
    }

    /// The time before a failed refresh is retried.
    #[must_use]
    pub fn retry(&self) -> u32 {
        self.retry
    }

    /// The upper limit of time the zone is authoritative.
    #[must_use]
    pub fn expire(&self) -> u32 {
        self.expire
    }

    /// The minimum TTL to be exported with any RR from this zone.
    #[must_use]
    pub fn minimum(&self) -> u32 {
        self.minimum
    }

    /// Parses the record data.
    ///
    /// Every field is checked right after it has been read, so a short
    /// timer field fails the whole record.
    pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<Octs>,
    ) -> Result<Self, ParseError> {
        Ok(Self::new(
            Name::parse(parser)?,
            Name::parse(parser)?,
            u32::parse(parser)?,
            u32::parse(parser)?,
            u32::parse(parser)?,
            u32::parse(parser)?,
            u32::parse(parser)?,
        ))
    }
}

//--- ParseRecordData, ComposeRecordData

impl<'a, Octs: AsRef<[u8]> + ?Sized> ParseRecordData<'a, Octs> for Soa {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser<'a, Octs>,
    ) -> Result<Option<Self>, ParseError> {
        if rtype == Soa::RTYPE {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeRecordData for Soa {
    fn rtype(&self) -> Rtype {
        Soa::RTYPE
    }

    fn rdlen(&self, compress: bool) -> Option<u16> {
        if compress {
            None
        } else {
            Some(
                self.mname.len() as u16
                    + self.rname.len() as u16
                    + 5 * u32::COMPOSE_LEN,
            )
        }
    }

    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        target.append_compressed_name(&self.mname)?;
        target.append_compressed_name(&self.rname)?;
        self.serial.compose(target)?;
        self.refresh.compose(target)?;
        self.retry.compose(target)?;
        self.expire.compose(target)?;
        self.minimum.compose(target)
    }
}

//--- Display

impl fmt::Display for Soa {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {}",
            self.mname,
            self.rname,
            self.serial,
            self.refresh,
            self.retry,
            self.expire,
            self.minimum
        )
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::rdata::test::{test_compose_parse, test_rdlen};
    use core::str::FromStr;
    use octseq::builder::infallible;

    fn soa() -> Soa {
        Soa::new(
            Name::from_str("m.example.com").unwrap(),
            Name::from_str("r.example.com").unwrap(),
            11,
            12,
            13,
            14,
            15,
        )
    }

    #[test]
    fn soa_compose_parse() {
        let rdata = soa();
        test_rdlen(&rdata);
        test_compose_parse(&rdata, Soa::parse);
        assert_eq!(
            rdata.to_string(),
            "m.example.com. r.example.com. 11 12 13 14 15"
        );
    }

    #[test]
    fn soa_truncated_timer() {
        // Every possible truncation within the timers must fail.
        let mut buf = Vec::new();
        infallible(soa().compose_rdata(&mut buf));
        for len in buf.len() - 20..buf.len() {
            assert_eq!(
                Soa::parse(&mut Parser::from_ref(&buf[..len])),
                Err(ParseError::ShortInput)
            );
        }
    }
}
