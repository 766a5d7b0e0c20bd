//! Resource records.
//!
//! This module defines the [`Record`] type, the envelope around record
//! data. A record carries its owner name, class, and TTL and the record
//! data itself. The record type is not kept separately but always taken
//! from the data, so a record can never claim a type its data doesn’t
//! have.

use super::iana::{Class, Rtype};
use super::name::Name;
use super::rdata::ComposeRecordData;
use super::wire::{Compose, Composer, FormError, Parse, ParseError};
use crate::rdata::RecordData;
use core::{fmt, hash};
use octseq::parse::Parser;

//------------ Record --------------------------------------------------------

/// A DNS resource record.
///
/// All information available through the DNS is stored in resource records.
/// They have a three part key of a domain name, resource record type, and
/// class. The domain name is called the *owner* of the record. For each
/// key there can be multiple records which together form a *record set.*
///
/// The TTL or time to live says how long a record remains valid before it
/// should be refreshed from its original source. Since it doesn’t change
/// the information a record carries, the TTL is ignored when comparing
/// records.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record {
    /// The domain name owning the record.
    owner: Name,

    /// The class of the record.
    class: Class,

    /// The time-to-live value of the record.
    ttl: i32,

    /// The record data. The value also specifies the record’s type.
    data: RecordData,
}

/// # Creation and Element Access
///
impl Record {
    /// Creates a new record from its parts.
    #[must_use]
    pub fn new(
        owner: Name,
        class: Class,
        ttl: i32,
        data: impl Into<RecordData>,
    ) -> Self {
        Record {
            owner,
            class,
            ttl,
            data: data.into(),
        }
    }

    /// Returns a reference to the owner domain name.
    #[must_use]
    pub fn owner(&self) -> &Name {
        &self.owner
    }

    /// Returns the record type.
    #[must_use]
    pub fn rtype(&self) -> Rtype {
        self.data.rtype()
    }

    #[must_use]
    pub fn class(&self) -> Class {
        self.class
    }

    pub fn set_class(&mut self, class: Class) {
        self.class = class
    }

    #[must_use]
    pub fn ttl(&self) -> i32 {
        self.ttl
    }

    pub fn set_ttl(&mut self, ttl: i32) {
        self.ttl = ttl
    }

    #[must_use]
    pub fn data(&self) -> &RecordData {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut RecordData {
        &mut self.data
    }

    #[must_use]
    pub fn into_data(self) -> RecordData {
        self.data
    }

    /// Trades the record for its owner name and data.
    #[must_use]
    pub fn into_owner_and_data(self) -> (Name, RecordData) {
        (self.owner, self.data)
    }
}

/// # Parsing and Composing
///
impl Record {
    /// Parses a record.
    ///
    /// The record data is parsed from a sub-parser limited to the record
    /// data length given in the record header, so no record data type can
    /// read beyond its data. Compression pointers may still point into the
    /// octets before the record. Data left over after parsing the record
    /// data is an error.
    pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<Octs>,
    ) -> Result<Self, ParseError> {
        let owner = Name::parse(parser)?;
        let rtype = Rtype::parse(parser)?;
        let class = Class::parse(parser)?;
        let ttl = i32::parse(parser)?;
        let rdlen = u16::parse(parser)?;
        let mut data_parser = parser.parse_parser(usize::from(rdlen))?;
        let data = RecordData::parse(rtype, &mut data_parser)?;
        if data_parser.remaining() > 0 {
            return Err(FormError::new("trailing data in record").into());
        }
        Ok(Record::new(owner, class, ttl, data))
    }

    /// Appends the wire format of the record to `target`.
    ///
    /// The owner and names in the record data are compressed if the target
    /// supports it. If the length of the record data isn’t known
    /// beforehand, it is filled in once the data has been composed.
    pub fn compose<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        target.append_compressed_name(&self.owner)?;
        self.rtype().compose(target)?;
        self.class.compose(target)?;
        self.ttl.compose(target)?;
        self.data.compose_len_rdata(target)
    }
}

//--- From

impl<D: Into<RecordData>> From<(Name, Class, i32, D)> for Record {
    fn from((owner, class, ttl, data): (Name, Class, i32, D)) -> Self {
        Self::new(owner, class, ttl, data)
    }
}

//--- PartialEq and Eq

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner
            && self.class == other.class
            && self.data == other.data
    }
}

impl Eq for Record {}

//--- Hash

impl hash::Hash for Record {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.owner.hash(state);
        self.class.hash(state);
        self.data.hash(state);
    }
}

//--- Display

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{} {}",
            self.owner,
            self.class,
            self.ttl,
            self.rtype(),
            self.data
        )
    }
}

//============ Testing =======================================================
