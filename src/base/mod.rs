//! Basics.
//!
//! This module provides the types and traits for DNS resource records in
//! their wire format: domain names, character strings, the IANA registries
//! needed by record data, the record envelope, and record sets.
//!
//! # Parsing and Composing
//!
//! We use the term *parsing* for extracting data from its wire-format
//! representation and *composing* for producing such a representation.
//! Reading from or writing to the zone file format is not called parsing
//! to keep the two apart.
//!
//! Parsing happens on an [`octseq::parse::Parser`] that covers a complete
//! message or a sequence of records, since compressed domain names may
//! refer to data earlier in the message. Composing happens into any
//! [`Composer`][wire::Composer]. Wrapping the target into a
//! [`Compressor`][compress::Compressor] enables name compression.
//!
//! The types are arranged in submodules:
//!
//! * [charstr] for DNS character strings,
//! * [compress] for name compression,
//! * [iana] for the IANA registries,
//! * [name] for domain names,
//! * [rdata] for the traits implemented by record data,
//! * [record] for resource records,
//! * [rrset] for sets of records, and
//! * [wire] for the basic parsing and composing machinery.

pub use self::charstr::CharStr;
pub use self::compress::Compressor;
pub use self::iana::{Class, DigestAlg, Nsec3HashAlg, Rtype, SecAlg};
pub use self::name::Name;
pub use self::rdata::{
    ComposeRecordData, ParseRecordData, UnknownRecordData,
};
pub use self::record::Record;
pub use self::rrset::{Partition, RecordSet};
pub use self::wire::{Composer, ParseError};

pub mod charstr;
pub mod compress;
#[macro_use]
pub mod iana;
pub mod name;
pub mod rdata;
pub mod record;
pub mod rrset;
pub mod wire;
