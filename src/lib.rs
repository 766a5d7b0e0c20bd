//! DNS resource records.
//!
//! This crate provides the building blocks for dealing with DNS resource
//! records: converting them from and to their wire format, comparing and
//! grouping them, and reading them from zone files.
//!
//! # Modules
//!
//! * [base] contains the fundamental types: domain names, the IANA
//!   registries, the record envelope, record sets, and the traits for
//!   parsing and composing wire data,
//! * [rdata] contains the record data of all supported record types and the
//!   [`RecordData`][rdata::RecordData] enum collecting them,
//! * [utils] contains the text encodings used by the presentation format.
//!
#![cfg_attr(feature = "zonefile", doc = "* [zonefile]:")]
#![cfg_attr(not(feature = "zonefile"), doc = "* zonefile:")]
//!   A lexer and a reader for zone files.
//!
//! # Reference of Feature Flags
//!
//! * `bytes`: Enables packing record sets into
//!   [`Bytes`](https://docs.rs/bytes/) values.
//! * `serde`: Enables serialization and deserialization via
//!   [serde](https://serde.rs/) for record data and the zone file reader
//!   options.
//! * `zonefile`: reading of zone files. This feature enables the
#![cfg_attr(feature = "zonefile", doc = "  [zonefile]")]
#![cfg_attr(not(feature = "zonefile"), doc = "  zonefile")]
//!   module and also enables the `bytes` feature. It is enabled
//!   by default.

#![allow(renamed_and_removed_lints)]
#![allow(clippy::unknown_clippy_lints)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod base;
pub mod rdata;
pub mod utils;
#[cfg(feature = "zonefile")]
pub mod zonefile;
