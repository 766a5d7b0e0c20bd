//! Record data implementations.
//!
//! This module contains the record data types for all record types the
//! crate understands. The types are named after the record type they
//! implement, using the mnemonic in CamelCase, so the data of AAAA records
//! lives in [`Aaaa`]. Data types are grouped into submodules, mostly by the
//! RFC they are defined in, but all of them are re-exported here.
//!
//! The [`RecordData`] enum collects all these types plus a catch-all for
//! data of other record types.

#[macro_use]
mod macros;

mod address;
pub mod rfc1035;
mod dnssec;
mod negative;
mod nsec3;

pub use self::dnssec::{
    IllegalSignatureTime, RtypeBitmap, RtypeBitmapError, Timestamp,
};
pub use self::nsec3::{Nsec3Salt, Nsec3SaltError, OwnerHash, OwnerHashError};

rdata_types! {
    address::{
        A,
        Aaaa,
    }
    rfc1035::{
        Cname,
        Mx,
        Ns,
        Ptr,
        Soa,
        Txt,
    }
    dnssec::{
        Dnskey,
        Ds,
        Rrsig,
    }
    nsec3::{
        Nsec3,
        Nsec3param,
    }
    negative::{
        Nodata,
        Nxdomain,
    }
}

//============ Testing =======================================================
