//! IANA registries for resource record fields.
//!
//! Each registry is a newtype around the raw integer with an associated
//! constant per assigned value. Values without a constant are still valid
//! and are carried through unchanged.
//!
//! All types convert from and to the integer via `from_int`, `to_int`, and
//! `From`. They read and write their presentation format through `FromStr`
//! and `Display` and have `parse` and `compose` for the wire format.

use core::fmt;
use core::str::FromStr;

pub use self::class::Class;
pub use self::digestalg::DigestAlg;
pub use self::nsec3::Nsec3HashAlg;
pub use self::rtype::Rtype;
pub use self::secalg::SecAlg;

#[macro_use]
mod macros;

pub mod class;
pub mod digestalg;
pub mod nsec3;
pub mod rtype;
pub mod secalg;

/// Reads a decimal number made of ASCII digits only.
fn decimal<T: FromStr>(bytes: &[u8]) -> Option<T> {
    if bytes.is_empty() || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    core::str::from_utf8(bytes).ok()?.parse().ok()
}

//------------ FromStrError --------------------------------------------------

/// A string was neither a known mnemonic nor a number in range.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FromStrError(&'static str);

impl fmt::Display for FromStrError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown {}", self.0)
    }
}

impl std::error::Error for FromStrError {}

//============ Testing =======================================================
