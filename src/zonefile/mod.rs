//! Reading zone files.
//!
//! Zone files contain DNS records in their textual presentation format as
//! defined in [RFC 1035, section 5]. Reading them happens in two steps. The
//! [lexer] splits the text into tokens according to a start condition
//! selected by the grammar. The [reader] implements that grammar for the
//! record types supported by [`RecordData`][crate::rdata::RecordData] and
//! returns [`Record`][crate::base::Record]s.
//!
//! [RFC 1035, section 5]: https://tools.ietf.org/html/rfc1035#section-5
#![cfg(feature = "zonefile")]
#![cfg_attr(docsrs, doc(cfg(feature = "zonefile")))]

pub use self::error::{Error, ErrorKind, Pos};
pub use self::lexer::{Lexer, StartCondition, Token, TokenValue};
pub use self::reader::{Reader, ReaderOptions};

pub mod error;
pub mod lexer;
pub mod reader;
