//! Record data for the TXT record.
//!
//! This is a private module. It’s content is re-exported by the parent.

use crate::base::charstr::CharStr;
use crate::base::iana::Rtype;
use crate::base::rdata::{ComposeRecordData, LongRecordData, ParseRecordData};
use crate::base::wire::{Compose, Composer, ParseError};
use core::fmt;
use octseq::parse::Parser;
use std::vec::Vec;

//------------ Txt ----------------------------------------------------------

/// TXT record data.
///
/// TXT records hold descriptive text. While the presentation format and
/// wire format of the data consist of a sequence of character strings,
/// this type only keeps their concatenation. This is the text as intended
/// by whoever created the record.
///
/// When composing, the text is split into character strings of 255 octets
/// each with the last one taking the remainder. Empty text is composed as
/// one empty character string.
///
/// The Txt record type is defined in [RFC 1035, section 3.3.14][1].
///
/// [1]: https://tools.ietf.org/html/rfc1035#section-3.3.14
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<u8>", into = "Vec<u8>")
)]
pub struct Txt {
    text: Vec<u8>,
}

impl Txt {
    /// The rtype of this record data type.
    pub(crate) const RTYPE: Rtype = Rtype::TXT;

    /// Creates new TXT record data from its text.
    ///
    /// The function fails if the composed data would be longer than the
    /// 65,535 octets allowed for record data.
    pub fn from_octets(text: Vec<u8>) -> Result<Self, LongRecordData> {
        LongRecordData::check_len(Self::composed_len(text.len()))?;
        Ok(Txt { text })
    }

    /// Creates new TXT record data from a slice of its text.
    pub fn from_slice(text: &[u8]) -> Result<Self, LongRecordData> {
        Self::from_octets(text.into())
    }

    /// Returns the text.
    #[must_use]
    pub fn text(&self) -> &[u8] {
        &self.text
    }

    /// Returns an iterator over the character strings used on the wire.
    pub fn iter_chunks(&self) -> impl Iterator<Item = &[u8]> + '_ {
        let empty = self.text.is_empty().then_some(&[][..]);
        empty
            .into_iter()
            .chain(self.text.chunks(CharStr::MAX_LEN))
    }

    /// Parses TXT record data.
    ///
    /// All character strings until the end of the parser are concatenated,
    /// so the parser must be limited to the record data.
    pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<Octs>,
    ) -> Result<Self, ParseError> {
        let mut text = Vec::new();
        while parser.remaining() > 0 {
            text.extend_from_slice(CharStr::parse(parser)?.as_slice());
        }
        Ok(Txt { text })
    }

    fn composed_len(text_len: usize) -> usize {
        let chunks = (text_len + CharStr::MAX_LEN - 1) / CharStr::MAX_LEN;
        text_len + core::cmp::max(1, chunks)
    }
}

//--- TryFrom and From

impl TryFrom<Vec<u8>> for Txt {
    type Error = LongRecordData;

    fn try_from(text: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_octets(text)
    }
}

impl From<Txt> for Vec<u8> {
    fn from(txt: Txt) -> Self {
        txt.text
    }
}

//--- ParseRecordData, ComposeRecordData

impl<'a, Octs: AsRef<[u8]> + ?Sized> ParseRecordData<'a, Octs> for Txt {
    fn parse_rdata(
        rtype: Rtype,
        parser: &mut Parser<'a, Octs>,
    ) -> Result<Option<Self>, ParseError> {
        if rtype == Txt::RTYPE {
            Self::parse(parser).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ComposeRecordData for Txt {
    fn rtype(&self) -> Rtype {
        Txt::RTYPE
    }

    fn rdlen(&self, _compress: bool) -> Option<u16> {
        // Checked at construction.
        Some(Self::composed_len(self.text.len()) as u16)
    }

    fn compose_rdata<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        for chunk in self.iter_chunks() {
            (chunk.len() as u8).compose(target)?;
            target.append_slice(chunk)?;
        }
        Ok(())
    }
}

//--- Display

impl fmt::Display for Txt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("\"")?;
        CharStr::display_escaped(&self.text, f)?;
        f.write_str("\"")
    }
}

//============ Testing =======================================================
