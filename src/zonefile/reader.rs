//! Reading records from zone files.
//!
//! The [`Reader`] drives a [`Lexer`] through the grammar of zone files and
//! produces [`Record`]s. It keeps track of the origin, the default TTL set
//! via `$TTL`, and the owner, class, and TTL of the previous record, and it
//! resolves relative domain names.
//!
//! Record data is read in the presentation format of each record type
//! supported by [`RecordData`]. Data of all other types has to be given in
//! the generic format of [RFC 3597], i.e., `\#` followed by the length of
//! the data and the data in hex.
//!
//! [RFC 3597]: https://tools.ietf.org/html/rfc3597

use super::error::{Error, ErrorKind};
use super::lexer::{Lexer, StartCondition, Token, TokenValue};
use crate::base::iana::{Class, DigestAlg, Nsec3HashAlg, Rtype, SecAlg};
use crate::base::name::Name;
use crate::base::rdata::UnknownRecordData;
use crate::base::record::Record;
use crate::base::rrset::RecordSet;
use crate::rdata::{
    Aaaa, Cname, Dnskey, Ds, Mx, Nodata, Ns, Nsec3, Nsec3Salt, Nsec3param,
    Nxdomain, OwnerHash, Ptr, RecordData, Rrsig, RtypeBitmap, Soa, Timestamp,
    Txt, A,
};
use core::str::{self, FromStr};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::debug;

//------------ ReaderOptions -------------------------------------------------

/// The configuration of a reader.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "kebab-case")
)]
pub struct ReaderOptions {
    /// The origin to start with.
    ///
    /// Defaults to the root.
    pub origin: Name,

    /// The TTL of records that neither have a TTL nor follow a `$TTL`.
    ///
    /// If this is `None`, such records inherit the TTL of the previous
    /// record. The first record of a file without TTL is an error.
    pub default_ttl: Option<i32>,

    /// The class of records without class if no previous record had one.
    pub default_class: Class,

    /// The maximum number of files open at the same time via `$INCLUDE`.
    pub max_include_depth: usize,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        ReaderOptions {
            origin: Name::root(),
            default_ttl: None,
            default_class: Class::IN,
            max_include_depth: 16,
        }
    }
}

//------------ Opener --------------------------------------------------------

/// A function opening files included via `$INCLUDE`.
pub type Opener = Box<dyn Fn(&str) -> io::Result<Box<dyn BufRead>>>;

//------------ Reader --------------------------------------------------------

/// A reader producing records from zone file text.
///
/// Records are returned by [`next_record`][Self::next_record] or by using
/// the reader as an iterator. After an error, the reader skips the rest of
/// the offending record, so reading can continue with the next one unless
/// the error was an I/O error.
pub struct Reader {
    lexer: Lexer,
    options: ReaderOptions,

    /// The current origin.
    origin: Name,

    /// The TTL set via `$TTL`.
    default_ttl: Option<i32>,

    last_owner: Option<Name>,
    last_class: Option<Class>,
    last_ttl: Option<i32>,

    /// Opens included files. Without it, `$INCLUDE` is an error.
    opener: Option<Opener>,

    /// The origins to restore when leaving included files.
    ///
    /// Each entry also holds the depth of the including source.
    saved_origins: Vec<(usize, Name)>,

    /// A token to be returned again.
    pending: Option<(Token, TokenValue)>,

    /// Reading failed for good.
    failed: bool,
}

impl Reader {
    /// Creates a reader using the default options.
    #[must_use]
    pub fn new(lexer: Lexer) -> Self {
        Self::with_options(lexer, ReaderOptions::default())
    }

    /// Creates a reader using the given options.
    #[must_use]
    pub fn with_options(lexer: Lexer, options: ReaderOptions) -> Self {
        Reader {
            lexer,
            origin: options.origin.clone(),
            default_ttl: options.default_ttl,
            options,
            last_owner: None,
            last_class: None,
            last_ttl: None,
            opener: None,
            saved_origins: Vec::new(),
            pending: None,
            failed: false,
        }
    }

    /// Creates a reader for zone file text in memory.
    #[must_use]
    pub fn from_str(name: &str, text: &str, options: ReaderOptions) -> Self {
        Self::with_options(Lexer::from_str(name, text), options)
    }

    /// Creates a reader for a zone file.
    ///
    /// Included files are opened from the file system. Relative paths are
    /// relative to the current directory.
    pub fn open(
        path: impl AsRef<Path>,
        options: ReaderOptions,
    ) -> io::Result<Self> {
        let path = path.as_ref();
        let file = BufReader::new(File::open(path)?);
        let mut res = Self::with_options(
            Lexer::new(&path.to_string_lossy(), file),
            options,
        );
        res.set_opener(|path| {
            let file = File::open(path)?;
            Ok(Box::new(BufReader::new(file)) as Box<dyn BufRead>)
        });
        Ok(res)
    }

    /// Sets the function used for opening included files.
    pub fn set_opener(
        &mut self,
        opener: impl Fn(&str) -> io::Result<Box<dyn BufRead>> + 'static,
    ) {
        self.opener = Some(Box::new(opener))
    }

    /// Returns a mutable reference to the underlying lexer.
    ///
    /// This can be used to set an error handler.
    pub fn lexer_mut(&mut self) -> &mut Lexer {
        &mut self.lexer
    }

    /// Returns the current origin.
    #[must_use]
    pub fn origin(&self) -> &Name {
        &self.origin
    }

    /// Returns the next record.
    ///
    /// Returns `Ok(None)` once all input has been read.
    pub fn next_record(&mut self) -> Result<Option<Record>, Error> {
        if self.failed {
            return Ok(None);
        }
        match self.read_entry() {
            Ok(res) => Ok(res),
            Err(err) => {
                if err.kind() == ErrorKind::Io {
                    self.failed = true
                } else {
                    self.skip_record()
                }
                Err(err)
            }
        }
    }

    /// Reads all records and hands them to a closure.
    ///
    /// Reading stops early if the closure returns `false`. The first error
    /// ends reading, too, and is returned.
    pub fn read_all(
        &mut self,
        mut on_record: impl FnMut(Record) -> bool,
    ) -> Result<(), Error> {
        while let Some(record) = self.next_record()? {
            if !on_record(record) {
                break;
            }
        }
        Ok(())
    }

    /// Reads all records into a record set.
    ///
    /// Records appear in the order they were read. Duplicates are kept.
    pub fn into_record_set(mut self) -> Result<RecordSet, Error> {
        let mut res = RecordSet::new();
        self.read_all(|record| {
            res.push(record);
            true
        })?;
        Ok(res)
    }
}

/// # Entries
///
impl Reader {
    fn read_entry(&mut self) -> Result<Option<Record>, Error> {
        loop {
            self.lexer.set_mode(StartCondition::Initial);
            let owner = match self.next_token()? {
                (Token::Eof, _) => return Ok(None),
                (Token::Eor, _) => continue,
                (Token::Include, _) => {
                    self.include()?;
                    continue;
                }
                (Token::Origin, _) => {
                    let origin = self.name()?;
                    self.expect_eor()?;
                    debug!("origin is now {}", origin);
                    self.origin = origin;
                    continue;
                }
                (Token::Ttl, _) => {
                    let ttl = self.ttl()?;
                    self.expect_eor()?;
                    debug!("default TTL is now {}", ttl);
                    self.default_ttl = Some(ttl);
                    continue;
                }
                (Token::Blank, _) => match self.last_owner.clone() {
                    Some(owner) => owner,
                    None => return Err(self.semantic("no previous owner")),
                },
                (Token::Name, TokenValue::Text(text)) => self.resolve(&text)?,
                (token, _) => {
                    return Err(self.unexpected(token, "an owner name"))
                }
            };
            return self.record(owner).map(Some);
        }
    }

    fn include(&mut self) -> Result<(), Error> {
        let path = match self.next_token()? {
            (Token::String, TokenValue::Text(text)) => {
                String::from_utf8_lossy(&text).into_owned()
            }
            (token, _) => return Err(self.unexpected(token, "a file name")),
        };
        self.lexer.set_mode(StartCondition::Domain);
        let origin = match self.next_token()? {
            (Token::Name, TokenValue::Text(text)) => {
                let origin = self.resolve(&text)?;
                self.expect_eor()?;
                Some(origin)
            }
            (Token::Eor, _) => None,
            (token, _) => {
                return Err(self.unexpected(token, "an origin or line end"))
            }
        };

        // The end of the directive has been read already, so errors must
        // not skip the next record.
        if self.lexer.depth() >= self.options.max_include_depth {
            self.pending = Some((Token::Eor, TokenValue::None));
            return Err(self.semantic("too many nested includes"));
        }
        let source = match self.opener.as_ref() {
            Some(opener) => opener(&path),
            None => {
                self.pending = Some((Token::Eor, TokenValue::None));
                return Err(self.semantic("file inclusion not supported"));
            }
        };
        let source =
            source.map_err(|err| Error::io(&err, self.lexer.pos()))?;

        debug!("including {}", path);
        self.saved_origins
            .push((self.lexer.depth(), self.origin.clone()));
        if let Some(origin) = origin {
            self.origin = origin;
        }
        self.lexer.push_source(&path, source);
        Ok(())
    }

    fn record(&mut self, owner: Name) -> Result<Record, Error> {
        let mut ttl = None;
        let mut class = None;
        let rtype = loop {
            match self.next_token()? {
                (Token::Number, TokenValue::Number(value)) if ttl.is_none() => {
                    ttl = Some(self.ttl_value(value)?)
                }
                (Token::Class, TokenValue::Class(value)) if class.is_none() => {
                    class = Some(value)
                }
                (Token::Type, TokenValue::Type(rtype)) => break rtype,
                (token, _) => {
                    return Err(
                        self.unexpected(token, "a TTL, class, or record type")
                    )
                }
            }
        };

        let class = class
            .or(self.last_class)
            .unwrap_or(self.options.default_class);
        let ttl = match ttl.or(self.default_ttl).or(self.last_ttl) {
            Some(ttl) => ttl,
            None => return Err(self.semantic("missing TTL")),
        };
        let data = self.rdata(rtype)?;
        self.expect_eor()?;

        self.last_owner = Some(owner.clone());
        self.last_class = Some(class);
        self.last_ttl = Some(ttl);
        Ok(Record::new(owner, class, ttl, data))
    }
}

/// # Record Data
///
impl Reader {
    fn rdata(&mut self, rtype: Rtype) -> Result<RecordData, Error> {
        Ok(match rtype {
            Rtype::A => {
                self.lexer.set_mode(StartCondition::Ipv4);
                match self.next_token()? {
                    (_, TokenValue::Ipv4(addr)) => A::new(addr).into(),
                    (token, _) => {
                        return Err(self.unexpected(token, "an IPv4 address"))
                    }
                }
            }
            Rtype::AAAA => {
                self.lexer.set_mode(StartCondition::Ipv6);
                match self.next_token()? {
                    (_, TokenValue::Ipv6(addr)) => Aaaa::new(addr).into(),
                    (token, _) => {
                        return Err(self.unexpected(token, "an IPv6 address"))
                    }
                }
            }
            Rtype::CNAME => Cname::new(self.name()?).into(),
            Rtype::NS => Ns::new(self.name()?).into(),
            Rtype::PTR => Ptr::new(self.name()?).into(),
            Rtype::MX => {
                let preference = self.number()?;
                Mx::new(preference, self.name()?).into()
            }
            Rtype::SOA => Soa::new(
                self.name()?,
                self.name()?,
                self.number()?,
                self.number()?,
                self.number()?,
                self.number()?,
                self.number()?,
            )
            .into(),
            Rtype::TXT => {
                let mut text = Vec::new();
                self.lexer.set_mode(StartCondition::Qstr);
                loop {
                    match self.next_token()? {
                        (Token::String, TokenValue::Text(chunk)) => {
                            text.extend_from_slice(&chunk)
                        }
                        (Token::Eor, value) => {
                            self.pending = Some((Token::Eor, value));
                            break;
                        }
                        (token, _) => {
                            return Err(self.unexpected(token, "a string"))
                        }
                    }
                }
                Txt::from_octets(text)
                    .map_err(|err| self.semantic(err.as_str()))?
                    .into()
            }
            Rtype::DNSKEY => Dnskey::with_protocol(
                self.number()?,
                self.number()?,
                SecAlg::from_int(self.number()?),
                self.base64()?,
            )
            .into(),
            Rtype::DS => Ds::new(
                self.number()?,
                SecAlg::from_int(self.number()?),
                DigestAlg::from_int(self.number()?),
                self.hex_until_eor()?,
            )
            .into(),
            Rtype::RRSIG => {
                self.lexer.set_mode(StartCondition::Type);
                let covered = match self.next_token()? {
                    (_, TokenValue::Type(rtype)) => rtype,
                    (token, _) => {
                        return Err(self.unexpected(token, "a record type"))
                    }
                };
                Rrsig::new(
                    covered,
                    SecAlg::from_int(self.number()?),
                    self.number()?,
                    self.ttl()?,
                    self.timestamp()?,
                    self.timestamp()?,
                    self.number()?,
                    self.name()?,
                    self.base64()?,
                )
                .into()
            }
            Rtype::NSEC3PARAM => Nsec3param::new(
                Nsec3HashAlg::from_int(self.number()?),
                self.number()?,
                self.number()?,
                self.salt()?,
            )
            .into(),
            Rtype::NSEC3 => {
                let hash_algorithm = Nsec3HashAlg::from_int(self.number()?);
                let flags = self.number()?;
                let iterations = self.number()?;
                let salt = self.salt()?;
                let next_owner = self.owner_hash()?;
                let types = self.types_until_eor()?;
                Nsec3::new(
                    hash_algorithm,
                    flags,
                    iterations,
                    salt,
                    next_owner,
                    types,
                )
                .into()
            }
            Rtype::NODATA => {
                self.lexer.set_mode(StartCondition::Type);
                match self.next_token()? {
                    (_, TokenValue::Type(rtype)) => Nodata::new(rtype).into(),
                    (token, _) => {
                        return Err(self.unexpected(token, "a record type"))
                    }
                }
            }
            Rtype::NXDOMAIN => Nxdomain::new().into(),
            _ => self.generic(rtype)?.into(),
        })
    }

    /// Reads record data in the generic format.
    fn generic(&mut self, rtype: Rtype) -> Result<UnknownRecordData, Error> {
        self.lexer.set_mode(StartCondition::Domain);
        match self.next_token()? {
            (Token::Name, TokenValue::Text(text)) if &*text == b"\\#" => {}
            (token, _) => return Err(self.unexpected(token, "\\#")),
        }
        let len: u16 = self.number()?;
        let data = if len == 0 { Vec::new() } else { self.hex_until_eor()? };
        if data.len() != usize::from(len) {
            return Err(self.semantic("record data length mismatch"));
        }
        UnknownRecordData::from_octets(rtype, data)
            .map_err(|err| self.semantic(err.as_str()))
    }

    fn timestamp(&mut self) -> Result<Timestamp, Error> {
        let value: u64 = self.number()?;
        // Fourteen digits are a date and too large for a plain value.
        match u32::try_from(value) {
            Ok(value) => Ok(value.into()),
            Err(_) => Timestamp::from_str(&value.to_string())
                .map_err(|err| self.malformed(&err.to_string())),
        }
    }

    fn salt(&mut self) -> Result<Nsec3Salt, Error> {
        self.lexer.set_mode(StartCondition::Hex);
        match self.next_token()? {
            (Token::Hex, TokenValue::Blob(data)) => {
                Nsec3Salt::from_octets(data.to_vec())
                    .map_err(|err| self.malformed(&err.to_string()))
            }
            (token, _) => Err(self.unexpected(token, "a salt")),
        }
    }

    fn owner_hash(&mut self) -> Result<OwnerHash, Error> {
        self.lexer.set_mode(StartCondition::Base32Ext);
        match self.next_token()? {
            (Token::Base32, TokenValue::Blob(data)) => {
                OwnerHash::from_octets(data.to_vec())
                    .map_err(|err| self.malformed(&err.to_string()))
            }
            (token, _) => Err(self.unexpected(token, "a hashed owner name")),
        }
    }

    fn types_until_eor(&mut self) -> Result<RtypeBitmap, Error> {
        let mut types = Vec::new();
        self.lexer.set_mode(StartCondition::Type);
        loop {
            match self.next_token()? {
                (Token::Type, TokenValue::Type(rtype)) => types.push(rtype),
                (Token::Eor, value) => {
                    self.pending = Some((Token::Eor, value));
                    return Ok(RtypeBitmap::from_types(types));
                }
                (token, _) => {
                    return Err(self.unexpected(token, "a record type"))
                }
            }
        }
    }

    /// Reads hex data that may be split into several words.
    fn hex_until_eor(&mut self) -> Result<Vec<u8>, Error> {
        let mut data = Vec::new();
        self.lexer.set_mode(StartCondition::Hex);
        loop {
            match self.next_token()? {
                (Token::Hex, TokenValue::Blob(chunk)) => {
                    data.extend_from_slice(&chunk)
                }
                (Token::Eor, value) if !data.is_empty() => {
                    self.pending = Some((Token::Eor, value));
                    return Ok(data);
                }
                (token, _) => return Err(self.unexpected(token, "hex data")),
            }
        }
    }
}

/// # Fields
///
impl Reader {
    /// Returns the next token.
    ///
    /// Restores the origin if the token ended an included file.
    fn next_token(&mut self) -> Result<(Token, TokenValue), Error> {
        let res = match self.pending.take() {
            Some(res) => res,
            None => self.lexer.next_token()?,
        };
        while let Some((depth, _)) = self.saved_origins.last() {
            if self.lexer.depth() > *depth {
                break;
            }
            if let Some((_, origin)) = self.saved_origins.pop() {
                debug!("leaving included file, origin is {}", origin);
                self.origin = origin;
            }
        }
        Ok(res)
    }

    fn expect_eor(&mut self) -> Result<(), Error> {
        match self.next_token()? {
            (Token::Eor | Token::Eof, _) => Ok(()),
            (token, _) => Err(self.unexpected(token, "the end of the record")),
        }
    }

    fn number<T: TryFrom<u64>>(&mut self) -> Result<T, Error> {
        self.lexer.set_mode(StartCondition::Num);
        match self.next_token()? {
            (Token::Number, TokenValue::Number(value)) => T::try_from(value)
                .map_err(|_| self.malformed("number out of range")),
            (token, _) => Err(self.unexpected(token, "a number")),
        }
    }

    fn ttl(&mut self) -> Result<i32, Error> {
        let value = self.number()?;
        self.ttl_value(value)
    }

    fn ttl_value(&self, value: u64) -> Result<i32, Error> {
        i32::try_from(value).map_err(|_| self.malformed("TTL out of range"))
    }

    fn name(&mut self) -> Result<Name, Error> {
        self.lexer.set_mode(StartCondition::Domain);
        match self.next_token()? {
            (Token::Name, TokenValue::Text(text)) => self.resolve(&text),
            (token, _) => Err(self.unexpected(token, "a domain name")),
        }
    }

    /// Converts the text of a name token into an absolute name.
    fn resolve(&self, text: &[u8]) -> Result<Name, Error> {
        let text = str::from_utf8(text)
            .map_err(|_| self.malformed("domain name is not UTF-8"))?;
        Name::from_relative(text, &self.origin).map_err(|err| {
            self.malformed(&format!("invalid domain name '{}': {}", text, err))
        })
    }

    fn base64(&mut self) -> Result<Vec<u8>, Error> {
        self.lexer.set_mode(StartCondition::Base64);
        match self.next_token()? {
            (Token::Base64, TokenValue::Blob(data)) => Ok(data.to_vec()),
            (token, _) => Err(self.unexpected(token, "base 64 data")),
        }
    }
}

/// # Errors
///
impl Reader {
    /// Creates an error for an unexpected token.
    ///
    /// The end of a record is kept so that skipping the rest of the record
    /// doesn’t swallow the next one.
    fn unexpected(&mut self, token: Token, expected: &str) -> Error {
        let found = match token {
            Token::Eor | Token::Eof => {
                self.pending = Some((token, TokenValue::None));
                "end of record".into()
            }
            Token::Char(ch) => format!("'{}'", ch.escape_ascii()),
            token => format!("{:?}", token),
        };
        Error::syntax(
            format!("expected {}, found {}", expected, found),
            self.lexer.pos(),
        )
    }

    fn malformed(&self, msg: &str) -> Error {
        Error::malformed(msg, self.lexer.pos())
    }

    fn semantic(&self, msg: &str) -> Error {
        Error::semantic(msg, self.lexer.pos())
    }

    /// Skips all tokens up to the end of the current record.
    fn skip_record(&mut self) {
        loop {
            match self.next_token() {
                Ok((Token::Eor | Token::Eof, _)) => break,
                Err(err) if err.kind() == ErrorKind::Io => {
                    self.failed = true;
                    break;
                }
                _ => {}
            }
        }
    }
}

//--- Iterator

impl Iterator for Reader {
    type Item = Result<Record, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::rdata::ComposeRecordData;
    use std::collections::HashMap;
    use std::net::Ipv4Addr;

    fn name(s: &str) -> Name {
        Name::from_str(s).unwrap()
    }

    fn read(text: &str) -> Vec<Record> {
        Reader::from_str("test", text, ReaderOptions::default())
            .collect::<Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn origin_ttl_and_owners() {
        let records = read(
            "$ORIGIN example.com.\n\
             $TTL 3600\n\
             @ IN SOA ns1 hostmaster ( 2024010101 7200\n\
                 3600 1209600 300 )\n\
             \tNS ns1\n\
             www 60 A 192.0.2.1\n\
             mail A 192.0.2.2\n",
        );
        assert_eq!(records.len(), 4);
        assert_eq!(
            records[0].data(),
            &RecordData::from(Soa::new(
                name("ns1.example.com"),
                name("hostmaster.example.com"),
                2024010101,
                7200,
                3600,
                1209600,
                300
            ))
        );
        assert_eq!(records[1].owner(), &name("example.com"));
        assert_eq!(records[1].ttl(), 3600);
        assert_eq!(records[2].owner(), &name("www.example.com"));
        assert_eq!(records[2].ttl(), 60);
        assert_eq!(records[3].ttl(), 3600);
        assert_eq!(
            records[3].data(),
            &RecordData::from(A::new(Ipv4Addr::new(192, 0, 2, 2)))
        );
    }

    #[test]
    fn previous_ttl_and_class() {
        let records = read("a.test. CH 120 TXT \"one\" two\nb.test. TXT x\n");
        assert_eq!(records[0].class(), Class::CH);
        assert_eq!(records[1].class(), Class::CH);
        assert_eq!(records[1].ttl(), 120);
        assert_eq!(
            records[0].data(),
            &RecordData::from(Txt::from_slice(b"onetwo").unwrap())
        );
    }

    #[test]
    fn missing_ttl() {
        let mut reader = Reader::from_str(
            "test",
            "a.test. A 192.0.2.1\nb.test. 10 A 192.0.2.2\n",
            ReaderOptions::default(),
        );
        let err = reader.next_record().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Semantic);
        // The reader continues with the next record.
        assert_eq!(
            reader.next_record().unwrap().unwrap().owner(),
            &name("b.test")
        );
        assert!(reader.next_record().unwrap().is_none());
    }

    #[test]
    fn dnssec_records() {
        let records = read(
            "$TTL 300\n\
             example. DNSKEY 257 3 13 ( a2V5\n  ZGF0YQ== )\n\
             example. DS 12345 13 2 ( 0123456789ABCDEF0123456789ABCDEF\n\
                 0123456789abcdef0123456789abcdef )\n\
             example. RRSIG A 8 1 300 20231114221320 1690000000 12345 \
                 example. c2lnbmF0dXJl\n\
             example. NSEC3PARAM 1 0 10 AABB\n\
             0p9mhaveqvm6t7vbl5lop2u3t2rp3tom.example. NSEC3 1 1 10 - \
                 2t7b4g4vsa5smi47k61mv5bv1a22bojr A RRSIG\n",
        );
        let key = match records[0].data() {
            RecordData::Dnskey(key) => key,
            _ => panic!("not a DNSKEY"),
        };
        assert_eq!(key.public_key(), b"keydata");
        assert_eq!(key.algorithm(), SecAlg::ECDSAP256SHA256);

        match records[1].data() {
            RecordData::Ds(ds) => {
                assert_eq!(ds.digest().len(), 32);
                assert_eq!(ds.digest_type(), DigestAlg::SHA256);
            }
            _ => panic!("not a DS"),
        }

        match records[2].data() {
            RecordData::Rrsig(sig) => {
                assert_eq!(sig.type_covered(), Rtype::A);
                assert_eq!(sig.expiration().into_int(), 1700000000);
                assert_eq!(sig.inception().into_int(), 1690000000);
                assert_eq!(sig.signer_name(), &name("example"));
            }
            _ => panic!("not an RRSIG"),
        }

        assert_eq!(records[3].data().to_string(), "1 0 10 AABB");

        match records[4].data() {
            RecordData::Nsec3(nsec3) => {
                assert!(nsec3.opt_out());
                assert!(nsec3.salt().is_empty());
                assert_eq!(nsec3.next_owner().as_slice().len(), 20);
                assert!(nsec3.types().contains(Rtype::RRSIG));
            }
            _ => panic!("not an NSEC3"),
        }
    }

    #[test]
    fn negative_and_generic() {
        let records = read(
            "$TTL 30\n\
             a.test. NODATA MX\n\
             b.test. NXDOMAIN\n\
             c.test. TYPE65534 \\# 3 010203\n\
             d.test. SRV \\# 0\n",
        );
        assert_eq!(records[0].rtype(), Rtype::NODATA);
        assert_eq!(records[1].rtype(), Rtype::NXDOMAIN);
        assert_eq!(records[2].data().to_string(), "\\# 3 01 02 03");
        assert_eq!(records[3].data().rdlen(false), Some(0));
    }

    #[test]
    fn generic_length_mismatch() {
        let mut reader = Reader::from_str(
            "test",
            "c.test. 1 TYPE65534 \\# 4 010203\n",
            ReaderOptions::default(),
        );
        assert_eq!(
            reader.next_record().unwrap_err().message(),
            "record data length mismatch"
        );
    }

    #[test]
    fn include_restores_origin() {
        let files: HashMap<&str, &str> = [
            ("sub.zone", "$ORIGIN other.\nx 1 A 192.0.2.10\n"),
            ("deep.zone", "y 1 A 192.0.2.11"),
        ]
        .into_iter()
        .collect();
        let mut reader = Reader::from_str(
            "main",
            "$ORIGIN example.\n\
             $INCLUDE sub.zone sub\n\
             a 1 A 192.0.2.1\n\
             $INCLUDE \"deep.zone\"\n\
             b 1 A 192.0.2.2\n",
            ReaderOptions::default(),
        );
        reader.set_opener(move |path| {
            let text = files.get(path).copied().unwrap_or_default();
            Ok(Box::new(io::Cursor::new(text.as_bytes().to_vec()))
                as Box<dyn BufRead>)
        });
        let owners: Vec<_> = reader
            .map(|record| record.unwrap().owner().to_string())
            .collect();
        assert_eq!(
            owners,
            ["x.other.", "a.example.", "y.example.", "b.example."]
        );
    }

    #[test]
    fn include_depth_and_opener() {
        let mut reader = Reader::from_str(
            "main",
            "$INCLUDE loop.zone\n",
            ReaderOptions::default(),
        );
        assert_eq!(
            reader.next_record().unwrap_err().message(),
            "file inclusion not supported"
        );

        let options = ReaderOptions {
            max_include_depth: 3,
            ..Default::default()
        };
        let mut reader =
            Reader::from_str("main", "$INCLUDE loop.zone\n", options);
        reader.set_opener(|_| {
            Ok(Box::new(io::Cursor::new(b"$INCLUDE loop.zone\n".to_vec()))
                as Box<dyn BufRead>)
        });
        let err = reader.next_record().unwrap_err();
        assert_eq!(err.message(), "too many nested includes");
        assert_eq!(err.pos().source(), "loop.zone");
    }

    #[test]
    fn syntax_errors() {
        let mut reader = Reader::from_str(
            "test",
            "a.test. 1 A 192.0.2.1 extra\nb.test. 1 MX ten b.test.\n",
            ReaderOptions::default(),
        );
        let err = reader.next_record().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert_eq!(err.pos().line(), 1);
        let err = reader.next_record().unwrap_err();
        assert_eq!(err.message(), "expected a number, found 't'");
        assert!(reader.next_record().unwrap().is_none());
    }

    #[test]
    fn read_all_stops() {
        let mut reader = Reader::from_str(
            "test",
            "a. 1 NXDOMAIN\nb. 1 NXDOMAIN\nc. 1 NXDOMAIN\n",
            ReaderOptions::default(),
        );
        let mut seen = 0;
        reader
            .read_all(|_| {
                seen += 1;
                seen < 2
            })
            .unwrap();
        assert_eq!(seen, 2);
        assert_eq!(
            reader.next_record().unwrap().unwrap().owner(),
            &name("c")
        );
    }
}
