//! The zone file lexer.
//!
//! The lexer splits zone file text into tokens. Which tokens it recognizes
//! depends on its current [start condition][StartCondition]. Since the
//! zone file format is not context-free, the grammar driving the lexer has
//! to switch the start condition before asking for a field whose syntax
//! differs from a plain word, e.g., before reading an IPv4 address or
//! base 64 data. The [`Reader`][super::reader::Reader] is such a driver.
//!
//! A few things are handled by the lexer itself independently of the
//! start condition: white space and comments are skipped, parentheses
//! group several lines into one record, and a new line outside of
//! parentheses ends the record with a [`Token::Eor`]. At the start of a
//! line, the directives `$INCLUDE`, `$ORIGIN`, and `$TTL` are recognized
//! and a line starting with white space produces [`Token::Blank`] to
//! signal that the previous owner is to be reused.
//!
//! Included files are handled via a stack of sources. Once a source is
//! exhausted, it is dropped and reading continues with the source that
//! included it.

use super::error::{Error, ErrorHandler, ErrorKind, Pos};
use crate::base::iana::{Class, Rtype};
use crate::utils::{base16, base32, base64};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use core::str;
use std::io::{self, BufRead};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::Arc;
use tracing::{trace, warn};

//------------ StartCondition ------------------------------------------------

/// The lexical mode of the lexer.
///
/// Each start condition defines which tokens are recognized. Input that
/// doesn’t match any of them is returned octet by octet as
/// [`Token::Char`].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum StartCondition {
    /// The start of a record.
    ///
    /// Recognizes directives and the blank owner at the start of a line
    /// and otherwise an owner name. After the owner, the lexer switches to
    /// `RrHead` on its own.
    #[default]
    Initial,

    /// The record header after the owner.
    ///
    /// Recognizes numbers for the TTL, class mnemonics, and record type
    /// mnemonics.
    RrHead,

    /// A domain name.
    Domain,

    /// A decimal number.
    Num,

    /// An IPv4 address.
    Ipv4,

    /// An IPv6 address.
    Ipv6,

    /// Data in base32hex encoding.
    Base32Ext,

    /// Data in base 64 encoding.
    ///
    /// All base 64 data until the end of the record is returned as a
    /// single token, even if it is spread over several words or lines.
    Base64,

    /// A record type mnemonic.
    Type,

    /// Data in hex encoding or a single `-` for absent data.
    Hex,

    /// A string, either quoted or a single unquoted word.
    Qstr,
}

//------------ Token ---------------------------------------------------------

/// The kind of a token.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Token {
    /// The end of all input.
    Eof,

    /// The end of a record or directive.
    Eor,

    /// A line started with white space.
    ///
    /// The record on this line has the owner of the previous record.
    Blank,

    /// The `$INCLUDE` directive.
    Include,

    /// The `$ORIGIN` directive.
    Origin,

    /// The `$TTL` directive.
    Ttl,

    /// A domain name, possibly relative, in its presentation format.
    Name,

    /// A decimal number.
    Number,

    /// A class mnemonic.
    Class,

    /// A record type mnemonic.
    Type,

    /// An IPv4 address.
    Ipv4,

    /// An IPv6 address.
    Ipv6,

    /// Decoded base32hex data.
    Base32,

    /// Decoded base 64 data.
    Base64,

    /// Decoded hex data.
    Hex,

    /// A string with escape sequences resolved.
    String,

    /// An octet not matched by anything else.
    Char(u8),
}

//------------ TokenValue ----------------------------------------------------

/// The value of a token.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TokenValue {
    /// The token has no value.
    None,

    /// The raw text of a name or the content of a string.
    Text(Bytes),

    Number(u64),
    Ipv4(Ipv4Addr),
    Ipv6(Ipv6Addr),
    Class(Class),
    Type(Rtype),

    /// Decoded binary data.
    Blob(Bytes),
}

//------------ Lexer ---------------------------------------------------------

/// A zone file lexer.
///
/// The lexer reads its input line by line from a stack of sources. Call
/// [`next_token`][Self::next_token] to get the next token. Once all
/// sources are exhausted, it keeps returning [`Token::Eof`].
pub struct Lexer {
    /// The stack of sources. The last one is the current one.
    stack: Vec<Context>,

    /// The position where the last source ended.
    last_pos: Pos,

    /// The error handler deciding whether to continue after errors.
    error_handler: Option<ErrorHandler>,
}

impl Lexer {
    /// Creates a lexer reading from a source.
    ///
    /// The `name` of the source is used in error positions.
    pub fn new(name: &str, source: impl BufRead + 'static) -> Self {
        let name: Arc<str> = name.into();
        Lexer {
            last_pos: Pos::new(name.clone(), 1, 1),
            stack: vec![Context::new(name, Box::new(source))],
            error_handler: None,
        }
    }

    /// Creates a lexer for zone file text in memory.
    pub fn from_str(name: &str, text: &str) -> Self {
        Self::new(name, io::Cursor::new(text.as_bytes().to_vec()))
    }

    /// Returns the start condition of the current source.
    #[must_use]
    pub fn mode(&self) -> StartCondition {
        self.stack
            .last()
            .map_or(StartCondition::Initial, |ctx| ctx.mode)
    }

    /// Sets the start condition for the next token.
    pub fn set_mode(&mut self, mode: StartCondition) {
        if let Some(ctx) = self.stack.last_mut() {
            ctx.set_mode(mode)
        }
    }

    /// Returns the position of the next octet to be read.
    #[must_use]
    pub fn pos(&self) -> Pos {
        self.stack
            .last()
            .map_or_else(|| self.last_pos.clone(), Context::pos)
    }

    /// Returns the number of sources currently open.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Continues reading from a new source.
    ///
    /// The new source starts in the initial start condition. Once it is
    /// exhausted, reading continues with the current source where it left
    /// off.
    pub fn push_source(&mut self, name: &str, source: impl BufRead + 'static) {
        trace!("entering source {} at depth {}", name, self.stack.len() + 1);
        self.stack.push(Context::new(name.into(), Box::new(source)));
    }

    /// Sets the function deciding whether to continue after an error.
    ///
    /// Without a handler, every error is returned by
    /// [`next_token`][Self::next_token]. I/O errors are always returned.
    pub fn set_error_handler(
        &mut self,
        handler: impl FnMut(&Error) -> bool + 'static,
    ) {
        self.error_handler = Some(Box::new(handler))
    }

    /// Returns the next token.
    pub fn next_token(&mut self) -> Result<(Token, TokenValue), Error> {
        loop {
            let ctx = match self.stack.last_mut() {
                Some(ctx) => ctx,
                None => return Ok((Token::Eof, TokenValue::None)),
            };
            match ctx.scan() {
                Ok(Step::Token(token, value)) => return Ok((token, value)),
                Ok(Step::Exhausted) => {
                    if let Some(ctx) = self.stack.pop() {
                        trace!("leaving source {}", ctx.name);
                        self.last_pos = ctx.pos();
                    }
                }
                Err(err) => {
                    if err.kind() != ErrorKind::Io {
                        if let Some(handler) = self.error_handler.as_mut() {
                            if handler(&err) {
                                warn!("continuing after error: {}", err);
                                continue;
                            }
                        }
                    }
                    return Err(err);
                }
            }
        }
    }
}

//------------ Step ----------------------------------------------------------

/// The outcome of scanning a source.
enum Step {
    Token(Token, TokenValue),
    Exhausted,
}

//------------ Context -------------------------------------------------------

/// The state of reading a single source.
struct Context {
    /// The name of the source for error positions.
    name: Arc<str>,

    source: Box<dyn BufRead>,

    /// The unread remainder of the current line.
    buf: BytesMut,

    /// The length of the current line.
    line_len: usize,

    /// The number of the current line.
    line: usize,

    mode: StartCondition,

    /// Are we inside parentheses?
    parens: bool,

    /// Have there been tokens since the last end of record?
    has_tokens: bool,

    /// Are we at the start of a line outside of parentheses?
    line_start: bool,

    /// The base 64 data collected so far and where it started.
    base64: Option<(base64::Decoder, Pos)>,
}

impl Context {
    fn new(name: Arc<str>, source: Box<dyn BufRead>) -> Self {
        Context {
            name,
            source,
            buf: BytesMut::new(),
            line_len: 0,
            line: 0,
            mode: StartCondition::Initial,
            parens: false,
            has_tokens: false,
            line_start: false,
            base64: None,
        }
    }

    fn pos(&self) -> Pos {
        Pos::new(
            self.name.clone(),
            self.line.max(1),
            self.line_len - self.buf.len() + 1,
        )
    }

    fn set_mode(&mut self, mode: StartCondition) {
        if mode != self.mode {
            trace!("switching start condition to {:?}", mode);
            self.mode = mode
        }
    }

    /// Reads the next line into the buffer.
    ///
    /// Returns `false` if the source is exhausted.
    fn refill(&mut self) -> Result<bool, Error> {
        let mut line = Vec::new();
        let read = self
            .source
            .read_until(b'\n', &mut line)
            .map_err(|err| Error::io(&err, self.pos()))?;
        if read == 0 {
            return Ok(false);
        }
        self.buf.clear();
        self.buf.extend_from_slice(&line);
        self.line += 1;
        self.line_len = line.len();
        self.line_start = !self.parens;
        Ok(true)
    }

    fn scan(&mut self) -> Result<Step, Error> {
        loop {
            if self.buf.is_empty() && !self.refill()? {
                if let Some(res) = self.flush_base64() {
                    return res;
                }
                if self.parens {
                    self.parens = false;
                    return Err(Error::syntax(
                        "unbalanced parentheses at end of file",
                        self.pos(),
                    ));
                }
                if self.has_tokens {
                    return Ok(self.end_record());
                }
                return Ok(Step::Exhausted);
            }

            if self.line_start {
                self.line_start = false;
                if self.mode == StartCondition::Initial {
                    if let Some(step) = self.scan_line_start()? {
                        return Ok(step);
                    }
                    continue;
                }
            }

            match self.buf[0] {
                b' ' | b'\t' | b'\r' => self.buf.advance(1),
                b';' => {
                    let len = self
                        .buf
                        .iter()
                        .position(|&ch| ch == b'\n')
                        .unwrap_or(self.buf.len());
                    self.buf.advance(len)
                }
                b'\n' => {
                    if !self.parens {
                        if let Some(res) = self.flush_base64() {
                            return res;
                        }
                    }
                    self.buf.advance(1);
                    if !self.parens && self.has_tokens {
                        return Ok(self.end_record());
                    }
                }
                b'(' => {
                    let pos = self.pos();
                    self.buf.advance(1);
                    if self.parens {
                        return Err(Error::syntax("nested parentheses", pos));
                    }
                    self.parens = true;
                }
                b')' => {
                    if let Some(res) = self.flush_base64() {
                        return res;
                    }
                    let pos = self.pos();
                    self.buf.advance(1);
                    if !self.parens {
                        return Err(Error::syntax(
                            "unbalanced closing parenthesis",
                            pos,
                        ));
                    }
                    self.parens = false;
                    if self.has_tokens {
                        return Ok(self.end_record());
                    }
                }
                _ => {
                    self.has_tokens = true;
                    if self.mode == StartCondition::Base64 {
                        self.push_base64();
                        continue;
                    }
                    let (token, value) = self.scan_item()?;
                    return Ok(Step::Token(token, value));
                }
            }
        }
    }

    /// Handles blank owners and directives at the start of a line.
    fn scan_line_start(&mut self) -> Result<Option<Step>, Error> {
        let blanks = self
            .buf
            .iter()
            .take_while(|&&ch| ch == b' ' || ch == b'\t')
            .count();
        if blanks > 0 {
            let content = !matches!(
                self.buf.get(blanks).copied(),
                None | Some(b'\n' | b'\r' | b';')
            );
            self.buf.advance(blanks);
            if content {
                self.has_tokens = true;
                self.set_mode(StartCondition::RrHead);
                return Ok(Some(Step::Token(Token::Blank, TokenValue::None)));
            }
            return Ok(None);
        }

        if self.buf[0] != b'$' {
            return Ok(None);
        }
        let pos = self.pos();
        let len = self.word_len();
        let word = self.buf.split_to(len);
        let (token, mode) = if word.eq_ignore_ascii_case(b"$INCLUDE") {
            (Token::Include, StartCondition::Qstr)
        } else if word.eq_ignore_ascii_case(b"$ORIGIN") {
            (Token::Origin, StartCondition::Domain)
        } else if word.eq_ignore_ascii_case(b"$TTL") {
            (Token::Ttl, StartCondition::Num)
        } else {
            // Skip the arguments but still end the record.
            self.has_tokens = true;
            let rest = self.buf.len() - usize::from(self.buf.ends_with(b"\n"));
            self.buf.advance(rest);
            return Err(Error::syntax(
                format!("unknown directive {}", String::from_utf8_lossy(&word)),
                pos,
            ));
        };
        self.has_tokens = true;
        self.set_mode(mode);
        Ok(Some(Step::Token(token, TokenValue::None)))
    }

    fn end_record(&mut self) -> Step {
        self.has_tokens = false;
        self.set_mode(StartCondition::Initial);
        Step::Token(Token::Eor, TokenValue::None)
    }

    /// Returns the length of the word at the start of the buffer.
    ///
    /// A word ends before white space, a comment, a parenthesis, or a
    /// double quote. A backslash escapes the next octet.
    fn word_len(&self) -> usize {
        let mut len = 0;
        while let Some(ch) = self.buf.get(len).copied() {
            match ch {
                b'\\' if self.buf.get(len + 1).copied() != Some(b'\n') => {
                    len = (len + 2).min(self.buf.len())
                }
                b' ' | b'\t' | b'\r' | b'\n' | b';' | b'(' | b')' | b'"' => {
                    break
                }
                _ => len += 1,
            }
        }
        len
    }

    /// Returns the word of the given length if all octets match `class`.
    fn take_class(
        &mut self,
        len: usize,
        class: impl Fn(u8) -> bool,
    ) -> Option<BytesMut> {
        if len == 0 || !self.buf[..len].iter().all(|&ch| class(ch)) {
            return None;
        }
        Some(self.buf.split_to(len))
    }

    fn take_char(&mut self) -> (Token, TokenValue) {
        let ch = self.buf[0];
        self.buf.advance(1);
        (Token::Char(ch), TokenValue::None)
    }

    fn scan_item(&mut self) -> Result<(Token, TokenValue), Error> {
        let pos = self.pos();
        let len = self.word_len();
        match self.mode {
            StartCondition::Initial | StartCondition::Domain => {
                if len == 0 {
                    return Ok(self.take_char());
                }
                let word = self.buf.split_to(len).freeze();
                if self.mode == StartCondition::Initial {
                    self.set_mode(StartCondition::RrHead);
                }
                Ok((Token::Name, TokenValue::Text(word)))
            }
            StartCondition::RrHead => {
                if let Some(word) = self.take_class(len, |ch| ch.is_ascii_digit())
                {
                    return number(&word, pos);
                }
                let word = &self.buf[..len];
                if len == 0 {
                    Ok(self.take_char())
                } else if let Some(class) = Class::from_bytes(word) {
                    self.buf.advance(len);
                    Ok((Token::Class, TokenValue::Class(class)))
                } else if let Some(rtype) = Rtype::from_bytes(word) {
                    self.buf.advance(len);
                    Ok((Token::Type, TokenValue::Type(rtype)))
                } else {
                    Ok(self.take_char())
                }
            }
            StartCondition::Num => {
                match self.take_class(len, |ch| ch.is_ascii_digit()) {
                    Some(word) => number(&word, pos),
                    None => Ok(self.take_char()),
                }
            }
            StartCondition::Ipv4 => {
                let word = match self
                    .take_class(len, |ch| ch.is_ascii_digit() || ch == b'.')
                {
                    Some(word) => word,
                    None => return Ok(self.take_char()),
                };
                str::from_utf8(&word)
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .map(|addr| (Token::Ipv4, TokenValue::Ipv4(addr)))
                    .ok_or_else(|| Error::malformed("invalid IPv4 address", pos))
            }
            StartCondition::Ipv6 => {
                let word = match self.take_class(len, |ch| {
                    ch.is_ascii_hexdigit() || ch == b':' || ch == b'.'
                }) {
                    Some(word) => word,
                    None => return Ok(self.take_char()),
                };
                str::from_utf8(&word)
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .map(|addr| (Token::Ipv6, TokenValue::Ipv6(addr)))
                    .ok_or_else(|| Error::malformed("invalid IPv6 address", pos))
            }
            StartCondition::Base32Ext => {
                let word = match self.take_class(len, |ch| {
                    matches!(ch, b'0'..=b'9' | b'A'..=b'V' | b'a'..=b'v')
                }) {
                    Some(word) => word,
                    None => return Ok(self.take_char()),
                };
                decode(&word, base32::decode_hex, Token::Base32, pos)
            }
            StartCondition::Hex => {
                if &self.buf[..len] == b"-" {
                    self.buf.advance(1);
                    return Ok((Token::Hex, TokenValue::Blob(Bytes::new())));
                }
                match self.take_class(len, |ch| ch.is_ascii_hexdigit()) {
                    Some(word) => {
                        decode(&word, base16::decode, Token::Hex, pos)
                    }
                    None => Ok(self.take_char()),
                }
            }
            StartCondition::Type => {
                match Rtype::from_bytes(&self.buf[..len]) {
                    Some(rtype) if len > 0 => {
                        self.buf.advance(len);
                        Ok((Token::Type, TokenValue::Type(rtype)))
                    }
                    _ => Ok(self.take_char()),
                }
            }
            StartCondition::Qstr => {
                if self.buf[0] == b'"' {
                    self.scan_quoted(pos)
                } else if len == 0 {
                    Ok(self.take_char())
                } else {
                    let word = self.buf.split_to(len);
                    string(&word, pos)
                }
            }
            // Base 64 is collected in `scan`.
            StartCondition::Base64 => Ok(self.take_char()),
        }
    }

    /// Scans a string in double quotes.
    ///
    /// The string has to end on the same line.
    fn scan_quoted(&mut self, pos: Pos) -> Result<(Token, TokenValue), Error> {
        let mut len = 1;
        loop {
            match self.buf.get(len).copied() {
                Some(b'"') => break,
                Some(b'\\')
                    if !matches!(
                        self.buf.get(len + 1).copied(),
                        None | Some(b'\n')
                    ) =>
                {
                    len += 2
                }
                None | Some(b'\n') => {
                    self.buf.advance(len);
                    return Err(Error::syntax(
                        "unterminated quoted string",
                        pos,
                    ));
                }
                Some(_) => len += 1,
            }
        }
        let quoted = self.buf.split_to(len + 1);
        string(&quoted[1..len], pos)
    }

    /// Adds the next word to the base 64 data of the record.
    fn push_base64(&mut self) {
        let pos = self.pos();
        let len = self.word_len().max(1);
        let word = self.buf.split_to(len);
        let (decoder, _) = self
            .base64
            .get_or_insert_with(|| (base64::Decoder::new(), pos));
        for &ch in word.iter() {
            // The decoder remembers the error for `finalize`.
            if decoder.push(char::from(ch)).is_err() {
                break;
            }
        }
    }

    /// Returns the collected base 64 data if there is any.
    fn flush_base64(&mut self) -> Option<Result<Step, Error>> {
        let (decoder, pos) = self.base64.take()?;
        Some(match decoder.finalize() {
            Ok(data) => {
                Ok(Step::Token(Token::Base64, TokenValue::Blob(data.into())))
            }
            Err(err) => Err(Error::malformed(
                format!("invalid base 64 data: {}", err),
                pos,
            )),
        })
    }
}

//------------ Helper Functions ----------------------------------------------

fn number(word: &[u8], pos: Pos) -> Result<(Token, TokenValue), Error> {
    word.iter()
        .try_fold(0u64, |res, &ch| {
            res.checked_mul(10)?.checked_add(u64::from(ch - b'0'))
        })
        .map(|value| (Token::Number, TokenValue::Number(value)))
        .ok_or_else(|| Error::malformed("number too large", pos))
}

fn decode<E: core::fmt::Display>(
    word: &[u8],
    op: impl FnOnce(&str) -> Result<Vec<u8>, E>,
    token: Token,
    pos: Pos,
) -> Result<(Token, TokenValue), Error> {
    let word = str::from_utf8(word)
        .map_err(|_| Error::malformed("illegal characters", pos.clone()))?;
    op(word)
        .map(|data| (token, TokenValue::Blob(data.into())))
        .map_err(|err| Error::malformed(format!("invalid data: {}", err), pos))
}

/// Resolves the escape sequences in a string.
///
/// A backslash followed by three decimal digits is the octet with that
/// value. Any other escaped octet stands for itself.
fn string(src: &[u8], pos: Pos) -> Result<(Token, TokenValue), Error> {
    let mut res = BytesMut::with_capacity(src.len());
    let mut iter = src.iter().copied();
    while let Some(ch) = iter.next() {
        if ch != b'\\' {
            res.put_u8(ch);
            continue;
        }
        match iter.next() {
            Some(ch) if ch.is_ascii_digit() => {
                let mut value = u32::from(ch - b'0');
                for _ in 0..2 {
                    match iter.next() {
                        Some(ch) if ch.is_ascii_digit() => {
                            value = value * 10 + u32::from(ch - b'0')
                        }
                        _ => {
                            return Err(Error::malformed(
                                "illegal escape sequence",
                                pos,
                            ))
                        }
                    }
                }
                let value = u8::try_from(value).map_err(|_| {
                    Error::malformed("illegal escape sequence", pos.clone())
                })?;
                res.put_u8(value);
            }
            Some(ch) => res.put_u8(ch),
            None => {
                return Err(Error::malformed("illegal escape sequence", pos))
            }
        }
    }
    Ok((Token::String, TokenValue::Text(res.freeze())))
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn next(lexer: &mut Lexer) -> (Token, TokenValue) {
        lexer.next_token().unwrap()
    }

    fn text(s: &str) -> TokenValue {
        TokenValue::Text(Bytes::copy_from_slice(s.as_bytes()))
    }

    fn tokens(lexer: &mut Lexer) -> Vec<Token> {
        let mut res = Vec::new();
        loop {
            let (token, _) = next(lexer);
            res.push(token);
            if token == Token::Eof {
                return res;
            }
        }
    }

    #[test]
    fn simple_record() {
        let mut lexer = Lexer::from_str(
            "test",
            "www.example.com. 3600 IN A 192.0.2.1\n",
        );
        assert_eq!(next(&mut lexer), (Token::Name, text("www.example.com.")));
        assert_eq!(lexer.mode(), StartCondition::RrHead);
        assert_eq!(next(&mut lexer), (Token::Number, TokenValue::Number(3600)));
        assert_eq!(
            next(&mut lexer),
            (Token::Class, TokenValue::Class(Class::IN))
        );
        assert_eq!(next(&mut lexer), (Token::Type, TokenValue::Type(Rtype::A)));
        lexer.set_mode(StartCondition::Ipv4);
        assert_eq!(
            next(&mut lexer),
            (Token::Ipv4, TokenValue::Ipv4(Ipv4Addr::new(192, 0, 2, 1)))
        );
        assert_eq!(next(&mut lexer), (Token::Eor, TokenValue::None));
        assert_eq!(lexer.mode(), StartCondition::Initial);
        assert_eq!(next(&mut lexer), (Token::Eof, TokenValue::None));
        assert_eq!(next(&mut lexer), (Token::Eof, TokenValue::None));
    }

    #[test]
    fn parens_swallow_newlines() {
        let mut lexer = Lexer::from_str("test", "foo ( 10\n 20 )\nbar\n");
        assert_eq!(next(&mut lexer), (Token::Name, text("foo")));
        assert_eq!(next(&mut lexer), (Token::Number, TokenValue::Number(10)));
        assert_eq!(next(&mut lexer), (Token::Number, TokenValue::Number(20)));
        assert_eq!(next(&mut lexer), (Token::Eor, TokenValue::None));
        assert_eq!(next(&mut lexer), (Token::Name, text("bar")));
        assert_eq!(lexer.pos().line(), 3);
        assert_eq!(next(&mut lexer), (Token::Eor, TokenValue::None));
        assert_eq!(next(&mut lexer), (Token::Eof, TokenValue::None));
    }

    #[test]
    fn comments_and_empty_lines() {
        let mut lexer = Lexer::from_str(
            "test",
            "; a comment\n\n   \nfoo ; trailing\n   ; indented comment\n",
        );
        assert_eq!(
            tokens(&mut lexer),
            [Token::Name, Token::Eor, Token::Eof]
        );
    }

    #[test]
    fn blank_owner() {
        let mut lexer = Lexer::from_str("test", "foo A\n\tMX\n");
        assert_eq!(
            tokens(&mut lexer),
            [
                Token::Name,
                Token::Type,
                Token::Eor,
                Token::Blank,
                Token::Type,
                Token::Eor,
                Token::Eof
            ]
        );
    }

    #[test]
    fn directives() {
        let mut lexer = Lexer::from_str(
            "test",
            "$ORIGIN example.com.\n$ttl 300\n$INCLUDE \"sub zone\" sub\n",
        );
        assert_eq!(next(&mut lexer), (Token::Origin, TokenValue::None));
        assert_eq!(next(&mut lexer), (Token::Name, text("example.com.")));
        assert_eq!(next(&mut lexer), (Token::Eor, TokenValue::None));
        assert_eq!(next(&mut lexer), (Token::Ttl, TokenValue::None));
        assert_eq!(next(&mut lexer), (Token::Number, TokenValue::Number(300)));
        assert_eq!(next(&mut lexer), (Token::Eor, TokenValue::None));
        assert_eq!(next(&mut lexer), (Token::Include, TokenValue::None));
        assert_eq!(next(&mut lexer), (Token::String, text("sub zone")));
        lexer.set_mode(StartCondition::Domain);
        assert_eq!(next(&mut lexer), (Token::Name, text("sub")));
        assert_eq!(next(&mut lexer), (Token::Eor, TokenValue::None));
        assert_eq!(next(&mut lexer), (Token::Eof, TokenValue::None));
    }

    #[test]
    fn unknown_directive() {
        let mut lexer = Lexer::from_str("test", "$GENERATE 1-10 foo\nbar\n");
        let err = lexer.next_token().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert_eq!(err.to_string(), "test:1:1 - unknown directive $GENERATE");
        assert_eq!(next(&mut lexer), (Token::Eor, TokenValue::None));
        assert_eq!(next(&mut lexer), (Token::Name, text("bar")));
    }

    #[test]
    fn unbalanced_parens() {
        let mut lexer = Lexer::from_str("test", "foo ( ( 1 )\n");
        assert_eq!(next(&mut lexer).0, Token::Name);
        let err = lexer.next_token().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert_eq!(err.pos().column(), 7);

        let mut lexer = Lexer::from_str("test", "foo )\n");
        assert_eq!(next(&mut lexer).0, Token::Name);
        assert_eq!(
            lexer.next_token().unwrap_err().message(),
            "unbalanced closing parenthesis"
        );

        let mut lexer = Lexer::from_str("test", "foo ( 1\n");
        assert_eq!(next(&mut lexer).0, Token::Name);
        assert_eq!(next(&mut lexer).0, Token::Number);
        assert_eq!(
            lexer.next_token().unwrap_err().message(),
            "unbalanced parentheses at end of file"
        );
    }

    #[test]
    fn error_handler_recovers() {
        let errors = Rc::new(Cell::new(0));
        let mut lexer = Lexer::from_str("test", "foo )\nbar\n");
        let counter = errors.clone();
        lexer.set_error_handler(move |_| {
            counter.set(counter.get() + 1);
            true
        });
        assert_eq!(
            tokens(&mut lexer),
            [Token::Name, Token::Eor, Token::Name, Token::Eor, Token::Eof]
        );
        assert_eq!(errors.get(), 1);
    }

    #[test]
    fn numbers() {
        let mut lexer =
            Lexer::from_str("test", "99999999999999999999999 12 x1\n");
        lexer.set_mode(StartCondition::Num);
        let err = lexer.next_token().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedLiteral);
        assert_eq!(next(&mut lexer), (Token::Number, TokenValue::Number(12)));
        assert_eq!(next(&mut lexer), (Token::Char(b'x'), TokenValue::None));
        assert_eq!(next(&mut lexer), (Token::Number, TokenValue::Number(1)));
    }

    #[test]
    fn addresses() {
        let mut lexer =
            Lexer::from_str("test", "2001:db8::1 192.0.2.300 example\n");
        lexer.set_mode(StartCondition::Ipv6);
        assert_eq!(
            next(&mut lexer),
            (Token::Ipv6, TokenValue::Ipv6("2001:db8::1".parse().unwrap()))
        );
        lexer.set_mode(StartCondition::Ipv4);
        assert_eq!(
            lexer.next_token().unwrap_err().kind(),
            ErrorKind::MalformedLiteral
        );
        assert_eq!(next(&mut lexer), (Token::Char(b'e'), TokenValue::None));
    }

    #[test]
    fn base64_spans_lines() {
        let mut lexer =
            Lexer::from_str("test", "foo ( aGVs\n bG8g\n d29ybGQ= ) bar\n");
        assert_eq!(next(&mut lexer).0, Token::Name);
        lexer.set_mode(StartCondition::Base64);
        assert_eq!(
            next(&mut lexer),
            (
                Token::Base64,
                TokenValue::Blob(Bytes::from_static(b"hello world"))
            )
        );
        assert_eq!(next(&mut lexer).0, Token::Eor);
        assert_eq!(next(&mut lexer), (Token::Name, text("bar")));
    }

    #[test]
    fn base64_error() {
        let mut lexer = Lexer::from_str("test", "foo aGV\n");
        assert_eq!(next(&mut lexer).0, Token::Name);
        lexer.set_mode(StartCondition::Base64);
        let err = lexer.next_token().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedLiteral);
        assert_eq!(err.pos().column(), 5);
    }

    #[test]
    fn hex_and_base32() {
        let mut lexer = Lexer::from_str("test", "- aBcD ABC 2t7b4g4v\n");
        lexer.set_mode(StartCondition::Hex);
        assert_eq!(next(&mut lexer), (Token::Hex, TokenValue::Blob(Bytes::new())));
        assert_eq!(
            next(&mut lexer),
            (Token::Hex, TokenValue::Blob(Bytes::from_static(b"\xab\xcd")))
        );
        assert_eq!(
            lexer.next_token().unwrap_err().kind(),
            ErrorKind::MalformedLiteral
        );
        lexer.set_mode(StartCondition::Base32Ext);
        assert_eq!(next(&mut lexer).0, Token::Base32);
    }

    #[test]
    fn strings() {
        let mut lexer = Lexer::from_str(
            "test",
            r#""say \"hi\"" back\\slash "\065\066" "open"#,
        );
        lexer.set_mode(StartCondition::Qstr);
        assert_eq!(next(&mut lexer), (Token::String, text("say \"hi\"")));
        assert_eq!(next(&mut lexer), (Token::String, text("back\\slash")));
        assert_eq!(next(&mut lexer), (Token::String, text("AB")));
        assert_eq!(
            lexer.next_token().unwrap_err().message(),
            "unterminated quoted string"
        );
    }

    #[test]
    fn include_stack() {
        let mut lexer = Lexer::from_str("main", "a A\nb A\n");
        assert_eq!(next(&mut lexer), (Token::Name, text("a")));
        assert_eq!(next(&mut lexer).0, Token::Type);
        assert_eq!(next(&mut lexer).0, Token::Eor);
        lexer.push_source(
            "included",
            io::Cursor::new(b"x A\ny MX".to_vec()),
        );
        assert_eq!(lexer.depth(), 2);
        assert_eq!(next(&mut lexer), (Token::Name, text("x")));
        assert_eq!(lexer.pos().source(), "included");
        assert_eq!(next(&mut lexer).0, Token::Type);
        assert_eq!(next(&mut lexer).0, Token::Eor);
        assert_eq!(next(&mut lexer), (Token::Name, text("y")));
        assert_eq!(next(&mut lexer).0, Token::Type);
        // The included source ends in the middle of a record.
        assert_eq!(next(&mut lexer).0, Token::Eor);
        assert_eq!(next(&mut lexer), (Token::Name, text("b")));
        assert_eq!(lexer.depth(), 1);
        assert_eq!(lexer.pos().source(), "main");
        assert_eq!(lexer.pos().line(), 2);
    }

    #[test]
    fn unmatched_input() {
        let mut lexer = Lexer::from_str("test", "foo ! A\n");
        assert_eq!(next(&mut lexer).0, Token::Name);
        assert_eq!(next(&mut lexer), (Token::Char(b'!'), TokenValue::None));
        assert_eq!(next(&mut lexer).0, Token::Type);
    }
}
