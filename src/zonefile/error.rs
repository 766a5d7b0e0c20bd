//! Errors when reading zone files.

use core::fmt;
use std::io;
use std::string::{String, ToString};
use std::sync::Arc;

//------------ Pos -----------------------------------------------------------

/// A position in a zone file source.
///
/// Lines and columns start at 1. Columns count octets, not characters.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pos {
    source: Arc<str>,
    line: usize,
    column: usize,
}

impl Pos {
    pub(crate) fn new(source: Arc<str>, line: usize, column: usize) -> Self {
        Pos {
            source,
            line,
            column,
        }
    }

    /// Returns the name of the source.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}:{}", self.source, self.line, self.column)
    }
}

//------------ ErrorKind -----------------------------------------------------

/// The kind of problem encountered.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// The input doesn’t follow the zone file syntax.
    ///
    /// This covers unbalanced parentheses and unexpected tokens.
    Syntax,

    /// A literal couldn’t be converted into its value.
    ///
    /// This happens for numbers that overflow, addresses that don’t parse,
    /// and encoded binary data that doesn’t decode.
    MalformedLiteral,

    /// Reading the source failed.
    Io,

    /// The input is well-formed but doesn’t make sense.
    ///
    /// Examples are record data that is too long or a record without a
    /// TTL.
    Semantic,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            ErrorKind::Syntax => "syntax error",
            ErrorKind::MalformedLiteral => "malformed literal",
            ErrorKind::Io => "I/O error",
            ErrorKind::Semantic => "semantic error",
        })
    }
}

//------------ Error ---------------------------------------------------------

/// An error happened while reading a zone file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    message: String,
    pos: Pos,
}

impl Error {
    pub(crate) fn new(
        kind: ErrorKind,
        message: impl Into<String>,
        pos: Pos,
    ) -> Self {
        Error {
            kind,
            message: message.into(),
            pos,
        }
    }

    pub(crate) fn syntax(message: impl Into<String>, pos: Pos) -> Self {
        Self::new(ErrorKind::Syntax, message, pos)
    }

    pub(crate) fn malformed(message: impl Into<String>, pos: Pos) -> Self {
        Self::new(ErrorKind::MalformedLiteral, message, pos)
    }

    pub(crate) fn semantic(message: impl Into<String>, pos: Pos) -> Self {
        Self::new(ErrorKind::Semantic, message, pos)
    }

    pub(crate) fn io(err: &io::Error, pos: Pos) -> Self {
        Self::new(ErrorKind::Io, err.to_string(), pos)
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn pos(&self) -> &Pos {
        &self.pos
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} - {}", self.pos, self.message)
    }
}

impl std::error::Error for Error {}

//------------ ErrorHandler --------------------------------------------------

/// A function deciding whether scanning continues after an error.
///
/// The handler is called for errors that can be recovered from. If it
/// returns `true`, the offending input is skipped and scanning continues.
/// Otherwise the error is returned to the caller.
pub type ErrorHandler = Box<dyn FnMut(&Error) -> bool>;

//============ Testing =======================================================
