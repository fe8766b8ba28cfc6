use std::{fmt, num::ParseIntError};

use logos::Span;
use miette::Diagnostic;
use thiserror::Error;

/// An error that may occur while parsing a protobuf source file.
///
/// Parsing stops at the first error, so a file produces at most one of these.
#[derive(Error, Debug, Clone, Diagnostic, PartialEq, Eq)]
#[error("{location}: {kind}")]
pub struct ParseError {
    kind: ParseErrorKind,
    location: Location,
    #[label("found here")]
    span: Span,
}

/// The reason a [`ParseError`] was raised.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseErrorKind {
    /// A byte which starts neither a symbol nor an identifier.
    #[error("unexpected byte {byte:#04x} ('{}')", .byte.escape_ascii())]
    UnexpectedByte {
        /// The offending byte.
        byte: u8,
    },
    /// A literal token required by the grammar was not found.
    #[error("expected {expected:?}, found {found:?}")]
    UnexpectedToken {
        /// The literal which was required.
        expected: &'static str,
        /// The text of the token which was found instead.
        found: String,
    },
    /// A declaration keyword other than `package` or `message` at the top level.
    #[error("unknown top-level thing {found:?}")]
    UnknownTopLevel {
        /// The text of the unrecognized token.
        found: String,
    },
    /// A field declaration which does not start with a label.
    #[error("expected required/optional/repeated, found {found:?}")]
    ExpectedLabel {
        /// The text of the token found in place of the label.
        found: String,
    },
    /// A field number which is not a 32-bit signed integer.
    #[error("bad field number {value:?}: {reason}")]
    InvalidFieldNumber {
        /// The text of the field number token.
        value: String,
        /// Why the number was rejected.
        reason: FieldNumberError,
    },
    /// The input ended before a message body was closed.
    #[error("unexpected end while parsing message")]
    UnexpectedEof,
    /// An unrecognized token inside a message body, when unknown content is rejected.
    #[error("unexpected {found:?} in message body")]
    UnknownMessageContent {
        /// The text of the unrecognized token.
        found: String,
    },
    /// Parsing finished without consuming the whole input.
    #[error("input was not all consumed")]
    UnconsumedInput,
    /// A token was pushed back twice without being read in between.
    #[error("cannot push back more than one token")]
    RepeatedPushback,
}

/// The reason a field number was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldNumberError {
    /// The text is not a base-10 integer.
    #[error("{0}")]
    Invalid(#[source] ParseIntError),
    /// The value does not fit in an `i32`.
    #[error("out of int32 range")]
    OutOfRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Location {
    line: usize,
    offset: usize,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, line: usize, span: Span) -> Self {
        ParseError {
            kind,
            location: Location {
                line,
                offset: span.start,
            },
            span,
        }
    }

    /// The reason parsing failed.
    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }

    /// The 1-based line of the token at which the error was detected.
    pub fn line(&self) -> usize {
        self.location.line
    }

    /// The 0-based byte offset, from the start of the input, of the token at which the error was detected.
    pub fn offset(&self) -> usize {
        self.location.offset
    }

    /// The byte range of the token at which the error was detected.
    pub fn span(&self) -> Span {
        self.span.clone()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Only the first line reports a column, since the offset is counted from the start of the input.
        if self.line == 1 {
            write!(f, "line 1.{}", self.offset)
        } else {
            write!(f, "line {}", self.line)
        }
    }
}
