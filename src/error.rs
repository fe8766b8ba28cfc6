use std::{fmt, io, path::PathBuf};

use miette::{Diagnostic, NamedSource};
use thiserror::Error;

use crate::parse::ParseError;

/// An error that can occur when compiling protobuf files.
#[derive(Diagnostic, Error)]
#[error(transparent)]
#[diagnostic(transparent)]
pub struct Error {
    kind: ErrorKind,
}

#[derive(Debug, Diagnostic, Error)]
pub(crate) enum ErrorKind {
    #[error("{}", err)]
    #[diagnostic(forward(err))]
    Parse {
        name: String,
        err: ParseError,
        #[source_code]
        src: NamedSource,
    },
    #[error("error opening file '{}'", .path.display())]
    OpenFile {
        name: String,
        path: PathBuf,
        #[source]
        err: io::Error,
    },
    #[error("file '{name}' not found")]
    FileNotFound { name: String },
    #[error(transparent)]
    Custom(Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Creates an instance of [`struct@Error`] with an arbitrary payload.
    pub fn new<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Error::from_kind(ErrorKind::Custom(error.into()))
    }

    /// Creates an instance of [`struct@Error`] indicating that a file could not be found.
    ///
    /// This error should be returned by [`FileResolver`](crate::file::FileResolver) instances if a file is not found.
    pub fn file_not_found(name: &str) -> Self {
        Error::from_kind(ErrorKind::FileNotFound {
            name: name.to_owned(),
        })
    }

    pub(crate) fn parse(name: &str, source: &str, err: ParseError) -> Self {
        Error::from_kind(ErrorKind::Parse {
            name: name.to_owned(),
            err,
            src: NamedSource::new(name, source.to_owned()),
        })
    }

    pub(crate) fn from_kind(kind: ErrorKind) -> Self {
        Error { kind }
    }

    #[cfg(test)]
    pub(crate) fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// The file in which this error occurred, if available.
    pub fn file(&self) -> Option<&str> {
        match &self.kind {
            ErrorKind::Parse { name, .. }
            | ErrorKind::OpenFile { name, .. }
            | ErrorKind::FileNotFound { name } => Some(name),
            ErrorKind::Custom(_) => None,
        }
    }

    /// The parse error, if this error is caused by an invalid protobuf source file.
    pub fn as_parse_error(&self) -> Option<&ParseError> {
        match &self.kind {
            ErrorKind::Parse { err, .. } => Some(err),
            _ => None,
        }
    }

    /// Returns true if this is an instance of [`Error::file_not_found()`].
    pub fn is_file_not_found(&self) -> bool {
        matches!(&self.kind, ErrorKind::FileNotFound { .. })
    }

    /// Returns true if this error is caused by an invalid protobuf source file.
    pub fn is_parse(&self) -> bool {
        matches!(&self.kind, ErrorKind::Parse { .. })
    }

    /// Returns true if this error is caused by an IO error while opening a file.
    pub fn is_io(&self) -> bool {
        match &self.kind {
            ErrorKind::OpenFile { .. } => true,
            ErrorKind::Custom(err) if err.downcast_ref::<io::Error>().is_some() => true,
            _ => false,
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::Parse { name, err, .. } => write!(f, "{}:{}", name, err),
            ErrorKind::OpenFile { err, .. } => write!(f, "{}: {}", self, err),
            ErrorKind::FileNotFound { .. } => write!(f, "{}", self),
            ErrorKind::Custom(err) => write!(f, "{:?}", err),
        }
    }
}
