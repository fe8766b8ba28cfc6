//! Locating and reading protobuf source files.
mod chain;
mod include;

pub use chain::ChainFileResolver;
pub use include::IncludeFileResolver;

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::{error::ErrorKind, Error};

/// A strategy for locating protobuf source files.
///
/// The main implementation is [`IncludeFileResolver`] which uses the file system, but
/// this trait allows sourcing files from other places as well.
pub trait FileResolver {
    /// Opens a file by its name.
    ///
    /// # Errors
    ///
    /// If the file is not found, the implementation should return [`Error::file_not_found`].
    fn open_file(&self, name: &str) -> Result<File, Error>;
}

impl<T> FileResolver for Box<T>
where
    T: FileResolver + ?Sized,
{
    fn open_file(&self, name: &str) -> Result<File, Error> {
        (**self).open_file(name)
    }
}

/// An opened protobuf source file, returned by [`FileResolver::open_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    path: Option<PathBuf>,
    content: String,
}

impl File {
    /// Reads a protobuf source file from the filesystem.
    ///
    /// # Errors
    ///
    /// If the file does not exist, [`Error::file_not_found()`] is returned. Other IO errors,
    /// including content which is not valid UTF-8, are reported with the file's path.
    pub fn open(name: &str, path: &Path) -> Result<Self, Error> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(File {
                path: Some(path.to_owned()),
                content,
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Err(Error::file_not_found(name)),
            Err(err) => Err(Error::from_kind(ErrorKind::OpenFile {
                name: name.to_owned(),
                path: path.to_owned(),
                err,
            })),
        }
    }

    /// Creates a file from source text which is not backed by the filesystem.
    pub fn from_source(content: impl Into<String>) -> Self {
        File {
            path: None,
            content: content.into(),
        }
    }

    /// Returns the filesystem path, if this source is backed by a physical file.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns the full content of the source file.
    pub fn content(&self) -> &str {
        &self.content
    }
}
