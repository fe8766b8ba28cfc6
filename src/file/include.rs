use std::path::PathBuf;

use super::{File, FileResolver};
use crate::Error;

/// An implementation of [`FileResolver`] which searches an include path on the file system.
#[derive(Debug)]
pub struct IncludeFileResolver {
    include: PathBuf,
}

impl IncludeFileResolver {
    /// Constructs a `IncludeFileResolver` that searches the given include path.
    pub fn new(include: impl Into<PathBuf>) -> Self {
        IncludeFileResolver {
            include: include.into(),
        }
    }
}

impl FileResolver for IncludeFileResolver {
    /// Opens a file by its name, relative to the include path.
    ///
    /// Absolute names are opened as-is.
    ///
    /// # Errors
    ///
    /// If no matching file is found, [`Error::file_not_found`] is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::{fs, path::Path};
    /// # use protolite::file::{IncludeFileResolver, FileResolver};
    /// # let tempdir = assert_fs::TempDir::new().unwrap();
    /// fs::write(tempdir.path().join("foo.proto"), "content").unwrap();
    ///
    /// let resolver = IncludeFileResolver::new(tempdir.path());
    /// let file = resolver.open_file("foo.proto").unwrap();
    /// assert_eq!(file.path(), Some(tempdir.path().join("foo.proto").as_path()));
    /// assert_eq!(file.content(), "content");
    /// ```
    fn open_file(&self, name: &str) -> Result<File, Error> {
        File::open(name, &self.include.join(name))
    }
}
