use std::{fmt, path::Path};

use prost::Message;
use prost_types::{FileDescriptorProto, FileDescriptorSet};
use tracing::debug;

use crate::{
    file::{FileResolver, IncludeFileResolver},
    parse::{self, ParseOptions, UnknownContent},
    Error,
};


/// Parses a batch of protobuf source files.
///
/// Files are parsed in the order they are added. The first file which cannot be read or does
/// not parse fails the whole batch.
pub struct Compiler {
    resolver: Box<dyn FileResolver>,
    options: ParseOptions,
    files: Vec<FileDescriptorProto>,
}

impl Compiler {
    /// Create a new [`Compiler`] which opens files relative to the given include path.
    pub fn new(include: impl AsRef<Path>) -> Self {
        Compiler::with_file_resolver(IncludeFileResolver::new(include.as_ref()))
    }

    /// Create a new [`Compiler`] with a custom [`FileResolver`] for opening files.
    pub fn with_file_resolver<R>(resolver: R) -> Self
    where
        R: FileResolver + 'static,
    {
        Compiler {
            resolver: Box::new(resolver),
            options: ParseOptions::default(),
            files: Vec::new(),
        }
    }

    /// Set how unrecognized content inside message bodies is handled.
    ///
    /// Defaults to [`UnknownContent::Skip`].
    pub fn unknown_content(&mut self, policy: UnknownContent) -> &mut Self {
        self.options = self.options.unknown_content(policy);
        self
    }

    /// Open and parse the file with the given name, and add it to this `Compiler` instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, or is not a valid source file. In that
    /// case, no descriptor is added.
    pub fn add_file(&mut self, name: &str) -> Result<&mut Self, Error> {
        let file = self.resolver.open_file(name)?;
        debug!(name, path = ?file.path(), "opened file");

        let descriptor = parse::parse_with_options(name, file.content(), self.options)
            .map_err(|err| Error::parse(name, file.content(), err))?;
        debug!(
            name,
            messages = descriptor.message_type.len(),
            "parsed file"
        );

        self.files.push(descriptor);
        Ok(self)
    }

    /// Returns the descriptors of all files added so far, in the order they were added.
    pub fn files(&self) -> &[FileDescriptorProto] {
        &self.files
    }

    /// Convert all added files into an instance of [`FileDescriptorSet`].
    pub fn file_descriptor_set(&self) -> FileDescriptorSet {
        FileDescriptorSet {
            file: self.files.clone(),
        }
    }

    /// Convert all added files into an instance of [`FileDescriptorSet`] and encodes it.
    pub fn encode_file_descriptor_set(&self) -> Vec<u8> {
        self.file_descriptor_set().encode_to_vec()
    }
}

impl fmt::Debug for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compiler")
            .field("options", &self.options)
            .field("files", &self.files)
            .finish_non_exhaustive()
    }
}
