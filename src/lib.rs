//! A front end for the protobuf schema language.
//!
//! Source files are parsed into [`FileDescriptorProto`](prost_types::FileDescriptorProto)s
//! describing their package, messages (including nested messages) and fields. Type names are
//! recorded as written and left for a later pass to resolve.
//!
//! For parsing a batch of files in a single function, see [`compile()`]. For more options see
//! [`Compiler`]. Single files held in memory can be parsed with [`parse()`].
//!
//! # Examples
//!
//! ```
//! # use std::fs;
//! # let tempdir = assert_fs::TempDir::new().unwrap();
//! # fs::write(tempdir.path().join("root.proto"), "message Foo { required int32 id = 1; }").unwrap();
//! let file_descriptors = protolite::compile(["root.proto"], tempdir.path()).unwrap();
//! assert_eq!(file_descriptors.file[0].message_type[0].name(), "Foo");
//! ```
//!
//! ### Error messages
//!
//! This crate uses [`miette`](https://crates.io/crates/miette) to add additional details to errors. For nice error messages, add `miette` as a dependency with the `fancy` feature enabled.
//!
//! Example error message:
//!
//! ```text
//! Error:
//!   × line 3: expected "=", found "1"
//!    ╭─[root.proto:2:1]
//!  2 │ message Foo {
//!  3 │     required int32 id 1;
//!    ·                       ┬
//!    ·                       ╰── found here
//!  4 │ }
//!    ╰────
//! ```
#![warn(missing_debug_implementations, missing_docs)]
#![deny(unsafe_code)]

pub mod file;

mod compile;
mod error;
mod parse;
mod types;

use std::path::Path;

use prost_types::FileDescriptorSet;

pub use {
    compile::Compiler,
    error::Error,
    parse::{
        parse, parse_with_options, FieldNumberError, ParseError, ParseErrorKind, ParseOptions,
        UnknownContent,
    },
};

/// Parse a batch of protobuf source files into a [`FileDescriptorSet`].
///
/// Each name is opened relative to `include`, and the descriptors are returned in the same order
/// as `files`. This is a convenience function for the common case; for more options see [`Compiler`].
///
/// # Errors
///
/// Fails at the first file which cannot be opened or does not parse. No descriptors are returned
/// in that case, even for files which parsed successfully.
pub fn compile(
    files: impl IntoIterator<Item = impl AsRef<str>>,
    include: impl AsRef<Path>,
) -> Result<FileDescriptorSet, Error> {
    let mut compiler = Compiler::new(include);

    for file in files {
        compiler.add_file(file.as_ref())?;
    }

    Ok(compiler.file_descriptor_set())
}
