//! Parsing of protobuf source files into file descriptors.
//!
//! The supported grammar covers `package` declarations, `message` declarations
//! (nested to any depth) and labelled fields:
//!
//! ```text
//! file         := ( package-decl | message-decl )* EOF
//! package-decl := "package" IDENT ";"
//! message-decl := "message" IDENT "{" ( field-decl | message-decl )* "}"
//! field-decl   := LABEL type-ref IDENT "=" NUMBER ";"
//! ```

mod cursor;
mod error;
mod lex;

use std::{
    mem,
    num::{IntErrorKind, ParseIntError},
};

use prost_types::{DescriptorProto, FieldDescriptorProto, FileDescriptorProto};

pub use self::error::{FieldNumberError, ParseError, ParseErrorKind};

use self::cursor::TokenCursor;
use crate::types::{label_from_keyword, scalar_type_from_keyword};

/// How to treat tokens inside a message body that do not start a field, a nested message or the closing brace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownContent {
    /// Silently ignore the token and continue with the rest of the body.
    ///
    /// This keeps files containing constructs which are not understood yet (enums, options, oneofs)
    /// parseable, at the cost of hiding mistakes such as misspelled labels.
    #[default]
    Skip,
    /// Fail with [`ParseErrorKind::UnknownMessageContent`].
    Reject,
}

/// Options controlling how a file is parsed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    unknown_content: UnknownContent,
}

impl ParseOptions {
    /// Creates the default options.
    pub fn new() -> Self {
        ParseOptions::default()
    }

    /// Sets the policy for unrecognized tokens in message bodies. Defaults to [`UnknownContent::Skip`].
    pub fn unknown_content(mut self, policy: UnknownContent) -> Self {
        self.unknown_content = policy;
        self
    }
}

/// Parses a single protobuf source file into a [`FileDescriptorProto`].
///
/// The descriptor's name is set to `name` before parsing begins. Only syntax is checked: type
/// names are not resolved, and names are not validated.
///
/// # Errors
///
/// Returns the first error encountered. No partially-parsed descriptor is returned.
///
/// # Examples
///
/// ```
/// # use protolite::parse;
/// # use prost_types::{DescriptorProto, FieldDescriptorProto, FileDescriptorProto, field_descriptor_proto::Label};
/// let file = parse("foo.proto", "package foo; message Bar { optional Baz baz = 1; }").unwrap();
/// assert_eq!(file, FileDescriptorProto {
///     name: Some("foo.proto".to_owned()),
///     package: Some("foo".to_owned()),
///     message_type: vec![DescriptorProto {
///         name: Some("Bar".to_owned()),
///         field: vec![FieldDescriptorProto {
///             name: Some("baz".to_owned()),
///             number: Some(1),
///             label: Some(Label::Optional as i32),
///             type_name: Some("Baz".to_owned()),
///             ..Default::default()
///         }],
///         ..Default::default()
///     }],
///     ..Default::default()
/// });
/// ```
pub fn parse(name: &str, source: &str) -> Result<FileDescriptorProto, ParseError> {
    parse_with_options(name, source, ParseOptions::default())
}

/// Parses a single protobuf source file with the given options.
///
/// See [`parse()`] for details.
pub fn parse_with_options(
    name: &str,
    source: &str,
    options: ParseOptions,
) -> Result<FileDescriptorProto, ParseError> {
    let mut file = FileDescriptorProto {
        name: Some(name.to_owned()),
        ..Default::default()
    };

    let mut parser = Parser::new(source, options);
    parser.parse_file(&mut file)?;
    parser.finish()?;

    Ok(file)
}

struct Parser<'a> {
    tokens: TokenCursor<'a>,
    options: ParseOptions,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str, options: ParseOptions) -> Self {
        Parser {
            tokens: TokenCursor::new(source),
            options,
        }
    }

    fn parse_file(&mut self, file: &mut FileDescriptorProto) -> Result<(), ParseError> {
        loop {
            let token = self.tokens.advance()?;
            match token.value {
                "package" => {
                    // A later declaration replaces an earlier one.
                    file.package = Some(self.tokens.advance()?.value.to_owned());
                    self.expect(";")?;
                }
                "message" => {
                    self.tokens.pushback()?;
                    file.message_type.push(self.parse_message()?);
                }
                "" => return Ok(()),
                found => {
                    return Err(self.tokens.fail(ParseErrorKind::UnknownTopLevel {
                        found: found.to_owned(),
                    }))
                }
            }
        }
    }

    fn parse_message(&mut self) -> Result<DescriptorProto, ParseError> {
        let mut message = self.parse_message_header()?;
        // Enclosing messages whose bodies are still open, innermost last.
        let mut parents = Vec::new();

        loop {
            let token = self.tokens.advance()?;
            match token.value {
                "required" | "optional" | "repeated" => {
                    self.tokens.pushback()?;
                    message.field.push(self.parse_field()?);
                }
                "message" => {
                    self.tokens.pushback()?;
                    let nested = self.parse_message_header()?;
                    parents.push(mem::replace(&mut message, nested));
                }
                "}" => match parents.pop() {
                    Some(parent) => {
                        let nested = mem::replace(&mut message, parent);
                        message.nested_type.push(nested);
                    }
                    None => return Ok(message),
                },
                "" => return Err(self.tokens.fail(ParseErrorKind::UnexpectedEof)),
                found => match self.options.unknown_content {
                    UnknownContent::Skip => continue,
                    UnknownContent::Reject => {
                        return Err(self.tokens.fail(ParseErrorKind::UnknownMessageContent {
                            found: found.to_owned(),
                        }))
                    }
                },
            }
        }
    }

    fn parse_message_header(&mut self) -> Result<DescriptorProto, ParseError> {
        self.expect("message")?;

        let message = DescriptorProto {
            name: Some(self.tokens.advance()?.value.to_owned()),
            ..Default::default()
        };

        self.expect("{")?;
        Ok(message)
    }

    fn parse_field(&mut self) -> Result<FieldDescriptorProto, ParseError> {
        let mut field = FieldDescriptorProto::default();

        let token = self.tokens.advance()?;
        match label_from_keyword(token.value) {
            Some(label) => field.set_label(label),
            None => {
                return Err(self.tokens.fail(ParseErrorKind::ExpectedLabel {
                    found: token.value.to_owned(),
                }))
            }
        }

        let token = self.tokens.advance()?;
        match scalar_type_from_keyword(token.value) {
            Some(ty) => field.set_type(ty),
            None => field.type_name = Some(token.value.to_owned()),
        }

        field.name = Some(self.tokens.advance()?.value.to_owned());

        self.expect("=")?;

        let token = self.tokens.advance()?;
        match parse_field_number(token.value) {
            Ok(number) => field.number = Some(number),
            Err(reason) => {
                return Err(self.tokens.fail(ParseErrorKind::InvalidFieldNumber {
                    value: token.value.to_owned(),
                    reason,
                }))
            }
        }

        self.expect(";")?;

        Ok(field)
    }

    /// Fails if any input is left after the grammar has finished.
    ///
    /// `parse_file` only returns at the end of input, so this never fails after a whole file.
    /// It guards declarations which stop early.
    fn finish(&mut self) -> Result<(), ParseError> {
        if self.tokens.remainder().is_empty() {
            Ok(())
        } else {
            Err(self.tokens.fail(ParseErrorKind::UnconsumedInput))
        }
    }

    fn expect(&mut self, expected: &'static str) -> Result<(), ParseError> {
        let token = self.tokens.advance()?;
        if token.value == expected {
            Ok(())
        } else {
            Err(self.tokens.fail(ParseErrorKind::UnexpectedToken {
                expected,
                found: token.value.to_owned(),
            }))
        }
    }
}

fn parse_field_number(value: &str) -> Result<i32, FieldNumberError> {
    let number: i64 = value.parse().map_err(|err: ParseIntError| match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => FieldNumberError::OutOfRange,
        _ => FieldNumberError::Invalid(err),
    })?;

    i32::try_from(number).map_err(|_| FieldNumberError::OutOfRange)
}
