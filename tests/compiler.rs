use std::fs;

use assert_fs::TempDir;
use miette::Diagnostic;
use prost::Message;
use prost_types::{
    field_descriptor_proto::{Label, Type},
    FileDescriptorSet,
};
use protolite::{
    file::{ChainFileResolver, File, FileResolver, IncludeFileResolver},
    Compiler, Error, ParseErrorKind, UnknownContent,
};

struct TestFileResolver {
    files: &'static [(&'static str, &'static str)],
}

impl FileResolver for TestFileResolver {
    fn open_file(&self, name: &str) -> Result<File, Error> {
        for file in self.files {
            if file.0 == name {
                return Ok(File::from_source(file.1));
            }
        }

        Err(Error::file_not_found(name))
    }
}

fn write_files(files: &[(&str, &str)]) -> TempDir {
    let tempdir = TempDir::new().unwrap();
    for (file, source) in files {
        fs::write(tempdir.path().join(file), source).unwrap();
    }
    tempdir
}

#[test]
fn compile_batch() {
    let tempdir = write_files(&[
        (
            "person.proto",
            "package people;

            // A person.
            message Person {
                required string name = 1;
                optional int32 age = 2;
                repeated Address addresses = 3;

                message Address {
                    required string street = 1;
                }
            }",
        ),
        ("empty.proto", ""),
    ]);

    let set = protolite::compile(["person.proto", "empty.proto"], tempdir.path()).unwrap();
    assert_eq!(set.file.len(), 2);

    let person = &set.file[0];
    assert_eq!(person.name(), "person.proto");
    assert_eq!(person.package(), "people");
    assert_eq!(person.message_type.len(), 1);

    let message = &person.message_type[0];
    assert_eq!(message.name(), "Person");
    let fields: Vec<_> = message
        .field
        .iter()
        .map(|field| (field.name(), field.number(), field.label()))
        .collect();
    assert_eq!(
        fields,
        [
            ("name", 1, Label::Required),
            ("age", 2, Label::Optional),
            ("addresses", 3, Label::Repeated),
        ]
    );
    assert_eq!(message.field[0].r#type(), Type::String);
    assert_eq!(message.field[1].r#type(), Type::Int32);
    assert_eq!(message.field[2].type_name(), "Address");
    assert_eq!(message.nested_type[0].name(), "Address");

    assert_eq!(set.file[1].name(), "empty.proto");
    assert!(set.file[1].package.is_none());
    assert!(set.file[1].message_type.is_empty());
}

#[test]
fn compile_fails_on_first_bad_file() {
    let tempdir = write_files(&[
        ("good.proto", "message Good {}"),
        ("bad.proto", "message Bad {"),
        ("worse.proto", "@"),
    ]);

    let err = protolite::compile(["good.proto", "bad.proto", "worse.proto"], tempdir.path())
        .unwrap_err();
    assert!(err.is_parse());
    assert_eq!(err.file(), Some("bad.proto"));
    assert_eq!(
        err.as_parse_error().unwrap().kind(),
        &ParseErrorKind::UnexpectedEof
    );
    assert_eq!(
        err.to_string(),
        "line 1.13: unexpected end while parsing message"
    );
}

#[test]
fn compile_missing_file() {
    let tempdir = write_files(&[("good.proto", "message Good {}")]);

    let err = protolite::compile(["good.proto", "missing.proto"], tempdir.path()).unwrap_err();
    assert!(err.is_file_not_found());
    assert_eq!(err.file(), Some("missing.proto"));
    assert_eq!(err.to_string(), "file 'missing.proto' not found");
}

#[test]
fn parse_error_diagnostic() {
    let mut compiler = Compiler::with_file_resolver(TestFileResolver {
        files: &[("root.proto", "message Foo {\n  required int32 id 1;\n}\n")],
    });
    let err = compiler.add_file("root.proto").unwrap_err();

    assert_eq!(err.to_string(), r#"line 2: expected "=", found "1""#);
    assert!(err.source_code().is_some());

    let labels: Vec<_> = err.labels().unwrap().collect();
    assert_eq!(labels.len(), 1);
    assert_eq!(labels[0].label(), Some("found here"));
    assert_eq!(labels[0].offset(), 34);
    assert_eq!(labels[0].len(), 1);
}

#[test]
fn chained_include_paths() {
    let first = write_files(&[("a.proto", "package first;")]);
    let second = write_files(&[
        ("a.proto", "package second;"),
        ("b.proto", "package second;"),
    ]);

    let mut resolver = ChainFileResolver::new();
    resolver.add(IncludeFileResolver::new(first.path()));
    resolver.add(IncludeFileResolver::new(second.path()));

    let mut compiler = Compiler::with_file_resolver(resolver);
    compiler.add_file("a.proto").unwrap();
    compiler.add_file("b.proto").unwrap();

    let packages: Vec<_> = compiler.files().iter().map(|f| f.package()).collect();
    assert_eq!(packages, ["first", "second"]);
}

#[test]
fn strict_rejects_unknown_content() {
    let tempdir = write_files(&[("root.proto", "message Foo {\n  extensions 100 to 199;\n}")]);

    let set = protolite::compile(["root.proto"], tempdir.path()).unwrap();
    assert!(set.file[0].message_type[0].field.is_empty());

    let mut compiler = Compiler::new(tempdir.path());
    compiler.unknown_content(UnknownContent::Reject);
    let err = compiler.add_file("root.proto").unwrap_err();
    assert_eq!(
        err.as_parse_error().unwrap().kind(),
        &ParseErrorKind::UnknownMessageContent {
            found: "extensions".to_owned(),
        }
    );
    assert_eq!(err.as_parse_error().unwrap().line(), 2);
}

#[test]
fn encoded_descriptor_set_decodes() {
    let tempdir = write_files(&[("a.proto", "package a;\nmessage A { optional bytes b = 15; }")]);

    let mut compiler = Compiler::new(tempdir.path());
    compiler.add_file("a.proto").unwrap();

    let decoded = FileDescriptorSet::decode(compiler.encode_file_descriptor_set().as_slice()).unwrap();
    let field = &decoded.file[0].message_type[0].field[0];
    assert_eq!(field.name(), "b");
    assert_eq!(field.number(), 15);
    assert_eq!(field.r#type(), Type::Bytes);
    assert_eq!(decoded, compiler.file_descriptor_set());
}
