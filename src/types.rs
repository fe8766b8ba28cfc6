//! Keyword tables mapping source text onto the descriptor enums.

pub(crate) use prost_types::field_descriptor_proto::{Label, Type};

/// Returns the field label named by `keyword`, if it is one of `required`, `optional` or `repeated`.
pub(crate) fn label_from_keyword(keyword: &str) -> Option<Label> {
    match keyword {
        "required" => Some(Label::Required),
        "optional" => Some(Label::Optional),
        "repeated" => Some(Label::Repeated),
        _ => None,
    }
}

/// Returns the scalar type named by `keyword`.
///
/// Message, enum and group types are never returned here: any other word is a type name
/// which is resolved by a later pass.
pub(crate) fn scalar_type_from_keyword(keyword: &str) -> Option<Type> {
    match keyword {
        "double" => Some(Type::Double),
        "float" => Some(Type::Float),
        "int64" => Some(Type::Int64),
        "uint64" => Some(Type::Uint64),
        "int32" => Some(Type::Int32),
        "fixed64" => Some(Type::Fixed64),
        "fixed32" => Some(Type::Fixed32),
        "bool" => Some(Type::Bool),
        "string" => Some(Type::String),
        "bytes" => Some(Type::Bytes),
        "uint32" => Some(Type::Uint32),
        "sfixed32" => Some(Type::Sfixed32),
        "sfixed64" => Some(Type::Sfixed64),
        "sint32" => Some(Type::Sint32),
        "sint64" => Some(Type::Sint64),
        _ => None,
    }
}
