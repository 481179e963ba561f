//! Fixture builders shared by the crate's tests.

use crate::{
    build::{Schema, SchemaContext},
    node::{ClassDecl, PropOptions, TypeRef},
    types::Primitive,
};
use serde_json::Value;

#[must_use]
pub fn string() -> PropOptions {
    PropOptions::typed(Primitive::String)
}

#[must_use]
pub fn number() -> PropOptions {
    PropOptions::typed(Primitive::Number)
}

#[must_use]
pub fn class(name: &str) -> PropOptions {
    PropOptions::typed(TypeRef::class(name))
}

#[must_use]
pub fn array_of(inner: impl Into<TypeRef>) -> PropOptions {
    PropOptions::typed(TypeRef::array_of(inner))
}

/// Context with every declaration registered.
pub fn context(decls: impl IntoIterator<Item = ClassDecl>) -> SchemaContext {
    let mut ctx = SchemaContext::new();
    for decl in decls {
        ctx.declare(decl).expect("declaration should be valid");
    }

    ctx
}

pub fn build(ctx: &mut SchemaContext, class: &str) -> Schema {
    ctx.build_schema(class)
        .expect("schema should build")
}

/// Rendered definition of one root path.
pub fn definition(schema: &Schema, path: &str) -> Value {
    schema
        .root
        .path(path)
        .map(crate::fragment::FieldDescriptor::to_definition)
        .unwrap_or(Value::Null)
}
