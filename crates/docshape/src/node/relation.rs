use crate::node::{Func, RefTarget, TypeRef, ValueFn};
use serde_json::Value;

///
/// DiscriminatorSource
///
/// One raw entry of a `discriminators` list: either a bare type, or an
/// object form that may carry an explicit stored value.
///

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiscriminatorSource {
    Type(TypeRef),
    Entry {
        ty: Option<TypeRef>,
        value: Option<String>,
    },
}

impl DiscriminatorSource {
    pub fn class(name: impl Into<String>) -> Self {
        Self::Type(TypeRef::class(name))
    }

    pub fn with_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Entry {
            ty: Some(TypeRef::class(name)),
            value: Some(value.into()),
        }
    }
}

///
/// DiscriminatorEntry
///
/// Validated discriminator entry. `value` defaults to the class name.
///

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiscriminatorEntry {
    pub class: String,
    pub value: Option<String>,
}

impl DiscriminatorEntry {
    #[must_use]
    pub fn stored_value(&self) -> &str {
        self.value.as_deref().unwrap_or(&self.class)
    }
}

///
/// VirtualRelation
///
/// Populate-style relation resolved at query time; it has no stored path.
///

#[derive(Clone, Debug, PartialEq)]
pub struct VirtualRelation {
    pub reference: RefTarget,
    pub local_field: String,
    pub foreign_field: String,
    pub just_one: Option<bool>,
    pub count: Option<bool>,
    pub match_filter: Option<Value>,
    pub options: Option<Value>,
}

///
/// Accessor
///

#[derive(Clone, Debug, PartialEq)]
pub struct Accessor {
    pub get: Func<ValueFn>,
    pub set: Func<ValueFn>,
}
