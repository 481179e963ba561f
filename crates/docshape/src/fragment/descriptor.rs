use crate::{
    fragment::Fragment,
    node::{Accessor, EnumValue, FieldOptions, NumberRules, StringRules},
    types::ScalarType,
};
use std::collections::BTreeMap;

///
/// Container
///
/// Wrapper around the element type. Arrays carry their nesting depth.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Container {
    #[default]
    Single,
    Array {
        depth: u8,
    },
    Map,
}

///
/// RefKind
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RefKind {
    /// Fixed target class.
    Model(String),

    /// Target class read per document from another path.
    Path(String),
}

///
/// StorageType
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StorageType {
    Scalar(ScalarType),
    Reference { id: ScalarType, target: RefKind },
    Embedded(String),
    Mixed,
}

impl StorageType {
    #[must_use]
    pub fn embedded_class(&self) -> Option<&str> {
        match self {
            Self::Embedded(name) => Some(name),
            _ => None,
        }
    }

    #[must_use]
    pub const fn scalar(&self) -> Option<ScalarType> {
        match self {
            Self::Scalar(s) => Some(*s),
            _ => None,
        }
    }
}

///
/// FieldDescriptor
///
/// Driver-facing description of one stored path.
///

#[derive(Clone, Debug, PartialEq)]
pub struct FieldDescriptor {
    pub storage: StorageType,
    pub container: Container,
    pub enum_values: Option<Vec<EnumValue>>,
    pub string: StringRules,
    pub number: NumberRules,
    pub options: FieldOptions,
    pub accessor: Option<Accessor>,
    pub discriminators: Option<DiscriminatorSet>,
    pub skip_discriminator_check: bool,
}

impl FieldDescriptor {
    #[must_use]
    pub fn new(storage: StorageType, container: Container) -> Self {
        Self {
            storage,
            container,
            enum_values: None,
            string: StringRules::default(),
            number: NumberRules::default(),
            options: FieldOptions::default(),
            accessor: None,
            discriminators: None,
            skip_discriminator_check: false,
        }
    }

    #[must_use]
    pub const fn reference(&self) -> Option<&RefKind> {
        match &self.storage {
            StorageType::Reference { target, .. } => Some(target),
            _ => None,
        }
    }
}

///
/// DiscriminatorSet
///
/// Sub-fragments attached to an embedded path, keyed by class name.
///

#[derive(Clone, Debug, PartialEq)]
pub struct DiscriminatorSet {
    pub key: String,
    pub children: BTreeMap<String, DiscriminatorChild>,
}

impl DiscriminatorSet {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            children: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn get(&self, class: &str) -> Option<&DiscriminatorChild> {
        self.children.get(class)
    }
}

///
/// DiscriminatorChild
///

#[derive(Clone, Debug, PartialEq)]
pub struct DiscriminatorChild {
    pub value: String,
    pub fragment: Fragment,
}

///
/// VirtualField
///
/// Virtual relation as attached to a final fragment, with its target
/// normalized to a class name.
///

#[derive(Clone, Debug, PartialEq)]
pub struct VirtualField {
    pub reference: String,
    pub local_field: String,
    pub foreign_field: String,
    pub just_one: Option<bool>,
    pub count: Option<bool>,
    pub match_filter: Option<serde_json::Value>,
    pub options: Option<serde_json::Value>,
}
