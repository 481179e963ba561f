use crate::types::ContainerKind;
use derive_more::Display;
use thiserror::Error as ThisError;

///
/// SchemaError
///
/// Fatal configuration defects. Any of these aborts the whole synthesis call;
/// nothing built during that call becomes visible.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SchemaError {
    #[error("field name '{field}' on '{class}' must be a plain name")]
    InvalidFieldName { class: String, field: String },

    #[error("class name '{class}' must be non-empty and free of whitespace")]
    InvalidClassName { class: String },

    #[error("type of '{class}.{field}' is the enclosing class itself, which is not supported")]
    SelfReference { class: String, field: String },

    #[error("class '{class}' inherits from itself through '{parent}'")]
    InheritanceCycle { class: String, parent: String },

    #[error("class '{class}' is not declared")]
    UnknownClass { class: String },

    #[error("type '{ty}' of '{class}.{field}' cannot be used as a storage type")]
    InvalidType {
        class: String,
        field: String,
        ty: String,
    },

    #[error("'{class}.{field}' declares a virtual relation but is missing '{missing}'")]
    IncompleteVirtual {
        class: String,
        field: String,
        missing: &'static str,
    },

    #[error("'{class}.{field}' cannot declare both a type and a virtual relation")]
    VirtualWithType { class: String, field: String },

    #[error("'{class}.{field}' discriminator index {index}: {reason}")]
    MalformedDiscriminator {
        class: String,
        field: String,
        index: usize,
        reason: String,
    },

    #[error("discriminators on '{class}.{field}': {reason}")]
    DiscriminatorPath {
        class: String,
        field: String,
        reason: String,
    },

    #[error("'{class}.{field}' declares a {present} but no {missing}")]
    UnpairedAccessor {
        class: String,
        field: String,
        present: &'static str,
        missing: &'static str,
    },

    #[error("'ref' of '{class}.{field}' does not support arrays (got {dim} dimensions)")]
    ReferenceDimensions { class: String, field: String, dim: u8 },

    #[error("'ref' of '{class}.{field}' resolves to an empty name")]
    EmptyReference { class: String, field: String },

    #[error("'ref' of '{class}.{field}' must name a class, got '{target}'")]
    InvalidReferenceTarget {
        class: String,
        field: String,
        target: String,
    },

    #[error("'{class}.{field}' cannot declare both 'ref' and 'ref_path'")]
    ConflictingReference { class: String, field: String },

    #[error("'ref_path' of '{class}.{field}' must be a plain path name, got '{path}'")]
    InvalidRefPath {
        class: String,
        field: String,
        path: String,
    },

    #[error("enum of '{class}.{field}' has non-string value '{value}' under key '{key}'")]
    EnumNotString {
        class: String,
        field: String,
        key: String,
        value: String,
    },

    #[error(
        "enum of '{class}.{field}' has value '{value}' under key '{key}' without a reverse mapping"
    )]
    EnumNotNumber {
        class: String,
        field: String,
        key: String,
        value: String,
    },

    #[error("'{option}' is not supported on {container} field '{class}.{field}'")]
    UnsupportedContainer {
        class: String,
        field: String,
        option: &'static str,
        container: ContainerKind,
    },

    #[error("'{class}.{field}' resolves to Mixed, which the allow_mixed setting rejects")]
    MixedNotAllowed { class: String, field: String },

    #[error("invalid configuration: {message}")]
    Config { message: String },
}

impl SchemaError {
    /// Class the error was raised for, when it is tied to one.
    #[must_use]
    pub fn class(&self) -> Option<&str> {
        match self {
            Self::InvalidFieldName { class, .. }
            | Self::InvalidClassName { class }
            | Self::SelfReference { class, .. }
            | Self::InheritanceCycle { class, .. }
            | Self::UnknownClass { class }
            | Self::InvalidType { class, .. }
            | Self::IncompleteVirtual { class, .. }
            | Self::VirtualWithType { class, .. }
            | Self::MalformedDiscriminator { class, .. }
            | Self::DiscriminatorPath { class, .. }
            | Self::UnpairedAccessor { class, .. }
            | Self::ReferenceDimensions { class, .. }
            | Self::EmptyReference { class, .. }
            | Self::InvalidReferenceTarget { class, .. }
            | Self::ConflictingReference { class, .. }
            | Self::InvalidRefPath { class, .. }
            | Self::EnumNotString { class, .. }
            | Self::EnumNotNumber { class, .. }
            | Self::UnsupportedContainer { class, .. }
            | Self::MixedNotAllowed { class, .. } => Some(class),
            Self::Config { .. } => None,
        }
    }
}

///
/// SchemaWarning
///
/// Soft findings. Synthesis continues and falls back to the most permissive
/// representation; each warning is logged and kept on the context.
///

#[derive(Clone, Debug, Display, Eq, PartialEq)]
pub enum SchemaWarning {
    #[display("'{class}.{field}' uses {group} options but is not of type {expected}")]
    OptionTypeMismatch {
        class: String,
        field: String,
        group: &'static str,
        expected: &'static str,
    },

    #[display("'{class}.{field}' is stored as Mixed")]
    MixedFallback { class: String, field: String },

    #[display("'{class}.{field}' declares an enum on a type that is neither String nor Number")]
    EnumOnUnsupportedType { class: String, field: String },

    #[display("'{class}.{field}' sets '{option}' without virtual relation options")]
    OrphanVirtualOption {
        class: String,
        field: String,
        option: &'static str,
    },

    #[display("'{class}.{field}' sets '{option}', which has no effect on this field")]
    IgnoredOption {
        class: String,
        field: String,
        option: &'static str,
    },
}

impl SchemaWarning {
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::OptionTypeMismatch { field, .. }
            | Self::MixedFallback { field, .. }
            | Self::EnumOnUnsupportedType { field, .. }
            | Self::OrphanVirtualOption { field, .. }
            | Self::IgnoredOption { field, .. } => field,
        }
    }
}
