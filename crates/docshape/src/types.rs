use derive_more::{Display, FromStr};
use serde::{Deserialize, Serialize};

///
/// Primitive
///
/// Language-side primitive names a field may declare. Only a subset maps to a
/// driver scalar; `Object` and `Mixed` are the untyped escape hatches.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, Hash, PartialEq, Serialize)]
#[remain::sorted]
pub enum Primitive {
    BigInt,
    Boolean,
    Buffer,
    Bytes,
    Date,
    Decimal128,
    Mixed,
    Number,
    Object,
    ObjectId,
    String,
    Uuid,
}

impl Primitive {
    /// Driver scalar this primitive is stored as, if any.
    /// Language-native bytes are stored as the driver's binary type.
    #[must_use]
    pub const fn scalar(self) -> Option<ScalarType> {
        match self {
            Self::BigInt => Some(ScalarType::BigInt),
            Self::Boolean => Some(ScalarType::Boolean),
            Self::Buffer | Self::Bytes => Some(ScalarType::Buffer),
            Self::Date => Some(ScalarType::Date),
            Self::Decimal128 => Some(ScalarType::Decimal128),
            Self::Number => Some(ScalarType::Number),
            Self::ObjectId => Some(ScalarType::ObjectId),
            Self::String => Some(ScalarType::String),
            Self::Uuid => Some(ScalarType::Uuid),
            Self::Mixed | Self::Object => None,
        }
    }
}

///
/// ScalarType
///
/// Closed set of scalar type tags understood by the document driver.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[remain::sorted]
pub enum ScalarType {
    BigInt,
    Boolean,
    Buffer,
    Date,
    Decimal128,
    Number,
    ObjectId,
    String,
    Uuid,
}

impl ScalarType {
    #[must_use]
    pub const fn is_string(self) -> bool {
        matches!(self, Self::String)
    }

    #[must_use]
    pub const fn is_number(self) -> bool {
        matches!(self, Self::Number)
    }

    // types the driver accepts as the stored value of a reference
    #[must_use]
    pub const fn is_ref_type(self) -> bool {
        matches!(
            self,
            Self::Buffer | Self::Number | Self::ObjectId | Self::String
        )
    }
}

///
/// ContainerKind
///
/// Shape of a field before its element type is known.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, FromStr, PartialEq, Serialize)]
pub enum ContainerKind {
    #[default]
    Single,
    Array,
    Map,
}

///
/// Severity
///
/// How loudly the engine reacts to a field collapsing to `Mixed`.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, FromStr, PartialEq, Serialize)]
pub enum Severity {
    Allow,
    #[default]
    Warn,
    Error,
}

///
/// HookStage
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, PartialEq, Serialize)]
pub enum HookStage {
    Pre,
    Post,
}

///
/// TESTS
///
