use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt::{self, Display};

///
/// EnumValue
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EnumValue {
    Null,
    Number(Number),
    String(String),
}

impl EnumValue {
    pub fn string(s: impl Into<String>) -> Self {
        Self::String(s.into())
    }

    #[must_use]
    pub fn int(n: i64) -> Self {
        Self::Number(n.into())
    }

    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Number(n) => Value::Number(n.clone()),
            Self::String(s) => Value::String(s.clone()),
        }
    }
}

impl Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for EnumValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<i64> for EnumValue {
    fn from(n: i64) -> Self {
        Self::int(n)
    }
}

///
/// EnumSpec
///
/// Allowed values for a field. `Mapping` is a language enum object, in
/// declaration order; numeric enums carry their reverse entries
/// (`"0" -> "A"`) alongside the forward ones.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EnumSpec {
    Values(Vec<EnumValue>),
    Mapping(Vec<(String, EnumValue)>),
}

impl EnumSpec {
    pub fn values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<EnumValue>,
    {
        Self::Values(values.into_iter().map(Into::into).collect())
    }

    pub fn mapping<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<EnumValue>,
    {
        Self::Mapping(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Values only, in declaration order.
    #[must_use]
    pub fn flatten(&self) -> Vec<EnumValue> {
        match self {
            Self::Values(values) => values.clone(),
            Self::Mapping(entries) => entries.iter().map(|(_, v)| v.clone()).collect(),
        }
    }
}
