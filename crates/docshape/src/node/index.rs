use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::{
    fmt::{self, Display},
    ops::Not,
};

///
/// IndexOrder
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum IndexOrder {
    #[default]
    Asc,
    Desc,
    Geo2dSphere,
    Hashed,
    Text,
}

impl IndexOrder {
    #[must_use]
    pub fn to_json(self) -> Value {
        match self {
            Self::Asc => json!(1),
            Self::Desc => json!(-1),
            Self::Geo2dSphere => json!("2dsphere"),
            Self::Hashed => json!("hashed"),
            Self::Text => json!("text"),
        }
    }
}

///
/// IndexOptions
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IndexOptions {
    #[serde(skip_serializing_if = "Not::not")]
    pub unique: bool,

    #[serde(skip_serializing_if = "Not::not")]
    pub sparse: bool,

    #[serde(skip_serializing_if = "Not::not")]
    pub background: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expire_after_seconds: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub partial_filter_expression: Option<Value>,
}

///
/// Index
///
/// Compound index over one or more paths, attached to the final fragment in
/// declaration order. Duplicates are kept.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Index {
    pub fields: Vec<(String, IndexOrder)>,
    pub options: IndexOptions,
}

impl Index {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|f| (f.into(), IndexOrder::Asc))
                .collect(),
            options: IndexOptions::default(),
        }
    }

    #[must_use]
    pub fn ordered(fields: Vec<(String, IndexOrder)>) -> Self {
        Self {
            fields,
            options: IndexOptions::default(),
        }
    }

    #[must_use]
    pub const fn unique(mut self) -> Self {
        self.options.unique = true;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: IndexOptions) -> Self {
        self.options = options;
        self
    }

    /// Field specification in driver form, e.g. `{"email": 1, "age": -1}`.
    #[must_use]
    pub fn spec(&self) -> Value {
        let map: Map<String, Value> = self
            .fields
            .iter()
            .map(|(name, order)| (name.clone(), order.to_json()))
            .collect();

        Value::Object(map)
    }
}

impl Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = self
            .fields
            .iter()
            .map(|(name, _)| name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        if self.options.unique {
            write!(f, "UNIQUE ({fields})")
        } else {
            write!(f, "({fields})")
        }
    }
}

///
/// TESTS
///
