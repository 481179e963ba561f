//! Option layers that shape a synthesized fragment.
//!
//! Three layers are merged for every class: the global options held by the
//! context, the class-level `ModelOptions`, and an optional per-call override.
//! Merging is shallow; a key set on a later layer wins.

use crate::{error::SchemaError, types::Severity};
use serde::{Deserialize, Serialize};

/// Discriminator key used when no layer sets one.
pub const DEFAULT_DISCRIMINATOR_KEY: &str = "__t";

///
/// SchemaOptions
///
/// Schema-wide options passed through to the driver's schema constructor.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SchemaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub discriminator_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamps: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimize: Option<bool>,
}

impl SchemaOptions {
    /// Shallow merge where every key set on `later` wins.
    #[must_use]
    pub fn merge(&self, later: &Self) -> Self {
        Self {
            collection: later.collection.clone().or_else(|| self.collection.clone()),
            discriminator_key: later
                .discriminator_key
                .clone()
                .or_else(|| self.discriminator_key.clone()),
            timestamps: later.timestamps.or(self.timestamps),
            id: later.id.or(self.id),
            version_key: later
                .version_key
                .clone()
                .or_else(|| self.version_key.clone()),
            strict: later.strict.or(self.strict),
            minimize: later.minimize.or(self.minimize),
        }
    }

    /// Key under which the driver stores the discriminator value.
    #[must_use]
    pub fn discriminator_key(&self) -> &str {
        self.discriminator_key
            .as_deref()
            .unwrap_or(DEFAULT_DISCRIMINATOR_KEY)
    }
}

///
/// BehaviorOptions
///
/// Engine behavior switches (not forwarded to the driver).
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BehaviorOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_mixed: Option<Severity>,
}

impl BehaviorOptions {
    #[must_use]
    pub fn merge(&self, later: &Self) -> Self {
        Self {
            allow_mixed: later.allow_mixed.or(self.allow_mixed),
        }
    }

    #[must_use]
    pub fn allow_mixed(&self) -> Severity {
        self.allow_mixed.unwrap_or_default()
    }
}

///
/// ModelOptions
///
/// Class-level option layer.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModelOptions {
    pub schema_options: SchemaOptions,
    pub options: BehaviorOptions,
}

impl ModelOptions {
    #[must_use]
    pub fn merge(&self, later: &Self) -> Self {
        Self {
            schema_options: self.schema_options.merge(&later.schema_options),
            options: self.options.merge(&later.options),
        }
    }
}

///
/// GlobalOptions
///
/// Defaults applied to every class synthesized by one context.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GlobalOptions {
    pub schema_options: SchemaOptions,
    pub options: BehaviorOptions,
}

impl GlobalOptions {
    /// Parse global options from a JSON document.
    pub fn from_json_str(input: &str) -> Result<Self, SchemaError> {
        serde_json::from_str(input).map_err(|err| SchemaError::Config {
            message: err.to_string(),
        })
    }

    // class layer on top of the global layer
    #[must_use]
    pub fn layer(&self, class: &ModelOptions) -> ModelOptions {
        ModelOptions {
            schema_options: self.schema_options.clone(),
            options: self.options,
        }
        .merge(class)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_layer_wins_on_conflict() {
        let global = SchemaOptions {
            collection: Some("global".into()),
            timestamps: Some(true),
            ..Default::default()
        };
        let class = SchemaOptions {
            collection: Some("class".into()),
            ..Default::default()
        };

        let merged = global.merge(&class);
        assert_eq!(merged.collection.as_deref(), Some("class"));
        assert_eq!(merged.timestamps, Some(true));
    }

    #[test]
    fn discriminator_key_defaults() {
        assert_eq!(SchemaOptions::default().discriminator_key(), "__t");

        let opts = SchemaOptions {
            discriminator_key: Some("kind".into()),
            ..Default::default()
        };
        assert_eq!(opts.discriminator_key(), "kind");
    }

    #[test]
    fn global_options_parse_from_json() {
        let opts = GlobalOptions::from_json_str(
            r#"{ "schemaOptions": { "timestamps": true }, "options": { "allowMixed": "Error" } }"#,
        )
        .expect("valid global options");

        assert_eq!(opts.schema_options.timestamps, Some(true));
        assert_eq!(opts.options.allow_mixed(), Severity::Error);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = GlobalOptions::from_json_str("{ nope").expect_err("invalid json");
        assert!(matches!(err, SchemaError::Config { .. }));
    }

    #[test]
    fn class_layer_overrides_global_behavior() {
        let global = GlobalOptions {
            options: BehaviorOptions {
                allow_mixed: Some(Severity::Error),
            },
            ..Default::default()
        };
        let class = ModelOptions {
            options: BehaviorOptions {
                allow_mixed: Some(Severity::Allow),
            },
            ..Default::default()
        };

        assert_eq!(global.layer(&class).options.allow_mixed(), Severity::Allow);
        assert_eq!(
            global.layer(&ModelOptions::default()).options.allow_mixed(),
            Severity::Error
        );
    }
}
