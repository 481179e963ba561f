use crate::{
    error::{SchemaError, SchemaWarning},
    node::{EnumSpec, EnumValue},
    types::ScalarType,
};

/// Turn an enum source into the flat value list the driver accepts.
///
/// String storage requires every mapped value to be a string. Number
/// storage drops the reverse entries of a numeric enum; a numeric value with
/// no reverse entry is fatal. Any other storage keeps the values and warns.
pub(crate) fn derive_enum(
    class: &str,
    field: &str,
    spec: &EnumSpec,
    scalar: Option<ScalarType>,
    warnings: &mut Vec<SchemaWarning>,
) -> Result<Vec<EnumValue>, SchemaError> {
    let entries = match spec {
        EnumSpec::Mapping(entries) => entries,
        EnumSpec::Values(values) => {
            if !scalar.is_some_and(|s| s.is_string() || s.is_number()) {
                warnings.push(unsupported(class, field));
            }

            return Ok(values.clone());
        }
    };

    match scalar {
        Some(ScalarType::String) => entries
            .iter()
            .map(|(key, value)| match value {
                EnumValue::String(_) => Ok(value.clone()),
                _ => Err(SchemaError::EnumNotString {
                    class: class.to_string(),
                    field: field.to_string(),
                    key: key.clone(),
                    value: value.to_string(),
                }),
            })
            .collect(),

        Some(ScalarType::Number) => {
            let mut values = Vec::new();
            for (key, value) in entries {
                let reversed = match value {
                    EnumValue::Null => false,
                    _ => {
                        let text = value.to_string();
                        entries.iter().any(|(k, _)| *k == text)
                    }
                };
                if !reversed {
                    return Err(SchemaError::EnumNotNumber {
                        class: class.to_string(),
                        field: field.to_string(),
                        key: key.clone(),
                        value: value.to_string(),
                    });
                }
                if value.is_number() {
                    values.push(value.clone());
                }
            }

            Ok(values)
        }

        _ => {
            warnings.push(unsupported(class, field));

            Ok(spec.flatten())
        }
    }
}

fn unsupported(class: &str, field: &str) -> SchemaWarning {
    SchemaWarning::EnumOnUnsupportedType {
        class: class.to_string(),
        field: field.to_string(),
    }
}

///
/// TESTS
///
