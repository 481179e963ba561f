//! Property processor: turns one validated field configuration into a
//! stored path, a virtual relation, or a recorded discriminator list.

use crate::{
    build::{
        enums::derive_enum,
        registry::SynthesisState,
        resolve::{Element, resolve},
        schema::Builder,
    },
    config::BehaviorOptions,
    error::{SchemaError, SchemaWarning},
    fragment::{Container, FieldDescriptor, RefKind, StorageType, VirtualField},
    node::{Accessor, EnumSpec, EnumValue, FieldConfig, FieldShape, RefTarget, TypeRef},
    types::{ContainerKind, ScalarType, Severity},
};
use tracing::debug;

// deferred targets that keep returning deferred targets
const MAX_DEFERRED_DEPTH: usize = 16;

impl Builder<'_> {
    pub(super) fn process_prop(
        &mut self,
        class: &str,
        config: &FieldConfig,
        behavior: BehaviorOptions,
    ) -> Result<(), SchemaError> {
        let field = config.name.as_str();
        debug!(class, field, "processing prop");

        if let Some(entry) = self.registry.entry_mut(class) {
            if config.discriminators.is_empty() {
                entry.discriminators.remove(field);
            } else {
                debug!(class, field, "found discriminators");
                entry
                    .discriminators
                    .insert(field.to_string(), config.discriminators.clone());
            }
        }

        let descriptor = match &config.shape {
            FieldShape::Virtual(relation) => {
                let reference = normalize_ref(class, field, &relation.reference)?;
                let virtual_field = VirtualField {
                    reference,
                    local_field: relation.local_field.clone(),
                    foreign_field: relation.foreign_field.clone(),
                    just_one: relation.just_one,
                    count: relation.count,
                    match_filter: relation.match_filter.clone(),
                    options: relation.options.clone(),
                };

                if let Some(entry) = self.registry.entry_mut(class) {
                    entry.paths.remove(field);
                    entry.virtuals.insert(field.to_string(), virtual_field);
                }

                return Ok(());
            }
            FieldShape::Accessor(accessor) => {
                self.accessor_field(class, config, accessor, behavior)?
            }
            FieldShape::Reference(target) => {
                let name = normalize_ref(class, field, target)?;
                self.reference_field(class, config, RefKind::Model(name), "ref")?
            }
            FieldShape::ReferencePath(path) => {
                self.reference_field(class, config, RefKind::Path(path.clone()), "ref_path")?
            }
            FieldShape::Value {
                enumeration,
                add_null,
            } => self.value_field(class, config, enumeration.as_ref(), *add_null, behavior)?,
        };

        if let Some(entry) = self.registry.entry_mut(class) {
            entry.virtuals.remove(field);
            entry.paths.insert(field.to_string(), descriptor);
        }

        Ok(())
    }

    // Accessor-backed fields skip reference and enum handling; anything that
    // is neither a scalar nor a known class is stored as Mixed.
    fn accessor_field(
        &mut self,
        class: &str,
        config: &FieldConfig,
        accessor: &Accessor,
        behavior: BehaviorOptions,
    ) -> Result<FieldDescriptor, SchemaError> {
        let resolved = resolve(class, config)?;

        let storage = match resolved.element {
            Element::Class(name) if self.registry.contains(&name) => {
                self.embed(&name)?;
                StorageType::Embedded(name)
            }
            Element::Scalar(s) => StorageType::Scalar(s),
            Element::Class(_) | Element::Mixed | Element::Object | Element::Unspecified => {
                self.mixed(class, &config.name, behavior)?;
                StorageType::Mixed
            }
        };

        let mut descriptor = described(config, storage, resolved.container);
        descriptor.accessor = Some(accessor.clone());

        Ok(descriptor)
    }

    fn reference_field(
        &self,
        class: &str,
        config: &FieldConfig,
        target: RefKind,
        option: &'static str,
    ) -> Result<FieldDescriptor, SchemaError> {
        let resolved = resolve(class, config)?;

        if resolved.container == Container::Map {
            return Err(SchemaError::UnsupportedContainer {
                class: class.to_string(),
                field: config.name.clone(),
                option,
                container: ContainerKind::Map,
            });
        }

        // identifier-like primitives are kept, anything else is an ObjectId
        let id = match resolved.element {
            Element::Scalar(s) if s.is_ref_type() => s,
            _ => ScalarType::ObjectId,
        };

        Ok(described(
            config,
            StorageType::Reference { id, target },
            resolved.container,
        ))
    }

    fn value_field(
        &mut self,
        class: &str,
        config: &FieldConfig,
        enumeration: Option<&EnumSpec>,
        add_null: bool,
        behavior: BehaviorOptions,
    ) -> Result<FieldDescriptor, SchemaError> {
        let field = config.name.as_str();
        let resolved = resolve(class, config)?;

        let storage = match resolved.element {
            Element::Unspecified => {
                return Err(SchemaError::InvalidType {
                    class: class.to_string(),
                    field: field.to_string(),
                    ty: describe_type(config),
                });
            }
            Element::Class(name) => {
                if !self.registry.contains(&name) {
                    return Err(SchemaError::InvalidType {
                        class: class.to_string(),
                        field: field.to_string(),
                        ty: name,
                    });
                }
                self.embed(&name)?;
                StorageType::Embedded(name)
            }
            Element::Mixed | Element::Object => {
                self.mixed(class, field, behavior)?;
                StorageType::Mixed
            }
            Element::Scalar(s) => StorageType::Scalar(s),
        };
        let scalar = storage.scalar();

        let mut enum_values = match enumeration {
            Some(spec) => {
                let mut found = Vec::new();
                let values = derive_enum(class, field, spec, scalar, &mut found)?;
                for warning in found {
                    self.warn(warning);
                }
                Some(values)
            }
            None => None,
        };
        if add_null {
            enum_values.get_or_insert_with(Vec::new).push(EnumValue::Null);
        }

        self.check_rule_types(class, config, scalar);

        let mut descriptor = described(config, storage, resolved.container);
        descriptor.enum_values = enum_values;

        Ok(descriptor)
    }

    // Embed a class by name; a class already resolving further up the stack
    // is referenced without recursing.
    fn embed(&mut self, name: &str) -> Result<(), SchemaError> {
        if self.registry.state(name) == SynthesisState::Resolving {
            debug!(class = name, "class is resolving, embedding by name");
            return Ok(());
        }

        self.synthesize(name, None, None, false).map(|_| ())
    }

    fn mixed(
        &mut self,
        class: &str,
        field: &str,
        behavior: BehaviorOptions,
    ) -> Result<(), SchemaError> {
        match behavior.allow_mixed() {
            Severity::Allow => Ok(()),
            Severity::Warn => {
                self.warn(SchemaWarning::MixedFallback {
                    class: class.to_string(),
                    field: field.to_string(),
                });
                Ok(())
            }
            Severity::Error => Err(SchemaError::MixedNotAllowed {
                class: class.to_string(),
                field: field.to_string(),
            }),
        }
    }

    fn check_rule_types(&mut self, class: &str, config: &FieldConfig, scalar: Option<ScalarType>) {
        let is_string = scalar.is_some_and(ScalarType::is_string);
        let is_number = scalar.is_some_and(ScalarType::is_number);

        let groups = [
            ("string validation", "String", config.string.has_validation() && !is_string),
            ("string transform", "String", config.string.has_transform() && !is_string),
            ("number validation", "Number", config.number.has_validation() && !is_number),
        ];

        for (group, expected, mismatched) in groups {
            if mismatched {
                self.warn(SchemaWarning::OptionTypeMismatch {
                    class: class.to_string(),
                    field: config.name.clone(),
                    group,
                    expected,
                });
            }
        }
    }
}

// descriptor carrying the field's own options and rules
fn described(config: &FieldConfig, storage: StorageType, container: Container) -> FieldDescriptor {
    let mut descriptor = FieldDescriptor::new(storage, container);
    descriptor.options = config.options.clone();
    descriptor.string = config.string.clone();
    descriptor.number = config.number.clone();

    descriptor
}

fn describe_type(config: &FieldConfig) -> String {
    config
        .ty
        .as_ref()
        .or(config.declared.as_ref())
        .map_or_else(|| "undefined".to_string(), ToString::to_string)
}

/// Reduce a `ref` target to the referenced class name.
pub(crate) fn normalize_ref(
    class: &str,
    field: &str,
    target: &RefTarget,
) -> Result<String, SchemaError> {
    let mut current = target.clone();

    for _ in 0..MAX_DEFERRED_DEPTH {
        match current {
            RefTarget::Deferred(thunk) => current = thunk.call(),
            RefTarget::Name(name) if name.trim().is_empty() => {
                return Err(SchemaError::EmptyReference {
                    class: class.to_string(),
                    field: field.to_string(),
                });
            }
            RefTarget::Name(name) => return Ok(name),
            RefTarget::Type(ty) => {
                let (inner, dim) = ty.unwrap_arrays();
                if dim > 0 {
                    return Err(SchemaError::ReferenceDimensions {
                        class: class.to_string(),
                        field: field.to_string(),
                        dim,
                    });
                }

                return match inner {
                    TypeRef::Class(name) if !name.trim().is_empty() => Ok(name.clone()),
                    TypeRef::Class(_) => Err(SchemaError::EmptyReference {
                        class: class.to_string(),
                        field: field.to_string(),
                    }),
                    other => Err(SchemaError::InvalidReferenceTarget {
                        class: class.to_string(),
                        field: field.to_string(),
                        target: other.to_string(),
                    }),
                };
            }
        }
    }

    Err(SchemaError::EmptyReference {
        class: class.to_string(),
        field: field.to_string(),
    })
}

///
/// TESTS
///
