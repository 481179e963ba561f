use crate::{
    error::{SchemaError, SchemaWarning},
    node::{
        Accessor, DiscriminatorEntry, DiscriminatorSource, EnumSpec, FieldOptions, NumberRules,
        PropOptions, RefTarget, StringRules, TypeRef, VirtualRelation,
    },
    types::ContainerKind,
    validate::naming::{validate_field_name, validate_path},
};

///
/// FieldShape
///
/// What kind of field a configuration describes. Exactly one applies, in
/// this precedence: virtual, accessor, reference, reference path, value.
///

#[derive(Clone, Debug, PartialEq)]
pub enum FieldShape {
    Virtual(VirtualRelation),
    Accessor(Accessor),
    Reference(RefTarget),
    ReferencePath(String),
    Value {
        enumeration: Option<EnumSpec>,
        add_null: bool,
    },
}

impl FieldShape {
    #[must_use]
    pub const fn is_reference(&self) -> bool {
        matches!(self, Self::Reference(_) | Self::ReferencePath(_))
    }
}

///
/// FieldConfig
///
/// Validated configuration for one field of one class. Synthesis reads it and
/// never mutates it, so re-synthesis sees the same input.
///

#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub name: String,
    pub declared: Option<TypeRef>,
    pub ty: Option<TypeRef>,
    pub dim: Option<u8>,
    pub kind: Option<ContainerKind>,
    pub discriminators: Vec<DiscriminatorEntry>,
    pub shape: FieldShape,
    pub options: FieldOptions,
    pub string: StringRules,
    pub number: NumberRules,
}

impl FieldConfig {
    /// Check raw options and settle the field shape. Soft findings are
    /// pushed onto `warnings`.
    pub fn parse(
        class: &str,
        name: &str,
        opts: PropOptions,
        warnings: &mut Vec<SchemaWarning>,
    ) -> Result<Self, SchemaError> {
        validate_field_name(name).map_err(|_| SchemaError::InvalidFieldName {
            class: class.to_string(),
            field: name.to_string(),
        })?;

        let discriminators = match &opts.discriminators {
            Some(list) => parse_discriminators(class, name, list)?,
            None => Vec::new(),
        };

        if opts.reference.is_some() && opts.ref_path.is_some() {
            return Err(SchemaError::ConflictingReference {
                class: class.to_string(),
                field: name.to_string(),
            });
        }

        if let Some(path) = &opts.ref_path
            && validate_path(path).is_err()
        {
            return Err(SchemaError::InvalidRefPath {
                class: class.to_string(),
                field: name.to_string(),
                path: path.clone(),
            });
        }

        let ignored = |option: &'static str| SchemaWarning::IgnoredOption {
            class: class.to_string(),
            field: name.to_string(),
            option,
        };

        let shape = if opts.is_virtual() {
            let relation = parse_virtual(class, name, &opts)?;
            if opts.get.is_some() || opts.set.is_some() {
                warnings.push(ignored("get/set"));
            }
            if opts.enumeration.is_some() {
                warnings.push(ignored("enum"));
            }

            FieldShape::Virtual(relation)
        } else {
            for (option, set) in [
                ("just_one", opts.just_one.is_some()),
                ("count", opts.count.is_some()),
                ("match", opts.match_filter.is_some()),
                ("options", opts.virtual_options.is_some()),
            ] {
                if set {
                    warnings.push(SchemaWarning::OrphanVirtualOption {
                        class: class.to_string(),
                        field: name.to_string(),
                        option,
                    });
                }
            }

            match (&opts.get, &opts.set) {
                (Some(get), Some(set)) => {
                    if opts.reference.is_some() {
                        warnings.push(ignored("ref"));
                    }
                    if opts.ref_path.is_some() {
                        warnings.push(ignored("ref_path"));
                    }
                    if opts.enumeration.is_some() {
                        warnings.push(ignored("enum"));
                    }

                    FieldShape::Accessor(Accessor {
                        get: get.clone(),
                        set: set.clone(),
                    })
                }
                (Some(_), None) => {
                    return Err(SchemaError::UnpairedAccessor {
                        class: class.to_string(),
                        field: name.to_string(),
                        present: "getter",
                        missing: "setter",
                    });
                }
                (None, Some(_)) => {
                    return Err(SchemaError::UnpairedAccessor {
                        class: class.to_string(),
                        field: name.to_string(),
                        present: "setter",
                        missing: "getter",
                    });
                }
                (None, None) => match (&opts.reference, &opts.ref_path) {
                    (Some(target), _) => {
                        if opts.enumeration.is_some() {
                            warnings.push(ignored("enum"));
                        }
                        FieldShape::Reference(target.clone())
                    }
                    (None, Some(path)) => {
                        if opts.enumeration.is_some() {
                            warnings.push(ignored("enum"));
                        }
                        FieldShape::ReferencePath(path.clone())
                    }
                    (None, None) => FieldShape::Value {
                        enumeration: opts.enumeration.clone(),
                        add_null: opts.add_null_to_enum,
                    },
                },
            }
        };

        Ok(Self {
            name: name.to_string(),
            declared: opts.declared,
            ty: opts.ty,
            dim: opts.dim,
            kind: opts.kind,
            discriminators,
            shape,
            options: opts.field,
            string: opts.string,
            number: opts.number,
        })
    }
}

fn parse_discriminators(
    class: &str,
    field: &str,
    list: &[DiscriminatorSource],
) -> Result<Vec<DiscriminatorEntry>, SchemaError> {
    let malformed = |index: usize, reason: &str| SchemaError::MalformedDiscriminator {
        class: class.to_string(),
        field: field.to_string(),
        index,
        reason: reason.to_string(),
    };

    list.iter()
        .enumerate()
        .map(|(index, source)| match source {
            DiscriminatorSource::Type(TypeRef::Class(name)) => Ok(DiscriminatorEntry {
                class: name.clone(),
                value: None,
            }),
            DiscriminatorSource::Type(_) => Err(malformed(index, "is not an object or a class")),
            DiscriminatorSource::Entry { ty: None, .. } => {
                Err(malformed(index, "is an object but has no type"))
            }
            DiscriminatorSource::Entry {
                ty: Some(TypeRef::Class(name)),
                value,
            } => Ok(DiscriminatorEntry {
                class: name.clone(),
                value: value.clone(),
            }),
            DiscriminatorSource::Entry { ty: Some(_), .. } => {
                Err(malformed(index, "has a type that is not a class"))
            }
        })
        .collect()
}

fn parse_virtual(
    class: &str,
    field: &str,
    opts: &PropOptions,
) -> Result<VirtualRelation, SchemaError> {
    if opts.ty.is_some() {
        return Err(SchemaError::VirtualWithType {
            class: class.to_string(),
            field: field.to_string(),
        });
    }

    let missing = |missing: &'static str| SchemaError::IncompleteVirtual {
        class: class.to_string(),
        field: field.to_string(),
        missing,
    };

    let reference = opts.reference.clone().ok_or_else(|| missing("ref"))?;
    let local_field = opts
        .local_field
        .clone()
        .ok_or_else(|| missing("local_field"))?;
    let foreign_field = opts
        .foreign_field
        .clone()
        .ok_or_else(|| missing("foreign_field"))?;

    Ok(VirtualRelation {
        reference,
        local_field,
        foreign_field,
        just_one: opts.just_one,
        count: opts.count,
        match_filter: opts.match_filter.clone(),
        options: opts.virtual_options.clone(),
    })
}

///
/// TESTS
///
