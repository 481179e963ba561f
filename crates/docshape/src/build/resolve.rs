//! Type resolution: from a field's declared type, explicit override,
//! dimension count and container kind to a container plus element kind.

use crate::{
    error::SchemaError,
    fragment::Container,
    node::{FieldConfig, TypeRef},
    types::{ContainerKind, Primitive, ScalarType},
};
use tracing::debug;

///
/// Element
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Element {
    Scalar(ScalarType),
    Mixed,
    Object,
    Class(String),
    Unspecified,
}

///
/// Resolved
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Resolved {
    pub container: Container,
    pub element: Element,
}

/// Resolve the storage shape of one field of `class`.
pub fn resolve(class: &str, config: &FieldConfig) -> Result<Resolved, SchemaError> {
    let field = config.name.as_str();
    let kind = config.kind.unwrap_or_else(|| {
        config
            .declared
            .as_ref()
            .map_or(ContainerKind::Single, TypeRef::container_kind)
    });

    // element candidate and total array depth
    let extra_dim = config.dim.unwrap_or(0);
    let (candidate, dim) = match &config.ty {
        Some(ty) => {
            let ty = match (kind, ty) {
                (ContainerKind::Map, TypeRef::Map(Some(inner))) => inner.as_ref(),
                _ => ty,
            };
            let (inner, depth) = ty.unwrap_arrays();

            (Some(inner), depth.saturating_add(extra_dim))
        }
        None => {
            let declared = match (kind, config.declared.as_ref()) {
                (ContainerKind::Array, Some(TypeRef::Array(Some(inner))))
                | (ContainerKind::Map, Some(TypeRef::Map(Some(inner)))) => Some(inner.as_ref()),
                (_, declared) => declared,
            };

            // a reference only keeps a primitive declared type, as its id type
            let declared = if config.shape.is_reference() {
                declared.filter(|ty| matches!(ty, TypeRef::Primitive(_)))
            } else {
                declared
            };

            (declared, extra_dim)
        }
    };

    let container = match kind {
        ContainerKind::Single if dim > 0 => Container::Array { depth: dim },
        ContainerKind::Single => Container::Single,
        ContainerKind::Array => Container::Array { depth: dim.max(1) },
        ContainerKind::Map if dim > 0 => {
            return Err(SchemaError::UnsupportedContainer {
                class: class.to_string(),
                field: field.to_string(),
                option: "dim",
                container: ContainerKind::Map,
            });
        }
        ContainerKind::Map => Container::Map,
    };

    let element = match candidate {
        None => Element::Unspecified,
        Some(TypeRef::Class(name)) if name == class => {
            return Err(SchemaError::SelfReference {
                class: class.to_string(),
                field: field.to_string(),
            });
        }
        Some(TypeRef::Class(name)) => Element::Class(name.clone()),
        Some(TypeRef::Primitive(Primitive::Mixed)) => Element::Mixed,
        Some(TypeRef::Primitive(Primitive::Object)) => Element::Object,
        Some(TypeRef::Primitive(p)) => p.scalar().map_or(Element::Mixed, Element::Scalar),
        Some(ty @ (TypeRef::Array(_) | TypeRef::Map(_))) => {
            debug!(class, field, %ty, "element is still a container, defaulting to Mixed");
            Element::Mixed
        }
    };

    Ok(Resolved { container, element })
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{PropOptions, RefTarget};

    fn config(opts: PropOptions) -> FieldConfig {
        FieldConfig::parse("Owner", "field", opts, &mut Vec::new()).expect("valid field")
    }

    fn run(opts: PropOptions) -> Result<Resolved, SchemaError> {
        resolve("Owner", &config(opts))
    }

    #[test]
    fn scalar_declared_type() {
        let r = run(PropOptions::typed(Primitive::String)).expect("resolves");

        assert_eq!(r.container, Container::Single);
        assert_eq!(r.element, Element::Scalar(ScalarType::String));
    }

    #[test]
    fn bytes_become_driver_binary() {
        let r = run(PropOptions::typed(Primitive::Bytes)).expect("resolves");
        assert_eq!(r.element, Element::Scalar(ScalarType::Buffer));
    }

    #[test]
    fn override_dims_add_to_field_dims() {
        let r = run(
            PropOptions::typed(TypeRef::Array(None))
                .of_type(TypeRef::array_of(Primitive::Number))
                .dim(1),
        )
        .expect("resolves");

        assert_eq!(r.container, Container::Array { depth: 2 });
        assert_eq!(r.element, Element::Scalar(ScalarType::Number));
    }

    #[test]
    fn erased_array_element_falls_back_to_mixed() {
        let r = run(PropOptions::typed(TypeRef::Array(None))).expect("resolves");

        assert_eq!(r.container, Container::Array { depth: 1 });
        assert_eq!(r.element, Element::Mixed);
    }

    #[test]
    fn self_type_is_rejected_even_inside_arrays() {
        let err = run(PropOptions::typed(TypeRef::class("Owner"))).expect_err("self");
        assert!(matches!(err, SchemaError::SelfReference { .. }));

        let err = run(
            PropOptions::typed(TypeRef::Array(None))
                .of_type(TypeRef::array_of(TypeRef::array_of(TypeRef::class("Owner")))),
        )
        .expect_err("self in arrays");
        assert!(matches!(err, SchemaError::SelfReference { .. }));
    }

    #[test]
    fn reference_ignores_declared_class() {
        let r = run(PropOptions::typed(TypeRef::class("Owner")).reference(RefTarget::name("Owner")))
            .expect("references to the own class are fine");

        assert_eq!(r.element, Element::Unspecified);
    }

    #[test]
    fn map_with_dimensions_is_unsupported() {
        let err = run(PropOptions::typed(TypeRef::map_of(Primitive::String)).dim(1))
            .expect_err("map dims");

        assert!(matches!(
            err,
            SchemaError::UnsupportedContainer { option: "dim", .. }
        ));
    }

    #[test]
    fn kind_override_forces_an_array() {
        let r = run(PropOptions::typed(Primitive::String).kind(ContainerKind::Array))
            .expect("resolves");

        assert_eq!(r.container, Container::Array { depth: 1 });
        assert_eq!(r.element, Element::Scalar(ScalarType::String));
    }
}
