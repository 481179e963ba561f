use crate::{
    node::{Func, ThunkFn},
    types::{ContainerKind, Primitive},
};
use std::fmt::{self, Display};

///
/// TypeRef
///
/// Type as written on a declaration. Container markers may carry an element
/// type; a bare marker (`Array(None)`) means the element type was erased.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TypeRef {
    Primitive(Primitive),
    Class(String),
    Array(Option<Box<Self>>),
    Map(Option<Box<Self>>),
}

impl TypeRef {
    pub fn class(name: impl Into<String>) -> Self {
        Self::Class(name.into())
    }

    #[must_use]
    pub fn array_of(inner: impl Into<Self>) -> Self {
        Self::Array(Some(Box::new(inner.into())))
    }

    #[must_use]
    pub fn map_of(inner: impl Into<Self>) -> Self {
        Self::Map(Some(Box::new(inner.into())))
    }

    #[must_use]
    pub const fn container_kind(&self) -> ContainerKind {
        match self {
            Self::Array(_) => ContainerKind::Array,
            Self::Map(_) => ContainerKind::Map,
            Self::Primitive(_) | Self::Class(_) => ContainerKind::Single,
        }
    }

    /// Strip typed array wrappers, returning the innermost type and how many
    /// levels were removed. A bare marker is returned as-is.
    #[must_use]
    pub fn unwrap_arrays(&self) -> (&Self, u8) {
        let mut current = self;
        let mut depth: u8 = 0;

        while let Self::Array(Some(inner)) = current {
            current = inner.as_ref();
            depth = depth.saturating_add(1);
        }

        (current, depth)
    }
}

impl Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(p) => write!(f, "{p}"),
            Self::Class(name) => write!(f, "{name}"),
            Self::Array(Some(inner)) => write!(f, "[{inner}]"),
            Self::Array(None) => write!(f, "[?]"),
            Self::Map(Some(inner)) => write!(f, "Map<{inner}>"),
            Self::Map(None) => write!(f, "Map<?>"),
        }
    }
}

impl From<Primitive> for TypeRef {
    fn from(p: Primitive) -> Self {
        Self::Primitive(p)
    }
}

///
/// RefTarget
///
/// What a `ref` option points at. Deferred targets are evaluated during
/// synthesis, which lets declarations reference classes declared later.
///

#[derive(Clone, Debug, PartialEq)]
pub enum RefTarget {
    Type(TypeRef),
    Name(String),
    Deferred(Func<ThunkFn>),
}

impl RefTarget {
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::Type(TypeRef::class(name))
    }

    pub fn deferred<T>(name: impl Into<String>, f: T) -> Self
    where
        T: Fn() -> Self + Send + Sync + 'static,
    {
        Self::Deferred(Func::thunk(name, f))
    }
}

impl From<TypeRef> for RefTarget {
    fn from(ty: TypeRef) -> Self {
        Self::Type(ty)
    }
}

///
/// TESTS
///
