//! Schema synthesis for document-database models.
//!
//! Classes are declared with their fields, parent and behaviors, then turned
//! into driver-ready schema fragments by a [`build::SchemaContext`].

pub mod build;
pub mod config;
pub mod error;
pub mod fragment;
pub mod node;
pub mod types;
pub mod validate;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        build::{Schema, SchemaContext, SynthesisState},
        config::{BehaviorOptions, GlobalOptions, ModelOptions, SchemaOptions},
        error::{SchemaError, SchemaWarning},
        fragment::{Container, FieldDescriptor, Fragment, RefKind, StorageType},
        node::*,
        types::{ContainerKind, HookStage, Primitive, ScalarType, Severity},
    };
}
