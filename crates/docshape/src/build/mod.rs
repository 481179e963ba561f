//! Schema synthesis: the registry, the per-field pipeline and the context
//! callers drive it through.

mod enums;
mod prop;
mod registry;
mod resolve;
mod schema;

#[cfg(test)]
mod tests;

pub use registry::{ClassEntry, Registry, SynthesisState};
pub use resolve::{Element, Resolved, resolve};

use crate::{
    config::{GlobalOptions, SchemaOptions},
    error::{SchemaError, SchemaWarning},
    fragment::Fragment,
    node::{ClassDecl, ClassDescriptor, FieldConfig, PropOptions},
};
use schema::Builder;
use std::collections::BTreeMap;
use tracing::{debug, warn};

///
/// Schema
///
/// Result of a final build: the root fragment plus every fragment it embeds
/// by name, directly or through discriminator children.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Schema {
    pub root: Fragment,
    pub embedded: BTreeMap<String, Fragment>,
}

impl Schema {
    #[must_use]
    pub fn get(&self, class: &str) -> Option<&Fragment> {
        if self.root.name == class {
            Some(&self.root)
        } else {
            self.embedded.get(class)
        }
    }
}

///
/// SchemaContext
///
/// Owns the class registry and the global options for one set of
/// declarations. Every synthesis call is all-or-nothing.
///

#[derive(Clone, Debug, Default)]
pub struct SchemaContext {
    registry: Registry,
    options: GlobalOptions,
    warnings: Vec<SchemaWarning>,
}

impl SchemaContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_options(options: GlobalOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    #[must_use]
    pub const fn options(&self) -> &GlobalOptions {
        &self.options
    }

    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    #[must_use]
    pub fn warnings(&self) -> &[SchemaWarning] {
        &self.warnings
    }

    /// Register a class declaration, extending the class if it is known.
    pub fn declare(&mut self, decl: ClassDecl) -> Result<(), SchemaError> {
        let mut found = Vec::new();
        let descriptor = decl.into_descriptor(&mut found)?;
        debug!(class = %descriptor.name, fields = descriptor.fields.len(), "class declared");

        self.registry.register_class(descriptor);
        self.record(found);

        Ok(())
    }

    /// Attach one field to a class, creating the class if needed.
    pub fn declare_prop(
        &mut self,
        class: &str,
        key: &str,
        options: PropOptions,
    ) -> Result<(), SchemaError> {
        let mut found = Vec::new();
        let config = FieldConfig::parse(class, key, options, &mut found)?;

        self.registry.add_field(class, config);
        self.record(found);

        Ok(())
    }

    /// Final fragment for `class` together with the fragments it embeds.
    pub fn build_schema(&mut self, class: &str) -> Result<Schema, SchemaError> {
        let root = self.synthesize(class, None, None, true)?;
        let embedded = self.embedded_closure(&root);

        Ok(Schema { root, embedded })
    }

    /// Synthesize `class`, optionally on top of `base` and with an option
    /// override. Nothing is committed unless the whole call succeeds.
    pub fn synthesize(
        &mut self,
        class: &str,
        base: Option<&Fragment>,
        options: Option<&SchemaOptions>,
        is_final: bool,
    ) -> Result<Fragment, SchemaError> {
        let mut staged = self.registry.clone();
        let mut found = Vec::new();

        let fragment = Builder::new(&mut staged, &self.options, &mut found)
            .synthesize(class, base, options, is_final)
            .inspect_err(|err| warn!(class, %err, "synthesis failed"))?;

        self.registry = staged;
        self.warnings.extend(found);

        Ok(fragment)
    }

    #[must_use]
    pub fn state(&self, class: &str) -> SynthesisState {
        self.registry.state(class)
    }

    #[must_use]
    pub fn descriptor(&self, class: &str) -> Option<&ClassDescriptor> {
        self.registry.descriptor(class)
    }

    /// Class behind a name, once that class has been synthesized.
    #[must_use]
    pub fn resolve_class(&self, class: &str) -> Option<&ClassDescriptor> {
        self.registry.constructor(class)
    }

    /// Last non-final fragment built for `class`.
    #[must_use]
    pub fn fragment(&self, class: &str) -> Option<&Fragment> {
        self.registry.fragment(class)
    }

    fn record(&mut self, found: Vec<SchemaWarning>) {
        for warning in found {
            warn!(field = warning.field(), "{warning}");
            self.warnings.push(warning);
        }
    }

    fn embedded_closure(&self, root: &Fragment) -> BTreeMap<String, Fragment> {
        let mut embedded = BTreeMap::new();
        let mut queue = embedded_names(root);

        while let Some(name) = queue.pop() {
            if name == root.name || embedded.contains_key(&name) {
                continue;
            }
            if let Some(fragment) = self.registry.fragment(&name) {
                queue.extend(embedded_names(fragment));
                embedded.insert(name, fragment.clone());
            }
        }

        embedded
    }
}

// class names embedded by a fragment, including its discriminator children
fn embedded_names(fragment: &Fragment) -> Vec<String> {
    let mut names = Vec::new();

    for descriptor in fragment.paths.values() {
        if let Some(name) = descriptor.storage.embedded_class() {
            names.push(name.to_string());
        }
        if let Some(set) = &descriptor.discriminators {
            for child in set.children.values() {
                names.extend(embedded_names(&child.fragment));
            }
        }
    }

    names
}
