//! Output side: synthesized schema fragments and their driver rendering.

mod descriptor;
mod render;

pub use descriptor::*;

use crate::{
    config::SchemaOptions,
    node::{Document, Func, Hook, Index, Method, QueryMethod, Static},
};
use serde_json::Value;
use std::collections::BTreeMap;

/// Instance method every final fragment carries; it reports the class the
/// fragment was finalized for.
pub const CLASS_NAME_METHOD: &str = "className";

///
/// Fragment
///
/// Schema for one class: stored paths plus, once finalized, the behaviors
/// attached to it.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Fragment {
    pub name: String,
    pub options: SchemaOptions,
    pub paths: BTreeMap<String, FieldDescriptor>,
    pub virtuals: BTreeMap<String, VirtualField>,
    pub hooks: Vec<Hook>,
    pub indexes: Vec<Index>,
    pub query: BTreeMap<String, QueryMethod>,
    pub plugins: Vec<String>,
    pub methods: BTreeMap<String, Method>,
    pub statics: BTreeMap<String, Static>,
    origin: Option<String>,
}

impl Fragment {
    pub fn new(name: impl Into<String>, options: SchemaOptions) -> Self {
        Self {
            name: name.into(),
            options,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn path(&self, key: &str) -> Option<&FieldDescriptor> {
        self.paths.get(key)
    }

    /// Add paths, replacing any with the same key.
    pub fn add_paths<I>(&mut self, paths: I)
    where
        I: IntoIterator<Item = (String, FieldDescriptor)>,
    {
        self.paths.extend(paths);
    }

    pub fn load_members(&mut self, methods: &[Method], statics: &[Static]) {
        for method in methods {
            self.methods.insert(method.name().to_string(), method.clone());
        }
        for func in statics {
            self.statics.insert(func.name().to_string(), func.clone());
        }
    }

    /// Class this fragment was finalized for, if any.
    #[must_use]
    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    #[must_use]
    pub fn is_finalized_for(&self, class: &str) -> bool {
        self.origin.as_deref() == Some(class)
    }

    /// Ask a document built from this fragment for its originating class.
    #[must_use]
    pub fn class_name_of(&self, doc: &Document) -> Option<String> {
        match self.methods.get(CLASS_NAME_METHOD)?.call(doc) {
            Value::String(name) => Some(name),
            _ => None,
        }
    }

    pub(crate) fn mark_origin(&mut self, class: &str) {
        let name = class.to_string();
        self.origin = Some(name.clone());
        self.methods.insert(
            CLASS_NAME_METHOD.to_string(),
            Func::method(CLASS_NAME_METHOD, move |_| Value::String(name.clone())),
        );
    }

    /// Copy of this fragment set up as a discriminator of `base`: base paths
    /// it does not define are inherited, except the discriminator key.
    #[must_use]
    pub fn discriminated_from(&self, base: &Self, key: &str) -> Self {
        let mut child = self.clone();

        for (name, descriptor) in &base.paths {
            if name != key && !child.paths.contains_key(name) {
                child.paths.insert(name.clone(), descriptor.clone());
            }
        }
        if let Some(descriptor) = child.paths.get_mut(key) {
            descriptor.skip_discriminator_check = true;
        }
        child.options = base.options.merge(&child.options);

        child
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ScalarType;

    fn scalar(s: ScalarType) -> FieldDescriptor {
        FieldDescriptor::new(StorageType::Scalar(s), Container::Single)
    }

    #[test]
    fn discriminated_child_inherits_base_paths_except_the_key() {
        let mut base = Fragment::new("Base", SchemaOptions::default());
        base.add_paths([
            ("name".to_string(), scalar(ScalarType::String)),
            ("__t".to_string(), scalar(ScalarType::String)),
        ]);

        let mut child = Fragment::new("Child", SchemaOptions::default());
        child.add_paths([
            ("extra".to_string(), scalar(ScalarType::Number)),
            ("__t".to_string(), scalar(ScalarType::String)),
        ]);

        let merged = child.discriminated_from(&base, "__t");

        assert!(merged.path("name").is_some());
        assert!(merged.path("extra").is_some());
        assert!(merged.path("__t").is_some_and(|p| p.skip_discriminator_check));
        assert!(base.path("__t").is_some_and(|p| !p.skip_discriminator_check));
    }

    #[test]
    fn origin_method_reports_the_class() {
        let mut fragment = Fragment::new("User", SchemaOptions::default());
        assert_eq!(fragment.class_name_of(&Document::new()), None);

        fragment.mark_origin("User");

        assert!(fragment.is_finalized_for("User"));
        assert_eq!(
            fragment.class_name_of(&Document::new()).as_deref(),
            Some("User")
        );
    }
}
