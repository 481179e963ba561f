use crate::{
    config::ModelOptions,
    error::{SchemaError, SchemaWarning},
    node::{
        Document, FieldConfig, Func, Hook, Index, Method, Plugin, PropOptions, QueryMethod,
        Static,
    },
    validate::naming::validate_class_name,
};
use serde_json::Value;

///
/// ClassDecl
///
/// Declaration of a document class: its fields, parent and attached
/// behaviors. Registered with `SchemaContext::declare`.
///

#[derive(Clone, Debug, Default)]
pub struct ClassDecl {
    pub name: String,
    pub parent: Option<String>,
    pub props: Vec<(String, PropOptions)>,
    pub model_options: Option<ModelOptions>,
    pub hooks: Vec<Hook>,
    pub indexes: Vec<Index>,
    pub plugins: Vec<Plugin>,
    pub query_methods: Vec<QueryMethod>,
    pub methods: Vec<Method>,
    pub statics: Vec<Static>,
}

impl ClassDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    #[must_use]
    pub fn prop(mut self, key: impl Into<String>, options: PropOptions) -> Self {
        self.props.push((key.into(), options));
        self
    }

    #[must_use]
    pub fn model_options(mut self, options: ModelOptions) -> Self {
        self.model_options = Some(options);
        self
    }

    #[must_use]
    pub fn pre<T>(mut self, event: impl Into<String>, name: impl Into<String>, f: T) -> Self
    where
        T: Fn(&mut Document) + Send + Sync + 'static,
    {
        self.hooks.push(Hook::pre(event, name, f));
        self
    }

    #[must_use]
    pub fn post<T>(mut self, event: impl Into<String>, name: impl Into<String>, f: T) -> Self
    where
        T: Fn(&mut Document) + Send + Sync + 'static,
    {
        self.hooks.push(Hook::post(event, name, f));
        self
    }

    #[must_use]
    pub fn index(mut self, index: Index) -> Self {
        self.indexes.push(index);
        self
    }

    #[must_use]
    pub fn plugin(mut self, plugin: Plugin) -> Self {
        self.plugins.push(plugin);
        self
    }

    #[must_use]
    pub fn query_method<T>(mut self, name: impl Into<String>, f: T) -> Self
    where
        T: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.query_methods.push(Func::value(name, f));
        self
    }

    #[must_use]
    pub fn method<T>(mut self, name: impl Into<String>, f: T) -> Self
    where
        T: Fn(&Document) -> Value + Send + Sync + 'static,
    {
        self.methods.push(Func::method(name, f));
        self
    }

    #[must_use]
    pub fn static_fn<T>(mut self, name: impl Into<String>, f: T) -> Self
    where
        T: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.statics.push(Func::value(name, f));
        self
    }

    /// Validate every prop and produce the registry-side descriptor.
    pub(crate) fn into_descriptor(
        self,
        warnings: &mut Vec<SchemaWarning>,
    ) -> Result<ClassDescriptor, SchemaError> {
        validate_class_name(&self.name).map_err(|_| SchemaError::InvalidClassName {
            class: self.name.clone(),
        })?;

        let mut descriptor = ClassDescriptor::new(&self.name);
        for (key, options) in self.props {
            let config = FieldConfig::parse(&self.name, &key, options, warnings)?;
            descriptor.upsert_field(config);
        }

        descriptor.parent = self.parent;
        descriptor.model_options = self.model_options.unwrap_or_default();
        descriptor.hooks = self.hooks;
        descriptor.indexes = self.indexes;
        descriptor.plugins = self.plugins;
        descriptor.query_methods = self.query_methods;
        descriptor.methods = self.methods;
        descriptor.statics = self.statics;

        Ok(descriptor)
    }
}

///
/// ClassDescriptor
///
/// Validated, registry-owned view of everything declared for one class.
///

#[derive(Clone, Debug, Default)]
pub struct ClassDescriptor {
    pub name: String,
    pub parent: Option<String>,
    pub fields: Vec<FieldConfig>,
    pub model_options: ModelOptions,
    pub hooks: Vec<Hook>,
    pub indexes: Vec<Index>,
    pub plugins: Vec<Plugin>,
    pub query_methods: Vec<QueryMethod>,
    pub methods: Vec<Method>,
    pub statics: Vec<Static>,
}

impl ClassDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldConfig> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Replace the field with the same name, or append it.
    pub fn upsert_field(&mut self, config: FieldConfig) {
        match self.fields.iter_mut().find(|f| f.name == config.name) {
            Some(existing) => *existing = config,
            None => self.fields.push(config),
        }
    }

    /// Fold a later declaration of the same class into this one. Returns the
    /// names of the fields it touched.
    pub fn extend(&mut self, later: Self) -> Vec<String> {
        let touched = later.fields.iter().map(|f| f.name.clone()).collect();

        for config in later.fields {
            self.upsert_field(config);
        }
        if later.parent.is_some() {
            self.parent = later.parent;
        }
        self.model_options = self.model_options.merge(&later.model_options);
        self.hooks.extend(later.hooks);
        self.indexes.extend(later.indexes);
        self.plugins.extend(later.plugins);
        self.query_methods.extend(later.query_methods);
        self.methods.extend(later.methods);
        self.statics.extend(later.statics);

        touched
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Primitive;

    fn descriptor(decl: ClassDecl) -> ClassDescriptor {
        decl.into_descriptor(&mut Vec::new())
            .expect("valid declaration")
    }

    #[test]
    fn same_key_replaces_in_place() {
        let d = descriptor(
            ClassDecl::new("User")
                .prop("name", PropOptions::typed(Primitive::String))
                .prop("age", PropOptions::typed(Primitive::Number))
                .prop("name", PropOptions::typed(Primitive::Number)),
        );

        let names: Vec<_> = d.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["name", "age"]);
        assert_eq!(
            d.field("name").and_then(|f| f.declared.clone()),
            Some(Primitive::Number.into())
        );
    }

    #[test]
    fn extend_appends_behaviors_and_reports_touched_fields() {
        let mut d = descriptor(
            ClassDecl::new("User")
                .prop("name", PropOptions::typed(Primitive::String))
                .pre("save", "first", |_| {}),
        );
        let later = descriptor(
            ClassDecl::new("User")
                .prop("email", PropOptions::typed(Primitive::String))
                .pre("save", "second", |_| {}),
        );

        let touched = d.extend(later);

        assert_eq!(touched, ["email"]);
        assert_eq!(d.fields.len(), 2);
        let hooks: Vec<_> = d.hooks.iter().map(|h| h.handler.name()).collect();
        assert_eq!(hooks, ["first", "second"]);
    }

    #[test]
    fn blank_class_name_is_rejected() {
        let err = ClassDecl::new(" ")
            .into_descriptor(&mut Vec::new())
            .expect_err("blank name");

        assert!(matches!(err, SchemaError::InvalidClassName { .. }));
    }
}
