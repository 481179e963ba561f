use crate::{
    node::{DiscriminatorSource, EnumSpec, Func, RefTarget, TypeRef, Validator, ValueFn},
    types::ContainerKind,
};
use serde_json::Value;

///
/// FieldOptions
///
/// Field-level driver options. On containers these stay on the outer
/// definition.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldOptions {
    pub required: Option<bool>,
    pub default: Option<Value>,
    pub select: Option<bool>,
    pub index: Option<bool>,
    pub unique: Option<bool>,
    pub sparse: Option<bool>,
    pub immutable: Option<bool>,
    pub alias: Option<String>,
    pub validate: Vec<Validator>,
}

///
/// StringRules
///

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StringRules {
    pub lowercase: Option<bool>,
    pub uppercase: Option<bool>,
    pub trim: Option<bool>,
    pub pattern: Option<String>,
    pub minlength: Option<usize>,
    pub maxlength: Option<usize>,
}

impl StringRules {
    #[must_use]
    pub const fn has_validation(&self) -> bool {
        self.pattern.is_some() || self.minlength.is_some() || self.maxlength.is_some()
    }

    #[must_use]
    pub const fn has_transform(&self) -> bool {
        self.lowercase.is_some() || self.uppercase.is_some() || self.trim.is_some()
    }
}

///
/// NumberRules
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NumberRules {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl NumberRules {
    #[must_use]
    pub const fn has_validation(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }
}

///
/// PropOptions
///
/// Raw, unvalidated field configuration as written on a declaration. It is
/// checked and turned into a `FieldConfig` when the class is declared.
///

#[derive(Clone, Debug, Default)]
pub struct PropOptions {
    // type
    pub declared: Option<TypeRef>,
    pub ty: Option<TypeRef>,
    pub dim: Option<u8>,
    pub kind: Option<ContainerKind>,

    // references
    pub reference: Option<RefTarget>,
    pub ref_path: Option<String>,

    pub discriminators: Option<Vec<DiscriminatorSource>>,
    pub enumeration: Option<EnumSpec>,
    pub add_null_to_enum: bool,

    // accessors
    pub get: Option<Func<ValueFn>>,
    pub set: Option<Func<ValueFn>>,

    // virtual relation
    pub local_field: Option<String>,
    pub foreign_field: Option<String>,
    pub just_one: Option<bool>,
    pub count: Option<bool>,
    pub match_filter: Option<Value>,
    pub virtual_options: Option<Value>,

    pub field: FieldOptions,
    pub string: StringRules,
    pub number: NumberRules,
}

impl PropOptions {
    /// Options for a field whose declared (design) type is `ty`.
    pub fn typed(ty: impl Into<TypeRef>) -> Self {
        Self {
            declared: Some(ty.into()),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn of_type(mut self, ty: impl Into<TypeRef>) -> Self {
        self.ty = Some(ty.into());
        self
    }

    #[must_use]
    pub const fn dim(mut self, dim: u8) -> Self {
        self.dim = Some(dim);
        self
    }

    #[must_use]
    pub const fn kind(mut self, kind: ContainerKind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn reference(mut self, target: impl Into<RefTarget>) -> Self {
        self.reference = Some(target.into());
        self
    }

    #[must_use]
    pub fn ref_path(mut self, path: impl Into<String>) -> Self {
        self.ref_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn discriminators(mut self, entries: Vec<DiscriminatorSource>) -> Self {
        self.discriminators = Some(entries);
        self
    }

    #[must_use]
    pub fn enumeration(mut self, spec: EnumSpec) -> Self {
        self.enumeration = Some(spec);
        self
    }

    #[must_use]
    pub const fn add_null_to_enum(mut self) -> Self {
        self.add_null_to_enum = true;
        self
    }

    #[must_use]
    pub fn getter(mut self, f: Func<ValueFn>) -> Self {
        self.get = Some(f);
        self
    }

    #[must_use]
    pub fn setter(mut self, f: Func<ValueFn>) -> Self {
        self.set = Some(f);
        self
    }

    #[must_use]
    pub fn local_field(mut self, name: impl Into<String>) -> Self {
        self.local_field = Some(name.into());
        self
    }

    #[must_use]
    pub fn foreign_field(mut self, name: impl Into<String>) -> Self {
        self.foreign_field = Some(name.into());
        self
    }

    #[must_use]
    pub const fn just_one(mut self, value: bool) -> Self {
        self.just_one = Some(value);
        self
    }

    #[must_use]
    pub const fn count(mut self, value: bool) -> Self {
        self.count = Some(value);
        self
    }

    #[must_use]
    pub fn match_filter(mut self, filter: Value) -> Self {
        self.match_filter = Some(filter);
        self
    }

    #[must_use]
    pub fn virtual_options(mut self, options: Value) -> Self {
        self.virtual_options = Some(options);
        self
    }

    #[must_use]
    pub const fn required(mut self) -> Self {
        self.field.required = Some(true);
        self
    }

    #[must_use]
    pub fn default_value(mut self, value: Value) -> Self {
        self.field.default = Some(value);
        self
    }

    #[must_use]
    pub const fn unique(mut self) -> Self {
        self.field.unique = Some(true);
        self
    }

    #[must_use]
    pub const fn indexed(mut self) -> Self {
        self.field.index = Some(true);
        self
    }

    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.field.alias = Some(alias.into());
        self
    }

    #[must_use]
    pub fn validate(mut self, validator: Validator) -> Self {
        self.field.validate.push(validator);
        self
    }

    #[must_use]
    pub const fn lowercase(mut self) -> Self {
        self.string.lowercase = Some(true);
        self
    }

    #[must_use]
    pub const fn trim(mut self) -> Self {
        self.string.trim = Some(true);
        self
    }

    #[must_use]
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.string.pattern = Some(pattern.into());
        self
    }

    #[must_use]
    pub const fn minlength(mut self, len: usize) -> Self {
        self.string.minlength = Some(len);
        self
    }

    #[must_use]
    pub const fn maxlength(mut self, len: usize) -> Self {
        self.string.maxlength = Some(len);
        self
    }

    #[must_use]
    pub const fn min(mut self, min: f64) -> Self {
        self.number.min = Some(min);
        self
    }

    #[must_use]
    pub const fn max(mut self, max: f64) -> Self {
        self.number.max = Some(max);
        self
    }

    pub(crate) const fn is_virtual(&self) -> bool {
        self.local_field.is_some() || self.foreign_field.is_some()
    }
}
