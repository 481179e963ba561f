use crate::{fragment::Fragment, node::RefTarget};
use serde_json::{Map, Value};
use std::{fmt, sync::Arc};

/// Document shape seen by hooks and instance methods.
pub type Document = Map<String, Value>;

/// Getters, setters, statics and query methods.
pub type ValueFn = dyn Fn(Value) -> Value + Send + Sync;

/// Lifecycle hook handlers.
pub type HookFn = dyn Fn(&mut Document) + Send + Sync;

/// Instance methods, called with the document they are attached to.
pub type MethodFn = dyn Fn(&Document) -> Value + Send + Sync;

/// Plugins receive the fragment being finalized and their configured options.
pub type PluginFn = dyn Fn(&mut Fragment, &Value) + Send + Sync;

/// Custom field validators.
pub type ValidatorFn = dyn Fn(&Value) -> bool + Send + Sync;

/// Deferred reference targets, evaluated at synthesis time.
pub type ThunkFn = dyn Fn() -> RefTarget + Send + Sync;

///
/// Func
///
/// Named, shareable callback. Two funcs are equal when they share a name and
/// point at the same closure.
///

pub struct Func<F: ?Sized> {
    name: String,
    f: Arc<F>,
}

impl<F: ?Sized> Func<F> {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn get(&self) -> &F {
        &self.f
    }
}

impl Func<ValueFn> {
    pub fn value<T>(name: impl Into<String>, f: T) -> Self
    where
        T: Fn(Value) -> Value + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            f: Arc::new(f),
        }
    }

    #[must_use]
    pub fn call(&self, value: Value) -> Value {
        (self.f)(value)
    }
}

impl Func<HookFn> {
    pub fn hook<T>(name: impl Into<String>, f: T) -> Self
    where
        T: Fn(&mut Document) + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            f: Arc::new(f),
        }
    }

    pub fn call(&self, doc: &mut Document) {
        (self.f)(doc);
    }
}

impl Func<MethodFn> {
    pub fn method<T>(name: impl Into<String>, f: T) -> Self
    where
        T: Fn(&Document) -> Value + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            f: Arc::new(f),
        }
    }

    #[must_use]
    pub fn call(&self, doc: &Document) -> Value {
        (self.f)(doc)
    }
}

impl Func<PluginFn> {
    pub fn plugin<T>(name: impl Into<String>, f: T) -> Self
    where
        T: Fn(&mut Fragment, &Value) + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            f: Arc::new(f),
        }
    }

    pub fn call(&self, fragment: &mut Fragment, options: &Value) {
        (self.f)(fragment, options);
    }
}

impl Func<ValidatorFn> {
    pub fn validator<T>(name: impl Into<String>, f: T) -> Self
    where
        T: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            f: Arc::new(f),
        }
    }

    #[must_use]
    pub fn call(&self, value: &Value) -> bool {
        (self.f)(value)
    }
}

impl Func<ThunkFn> {
    pub fn thunk<T>(name: impl Into<String>, f: T) -> Self
    where
        T: Fn() -> RefTarget + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            f: Arc::new(f),
        }
    }

    #[must_use]
    pub fn call(&self) -> RefTarget {
        (self.f)()
    }
}

impl<F: ?Sized> Clone for Func<F> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            f: Arc::clone(&self.f),
        }
    }
}

impl<F: ?Sized> fmt::Debug for Func<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Func({})", self.name)
    }
}

impl<F: ?Sized> PartialEq for Func<F> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && Arc::ptr_eq(&self.f, &other.f)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_compare_equal_but_distinct_closures_do_not() {
        let a = Func::value("upper", |v| v);
        let b = a.clone();
        let c = Func::value("upper", |v| v);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn debug_prints_only_the_name() {
        let f = Func::hook("stamp", |doc: &mut Document| {
            doc.insert("stamped".into(), Value::Bool(true));
        });

        let mut doc = Document::new();
        f.call(&mut doc);

        assert_eq!(format!("{f:?}"), "Func(stamp)");
        assert_eq!(doc.get("stamped"), Some(&Value::Bool(true)));
    }
}
