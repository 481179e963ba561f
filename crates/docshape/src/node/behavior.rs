use crate::{
    node::{Document, Func, HookFn, MethodFn, PluginFn, ValidatorFn, ValueFn},
    types::HookStage,
};
use serde_json::Value;

///
/// Hook
///
/// Lifecycle handler for one driver event (`save`, `validate`, `find`...).
///

#[derive(Clone, Debug, PartialEq)]
pub struct Hook {
    pub stage: HookStage,
    pub event: String,
    pub handler: Func<HookFn>,
}

impl Hook {
    pub fn pre<T>(event: impl Into<String>, name: impl Into<String>, f: T) -> Self
    where
        T: Fn(&mut Document) + Send + Sync + 'static,
    {
        Self {
            stage: HookStage::Pre,
            event: event.into(),
            handler: Func::hook(name, f),
        }
    }

    pub fn post<T>(event: impl Into<String>, name: impl Into<String>, f: T) -> Self
    where
        T: Fn(&mut Document) + Send + Sync + 'static,
    {
        Self {
            stage: HookStage::Post,
            event: event.into(),
            handler: Func::hook(name, f),
        }
    }
}

///
/// Plugin
///
/// Applied to the final fragment, in declaration order, with its options.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Plugin {
    pub func: Func<PluginFn>,
    pub options: Value,
}

impl Plugin {
    #[must_use]
    pub fn name(&self) -> &str {
        self.func.name()
    }
}

///
/// Validator
///

#[derive(Clone, Debug, PartialEq)]
pub struct Validator {
    pub func: Func<ValidatorFn>,
    pub message: Option<String>,
}

impl Validator {
    pub fn new<T>(name: impl Into<String>, f: T) -> Self
    where
        T: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            func: Func::validator(name, f),
            message: None,
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Query helper registered on the model's query builder.
pub type QueryMethod = Func<ValueFn>;

/// Instance method available on every document.
pub type Method = Func<MethodFn>;

/// Model-level function.
pub type Static = Func<ValueFn>;
