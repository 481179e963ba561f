use crate::{
    config::SchemaOptions,
    fragment::{FieldDescriptor, Fragment, VirtualField},
    node::{ClassDescriptor, DiscriminatorEntry, FieldConfig},
};
use derive_more::Display;
use std::collections::{BTreeMap, BTreeSet};

///
/// SynthesisState
///
/// Per-class position in the synthesis state machine.
///

#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq)]
pub enum SynthesisState {
    #[default]
    Unseen,
    Pending,
    Resolving,
    Built,
    Finalized,
}

///
/// ClassEntry
///
/// Registry slot for one class: its declaration, the fields not yet
/// processed, and everything processing produced so far.
///

#[derive(Clone, Debug, Default)]
pub struct ClassEntry {
    pub descriptor: ClassDescriptor,
    pub pending: Vec<String>,
    pub paths: BTreeMap<String, FieldDescriptor>,
    pub virtuals: BTreeMap<String, VirtualField>,
    pub discriminators: BTreeMap<String, Vec<DiscriminatorEntry>>,
    pub state: SynthesisState,
    pub fragment: Option<Fragment>,
}

impl ClassEntry {
    fn new(name: &str) -> Self {
        Self {
            descriptor: ClassDescriptor::new(name),
            ..Default::default()
        }
    }

    fn mark_pending(&mut self, fields: Vec<String>) {
        for field in fields {
            if !self.pending.contains(&field) {
                self.pending.push(field);
            }
        }
        if self.state != SynthesisState::Resolving {
            self.state = SynthesisState::Pending;
        }
    }
}

///
/// Registry
///
/// Every class a context knows about, keyed by class name.
///

#[derive(Clone, Debug, Default)]
pub struct Registry {
    classes: BTreeMap<String, ClassEntry>,
    constructors: BTreeSet<String>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class, or fold the declaration into the known one. Every
    /// field it names goes back to pending.
    pub fn register_class(&mut self, descriptor: ClassDescriptor) {
        let name = descriptor.name.clone();
        let entry = self
            .classes
            .entry(name.clone())
            .or_insert_with(|| ClassEntry::new(&name));

        let touched = entry.descriptor.extend(descriptor);
        entry.mark_pending(touched);
    }

    /// Attach one field configuration, creating the class lazily.
    pub fn add_field(&mut self, class: &str, config: FieldConfig) {
        let entry = self
            .classes
            .entry(class.to_string())
            .or_insert_with(|| ClassEntry::new(class));

        let field = config.name.clone();
        entry.descriptor.upsert_field(config);
        entry.mark_pending(vec![field]);
    }

    #[must_use]
    pub fn contains(&self, class: &str) -> bool {
        self.classes.contains_key(class)
    }

    #[must_use]
    pub fn descriptor(&self, class: &str) -> Option<&ClassDescriptor> {
        self.classes.get(class).map(|e| &e.descriptor)
    }

    #[must_use]
    pub fn entry(&self, class: &str) -> Option<&ClassEntry> {
        self.classes.get(class)
    }

    pub(crate) fn entry_mut(&mut self, class: &str) -> Option<&mut ClassEntry> {
        self.classes.get_mut(class)
    }

    /// Last non-final fragment of a class, creating an empty entry and
    /// fragment if the class was never seen.
    pub fn get_or_create_fragment(&mut self, class: &str) -> &Fragment {
        let entry = self
            .classes
            .entry(class.to_string())
            .or_insert_with(|| ClassEntry::new(class));

        entry
            .fragment
            .get_or_insert_with(|| Fragment::new(class, SchemaOptions::default()))
    }

    #[must_use]
    pub fn fragment(&self, class: &str) -> Option<&Fragment> {
        self.classes.get(class)?.fragment.as_ref()
    }

    #[must_use]
    pub fn state(&self, class: &str) -> SynthesisState {
        self.classes
            .get(class)
            .map_or(SynthesisState::Unseen, |e| e.state)
    }

    pub(crate) fn set_state(&mut self, class: &str, state: SynthesisState) {
        if let Some(entry) = self.classes.get_mut(class) {
            entry.state = state;
        }
    }

    pub(crate) fn take_pending(&mut self, class: &str) -> Vec<String> {
        self.classes
            .get_mut(class)
            .map(|e| std::mem::take(&mut e.pending))
            .unwrap_or_default()
    }

    pub(crate) fn record_constructor(&mut self, class: &str) {
        self.constructors.insert(class.to_string());
    }

    /// Descriptor of a class that completed synthesis at least once.
    #[must_use]
    pub fn constructor(&self, class: &str) -> Option<&ClassDescriptor> {
        if self.constructors.contains(class) {
            self.descriptor(class)
        } else {
            None
        }
    }

    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }
}

///
/// TESTS
///
