//! Schema builder: drives per-class synthesis and finalization.

use crate::{
    build::registry::{Registry, SynthesisState},
    config::{GlobalOptions, ModelOptions, SchemaOptions},
    error::{SchemaError, SchemaWarning},
    fragment::{DiscriminatorChild, DiscriminatorSet, Fragment},
    node::{ClassDescriptor, DiscriminatorEntry},
    types::HookStage,
};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

///
/// Builder
///
/// One synthesis call. Works on a staged registry; the caller commits it
/// only when the call succeeds.
///

pub(crate) struct Builder<'a> {
    pub(super) registry: &'a mut Registry,
    globals: &'a GlobalOptions,
    warnings: &'a mut Vec<SchemaWarning>,
    finalizing: Vec<String>,
}

impl<'a> Builder<'a> {
    pub(crate) const fn new(
        registry: &'a mut Registry,
        globals: &'a GlobalOptions,
        warnings: &'a mut Vec<SchemaWarning>,
    ) -> Self {
        Self {
            registry,
            globals,
            warnings,
            finalizing: Vec::new(),
        }
    }

    pub(super) fn warn(&mut self, warning: SchemaWarning) {
        warn!(field = warning.field(), "{warning}");
        self.warnings.push(warning);
    }

    /// Build the fragment for `class`, merging it into `base` when given.
    /// A final build also attaches discriminators and behaviors.
    pub(crate) fn synthesize(
        &mut self,
        class: &str,
        base: Option<&Fragment>,
        options: Option<&SchemaOptions>,
        is_final: bool,
    ) -> Result<Fragment, SchemaError> {
        let descriptor = self
            .registry
            .descriptor(class)
            .cloned()
            .ok_or_else(|| SchemaError::UnknownClass {
                class: class.to_string(),
            })?;
        let lineage = self.lineage(class)?;

        // options: global < ancestors < class < call
        let model = self.globals.layer(&self.model_options(&lineage));
        let schema_options = match options {
            Some(later) => model.schema_options.merge(later),
            None => model.schema_options,
        };
        let behavior = model.options;

        debug!(class, is_final, "synthesis start");
        self.registry.set_state(class, SynthesisState::Resolving);

        for field in self.registry.take_pending(class) {
            if let Some(config) = descriptor.field(&field) {
                self.process_prop(class, config, behavior)?;
            }
        }
        self.refresh_embedded(class)?;

        let mut fragment = match base {
            Some(base) => {
                let mut fragment = base.clone();
                fragment.name = class.to_string();
                fragment.options = fragment.options.merge(&schema_options);
                fragment
            }
            None => Fragment::new(class, schema_options),
        };

        if let Some(parent) = &descriptor.parent {
            let inherited = self.parent_fragment(parent)?;
            fragment.options = inherited.options.merge(&fragment.options);
            fragment.add_paths(inherited.paths);
            fragment.methods.extend(inherited.methods);
            fragment.statics.extend(inherited.statics);
        }

        if let Some(entry) = self.registry.entry(class) {
            fragment.add_paths(entry.paths.clone());
        }
        fragment.load_members(&descriptor.methods, &descriptor.statics);

        if let Some(entry) = self.registry.entry_mut(class) {
            entry.fragment = Some(fragment.clone());
        }
        self.registry.set_state(class, SynthesisState::Built);
        self.registry.record_constructor(class);

        let fragment = if is_final {
            self.finalize(class, &lineage, fragment)?
        } else {
            fragment
        };

        debug!(class, is_final, paths = fragment.paths.len(), "synthesis end");

        Ok(fragment)
    }

    // Embedded classes are referenced by name, so any of them that gained
    // fields since it was last built is rebuilt before this class is handed
    // out.
    fn refresh_embedded(&mut self, class: &str) -> Result<(), SchemaError> {
        let mut seen = BTreeSet::from([class.to_string()]);
        let mut queue = self.embedded_targets(class);

        while let Some(name) = queue.pop() {
            if !seen.insert(name.clone()) {
                continue;
            }
            if self.registry.state(&name) == SynthesisState::Pending {
                debug!(class, embedded = %name, "rebuilding pending embedded class");
                self.synthesize(&name, None, None, false)?;
            }
            queue.extend(self.embedded_targets(&name));
        }

        Ok(())
    }

    fn embedded_targets(&self, class: &str) -> Vec<String> {
        self.registry.entry(class).map_or_else(Vec::new, |entry| {
            entry
                .paths
                .values()
                .filter_map(|d| d.storage.embedded_class())
                .map(str::to_string)
                .collect()
        })
    }

    // Classes from the root ancestor down to `class`.
    fn lineage(&self, class: &str) -> Result<Vec<String>, SchemaError> {
        let mut seen = BTreeSet::from([class.to_string()]);
        let mut chain = vec![class.to_string()];
        let mut current = class.to_string();

        while let Some(parent) = self
            .registry
            .descriptor(&current)
            .and_then(|d| d.parent.clone())
        {
            if !seen.insert(parent.clone()) {
                return Err(SchemaError::InheritanceCycle {
                    class: class.to_string(),
                    parent,
                });
            }
            if !self.registry.contains(&parent) {
                return Err(SchemaError::UnknownClass { class: parent });
            }
            chain.push(parent.clone());
            current = parent;
        }

        chain.reverse();

        Ok(chain)
    }

    fn descriptors<'b>(&'b self, lineage: &'b [String]) -> impl Iterator<Item = &'b ClassDescriptor> {
        lineage.iter().filter_map(|c| self.registry.descriptor(c))
    }

    fn model_options(&self, lineage: &[String]) -> ModelOptions {
        self.descriptors(lineage)
            .fold(ModelOptions::default(), |acc, d| acc.merge(&d.model_options))
    }

    // A parent still resolving further up the stack contributes what it has
    // processed so far.
    fn parent_fragment(&mut self, parent: &str) -> Result<Fragment, SchemaError> {
        if self.registry.state(parent) == SynthesisState::Resolving {
            let Some(entry) = self.registry.entry(parent) else {
                return Err(SchemaError::UnknownClass {
                    class: parent.to_string(),
                });
            };
            let mut fragment = entry
                .fragment
                .clone()
                .unwrap_or_else(|| Fragment::new(parent, SchemaOptions::default()));
            fragment.add_paths(entry.paths.clone());

            return Ok(fragment);
        }

        self.synthesize(parent, None, None, false)
    }

    fn finalize(
        &mut self,
        class: &str,
        lineage: &[String],
        mut fragment: Fragment,
    ) -> Result<Fragment, SchemaError> {
        if fragment.is_finalized_for(class) {
            debug!(class, "base already finalized, skipping attach");
            self.registry.set_state(class, SynthesisState::Finalized);

            return Ok(fragment);
        }

        self.finalizing.push(class.to_string());
        let attached = self.attach(class, lineage, &mut fragment);
        self.finalizing.pop();
        attached?;

        self.registry.set_state(class, SynthesisState::Finalized);

        Ok(fragment)
    }

    fn attach(
        &mut self,
        class: &str,
        lineage: &[String],
        fragment: &mut Fragment,
    ) -> Result<(), SchemaError> {
        // discriminators, nearest declaration wins per path
        let mut tables: BTreeMap<String, Vec<DiscriminatorEntry>> = BTreeMap::new();
        for name in lineage {
            if let Some(entry) = self.registry.entry(name) {
                tables.extend(entry.discriminators.clone());
            }
        }
        for (field, entries) in &tables {
            self.apply_discriminators(class, fragment, field, entries)?;
        }

        let descriptors: Vec<ClassDescriptor> = self.descriptors(lineage).cloned().collect();

        // hooks
        for stage in [HookStage::Pre, HookStage::Post] {
            for hook in descriptors.iter().flat_map(|d| &d.hooks) {
                if hook.stage == stage {
                    fragment.hooks.push(hook.clone());
                }
            }
        }
        debug!(class, count = fragment.hooks.len(), "hooks applied");

        // virtuals
        for name in lineage {
            if let Some(entry) = self.registry.entry(name) {
                fragment.virtuals.extend(entry.virtuals.clone());
            }
        }
        debug!(class, count = fragment.virtuals.len(), "virtuals applied");

        // indexes
        for index in descriptors.iter().flat_map(|d| &d.indexes) {
            fragment.indexes.push(index.clone());
        }
        debug!(class, count = fragment.indexes.len(), "indexes applied");

        // query methods
        for method in descriptors.iter().flat_map(|d| &d.query_methods) {
            fragment
                .query
                .insert(method.name().to_string(), method.clone());
        }

        // plugins
        for plugin in descriptors.iter().flat_map(|d| &d.plugins) {
            debug!(class, plugin = plugin.name(), "applying plugin");
            plugin.func.call(fragment, &plugin.options);
            fragment.plugins.push(plugin.name().to_string());
        }

        fragment.mark_origin(class);

        Ok(())
    }

    fn apply_discriminators(
        &mut self,
        class: &str,
        fragment: &mut Fragment,
        field: &str,
        entries: &[DiscriminatorEntry],
    ) -> Result<(), SchemaError> {
        let path_error = |reason: &str| SchemaError::DiscriminatorPath {
            class: class.to_string(),
            field: field.to_string(),
            reason: reason.to_string(),
        };

        let Some(path) = fragment.path(field) else {
            return Err(path_error("path does not exist"));
        };
        let Some(base_class) = path.storage.embedded_class().map(str::to_string) else {
            return Err(path_error("path does not hold an embedded fragment"));
        };
        debug!(class, field, base = %base_class, count = entries.len(), "applying discriminators");

        let base = self
            .registry
            .fragment(&base_class)
            .cloned()
            .unwrap_or_else(|| Fragment::new(&base_class, SchemaOptions::default()));
        let key = base.options.discriminator_key().to_string();

        let mut set = DiscriminatorSet::new(&key);
        for entry in entries {
            let child = if entry.class == class {
                fragment.clone()
            } else if self.finalizing.contains(&entry.class) {
                self.synthesize(&entry.class, None, None, false)?
            } else {
                self.synthesize(&entry.class, None, None, true)?
            };

            set.children.insert(
                entry.class.clone(),
                DiscriminatorChild {
                    value: entry.stored_value().to_string(),
                    fragment: child.discriminated_from(&base, &key),
                },
            );
        }

        if let Some(path) = fragment.paths.get_mut(field) {
            path.discriminators = Some(set);
        }

        Ok(())
    }
}
