use crate::{
    fragment::{Container, FieldDescriptor, Fragment, RefKind, StorageType, VirtualField},
    node::EnumValue,
};
use serde_json::{Map, Value, json};

impl FieldDescriptor {
    /// Driver definition for this path.
    #[must_use]
    pub fn to_definition(&self) -> Value {
        let element = self.element();
        let mut def = match self.container {
            Container::Single => element,
            Container::Array { depth } => {
                let mut ty = Value::Object(element);
                for _ in 0..depth.max(1) {
                    ty = Value::Array(vec![ty]);
                }

                let mut def = Map::new();
                def.insert("type".into(), ty);
                def
            }
            Container::Map => {
                let mut def = Map::new();
                def.insert("type".into(), json!("Map"));
                def.insert("of".into(), Value::Object(element));
                def
            }
        };

        self.write_outer(&mut def);

        Value::Object(def)
    }

    // element-level: type, reference, enum, string and number rules
    fn element(&self) -> Map<String, Value> {
        let mut def = Map::new();

        let ty = match &self.storage {
            StorageType::Scalar(s) | StorageType::Reference { id: s, .. } => json!(s.to_string()),
            StorageType::Embedded(name) => json!({ "$fragment": name }),
            StorageType::Mixed => json!("Mixed"),
        };
        def.insert("type".into(), ty);

        match self.reference() {
            Some(RefKind::Model(name)) => {
                def.insert("ref".into(), json!(name));
            }
            Some(RefKind::Path(path)) => {
                def.insert("refPath".into(), json!(path));
            }
            None => {}
        }

        if let Some(values) = &self.enum_values {
            let values: Vec<Value> = values.iter().map(EnumValue::to_json).collect();
            def.insert("enum".into(), Value::Array(values));
        }

        let s = &self.string;
        insert_opt(&mut def, "lowercase", s.lowercase.map(Value::Bool));
        insert_opt(&mut def, "uppercase", s.uppercase.map(Value::Bool));
        insert_opt(&mut def, "trim", s.trim.map(Value::Bool));
        insert_opt(&mut def, "match", s.pattern.clone().map(Value::String));
        insert_opt(&mut def, "minlength", s.minlength.map(|n| json!(n)));
        insert_opt(&mut def, "maxlength", s.maxlength.map(|n| json!(n)));
        insert_opt(&mut def, "min", self.number.min.map(|n| json!(n)));
        insert_opt(&mut def, "max", self.number.max.map(|n| json!(n)));

        def
    }

    // field-level options
    fn write_outer(&self, def: &mut Map<String, Value>) {
        let o = &self.options;
        insert_opt(def, "required", o.required.map(Value::Bool));
        insert_opt(def, "default", o.default.clone());
        insert_opt(def, "select", o.select.map(Value::Bool));
        insert_opt(def, "index", o.index.map(Value::Bool));
        insert_opt(def, "unique", o.unique.map(Value::Bool));
        insert_opt(def, "sparse", o.sparse.map(Value::Bool));
        insert_opt(def, "immutable", o.immutable.map(Value::Bool));
        insert_opt(def, "alias", o.alias.clone().map(Value::String));

        if !o.validate.is_empty() {
            let validators = o
                .validate
                .iter()
                .map(|v| json!({ "validator": v.func.name(), "message": v.message }))
                .collect();
            def.insert("validate".into(), Value::Array(validators));
        }

        if let Some(accessor) = &self.accessor {
            def.insert("get".into(), json!(accessor.get.name()));
            def.insert("set".into(), json!(accessor.set.name()));
        }

        if let Some(set) = &self.discriminators {
            let children: Map<String, Value> = set
                .children
                .iter()
                .map(|(class, child)| {
                    (
                        class.clone(),
                        json!({
                            "value": child.value,
                            "fragment": child.fragment.to_definition(),
                        }),
                    )
                })
                .collect();
            def.insert(
                "$discriminators".into(),
                json!({ "key": set.key, "children": children }),
            );
        }

        if self.skip_discriminator_check {
            def.insert("$skipDiscriminatorCheck".into(), Value::Bool(true));
        }
    }
}

impl VirtualField {
    #[must_use]
    pub fn to_definition(&self) -> Value {
        let mut def = Map::new();
        def.insert("ref".into(), json!(self.reference));
        def.insert("localField".into(), json!(self.local_field));
        def.insert("foreignField".into(), json!(self.foreign_field));
        insert_opt(&mut def, "justOne", self.just_one.map(Value::Bool));
        insert_opt(&mut def, "count", self.count.map(Value::Bool));
        insert_opt(&mut def, "match", self.match_filter.clone());
        insert_opt(&mut def, "options", self.options.clone());

        Value::Object(def)
    }
}

impl Fragment {
    /// Driver definition: one entry per stored path.
    #[must_use]
    pub fn to_definition(&self) -> Value {
        let paths: Map<String, Value> = self
            .paths
            .iter()
            .map(|(name, descriptor)| (name.clone(), descriptor.to_definition()))
            .collect();

        Value::Object(paths)
    }

    /// Summary of everything attached besides stored paths.
    #[must_use]
    pub fn behaviors(&self) -> Value {
        let hooks: Vec<Value> = self
            .hooks
            .iter()
            .map(|h| json!({ "stage": h.stage.to_string(), "event": h.event, "handler": h.handler.name() }))
            .collect();

        let indexes: Vec<Value> = self
            .indexes
            .iter()
            .map(|index| {
                json!({
                    "fields": index.spec(),
                    "options": serde_json::to_value(&index.options).unwrap_or_default(),
                })
            })
            .collect();

        let virtuals: Map<String, Value> = self
            .virtuals
            .iter()
            .map(|(name, v)| (name.clone(), v.to_definition()))
            .collect();

        let discriminators: Map<String, Value> = self
            .paths
            .iter()
            .filter_map(|(name, descriptor)| {
                let set = descriptor.discriminators.as_ref()?;
                let children: Map<String, Value> = set
                    .children
                    .iter()
                    .map(|(class, child)| (class.clone(), json!(child.value)))
                    .collect();

                Some((name.clone(), json!({ "key": set.key, "children": children })))
            })
            .collect();

        json!({
            "$options": serde_json::to_value(&self.options).unwrap_or_default(),
            "$hooks": hooks,
            "$indexes": indexes,
            "$virtuals": virtuals,
            "$query": self.query.keys().collect::<Vec<_>>(),
            "$plugins": self.plugins,
            "$methods": self.methods.keys().collect::<Vec<_>>(),
            "$statics": self.statics.keys().collect::<Vec<_>>(),
            "$discriminators": discriminators,
            "$origin": self.origin(),
        })
    }
}

fn insert_opt(def: &mut Map<String, Value>, key: &str, value: Option<Value>) {
    if let Some(value) = value {
        def.insert(key.to_string(), value);
    }
}

///
/// TESTS
///
