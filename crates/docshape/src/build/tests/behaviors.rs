use crate::{
    build::SynthesisState,
    fragment::{Container, FieldDescriptor, Fragment, StorageType},
    node::{ClassDecl, Document, Func, Index, Plugin},
    test_support::{build, class, context, number, string},
    types::{HookStage, ScalarType},
};
use serde_json::{Value, json};

fn touch(doc: &mut Document) {
    doc.insert("touched".into(), Value::Bool(true));
}

fn stamp_plugin() -> Plugin {
    Plugin {
        func: Func::plugin("stamp", |fragment, options| {
            let path = options["path"].as_str().unwrap_or("stamped").to_string();
            fragment.add_paths([(
                path,
                FieldDescriptor::new(StorageType::Scalar(ScalarType::Date), Container::Single),
            )]);
        }),
        options: json!({ "path": "updatedAt" }),
    }
}

fn hook_names(fragment: &Fragment) -> Vec<(HookStage, String)> {
    fragment.hooks
        .iter()
        .map(|h| (h.stage, h.handler.name().to_string()))
        .collect()
}

#[test]
fn pre_hooks_come_before_post_hooks_in_declaration_order() {
    let mut ctx = context([ClassDecl::new("User")
        .prop("name", string())
        .post("save", "audit", touch)
        .pre("save", "first", touch)
        .pre("validate", "second", touch)]);

    let schema = build(&mut ctx, "User");

    assert_eq!(
        hook_names(&schema.root),
        [
            (HookStage::Pre, "first".to_string()),
            (HookStage::Pre, "second".to_string()),
            (HookStage::Post, "audit".to_string()),
        ]
    );
    assert_eq!(schema.root.hooks[1].event, "validate");
}

#[test]
fn hook_handlers_run_against_documents() {
    let mut ctx = context([ClassDecl::new("User").pre("save", "touch", touch)]);
    let schema = build(&mut ctx, "User");

    let mut doc = Document::new();
    schema.root.hooks[0].handler.call(&mut doc);

    assert_eq!(doc.get("touched"), Some(&Value::Bool(true)));
}

#[test]
fn duplicate_indexes_are_kept() {
    let mut ctx = context([ClassDecl::new("User")
        .prop("email", string())
        .index(Index::new(["email"]))
        .index(Index::new(["email"]))]);

    let schema = build(&mut ctx, "User");
    assert_eq!(schema.root.indexes.len(), 2);
}

#[test]
fn plugins_run_with_their_options() {
    let mut ctx = context([ClassDecl::new("Post")
        .prop("title", string())
        .plugin(stamp_plugin())]);

    let schema = build(&mut ctx, "Post");

    assert_eq!(schema.root.plugins, ["stamp"]);
    let added = schema.root.path("updatedAt").expect("plugin path");
    assert_eq!(added.storage, StorageType::Scalar(ScalarType::Date));
}

#[test]
fn members_are_attached_by_name() {
    let mut ctx = context([ClassDecl::new("Item")
        .prop("price", number())
        .query_method("byPrice", |q| json!({ "price": q }))
        .method("label", |doc| doc.get("price").cloned().unwrap_or(Value::Null))
        .static_fn("cheapest", |_| json!(1))]);

    let schema = build(&mut ctx, "Item");
    let root = &schema.root;

    let query = root.query.get("byPrice").expect("query method");
    assert_eq!(query.call(json!(5)), json!({ "price": 5 }));
    assert!(root.methods.contains_key("label"));
    assert!(root.statics.contains_key("cheapest"));

    let behaviors = root.behaviors();
    assert_eq!(behaviors["$query"], json!(["byPrice"]));
}

#[test]
fn final_fragment_reports_its_class() {
    let mut ctx = context([ClassDecl::new("Item").prop("price", number())]);
    let schema = build(&mut ctx, "Item");

    assert_eq!(schema.root.origin(), Some("Item"));
    assert_eq!(
        schema.root.class_name_of(&Document::new()).as_deref(),
        Some("Item")
    );
}

#[test]
fn parent_behaviors_are_inherited_first() {
    let mut ctx = context([
        ClassDecl::new("Base")
            .prop("createdAt", string())
            .pre("save", "base", touch)
            .index(Index::new(["createdAt"])),
        ClassDecl::new("Child")
            .parent("Base")
            .prop("name", string())
            .pre("save", "child", touch),
    ]);

    let schema = build(&mut ctx, "Child");
    let names: Vec<_> = schema
        .root
        .hooks
        .iter()
        .map(|h| h.handler.name())
        .collect();

    assert_eq!(names, ["base", "child"]);
    assert_eq!(schema.root.indexes.len(), 1);
    assert!(schema.root.path("createdAt").is_some());
    assert_eq!(schema.root.origin(), Some("Child"));
}

#[test]
fn rebuilding_is_deterministic() {
    let mut ctx = context([ClassDecl::new("User")
        .prop("name", string().required())
        .pre("save", "touch", touch)
        .index(Index::new(["name"]))
        .plugin(stamp_plugin())]);

    let first = build(&mut ctx, "User");
    let second = build(&mut ctx, "User");

    assert_eq!(first.root.to_definition(), second.root.to_definition());
    assert_eq!(first.root.behaviors(), second.root.behaviors());
    assert_eq!(second.root.hooks.len(), 1);
    assert_eq!(second.root.plugins.len(), 1);
}

#[test]
fn finalized_base_is_not_attached_twice() {
    let mut ctx = context([ClassDecl::new("User")
        .prop("name", string())
        .pre("save", "touch", touch)]);

    let root = build(&mut ctx, "User").root;
    let again = ctx
        .synthesize("User", Some(&root), None, true)
        .expect("synthesis over a finalized base");

    assert_eq!(again.hooks.len(), 1);
    assert_eq!(ctx.state("User"), SynthesisState::Finalized);
}

#[test]
fn states_follow_declaration_and_synthesis() {
    let mut ctx = context([ClassDecl::new("User").prop("name", string())]);
    assert_eq!(ctx.state("User"), SynthesisState::Pending);
    assert_eq!(ctx.state("Nobody"), SynthesisState::Unseen);
    assert!(ctx.resolve_class("User").is_none());

    ctx.synthesize("User", None, None, false)
        .expect("non-final synthesis");
    assert_eq!(ctx.state("User"), SynthesisState::Built);

    build(&mut ctx, "User");
    assert_eq!(ctx.state("User"), SynthesisState::Finalized);
    assert_eq!(
        ctx.resolve_class("User").map(|d| d.name.as_str()),
        Some("User")
    );

    ctx.declare(ClassDecl::new("User").prop("age", number()))
        .expect("redeclare");
    assert_eq!(ctx.state("User"), SynthesisState::Pending);

    let schema = build(&mut ctx, "User");
    assert!(schema.root.path("name").is_some());
    assert!(schema.root.path("age").is_some());
}

#[test]
fn redeclared_embedded_class_is_rebuilt() {
    let mut ctx = context([
        ClassDecl::new("Address").prop("city", string()),
        ClassDecl::new("User").prop("home", class("Address")),
    ]);
    build(&mut ctx, "User");

    ctx.declare(ClassDecl::new("Address").prop("zip", number()))
        .expect("redeclare");
    assert_eq!(ctx.state("Address"), SynthesisState::Pending);

    let schema = build(&mut ctx, "User");
    let address = schema.get("Address").expect("Address is embedded");

    assert!(address.path("city").is_some());
    assert!(address.path("zip").is_some());
    assert_eq!(ctx.state("Address"), SynthesisState::Built);
}

#[test]
fn pending_class_deep_in_the_embedding_chain_is_rebuilt() {
    let mut ctx = context([
        ClassDecl::new("Geo").prop("lat", number()),
        ClassDecl::new("Address").prop("geo", class("Geo")),
        ClassDecl::new("User").prop("home", class("Address")),
    ]);
    build(&mut ctx, "User");

    ctx.declare(ClassDecl::new("Geo").prop("lng", number()))
        .expect("redeclare");
    let schema = build(&mut ctx, "User");

    assert_eq!(ctx.state("Address"), SynthesisState::Built);
    assert_eq!(ctx.state("Geo"), SynthesisState::Built);
    assert!(
        schema
            .get("Geo")
            .is_some_and(|geo| geo.path("lat").is_some() && geo.path("lng").is_some())
    );
}
