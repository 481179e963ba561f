use crate::{
    build::{SchemaContext, SynthesisState},
    config::SchemaOptions,
    error::{SchemaError, SchemaWarning},
    node::{ClassDecl, Func, PropOptions},
    test_support::{build, class, context, string},
    types::Primitive,
};
use serde_json::json;

fn broken() -> SchemaContext {
    context([
        ClassDecl::new("A")
            .prop("loose", PropOptions::typed(Primitive::Mixed))
            .prop("b", class("B")),
        ClassDecl::new("B").prop("me", class("B")),
    ])
}

#[test]
fn failed_synthesis_commits_nothing() {
    let mut ctx = broken();

    let err = ctx.build_schema("A").expect_err("nested self reference");
    assert!(matches!(err, SchemaError::SelfReference { ref class, .. } if class == "B"));

    for name in ["A", "B"] {
        assert_eq!(ctx.state(name), SynthesisState::Pending);
        assert!(ctx.fragment(name).is_none());
        assert!(ctx.resolve_class(name).is_none());
    }
    assert!(ctx.warnings().is_empty());
}

#[test]
fn fixed_declaration_builds_after_a_failure() {
    let mut ctx = broken();
    ctx.build_schema("A").expect_err("nested self reference");

    ctx.declare(ClassDecl::new("B").prop("me", string()))
        .expect("redeclare");
    let schema = build(&mut ctx, "A");

    assert!(schema.get("B").is_some());
    assert!(
        ctx.warnings()
            .iter()
            .any(|w| matches!(w, SchemaWarning::MixedFallback { field, .. } if field == "loose"))
    );
}

#[test]
fn rejected_declaration_registers_nothing() {
    let mut ctx = SchemaContext::new();
    let err = ctx
        .declare(
            ClassDecl::new("User")
                .prop("name", string())
                .prop("upper", string().getter(Func::value("up", |v| v))),
        )
        .expect_err("getter without setter");

    assert!(matches!(
        err,
        SchemaError::UnpairedAccessor {
            present: "getter",
            missing: "setter",
            ..
        }
    ));
    assert_eq!(ctx.state("User"), SynthesisState::Unseen);
    assert!(ctx.descriptor("User").is_none());
}

#[test]
fn call_options_override_class_options() {
    let mut ctx = context([ClassDecl::new("User").prop("name", string())]);

    let fragment = ctx
        .synthesize(
            "User",
            None,
            Some(&SchemaOptions {
                collection: Some("people".into()),
                ..Default::default()
            }),
            true,
        )
        .expect("synthesis");

    assert_eq!(fragment.options.collection.as_deref(), Some("people"));
    assert_eq!(fragment.behaviors()["$options"], json!({ "collection": "people" }));
}

#[test]
fn declared_prop_creates_the_class() {
    let mut ctx = SchemaContext::new();
    ctx.declare_prop("Tag", "label", string().required())
        .expect("valid prop");

    assert_eq!(ctx.state("Tag"), SynthesisState::Pending);

    let schema = build(&mut ctx, "Tag");
    assert_eq!(
        schema.root.path("label").map(|p| p.options.required),
        Some(Some(true))
    );
}

#[test]
fn unknown_class_is_an_error() {
    let mut ctx = SchemaContext::new();
    let err = ctx.build_schema("Ghost").expect_err("unknown");

    assert!(matches!(err, SchemaError::UnknownClass { ref class } if class == "Ghost"));
}
