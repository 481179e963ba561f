use crate::{
    build::SchemaContext,
    error::SchemaError,
    node::{ClassDecl, DiscriminatorSource, TypeRef},
    test_support::{array_of, build, class, context, number, string},
};

fn shapes() -> SchemaContext {
    context([
        ClassDecl::new("Shape").prop("label", string()),
        ClassDecl::new("Circle")
            .parent("Shape")
            .prop("radius", number()),
        ClassDecl::new("Square").parent("Shape").prop("side", number()),
    ])
}

#[test]
fn children_are_attached_under_the_path_by_name() {
    let mut ctx = shapes();
    ctx.declare(ClassDecl::new("Drawing").prop(
        "shape",
        class("Shape").discriminators(vec![
            DiscriminatorSource::class("Circle"),
            DiscriminatorSource::with_value("Square", "sq"),
        ]),
    ))
    .expect("valid declaration");

    let schema = build(&mut ctx, "Drawing");
    let set = schema
        .root
        .path("shape")
        .and_then(|p| p.discriminators.as_ref())
        .expect("discriminators attached");

    assert_eq!(set.key, "__t");
    let names: Vec<_> = set.children.keys().map(String::as_str).collect();
    assert_eq!(names, ["Circle", "Square"]);

    let circle = set.get("Circle").expect("circle child");
    assert_eq!(circle.value, "Circle");
    assert!(circle.fragment.path("radius").is_some());
    assert!(circle.fragment.path("label").is_some());
    assert_eq!(circle.fragment.origin(), Some("Circle"));

    let square = set.get("Square").expect("square child");
    assert_eq!(square.value, "sq");
    assert!(square.fragment.path("side").is_some());

    assert!(schema.embedded.contains_key("Shape"));
}

#[test]
fn custom_discriminator_key_comes_from_the_base() {
    let mut ctx = context([
        ClassDecl::new("Event").model_options(crate::config::ModelOptions {
            schema_options: crate::config::SchemaOptions {
                discriminator_key: Some("kind".into()),
                ..Default::default()
            },
            ..Default::default()
        }),
        ClassDecl::new("Click").parent("Event").prop("x", number()),
        ClassDecl::new("Log").prop(
            "events",
            array_of(TypeRef::class("Event"))
                .discriminators(vec![DiscriminatorSource::class("Click")]),
        ),
    ]);

    let schema = build(&mut ctx, "Log");
    let set = schema
        .root
        .path("events")
        .and_then(|p| p.discriminators.as_ref())
        .expect("discriminators attached");

    assert_eq!(set.key, "kind");
    assert!(set.get("Click").is_some());
}

#[test]
fn self_named_entry_reuses_the_fragment_in_progress() {
    let mut ctx = shapes();
    ctx.declare(
        ClassDecl::new("Group").parent("Shape").prop(
            "members",
            array_of(TypeRef::class("Shape"))
                .discriminators(vec![DiscriminatorSource::class("Group")]),
        ),
    )
    .expect("valid declaration");

    let schema = build(&mut ctx, "Group");
    let child = schema
        .root
        .path("members")
        .and_then(|p| p.discriminators.as_ref())
        .and_then(|set| set.get("Group"))
        .expect("group child");

    assert!(child.fragment.path("members").is_some());
    assert!(child.fragment.path("label").is_some());
}

#[test]
fn discriminators_on_a_scalar_path_are_fatal() {
    let mut ctx = shapes();
    ctx.declare(ClassDecl::new("Drawing").prop(
        "title",
        string().discriminators(vec![DiscriminatorSource::class("Circle")]),
    ))
    .expect("valid declaration");

    let err = ctx.build_schema("Drawing").expect_err("scalar path");
    assert!(matches!(err, SchemaError::DiscriminatorPath { .. }));
}

#[test]
fn unknown_child_class_is_fatal() {
    let mut ctx = shapes();
    ctx.declare(ClassDecl::new("Drawing").prop(
        "shape",
        class("Shape").discriminators(vec![DiscriminatorSource::class("Hexagon")]),
    ))
    .expect("valid declaration");

    let err = ctx.build_schema("Drawing").expect_err("unknown child");
    assert!(matches!(err, SchemaError::UnknownClass { ref class } if class == "Hexagon"));
}

#[test]
fn malformed_entry_is_rejected_at_declaration() {
    let mut ctx = shapes();
    let err = ctx
        .declare(ClassDecl::new("Drawing").prop(
            "shape",
            class("Shape").discriminators(vec![DiscriminatorSource::Type(TypeRef::Array(None))]),
        ))
        .expect_err("malformed entry");

    assert!(matches!(
        err,
        SchemaError::MalformedDiscriminator { index: 0, .. }
    ));
    assert!(ctx.descriptor("Drawing").is_none());
}
