//! Projection through field sets

use rep::serde_json::json;
use rep::{FieldRegistry, FieldsQuery, RepError, TypeDescriptor, field_set};

use crate::utils::{
    Point, UserRep, as_value, init_logging, numbers_descriptor, options, parse, point_descriptor,
    user_descriptor,
};

#[test]
fn test_point_end_to_end() -> anyhow::Result<()> {
    init_logging();
    let descriptor = point_descriptor();
    let point = descriptor.construct(options(json!({ "x": 2, "y": 3 })))?;

    assert_eq!(as_value(descriptor.project_default(&point)?), json!({ "x": 2, "y": 3, "sum": 5 }));
    assert_eq!(as_value(descriptor.project(&point, "coordinates")?), json!({ "x": 2, "y": 3 }));
    Ok(())
}

#[test]
fn test_to_json_keeps_declaration_order() -> anyhow::Result<()> {
    let descriptor = numbers_descriptor();
    let json = descriptor.to_json(&crate::utils::Numbers)?;

    assert_eq!(json, r#"{"one":1,"two":2,"three":3}"#);
    Ok(())
}

#[test]
fn test_missing_accessor_fails_whole_projection() {
    init_logging();
    let descriptor = numbers_descriptor();

    let err = descriptor.project(&crate::utils::Numbers, "broken").unwrap_err();
    assert!(matches!(
        err,
        RepError::MissingAccessor { ref accessor, ref set, .. } if accessor == "four" && set == "broken"
    ));
    assert!(descriptor.to_json_set(&crate::utils::Numbers, "broken").is_err());
    assert!(descriptor.validate().is_err());
}

#[test]
fn test_unknown_field_set() {
    let descriptor = point_descriptor();
    let err = descriptor.project(&Point::default(), "nonexistent").unwrap_err();

    assert_eq!(
        err.to_string(),
        "There are no fields under the name 'nonexistent' for the type 'Point'"
    );
}

#[test]
fn test_defaults_until_supplied() -> anyhow::Result<()> {
    let descriptor = user_descriptor();

    let user = descriptor.construct(options(json!({ "name": "ann" })))?;
    let projection = descriptor.project(&user, "default")?;
    assert_eq!(projection.get("active"), Some(&json!(true)));
    assert_eq!(projection.get("email"), Some(&json!(null)));

    let user = descriptor.construct(options(json!({ "active": false })))?;
    assert_eq!(user.active.get(), Some(&true));
    assert_eq!(descriptor.project(&user, "default")?.get("active"), Some(&json!(true)));

    let user = descriptor.construct(options(json!({ "active": null })))?;
    assert_eq!(user.active.get(), Some(&true));
    Ok(())
}

#[test]
fn test_memoized_accessor_is_stable_within_an_instance() -> anyhow::Result<()> {
    let descriptor = user_descriptor();
    let user = descriptor.construct(options(json!({ "name": "ann" })))?;

    let first = descriptor.project(&user, "default")?;
    let second = descriptor.project(&user, "default")?;
    assert_eq!(first.get("random_number"), second.get("random_number"));
    Ok(())
}

#[test]
fn test_hooks_rewrite_options() -> anyhow::Result<()> {
    let descriptor = TypeDescriptor::<UserRep>::builder("UserRep")
        .init_field("name", None, |u| &u.name, |u| &mut u.name)
        .init_field("email", None, |u| &u.email, |u| &mut u.email)
        .before_initialize(|options| {
            if let Some(name) = options.get("name").and_then(|v| v.as_str()) {
                let email = format!("{name}@example.com");
                options.insert("email".to_string(), json!(email));
            }
        })
        .after_initialize(|user, _| {
            if let Some(name) = user.name.take() {
                user.name.set(Some(name.to_uppercase()));
            }
        })
        .field_set("default", field_set!["name", "email"])
        .build();

    let user = descriptor.construct(options(json!({ "name": "ann" })))?;
    assert_eq!(
        as_value(descriptor.project_default(&user)?),
        json!({ "name": "ANN", "email": "ann@example.com" })
    );
    Ok(())
}

#[test]
fn test_invalid_option() {
    let descriptor = point_descriptor();
    let err = descriptor.construct(options(json!({ "x": "two" }))).unwrap_err();

    assert!(matches!(err, RepError::InvalidOption { ref field, .. } if field == "x"));
}

#[test]
fn test_json_declaration() -> anyhow::Result<()> {
    let descriptor = TypeDescriptor::<Point>::builder("Point")
        .init_field("x", None, |p| &p.x, |p| &mut p.x)
        .init_field("y", None, |p| &p.y, |p| &mut p.y)
        .accessor("sum", Point::sum)
        .declare(&json!({ "default": ["x", "y"], "total": { "total": "sum" } }))?
        .build();
    let point = descriptor.construct(options(json!({ "x": 4, "y": 1 })))?;

    assert_eq!(parse(&descriptor.to_json(&point)?), json!({ "x": 4, "y": 1 }));
    assert_eq!(parse(&descriptor.to_json_set(&point, "total")?), json!({ "total": 5 }));
    Ok(())
}

#[test]
fn test_registry_queries() -> anyhow::Result<()> {
    let mut registry = FieldRegistry::new();
    registry.declare(&json!({ "default": "name", "full": ["name", { "mail": "email" }] }))?;

    match registry.declare(&json!("full"))? {
        FieldsQuery::Set(Some(set)) => {
            assert_eq!(set.output_keys().collect::<Vec<_>>(), ["name", "mail"]);
        }
        other => panic!("unexpected query result: {other:?}"),
    }
    assert!(matches!(registry.declare(&json!("missing"))?, FieldsQuery::Set(None)));
    match registry.declare(&json!(null))? {
        FieldsQuery::All(sets) => assert_eq!(sets.len(), 2),
        other => panic!("unexpected query result: {other:?}"),
    }
    assert_eq!(registry.all_accessor_names(), ["name", "email"]);

    let err = registry.declare(&json!(42)).unwrap_err();
    assert!(matches!(err, RepError::InvalidFieldSetArgument(_)));
    Ok(())
}
