//! Configuration applied to descriptors and pools

use rep::serde_json::json;
use rep::{InstancePool, IsolationStrategy, RepConfig, RepError, ScopeToken, TypeDescriptor};

use crate::utils::{Point, as_value, init_logging, options};

fn configured_point(config: &RepConfig) -> rep::Result<TypeDescriptor<Point>> {
    Ok(TypeDescriptor::<Point>::builder("Point")
        .init_field("x", None, |p| &p.x, |p| &mut p.x)
        .init_field("y", None, |p| &p.y, |p| &mut p.y)
        .accessor("sum", Point::sum)
        .field_set("default", rep::field_set!["x", "y"])
        .with_config(config)?
        .build())
}

#[test]
fn test_config_overrides_field_sets() -> anyhow::Result<()> {
    init_logging();
    let config = RepConfig::from_json_str(
        r#"{
            "default_field_set": "summary",
            "isolation": "locked",
            "field_sets": {
                "Point": { "summary": [{ "total": "sum" }], "default": ["y", "x"] },
                "Other": { "ignored": "name" }
            }
        }"#,
    )?;

    let descriptor = configured_point(&config)?;
    let pool = InstancePool::from_config(&config);
    assert_eq!(pool.isolation(), IsolationStrategy::Locked);
    assert_eq!(descriptor.default_set(), "summary");

    let point = descriptor.construct(options(json!({ "x": 1, "y": 2 })))?;
    assert_eq!(as_value(descriptor.project_default(&point)?), json!({ "total": 3 }));
    assert_eq!(
        descriptor.project(&point, "default")?.keys().collect::<Vec<_>>(),
        ["y", "x"]
    );

    let shared = pool.shared_to_json(
        &descriptor,
        ScopeToken::GLOBAL,
        options(json!({ "x": 5 })),
        "summary",
    )?;
    assert_eq!(shared, r#"{"total":5}"#);
    Ok(())
}

#[test]
fn test_default_config_changes_nothing() -> anyhow::Result<()> {
    let descriptor = configured_point(&RepConfig::default())?;
    let point = descriptor.construct(options(json!({ "x": 1, "y": 2 })))?;

    assert_eq!(descriptor.to_json(&point)?, r#"{"x":1,"y":2}"#);
    Ok(())
}

#[test]
fn test_malformed_override() {
    let config = RepConfig::from_json_str(r#"{ "field_sets": { "Point": { "default": [1] } } }"#);
    let err = config.and_then(|config| configured_point(&config)).unwrap_err();

    assert!(matches!(err, RepError::InvalidFieldSetArgument(_)));
}
