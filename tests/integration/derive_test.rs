//! Builders generated by `#[derive(Rep)]`

use rep::serde_json::json;
use rep::{Field, InstancePool, Rep, ScopeToken, field_set};

use crate::utils::{as_value, init_logging, options};

#[derive(Debug, Default, Rep)]
#[rep(name = "Sample")]
struct SampleRep {
    #[rep(init)]
    foo: Field<String>,

    #[rep(init, default = "\"barbar\"")]
    bar: Field<String>,

    #[rep(init, rename = "count", default = 0)]
    total: Field<u32>,

    #[rep(read)]
    kind: String,

    #[allow(dead_code)]
    scratch: Vec<u8>,
}

impl SampleRep {
    fn shout(&self) -> Option<String> {
        self.foo.get().map(|foo| foo.to_uppercase())
    }
}

#[test]
fn test_derived_init_fields() -> anyhow::Result<()> {
    init_logging();
    let descriptor = SampleRep::rep_builder()
        .field_set("default", field_set!["foo", "bar", "count"])
        .build();

    assert_eq!(descriptor.type_name(), "Sample");
    assert_eq!(
        descriptor.initialization().field_names().collect::<Vec<_>>(),
        ["foo", "bar", "count"]
    );

    let sample = descriptor.construct(options(json!({ "foo": "foo123" })))?;
    assert_eq!(
        as_value(descriptor.project_default(&sample)?),
        json!({ "foo": "foo123", "bar": "barbar", "count": 0 })
    );

    let sample = descriptor.construct(options(json!({ "bar": "notbar", "count": 3 })))?;
    assert_eq!(sample.total.get(), Some(&3));
    assert_eq!(sample.bar.get().map(String::as_str), Some("notbar"));
    Ok(())
}

#[test]
fn test_derived_builder_takes_extra_accessors() -> anyhow::Result<()> {
    let descriptor = SampleRep::rep_builder()
        .accessor("shout", SampleRep::shout)
        .field_set("default", field_set!["loud" => "shout", "kind"])
        .build();
    descriptor.validate()?;

    let mut sample = descriptor.construct(options(json!({ "foo": "hey" })))?;
    sample.kind = "greeting".to_string();

    assert_eq!(descriptor.to_json(&sample)?, r#"{"loud":"HEY","kind":"greeting"}"#);
    Ok(())
}

#[test]
fn test_derived_type_in_pool() -> anyhow::Result<()> {
    let descriptor = SampleRep::rep_builder()
        .field_set("default", field_set!["foo", "bar"])
        .build();
    let pool = InstancePool::default();

    let rows = pool.project_batch(
        &descriptor,
        ScopeToken::GLOBAL,
        "default",
        vec![json!(["a", "b"]), json!(["c"])],
    )?;

    assert_eq!(as_value(rows[0].clone()), json!({ "foo": "a", "bar": "b" }));
    assert_eq!(as_value(rows[1].clone()), json!({ "foo": "c", "bar": "barbar" }));
    Ok(())
}
