//! Shared fixtures for the integration tests
#![allow(dead_code)]

use rep::serde_json::{self, Value, json};
use rep::{Field, Memo, Options, TypeDescriptor, field_set, options_from_value};

/// Install a test logger once per binary
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Options map from a JSON object literal
#[must_use]
pub fn options(value: Value) -> Options {
    match options_from_value(value) {
        Ok(options) => options,
        Err(err) => panic!("bad test options: {err}"),
    }
}

/// Projection as a plain JSON value, for comparing against `json!` literals
#[must_use]
pub fn as_value(projection: rep::Projection) -> Value {
    Value::Object(projection)
}

/// A point with a derived sum
#[derive(Debug, Default)]
pub struct Point {
    pub x: Field<i64>,
    pub y: Field<i64>,
}

impl Point {
    pub fn sum(&self) -> i64 {
        self.x.get().copied().unwrap_or(0) + self.y.get().copied().unwrap_or(0)
    }
}

#[must_use]
pub fn point_descriptor() -> TypeDescriptor<Point> {
    TypeDescriptor::<Point>::builder("Point")
        .init_field("x", None, |p| &p.x, |p| &mut p.x)
        .init_field("y", None, |p| &p.y, |p| &mut p.y)
        .accessor("sum", Point::sum)
        .field_set("default", field_set!["x", "y", "sum"])
        .field_set("coordinates", field_set!["x", "y"])
        .build()
}

/// Fixed accessors, one of them exposed under an alias
#[derive(Debug, Default)]
pub struct Numbers;

#[must_use]
pub fn numbers_descriptor() -> TypeDescriptor<Numbers> {
    TypeDescriptor::<Numbers>::builder("Numbers")
        .accessor("real_one", |_: &Numbers| 1)
        .accessor("two", |_: &Numbers| 2)
        .accessor("three", |_: &Numbers| 3)
        .field_set("default", field_set!["one" => "real_one", "two", "three"])
        .field_set("broken", field_set!["two", "four"])
        .build()
}

/// A user with a memoized random number
#[derive(Debug, Default)]
pub struct UserRep {
    pub name: Field<String>,
    pub email: Field<String>,
    pub active: Field<bool>,
    pub random_number: Memo<u32>,
    pub session: Memo<u32>,
}

impl UserRep {
    pub fn random_number(&self) -> u32 {
        *self.random_number.get_or_init(rand::random::<u32>)
    }

    pub fn session(&self) -> u32 {
        *self.session.get_or_init(rand::random::<u32>)
    }
}

/// Describe `UserRep`; `session` is left out of every field set and is
/// cleared by the reset hook instead
#[must_use]
pub fn user_descriptor() -> TypeDescriptor<UserRep> {
    TypeDescriptor::<UserRep>::builder("UserRep")
        .init_field("name", None, |u| &u.name, |u| &mut u.name)
        .init_field("email", None, |u| &u.email, |u| &mut u.email)
        .init_field("active", Some(json!(true)), |u| &u.active, |u| &mut u.active)
        .memoized("random_number", UserRep::random_number, |u| &mut u.random_number)
        .memoized("session", UserRep::session, |u| &mut u.session)
        .on_reset(|u| u.session.clear())
        .field_set("default", field_set!["name", "email", "active", "random_number"])
        .field_set("contact", field_set!["name", "email"])
        .build()
}

/// Decode a JSON document produced by `to_json`
#[must_use]
pub fn parse(text: &str) -> Value {
    match serde_json::from_str(text) {
        Ok(value) => value,
        Err(err) => panic!("invalid JSON {text:?}: {err}"),
    }
}
