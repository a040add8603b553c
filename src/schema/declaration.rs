//! Dynamic field-set declarations
//!
//! Field sets can be declared from JSON, e.g. from a configuration file:
//!
//! ```json
//! { "default": ["name", { "years": "age" }], "summary": "name" }
//! ```
//!
//! A bare string queries one set, `null` queries all of them. Anything else
//! is rejected with [`RepError::InvalidFieldSetArgument`].

use serde_json::Value;

use super::field_set::{FieldSet, FieldSpec};
use super::registry::FieldRegistry;
use crate::error::{RepError, Result};

/// Outcome of applying a declaration to a registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldsQuery<'a> {
    /// Sets defined by the declaration, by name
    Defined(Vec<String>),
    /// A single queried set, `None` if it was never registered
    Set(Option<&'a FieldSet>),
    /// Every registered set
    All(Vec<&'a FieldSet>),
}

/// Parse a declaration object into field sets without registering them
pub fn parse_field_sets(declaration: &Value) -> Result<Vec<FieldSet>> {
    let Value::Object(entries) = declaration else {
        return Err(RepError::invalid_argument(format!(
            "expected an object of field set names to fields, got {}",
            kind(declaration)
        )));
    };

    entries
        .iter()
        .map(|(name, fields)| parse_specs(name, fields).map(|specs| FieldSet { name: name.clone(), specs }))
        .collect()
}

/// Parse the fields of one set: a single spec or an array of specs
fn parse_specs(set: &str, fields: &Value) -> Result<Vec<FieldSpec>> {
    match fields {
        Value::Array(items) => items.iter().map(|item| parse_spec(set, item)).collect(),
        single => Ok(vec![parse_spec(set, single)?]),
    }
}

/// Parse a single spec: `"key"` or `{ "key": "accessor" }`
fn parse_spec(set: &str, item: &Value) -> Result<FieldSpec> {
    match item {
        Value::String(name) if !name.is_empty() => Ok(FieldSpec::new(name.as_str())),
        Value::Object(alias) if alias.len() == 1 => {
            let (key, accessor) = alias.iter().next().ok_or_else(|| {
                RepError::invalid_argument(format!("empty alias in field set '{set}'"))
            })?;
            match accessor {
                Value::String(accessor) if !accessor.is_empty() => {
                    Ok(FieldSpec::aliased(key.as_str(), accessor.as_str()))
                }
                other => Err(RepError::invalid_argument(format!(
                    "alias '{key}' in field set '{set}' must name an accessor, got {}",
                    kind(other)
                ))),
            }
        }
        other => Err(RepError::invalid_argument(format!(
            "field in set '{set}' must be a name or a single-entry alias object, got {}",
            kind(other)
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl FieldRegistry {
    /// Apply a dynamic declaration
    ///
    /// * object: defines every set it names (replacing existing ones)
    /// * string: returns the set of that name
    /// * null: returns all sets
    pub fn declare(&mut self, declaration: &Value) -> Result<FieldsQuery<'_>> {
        match declaration {
            Value::Object(_) => {
                let sets = parse_field_sets(declaration)?;
                let names = sets.iter().map(|set| set.name.clone()).collect();
                for set in sets {
                    self.insert(set);
                }
                Ok(FieldsQuery::Defined(names))
            }
            Value::String(name) => Ok(FieldsQuery::Set(self.get(name))),
            Value::Null => Ok(FieldsQuery::All(self.sets().collect())),
            other => Err(RepError::invalid_argument(format!(
                "cannot declare fields from {}",
                kind(other)
            ))),
        }
    }
}
