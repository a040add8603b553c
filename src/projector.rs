//! Projection of instances through their field sets
//!
//! Field sets are resolved against the accessor table once, when a
//! descriptor is built. Projecting then walks the resolved fields in
//! declaration order, invoking each accessor and writing its value under the
//! field's output key. A field whose accessor could not be resolved fails the
//! projection with [`RepError::MissingAccessor`]; nothing partial is returned.

use rustc_hash::FxHashMap;
use serde_json::Value;

use crate::accessor::AccessorTable;
use crate::error::{RepError, Result};
use crate::schema::FieldRegistry;
use crate::utils::logging::{log_projection_failure, log_unresolved_accessor};

/// Ordered output of a projection, keys in field-set declaration order
pub type Projection = serde_json::Map<String, Value>;

/// A field spec bound to its accessor's position in the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedField {
    /// Key written to the projection
    pub output_key: String,
    /// Accessor the field set names
    pub accessor_name: String,
    /// Position in the accessor table, `None` if the accessor does not exist
    pub position: Option<usize>,
}

/// A field set bound to an accessor table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSet {
    /// Field set name
    pub name: String,
    /// Fields in declaration order
    pub fields: Vec<ResolvedField>,
}

impl ResolvedSet {
    /// First field whose accessor is missing
    #[must_use]
    pub fn first_unresolved(&self) -> Option<&ResolvedField> {
        self.fields.iter().find(|field| field.position.is_none())
    }
}

/// Resolve every field set of `registry` against `accessors`
///
/// Unresolved accessors are kept (and optionally logged) rather than
/// rejected: they only fail when their set is projected.
pub fn resolve<T>(
    type_name: &str,
    registry: &FieldRegistry,
    accessors: &AccessorTable<T>,
    warn_unresolved: bool,
) -> FxHashMap<String, ResolvedSet> {
    registry
        .sets()
        .map(|set| {
            let fields = set
                .specs
                .iter()
                .map(|spec| {
                    let position = accessors.position(&spec.accessor_name);
                    if position.is_none() && warn_unresolved {
                        log_unresolved_accessor(
                            type_name,
                            &set.name,
                            &spec.output_key,
                            &spec.accessor_name,
                        );
                    }
                    ResolvedField {
                        output_key: spec.output_key.clone(),
                        accessor_name: spec.accessor_name.clone(),
                        position,
                    }
                })
                .collect();

            (
                set.name.clone(),
                ResolvedSet {
                    name: set.name.clone(),
                    fields,
                },
            )
        })
        .collect()
}

/// Build the projection of `instance` for a resolved field set
///
/// # Arguments
/// * `type_name` - Name of the projected type, for error context
/// * `set` - The resolved field set, `None` when no set has the requested name
/// * `set_name` - The requested field set name
/// * `accessors` - Accessor table the set was resolved against
/// * `instance` - Instance to read
pub fn project<T>(
    type_name: &str,
    set: Option<&ResolvedSet>,
    set_name: &str,
    accessors: &AccessorTable<T>,
    instance: &T,
) -> Result<Projection> {
    let result = project_fields(type_name, set, set_name, accessors, instance);
    if let Err(err) = &result {
        log_projection_failure(type_name, set_name, err);
    }
    result
}

fn project_fields<T>(
    type_name: &str,
    set: Option<&ResolvedSet>,
    set_name: &str,
    accessors: &AccessorTable<T>,
    instance: &T,
) -> Result<Projection> {
    let set = set.ok_or_else(|| RepError::no_such_field_set(type_name, set_name))?;

    let mut projection = Projection::with_capacity(set.fields.len());
    for field in &set.fields {
        let accessor = field
            .position
            .and_then(|position| accessors.at(position))
            .ok_or_else(|| {
                RepError::missing_accessor(
                    type_name,
                    set_name,
                    &field.output_key,
                    &field.accessor_name,
                )
            })?;

        let value = accessor
            .read(instance)
            .map_err(|source| RepError::AccessorEncoding {
                type_name: type_name.to_string(),
                set: set_name.to_string(),
                output_key: field.output_key.clone(),
                accessor: field.accessor_name.clone(),
                source,
            })?;

        projection.insert(field.output_key.clone(), value);
    }

    Ok(projection)
}
