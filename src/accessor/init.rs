//! Initialization from an options map
//!
//! An [`InitializationSpec`] lists a type's initialization fields in
//! declaration order and copies matching options into them. Running it again
//! on an initialized instance behaves exactly like fresh construction: every
//! declared field is overwritten, absent options included.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::field::Field;
use crate::error::{RepError, Result};

/// Options used to initialize an instance, in insertion order
pub type Options = serde_json::Map<String, Value>;

/// Writes an option (and the declared default) into an instance's field slot
pub type Assign<T> =
    Arc<dyn Fn(&mut T, Option<&Value>, Option<&Value>) -> serde_json::Result<()> + Send + Sync>;

/// Hook run on the options before they are copied
pub type BeforeInitialize = Arc<dyn Fn(&mut Options) + Send + Sync>;

/// Hook run on the instance after the copy
pub type AfterInitialize<T> = Arc<dyn Fn(&mut T, &Options) + Send + Sync>;

/// One declared initialization field
pub struct InitField<T> {
    name: String,
    default: Option<Value>,
    assign: Assign<T>,
}

impl<T> InitField<T> {
    /// Declare a field stored in a [`Field`] slot of `T`
    pub fn new<V>(
        name: impl Into<String>,
        default: Option<Value>,
        slot: fn(&mut T) -> &mut Field<V>,
    ) -> Self
    where
        T: 'static,
        V: DeserializeOwned + 'static,
    {
        Self {
            name: name.into(),
            default,
            assign: Arc::new(
                move |instance: &mut T, option: Option<&Value>, default: Option<&Value>| {
                    slot(instance).assign(option, default)
                },
            ),
        }
    }

    /// Field name, which is also the option key
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared default, if any
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }
}

impl<T> Clone for InitField<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            default: self.default.clone(),
            assign: Arc::clone(&self.assign),
        }
    }
}

impl<T> fmt::Debug for InitField<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InitField")
            .field("name", &self.name)
            .field("default", &self.default)
            .finish()
    }
}

/// Ordered initialization fields of a type plus optional hooks
pub struct InitializationSpec<T> {
    fields: Vec<InitField<T>>,
    before: Option<BeforeInitialize>,
    after: Option<AfterInitialize<T>>,
}

impl<T> Default for InitializationSpec<T> {
    fn default() -> Self {
        Self {
            fields: Vec::new(),
            before: None,
            after: None,
        }
    }
}

impl<T> Clone for InitializationSpec<T> {
    fn clone(&self) -> Self {
        Self {
            fields: self.fields.clone(),
            before: self.before.clone(),
            after: self.after.clone(),
        }
    }
}

impl<T> fmt::Debug for InitializationSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InitializationSpec")
            .field("fields", &self.fields)
            .field("before", &self.before.is_some())
            .field("after", &self.after.is_some())
            .finish()
    }
}

impl<T> InitializationSpec<T> {
    /// An empty spec
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field, replacing an earlier declaration with the same name
    pub fn push(&mut self, field: InitField<T>) {
        match self.fields.iter_mut().find(|existing| existing.name == field.name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
    }

    /// Set the hook that sees (and may rewrite) the options before the copy
    pub fn set_before(&mut self, hook: BeforeInitialize) {
        self.before = Some(hook);
    }

    /// Set the hook run on the instance after the copy
    pub fn set_after(&mut self, hook: AfterInitialize<T>) {
        self.after = Some(hook);
    }

    /// Declared fields in order
    pub fn fields(&self) -> &[InitField<T>] {
        &self.fields
    }

    /// Declared field names in order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(InitField::name)
    }

    /// Copy `options` into every declared field of `instance`
    ///
    /// # Arguments
    /// * `type_name` - Name used in error messages
    /// * `instance` - Instance to (re)initialize
    /// * `options` - Options map, handed to the hooks
    pub fn initialize(&self, type_name: &str, instance: &mut T, mut options: Options) -> Result<()> {
        if let Some(before) = &self.before {
            before(&mut options);
        }

        for field in &self.fields {
            (field.assign)(instance, options.get(&field.name), field.default.as_ref()).map_err(
                |source| RepError::InvalidOption {
                    type_name: type_name.to_string(),
                    field: field.name.clone(),
                    source,
                },
            )?;
        }

        if let Some(after) = &self.after {
            after(instance, &options);
        }

        Ok(())
    }

    /// Build options by zipping positional arguments with the field order
    ///
    /// Extra arguments and extra fields are both dropped.
    pub fn options_from_args<I>(&self, args: I) -> Options
    where
        I: IntoIterator<Item = Value>,
    {
        self.fields
            .iter()
            .zip(args)
            .map(|(field, value)| (field.name.clone(), value))
            .collect()
    }
}
