//! Type descriptors
//!
//! A [`TypeDescriptor`] is everything the library knows about one projected
//! type: its field sets, its accessor table and its initialization fields.
//! It is assembled once through a [`DescriptorBuilder`] during the type's
//! registration phase and is read-only afterwards, so it can be shared freely
//! between threads.
//!
//! # Example
//!
//! ```rust
//! use rep::{Field, TypeDescriptor, field_set};
//! use rep::serde_json::json;
//!
//! #[derive(Default)]
//! struct Point {
//!     x: Field<i64>,
//!     y: Field<i64>,
//! }
//!
//! impl Point {
//!     fn sum(&self) -> i64 {
//!         self.x.get().copied().unwrap_or(0) + self.y.get().copied().unwrap_or(0)
//!     }
//! }
//!
//! let descriptor = TypeDescriptor::<Point>::builder("Point")
//!     .init_field("x", None, |p| &p.x, |p| &mut p.x)
//!     .init_field("y", None, |p| &p.y, |p| &mut p.y)
//!     .accessor("sum", Point::sum)
//!     .field_set("default", field_set!["x", "y", "sum"])
//!     .build();
//!
//! let point = descriptor.construct_from(json!({ "x": 2, "y": 3 })).unwrap();
//! let projection = descriptor.project(&point, "default").unwrap();
//! assert_eq!(rep::serde_json::Value::Object(projection), json!({ "x": 2, "y": 3, "sum": 5 }));
//! ```

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::accessor::{
    Accessor, AccessorTable, Field, InitField, InitializationSpec, Memo, Options,
};
use crate::config::RepConfig;
use crate::error::{RepError, Result};
use crate::projector::{self, Projection, ResolvedSet};
use crate::schema::{DEFAULT_FIELD_SET, FieldRegistry, FieldSpec, FieldsQuery, parse_field_sets};
use crate::utils::logging::log_descriptor_built;

/// Hook a type runs to clear its own memoized state before the base reset
pub type ResetHook<T> = Arc<dyn Fn(&mut T) + Send + Sync>;

/// Field sets, accessors and initialization fields of one type
pub struct TypeDescriptor<T> {
    type_name: String,
    default_set: String,
    registry: FieldRegistry,
    accessors: AccessorTable<T>,
    init: InitializationSpec<T>,
    reset_hook: Option<ResetHook<T>>,
    resolved: FxHashMap<String, ResolvedSet>,
}

impl<T> fmt::Debug for TypeDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("type_name", &self.type_name)
            .field("default_set", &self.default_set)
            .field("registry", &self.registry)
            .field("accessors", &self.accessors)
            .field("init", &self.init)
            .field("reset_hook", &self.reset_hook.is_some())
            .finish()
    }
}

impl<T: 'static> TypeDescriptor<T> {
    /// Start describing a type
    pub fn builder(type_name: impl Into<String>) -> DescriptorBuilder<T> {
        DescriptorBuilder::new(type_name)
    }
}

impl<T> TypeDescriptor<T> {
    /// Name used in logs and error messages
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Field set used by [`project_default`](Self::project_default)
    pub fn default_set(&self) -> &str {
        &self.default_set
    }

    /// The type's field sets
    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    /// The type's accessors
    pub fn accessors(&self) -> &AccessorTable<T> {
        &self.accessors
    }

    /// The type's initialization fields
    pub fn initialization(&self) -> &InitializationSpec<T> {
        &self.init
    }

    /// Project `instance` through the field set `set`
    pub fn project(&self, instance: &T, set: &str) -> Result<Projection> {
        projector::project(
            &self.type_name,
            self.resolved.get(set),
            set,
            &self.accessors,
            instance,
        )
    }

    /// Project `instance` through the default field set
    pub fn project_default(&self, instance: &T) -> Result<Projection> {
        self.project(instance, &self.default_set)
    }

    /// Project through the default field set and encode the result as JSON
    pub fn to_json(&self, instance: &T) -> Result<String> {
        self.to_json_set(instance, &self.default_set)
    }

    /// Project through `set` and encode the result as JSON
    pub fn to_json_set(&self, instance: &T, set: &str) -> Result<String> {
        let projection = self.project(instance, set)?;
        Ok(serde_json::to_string(&projection)?)
    }

    /// Check every field set eagerly, failing on the first missing accessor
    pub fn validate(&self) -> Result<()> {
        for set in self.registry.sets() {
            let Some(field) = self
                .resolved
                .get(&set.name)
                .and_then(ResolvedSet::first_unresolved)
            else {
                continue;
            };
            return Err(RepError::missing_accessor(
                &self.type_name,
                &set.name,
                &field.output_key,
                &field.accessor_name,
            ));
        }
        Ok(())
    }

    /// Copy `options` into the instance's initialization fields
    pub fn initialize(&self, instance: &mut T, options: Options) -> Result<()> {
        self.init.initialize(&self.type_name, instance, options)
    }

    /// Return the instance to its factory state
    ///
    /// Runs the type's reset hook first, then clears the cached state behind
    /// every accessor any field set names.
    pub fn reset(&self, instance: &mut T) {
        if let Some(hook) = &self.reset_hook {
            hook(instance);
        }
        for name in self.registry.all_accessor_names() {
            self.accessors.clear(instance, name);
        }
    }

    /// Zip positional arguments with the initialization field order
    pub fn options_from_args<I>(&self, args: I) -> Options
    where
        I: IntoIterator<Item = Value>,
    {
        self.init.options_from_args(args)
    }
}

impl<T: Default> TypeDescriptor<T> {
    /// Create a fresh instance initialized from `options`
    pub fn construct(&self, options: Options) -> Result<T> {
        let mut instance = T::default();
        self.initialize(&mut instance, options)?;
        Ok(instance)
    }

    /// Create a fresh instance from a JSON object of options
    ///
    /// `null` stands for no options; any other non-object is rejected.
    pub fn construct_from(&self, options: Value) -> Result<T> {
        self.construct(options_from_value(options)?)
    }
}

/// Turn a JSON value into an options map
pub fn options_from_value(options: Value) -> Result<Options> {
    match options {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Options::new()),
        other => Err(RepError::Config(format!(
            "options must be a JSON object, got {other}"
        ))),
    }
}

/// Builder for a [`TypeDescriptor`]
pub struct DescriptorBuilder<T> {
    type_name: String,
    default_set: String,
    warn_unresolved: bool,
    registry: FieldRegistry,
    accessors: AccessorTable<T>,
    init: InitializationSpec<T>,
    reset_hook: Option<ResetHook<T>>,
}

impl<T: 'static> DescriptorBuilder<T> {
    /// Start an empty description of `type_name`
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            default_set: DEFAULT_FIELD_SET.to_string(),
            warn_unresolved: true,
            registry: FieldRegistry::new(),
            accessors: AccessorTable::new(),
            init: InitializationSpec::new(),
            reset_hook: None,
        }
    }

    /// Name of the type being described
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Define (or replace) a field set
    #[must_use]
    pub fn field_set<I, S>(mut self, name: impl Into<String>, specs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<FieldSpec>,
    {
        self.registry.define(name, specs);
        self
    }

    /// Apply a JSON field-set declaration, see [`FieldRegistry::declare`]
    ///
    /// Only definitions make sense here; a query declaration is rejected.
    pub fn declare(mut self, declaration: &Value) -> Result<Self> {
        match self.registry.declare(declaration)? {
            FieldsQuery::Defined(_) => Ok(self),
            FieldsQuery::Set(_) | FieldsQuery::All(_) => Err(RepError::invalid_argument(
                "a field set query cannot be used to describe a type",
            )),
        }
    }

    /// Apply the settings and field-set overrides `config` has for this type
    pub fn with_config(mut self, config: &RepConfig) -> Result<Self> {
        self.default_set = config.default_field_set.clone();
        self.warn_unresolved = config.warn_unresolved_accessors;
        if let Some(declaration) = config.field_sets.get(&self.type_name) {
            for set in parse_field_sets(declaration)? {
                self.registry.insert(set);
            }
        }
        Ok(self)
    }

    /// Declare an initialization field backed by a [`Field`] slot
    ///
    /// The field is also registered as an accessor of the same name, which a
    /// reset clears.
    #[must_use]
    pub fn init_field<V>(
        mut self,
        name: impl Into<String>,
        default: Option<Value>,
        slot: fn(&T) -> &Field<V>,
        slot_mut: fn(&mut T) -> &mut Field<V>,
    ) -> Self
    where
        V: Serialize + DeserializeOwned + 'static,
    {
        let name = name.into();
        self.init.push(InitField::new(name.clone(), default, slot_mut));
        self.accessors.insert(
            Accessor::from_getter(name, Arc::new(move |instance: &T| slot(instance).to_value()))
                .with_clearer(Arc::new(move |instance: &mut T| slot_mut(instance).clear())),
        );
        self
    }

    /// Register a zero-argument accessor
    #[must_use]
    pub fn accessor<F, R>(mut self, name: impl Into<String>, getter: F) -> Self
    where
        F: Fn(&T) -> R + Send + Sync + 'static,
        R: Serialize,
    {
        self.accessors.insert(Accessor::new(name, getter));
        self
    }

    /// Register an accessor whose result is cached in a [`Memo`]
    ///
    /// A reset clears the cell when a field set names the accessor; a memo
    /// no field set names has to be cleared from [`on_reset`](Self::on_reset).
    #[must_use]
    pub fn memoized<F, R, V>(
        mut self,
        name: impl Into<String>,
        getter: F,
        cell: fn(&mut T) -> &mut Memo<V>,
    ) -> Self
    where
        F: Fn(&T) -> R + Send + Sync + 'static,
        R: Serialize,
        V: 'static,
    {
        self.accessors.insert(
            Accessor::new(name, getter)
                .with_clearer(Arc::new(move |instance: &mut T| cell(instance).clear())),
        );
        self
    }

    /// Hook run on the options before they are copied into the fields
    #[must_use]
    pub fn before_initialize<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut Options) + Send + Sync + 'static,
    {
        self.init.set_before(Arc::new(hook));
        self
    }

    /// Hook run on the instance after the options were copied
    #[must_use]
    pub fn after_initialize<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut T, &Options) + Send + Sync + 'static,
    {
        self.init.set_after(Arc::new(hook));
        self
    }

    /// Hook clearing memoized state of the type before the base reset runs
    #[must_use]
    pub fn on_reset<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut T) + Send + Sync + 'static,
    {
        self.reset_hook = Some(Arc::new(hook));
        self
    }

    /// Resolve the field sets and freeze the descriptor
    pub fn build(self) -> TypeDescriptor<T> {
        let resolved = projector::resolve(
            &self.type_name,
            &self.registry,
            &self.accessors,
            self.warn_unresolved,
        );
        log_descriptor_built(&self.type_name, self.registry.len(), self.accessors.len());

        TypeDescriptor {
            type_name: self.type_name,
            default_set: self.default_set,
            registry: self.registry,
            accessors: self.accessors,
            init: self.init,
            reset_hook: self.reset_hook,
            resolved,
        }
    }
}
