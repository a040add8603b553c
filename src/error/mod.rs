//! Error handling for field-set projection.
//!
//! Every failure here is a configuration or programming error, reported
//! synchronously with enough context to locate the broken declaration.

/// Errors raised while declaring, initializing or projecting a type
#[derive(Debug, thiserror::Error)]
pub enum RepError {
    /// The requested field set was never registered for the type
    #[error("There are no fields under the name '{set}' for the type '{type_name}'")]
    NoSuchFieldSet {
        /// Name of the projected type
        type_name: String,
        /// Requested field set name
        set: String,
    },

    /// A declared field names an accessor the type does not provide
    #[error(
        "There is no accessor named '{accessor}' for the type '{type_name}' for the '{set}' list of fields (output key '{output_key}')"
    )]
    MissingAccessor {
        /// Name of the projected type
        type_name: String,
        /// Field set being projected
        set: String,
        /// Key the value would have been written under
        output_key: String,
        /// Accessor the field set expected
        accessor: String,
    },

    /// Malformed input to a field-set declaration
    #[error(
        "Invalid field set argument: {0}. Use an object to set fields, a string to retrieve them, or null to retrieve all fields for all names"
    )]
    InvalidFieldSetArgument(String),

    /// An option value could not be decoded into the field it initializes
    #[error("Invalid value for option '{field}' on '{type_name}': {source}")]
    InvalidOption {
        /// Name of the initialized type
        type_name: String,
        /// Initialization field name
        field: String,
        /// Decoder failure
        #[source]
        source: serde_json::Error,
    },

    /// An accessor returned a value that has no JSON representation
    #[error(
        "Accessor '{accessor}' on '{type_name}' returned a value that could not be encoded for key '{output_key}' in the '{set}' list of fields: {source}"
    )]
    AccessorEncoding {
        /// Name of the projected type
        type_name: String,
        /// Field set being projected
        set: String,
        /// Output key of the failing field
        output_key: String,
        /// Accessor that produced the value
        accessor: String,
        /// Encoder failure
        #[source]
        source: serde_json::Error,
    },

    /// Encoding a finished projection to text failed
    #[error("Encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    /// A configuration document could not be read
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RepError {
    /// Build a `MissingAccessor` error
    pub fn missing_accessor(
        type_name: impl Into<String>,
        set: impl Into<String>,
        output_key: impl Into<String>,
        accessor: impl Into<String>,
    ) -> Self {
        Self::MissingAccessor {
            type_name: type_name.into(),
            set: set.into(),
            output_key: output_key.into(),
            accessor: accessor.into(),
        }
    }

    /// Build a `NoSuchFieldSet` error
    pub fn no_such_field_set(type_name: impl Into<String>, set: impl Into<String>) -> Self {
        Self::NoSuchFieldSet {
            type_name: type_name.into(),
            set: set.into(),
        }
    }

    /// Build an `InvalidFieldSetArgument` error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidFieldSetArgument(message.into())
    }
}

/// Result type for projection operations
pub type Result<T> = std::result::Result<T, RepError>;
