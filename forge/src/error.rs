use thiserror::Error;

/// Result type for the `export_forge` library
pub type Result<T> = std::result::Result<T, Error>;

/// Registration errors
///
/// These are the only failures the registry raises. Lookups of unknown names
/// and rejected writes are reported as `Variant::Nil` / `false` instead, since
/// hosts probe names speculatively.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A property with this name is already registered on the owner
    #[error("Property with name '{name}' already exists")]
    DuplicateName {
        /// The rejected property name
        name: String,
    },

    /// The requested value type has no entry in the value-kind table
    #[error("Unsupported variant value type: {type_name}")]
    UnsupportedValueKind {
        /// Rust type name of the rejected value type
        type_name: String,
    },
}

impl Error {
    /// Create a duplicate-name error
    pub fn duplicate_name(name: impl Into<String>) -> Self { Self::DuplicateName { name: name.into() } }

    /// Create an unsupported-value-kind error for `T`
    pub fn unsupported<T: ?Sized>() -> Self {
        Self::UnsupportedValueKind {
            type_name: std::any::type_name::<T>().to_string(),
        }
    }
}
