//! Library error type.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// a job document must be a JSON object (field name → value)
    #[error("expected a JSON object for the field model, found {found}")]
    NotAnObject { found: &'static str },

    /// the live value of an included field is no longer a primitive scalar
    #[error("field `{field}` was classified as primitive but its live value is {found}")]
    NonPrimitiveValue { field: String, found: &'static str },

    /// only raised when identifier validation is switched on
    #[error("invalid {role} identifier `{name}`: {reason}")]
    InvalidIdentifier {
        role: &'static str,
        name: String,
        reason: &'static str,
    },

    /// two fields (or a field and a fixed method) would render the same accessor
    #[error("field `{field}` renders accessor `{accessor}`, which {clashes_with} already defines")]
    AccessorCollision {
        field: String,
        accessor: String,
        clashes_with: String,
    },

    #[error("invalid generator config at JSON path {path}: {message}")]
    Config { path: String, message: String },
}
