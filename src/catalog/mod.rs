pub mod builtin;
pub mod registry;
pub mod types;

pub use builtin::*;
pub use registry::*;
pub use types::*;

use thiserror::Error;

/// Validation and load failures for catalog documents. All of these are
/// fatal: a catalog that fails to build is never served from.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog has no test definitions")]
    EmptyCatalog,

    #[error("Duplicate test id: {0}")]
    DuplicateTestId(String),

    #[error("Alias '{alias}' maps to both '{first}' and '{second}'")]
    DuplicateAlias {
        alias: String,
        first: String,
        second: String,
    },

    #[error("Unit spellings for test '{test_id}' collide on key '{unit_key}' with different conversions")]
    ConflictingConversion { test_id: String, unit_key: String },

    #[error("Conversion for unit '{unit}' on test '{test_id}' is not invertible")]
    NonInvertibleConversion { test_id: String, unit: String },

    #[error("Range rule references unknown test id: {0}")]
    UnknownTestId(String),

    #[error("Test '{0}' has no unconditional default range rule")]
    MissingDefaultRule(String),

    #[error("Catalog load failed ({0}): {1}")]
    Load(String, String),

    #[error("Catalog parse failed: {0}")]
    Parse(String),
}
