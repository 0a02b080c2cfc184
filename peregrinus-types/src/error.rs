//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeregrinusTypesError {
    /// Value conversion error.
    #[error("invalid input value: {0}")]
    Conversion(String),
}
