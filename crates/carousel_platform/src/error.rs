//! Platform error types

use carousel_core::UnknownAttribute;
use thiserror::Error;

/// Input binding errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// Bindings are already attached to a registry
    #[error("input bindings are already attached")]
    AlreadyAttached,

    /// Bindings are not attached to a registry
    #[error("input bindings are not attached")]
    NotAttached,

    /// Attribute name not recognized
    #[error(transparent)]
    Attribute(#[from] UnknownAttribute),
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
