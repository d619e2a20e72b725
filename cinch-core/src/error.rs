//! Error types for Cinch.
//!
//! The engine itself never wraps entry failures: whatever an entry, a
//! `before`/`after` chain or a final action returns as [`BoxError`] reaches
//! the caller unchanged. The typed errors below are produced by the standard
//! entries and the registry:
//!
//! - [`CinchError`] - Top-level error type
//! - [`HookError`] - Errors from standard entries
//! - [`RegistryError`] - Errors from named chain definition and lookup

use std::time::Duration;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all Cinch operations.
#[derive(Error, Debug)]
pub enum CinchError {
    /// An error occurred in an entry.
    #[error("hook error: {0}")]
    Hook(#[from] HookError),

    /// An error occurred in the registry.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// A custom error occurred.
    #[error(transparent)]
    Custom(BoxError),
}

/// Errors produced by standard entries.
#[derive(Error, Debug)]
pub enum HookError {
    /// The wrapped call ran longer than its allowed budget.
    #[error("wrapped call exceeded its deadline of {0:?}")]
    Timeout(Duration),

    /// A custom hook error.
    #[error(transparent)]
    Custom(BoxError),
}

/// Errors that can occur when defining or looking up named chains.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No chain is registered under the given name.
    #[error("no hook chain named `{0}`")]
    NotFound(String),

    /// A chain with the given name already exists.
    #[error("hook chain `{0}` is already defined")]
    AlreadyDefined(String),

    /// Around hooks must be named `around_<name>`.
    #[error("around hook `{0}` must be named `around_<name>`")]
    InvalidAroundName(String),
}

// Convenience conversions
impl From<BoxError> for CinchError {
    fn from(err: BoxError) -> Self {
        CinchError::Custom(err)
    }
}

impl From<BoxError> for HookError {
    fn from(err: BoxError) -> Self {
        HookError::Custom(err)
    }
}
