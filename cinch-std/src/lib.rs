//! # cinch-std
//!
//! Standard implementations for the Cinch interceptor pipeline.
//!
//! This crate provides:
//! - **Named chains**: [`HookRegistry`](registry::HookRegistry), with the
//!   `around_X` ↔ `before_X`/`after_X` naming convention and copy-on-derive
//! - **Standard entries**: logging, retry, timing, conditional, validation
//! - **Testing utilities**: recording, counting and failing entries

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use cinch_core;

// Modules
pub mod hooks;
pub mod registry;
pub mod testing;
