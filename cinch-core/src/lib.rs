//! # cinch-core
//!
//! Core dispatch engine for the Cinch interceptor pipeline.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! libraries that only need to build and invoke chains, without the standard
//! entries and registry that live in `cinch-std`.
//!
//! # Three-Part Engine
//!
//! ## Entries ([`Hook`], [`AroundHook`], [`Entry`])
//!
//! An entry is one identified unit of behavior. It comes in two call shapes:
//!
//! - **Terminal-style** ([`Hook`]): receives the call arguments and answers
//!   [`HookResult::Next`] or [`HookResult::Halt`].
//! - **Wrapping-style** ([`AroundHook`]): receives the call arguments and a
//!   [`Proceed`] continuation. It decides whether, when and how many times the
//!   rest of the pipeline runs.
//!
//! ## Linear chains ([`Chain`])
//!
//! Ordered terminal-style entries, invoked one after another. A `Halt` stops
//! the chain when [`ChainConfig::halt_on_false`] is set.
//!
//! ## Around chains ([`AroundChain`])
//!
//! Ordered wrapping-style entries that nest around a caller-supplied final
//! action, with optional `before` and `after` linear chains. The batched
//! [`AroundChain::invoke_bulk`] runs every item through its own pass and
//! calls the final action once with the surviving items.
//!
//! # Error Types
//!
//! - [`BoxError`] - What entries and final actions return on failure
//! - [`HookError`] - Errors produced by standard entries
//! - [`RegistryError`] - Named chain lookup and definition errors
//! - [`CinchError`] - Top-level error type

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

#[macro_use]
mod macros;

mod around;
mod chain;
mod config;
mod entry;
mod error;
mod hook;
mod message;
mod response;

// Re-exports
pub use around::AroundChain;
pub use chain::Chain;
pub use config::ChainConfig;
pub use entry::{Entries, Entry};
pub use error::{BoxError, CinchError, HookError, RegistryError};
pub use hook::{AroundHook, FnAround, Hook, HookResult, Proceed, around_fn};
pub use message::Message;
pub use response::IntoHookResult;
