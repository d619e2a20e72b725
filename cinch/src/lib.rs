//! # cinch - Composable Interceptor Pipelines
//!
//! `cinch` wraps a unit of work (submitting a job, executing it, pushing a
//! batch) in ordered, named entries that add cross-cutting behavior such as
//! logging, retries, instrumentation or validation. The work itself does not
//! know about them.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cinch::prelude::*;
//!
//! let mut hooks = HookRegistry::<Job>::new();
//! hooks
//!     .define_around("around_enqueue")?
//!     .add(RetryAround::new(3), Some("retry"));
//! hooks
//!     .chain_mut("before_enqueue")
//!     .unwrap()
//!     .add(|job: &Job| !job.queue.is_empty(), Some("has_queue"));
//!
//! // One job
//! let id = hooks.invoke_around("around_enqueue", &job, || queue.push(&job))?;
//!
//! // Many jobs, one push for everything that passed `before_enqueue`
//! let ids = hooks.invoke_around_bulk("around_enqueue", &jobs, |jobs| queue.push_many(jobs))?;
//! ```
//!
//! The engine is synchronous and never catches errors: whatever an entry or
//! final action returns reaches the caller unchanged.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use cinch_core::{
    // Chains
    AroundChain,
    // Entries
    AroundHook,
    // Error types
    BoxError,
    Chain,
    // Configuration
    ChainConfig,
    CinchError,
    Entries,
    Entry,
    FnAround,
    Hook,
    HookError,
    HookResult,
    IntoHookResult,
    // Message
    Message,
    Proceed,
    RegistryError,
    around_fn,
};

pub use cinch_std::registry::HookRegistry;

/// Standard entry implementations.
pub mod hooks {
    pub use cinch_std::hooks::{
        conditional::{ConditionalAround, ConditionalHook, ValidateHook},
        logging::{LoggingAround, LoggingHook},
        retry::RetryAround,
        timing::TimingAround,
    };
}

/// Testing utilities.
pub mod testing {
    pub use cinch_std::testing::{
        CountingHook, EventLog, FailingHook, RecordingAround, RecordingHook,
    };
}

/// Prelude module - common imports for Cinch.
///
/// # Usage
///
/// ```rust,ignore
/// use cinch::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        AroundChain, AroundHook, BoxError, Chain, ChainConfig, CinchError, Hook, HookRegistry,
        HookResult, Message, Proceed, around_fn,
        hooks::{
            ConditionalAround, ConditionalHook, LoggingAround, LoggingHook, RetryAround,
            TimingAround, ValidateHook,
        },
    };
}
