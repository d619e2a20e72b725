//! Standard entries.
//!
//! - [`logging`]: argument and call logging
//! - [`retry`]: re-running the rest of the pipeline on failure
//! - [`timing`]: elapsed-time checks around the wrapped call
//! - [`conditional`]: predicate-gated entries and validation

pub mod conditional;
pub mod logging;
pub mod retry;
pub mod timing;
