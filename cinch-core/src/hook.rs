//! # Entry Behavior
//!
//! The two call shapes an entry can take.
//!
//! - [`Hook`] is **terminal-style**: it sees the call arguments and answers
//!   whether the chain should go on ([`HookResult::Next`]) or stop
//!   ([`HookResult::Halt`]). Failures are returned as errors, so a `Hook`
//!   outcome is one of three states: continue, halt, or error.
//! - [`AroundHook`] is **wrapping-style**: it sees the call arguments and a
//!   [`Proceed`] continuation. Code before `proceed()` runs on the way in,
//!   code after it runs on the way out, and not calling it at all
//!   short-circuits everything further down the pipeline.
//!
//! # Use Cases
//!
//! - Validation and admission checks (terminal-style, returning `Halt`)
//! - Logging, timing, instrumentation (wrapping-style)
//! - Retries (wrapping-style, calling `proceed()` more than once)

use crate::{error::BoxError, message::Message, response::IntoHookResult};
use std::fmt;

/// Result of a terminal-style entry indicating whether to continue or halt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookResult {
    /// Continue with the next entry.
    Next,
    /// Stop the chain for this call.
    Halt,
}

impl HookResult {
    /// Returns `true` for [`HookResult::Halt`].
    pub fn is_halt(self) -> bool {
        matches!(self, HookResult::Halt)
    }
}

/// A terminal-style entry.
///
/// Closures of the form `Fn(&A) -> R` where `R: IntoHookResult` implement
/// this trait, so `|job: &Job| job.attempts < 5` is a valid hook that halts
/// the chain once a job has been tried five times.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Hook<{A}>`",
    label = "missing `Hook` implementation",
    note = "Hooks must implement `run` for the argument type `{A}`, or be a closure `Fn(&{A}) -> R`."
)]
pub trait Hook<A: Message>: Send + Sync + 'static {
    /// Called with the arguments of the current invocation.
    fn run(&self, args: &A) -> Result<HookResult, BoxError>;
}

// Blanket impl for closures
impl<A, F, R> Hook<A> for F
where
    A: Message,
    F: Fn(&A) -> R + Send + Sync + 'static,
    R: IntoHookResult,
{
    fn run(&self, args: &A) -> Result<HookResult, BoxError> {
        (self)(args).into_hook_result()
    }
}

/// The continuation handed to an [`AroundHook`].
///
/// Calling [`Proceed::proceed`] runs the rest of the pipeline: the next
/// wrapping entry, or the final action once every entry has deferred to it.
/// It can be called any number of times; each call runs the remainder again.
#[derive(Clone, Copy)]
pub struct Proceed<'a> {
    next: &'a dyn Fn() -> Result<(), BoxError>,
}

impl<'a> Proceed<'a> {
    pub(crate) fn new(next: &'a dyn Fn() -> Result<(), BoxError>) -> Self {
        Self { next }
    }

    /// Run the remainder of the pipeline.
    pub fn proceed(&self) -> Result<(), BoxError> {
        (self.next)()
    }
}

impl fmt::Debug for Proceed<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Proceed").finish_non_exhaustive()
    }
}

/// A wrapping-style entry.
///
/// # Example
///
/// ```rust,ignore
/// struct Audit;
///
/// impl AroundHook<Job> for Audit {
///     fn around(&self, job: &Job, proceed: Proceed<'_>) -> Result<(), BoxError> {
///         audit_log::start(job);
///         proceed.proceed()?;
///         audit_log::finish(job);
///         Ok(())
///     }
/// }
/// ```
///
/// For closures, use [`around_fn`].
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `AroundHook<{A}>`",
    label = "missing `AroundHook` implementation",
    note = "Closures must be wrapped with `around_fn` to be used as around hooks."
)]
pub trait AroundHook<A: Message>: Send + Sync + 'static {
    /// Called with the arguments of the current invocation and the
    /// continuation for the rest of the pipeline.
    fn around(&self, args: &A, proceed: Proceed<'_>) -> Result<(), BoxError>;
}

/// An [`AroundHook`] built from a closure. Created by [`around_fn`].
#[derive(Clone, Copy)]
pub struct FnAround<F> {
    f: F,
}

impl<F> fmt::Debug for FnAround<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnAround").finish_non_exhaustive()
    }
}

/// Wrap a closure as an [`AroundHook`].
///
/// ```rust,ignore
/// chain.add(
///     around_fn(|job: &Job, proceed| {
///         let started = Instant::now();
///         proceed.proceed()?;
///         metrics::record(job, started.elapsed());
///         Ok(())
///     }),
///     Some("timing"),
/// );
/// ```
pub fn around_fn<A, F>(f: F) -> FnAround<F>
where
    A: Message,
    F: Fn(&A, Proceed<'_>) -> Result<(), BoxError> + Send + Sync + 'static,
{
    FnAround { f }
}

impl<A, F> AroundHook<A> for FnAround<F>
where
    A: Message,
    F: Fn(&A, Proceed<'_>) -> Result<(), BoxError> + Send + Sync + 'static,
{
    fn around(&self, args: &A, proceed: Proceed<'_>) -> Result<(), BoxError> {
        (self.f)(args, proceed)
    }
}
