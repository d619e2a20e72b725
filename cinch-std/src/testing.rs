//! Testing utilities for Cinch.
//!
//! This module provides utilities to make testing chains and entries easier.
//!
//! # Features
//!
//! - [`EventLog`]: A shared, cloneable log of lines for asserting call order
//! - [`RecordingHook`]: A hook that records every argument it receives
//! - [`RecordingAround`]: A wrapping entry that logs around `proceed`
//! - [`CountingHook`]: Counts invocations, as a hook or a wrapping entry
//! - [`FailingHook`]: Always fails with a fixed message

use cinch_core::{AroundHook, BoxError, Hook, HookResult, Message, Proceed};
use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError,
    atomic::{AtomicUsize, Ordering},
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Event Log
// ============================================================================

/// A shared log of lines.
///
/// Clones share the same underlying log, so one clone can be moved into an
/// entry while the test keeps another for assertions.
///
/// # Example
///
/// ```rust,ignore
/// let log = EventLog::new();
/// chain.add(RecordingAround::new("X", log.clone()), Some("x"));
/// chain.invoke(&job, || { log.push("final"); Ok(()) })?;
/// assert_eq!(log.lines(), vec!["X-before", "final", "X-after"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    lines: Arc<Mutex<Vec<String>>>,
}

impl EventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line.
    pub fn push(&self, line: impl Into<String>) {
        lock(&self.lines).push(line.into());
    }

    /// Get a copy of the logged lines.
    pub fn lines(&self) -> Vec<String> {
        lock(&self.lines).clone()
    }

    /// Get the number of logged lines.
    pub fn len(&self) -> usize {
        lock(&self.lines).len()
    }

    /// Check whether nothing has been logged.
    pub fn is_empty(&self) -> bool {
        lock(&self.lines).is_empty()
    }

    /// Clear all logged lines.
    pub fn clear(&self) {
        lock(&self.lines).clear();
    }
}

// ============================================================================
// Recording Hook
// ============================================================================

/// A hook that records all arguments it receives.
///
/// Useful for verifying which calls reached a given point of a chain.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingHook::<Job>::new();
/// chain.add(recorder.clone(), Some("recorder"));
///
/// chain.invoke(&job)?;
///
/// assert_eq!(recorder.calls().len(), 1);
/// ```
pub struct RecordingHook<A: Clone> {
    calls: Arc<Mutex<Vec<A>>>,
    result: HookResult,
}

impl<A: Clone> RecordingHook<A> {
    /// Create a new recording hook that returns `Next`.
    pub fn new() -> Self {
        Self::with_result(HookResult::Next)
    }

    /// Create a recording hook that returns a specific result.
    pub fn with_result(result: HookResult) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            result,
        }
    }

    /// Get a clone of the recorded arguments.
    pub fn calls(&self) -> Vec<A> {
        lock(&self.calls).clone()
    }

    /// Get the number of recorded calls.
    pub fn count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Clear all recorded calls.
    pub fn clear(&self) {
        lock(&self.calls).clear();
    }
}

impl<A: Clone> Default for RecordingHook<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Clone> Clone for RecordingHook<A> {
    fn clone(&self) -> Self {
        Self {
            calls: Arc::clone(&self.calls),
            result: self.result,
        }
    }
}

impl<A: Message + Clone> Hook<A> for RecordingHook<A> {
    fn run(&self, args: &A) -> Result<HookResult, BoxError> {
        lock(&self.calls).push(args.clone());
        Ok(self.result)
    }
}

// ============================================================================
// Recording Around
// ============================================================================

/// A wrapping entry that logs `"{label}-before"` and `"{label}-after"`
/// around the rest of the pipeline.
///
/// With [`RecordingAround::short_circuit`] it logs only `"{label}-skip"` and
/// never proceeds.
#[derive(Debug, Clone)]
pub struct RecordingAround {
    label: String,
    log: EventLog,
    proceed: bool,
}

impl RecordingAround {
    /// Create a recording entry that proceeds.
    pub fn new(label: impl Into<String>, log: EventLog) -> Self {
        Self {
            label: label.into(),
            log,
            proceed: true,
        }
    }

    /// Create a recording entry that never proceeds.
    pub fn short_circuit(label: impl Into<String>, log: EventLog) -> Self {
        Self {
            proceed: false,
            ..Self::new(label, log)
        }
    }
}

impl<A: Message> AroundHook<A> for RecordingAround {
    fn around(&self, _args: &A, proceed: Proceed<'_>) -> Result<(), BoxError> {
        if !self.proceed {
            self.log.push(format!("{}-skip", self.label));
            return Ok(());
        }
        self.log.push(format!("{}-before", self.label));
        proceed.proceed()?;
        self.log.push(format!("{}-after", self.label));
        Ok(())
    }
}

// ============================================================================
// Counting Hook
// ============================================================================

/// An entry that counts invocations.
///
/// As a [`Hook`] it returns `Next`; as an [`AroundHook`] it proceeds once.
///
/// # Example
///
/// ```rust,ignore
/// let counter = CountingHook::new();
/// chain.add(counter.clone(), None);
///
/// chain.invoke(&job)?;
///
/// assert_eq!(counter.count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CountingHook {
    count: Arc<AtomicUsize>,
}

impl CountingHook {
    /// Create a new counting hook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl<A: Message> Hook<A> for CountingHook {
    fn run(&self, _args: &A) -> Result<HookResult, BoxError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(HookResult::Next)
    }
}

impl<A: Message> AroundHook<A> for CountingHook {
    fn around(&self, _args: &A, proceed: Proceed<'_>) -> Result<(), BoxError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        proceed.proceed()
    }
}

// ============================================================================
// Failing Hook
// ============================================================================

/// An entry that always fails with the given message, as a [`Hook`] or an
/// [`AroundHook`].
#[derive(Debug, Clone)]
pub struct FailingHook {
    message: String,
}

impl FailingHook {
    /// Create a failing hook.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl<A: Message> Hook<A> for FailingHook {
    fn run(&self, _args: &A) -> Result<HookResult, BoxError> {
        Err(self.message.clone().into())
    }
}

impl<A: Message> AroundHook<A> for FailingHook {
    fn around(&self, _args: &A, _proceed: Proceed<'_>) -> Result<(), BoxError> {
        Err(self.message.clone().into())
    }
}
