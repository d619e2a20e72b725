//! # Linear Chain
//!
//! An ordered list of terminal-style entries invoked one after another.
//! An entry answering [`HookResult::Halt`] stops the chain when
//! [`ChainConfig::halt_on_false`] is set; errors always stop it and reach the
//! caller unchanged.

use crate::{
    config::ChainConfig,
    entry::{Entries, Entry},
    error::BoxError,
    hook::{Hook, HookResult},
    message::Message,
};
use std::{fmt, sync::Arc};

/// An ordered, mutable collection of terminal-style entries.
///
/// Mutation takes `&mut self` and invocation takes `&self`, so a chain is
/// configured first and then shared (by reference or `Arc`) for invocation,
/// possibly from several threads.
///
/// # Example
///
/// ```rust,ignore
/// let mut chain = Chain::new();
/// chain.add(|job: &Job| !job.queue.is_empty(), Some("has_queue"));
/// chain.add(|job: &Job| job.payload.len() < MAX_PAYLOAD, Some("size"));
///
/// if chain.invoke(&job)?.is_halt() {
///     return Ok(Rejected);
/// }
/// ```
pub struct Chain<A: Message> {
    entries: Entries<dyn Hook<A>>,
    config: ChainConfig,
}

impl<A: Message> Chain<A> {
    /// Create an empty chain with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ChainConfig::default())
    }

    /// Create an empty chain with the given configuration.
    pub fn with_config(config: ChainConfig) -> Self {
        Self {
            entries: Entries::new(),
            config,
        }
    }

    /// The chain configuration.
    pub fn config(&self) -> ChainConfig {
        self.config
    }

    /// Append a hook unless `id` is already present.
    ///
    /// Returns `false` when the id was a duplicate and nothing was added.
    pub fn add<H: Hook<A>>(&mut self, hook: H, id: Option<&str>) -> bool {
        self.entries.push(Self::entry(hook, id))
    }

    /// Remove the first entry with the given id. A missing id is a no-op.
    pub fn remove(&mut self, id: &str) -> bool {
        self.entries.remove(id)
    }

    /// Insert a hook at the position of `anchor`, or at the front when no
    /// entry has that id. An entry already registered under `id` is moved.
    pub fn insert_before<H: Hook<A>>(&mut self, anchor: &str, hook: H, id: Option<&str>) {
        self.entries.insert_before(anchor, Self::entry(hook, id));
    }

    /// Insert a hook right after `anchor`, or just before the current last
    /// entry when no entry has that id. An entry already registered under
    /// `id` is moved.
    pub fn insert_after<H: Hook<A>>(&mut self, anchor: &str, hook: H, id: Option<&str>) {
        self.entries.insert_after(anchor, Self::entry(hook, id));
    }

    /// Whether an entry with the given id is registered.
    pub fn exists(&self, id: &str) -> bool {
        self.entries.exists(id)
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the chain has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ids in invocation order; anonymous entries yield `None`.
    pub fn ids(&self) -> Vec<Option<&str>> {
        self.entries.ids()
    }

    /// The underlying entry storage.
    pub fn entries(&self) -> &Entries<dyn Hook<A>> {
        &self.entries
    }

    /// Call every entry in order with `args`.
    ///
    /// Returns [`HookResult::Halt`] as soon as an entry halts (when halting is
    /// enabled), and [`HookResult::Next`] once every entry has run.
    pub fn invoke(&self, args: &A) -> Result<HookResult, BoxError> {
        for entry in &self.entries {
            trace_event!(trace, id = ?entry.id(), "calling entry");
            if entry.call(args)?.is_halt() && self.config.halt_on_false {
                trace_event!(debug, id = ?entry.id(), "chain halted");
                return Ok(HookResult::Halt);
            }
        }
        Ok(HookResult::Next)
    }

    fn entry<H: Hook<A>>(hook: H, id: Option<&str>) -> Entry<dyn Hook<A>> {
        let action: Arc<dyn Hook<A>> = Arc::new(hook);
        Entry::new(action, id)
    }
}

impl<A: Message> Default for Chain<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Message> Clone for Chain<A> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            config: self.config,
        }
    }
}

impl<A: Message> fmt::Debug for Chain<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("entries", &self.entries)
            .field("config", &self.config)
            .finish()
    }
}

// A configured chain nests inside another chain as a single entry.
impl<A: Message> Hook<A> for Chain<A> {
    fn run(&self, args: &A) -> Result<HookResult, BoxError> {
        self.invoke(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    type Log = Arc<Mutex<Vec<&'static str>>>;

    fn recorder(log: &Log, name: &'static str, result: bool) -> impl Hook<u32> {
        let log = Arc::clone(log);
        move |_: &u32| {
            log.lock().unwrap().push(name);
            result
        }
    }

    #[test]
    fn test_invoke_halts_on_false() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut chain = Chain::new();
        chain.add(recorder(&log, "a", true), Some("a"));
        chain.add(recorder(&log, "b", false), Some("b"));
        chain.add(recorder(&log, "c", true), Some("c"));

        assert_eq!(chain.invoke(&1).unwrap(), HookResult::Halt);
        assert_eq!(*log.lock().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_invoke_without_halting_runs_everything() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut chain = Chain::with_config(ChainConfig::new().with_halt_on_false(false));
        chain.add(recorder(&log, "a", true), Some("a"));
        chain.add(recorder(&log, "b", false), Some("b"));
        chain.add(recorder(&log, "c", true), Some("c"));

        assert_eq!(chain.invoke(&1).unwrap(), HookResult::Next);
        assert_eq!(*log.lock().unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_invoke_empty_chain_completes() {
        let chain: Chain<u32> = Chain::new();
        assert_eq!(chain.invoke(&1).unwrap(), HookResult::Next);
    }

    #[test]
    fn test_error_propagates_and_stops() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut chain = Chain::new();
        chain.add(
            |_: &u32| -> Result<(), BoxError> { Err("boom".into()) },
            Some("fail"),
        );
        chain.add(recorder(&log, "after", true), None);

        let err = chain.invoke(&1).unwrap_err();
        assert_eq!(err.to_string(), "boom");
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_add_is_noop() {
        let mut chain: Chain<u32> = Chain::new();
        assert!(chain.add(|_: &u32| true, Some("check")));
        assert!(!chain.add(|_: &u32| false, Some("check")));
        assert_eq!(chain.len(), 1);
        // The first registration is the one that runs.
        assert_eq!(chain.invoke(&1).unwrap(), HookResult::Next);
    }

    #[test]
    fn test_nested_chain_halts_outer() {
        let mut inner: Chain<u32> = Chain::new();
        inner.add(|n: &u32| *n < 10, Some("limit"));

        let mut outer: Chain<u32> = Chain::new();
        outer.add(inner, Some("inner"));
        outer.add(|_: &u32| true, Some("tail"));

        assert_eq!(outer.invoke(&3).unwrap(), HookResult::Next);
        assert_eq!(outer.invoke(&30).unwrap(), HookResult::Halt);
    }
}
