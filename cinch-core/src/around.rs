//! # Around Chain
//!
//! Wrapping-style entries nested around a caller-supplied final action.
//!
//! Invocation walks the entries with an index cursor. Entry `i` is handed a
//! [`Proceed`] whose continuation calls entry `i + 1`. Past the last entry
//! the continuation runs the final action. Every entry therefore sees the
//! whole rest of the pipeline as a single call it may make zero, one or
//! several times:
//!
//! ```text
//! before ─▶ X ─┐
//!              ├─▶ Y ─┐
//!              │      ├─▶ final
//!              │   Y ◀┘
//!           X ◀┘
//! after
//! ```
//!
//! # Batches
//!
//! [`AroundChain::invoke_bulk`] gives every item its own `before` check and
//! its own pass through the entries. Reaching the end of the pass only marks
//! the item as accepted. Once every item has been attempted, the final action
//! runs once with the accepted items in input order, followed by `after` for
//! each of them. A halt is local to its item. An error aborts the whole call,
//! including items that have not been attempted yet.

use crate::{
    chain::Chain,
    config::ChainConfig,
    entry::{Entries, Entry},
    error::BoxError,
    hook::{AroundHook, Proceed},
    message::Message,
};
use std::{
    cell::{Cell, RefCell},
    fmt,
    sync::Arc,
};

/// An ordered collection of wrapping-style entries with optional `before`
/// and `after` linear chains.
///
/// # Example
///
/// ```rust,ignore
/// let mut around = AroundChain::new().with_before(admission_checks);
/// around.add(LoggingAround::new("enqueue"), Some("log"));
/// around.add(RetryAround::new(3), Some("retry"));
///
/// let id = around.invoke(&job, || queue.push(&job))?;
/// ```
pub struct AroundChain<A: Message> {
    entries: Entries<dyn AroundHook<A>>,
    config: ChainConfig,
    before: Option<Chain<A>>,
    after: Option<Chain<A>>,
}

impl<A: Message> AroundChain<A> {
    /// Create an empty around chain with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ChainConfig::default())
    }

    /// Create an empty around chain with the given configuration.
    pub fn with_config(config: ChainConfig) -> Self {
        Self {
            entries: Entries::new(),
            config,
            before: None,
            after: None,
        }
    }

    /// Run `before` ahead of the wrapped entries on every call.
    pub fn with_before(mut self, before: Chain<A>) -> Self {
        self.before = Some(before);
        self
    }

    /// Run `after` once the wrapped entries have completed.
    pub fn with_after(mut self, after: Chain<A>) -> Self {
        self.after = Some(after);
        self
    }

    /// The chain configuration.
    pub fn config(&self) -> ChainConfig {
        self.config
    }

    /// The `before` chain, if configured.
    pub fn before(&self) -> Option<&Chain<A>> {
        self.before.as_ref()
    }

    /// The `after` chain, if configured.
    pub fn after(&self) -> Option<&Chain<A>> {
        self.after.as_ref()
    }

    /// Mutable access to the `before` chain, if configured.
    pub fn before_mut(&mut self) -> Option<&mut Chain<A>> {
        self.before.as_mut()
    }

    /// Mutable access to the `after` chain, if configured.
    pub fn after_mut(&mut self) -> Option<&mut Chain<A>> {
        self.after.as_mut()
    }

    /// Append a wrapping hook unless `id` is already present.
    ///
    /// Returns `false` when the id was a duplicate and nothing was added.
    pub fn add<H: AroundHook<A>>(&mut self, hook: H, id: Option<&str>) -> bool {
        self.entries.push(Self::entry(hook, id))
    }

    /// Remove the first entry with the given id. A missing id is a no-op.
    pub fn remove(&mut self, id: &str) -> bool {
        self.entries.remove(id)
    }

    /// Insert a hook at the position of `anchor`, or at the front when no
    /// entry has that id. An entry already registered under `id` is moved.
    pub fn insert_before<H: AroundHook<A>>(&mut self, anchor: &str, hook: H, id: Option<&str>) {
        self.entries.insert_before(anchor, Self::entry(hook, id));
    }

    /// Insert a hook right after `anchor`, or just before the current last
    /// entry when no entry has that id. An entry already registered under
    /// `id` is moved.
    pub fn insert_after<H: AroundHook<A>>(&mut self, anchor: &str, hook: H, id: Option<&str>) {
        self.entries.insert_after(anchor, Self::entry(hook, id));
    }

    /// Whether an entry with the given id is registered.
    pub fn exists(&self, id: &str) -> bool {
        self.entries.exists(id)
    }

    /// Remove all wrapping entries. `before` and `after` are left untouched.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of wrapping entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no wrapping entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ids in invocation order; anonymous entries yield `None`.
    pub fn ids(&self) -> Vec<Option<&str>> {
        self.entries.ids()
    }

    /// The underlying entry storage.
    pub fn entries(&self) -> &Entries<dyn AroundHook<A>> {
        &self.entries
    }

    /// Run `args` through `before`, the wrapping entries and `final_action`,
    /// then `after`.
    ///
    /// Returns `Ok(None)` when `before` halted the call, or when no entry
    /// let the call reach `final_action`. Otherwise returns the value of the
    /// last `final_action` run.
    pub fn invoke<T, F>(&self, args: &A, final_action: F) -> Result<Option<T>, BoxError>
    where
        F: FnMut() -> Result<T, BoxError>,
    {
        if self.before_halts(args)? {
            trace_event!(debug, "before chain halted the call");
            return Ok(None);
        }

        let final_action = RefCell::new(final_action);
        let captured = RefCell::new(None);
        let terminal = || -> Result<(), BoxError> {
            let value = (&mut *final_action.borrow_mut())()?;
            *captured.borrow_mut() = Some(value);
            Ok(())
        };
        self.proceed_from(0, args, &terminal)?;

        if let Some(after) = &self.after {
            after.invoke(args)?;
        }
        Ok(captured.into_inner())
    }

    /// Run every item of `args_list` through its own `before` check and pass
    /// over the wrapping entries, then call `final_action` once with the
    /// items whose pass reached the end, in input order. `after` then runs for
    /// each of those items.
    ///
    /// `final_action` is called even when no item survives (with an empty
    /// vector). An error from any item stops the batch: later items are not
    /// attempted and `final_action` does not run.
    pub fn invoke_bulk<T, F>(&self, args_list: &[A], final_action: F) -> Result<T, BoxError>
    where
        F: FnOnce(Vec<&A>) -> Result<T, BoxError>,
    {
        let mut accepted = vec![false; args_list.len()];

        for (index, args) in args_list.iter().enumerate() {
            if self.before_halts(args)? {
                trace_event!(debug, index, "before chain halted batch item");
                continue;
            }

            let reached = Cell::new(false);
            let terminal = || -> Result<(), BoxError> {
                reached.set(true);
                Ok(())
            };
            self.proceed_from(0, args, &terminal)?;
            accepted[index] = reached.get();
        }

        let batch: Vec<&A> = args_list
            .iter()
            .zip(&accepted)
            .filter_map(|(args, ok)| ok.then_some(args))
            .collect();
        trace_event!(
            debug,
            total = args_list.len(),
            accepted = batch.len(),
            "invoking final action for batch"
        );
        let value = final_action(batch)?;

        if let Some(after) = &self.after {
            for (args, _) in args_list.iter().zip(&accepted).filter(|(_, ok)| **ok) {
                after.invoke(args)?;
            }
        }
        Ok(value)
    }

    fn before_halts(&self, args: &A) -> Result<bool, BoxError> {
        match &self.before {
            Some(before) => Ok(before.invoke(args)?.is_halt() && self.config.halt_on_false),
            None => Ok(false),
        }
    }

    fn proceed_from(
        &self,
        index: usize,
        args: &A,
        terminal: &dyn Fn() -> Result<(), BoxError>,
    ) -> Result<(), BoxError> {
        let Some(entry) = self.entries.get(index) else {
            return terminal();
        };
        let next = || self.proceed_from(index + 1, args, terminal);
        trace_event!(trace, id = ?entry.id(), index, "entering around entry");
        entry.call(args, Proceed::new(&next))
    }

    fn entry<H: AroundHook<A>>(hook: H, id: Option<&str>) -> Entry<dyn AroundHook<A>> {
        let action: Arc<dyn AroundHook<A>> = Arc::new(hook);
        Entry::new(action, id)
    }
}

impl<A: Message> Default for AroundChain<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Message> Clone for AroundChain<A> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            config: self.config,
            before: self.before.clone(),
            after: self.after.clone(),
        }
    }
}

impl<A: Message> fmt::Debug for AroundChain<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AroundChain")
            .field("entries", &self.entries)
            .field("config", &self.config)
            .field("before", &self.before)
            .field("after", &self.after)
            .finish()
    }
}
