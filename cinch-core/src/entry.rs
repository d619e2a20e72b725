//! Entries and their ordered storage.
//!
//! [`Entries`] is the storage behind both [`Chain`](crate::Chain) and
//! [`AroundChain`](crate::AroundChain). It owns the ordering rules: first
//! registration of an id wins, inserting an id that is already present
//! moves it, and a missing anchor falls back to a fixed position.

use crate::{
    error::BoxError,
    hook::{AroundHook, Hook, HookResult, Proceed},
    message::Message,
};
use std::{fmt, sync::Arc};

/// One identified unit of behavior in a chain.
///
/// `H` is `dyn Hook<A>` for linear chains and `dyn AroundHook<A>` for around
/// chains. Entries are immutable once constructed and compare equal when
/// their ids are equal.
pub struct Entry<H: ?Sized> {
    id: Option<String>,
    action: Arc<H>,
}

impl<H: ?Sized> Entry<H> {
    /// Create an entry. An empty id is treated as anonymous.
    pub fn new(action: Arc<H>, id: Option<&str>) -> Self {
        Self {
            id: id.filter(|id| !id.is_empty()).map(str::to_owned),
            action,
        }
    }

    /// The entry id, if it has one.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The wrapped callable.
    pub fn action(&self) -> &H {
        &self.action
    }

    fn has_id(&self, id: &str) -> bool {
        !id.is_empty() && self.id.as_deref() == Some(id)
    }
}

impl<A: Message> Entry<dyn Hook<A>> {
    /// Forward a terminal-style call to the wrapped hook.
    pub fn call(&self, args: &A) -> Result<HookResult, BoxError> {
        self.action.run(args)
    }
}

impl<A: Message> Entry<dyn AroundHook<A>> {
    /// Forward a wrapping-style call to the wrapped hook.
    pub fn call(&self, args: &A, proceed: Proceed<'_>) -> Result<(), BoxError> {
        self.action.around(args, proceed)
    }
}

impl<H: ?Sized> Clone for Entry<H> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            action: Arc::clone(&self.action),
        }
    }
}

impl<H: ?Sized> PartialEq for Entry<H> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<H: ?Sized> fmt::Debug for Entry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry").field("id", &self.id).finish()
    }
}

/// Ordered entry storage with id uniqueness.
pub struct Entries<H: ?Sized> {
    items: Vec<Entry<H>>,
}

impl<H: ?Sized> Entries<H> {
    /// Create empty storage.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append an entry unless its id is already present.
    ///
    /// Returns `false` for the duplicate no-op.
    pub fn push(&mut self, entry: Entry<H>) -> bool {
        if let Some(id) = entry.id()
            && self.exists(id)
        {
            trace_event!(debug, id, "duplicate entry id ignored");
            return false;
        }
        self.items.push(entry);
        true
    }

    /// Remove the first entry with the given id. Returns whether one was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.position(id) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Insert at the anchor's position, or at the front when the anchor is
    /// missing. An existing entry with the same id is moved.
    pub fn insert_before(&mut self, anchor: &str, entry: Entry<H>) {
        self.take_existing(&entry);
        let index = self.position(anchor).unwrap_or(0);
        self.items.insert(index, entry);
    }

    /// Insert right after the anchor, or just before the current last entry
    /// when the anchor is missing. An existing entry with the same id is moved.
    pub fn insert_after(&mut self, anchor: &str, entry: Entry<H>) {
        self.take_existing(&entry);
        let index = match self.position(anchor) {
            Some(index) => index + 1,
            None => self.items.len().saturating_sub(1),
        };
        self.items.insert(index, entry);
    }

    /// Whether an entry with the given id is present. Always `false` for an
    /// empty id.
    pub fn exists(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Entry at the given position.
    pub fn get(&self, index: usize) -> Option<&Entry<H>> {
        self.items.get(index)
    }

    /// Iterate over entries in invocation order.
    pub fn iter(&self) -> std::slice::Iter<'_, Entry<H>> {
        self.items.iter()
    }

    /// Ids in invocation order; anonymous entries yield `None`.
    pub fn ids(&self) -> Vec<Option<&str>> {
        self.items.iter().map(Entry::id).collect()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|entry| entry.has_id(id))
    }

    fn take_existing(&mut self, entry: &Entry<H>) {
        if let Some(id) = entry.id()
            && self.remove(id)
        {
            trace_event!(debug, id, "moving existing entry");
        }
    }
}

impl<H: ?Sized> Default for Entries<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: ?Sized> Clone for Entries<H> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
        }
    }
}

impl<H: ?Sized> fmt::Debug for Entries<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.ids()).finish()
    }
}

impl<'a, H: ?Sized> IntoIterator for &'a Entries<H> {
    type Item = &'a Entry<H>;
    type IntoIter = std::slice::Iter<'a, Entry<H>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
