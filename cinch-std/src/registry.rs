//! Named hook chains.
//!
//! A [`HookRegistry`] maps hook names to linear and around chains for one
//! argument type. It is built explicitly at startup instead of being
//! generated on a type:
//!
//! ```ignore
//! let mut hooks = HookRegistry::<Job>::new();
//! hooks.define("validate")?.add(|job: &Job| !job.queue.is_empty(), Some("queue"));
//! hooks.define_around("around_enqueue")?.add(LoggingAround::new("enqueue"), Some("log"));
//! hooks.chain_mut("before_enqueue").unwrap().add(LoggingHook::new("admit"), None);
//!
//! // A derived configuration starts as a copy and diverges independently.
//! let mut mailer_hooks = hooks.derive();
//! mailer_hooks.around_mut("around_enqueue").unwrap().add(RetryAround::new(3), Some("retry"));
//! ```
//!
//! # Naming convention
//!
//! Defining `around_X` creates the around chain together with two linear
//! chains reachable as `before_X` and `after_X`. They are wired in as the
//! around chain's `before` and `after`, so entries added through either
//! name run on every `around_X` invocation.

use cinch_core::{
    AroundChain, BoxError, Chain, ChainConfig, CinchError, HookResult, Message, RegistryError,
};
use std::{collections::BTreeMap, fmt};

const AROUND_PREFIX: &str = "around_";
const BEFORE_PREFIX: &str = "before_";
const AFTER_PREFIX: &str = "after_";

enum Paired {
    Before,
    After,
}

/// A name → chain registry for one argument type.
pub struct HookRegistry<A: Message> {
    config: ChainConfig,
    chains: BTreeMap<String, Chain<A>>,
    arounds: BTreeMap<String, AroundChain<A>>,
}

impl<A: Message> HookRegistry<A> {
    /// Create an empty registry whose chains use the default configuration.
    pub fn new() -> Self {
        Self::with_config(ChainConfig::default())
    }

    /// Create an empty registry whose chains use `config`.
    pub fn with_config(config: ChainConfig) -> Self {
        Self {
            config,
            chains: BTreeMap::new(),
            arounds: BTreeMap::new(),
        }
    }

    /// The configuration new chains are created with.
    pub fn config(&self) -> ChainConfig {
        self.config
    }

    /// Define a linear chain.
    pub fn define(&mut self, name: &str) -> Result<&mut Chain<A>, RegistryError> {
        if self.contains(name) {
            return Err(RegistryError::AlreadyDefined(name.to_owned()));
        }
        trace_define(name);
        let config = self.config;
        Ok(self
            .chains
            .entry(name.to_owned())
            .or_insert_with(|| Chain::with_config(config)))
    }

    /// Define an around chain named `around_X`, with `before_X` and `after_X`
    /// wired in as its `before` and `after` chains.
    pub fn define_around(&mut self, name: &str) -> Result<&mut AroundChain<A>, RegistryError> {
        let base = name
            .strip_prefix(AROUND_PREFIX)
            .filter(|base| !base.is_empty())
            .ok_or_else(|| RegistryError::InvalidAroundName(name.to_owned()))?;

        let before = format!("{BEFORE_PREFIX}{base}");
        let after = format!("{AFTER_PREFIX}{base}");
        if let Some(taken) = [name, before.as_str(), after.as_str()]
            .into_iter()
            .find(|candidate| self.contains(candidate))
        {
            return Err(RegistryError::AlreadyDefined(taken.to_owned()));
        }

        trace_define(name);
        let config = self.config;
        let around = AroundChain::with_config(config)
            .with_before(Chain::with_config(config))
            .with_after(Chain::with_config(config));
        Ok(self.arounds.entry(name.to_owned()).or_insert(around))
    }

    /// Whether `name` resolves to a linear or around chain.
    pub fn contains(&self, name: &str) -> bool {
        self.arounds.contains_key(name) || self.chain(name).is_some()
    }

    /// Every resolvable name, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.chains.keys().cloned().collect();
        for name in self.arounds.keys() {
            if let Some(base) = name.strip_prefix(AROUND_PREFIX) {
                names.push(format!("{BEFORE_PREFIX}{base}"));
                names.push(format!("{AFTER_PREFIX}{base}"));
            }
            names.push(name.clone());
        }
        names.sort();
        names
    }

    /// Look up a linear chain, including the `before_X`/`after_X` chains of
    /// an `around_X` hook.
    pub fn chain(&self, name: &str) -> Option<&Chain<A>> {
        if let Some(chain) = self.chains.get(name) {
            return Some(chain);
        }
        let (around_name, paired) = split_paired(name)?;
        let around = self.arounds.get(&around_name)?;
        match paired {
            Paired::Before => around.before(),
            Paired::After => around.after(),
        }
    }

    /// Mutable lookup of a linear chain, including the `before_X`/`after_X`
    /// chains of an `around_X` hook.
    pub fn chain_mut(&mut self, name: &str) -> Option<&mut Chain<A>> {
        if let Some(chain) = self.chains.get_mut(name) {
            return Some(chain);
        }
        let (around_name, paired) = split_paired(name)?;
        let around = self.arounds.get_mut(&around_name)?;
        match paired {
            Paired::Before => around.before_mut(),
            Paired::After => around.after_mut(),
        }
    }

    /// Look up an around chain.
    pub fn around(&self, name: &str) -> Option<&AroundChain<A>> {
        self.arounds.get(name)
    }

    /// Mutable lookup of an around chain.
    pub fn around_mut(&mut self, name: &str) -> Option<&mut AroundChain<A>> {
        self.arounds.get_mut(name)
    }

    /// Invoke the linear chain registered under `name`.
    pub fn invoke(&self, name: &str, args: &A) -> Result<HookResult, CinchError> {
        let chain = self
            .chain(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_owned()))?;
        Ok(chain.invoke(args)?)
    }

    /// Invoke the around chain registered under `name`.
    pub fn invoke_around<T, F>(
        &self,
        name: &str,
        args: &A,
        final_action: F,
    ) -> Result<Option<T>, CinchError>
    where
        F: FnMut() -> Result<T, BoxError>,
    {
        Ok(self.require_around(name)?.invoke(args, final_action)?)
    }

    /// Invoke the around chain registered under `name` over a batch.
    pub fn invoke_around_bulk<T, F>(
        &self,
        name: &str,
        args_list: &[A],
        final_action: F,
    ) -> Result<T, CinchError>
    where
        F: FnOnce(Vec<&A>) -> Result<T, BoxError>,
    {
        Ok(self.require_around(name)?.invoke_bulk(args_list, final_action)?)
    }

    /// Copy this registry for a derived configuration.
    ///
    /// The copy shares entry callables with `self` but owns its chains, so
    /// adding, removing or reordering entries on either side does not affect
    /// the other.
    pub fn derive(&self) -> Self {
        self.clone()
    }

    fn require_around(&self, name: &str) -> Result<&AroundChain<A>, RegistryError> {
        self.around(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_owned()))
    }
}

fn split_paired(name: &str) -> Option<(String, Paired)> {
    if let Some(base) = name.strip_prefix(BEFORE_PREFIX) {
        Some((format!("{AROUND_PREFIX}{base}"), Paired::Before))
    } else {
        name.strip_prefix(AFTER_PREFIX)
            .map(|base| (format!("{AROUND_PREFIX}{base}"), Paired::After))
    }
}

fn trace_define(name: &str) {
    #[cfg(feature = "tracing")]
    {
        tracing::debug!(hook = name, "hook chain defined");
    }
    #[cfg(not(feature = "tracing"))]
    {
        let _ = name;
    }
}

impl<A: Message> Default for HookRegistry<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Message> Clone for HookRegistry<A> {
    fn clone(&self) -> Self {
        Self {
            config: self.config,
            chains: self.chains.clone(),
            arounds: self.arounds.clone(),
        }
    }
}

impl<A: Message> fmt::Debug for HookRegistry<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookRegistry")
            .field("config", &self.config)
            .field("chains", &self.chains)
            .field("arounds", &self.arounds)
            .finish()
    }
}
