//! Conditional entries - run inner entries based on the call arguments.

use cinch_core::{AroundHook, BoxError, Hook, HookResult, Message, Proceed};

/// A terminal-style entry that runs an inner hook only when a condition holds.
///
/// When the condition is `false` the chain continues as if the entry were
/// absent.
///
/// # Example
///
/// ```rust,ignore
/// // Only audit jobs on the billing queue
/// let billing_only = ConditionalHook::new(
///     |job: &Job| job.queue == "billing",
///     AuditHook,
/// );
/// chain.add(billing_only, Some("billing_audit"));
/// ```
pub struct ConditionalHook<C, H> {
    condition: C,
    inner: H,
}

impl<C, H> ConditionalHook<C, H> {
    /// Create a new `ConditionalHook`.
    ///
    /// The inner hook will only be executed when `condition(args)` returns `true`.
    pub fn new(condition: C, inner: H) -> Self {
        Self { condition, inner }
    }
}

impl<A, C, H> Hook<A> for ConditionalHook<C, H>
where
    A: Message,
    C: Fn(&A) -> bool + Send + Sync + 'static,
    H: Hook<A>,
{
    fn run(&self, args: &A) -> Result<HookResult, BoxError> {
        if (self.condition)(args) {
            self.inner.run(args)
        } else {
            Ok(HookResult::Next)
        }
    }
}

/// A wrapping entry that applies an inner wrapping entry only when a
/// condition holds. Otherwise it proceeds directly.
pub struct ConditionalAround<C, H> {
    condition: C,
    inner: H,
}

impl<C, H> ConditionalAround<C, H> {
    /// Create a new `ConditionalAround`.
    pub fn new(condition: C, inner: H) -> Self {
        Self { condition, inner }
    }
}

impl<A, C, H> AroundHook<A> for ConditionalAround<C, H>
where
    A: Message,
    C: Fn(&A) -> bool + Send + Sync + 'static,
    H: AroundHook<A>,
{
    fn around(&self, args: &A, proceed: Proceed<'_>) -> Result<(), BoxError> {
        if (self.condition)(args) {
            self.inner.around(args, proceed)
        } else {
            proceed.proceed()
        }
    }
}

/// A terminal-style entry that halts the chain when a predicate fails.
///
/// Equivalent to a `bool`-returning closure, with the rejection logged
/// under a rule name.
pub struct ValidateHook<P> {
    rule: &'static str,
    predicate: P,
}

impl<P> ValidateHook<P> {
    /// Create a validation entry named `rule`.
    pub fn new(rule: &'static str, predicate: P) -> Self {
        Self { rule, predicate }
    }

    /// The rule name reported when validation fails.
    pub fn rule(&self) -> &'static str {
        self.rule
    }
}

impl<A, P> Hook<A> for ValidateHook<P>
where
    A: Message,
    P: Fn(&A) -> bool + Send + Sync + 'static,
{
    fn run(&self, args: &A) -> Result<HookResult, BoxError> {
        if (self.predicate)(args) {
            return Ok(HookResult::Next);
        }
        #[cfg(feature = "tracing")]
        {
            tracing::debug!(rule = self.rule(), "validation rejected call");
        }
        Ok(HookResult::Halt)
    }
}
