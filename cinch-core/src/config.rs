//! Chain configuration.

/// Options shared by [`Chain`](crate::Chain) and
/// [`AroundChain`](crate::AroundChain).
///
/// With the `serde` feature enabled the config deserializes from any serde
/// format, and missing fields fall back to their defaults:
///
/// ```rust,ignore
/// let config: ChainConfig = serde_json::from_str(r#"{ "halt_on_false": false }"#)?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ChainConfig {
    /// Whether a [`HookResult::Halt`](crate::HookResult::Halt) stops the
    /// chain. Defaults to `true`.
    pub halt_on_false: bool,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ChainConfig {
    /// Create the default configuration.
    pub const fn new() -> Self {
        Self {
            halt_on_false: true,
        }
    }

    /// Set whether a halt result stops the chain.
    pub const fn with_halt_on_false(mut self, halt_on_false: bool) -> Self {
        self.halt_on_false = halt_on_false;
        self
    }
}
