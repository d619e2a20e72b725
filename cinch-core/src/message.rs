//! Message trait for call arguments.

/// A marker trait for the argument values that flow through a chain.
///
/// Arguments must be `Send + Sync + 'static` so that a configured chain can
/// be shared across threads. Every such type is a `Message`, so job structs,
/// tuples and strings can be used directly.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Debug, Clone)]
/// struct Job { queue: String, payload: Vec<u8> }
///
/// let chain: Chain<Job> = Chain::new();
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid Message",
    label = "must be `Send + Sync + 'static`",
    note = "Arguments passed through a Cinch chain must be thread-safe and static."
)]
pub trait Message: Send + Sync + 'static {}

impl<T: Send + Sync + 'static> Message for T {}
