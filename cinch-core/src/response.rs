//! Result conversion traits.

use crate::{error::BoxError, hook::HookResult};

/// Trait for converting a terminal-style entry's output into a [`HookResult`].
///
/// # Default Implementations
///
/// - `()` → Next
/// - `bool` → `true` = Next, `false` = Halt
/// - `HookResult` → As is
/// - `Result<T, E>` → Delegates to inner `T` or propagates error
/// - `Option<T>` → Delegates to inner `T`, `None` = Next
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be converted into a `HookResult`",
    label = "missing `IntoHookResult` implementation",
    note = "Terminal-style entries must return `()`, `bool`, `HookResult`, or a `Result` of one."
)]
pub trait IntoHookResult {
    /// Convert the output into propagation behavior and optional error.
    fn into_hook_result(self) -> Result<HookResult, BoxError>;
}

impl IntoHookResult for () {
    fn into_hook_result(self) -> Result<HookResult, BoxError> {
        Ok(HookResult::Next)
    }
}

impl IntoHookResult for bool {
    fn into_hook_result(self) -> Result<HookResult, BoxError> {
        Ok(if self {
            HookResult::Next
        } else {
            HookResult::Halt
        })
    }
}

impl IntoHookResult for HookResult {
    fn into_hook_result(self) -> Result<HookResult, BoxError> {
        Ok(self)
    }
}

impl<T, E> IntoHookResult for Result<T, E>
where
    T: IntoHookResult,
    E: Into<BoxError>,
{
    fn into_hook_result(self) -> Result<HookResult, BoxError> {
        match self {
            Ok(t) => t.into_hook_result(),
            Err(e) => Err(e.into()),
        }
    }
}

impl<T: IntoHookResult> IntoHookResult for Option<T> {
    fn into_hook_result(self) -> Result<HookResult, BoxError> {
        match self {
            Some(t) => t.into_hook_result(),
            None => Ok(HookResult::Next),
        }
    }
}
