//! Binding contract and default controller
//!
//! A *binding* is the association between a named logical target and a
//! concrete running endpoint. The [`Binding`] trait is the contract a
//! registry (or any owning framework layer) drives; [`BindingController`]
//! is the default implementation.

mod controller;

pub use controller::{BindingController, UnbindHook};

use crate::error::Result;

/// Contract exposed by every binding
///
/// Object-safe so registries can hold heterogeneous bindings as
/// `Arc<dyn Binding>`. The owning layer is responsible for calling
/// [`unbind`](Binding::unbind) on shutdown and for deciding whether to
/// discard or retain the binding afterward.
pub trait Binding: Send + Sync {
    /// Name of the binding target; may be empty for anonymous bindings
    fn name(&self) -> &str;

    /// Consumer group; a blank group marks the binding as anonymous
    /// (non-restartable once stopped)
    fn group(&self) -> &str;

    /// Whether the bound endpoint is currently running
    fn is_running(&self) -> bool;

    /// Start the bound endpoint, subject to the anonymous-binding policy
    fn start(&self) -> Result<()>;

    /// Stop the bound endpoint; idempotent
    fn stop(&self) -> Result<()>;

    /// Suspend consumption, if the endpoint supports pausing
    fn pause(&self) -> Result<()>;

    /// Resume consumption after a pause
    fn resume(&self) -> Result<()>;

    /// Stop the endpoint and run unbind cleanup
    fn unbind(&self) -> Result<()>;

    /// Human-readable rendering for logs and debugging
    fn describe(&self) -> String;
}

/// Whether a string carries non-whitespace content.
///
/// Blank and whitespace-only groups both mark a binding as anonymous.
pub(crate) fn has_text(s: &str) -> bool {
    !s.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_whitespace_groups_are_anonymous() {
        assert!(!has_text(""));
        assert!(!has_text("   "));
        assert!(!has_text("\t\n"));
        assert!(has_text("grp1"));
        assert!(has_text(" grp1 "));
    }
}
