// # Runnable Capability
//
// Defines the minimal interface a binding delegates run/halt behavior to.
//
// ## Implementations
//
// - tokio mpsc message pump: `chanbind-endpoint-mpsc` crate
// - Future: connection-backed consumers, scheduled pollers
//
// ## Ownership
//
// A binding uses a `Runnable` exclusively but does not own its underlying
// OS or network handles; those belong to whoever constructed the endpoint.

use crate::error::Result;

/// Component-name capability, consumed for diagnostics only.
///
/// An endpoint that exposes this capability renders by name in
/// [`Binding::describe`](crate::binding::Binding::describe) output.
pub trait ComponentNamed {
    /// Human-readable component name (e.g., "orders-in.pump")
    fn component_name(&self) -> &str;
}

/// Pause/resume capability.
///
/// Pausing suspends message consumption without tearing the endpoint down;
/// a paused endpoint still reports `is_running() == true`.
pub trait Pausable {
    /// Suspend consumption until [`resume`](Pausable::resume) is called
    fn pause(&self) -> Result<()>;

    /// Resume consumption after a pause
    fn resume(&self) -> Result<()>;
}

/// Trait for runnable endpoint implementations
///
/// This is the capability a [`BindingController`](crate::BindingController)
/// delegates actual run/halt behavior to. Implementations must be
/// thread-safe: `start()` and `stop()` may be invoked from any thread
/// (the controller serializes transitions, but other callers may hold the
/// endpoint directly).
///
/// # Failure Semantics
///
/// Errors raised by `start()`/`stop()` are not wrapped by the controller;
/// they surface verbatim to whoever drove the transition. Implementations
/// must leave `is_running()` truthful after a failure.
pub trait Runnable: Send + Sync {
    /// Start the endpoint
    ///
    /// Blocks until the endpoint is running (or has failed to start).
    /// Calling `start()` on an endpoint that is already running must be
    /// a no-op.
    fn start(&self) -> Result<()>;

    /// Stop the endpoint
    ///
    /// Blocks until the endpoint has halted. Must be idempotent.
    fn stop(&self) -> Result<()>;

    /// Whether the endpoint is currently running
    ///
    /// Best-effort snapshot; may be stale immediately after return.
    fn is_running(&self) -> bool;

    /// Expose the component-name capability, if this endpoint has one
    fn as_named(&self) -> Option<&dyn ComponentNamed> {
        None
    }

    /// Expose the pause/resume capability, if this endpoint has one
    fn as_pausable(&self) -> Option<&dyn Pausable> {
        None
    }
}
