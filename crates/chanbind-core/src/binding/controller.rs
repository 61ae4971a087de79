//! Default binding controller
//!
//! [`BindingController`] associates a target name (and optional consumer
//! group) with a bound handle and an optional [`Runnable`] endpoint, and
//! governs the endpoint's start/stop/unbind transitions under concurrent
//! access.
//!
//! ## Concurrency
//!
//! Every transition method acquires the same per-instance mutex, so at most
//! one transition is in flight at any time for a given controller. The
//! check-then-act sequence (observe run state, then delegate) is atomic with
//! respect to other transitions, which prevents two threads from both
//! observing "not running" and double-starting the endpoint.
//!
//! [`is_running`](Binding::is_running) deliberately takes no lock: it is a
//! best-effort snapshot, and the authoritative gate sits inside the locked
//! transition methods.

use std::fmt;
use std::sync::Mutex;

use tracing::warn;

use super::{Binding, has_text};
use crate::config::BindingConfig;
use crate::error::Result;
use crate::traits::Runnable;

/// Cleanup callback invoked by [`Binding::unbind`], outside the transition
/// lock, exactly once per `unbind()` call.
///
/// Concurrent `unbind()` calls run their hook invocations concurrently, so
/// a hook that mutates shared state must be idempotent and thread-safe.
pub type UnbindHook = Box<dyn Fn() + Send + Sync>;

/// Default implementation of [`Binding`]
///
/// The controller delegates actual run/halt behavior to the attached
/// endpoint and enforces the transition policy:
///
/// - `start()` is a no-op when already running, and delegates only when an
///   endpoint is attached *and* the group is non-blank. An anonymous
///   binding (blank group) has no stable identity to re-attach a consumer
///   to, so restarting it is unsupported: the controller logs a warning and
///   does nothing.
/// - `stop()` is idempotent and only delegates while running.
/// - `unbind()` stops the endpoint, then runs the unbind hook.
///
/// The controller uses the endpoint exclusively but does not own it: it
/// never constructs or destroys the endpoint's underlying resources.
///
/// # Example
///
/// ```rust,ignore
/// use chanbind_core::{Binding, BindingController};
///
/// let binding = BindingController::new("orders-in", "grp1", sender, Some(endpoint));
/// binding.start()?;
/// // ... traffic flows ...
/// binding.unbind()?;
/// ```
pub struct BindingController<T> {
    /// Name of the binding target
    name: String,

    /// Consumer group; blank marks the binding anonymous
    group: String,

    /// The bound handle
    target: T,

    /// Endpoint that runs while the binding is active and is stopped
    /// during unbinding
    endpoint: Option<Box<dyn Runnable>>,

    /// Serializes start/stop/pause/resume transitions
    transition: Mutex<()>,

    /// Cleanup hook run after unbinding
    on_unbind: Option<UnbindHook>,
}

impl<T> std::fmt::Debug for BindingController<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BindingController")
            .field("name", &self.name)
            .field("group", &self.group)
            .field("has_endpoint", &self.endpoint.is_some())
            .field("has_on_unbind", &self.on_unbind.is_some())
            .finish_non_exhaustive()
    }
}

impl<T> BindingController<T> {
    /// Create a controller that associates a name and group with a bound
    /// target and an optional endpoint
    ///
    /// # Parameters
    ///
    /// - `name`: name of the binding target; may be empty
    /// - `group`: consumer group; blank marks the binding anonymous
    /// - `target`: the bound handle
    /// - `endpoint`: endpoint that runs while the binding is active and
    ///   will be stopped during unbinding
    pub fn new(
        name: impl Into<String>,
        group: impl Into<String>,
        target: T,
        endpoint: Option<Box<dyn Runnable>>,
    ) -> Self {
        Self {
            name: name.into(),
            group: group.into(),
            target,
            endpoint,
            transition: Mutex::new(()),
            on_unbind: None,
        }
    }

    /// Create a controller from a binding configuration
    ///
    /// Validates the configuration first; an enabled configuration with a
    /// blank name is rejected with [`Error::InvalidArgument`].
    ///
    /// [`Error::InvalidArgument`]: crate::Error::InvalidArgument
    pub fn from_config(
        config: &BindingConfig,
        target: T,
        endpoint: Option<Box<dyn Runnable>>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(
            config.name.clone(),
            config.group.clone(),
            target,
            endpoint,
        ))
    }

    /// Install a cleanup hook that runs after each `unbind()` call
    ///
    /// The hook runs outside the transition lock, so it may safely call
    /// back into registries or other binding APIs.
    pub fn with_unbind_hook(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_unbind = Some(Box::new(hook));
        self
    }

    /// The bound handle
    pub fn target(&self) -> &T {
        &self.target
    }

    /// The attached endpoint, if any
    pub fn endpoint(&self) -> Option<&dyn Runnable> {
        self.endpoint.as_deref()
    }
}

impl<T: fmt::Debug + Send + Sync> Binding for BindingController<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn group(&self) -> &str {
        &self.group
    }

    fn is_running(&self) -> bool {
        self.endpoint.as_ref().is_some_and(|e| e.is_running())
    }

    fn start(&self) -> Result<()> {
        let _transition = self.transition.lock().unwrap();
        if self.is_running() {
            return Ok(());
        }
        match &self.endpoint {
            Some(endpoint) if has_text(&self.group) => endpoint.start(),
            _ => {
                warn!(binding = %self.name, "cannot re-bind an anonymous binding");
                Ok(())
            }
        }
    }

    fn stop(&self) -> Result<()> {
        let _transition = self.transition.lock().unwrap();
        match &self.endpoint {
            Some(endpoint) if endpoint.is_running() => endpoint.stop(),
            _ => Ok(()),
        }
    }

    fn pause(&self) -> Result<()> {
        let _transition = self.transition.lock().unwrap();
        match self.endpoint.as_deref().and_then(|e| e.as_pausable()) {
            Some(pausable) => pausable.pause(),
            None => {
                warn!(binding = %self.name, "endpoint does not support pausing");
                Ok(())
            }
        }
    }

    fn resume(&self) -> Result<()> {
        let _transition = self.transition.lock().unwrap();
        match self.endpoint.as_deref().and_then(|e| e.as_pausable()) {
            Some(pausable) => pausable.resume(),
            None => {
                warn!(binding = %self.name, "endpoint does not support resuming");
                Ok(())
            }
        }
    }

    fn unbind(&self) -> Result<()> {
        self.stop()?;
        if let Some(hook) = &self.on_unbind {
            hook();
        }
        Ok(())
    }

    fn describe(&self) -> String {
        let endpoint = match &self.endpoint {
            Some(endpoint) => endpoint
                .as_named()
                .map(|named| named.component_name().to_string())
                .unwrap_or_else(|| "<unnamed>".to_string()),
            None => "<none>".to_string(),
        };
        format!(
            "Binding [name={}, target={:?}, endpoint={}]",
            self.name, self.target, endpoint
        )
    }
}
