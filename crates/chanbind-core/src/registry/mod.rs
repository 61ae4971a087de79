//! Binding registry
//!
//! The registry tracks live bindings per target name so an owning
//! application can look them up, unbind a single target, or tear everything
//! down on shutdown.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use chanbind_core::{Binding, BindingController, BindingRegistry};
//!
//! let registry = BindingRegistry::new();
//!
//! let binding = Arc::new(BindingController::new("orders-in", "grp1", sender, Some(endpoint)));
//! binding.start()?;
//! registry.register(binding);
//!
//! // ... later, on shutdown ...
//! registry.unbind_all()?;
//! ```
//!
//! ## Thread Safety
//!
//! The registry uses interior mutability with RwLock, allowing concurrent
//! reads and exclusive writes. Bindings are removed from the map *before*
//! their `unbind()` runs, so an unbind hook may call back into the registry
//! without deadlocking.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::{debug, error};

use crate::binding::Binding;
use crate::error::{Error, Result};

/// Registry of live bindings, keyed by target name
///
/// Several bindings may share one target name (e.g., multiple consumer
/// groups bound to the same destination); the registry keeps them as a
/// list per name. Anonymous bindings with an empty name all land under the
/// empty key and are torn down by [`unbind_all`](BindingRegistry::unbind_all).
#[derive(Default)]
pub struct BindingRegistry {
    /// Live bindings per target name
    bindings: RwLock<HashMap<String, Vec<Arc<dyn Binding>>>>,
}

impl BindingRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a binding under its target name
    pub fn register(&self, binding: Arc<dyn Binding>) {
        debug!("registering {}", binding.describe());
        let name = binding.name().to_string();
        let mut bindings = self.bindings.write().unwrap();
        bindings.entry(name).or_default().push(binding);
    }

    /// All bindings registered under the given target name
    pub fn bindings_for(&self, name: &str) -> Vec<Arc<dyn Binding>> {
        let bindings = self.bindings.read().unwrap();
        bindings.get(name).cloned().unwrap_or_default()
    }

    /// Check if any binding is registered under the given target name
    pub fn is_bound(&self, name: &str) -> bool {
        let bindings = self.bindings.read().unwrap();
        bindings.contains_key(name)
    }

    /// List all registered target names
    pub fn target_names(&self) -> Vec<String> {
        let bindings = self.bindings.read().unwrap();
        bindings.keys().cloned().collect()
    }

    /// Total number of registered bindings across all targets
    pub fn binding_count(&self) -> usize {
        let bindings = self.bindings.read().unwrap();
        bindings.values().map(Vec::len).sum()
    }

    /// Unbind and remove every binding registered under the given target
    ///
    /// # Returns
    ///
    /// - `Ok(count)`: number of bindings unbound
    /// - `Err(Error::NotFound)`: if no binding is registered under `name`
    ///
    /// The bindings are removed from the registry before their `unbind()`
    /// runs; a failure mid-list propagates and leaves the remaining
    /// removed bindings un-unbound.
    pub fn unbind(&self, name: &str) -> Result<usize> {
        let removed = {
            let mut bindings = self.bindings.write().unwrap();
            bindings.remove(name)
        };

        let Some(removed) = removed else {
            return Err(Error::not_found(format!("no bindings for target {name}")));
        };

        let count = removed.len();
        for binding in removed {
            binding.unbind()?;
        }
        debug!(binding = %name, count, "unbound target");
        Ok(count)
    }

    /// Unbind and remove every registered binding
    ///
    /// Intended for shutdown: drains the registry first, then unbinds each
    /// binding, continuing past individual failures so one broken endpoint
    /// cannot keep the rest bound. The first failure (if any) is returned
    /// after the drain completes.
    pub fn unbind_all(&self) -> Result<()> {
        let drained: Vec<(String, Vec<Arc<dyn Binding>>)> = {
            let mut bindings = self.bindings.write().unwrap();
            bindings.drain().collect()
        };

        let mut first_error = None;
        for (name, bindings) in drained {
            for binding in bindings {
                if let Err(e) = binding.unbind() {
                    error!(binding = %name, "unbind failed: {e}");
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
