// # chanbind-core
//
// Core library for the channel binding lifecycle system.
//
// ## Architecture Overview
//
// This library governs the lifecycle of *bindings*: associations between a
// named logical target and an externally supplied runnable endpoint.
//
// - **Runnable**: Trait for the start/stop/is_running capability a binding
//   delegates to
// - **Binding**: Contract exposed to the owning application or framework
// - **BindingController**: Default binding implementation with a
//   per-instance transition lock
// - **BindingRegistry**: Tracks live bindings and unbinds them on shutdown
//
// ## Design Principles
//
// 1. **Separation of Concerns**: The controller owns the transition policy,
//    never the endpoint's underlying resources
// 2. **Thread-Based**: Transitions are serialized by a per-instance mutex;
//    no async runtime is required by the core
// 3. **Capability-Based**: Optional endpoint features (naming, pausing) are
//    discovered through capability accessors, not downcasts
// 4. **Library-First**: Everything here can be embedded directly; see the
//    demos workspace member

pub mod binding;
pub mod config;
pub mod error;
pub mod registry;
pub mod traits;

// Re-export core types for convenience
pub use binding::{Binding, BindingController, UnbindHook};
pub use config::{BindingConfig, BindingsConfig};
pub use error::{Error, Result};
pub use registry::BindingRegistry;
pub use traits::{ComponentNamed, Pausable, Runnable};
