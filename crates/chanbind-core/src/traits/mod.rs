//! Core traits for the binding lifecycle system
//!
//! This module defines the capability interfaces a binding delegates to.
//!
//! - [`Runnable`]: Start/stop/is_running capability of a bound endpoint
//! - [`ComponentNamed`]: Optional component-name capability, diagnostics only
//! - [`Pausable`]: Optional pause/resume capability

pub mod runnable;

pub use runnable::{ComponentNamed, Pausable, Runnable};
