//! Test doubles and common utilities for architecture contract tests
//!
//! This module provides minimal endpoint doubles that verify the
//! controller's transition discipline without running real consumers.

use chanbind_core::error::{Error, Result};
use chanbind_core::traits::{ComponentNamed, Pausable, Runnable};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// A counting endpoint double
///
/// Tracks every delegated call and records a violation whenever a start
/// lands on an already-running endpoint or a stop lands on a halted one,
/// the two overlaps the controller's transition lock must rule out.
///
/// Clones share counters, so a test can move one clone into a controller
/// and keep another to observe (the `sharing_counters_with` pattern).
#[derive(Clone, Default)]
pub struct CountingEndpoint {
    /// Authoritative run state
    running: Arc<AtomicBool>,
    /// Call counter for start()
    start_calls: Arc<AtomicUsize>,
    /// Call counter for stop()
    stop_calls: Arc<AtomicUsize>,
    /// Overlapping-transition violations observed
    violations: Arc<AtomicUsize>,
    /// Fail the next start() call
    fail_next_start: Arc<AtomicBool>,
    /// Fail the next stop() call
    fail_next_stop: Arc<AtomicBool>,
}

impl CountingEndpoint {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of times start() was called
    pub fn start_calls(&self) -> usize {
        self.start_calls.load(Ordering::SeqCst)
    }

    /// Get the number of times stop() was called
    pub fn stop_calls(&self) -> usize {
        self.stop_calls.load(Ordering::SeqCst)
    }

    /// Get the number of overlapping-transition violations observed
    pub fn violations(&self) -> usize {
        self.violations.load(Ordering::SeqCst)
    }

    /// Force the endpoint's run state without going through start()/stop()
    pub fn set_running(&self, running: bool) {
        self.running.store(running, Ordering::SeqCst);
    }

    /// Make the next start() call fail
    pub fn fail_next_start(&self) {
        self.fail_next_start.store(true, Ordering::SeqCst);
    }

    /// Make the next stop() call fail
    pub fn fail_next_stop(&self) {
        self.fail_next_stop.store(true, Ordering::SeqCst);
    }
}

impl Runnable for CountingEndpoint {
    fn start(&self) -> Result<()> {
        if self.fail_next_start.swap(false, Ordering::SeqCst) {
            return Err(Error::endpoint("injected start failure"));
        }
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        if self.running.swap(true, Ordering::SeqCst) {
            // start landed on an already-running endpoint
            self.violations.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }

    fn stop(&self) -> Result<()> {
        if self.fail_next_stop.swap(false, Ordering::SeqCst) {
            return Err(Error::endpoint("injected stop failure"));
        }
        self.stop_calls.fetch_add(1, Ordering::SeqCst);
        if !self.running.swap(false, Ordering::SeqCst) {
            // stop landed on an endpoint that was not running
            self.violations.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

/// A counting endpoint that also exposes the pause and component-name
/// capabilities
#[derive(Clone)]
pub struct PausableEndpoint {
    inner: CountingEndpoint,
    name: &'static str,
    paused: Arc<AtomicBool>,
    pause_calls: Arc<AtomicUsize>,
    resume_calls: Arc<AtomicUsize>,
}

impl PausableEndpoint {
    pub fn new(name: &'static str) -> Self {
        Self {
            inner: CountingEndpoint::new(),
            name,
            paused: Arc::new(AtomicBool::new(false)),
            pause_calls: Arc::new(AtomicUsize::new(0)),
            resume_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get the number of times pause() was called
    pub fn pause_calls(&self) -> usize {
        self.pause_calls.load(Ordering::SeqCst)
    }

    /// Get the number of times resume() was called
    pub fn resume_calls(&self) -> usize {
        self.resume_calls.load(Ordering::SeqCst)
    }

    /// Whether the endpoint is currently paused
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    /// The underlying counting double
    pub fn counters(&self) -> &CountingEndpoint {
        &self.inner
    }
}

impl Runnable for PausableEndpoint {
    fn start(&self) -> Result<()> {
        self.inner.start()
    }

    fn stop(&self) -> Result<()> {
        self.inner.stop()
    }

    fn is_running(&self) -> bool {
        self.inner.is_running()
    }

    fn as_named(&self) -> Option<&dyn ComponentNamed> {
        Some(self)
    }

    fn as_pausable(&self) -> Option<&dyn Pausable> {
        Some(self)
    }
}

impl ComponentNamed for PausableEndpoint {
    fn component_name(&self) -> &str {
        self.name
    }
}

impl Pausable for PausableEndpoint {
    fn pause(&self) -> Result<()> {
        self.pause_calls.fetch_add(1, Ordering::SeqCst);
        self.paused.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn resume(&self) -> Result<()> {
        self.resume_calls.fetch_add(1, Ordering::SeqCst);
        self.paused.store(false, Ordering::SeqCst);
        Ok(())
    }
}
