// # mpsc Message-Pump Endpoint
//
// This crate provides a tokio-mpsc-backed endpoint for the channel binding
// system.
//
// ## Purpose
//
// [`MpscEndpoint`] is the in-process reference implementation of the
// `Runnable` capability: a pump task that consumes messages from an
// `mpsc::Receiver` and dispatches each one to an async handler. A binding
// controller starts and stops it like any other endpoint.
//
// ## Architecture
//
// The endpoint itself is synchronous (the binding contract is
// thread-based); the pump runs as a task on a caller-supplied runtime
// handle. `stop()` signals the pump over a watch channel and blocks until
// the pump hands its receiver back, which is what makes the endpoint
// restartable: a later `start()` re-spawns the pump on the same channel.
//
// Handler failures are logged and do not kill the pump. The pump also
// exits on its own when every sender is dropped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc as std_mpsc;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::runtime;
use tokio::sync::{mpsc, watch};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, error};

use chanbind_core::traits::{ComponentNamed, Pausable, Runnable};
use chanbind_core::{Error, Result};

/// Handler invoked by the pump for every consumed message
///
/// Implementations must be thread-safe; the pump awaits each invocation
/// before consuming the next message, so per-message ordering is
/// preserved.
#[async_trait]
pub trait MessageHandler<M>: Send + Sync {
    /// Process one message
    ///
    /// An error is logged by the pump and consumption continues; a handler
    /// that needs its own retry or dead-letter policy implements it here.
    async fn handle(&self, message: M) -> Result<()>;
}

/// Pump control signal carried on the watch channel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PumpSignal {
    /// Consume and dispatch messages
    Run,
    /// Hold consumption; messages queue up in the channel
    Pause,
    /// Exit and hand the receiver back
    Shutdown,
}

/// Per-run pump state
///
/// Exactly one of `receiver` (idle) or `signal`+`done` (running) is
/// populated at rest; `start()` and `stop()` move the receiver between the
/// slot and the pump task.
struct PumpSlot<M> {
    receiver: Option<mpsc::Receiver<M>>,
    signal: Option<watch::Sender<PumpSignal>>,
    done: Option<std_mpsc::Receiver<mpsc::Receiver<M>>>,
}

/// tokio mpsc message-pump endpoint
///
/// Implements `Runnable` plus the optional `ComponentNamed` and `Pausable`
/// capabilities.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use chanbind_core::{Binding, BindingController};
/// use chanbind_endpoint_mpsc::MpscEndpoint;
///
/// let (sender, endpoint) =
///     MpscEndpoint::channel("orders-in.pump", 64, handler, runtime.handle().clone())?;
/// let binding = BindingController::new("orders-in", "grp1", sender.clone(), Some(Box::new(endpoint)));
/// binding.start()?;
/// ```
///
/// # Blocking
///
/// `stop()` blocks the calling thread until the pump has exited. Drive it
/// from a plain thread (or `spawn_blocking`), not from a runtime worker
/// you cannot afford to park.
pub struct MpscEndpoint<M> {
    /// Component name, for diagnostics
    name: String,

    /// Runtime the pump task is spawned onto
    handle: runtime::Handle,

    /// Handler every consumed message is dispatched to
    handler: Arc<dyn MessageHandler<M>>,

    /// Authoritative run state, cleared by the pump itself on exit
    running: Arc<AtomicBool>,

    /// Receiver/signal hand-off between start() and stop()
    pump: Mutex<PumpSlot<M>>,
}

impl<M> std::fmt::Debug for MpscEndpoint<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MpscEndpoint")
            .field("name", &self.name)
            .field("running", &self.running.load(std::sync::atomic::Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl<M: Send + 'static> MpscEndpoint<M> {
    /// Create an endpoint over an existing receiver
    ///
    /// # Parameters
    ///
    /// - `name`: component name used in logs and `describe()` output
    /// - `receiver`: channel the pump consumes from
    /// - `handler`: handler every message is dispatched to
    /// - `handle`: runtime the pump task runs on
    pub fn new(
        name: impl Into<String>,
        receiver: mpsc::Receiver<M>,
        handler: Arc<dyn MessageHandler<M>>,
        handle: runtime::Handle,
    ) -> Self {
        Self {
            name: name.into(),
            handle,
            handler,
            running: Arc::new(AtomicBool::new(false)),
            pump: Mutex::new(PumpSlot {
                receiver: Some(receiver),
                signal: None,
                done: None,
            }),
        }
    }

    /// Create a bounded channel and an endpoint consuming from it
    ///
    /// Returns the sender (the natural binding target) alongside the
    /// endpoint.
    ///
    /// # Returns
    ///
    /// - `Ok((sender, endpoint))`
    /// - `Err(Error::InvalidArgument)`: if `capacity` is zero
    pub fn channel(
        name: impl Into<String>,
        capacity: usize,
        handler: Arc<dyn MessageHandler<M>>,
        handle: runtime::Handle,
    ) -> Result<(mpsc::Sender<M>, Self)> {
        if capacity == 0 {
            return Err(Error::invalid_argument(
                "channel capacity must be greater than zero",
            ));
        }
        let (sender, receiver) = mpsc::channel(capacity);
        Ok((sender, Self::new(name, receiver, handler, handle)))
    }

    /// The endpoint's component name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<M: Send + 'static> Runnable for MpscEndpoint<M> {
    fn start(&self) -> Result<()> {
        let mut pump = self.pump.lock().unwrap();
        if self.running.load(Ordering::SeqCst) {
            return Ok(());
        }

        // A pump that exited on its own (all senders dropped) queued the
        // receiver on the done channel; reclaim it before starting
        if pump.receiver.is_none() {
            if let Some(done) = pump.done.take() {
                pump.signal = None;
                if let Ok(receiver) = done.try_recv() {
                    pump.receiver = Some(receiver);
                }
            }
        }

        let receiver = pump.receiver.take().ok_or_else(|| {
            Error::endpoint(format!("endpoint {} has no message receiver", self.name))
        })?;

        let (signal_tx, signal_rx) = watch::channel(PumpSignal::Run);
        let (done_tx, done_rx) = std_mpsc::channel();
        self.running.store(true, Ordering::SeqCst);

        self.handle.spawn(pump_messages(
            self.name.clone(),
            receiver,
            Arc::clone(&self.handler),
            signal_rx,
            done_tx,
            Arc::clone(&self.running),
        ));

        pump.signal = Some(signal_tx);
        pump.done = Some(done_rx);
        debug!(endpoint = %self.name, "message pump started");
        Ok(())
    }

    fn stop(&self) -> Result<()> {
        let mut pump = self.pump.lock().unwrap();
        let Some(done) = pump.done.take() else {
            // Never started, or already stopped
            return Ok(());
        };
        if let Some(signal) = pump.signal.take() {
            // The send fails if the pump already exited on its own; the
            // receiver is still queued on the done channel either way
            let _ = signal.send(PumpSignal::Shutdown);
        }
        match done.recv() {
            Ok(receiver) => pump.receiver = Some(receiver),
            Err(_) => {
                return Err(Error::endpoint(format!(
                    "pump for {} exited without returning its receiver",
                    self.name
                )));
            }
        }
        debug!(endpoint = %self.name, "message pump stopped");
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    fn as_named(&self) -> Option<&dyn ComponentNamed> {
        Some(self)
    }

    fn as_pausable(&self) -> Option<&dyn Pausable> {
        Some(self)
    }
}

impl<M: Send + 'static> ComponentNamed for MpscEndpoint<M> {
    fn component_name(&self) -> &str {
        &self.name
    }
}

impl<M: Send + 'static> Pausable for MpscEndpoint<M> {
    fn pause(&self) -> Result<()> {
        self.signal(PumpSignal::Pause)
    }

    fn resume(&self) -> Result<()> {
        self.signal(PumpSignal::Run)
    }
}

impl<M: Send + 'static> MpscEndpoint<M> {
    fn signal(&self, signal: PumpSignal) -> Result<()> {
        let pump = self.pump.lock().unwrap();
        let not_running = || Error::endpoint(format!("endpoint {} is not running", self.name));
        match &pump.signal {
            Some(sender) => sender.send(signal).map_err(|_| not_running()),
            None => Err(not_running()),
        }
    }
}

/// Pump task: consume messages until shut down or the channel closes, then
/// hand the receiver back
async fn pump_messages<M: Send + 'static>(
    name: String,
    receiver: mpsc::Receiver<M>,
    handler: Arc<dyn MessageHandler<M>>,
    mut signal_rx: watch::Receiver<PumpSignal>,
    done_tx: std_mpsc::Sender<mpsc::Receiver<M>>,
    running: Arc<AtomicBool>,
) {
    let mut stream = ReceiverStream::new(receiver);
    loop {
        let signal = *signal_rx.borrow();
        match signal {
            PumpSignal::Shutdown => break,
            PumpSignal::Pause => {
                if signal_rx.changed().await.is_err() {
                    break;
                }
                continue;
            }
            PumpSignal::Run => {}
        }
        tokio::select! {
            changed = signal_rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            message = stream.next() => match message {
                Some(message) => {
                    if let Err(e) = handler.handle(message).await {
                        error!(endpoint = %name, "message handler failed: {e}");
                    }
                }
                None => {
                    debug!(endpoint = %name, "all senders dropped, pump exiting");
                    break;
                }
            },
        }
    }
    running.store(false, Ordering::SeqCst);
    // An unbounded std channel: this send never blocks, and the receiving
    // side may already be gone if the endpoint was dropped
    let _ = done_tx.send(stream.into_inner());
}
