//! Minimal embedding example for chanbind-core
//!
//! This example demonstrates using chanbind as a library in a custom
//! application: wire a channel and a message-pump endpoint, govern them
//! with a binding controller, and let the registry drive shutdown.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chanbind_core::{Binding, BindingConfig, BindingController, BindingRegistry, Result};
use chanbind_endpoint_mpsc::{MessageHandler, MpscEndpoint};
use tracing::info;

/// Handler that logs every consumed message
struct PrintingHandler {
    handled: AtomicUsize,
}

#[async_trait::async_trait]
impl MessageHandler<String> for PrintingHandler {
    async fn handle(&self, message: String) -> Result<()> {
        let n = self.handled.fetch_add(1, Ordering::SeqCst) + 1;
        info!("handled message #{n}: {message}");
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let runtime = tokio::runtime::Runtime::new()?;

    let config = BindingConfig::new("orders-in").with_group("grp1");
    let handler = Arc::new(PrintingHandler {
        handled: AtomicUsize::new(0),
    });
    let (sender, endpoint) = MpscEndpoint::channel(
        "orders-in.pump",
        64,
        handler.clone() as Arc<dyn MessageHandler<String>>,
        runtime.handle().clone(),
    )?;

    let binding = BindingController::from_config(&config, sender.clone(), Some(Box::new(endpoint)))?
        .with_unbind_hook(|| info!("orders-in cleanup hook ran"));
    info!("constructed {}", binding.describe());

    binding.start()?;

    runtime.block_on(async {
        for i in 0..3 {
            sender
                .send(format!("order-{i}"))
                .await
                .expect("pump is consuming");
        }
    });

    // Hold consumption briefly, then let the queued traffic through
    binding.pause()?;
    runtime.block_on(async {
        for i in 3..6 {
            sender
                .send(format!("order-{i}"))
                .await
                .expect("channel has capacity");
        }
    });
    binding.resume()?;

    let registry = BindingRegistry::new();
    registry.register(Arc::new(binding));

    // Give the pump a moment to drain before shutdown
    std::thread::sleep(std::time::Duration::from_millis(200));

    registry.unbind_all()?;
    info!(
        "all bindings unbound, handled {} messages",
        handler.handled.load(Ordering::SeqCst)
    );
    Ok(())
}
