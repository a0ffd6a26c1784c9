//! Cooperative shutdown signal shared by the background tasks.

use tokio::sync::watch;

/// Fires the shutdown signal. Dropping the trigger also counts as firing.
#[derive(Debug)]
pub struct ShutdownTrigger {
    tx: watch::Sender<bool>,
}

impl ShutdownTrigger {
    pub fn fire(&self) {
        self.tx.send_replace(true);
    }
}

/// Listener side; clone one into every task that must stop.
#[derive(Debug, Clone)]
pub struct Shutdown {
    rx: watch::Receiver<bool>,
}

impl Shutdown {
    /// Resolves once shutdown has been requested.
    pub async fn recv(&mut self) {
        // Err means the trigger is gone, which is a shutdown too
        let _ = self.rx.wait_for(|stop| *stop).await;
    }
}

/// Create a linked trigger/listener pair.
pub fn shutdown_channel() -> (ShutdownTrigger, Shutdown) {
    let (tx, rx) = watch::channel(false);
    (ShutdownTrigger { tx }, Shutdown { rx })
}
