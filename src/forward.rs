//! Outbound forwarding: web view console → host logging facility
//!
//! A decorated console function calls the original first, then formats the
//! arguments and invokes the host write for the matching severity. The
//! write is invoked synchronously, so same-severity calls reach the host in
//! call order; the returned future is handed to a delivery task that starts
//! it right away in its own task and drops any failure. A write that never
//! resolves does not hold back the ones issued after it.

use crate::{
    format_message, ConsoleArg, ConsoleBindings, ConsoleFn, ConsoleMethod, HostHandle, Severity,
    WriteFuture,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};

/// Forwards console calls to the host
///
/// The delivery task exits once every clone of the forwarder (including
/// those captured by decorated console functions) has been dropped.
pub struct Forwarder {
    host: HostHandle,
    pending: mpsc::UnboundedSender<WriteFuture>,
}

impl Forwarder {
    /// Create a forwarder and spawn its delivery task
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(host: HostHandle) -> (Arc<Self>, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::unbounded_channel::<WriteFuture>();

        let delivery = tokio::spawn(async move {
            let mut in_flight = JoinSet::new();

            while let Some(write) = rx.recv().await {
                // Delivery is best-effort
                in_flight.spawn(async move {
                    let _ = write.await;
                });
                while in_flight.try_join_next().is_some() {}
            }

            while in_flight.join_next().await.is_some() {}
        });

        let forwarder = Arc::new(Self { host, pending: tx });
        (forwarder, delivery)
    }

    /// Forward one console call to the host write for `severity`
    ///
    /// Never fails: an argument that cannot be formatted skips the forward.
    pub fn forward(&self, severity: Severity, args: &[ConsoleArg]) {
        let message = match format_message(args) {
            Ok(message) => message,
            Err(err) => {
                log::trace!("skipping {} forward: {}", severity.host_op(), err);
                return;
            }
        };

        let write = self.host.write(severity, message);

        if self.pending.send(write).is_err() {
            log::trace!("delivery task gone, dropping {} write", severity.host_op());
        }
    }

    /// Wrap one original console function
    pub fn decorate(self: &Arc<Self>, method: ConsoleMethod, original: ConsoleFn) -> ConsoleFn {
        let forwarder = self.clone();
        let severity = method.severity();

        Arc::new(move |args: &[ConsoleArg]| {
            original(args);
            forwarder.forward(severity, args);
        })
    }

    /// Wrap all five console functions
    pub fn decorate_all(self: &Arc<Self>, originals: &ConsoleBindings) -> ConsoleBindings {
        ConsoleBindings::from_methods(|method| self.decorate(method, originals.get(method).clone()))
    }
}

impl std::fmt::Debug for Forwarder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Forwarder")
            .field("host_target", &self.host.target())
            .finish_non_exhaustive()
    }
}
