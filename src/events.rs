use crate::{BridgeError, OpFuture};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::mpsc;

/// Receiving end of a named event stream
pub type EventStream = mpsc::UnboundedReceiver<JsonValue>;

/// Host-to-webview event channel
pub trait EventSource: Send + Sync {
    /// Subscribe to the named stream
    ///
    /// Resolves once the subscription is active.
    fn listen(&self, event: &str) -> OpFuture<'_, Result<EventStream, BridgeError>>;
}

/// In-process event channel
///
/// Payloads emitted before anyone listens are dropped.
#[derive(Debug, Default)]
pub struct EventBus {
    listeners: Mutex<HashMap<String, Vec<mpsc::UnboundedSender<JsonValue>>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver a payload to every live listener of `event`
    ///
    /// Returns how many listeners received it.
    pub fn emit(&self, event: &str, payload: JsonValue) -> usize {
        let mut listeners = match self.listeners.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        let Some(senders) = listeners.get_mut(event) else {
            return 0;
        };

        senders.retain(|tx| tx.send(payload.clone()).is_ok());
        senders.len()
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners
            .lock()
            .map(|l| l.get(event).map_or(0, |s| s.iter().filter(|tx| !tx.is_closed()).count()))
            .unwrap_or(0)
    }
}

impl EventSource for EventBus {
    fn listen(&self, event: &str) -> OpFuture<'_, Result<EventStream, BridgeError>> {
        let (tx, rx) = mpsc::unbounded_channel();

        let result = match self.listeners.lock() {
            Ok(mut listeners) => {
                listeners.entry(event.to_string()).or_default().push(tx);
                Ok(rx)
            }
            Err(_) => Err(BridgeError::Subscribe {
                event: event.to_string(),
                reason: "listener table poisoned".to_string(),
            }),
        };

        Box::pin(async move { result })
    }
}
