//! Inbound relay: host log events → original web view console
//!
//! Every event is dispatched through the *original* console functions, so
//! relayed records never pass back through the outbound forwarder.

use crate::{strip_ansi, BridgeError, ConsoleArg, ConsoleBindings, EventSource, EventStream, Severity};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;
use tokio::task::JoinHandle;

/// Payload of a host log event
///
/// `level` is kept raw so an out-of-range code is reported as a severity
/// error rather than a generic decoding error. Whole-valued floats such as
/// `3.0` are accepted as their integer code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogPayload {
    #[serde(deserialize_with = "level_code")]
    pub level: i64,
    pub message: String,
}

fn level_code<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(code) = number.as_i64() {
        return Ok(code);
    }

    match number.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 9.0e18 => Ok(f as i64),
        _ => Err(D::Error::custom(format!("level {} is not a whole number", number))),
    }
}

impl LogPayload {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            level: severity.code() as i64,
            message: message.into(),
        }
    }

    pub fn severity(&self) -> Result<Severity, BridgeError> {
        Severity::from_code(self.level)
    }
}

/// Re-emits host log events through the original console functions
#[derive(Debug, Clone)]
pub struct Relay {
    originals: ConsoleBindings,
}

impl Relay {
    pub fn new(originals: ConsoleBindings) -> Self {
        Self { originals }
    }

    /// Handle one event payload
    ///
    /// Fails without touching the console if the payload is malformed or
    /// carries an unrecognized level.
    pub fn dispatch(&self, payload: JsonValue) -> Result<Severity, BridgeError> {
        let payload: LogPayload = serde_json::from_value(payload)
            .map_err(|e| BridgeError::MalformedPayload(e.to_string()))?;

        self.dispatch_payload(&payload)
    }

    pub fn dispatch_payload(&self, payload: &LogPayload) -> Result<Severity, BridgeError> {
        let severity = payload.severity()?;
        let message = strip_ansi(&payload.message);

        self.originals.call(
            severity.console_method(),
            &[ConsoleArg::Text(message.into_owned())],
        );

        Ok(severity)
    }

    /// Subscribe to `event` and relay every payload until the stream closes
    ///
    /// Returns once the event source confirms the subscription.
    pub async fn subscribe(
        self,
        events: &dyn EventSource,
        event: &str,
    ) -> Result<Subscription, BridgeError> {
        let stream = events.listen(event).await?;
        let task = tokio::spawn(self.run(stream));

        log::debug!("relaying host logs from '{}'", event);

        Ok(Subscription {
            event: event.to_string(),
            task,
        })
    }

    async fn run(self, mut stream: EventStream) {
        while let Some(payload) = stream.recv().await {
            if let Err(err) = self.dispatch(payload) {
                log::error!("dropped host log event: {}", err);
            }
        }
    }
}

/// Handle to the active relay subscription
#[derive(Debug)]
pub struct Subscription {
    event: String,
    task: JoinHandle<()>,
}

impl Subscription {
    /// Name of the subscribed event stream
    pub fn event(&self) -> &str {
        &self.event
    }

    /// False once the event stream has closed
    pub fn is_active(&self) -> bool {
        !self.task.is_finished()
    }
}
