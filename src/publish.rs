//! Host-side publisher: `log` records → web view event stream
//!
//! Records are formatted as `[date LEVEL target] message` and emitted as
//! `LogPayload`s. Forwarded console output is written under the webview
//! target, which is excluded by default; that exclusion keeps a console
//! call from coming back as a second, relayed copy.

use crate::{BridgeError, EventBus, LogPayload, PublisherConfig, Severity};
use log::{Log, Metadata, Record};
use std::sync::Arc;

/// `log::Log` implementation publishing onto an `EventBus`
pub struct WebviewPublisher {
    config: PublisherConfig,
    bus: Arc<EventBus>,
}

impl WebviewPublisher {
    pub fn new(config: PublisherConfig, bus: Arc<EventBus>) -> Self {
        Self { config, bus }
    }

    /// Register as the process-wide logger
    ///
    /// Fails if another logger is already installed.
    pub fn install(self) -> Result<(), BridgeError> {
        let level = self.config.level;
        log::set_boxed_logger(Box::new(self))
            .map_err(|e| BridgeError::LoggerInstall(e.to_string()))?;
        log::set_max_level(level);
        Ok(())
    }

    /// Build the payload published for `record`
    pub fn payload(&self, record: &Record<'_>) -> LogPayload {
        let message = format!(
            "[{date} {level} {target}] {message}",
            date = chrono::Local::now().format(&self.config.time_format),
            level = record.level(),
            target = record.target(),
            message = record.args(),
        );

        LogPayload::new(Severity::from(record.level()), message)
    }
}

impl Log for WebviewPublisher {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.config.level && self.config.allows_target(metadata.target())
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let payload = self.payload(record);
        if let Ok(value) = serde_json::to_value(&payload) {
            self.bus.emit(&self.config.event, value);
        }
    }

    fn flush(&self) {}
}
