use crate::{BridgeError, WEBVIEW_TARGET};
use log::LevelFilter;
use serde::{Deserialize, Serialize};

/// Name of the host-to-webview log event stream
pub const LOG_EVENT: &str = "log://log";

/// Bridge configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Event stream the relay subscribes to (default: "log://log")
    pub event: String,
    /// Log target for forwarded console output (default: "webview")
    pub host_target: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            event: LOG_EVENT.to_string(),
            host_target: WEBVIEW_TARGET.to_string(),
        }
    }
}

impl BridgeConfig {
    pub fn from_json(json: &str) -> Result<Self, BridgeError> {
        serde_json::from_str(json).map_err(|e| BridgeError::Config(e.to_string()))
    }
}

/// Host-side publisher configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublisherConfig {
    /// Event stream records are published on (default: "log://log")
    pub event: String,
    /// Most verbose level published (default: Debug in debug builds, Info otherwise)
    pub level: LevelFilter,
    /// Targets never published back to the web view
    pub excluded_targets: Vec<String>,
    /// chrono format for the timestamp prefix
    pub time_format: String,
}

#[cfg(debug_assertions)]
const DEFAULT_LEVEL: LevelFilter = LevelFilter::Debug;

#[cfg(not(debug_assertions))]
const DEFAULT_LEVEL: LevelFilter = LevelFilter::Info;

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            event: LOG_EVENT.to_string(),
            level: DEFAULT_LEVEL,
            // Forwarded console output must not echo back; graphics
            // backends are too chatty for the console
            excluded_targets: vec![
                WEBVIEW_TARGET.to_string(),
                "log@".to_string(),
                "wgpu_core::".to_string(),
                "naga::".to_string(),
                "wgpu_hal::".to_string(),
            ],
            time_format: "%m.%d %H:%M:%S".to_string(),
        }
    }
}

impl PublisherConfig {
    pub fn from_json(json: &str) -> Result<Self, BridgeError> {
        serde_json::from_str(json).map_err(|e| BridgeError::Config(e.to_string()))
    }

    /// True if records from `target` may be published
    pub fn allows_target(&self, target: &str) -> bool {
        !self
            .excluded_targets
            .iter()
            .any(|prefix| target.starts_with(prefix.as_str()))
    }
}
