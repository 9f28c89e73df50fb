//! Host logging facility
//!
//! The host exposes five leveled write operations. Each takes one formatted
//! message and returns a future whose outcome the bridge never observes.
//!
//! ## Default behavior
//!
//! All write methods have defaults that hand the message to the `log`
//! facade under `HostLogger::target()` and resolve immediately. Hosts only
//! need to override the operations they route elsewhere.

use crate::{BridgeConfig, Severity};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Target used for records that came from the web view console
pub const WEBVIEW_TARGET: &str = "webview";

/// Boxed future returned by host and event-source calls
pub type OpFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Completion of a single host write
///
/// Owns everything it needs so it can outlive the call that produced it.
pub type WriteFuture = OpFuture<'static, Result<(), String>>;

/// Host-side sink for forwarded console output
///
/// # Example
///
/// ```ignore
/// struct FileHost;
///
/// impl HostLogger for FileHost {
///     // Only errors go to a file, the rest use the log facade
///     fn error(&self, message: String) -> WriteFuture {
///         Box::pin(async move {
///             // append `message` somewhere durable
///             Ok(())
///         })
///     }
/// }
/// ```
pub trait HostLogger: Send + Sync {
    /// Target recorded on log facade writes
    fn target(&self) -> &str {
        WEBVIEW_TARGET
    }

    fn trace(&self, message: String) -> WriteFuture {
        emit(self.target(), Severity::Trace, message)
    }

    fn debug(&self, message: String) -> WriteFuture {
        emit(self.target(), Severity::Debug, message)
    }

    fn info(&self, message: String) -> WriteFuture {
        emit(self.target(), Severity::Info, message)
    }

    fn warn(&self, message: String) -> WriteFuture {
        emit(self.target(), Severity::Warn, message)
    }

    fn error(&self, message: String) -> WriteFuture {
        emit(self.target(), Severity::Error, message)
    }

    /// Route a write to the leveled operation for `severity`
    ///
    /// The forwarder always goes through here.
    fn write(&self, severity: Severity, message: String) -> WriteFuture {
        match severity {
            Severity::Trace => self.trace(message),
            Severity::Debug => self.debug(message),
            Severity::Info => self.info(message),
            Severity::Warn => self.warn(message),
            Severity::Error => self.error(message),
        }
    }
}

/// The record is written before the future is returned
fn emit(target: &str, severity: Severity, message: String) -> WriteFuture {
    log::log!(target: target, severity.to_level(), "{}", message);
    Box::pin(async { Ok(()) })
}

/// Shared host logger, held by the forwarder and its decorated functions
pub type HostHandle = Arc<dyn HostLogger>;

/// Host that writes everything through the `log` facade
#[derive(Debug, Clone)]
pub struct DefaultHost {
    target: String,
}

impl DefaultHost {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }
}

impl Default for DefaultHost {
    fn default() -> Self {
        Self::new(WEBVIEW_TARGET)
    }
}

impl From<&BridgeConfig> for DefaultHost {
    fn from(config: &BridgeConfig) -> Self {
        Self::new(config.host_target.clone())
    }
}

impl HostLogger for DefaultHost {
    fn target(&self) -> &str {
        &self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingHost;

    #[tokio::test]
    async fn test_write_dispatches_by_severity() {
        let host = RecordingHost::new();

        for severity in Severity::ALL {
            host.write(severity, severity.host_op().to_string())
                .await
                .unwrap();
        }

        assert_eq!(
            host.writes(),
            vec![
                (Severity::Trace, "trace".to_string()),
                (Severity::Debug, "debug".to_string()),
                (Severity::Info, "info".to_string()),
                (Severity::Warn, "warn".to_string()),
                (Severity::Error, "error".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_default_host_resolves() {
        let host = DefaultHost::default();
        assert_eq!(host.target(), "webview");
        assert!(host.warn("careful".to_string()).await.is_ok());

        let config = BridgeConfig {
            host_target: "webview::main".to_string(),
            ..BridgeConfig::default()
        };
        assert_eq!(DefaultHost::from(&config).target(), "webview::main");
    }
}
