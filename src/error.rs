use thiserror::Error;

/// Errors raised by the log bridge
///
/// Outbound failures never reach application code: formatting errors are
/// caught by the forwarder and host delivery errors are dropped. Only the
/// inbound relay and setup surface errors to their callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    // === Protocol violations (inbound) ===
    /// Host event carried a level outside 1..=5
    #[error("unrecognized severity code {0}")]
    UnrecognizedSeverity(i64),

    /// Host event payload was not `{ level: integer, message: string }`
    #[error("malformed log event payload: {0}")]
    MalformedPayload(String),

    // === Local failures ===
    /// Name did not match any console function or host write operation
    #[error("unknown log method '{0}'")]
    UnknownMethod(String),

    /// A console argument could not be serialized
    #[error("failed to format console argument: {0}")]
    Format(String),

    // === Setup ===
    /// Event source refused the subscription
    #[error("failed to subscribe to '{event}': {reason}")]
    Subscribe { event: String, reason: String },

    /// Configuration could not be parsed
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A global logger was already registered
    #[error("failed to install logger: {0}")]
    LoggerInstall(String),
}

impl BridgeError {
    /// Returns true if the host broke the event contract
    pub fn is_protocol_violation(&self) -> bool {
        matches!(
            self,
            Self::UnrecognizedSeverity(_) | Self::MalformedPayload(_)
        )
    }

    /// Returns true if the bridge keeps working after this error
    ///
    /// Setup failures leave the bridge uninstalled.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            Self::Subscribe { .. } | Self::Config(_) | Self::LoggerInstall(_)
        )
    }
}

impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Format(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(BridgeError::UnrecognizedSeverity(6).is_protocol_violation());
        assert!(BridgeError::MalformedPayload("x".into()).is_protocol_violation());
        assert!(!BridgeError::Format("x".into()).is_protocol_violation());

        assert!(BridgeError::UnrecognizedSeverity(0).is_recoverable());
        assert!(
            !BridgeError::Subscribe {
                event: "log://log".into(),
                reason: "closed".into()
            }
            .is_recoverable()
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(
            BridgeError::UnrecognizedSeverity(6).to_string(),
            "unrecognized severity code 6"
        );
    }
}
