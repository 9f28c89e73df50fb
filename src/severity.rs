use crate::BridgeError;
use serde::{Deserialize, Serialize};

/// Severity of a log record, ordered by ascending urgency
///
/// Serialized as its numeric host code (1..=5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub enum Severity {
    Trace = 1,
    Debug = 2,
    Info = 3,
    Warn = 4,
    Error = 5,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Severity::Trace,
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
    ];

    /// Numeric code carried on host events
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Decode a numeric host code
    ///
    /// Anything outside 1..=5 is a protocol violation.
    pub fn from_code(code: i64) -> Result<Self, BridgeError> {
        match code {
            1 => Ok(Severity::Trace),
            2 => Ok(Severity::Debug),
            3 => Ok(Severity::Info),
            4 => Ok(Severity::Warn),
            5 => Ok(Severity::Error),
            other => Err(BridgeError::UnrecognizedSeverity(other)),
        }
    }

    /// Name of the host write operation for this severity
    pub fn host_op(self) -> &'static str {
        match self {
            Severity::Trace => "trace",
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
        }
    }

    /// Console function used to display records of this severity
    pub fn console_method(self) -> ConsoleMethod {
        match self {
            Severity::Trace => ConsoleMethod::Log,
            Severity::Debug => ConsoleMethod::Debug,
            Severity::Info => ConsoleMethod::Info,
            Severity::Warn => ConsoleMethod::Warn,
            Severity::Error => ConsoleMethod::Error,
        }
    }

    pub fn to_level(self) -> log::Level {
        match self {
            Severity::Trace => log::Level::Trace,
            Severity::Debug => log::Level::Debug,
            Severity::Info => log::Level::Info,
            Severity::Warn => log::Level::Warn,
            Severity::Error => log::Level::Error,
        }
    }
}

impl From<log::Level> for Severity {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Trace => Severity::Trace,
            log::Level::Debug => Severity::Debug,
            log::Level::Info => Severity::Info,
            log::Level::Warn => Severity::Warn,
            log::Level::Error => Severity::Error,
        }
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        severity.code()
    }
}

impl TryFrom<i64> for Severity {
    type Error = BridgeError;

    fn try_from(code: i64) -> Result<Self, BridgeError> {
        Severity::from_code(code)
    }
}

impl std::str::FromStr for Severity {
    type Err = BridgeError;

    /// Parse a host write operation name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Severity::Trace),
            "debug" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "warn" => Ok(Severity::Warn),
            "error" => Ok(Severity::Error),
            _ => Err(BridgeError::UnknownMethod(s.to_string())),
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Trace => write!(f, "TRACE"),
            Severity::Debug => write!(f, "DEBUG"),
            Severity::Info => write!(f, "INFO"),
            Severity::Warn => write!(f, "WARN"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// One of the five console functions the bridge wraps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsoleMethod {
    Log,
    Debug,
    Info,
    Warn,
    Error,
}

impl ConsoleMethod {
    pub const ALL: [ConsoleMethod; 5] = [
        ConsoleMethod::Log,
        ConsoleMethod::Debug,
        ConsoleMethod::Info,
        ConsoleMethod::Warn,
        ConsoleMethod::Error,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConsoleMethod::Log => "log",
            ConsoleMethod::Debug => "debug",
            ConsoleMethod::Info => "info",
            ConsoleMethod::Warn => "warn",
            ConsoleMethod::Error => "error",
        }
    }

    /// `console.log` forwards as trace
    pub fn severity(self) -> Severity {
        match self {
            ConsoleMethod::Log => Severity::Trace,
            ConsoleMethod::Debug => Severity::Debug,
            ConsoleMethod::Info => Severity::Info,
            ConsoleMethod::Warn => Severity::Warn,
            ConsoleMethod::Error => Severity::Error,
        }
    }
}

impl std::str::FromStr for ConsoleMethod {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "log" => Ok(ConsoleMethod::Log),
            "debug" => Ok(ConsoleMethod::Debug),
            "info" => Ok(ConsoleMethod::Info),
            "warn" => Ok(ConsoleMethod::Warn),
            "error" => Ok(ConsoleMethod::Error),
            _ => Err(BridgeError::UnknownMethod(s.to_string())),
        }
    }
}

impl std::fmt::Display for ConsoleMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encodings_are_bijective_and_ordered() {
        for (i, severity) in Severity::ALL.iter().enumerate() {
            let code = severity.code();
            assert_eq!(code as usize, i + 1);
            assert_eq!(Severity::from_code(code as i64).unwrap(), *severity);

            let method = severity.console_method();
            assert_eq!(method.severity(), *severity);
            assert_eq!(method, ConsoleMethod::ALL[i]);

            let parsed: Severity = severity.host_op().parse().unwrap();
            assert_eq!(parsed, *severity);
        }

        assert!(Severity::Trace < Severity::Debug);
        assert!(Severity::Warn < Severity::Error);
    }

    #[test]
    fn test_unrecognized_code() {
        for code in [0, 6, -1, 255] {
            assert_eq!(
                Severity::from_code(code),
                Err(BridgeError::UnrecognizedSeverity(code))
            );
        }
    }

    #[test]
    fn test_log_level_conversion() {
        for severity in Severity::ALL {
            assert_eq!(Severity::from(severity.to_level()), severity);
        }
        // log::Level puts Error first, Severity puts it last
        assert_eq!(Severity::from(log::Level::Error).code(), 5);
    }

    #[test]
    fn test_serde_uses_numeric_code() {
        assert_eq!(serde_json::to_string(&Severity::Warn).unwrap(), "4");
        let severity: Severity = serde_json::from_str("1").unwrap();
        assert_eq!(severity, Severity::Trace);
        assert!(serde_json::from_str::<Severity>("7").is_err());
    }

    #[test]
    fn test_console_method_names() {
        assert_eq!("log".parse::<ConsoleMethod>().unwrap(), ConsoleMethod::Log);
        assert_eq!(ConsoleMethod::Warn.to_string(), "warn");
        assert!("trace".parse::<ConsoleMethod>().is_err());
    }
}
