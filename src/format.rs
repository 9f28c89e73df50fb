//! Console argument formatting
//!
//! Turns the positional arguments of a console call into the single line
//! handed to the host sink. Every argument is followed by one space, so the
//! output carries a trailing space and no leading separator. Host-side log
//! lines depend on this exact shape.

use crate::BridgeError;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::fmt::Debug;
use std::sync::Arc;

/// A value that can be rendered in its structured (JSON) form
///
/// Implemented for every `Serialize + Debug` type. Rendering goes through
/// `serde_json::Value` so object keys come out sorted.
pub trait StructuredArg: Debug + Send + Sync {
    fn to_json(&self) -> Result<String, BridgeError>;
}

impl<T> StructuredArg for T
where
    T: Serialize + Debug + Send + Sync,
{
    fn to_json(&self) -> Result<String, BridgeError> {
        match serde_json::to_value(self)? {
            JsonValue::String(s) => Ok(s),
            value => Ok(serde_json::to_string(&whole_numbers(value))?),
        }
    }
}

/// Rewrite whole-valued floats as integers so `2.0` prints as `2`
fn whole_numbers(value: JsonValue) -> JsonValue {
    match value {
        JsonValue::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 9.0e18 => {
                JsonValue::from(f as i64)
            }
            _ => JsonValue::Number(n),
        },
        JsonValue::Array(items) => {
            JsonValue::Array(items.into_iter().map(whole_numbers).collect())
        }
        JsonValue::Object(map) => JsonValue::Object(
            map.into_iter()
                .map(|(key, value)| (key, whole_numbers(value)))
                .collect(),
        ),
        other => other,
    }
}

/// One positional argument of a console call
#[derive(Debug, Clone)]
pub enum ConsoleArg {
    /// Textual argument, rendered verbatim
    Text(String),
    /// JSON value; strings verbatim, everything else serialized
    Json(JsonValue),
    /// Explicitly absent value
    Undefined,
    /// Arbitrary structured value; rendering may fail
    Structured(Arc<dyn StructuredArg>),
}

impl ConsoleArg {
    /// Wrap any serializable value
    pub fn structured<T>(value: T) -> Self
    where
        T: Serialize + Debug + Send + Sync + 'static,
    {
        Self::Structured(Arc::new(value))
    }

    /// Render this argument for the host sink
    pub fn render(&self) -> Result<String, BridgeError> {
        match self {
            Self::Text(s) => Ok(s.clone()),
            Self::Json(JsonValue::String(s)) => Ok(s.clone()),
            Self::Json(value) => Ok(serde_json::to_string(&whole_numbers(value.clone()))?),
            Self::Undefined => Ok("undefined".to_string()),
            Self::Structured(value) => value.to_json(),
        }
    }

    /// Borrow the text if this is a textual argument
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Json(JsonValue::String(s)) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for ConsoleArg {
    /// Lenient rendering for developer-facing output
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.render() {
            Ok(s) => f.write_str(&s),
            Err(_) => write!(f, "{:?}", self),
        }
    }
}

// Convenience conversions

impl From<&str> for ConsoleArg {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for ConsoleArg {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<JsonValue> for ConsoleArg {
    fn from(value: JsonValue) -> Self {
        Self::Json(value)
    }
}

impl From<i64> for ConsoleArg {
    fn from(n: i64) -> Self {
        Self::Json(n.into())
    }
}

impl From<f64> for ConsoleArg {
    fn from(n: f64) -> Self {
        Self::Json(n.into())
    }
}

impl From<bool> for ConsoleArg {
    fn from(b: bool) -> Self {
        Self::Json(b.into())
    }
}

/// Join console arguments into one host-side message
///
/// Fails if any structured argument cannot be serialized; callers on the
/// outbound path treat that as "skip this forward".
pub fn format_message(args: &[ConsoleArg]) -> Result<String, BridgeError> {
    let mut out = String::new();

    for arg in args {
        out.push_str(&arg.render()?);
        out.push(' ');
    }

    Ok(out)
}
