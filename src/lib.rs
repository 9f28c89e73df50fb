//! Log bridge between a web view console and the host logging facility
//!
//! Outbound, console calls are passed through unchanged and also forwarded
//! to the host's leveled write operations. Inbound, host log events are
//! stripped of terminal escapes and replayed through the original console
//! functions. `Bridge::setup` installs both halves once at startup.

mod bridge;
mod config;
mod console;
mod error;
mod events;
mod format;
mod forward;
mod host;
mod publish;
mod relay;
mod sanitize;
mod severity;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use bridge::Bridge;
pub use config::{BridgeConfig, PublisherConfig, LOG_EVENT};
pub use console::{ConsoleBindings, ConsoleFn};
pub use error::BridgeError;
pub use events::{EventBus, EventSource, EventStream};
pub use format::{format_message, ConsoleArg, StructuredArg};
pub use forward::Forwarder;
pub use host::{DefaultHost, HostHandle, HostLogger, OpFuture, WriteFuture, WEBVIEW_TARGET};
pub use publish::WebviewPublisher;
pub use relay::{LogPayload, Relay, Subscription};
pub use sanitize::strip_ansi;
pub use severity::{ConsoleMethod, Severity};
