//! Test utilities for the log bridge
//!
//! Recording doubles for both collaborators of the bridge: the host
//! logging facility and the web view console.
//!
//! # Usage
//!
//! ```ignore
//! use console_bridge::testing::{RecordingConsole, RecordingHost};
//!
//! let host = RecordingHost::new();
//! let console = RecordingConsole::new();
//! let (bridge, decorated) =
//!     Bridge::setup(&config, console.bindings(), host.handle(), &bus).await?;
//! ```

use crate::{ConsoleArg, ConsoleBindings, ConsoleMethod, HostHandle, HostLogger, Severity, WriteFuture};
use std::sync::{Arc, Mutex};

/// Host that records every write
///
/// With `failing()`, every write resolves to an error after recording.
#[derive(Clone, Default)]
pub struct RecordingHost {
    writes: Arc<Mutex<Vec<(Severity, String)>>>,
    fail: bool,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn handle(&self) -> HostHandle {
        Arc::new(self.clone())
    }

    /// Writes seen so far, in invocation order
    pub fn writes(&self) -> Vec<(Severity, String)> {
        self.writes.lock().unwrap().clone()
    }

    fn record(&self, severity: Severity, message: String) -> WriteFuture {
        self.writes.lock().unwrap().push((severity, message.clone()));

        let fail = self.fail;
        Box::pin(async move {
            if fail {
                Err(format!("host rejected {} write: {}", severity.host_op(), message))
            } else {
                Ok(())
            }
        })
    }
}

impl HostLogger for RecordingHost {
    fn trace(&self, message: String) -> WriteFuture {
        self.record(Severity::Trace, message)
    }

    fn debug(&self, message: String) -> WriteFuture {
        self.record(Severity::Debug, message)
    }

    fn info(&self, message: String) -> WriteFuture {
        self.record(Severity::Info, message)
    }

    fn warn(&self, message: String) -> WriteFuture {
        self.record(Severity::Warn, message)
    }

    fn error(&self, message: String) -> WriteFuture {
        self.record(Severity::Error, message)
    }
}

/// A console call as seen by the original console function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleCall {
    pub method: ConsoleMethod,
    /// Arguments rendered with `Display`
    pub args: Vec<String>,
}

/// Console whose functions record their calls
#[derive(Clone, Default)]
pub struct RecordingConsole {
    calls: Arc<Mutex<Vec<ConsoleCall>>>,
}

impl RecordingConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bindings(&self) -> ConsoleBindings {
        let calls = self.calls.clone();
        ConsoleBindings::from_fn(move |method, args: &[ConsoleArg]| {
            calls.lock().unwrap().push(ConsoleCall {
                method,
                args: args.iter().map(|arg| arg.to_string()).collect(),
            });
        })
    }

    pub fn calls(&self) -> Vec<ConsoleCall> {
        self.calls.lock().unwrap().clone()
    }
}

/// Let spawned tasks on the current-thread runtime run to idle
pub async fn settle() {
    for _ in 0..32 {
        tokio::task::yield_now().await;
    }
}
