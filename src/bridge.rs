use crate::{
    BridgeConfig, BridgeError, ConsoleBindings, EventSource, Forwarder, HostHandle, Relay,
    Subscription,
};

/// Process-scoped log bridge context
///
/// Created once by `Bridge::setup` and held by the application's startup
/// routine for the lifetime of the process. There is no teardown.
#[derive(Debug)]
pub struct Bridge {
    originals: ConsoleBindings,
    subscription: Subscription,
}

impl Bridge {
    /// Install the bridge
    ///
    /// Decorates the original console functions first, then subscribes the
    /// relay. Returns the context and the decorated console, which the
    /// caller installs in place of the originals. Await this before any
    /// other startup work so no early console output is missed.
    ///
    /// Calling this more than once produces independent bridges that each
    /// forward and relay; callers are expected to run it exactly once.
    pub async fn setup(
        config: &BridgeConfig,
        originals: ConsoleBindings,
        host: HostHandle,
        events: &dyn EventSource,
    ) -> Result<(Self, ConsoleBindings), BridgeError> {
        let (forwarder, _delivery) = Forwarder::spawn(host);
        let decorated = forwarder.decorate_all(&originals);

        let subscription = Relay::new(originals.clone())
            .subscribe(events, &config.event)
            .await?;

        let bridge = Self {
            originals,
            subscription,
        };

        Ok((bridge, decorated))
    }

    /// Console functions as they were before decoration
    pub fn originals(&self) -> &ConsoleBindings {
        &self.originals
    }

    pub fn subscription(&self) -> &Subscription {
        &self.subscription
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{settle, ConsoleCall, RecordingConsole, RecordingHost};
    use crate::{
        ConsoleMethod, DefaultHost, EventBus, EventStream, LogPayload, OpFuture, PublisherConfig,
        Severity, WebviewPublisher,
    };
    use log::{Level, Log, Record};
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_setup_wires_both_directions() {
        let bus = EventBus::new();
        let host = RecordingHost::new();
        let console = RecordingConsole::new();

        let (bridge, decorated) = Bridge::setup(
            &BridgeConfig::default(),
            console.bindings(),
            host.handle(),
            &bus,
        )
        .await
        .unwrap();

        assert_eq!(bridge.subscription().event(), "log://log");
        assert_eq!(bus.listener_count("log://log"), 1);

        decorated.info(&["from".into(), "webview".into()]);
        bus.emit("log://log", json!({ "level": 2, "message": "from host" }));
        settle().await;

        assert_eq!(
            host.writes(),
            vec![(Severity::Info, "from webview ".to_string())]
        );
        assert_eq!(
            console.calls(),
            vec![
                ConsoleCall {
                    method: ConsoleMethod::Info,
                    args: vec!["from".to_string(), "webview".to_string()],
                },
                ConsoleCall {
                    method: ConsoleMethod::Debug,
                    args: vec!["from host".to_string()],
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_relay_does_not_feed_back_into_host() {
        let bus = EventBus::new();
        let host = RecordingHost::new();
        let console = RecordingConsole::new();

        let (bridge, _decorated) = Bridge::setup(
            &BridgeConfig::default(),
            console.bindings(),
            host.handle(),
            &bus,
        )
        .await
        .unwrap();

        for severity in Severity::ALL {
            bus.emit(
                "log://log",
                serde_json::to_value(LogPayload::new(severity, "host says")).unwrap(),
            );
        }
        settle().await;

        assert_eq!(console.calls().len(), 5);
        assert!(host.writes().is_empty());
        assert!(bridge.subscription().is_active());
    }

    #[tokio::test]
    async fn test_originals_are_kept_undecorated() {
        let bus = EventBus::new();
        let host = RecordingHost::new();
        let console = RecordingConsole::new();

        let (bridge, _decorated) = Bridge::setup(
            &BridgeConfig::default(),
            console.bindings(),
            host.handle(),
            &bus,
        )
        .await
        .unwrap();

        bridge.originals().warn(&["direct".into()]);

        assert_eq!(console.calls().len(), 1);
        assert!(host.writes().is_empty());
    }

    #[tokio::test]
    async fn test_webview_output_is_not_echoed() {
        // Host side: DefaultHost writes under "webview", the publisher skips it
        let bus = Arc::new(EventBus::new());
        let publisher = WebviewPublisher::new(PublisherConfig::default(), bus.clone());
        let console = RecordingConsole::new();

        let config = BridgeConfig::default();
        let (_bridge, _decorated) = Bridge::setup(
            &config,
            console.bindings(),
            Arc::new(DefaultHost::from(&config)),
            &*bus,
        )
        .await
        .unwrap();

        publisher.log(
            &Record::builder()
                .level(Level::Info)
                .target("webview")
                .args(format_args!("clicked "))
                .build(),
        );
        publisher.log(
            &Record::builder()
                .level(Level::Info)
                .target("app_lib::window")
                .args(format_args!("\u{1b}[32mshown\u{1b}[0m"))
                .build(),
        );
        settle().await;

        let calls = console.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, ConsoleMethod::Info);
        assert!(calls[0].args[0].ends_with("INFO app_lib::window] shown"));
    }

    struct ClosedSource;

    impl EventSource for ClosedSource {
        fn listen(&self, event: &str) -> OpFuture<'_, Result<EventStream, BridgeError>> {
            let err = BridgeError::Subscribe {
                event: event.to_string(),
                reason: "channel closed".to_string(),
            };
            Box::pin(async move { Err(err) })
        }
    }

    #[tokio::test]
    async fn test_setup_fails_when_subscription_is_refused() {
        let console = RecordingConsole::new();
        let result = Bridge::setup(
            &BridgeConfig::default(),
            console.bindings(),
            RecordingHost::new().handle(),
            &ClosedSource,
        )
        .await;

        let err = result.unwrap_err();
        assert!(matches!(err, BridgeError::Subscribe { .. }));
        assert!(!err.is_recoverable());
    }
}
