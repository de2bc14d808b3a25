use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use obs_stream_notifier::{
    ConnectionError, ConnectionState, ConnectionSupervisor, DeliveryError, EventHandler,
    EventRouter, EventSource, LiveState, NotificationMessage, Notifier, PrometheusReporter,
    RawEvent, ReconnectPolicy, StreamStateTracker, StreamerProfile, TransitionOutcome,
    STREAM_STATE_CHANGED,
};

#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<String>>,
    fail_status: Option<u16>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, body: &str) -> Result<(), DeliveryError> {
        self.sent.lock().unwrap().push(body.to_string());
        match self.fail_status {
            Some(status) => Err(DeliveryError::Rejected {
                status,
                body: "error".to_string(),
            }),
            None => Ok(()),
        }
    }
}

impl RecordingNotifier {
    fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

/// Fake event source: scripted connect results, then delivers scripted
/// events synchronously through the registered handler and stays connected.
struct FakeSource {
    connects: VecDeque<Result<(), ConnectionError>>,
    events: Vec<RawEvent>,
    handler: Option<Arc<dyn EventHandler>>,
    attempts: Arc<Mutex<Vec<tokio::time::Instant>>>,
    delivered: mpsc::UnboundedSender<usize>,
}

#[async_trait]
impl EventSource for FakeSource {
    async fn connect(&mut self) -> Result<(), ConnectionError> {
        self.attempts.lock().unwrap().push(tokio::time::Instant::now());
        self.connects.pop_front().unwrap_or(Ok(()))
    }

    fn register_handler(&mut self, handler: Arc<dyn EventHandler>) {
        self.handler = Some(handler);
    }

    async fn run(&mut self) -> Result<(), ConnectionError> {
        let handler = self.handler.clone().ok_or(ConnectionError::NoHandler)?;
        let events = std::mem::take(&mut self.events);
        let count = events.len();
        for event in events {
            handler.handle(event).await;
        }
        let _ = self.delivered.send(count);
        std::future::pending().await
    }

    fn endpoint(&self) -> String {
        "fake://obs".to_string()
    }
}

fn state_event(active: bool, state: &str) -> RawEvent {
    RawEvent::new(
        STREAM_STATE_CHANGED,
        json!({ "outputActive": active, "outputState": state }),
    )
}

fn started() -> RawEvent {
    state_event(true, "OBS_WEBSOCKET_OUTPUT_STARTED")
}

fn stopped() -> RawEvent {
    state_event(false, "OBS_WEBSOCKET_OUTPUT_STOPPED")
}

fn profile() -> StreamerProfile {
    StreamerProfile::new("somebody".to_string()).unwrap()
}

fn router_with(notifier: Arc<RecordingNotifier>) -> Arc<EventRouter> {
    let metrics = Arc::new(PrometheusReporter::new());
    let tracker = StreamStateTracker::new(profile(), notifier, metrics.clone());
    Arc::new(EventRouter::new(tracker, metrics))
}

#[tokio::test]
async fn test_started_started_stopped_sends_online_then_offline() {
    let notifier = Arc::new(RecordingNotifier::default());
    let router = router_with(notifier.clone());

    for event in [started(), started(), stopped()] {
        router.handle(event).await;
    }

    let sent = notifier.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0], NotificationMessage::online(&profile()).body());
    assert_eq!(sent[1], NotificationMessage::offline().body());
    assert_eq!(router.live_state().await, LiveState::Offline);
}

#[tokio::test]
async fn test_repeated_started_events_are_idempotent() {
    let notifier = Arc::new(RecordingNotifier::default());
    let router = router_with(notifier.clone());

    for _ in 0..10 {
        router.handle(started()).await;
    }

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].contains("somebody"));
    assert!(sent[0].contains("https://www.twitch.tv/somebody"));
}

#[tokio::test]
async fn test_inconsistent_events_change_nothing() {
    let notifier = Arc::new(RecordingNotifier::default());
    let router = router_with(notifier.clone());

    router
        .handle(state_event(true, "OBS_WEBSOCKET_OUTPUT_STOPPED"))
        .await;
    router
        .handle(state_event(false, "OBS_WEBSOCKET_OUTPUT_STARTED"))
        .await;
    router
        .handle(state_event(true, "OBS_WEBSOCKET_OUTPUT_STARTING"))
        .await;

    assert!(notifier.sent().is_empty());
    assert_eq!(router.live_state().await, LiveState::Offline);
}

#[tokio::test]
async fn test_malformed_events_are_skipped() {
    let notifier = Arc::new(RecordingNotifier::default());
    let router = router_with(notifier.clone());

    router
        .handle(RawEvent::new(STREAM_STATE_CHANGED, json!({})))
        .await;
    router
        .handle(RawEvent::new(STREAM_STATE_CHANGED, json!({"outputActive": 1, "outputState": 2})))
        .await;
    router.handle(started()).await;

    assert_eq!(notifier.sent().len(), 1);
}

#[tokio::test]
async fn test_delivery_failure_does_not_roll_back_state() {
    let notifier = Arc::new(RecordingNotifier {
        fail_status: Some(500),
        ..Default::default()
    });
    let metrics = Arc::new(PrometheusReporter::new());
    let mut tracker = StreamStateTracker::new(profile(), notifier.clone(), metrics);

    let outcome = tracker.mark_live().await;
    assert_eq!(
        outcome,
        TransitionOutcome::NotificationFailed(DeliveryError::Rejected {
            status: 500,
            body: "error".to_string(),
        })
    );
    assert_eq!(tracker.state(), LiveState::Live);

    assert!(matches!(
        tracker.mark_offline().await,
        TransitionOutcome::NotificationFailed(_)
    ));
    assert_eq!(tracker.state(), LiveState::Offline);
    assert_eq!(notifier.sent().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_supervisor_retries_with_fixed_delay_then_routes_events() {
    let notifier = Arc::new(RecordingNotifier::default());
    let router = router_with(notifier.clone());
    let attempts = Arc::new(Mutex::new(Vec::new()));
    let (delivered_tx, mut delivered_rx) = mpsc::unbounded_channel();

    let failures = 3;
    let source = FakeSource {
        connects: (0..failures)
            .map(|i| {
                Err(ConnectionError::Connect {
                    endpoint: "fake://obs".to_string(),
                    reason: format!("refused #{}", i),
                })
            })
            .collect(),
        events: vec![started(), started(), stopped()],
        handler: None,
        attempts: attempts.clone(),
        delivered: delivered_tx,
    };

    let mut supervisor = ConnectionSupervisor::new(
        Box::new(source),
        router.clone(),
        ReconnectPolicy::default(),
        Arc::new(PrometheusReporter::new()),
    );

    let shutdown = CancellationToken::new();
    let task = tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            supervisor.run_with_reconnect(shutdown).await;
            supervisor
        }
    });

    assert_eq!(delivered_rx.recv().await, Some(3));

    {
        let attempts = attempts.lock().unwrap();
        assert_eq!(attempts.len(), failures + 1);
        for pair in attempts.windows(2) {
            let gap = pair[1] - pair[0];
            assert!(gap >= Duration::from_secs(5), "gap too short: {:?}", gap);
            assert!(gap < Duration::from_millis(5100), "gap too long: {:?}", gap);
        }
    }

    let sent = notifier.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0], NotificationMessage::online(&profile()).body());
    assert_eq!(sent[1], NotificationMessage::offline().body());

    shutdown.cancel();
    let supervisor = task.await.unwrap();
    assert_eq!(supervisor.current_state(), ConnectionState::Stopped);
    assert_eq!(supervisor.lifecycle().failed_attempts(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_supervisor_reconnects_after_disconnect() {
    struct FlakySource {
        runs: usize,
        attempts: Arc<Mutex<usize>>,
    }

    #[async_trait]
    impl EventSource for FlakySource {
        async fn connect(&mut self) -> Result<(), ConnectionError> {
            *self.attempts.lock().unwrap() += 1;
            Ok(())
        }

        fn register_handler(&mut self, _handler: Arc<dyn EventHandler>) {}

        async fn run(&mut self) -> Result<(), ConnectionError> {
            self.runs += 1;
            if self.runs < 3 {
                tokio::time::sleep(Duration::from_secs(1)).await;
                return Err(ConnectionError::Closed("peer went away".to_string()));
            }
            std::future::pending().await
        }

        fn endpoint(&self) -> String {
            "flaky://obs".to_string()
        }
    }

    let attempts = Arc::new(Mutex::new(0));
    let notifier = Arc::new(RecordingNotifier::default());
    let mut supervisor = ConnectionSupervisor::new(
        Box::new(FlakySource {
            runs: 0,
            attempts: attempts.clone(),
        }),
        router_with(notifier),
        ReconnectPolicy::default(),
        Arc::new(PrometheusReporter::new()),
    );

    let shutdown = CancellationToken::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        // Two 1s sessions and two 5s delays fit well inside 30s
        tokio::time::sleep(Duration::from_secs(30)).await;
        trigger.cancel();
    });

    supervisor.run_with_reconnect(shutdown).await;

    assert_eq!(*attempts.lock().unwrap(), 3);
    assert_eq!(supervisor.current_state(), ConnectionState::Stopped);
}
