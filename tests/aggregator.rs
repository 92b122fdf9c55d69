//! End-to-end scenarios for the polling aggregator against a scriptable
//! backend stub.

use dashboard_aggregator::{
    AggregateState, ApiError, DashboardApi, DataAggregator, Resource, Subscription,
};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};
use tokio::time::{sleep, timeout};

const RECV_TIMEOUT: Duration = Duration::from_secs(5);
// Long enough that only the mount cycle and explicit refreshes run.
const IDLE_INTERVAL: Duration = Duration::from_secs(3600);

/// Scriptable backend: optional per-call delay and an optional resource
/// whose endpoint answers 500.
struct StubApi {
    delay: Duration,
    failing: Mutex<Option<Resource>>,
}

impl StubApi {
    fn new() -> Self {
        Self::with_delay(Duration::ZERO)
    }

    fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            failing: Mutex::new(None),
        }
    }

    fn fail_resource(&self, resource: Resource) {
        *self.failing.lock().unwrap() = Some(resource);
    }
}

#[async_trait::async_trait]
impl DashboardApi for StubApi {
    async fn fetch_resource(&self, resource: Resource) -> Result<Value, ApiError> {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
        if *self.failing.lock().unwrap() == Some(resource) {
            return Err(ApiError::Http {
                status: 500,
                message: "internal server error".to_string(),
            });
        }
        Ok(json!({}))
    }
}

fn start_with_channel(
    api: Arc<StubApi>,
    interval: Duration,
) -> (Subscription, UnboundedReceiver<AggregateState>) {
    let _ = env_logger::builder().is_test(true).try_init();
    let (tx, rx) = unbounded_channel();
    let subscription = DataAggregator::with_interval(api, interval).start(move |state| {
        let _ = tx.send(state);
    });
    (subscription, rx)
}

async fn next_state(rx: &mut UnboundedReceiver<AggregateState>) -> AggregateState {
    timeout(RECV_TIMEOUT, rx.recv())
        .await
        .expect("timed out waiting for a cycle notification")
        .expect("aggregator dropped the notification channel")
}

#[tokio::test]
async fn mount_with_healthy_backend_populates_every_resource() {
    let api = Arc::new(StubApi::new());
    let (subscription, mut rx) = start_with_channel(api, IDLE_INTERVAL);

    let state = next_state(&mut rx).await;
    assert!(!state.loading);
    assert!(state.error.is_none());
    assert!(state.last_updated.is_some());
    for resource in Resource::ALL {
        assert_eq!(state.resources.get(resource), Some(&json!({})));
    }
    assert_eq!(subscription.state(), state);
}

#[tokio::test]
async fn mount_with_failing_endpoint_leaves_resources_absent() {
    let api = Arc::new(StubApi::new());
    api.fail_resource(Resource::Rewriter);
    let (_subscription, mut rx) = start_with_channel(api, IDLE_INTERVAL);

    let state = next_state(&mut rx).await;
    assert!(!state.loading);
    assert!(!state.error.clone().unwrap_or_default().is_empty());
    assert!(state.last_updated.is_none());
    for resource in Resource::ALL {
        assert!(state.resources.get(resource).is_none());
    }
}

#[tokio::test]
async fn failed_refresh_retains_values_from_last_successful_cycle() {
    let api = Arc::new(StubApi::new());
    let (subscription, mut rx) = start_with_channel(api.clone(), IDLE_INTERVAL);

    let first = next_state(&mut rx).await;
    assert!(first.error.is_none());

    api.fail_resource(Resource::Adoption);
    subscription.refresh();

    let second = next_state(&mut rx).await;
    assert!(second.error.is_some());
    // Stale-but-present: the earlier values and their timestamp survive.
    assert_eq!(second.resources, first.resources);
    assert_eq!(second.last_updated, first.last_updated);
}

#[tokio::test]
async fn recovery_after_failed_cycle_clears_error() {
    let api = Arc::new(StubApi::new());
    api.fail_resource(Resource::Status);
    let (subscription, mut rx) = start_with_channel(api.clone(), IDLE_INTERVAL);

    let failed = next_state(&mut rx).await;
    assert!(failed.error.is_some());

    *api.failing.lock().unwrap() = None;
    subscription.refresh();

    let recovered = next_state(&mut rx).await;
    assert!(recovered.error.is_none());
    assert!(recovered.last_updated.is_some());
    for resource in Resource::ALL {
        assert!(recovered.resources.get(resource).is_some());
    }
}

#[tokio::test]
async fn cancel_suppresses_notification_from_in_flight_cycle() {
    let api = Arc::new(StubApi::with_delay(Duration::from_millis(200)));
    let (subscription, mut rx) = start_with_channel(api, IDLE_INTERVAL);

    // Let the mount cycle dispatch its requests, then cancel mid-flight.
    sleep(Duration::from_millis(50)).await;
    subscription.cancel();

    let outcome = timeout(Duration::from_millis(600), rx.recv()).await;
    match outcome {
        Ok(Some(_)) => panic!("cancelled subscription must not be notified"),
        Ok(None) | Err(_) => {}
    }
}

#[tokio::test]
async fn loading_is_observable_while_a_cycle_is_in_flight() {
    let api = Arc::new(StubApi::with_delay(Duration::from_millis(200)));
    let (subscription, mut rx) = start_with_channel(api, IDLE_INTERVAL);

    sleep(Duration::from_millis(50)).await;
    assert!(subscription.state().loading);

    let state = next_state(&mut rx).await;
    assert!(!state.loading);
    assert!(!subscription.state().loading);
}

#[tokio::test]
async fn projection_is_a_pure_view_of_the_shared_state() {
    let api = Arc::new(StubApi::new());
    let (subscription, mut rx) = start_with_channel(api, IDLE_INTERVAL);

    next_state(&mut rx).await;
    let state = subscription.state();
    for resource in Resource::ALL {
        let view = subscription.project(resource);
        assert_eq!(view.resource, resource);
        assert_eq!(view.value.as_ref(), state.resources.get(resource));
        assert_eq!(view.loading, state.loading);
        assert_eq!(view.error, state.error);
        assert_eq!(view.last_updated, state.last_updated);
    }
}

#[tokio::test]
async fn dropping_the_subscription_stops_the_poller() {
    let api = Arc::new(StubApi::new());
    let (subscription, mut rx) = start_with_channel(api, Duration::from_millis(50));

    next_state(&mut rx).await;
    drop(subscription);

    // Drain anything already in flight, then expect silence.
    sleep(Duration::from_millis(150)).await;
    while rx.try_recv().is_ok() {}
    let outcome = timeout(Duration::from_millis(300), rx.recv()).await;
    match outcome {
        Ok(Some(_)) => panic!("dropped subscription must not keep polling"),
        Ok(None) | Err(_) => {}
    }
}
