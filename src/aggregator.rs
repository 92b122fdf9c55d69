//! Polling Data Aggregator
//!
//! Owns the composite dashboard state: refreshes all resources concurrently
//! on a fixed interval (and on demand) and notifies the subscriber after each
//! completed fetch cycle.
//!
//! A fetch cycle is all-or-nothing: either every resource value is replaced
//! at once, or a failure leaves the previous values untouched and only the
//! `error` field changes. Cycles are serialized on a single poller task, so a
//! manual refresh that arrives while a cycle is in flight queues behind it
//! instead of racing it.

use crate::api::DashboardApi;
use crate::api::error::ApiError;
use crate::consts::aggregator_consts::polling;
use crate::resource::{Resource, ResourceSet};
use crate::state::{AggregateState, ResourceView};
use chrono::Utc;
use log::{debug, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;

type UpdateCallback = Box<dyn Fn(AggregateState) + Send>;

/// Periodically fetches the fixed set of dashboard resources and merges them
/// into a single [`AggregateState`].
pub struct DataAggregator {
    api: Arc<dyn DashboardApi>,
    poll_interval: Duration,
}

impl DataAggregator {
    /// Aggregator with the production poll interval.
    pub fn new(api: Arc<dyn DashboardApi>) -> Self {
        Self::with_interval(api, polling::poll_interval())
    }

    /// Aggregator with a custom poll interval. Production code uses
    /// [`DataAggregator::new`]; this exists so tests can run fast.
    pub fn with_interval(api: Arc<dyn DashboardApi>, poll_interval: Duration) -> Self {
        Self { api, poll_interval }
    }

    /// Begins the polling lifecycle: an immediate fetch cycle, then one cycle
    /// per interval tick. `on_update` receives a state snapshot after every
    /// completed cycle.
    ///
    /// The returned [`Subscription`] is the only handle to the running poller;
    /// cancelling (or dropping) it stops the timer and suppresses any further
    /// notifications, including from a cycle already in flight.
    pub fn start<F>(self, on_update: F) -> Subscription
    where
        F: Fn(AggregateState) + Send + 'static,
    {
        let (state_tx, state_rx) = watch::channel(AggregateState::new());
        let (refresh_tx, refresh_rx) = mpsc::channel(polling::REFRESH_QUEUE_SIZE);
        let token = CancellationToken::new();

        tokio::spawn(poller_task(
            self.api,
            self.poll_interval,
            state_tx,
            refresh_rx,
            token.clone(),
            Box::new(on_update),
        ));

        Subscription {
            token,
            refresh_tx,
            state_rx,
        }
    }
}

/// Handle to a running aggregator: snapshot reads, manual refresh, and
/// cancellation. Dropping the subscription cancels it.
pub struct Subscription {
    token: CancellationToken,
    refresh_tx: mpsc::Sender<()>,
    state_rx: watch::Receiver<AggregateState>,
}

impl Subscription {
    /// Stops the poll timer and suppresses all further notifications.
    ///
    /// Cancellation is cooperative: a network call already dispatched by an
    /// in-flight cycle runs to completion, but its result is discarded.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Requests an immediate out-of-band fetch cycle (manual retry). Does not
    /// disturb the periodic schedule. A refresh that arrives while a cycle is
    /// running (or while one is already queued) is coalesced; after
    /// [`Subscription::cancel`] it is a no-op.
    pub fn refresh(&self) {
        let _ = self.refresh_tx.try_send(());
    }

    /// Synchronous read of the current state snapshot.
    pub fn state(&self) -> AggregateState {
        self.state_rx.borrow().clone()
    }

    /// Narrows the current snapshot to one resource plus the shared
    /// loading/error/staleness signals. A pure read-side projection; no
    /// separate fetch path exists per resource.
    pub fn project(&self, resource: Resource) -> ResourceView {
        self.state().project(resource)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// The poller loop. Runs one fetch cycle immediately, then one per interval
/// tick or queued refresh, until cancelled. All state mutation happens here.
async fn poller_task(
    api: Arc<dyn DashboardApi>,
    poll_interval: Duration,
    state_tx: watch::Sender<AggregateState>,
    mut refresh_rx: mpsc::Receiver<()>,
    token: CancellationToken,
    on_update: UpdateCallback,
) {
    let mut state = AggregateState::new();
    let mut ticker = interval(poll_interval);
    // A cycle that outlasts the interval delays the next tick rather than
    // triggering a burst of catch-up cycles.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        // The first tick completes immediately, giving the mount-time cycle.
        tokio::select! {
            _ = token.cancelled() => break,
            _ = ticker.tick() => {}
            Some(()) = refresh_rx.recv() => {}
        }

        state.begin_cycle();
        // Publish the loading transition so synchronous reads observe it.
        state_tx.send_replace(state.clone());
        debug!("fetch cycle started");

        let outcome = fetch_all(api.as_ref()).await;

        // A subscription cancelled mid-cycle never observes the result.
        if token.is_cancelled() {
            break;
        }

        match outcome {
            Ok(resources) => {
                state.complete_cycle(resources, Utc::now());
                debug!("fetch cycle completed, all resources replaced");
            }
            Err(err) => {
                warn!("fetch cycle failed, retaining previous values: {err}");
                state.fail_cycle(err.to_string());
            }
        }

        state_tx.send_replace(state.clone());
        on_update(state.clone());
    }
}

/// One fan-out/fan-in round: fetch every resource concurrently and join.
/// The first failure short-circuits the round; its description becomes the
/// cycle's error.
async fn fetch_all(api: &dyn DashboardApi) -> Result<ResourceSet, ApiError> {
    let (rewriter, adoption, feedback, status) = tokio::try_join!(
        api.fetch_resource(Resource::Rewriter),
        api.fetch_resource(Resource::Adoption),
        api.fetch_resource(Resource::Feedback),
        api.fetch_resource(Resource::Status),
    )?;

    Ok(ResourceSet::from_values(rewriter, adoption, feedback, status))
}
