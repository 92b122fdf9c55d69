//! Aggregate state shared with dashboard consumers.

use crate::resource::{Resource, ResourceSet};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// Snapshot of the aggregator's state as delivered to subscribers.
///
/// Mutated only at fetch-cycle boundaries; consumers always receive clones.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateState {
    /// Last-known value per resource, replaced all-or-nothing per cycle.
    pub resources: ResourceSet,
    /// True exactly while a fetch cycle is in flight.
    pub loading: bool,
    /// Failure reason from the most recent cycle, if it failed.
    pub error: Option<String>,
    /// Completion time of the most recent fully successful cycle.
    pub last_updated: Option<DateTime<Utc>>,
}

impl AggregateState {
    /// The state at mount: no values yet, first cycle about to run.
    pub fn new() -> Self {
        Self {
            resources: ResourceSet::new(),
            loading: true,
            error: None,
            last_updated: None,
        }
    }

    /// Marks the start of a fetch cycle. The previous cycle's error is
    /// cleared here so `error` only ever describes the most recent cycle.
    pub(crate) fn begin_cycle(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Commits a fully successful cycle: every resource value is replaced
    /// at once and the staleness marker advances.
    pub(crate) fn complete_cycle(&mut self, resources: ResourceSet, at: DateTime<Utc>) {
        self.resources = resources;
        self.last_updated = Some(at);
        self.error = None;
        self.loading = false;
    }

    /// Records a failed cycle. Prior resource values and `last_updated`
    /// are retained (stale-but-present).
    pub(crate) fn fail_cycle(&mut self, reason: String) {
        self.error = Some(reason);
        self.loading = false;
    }

    /// Narrows this snapshot to a single resource plus the shared signals.
    pub fn project(&self, resource: Resource) -> ResourceView {
        ResourceView {
            resource,
            value: self.resources.get(resource).cloned(),
            loading: self.loading,
            error: self.error.clone(),
            last_updated: self.last_updated,
        }
    }
}

impl Default for AggregateState {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-side projection of [`AggregateState`] for consumers that only care
/// about one resource. Derived from the shared snapshot, never fetched
/// independently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceView {
    pub resource: Resource,
    pub value: Option<Value>,
    pub loading: bool,
    pub error: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
}
