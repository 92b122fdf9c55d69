//! Dashboard Data Aggregator
//!
//! Client-side data-aggregation layer for the dashboard frontend. A
//! [`DataAggregator`] periodically fetches a fixed set of JSON resources from
//! the backend, merges them into one [`AggregateState`], and notifies a
//! subscriber after each completed fetch cycle. Consumers read snapshots (or
//! per-resource projections) through the returned [`Subscription`].
//!
//! This is deliberately not a general-purpose fetch library: no caching, no
//! request deduplication across consumers, no offline support. The next poll
//! tick is the only retry mechanism.

pub mod aggregator;
pub mod api;
pub mod consts;
pub mod environment;
pub mod resource;
pub mod state;

pub use aggregator::{DataAggregator, Subscription};
pub use api::error::ApiError;
pub use api::{DashboardApi, DashboardClient};
pub use environment::Environment;
pub use resource::{Resource, ResourceSet};
pub use state::{AggregateState, ResourceView};
