use crate::api::error::ApiError;
use crate::resource::Resource;
use serde_json::Value;

pub(crate) mod client;
pub use client::DashboardClient;
pub mod error;

#[cfg(test)]
use mockall::{automock, predicate::*};

/// Backend seam for the aggregator. One method per cycle step: fetch the
/// current JSON document for a resource.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait DashboardApi: Send + Sync {
    /// Fetch the latest JSON value for a single resource.
    async fn fetch_resource(&self, resource: Resource) -> Result<Value, ApiError>;
}
