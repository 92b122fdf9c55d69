//! Dashboard API Client
//!
//! A client for the dashboard backend, fetching one JSON document per resource.

use crate::api::DashboardApi;
use crate::api::error::ApiError;
use crate::consts::aggregator_consts::http;
use crate::environment::Environment;
use crate::resource::Resource;
use reqwest::{Client, ClientBuilder, Response};
use serde_json::Value;

// User-Agent string with crate version
const USER_AGENT: &str = concat!("dashboard-aggregator/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct DashboardClient {
    client: Client,
    environment: Environment,
}

impl DashboardClient {
    pub fn new(environment: Environment) -> Self {
        Self {
            client: ClientBuilder::new()
                .connect_timeout(http::connect_timeout())
                .timeout(http::request_timeout())
                .build()
                .expect("Failed to create HTTP client"),
            environment,
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.environment.api_base_url().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    async fn handle_response_status(response: Response) -> Result<Response, ApiError> {
        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }
        Ok(response)
    }
}

#[async_trait::async_trait]
impl DashboardApi for DashboardClient {
    /// Fetch a single resource's JSON document. The body is treated as an
    /// opaque value; shape validation is the consumer's concern.
    async fn fetch_resource(&self, resource: Resource) -> Result<Value, ApiError> {
        let url = self.build_url(resource.endpoint());
        let response = self
            .client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        let value = response.json::<Value>().await?;
        Ok(value)
    }
}
