//! Error handling for the api module

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Reqwest error: network failures, timeouts, or a body that is not valid JSON.
    #[error("Request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// The server answered with a non-success status code.
    #[error("HTTP error with status {status}: {message}")]
    Http { status: u16, message: String },
}

impl ApiError {
    pub async fn from_response(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response text".to_string());

        ApiError::Http { status, message }
    }
}
