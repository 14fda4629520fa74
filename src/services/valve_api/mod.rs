use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

use crate::models::aperture::TimeToSend;
use crate::models::settings::Settings;

/// Failure modes of an aperture-time update
#[derive(Debug, Error)]
pub enum ValveApiError {
    #[error("Failed to serialize aperture time: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Network error during aperture time update: {0}")]
    Network(#[source] reqwest::Error),
    #[error("Aperture time update failed with HTTP status {0}")]
    Status(StatusCode),
    #[error("Aperture time response is not valid JSON: {0}")]
    InvalidBody(#[source] reqwest::Error),
}

/// Sends a new aperture time to the remote valve service.
pub trait ApertureUpdater: Send + Sync {
    /// Returns the parsed JSON body of a successful response
    fn put_aperture_time(&self, time: &TimeToSend) -> Result<serde_json::Value, ValveApiError>;
}

pub struct ValveApiClient {
    client: Client,
    endpoint: String,
}

impl ValveApiClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = settings.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder
            .build()
            .context("Failed to build valve API HTTP client")?;

        let endpoint = settings.aperture_endpoint();
        if !endpoint.starts_with("https://") {
            log::warn!("Valve API endpoint {} is not using HTTPS", endpoint);
        }

        Ok(Self::with_client(client, endpoint))
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ApertureUpdater for ValveApiClient {
    fn put_aperture_time(&self, time: &TimeToSend) -> Result<serde_json::Value, ValveApiError> {
        let body = time.to_json()?;

        let response = self
            .client
            .put(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .map_err(ValveApiError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ValveApiError::Status(status));
        }

        response.json().map_err(ValveApiError::InvalidBody)
    }
}
