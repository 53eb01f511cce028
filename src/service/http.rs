//! HTTP implementation of the calculation service.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{RescisaoError, RescisaoResult};
use crate::models::{CalculationResponse, FormSnapshot, ResultRecord};

use super::CalculationService;

/// Posts snapshots as JSON to the calculation endpoint.
///
/// No timeout is configured: an unresponsive service keeps the request
/// pending until the transport itself gives up.
#[derive(Debug, Clone)]
pub struct HttpCalculationService {
    client: Client,
    endpoint: String,
}

impl HttpCalculationService {
    /// Creates a service posting to `endpoint`.
    pub fn new(endpoint: impl Into<String>) -> RescisaoResult<Self> {
        let client = Client::builder().build().map_err(|e| {
            warn!(error = %e, "Failed to build HTTP client");
            RescisaoError::communication(None)
        })?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Creates a service posting to the configured endpoint.
    pub fn from_config(config: &ClientConfig) -> RescisaoResult<Self> {
        Self::new(config.endpoint.clone())
    }

    /// The endpoint requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CalculationService for HttpCalculationService {
    async fn calculate(&self, snapshot: &FormSnapshot) -> RescisaoResult<ResultRecord> {
        debug!(endpoint = %self.endpoint, "Sending calculation request");

        let response = self
            .client
            .post(&self.endpoint)
            .json(snapshot)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Calculation request failed in transport");
                RescisaoError::communication(None)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            warn!(error = %e, status = status.as_u16(), "Failed to read response body");
            RescisaoError::communication(Some(status.as_u16()))
        })?;

        debug!(status = status.as_u16(), bytes = body.len(), "Calculation response received");

        let parsed = serde_json::from_str::<CalculationResponse>(&body);

        if !status.is_success() {
            warn!(status = status.as_u16(), "Calculation service returned an error status");
            // The server's own message wins over the generic one when present.
            let message = parsed
                .ok()
                .and_then(|r| r.error)
                .filter(|m| !m.trim().is_empty());
            return Err(match message {
                Some(message) => RescisaoError::Communication {
                    status: Some(status.as_u16()),
                    message,
                },
                None => RescisaoError::communication(Some(status.as_u16())),
            });
        }

        let parsed = parsed.map_err(|e| {
            warn!(error = %e, "Calculation response is not a valid envelope");
            RescisaoError::communication(Some(status.as_u16()))
        })?;

        parsed.into_result()
    }
}
