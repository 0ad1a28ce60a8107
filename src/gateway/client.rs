/// HTTP access to the sensor collection service
use log::{debug, error};
use reqwest::Client;
use serde_json::{json, Value};
use url::Url;

use crate::gateway::payload::coerce_readings;
use crate::gateway::{GatewayError, SensorGateway};
use crate::models::{Reading, ReadingInput};
use crate::utils::new_reading_id;

/// Gateway talking to the single POST endpoint of the collection service.
///
/// Both operations are multiplexed through the request body: `{"action":"fetch"}`
/// retrieves readings, a reading object submits one.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    endpoint: Url,
}

impl HttpGateway {
    pub fn new(endpoint: Url) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(client: Client, endpoint: Url) -> Self {
        HttpGateway { client, endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn post(&self, body: &Value) -> Result<reqwest::Response, GatewayError> {
        // .json() also sets Content-Type: application/json
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!("Request to {} failed: {}", self.endpoint, e);
                GatewayError::Transport {
                    message: e.to_string(),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("Service at {} answered {}", self.endpoint, status);
            return Err(GatewayError::Http {
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

impl SensorGateway for HttpGateway {
    async fn fetch_all(&self) -> Result<Vec<Reading>, GatewayError> {
        debug!("Fetching readings from {}", self.endpoint);
        let response = self.post(&json!({ "action": "fetch" })).await?;

        let body: Value = response.json().await.map_err(|e| {
            error!("Malformed fetch response: {}", e);
            GatewayError::Transport {
                message: e.to_string(),
            }
        })?;

        let readings = coerce_readings(body);
        debug!("Fetched {} readings", readings.len());
        Ok(readings)
    }

    async fn submit_one(&self, candidate: ReadingInput) -> Result<Reading, GatewayError> {
        let reading = Reading::from_input(new_reading_id(), candidate);
        let body = serde_json::to_value(&reading).map_err(|e| GatewayError::Transport {
            message: e.to_string(),
        })?;

        debug!("Submitting reading {} to {}", reading.id, self.endpoint);
        // The acknowledgement body carries nothing we rely on.
        self.post(&body).await?;
        Ok(reading)
    }
}
