#[cfg(test)]
#[path = "http_test.rs"]
mod tests;

use async_trait::async_trait;

use crate::domain::models::Directions;
use crate::domain::models::DirectionsError;
use crate::domain::models::DirectionsRequest;
use crate::domain::models::DirectionsResponse;

/// Directions over HTTP. One POST of `{"prompt": ...}` per request.
pub struct HttpDirections {
    url: String,
    client: reqwest::Client,
}

impl HttpDirections {
    pub fn new(url: &str) -> HttpDirections {
        return HttpDirections {
            url: url.to_string(),
            client: reqwest::Client::new(),
        };
    }
}

#[async_trait]
impl Directions for HttpDirections {
    #[allow(clippy::implicit_return)]
    async fn request_route(&self, prompt: &str) -> Result<DirectionsResponse, DirectionsError> {
        let req = DirectionsRequest {
            prompt: prompt.to_string(),
        };

        let res = self.client.post(&self.url).json(&req).send().await?;

        let status = res.status();
        if !status.is_success() {
            let message = status.canonical_reason().unwrap_or("Unknown").to_string();
            tracing::error!(status = status.as_u16(), reason = %message, "Directions request failed");
            return Err(DirectionsError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = res.text().await?;
        let directions = serde_json::from_str::<DirectionsResponse>(&body).map_err(|err| {
            tracing::error!(error = ?err, "Failed to parse directions response");
            return DirectionsError::Parse(err);
        })?;

        tracing::debug!(
            waypoints = directions.waypoints.len(),
            legs = directions.legs.len(),
            "Received directions"
        );

        return Ok(directions);
    }
}
