#[cfg(test)]
#[path = "directions_test.rs"]
mod tests;

use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::session::null_as_default;
use super::LegInfo;
use super::WaypointDetail;

#[derive(Debug, thiserror::Error)]
pub enum DirectionsError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Directions API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse directions response: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionsRequest {
    pub prompt: String,
}

/// The upstream itinerary. Only the listed fields are read, anything else in
/// the payload is ignored, and optional collections default to empty.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectionsResponse {
    #[serde(default)]
    pub polyline: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub instructions: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub waypoints: Vec<WaypointDetail>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub round_trip: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub legs: Vec<LegInfo>,
}

/// One user turn waiting on the directions service. The session and message
/// index travel with the request so the response can be correlated back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoutePrompt {
    pub session_id: String,
    pub message_index: usize,
    pub text: String,
}

impl RoutePrompt {
    pub fn new(session_id: &str, message_index: usize, text: &str) -> RoutePrompt {
        return RoutePrompt {
            session_id: session_id.to_string(),
            message_index,
            text: text.to_string(),
        };
    }
}

#[async_trait]
pub trait Directions {
    /// Issues exactly one request for the prompt. There is no timeout and no
    /// deduplication.
    async fn request_route(&self, prompt: &str) -> Result<DirectionsResponse, DirectionsError>;
}

pub type DirectionsBox = Box<dyn Directions + Send + Sync>;
