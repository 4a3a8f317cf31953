use async_trait::async_trait;

use super::LngLat;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum LocatorError {
    #[error("Geolocation error: {0}")]
    Failed(String),
}

#[async_trait]
pub trait Locator {
    /// Resolves the user's position. May never resolve; callers race it
    /// against a timeout.
    async fn locate(&self) -> Result<LngLat, LocatorError>;
}

pub type LocatorBox = Box<dyn Locator + Send + Sync>;
