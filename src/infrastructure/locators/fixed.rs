use async_trait::async_trait;

use crate::domain::models::LatLng;
use crate::domain::models::LngLat;
use crate::domain::models::Locator;
use crate::domain::models::LocatorError;

/// Always reports the same position.
pub struct FixedLocator {
    position: LatLng,
}

impl FixedLocator {
    pub fn new(position: LatLng) -> FixedLocator {
        return FixedLocator { position };
    }
}

#[async_trait]
impl Locator for FixedLocator {
    #[allow(clippy::implicit_return)]
    async fn locate(&self) -> Result<LngLat, LocatorError> {
        if !self.position.is_valid() {
            return Err(LocatorError::Failed(format!(
                "{} is not a position on Earth",
                self.position
            )));
        }

        return Ok(self.position.to_lng_lat());
    }
}
