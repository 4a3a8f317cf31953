use async_trait::async_trait;

use crate::domain::models::LngLat;
use crate::domain::models::Locator;
use crate::domain::models::LocatorError;

/// A position source that never answers, leaving the caller's timeout to
/// decide.
#[derive(Default)]
pub struct UnavailableLocator {}

#[async_trait]
impl Locator for UnavailableLocator {
    #[allow(clippy::implicit_return)]
    async fn locate(&self) -> Result<LngLat, LocatorError> {
        return std::future::pending().await;
    }
}
