#[cfg(test)]
#[path = "locators_test.rs"]
mod tests;

pub mod fixed;
pub mod unavailable;

use anyhow::bail;
use anyhow::Result;

use crate::domain::models::LatLng;
use crate::domain::models::LocatorBox;

pub struct LocatorManager {}

impl LocatorManager {
    /// Locator for the configured `location`. An empty value means the
    /// position is unknown.
    pub fn get(location: &str) -> Result<LocatorBox> {
        let location = location.trim();
        if location.is_empty() {
            return Ok(Box::<unavailable::UnavailableLocator>::default());
        }

        if let Some(position) = LatLng::parse(location) {
            if position.is_valid() {
                return Ok(Box::new(fixed::FixedLocator::new(position)));
            }
        }

        bail!(format!(
            "Location must be formatted as \"lat,lng\" in degrees, got \"{location}\""
        ))
    }
}
