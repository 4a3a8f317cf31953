pub mod http;

use crate::domain::models::DirectionsBox;

pub struct DirectionsManager {}

impl DirectionsManager {
    pub fn get(url: &str) -> DirectionsBox {
        return Box::new(http::HttpDirections::new(url));
    }
}
