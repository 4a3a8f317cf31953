#[cfg(test)]
#[path = "navigation_test.rs"]
mod tests;

use reqwest::Url;

use crate::domain::models::LngLat;

pub const GOOGLE_MAPS_DIRECTIONS_URL: &str = "https://www.google.com/maps/dir/";
pub const TRAVEL_MODES: [&str; 4] = ["driving", "walking", "bicycling", "transit"];

/// Link that opens the route in Google Maps. The first coordinate is the
/// origin, the last the destination and everything in between is a stop.
/// Needs at least two coordinates.
pub fn google_maps_url(coords: &[LngLat], travel_mode: &str, navigate: bool) -> Option<Url> {
    if coords.len() < 2 {
        return None;
    }

    let origin = coords.first()?.to_lat_lng().to_string();
    let destination = coords.last()?.to_lat_lng().to_string();
    let stops = coords[1..coords.len() - 1]
        .iter()
        .map(|coord| return coord.to_lat_lng().to_string())
        .collect::<Vec<String>>()
        .join("|");

    let mut params = vec![
        ("api", "1"),
        ("origin", origin.as_str()),
        ("destination", destination.as_str()),
        ("travelmode", travel_mode),
    ];
    if navigate {
        params.push(("dir_action", "navigate"));
    }
    if !stops.is_empty() {
        params.push(("waypoints", stops.as_str()));
    }

    return Url::parse_with_params(GOOGLE_MAPS_DIRECTIONS_URL, params).ok();
}
