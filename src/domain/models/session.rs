use std::collections::BTreeSet;

use chrono::DateTime;
use chrono::Local;
use serde::Deserializer;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::LatLng;

/// Treats an explicit JSON `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + serde::Deserialize<'de>,
{
    let value = <Option<T> as serde::Deserialize>::deserialize(deserializer)?;
    return Ok(value.unwrap_or_default());
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub time: String,
    pub title: String,
    pub description: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WaypointDetail {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    /// Ordered as `[lat, lng]`.
    pub coordinates: [f64; 2],
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hours: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub photos: Vec<String>,
}

impl WaypointDetail {
    pub fn lat_lng(&self) -> LatLng {
        return LatLng::new(self.coordinates[0], self.coordinates[1]);
    }
}

/// Segment between waypoint `i` and waypoint `i + 1`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LegInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub distance: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RouteTotals {
    pub total_distance_km: f64,
    pub total_duration_min: u64,
}

/// Everything derived from one directions response. Attached to a session as
/// a single unit so the displayed route is never a mix of two responses.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RouteUpdate {
    pub timeline: Vec<TimelineEvent>,
    pub waypoints: Vec<WaypointDetail>,
    pub legs: Vec<LegInfo>,
    pub totals: RouteTotals,
    pub encoded_path: Option<String>,
}

#[derive(Clone, Debug)]
pub struct Session {
    pub id: String,
    pub name: String,
    pub last_modified: DateTime<Local>,
    pub messages: Vec<String>,
    pub timeline: Vec<TimelineEvent>,
    pub waypoints: Vec<WaypointDetail>,
    pub legs: Vec<LegInfo>,
    pub totals: RouteTotals,
    pub response_indices: BTreeSet<usize>,
    pub encoded_path: Option<String>,
    pub(crate) order: u64,
}

impl Session {
    pub fn new(id: String, name: String, order: u64) -> Session {
        return Session {
            id,
            name,
            last_modified: Local::now(),
            messages: vec![],
            timeline: vec![],
            waypoints: vec![],
            legs: vec![],
            totals: RouteTotals::default(),
            response_indices: BTreeSet::new(),
            encoded_path: None,
            order,
        };
    }

    pub fn has_response(&self, message_index: usize) -> bool {
        return self.response_indices.contains(&message_index);
    }

    pub fn has_route(&self) -> bool {
        return !self.waypoints.is_empty() || self.encoded_path.is_some();
    }
}
