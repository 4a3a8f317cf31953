#[cfg(test)]
#[path = "itinerary_test.rs"]
mod tests;

use once_cell::sync::Lazy;
use regex::Regex;

use super::aggregator;
use super::polyline;
use super::polyline::PolylineError;
use crate::domain::models::DirectionsResponse;
use crate::domain::models::LegInfo;
use crate::domain::models::RouteGeometry;
use crate::domain::models::RouteUpdate;
use crate::domain::models::Session;
use crate::domain::models::TimelineEvent;
use crate::domain::models::WaypointCoords;
use crate::domain::models::WaypointDetail;

static DISTANCE_LABEL_RE: Lazy<Regex> =
    Lazy::new(|| return Regex::new(r"\(([\d.]+)\s*km\)").unwrap());

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Maneuver {
    Left,
    Right,
    North,
    South,
    Straight,
    Other,
}

impl Maneuver {
    /// Keyword match over the instruction text, first hit wins.
    pub fn classify(instruction: &str) -> Maneuver {
        let lower = instruction.to_lowercase();

        if lower.contains("left") {
            return Maneuver::Left;
        }
        if lower.contains("right") {
            return Maneuver::Right;
        }
        if lower.contains("north") {
            return Maneuver::North;
        }
        if lower.contains("south") {
            return Maneuver::South;
        }
        if lower.contains("head") || lower.contains("continue") {
            return Maneuver::Straight;
        }

        return Maneuver::Other;
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Maneuver::Left => return "↰",
            Maneuver::Right => return "↱",
            Maneuver::North => return "↑",
            Maneuver::South => return "↓",
            Maneuver::Straight => return "→",
            Maneuver::Other => return "•",
        }
    }
}

pub fn timeline_from_instructions(instructions: &[String]) -> Vec<TimelineEvent> {
    return instructions
        .iter()
        .enumerate()
        .map(|(idx, instruction)| {
            let step = idx + 1;
            return TimelineEvent {
                time: format!("Step {step}"),
                title: format!("Instruction {step}"),
                description: instruction.to_string(),
            };
        })
        .collect();
}

/// Builds the per-turn update from a raw response. Never fails; a bad encoded
/// path only surfaces when geometry is derived from it.
pub fn route_update(response: &DirectionsResponse) -> RouteUpdate {
    return RouteUpdate {
        timeline: timeline_from_instructions(&response.instructions),
        waypoints: response.waypoints.clone(),
        legs: response.legs.clone(),
        totals: aggregator::compute_totals(&response.legs),
        encoded_path: response.polyline.clone(),
    };
}

/// Decoded path flipped to `(lng, lat)`. No encoded path means no route yet.
pub fn route_geometry(encoded_path: Option<&str>) -> Result<RouteGeometry, PolylineError> {
    let encoded = match encoded_path {
        Some(encoded) => encoded,
        None => return Ok(vec![]),
    };

    return Ok(polyline::decode(encoded)?
        .into_iter()
        .map(|point| return point.to_lng_lat())
        .collect());
}

pub fn waypoint_coords(waypoints: &[WaypointDetail]) -> WaypointCoords {
    return waypoints
        .iter()
        .map(|waypoint| return waypoint.lat_lng().to_lng_lat())
        .collect();
}

/// Geometry and marker positions for a session, as handed to the route
/// synchronizer. A malformed path yields an empty geometry so the overlay is
/// skipped while the markers still update.
pub fn map_view(session: &Session) -> (RouteGeometry, WaypointCoords) {
    let geometry = match route_geometry(session.encoded_path.as_deref()) {
        Ok(geometry) => geometry,
        Err(err) => {
            tracing::warn!(session_id = %session.id, error = ?err, "Skipping malformed route path");
            vec![]
        }
    };

    return (geometry, waypoint_coords(&session.waypoints));
}

/// The leg that ends at waypoint `idx`. The first waypoint has none.
pub fn leg_into(legs: &[LegInfo], idx: usize) -> Option<&LegInfo> {
    if idx == 0 {
        return None;
    }

    return legs.get(idx - 1);
}

/// Instruction text without its trailing parenthetical.
pub fn instruction_text(instruction: &str) -> &str {
    return instruction
        .split('(')
        .next()
        .unwrap_or(instruction)
        .trim();
}

/// The `"(0.8 km)"` label inside an instruction, as `"0.8 km"`.
pub fn instruction_distance(instruction: &str) -> Option<String> {
    let caps = DISTANCE_LABEL_RE.captures(instruction)?;
    return Some(format!("{} km", caps.get(1)?.as_str()));
}
