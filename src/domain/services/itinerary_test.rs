use anyhow::Result;
use test_utils::directions_fixture;

use super::instruction_distance;
use super::instruction_text;
use super::leg_into;
use super::map_view;
use super::route_geometry;
use super::route_update;
use super::timeline_from_instructions;
use super::waypoint_coords;
use super::Maneuver;
use crate::domain::models::DirectionsResponse;
use crate::domain::models::LngLat;
use crate::domain::models::Session;

fn fixture() -> DirectionsResponse {
    return serde_json::from_str(directions_fixture()).unwrap();
}

#[test]
fn it_builds_a_timeline_in_order() {
    let timeline = timeline_from_instructions(&["Go".to_string(), "Stop".to_string()]);

    assert_eq!(timeline.len(), 2);
    assert_eq!(timeline[0].time, "Step 1");
    assert_eq!(timeline[0].title, "Instruction 1");
    assert_eq!(timeline[0].description, "Go");
    assert_eq!(timeline[1].time, "Step 2");
    assert_eq!(timeline[1].description, "Stop");
}

#[test]
fn it_builds_a_route_update() {
    let update = route_update(&fixture());

    assert_eq!(update.timeline.len(), 3);
    assert_eq!(update.waypoints.len(), 3);
    assert_eq!(update.legs.len(), 2);
    assert!((update.totals.total_distance_km - 2.0).abs() < 1e-9);
    assert_eq!(update.totals.total_duration_min, 5);
    assert_eq!(
        update.encoded_path.as_deref(),
        Some("_p~iF~ps|U_ulLnnqC_mqNvxq`@")
    );
}

#[test]
fn it_flips_geometry_to_lng_lat() -> Result<()> {
    let geometry = route_geometry(Some("_p~iF~ps|U_ulLnnqC_mqNvxq`@"))?;

    assert_eq!(geometry[0], LngLat::new(-120.2, 38.5));
    assert_eq!(geometry[2], LngLat::new(-126.453, 43.252));

    return Ok(());
}

#[test]
fn it_has_no_geometry_without_a_path() -> Result<()> {
    assert!(route_geometry(None)?.is_empty());
    return Ok(());
}

#[test]
fn it_surfaces_malformed_paths() {
    assert!(route_geometry(Some("_p~i")).is_err());
}

#[test]
fn it_flips_waypoints_to_lng_lat() {
    let coords = waypoint_coords(&fixture().waypoints);

    assert_eq!(
        coords,
        vec![
            LngLat::new(-120.2, 38.5),
            LngLat::new(-120.95, 40.7),
            LngLat::new(-126.453, 43.252),
        ]
    );
}

#[test]
fn it_skips_malformed_geometry_but_keeps_markers() {
    let mut session = Session::new("abc".to_string(), "test".to_string(), 0);
    let update = route_update(&fixture());
    session.waypoints = update.waypoints;
    session.encoded_path = Some("_p~i".to_string());

    let (geometry, coords) = map_view(&session);

    assert!(geometry.is_empty());
    assert_eq!(coords.len(), 3);
}

#[test]
fn it_finds_the_leg_into_each_waypoint() {
    let res = fixture();

    assert!(leg_into(&res.legs, 0).is_none());
    assert_eq!(leg_into(&res.legs, 1).unwrap().distance, "0.8 km");
    assert_eq!(leg_into(&res.legs, 2).unwrap().duration, "3 mins");
    assert!(leg_into(&res.legs, 3).is_none());
}

#[test]
fn it_classifies_maneuvers() {
    assert_eq!(Maneuver::classify("Turn LEFT onto Oak"), Maneuver::Left);
    assert_eq!(Maneuver::classify("Bear right"), Maneuver::Right);
    assert_eq!(Maneuver::classify("Go north on 5th"), Maneuver::North);
    assert_eq!(Maneuver::classify("Head south"), Maneuver::South);
    assert_eq!(Maneuver::classify("Head east"), Maneuver::Straight);
    assert_eq!(Maneuver::classify("Continue 200 m"), Maneuver::Straight);
    assert_eq!(Maneuver::classify("Arrive"), Maneuver::Other);
}

#[test]
fn it_splits_instruction_text_and_distance() {
    let instruction = "Head north on Main St (0.8 km)";

    assert_eq!(instruction_text(instruction), "Head north on Main St");
    assert_eq!(instruction_distance(instruction), Some("0.8 km".to_string()));
    assert_eq!(instruction_distance("Arrive at the park"), None);
    assert_eq!(instruction_text("Arrive at the park"), "Arrive at the park");
}
