/// A directions payload shaped like the upstream service's output: three
/// stops, two legs, and an encoded path through three points.
pub fn directions_fixture() -> &'static str {
    return r#"
{
  "polyline": "_p~iF~ps|U_ulLnnqC_mqNvxq`@",
  "instructions": [
    "Head north on Main St (0.8 km)",
    "Turn left onto Oak Ave (1.2 km)",
    "Continue straight to the park"
  ],
  "waypoints": [
    {
      "name": "Blue Bottle Coffee",
      "address": "1 Ferry Building, San Francisco",
      "coordinates": [38.5, -120.2],
      "type": "cafe",
      "hours": ["Monday: 7:00 AM – 5:00 PM", "Sunday: Closed"],
      "photos": ["https://example.com/coffee.jpg"]
    },
    {
      "name": "City Lights Books",
      "address": "261 Columbus Ave, San Francisco",
      "coordinates": [40.7, -120.95],
      "type": "bookstore",
      "hours": [],
      "photos": []
    },
    {
      "name": "Golden Gate Park",
      "address": "San Francisco",
      "coordinates": [43.252, -126.453],
      "type": "park"
    }
  ],
  "round_trip": false,
  "notes": "A relaxed afternoon loop.",
  "legs": [
    { "distance": "0.8 km", "duration": "2 mins" },
    { "distance": "1.2 km", "duration": "3 mins" }
  ],
  "unused_upstream_field": { "ignored": true }
}
"#
    .trim();
}
