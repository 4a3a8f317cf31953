#[cfg(test)]
#[path = "geometry_test.rs"]
mod tests;

use std::fmt;

use serde_derive::Deserialize;
use serde_derive::Serialize;

/// A coordinate in the order the directions service and the polyline format
/// use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// A coordinate in the order map renderers consume.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> LatLng {
        return LatLng { lat, lng };
    }

    /// Reads a `lat,lng` pair. Whitespace around either number is ignored.
    pub fn parse(text: &str) -> Option<LatLng> {
        let parts = text
            .split(',')
            .map(|part| return part.trim().parse::<f64>())
            .collect::<Vec<_>>();

        if let [Ok(lat), Ok(lng)] = parts.as_slice() {
            return Some(LatLng::new(*lat, *lng));
        }

        return None;
    }

    /// Finite and within ±90 latitude and ±180 longitude.
    pub fn is_valid(&self) -> bool {
        return self.lat.is_finite()
            && self.lng.is_finite()
            && self.lat.abs() <= 90.0
            && self.lng.abs() <= 180.0;
    }

    pub fn to_lng_lat(self) -> LngLat {
        return LngLat {
            lng: self.lng,
            lat: self.lat,
        };
    }
}

impl LngLat {
    pub fn new(lng: f64, lat: f64) -> LngLat {
        return LngLat { lng, lat };
    }

    pub fn to_lat_lng(self) -> LatLng {
        return LatLng {
            lat: self.lat,
            lng: self.lng,
        };
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        return write!(f, "{},{}", self.lat, self.lng);
    }
}

/// Ordered path drawn on the map. Replaced wholesale on every response.
pub type RouteGeometry = Vec<LngLat>;

/// Ordered marker positions. Replaced wholesale on every response.
pub type WaypointCoords = Vec<LngLat>;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub south_west: LngLat,
    pub north_east: LngLat,
}

impl BoundingBox {
    /// Smallest box containing every point, or `None` for an empty path.
    pub fn from_points(points: &[LngLat]) -> Option<BoundingBox> {
        let first = points.first()?;
        let mut bounds = BoundingBox {
            south_west: *first,
            north_east: *first,
        };

        for point in &points[1..] {
            bounds.extend(*point);
        }

        return Some(bounds);
    }

    pub fn extend(&mut self, point: LngLat) {
        self.south_west.lng = self.south_west.lng.min(point.lng);
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.north_east.lng = self.north_east.lng.max(point.lng);
        self.north_east.lat = self.north_east.lat.max(point.lat);
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Padding {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Padding {
    pub fn uniform(value: f64) -> Padding {
        return Padding {
            top: value,
            bottom: value,
            left: value,
            right: value,
        };
    }
}
