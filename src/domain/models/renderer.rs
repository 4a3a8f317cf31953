use std::time::Duration;

use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

use super::BoundingBox;
use super::LngLat;
use super::Padding;

#[derive(Clone, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum RendererName {
    Terminal,
    Headless,
}

impl RendererName {
    pub fn parse(text: String) -> Option<RendererName> {
        return RendererName::iter().find(|e| return e.to_string() == text);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Projection {
    Mercator,
    Globe,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum MarkerStyle {
    Origin,
    Waypoint,
    Destination,
    UserLocation,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Easing {
    Linear,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PathStyle {
    pub color: String,
    pub width: f64,
}

impl Default for PathStyle {
    fn default() -> PathStyle {
        return PathStyle {
            color: "#3498db".to_string(),
            width: 4.0,
        };
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MarkerHandle(pub u64);

pub type LoadCallback = Box<dyn FnOnce() + Send>;

/// The map engine as seen from the route synchronizer. Implementations only
/// draw; deciding what to draw belongs to the synchronizer.
pub trait MapRenderer {
    fn name(&self) -> RendererName;

    fn initialize(&mut self, center: LngLat, zoom: f64, projection: Projection);

    fn dispose(&mut self);

    fn add_path_overlay(&mut self, id: &str, coordinates: &[LngLat], style: &PathStyle);

    fn remove_path_overlay(&mut self, id: &str);

    fn add_marker(&mut self, coordinate: LngLat, style: MarkerStyle) -> MarkerHandle;

    fn remove_marker(&mut self, handle: MarkerHandle);

    fn fit_to_bounds(&mut self, bounds: BoundingBox, padding: Padding);

    fn get_center(&self) -> LngLat;

    fn animate_to(&mut self, center: LngLat, duration: Duration, easing: Easing);

    /// Runs `callback` once the base view has finished loading. Renderers that
    /// are already loaded call it immediately. A renderer disposed before
    /// loading drops the callback without calling it.
    fn on_load(&mut self, callback: LoadCallback);
}

pub type RendererBox = Box<dyn MapRenderer + Send>;
