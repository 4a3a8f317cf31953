#[cfg(test)]
#[path = "headless_test.rs"]
mod tests;

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;
use std::time::Duration;

use super::RenderCall;
use crate::domain::models::BoundingBox;
use crate::domain::models::Easing;
use crate::domain::models::LngLat;
use crate::domain::models::LoadCallback;
use crate::domain::models::MapRenderer;
use crate::domain::models::MarkerHandle;
use crate::domain::models::MarkerStyle;
use crate::domain::models::Padding;
use crate::domain::models::PathStyle;
use crate::domain::models::Projection;
use crate::domain::models::RendererName;

#[derive(Default)]
struct HeadlessState {
    calls: Vec<RenderCall>,
    center: LngLat,
    zoom: f64,
    projection: Option<Projection>,
    paths: Vec<(String, Vec<LngLat>)>,
    markers: Vec<(MarkerHandle, LngLat, MarkerStyle)>,
    next_marker: u64,
    animations: usize,
    last_animation: Option<(Duration, Easing)>,
    loaded: bool,
    load_callbacks: Vec<LoadCallback>,
}

/// Read side of a [`HeadlessRenderer`], kept by whoever wants to inspect the
/// map after the renderer itself has been handed off.
#[derive(Clone, Default)]
pub struct HeadlessHandle {
    state: Arc<Mutex<HeadlessState>>,
}

impl HeadlessHandle {
    fn lock(&self) -> MutexGuard<HeadlessState> {
        return self.state.lock().unwrap_or_else(PoisonError::into_inner);
    }

    pub fn center(&self) -> LngLat {
        return self.lock().center;
    }
}

#[cfg(test)]
impl HeadlessHandle {
    pub fn calls(&self) -> Vec<RenderCall> {
        return self.lock().calls.clone();
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    pub fn zoom(&self) -> f64 {
        return self.lock().zoom;
    }

    pub fn projection(&self) -> Option<Projection> {
        return self.lock().projection;
    }

    pub fn path(&self, id: &str) -> Option<Vec<LngLat>> {
        return self
            .lock()
            .paths
            .iter()
            .find(|(path_id, _)| return path_id == id)
            .map(|(_, coordinates)| return coordinates.clone());
    }

    pub fn path_count(&self) -> usize {
        return self.lock().paths.len();
    }

    /// Markers currently on the map, in the order they were added.
    pub fn markers(&self) -> Vec<(LngLat, MarkerStyle)> {
        return self
            .lock()
            .markers
            .iter()
            .map(|(_, coordinate, style)| return (*coordinate, *style))
            .collect();
    }

    pub fn animation_count(&self) -> usize {
        return self.lock().animations;
    }

    pub fn last_animation(&self) -> Option<(Duration, Easing)> {
        return self.lock().last_animation;
    }

    /// Marks the base view as loaded and runs every waiting load callback.
    pub fn finish_loading(&self) {
        let callbacks = {
            let mut state = self.lock();
            state.loaded = true;
            std::mem::take(&mut state.load_callbacks)
        };

        for callback in callbacks {
            callback();
        }
    }
}

/// Keeps the map in memory without drawing anything. Useful when stdout is
/// not a terminal, and as the renderer under test.
pub struct HeadlessRenderer {
    handle: HeadlessHandle,
    load_on_initialize: bool,
}

impl Default for HeadlessRenderer {
    fn default() -> HeadlessRenderer {
        return HeadlessRenderer {
            handle: HeadlessHandle::default(),
            load_on_initialize: true,
        };
    }
}

#[cfg(test)]
impl HeadlessRenderer {
    /// A renderer whose base view only loads once
    /// [`HeadlessHandle::finish_loading`] is called.
    pub fn deferred() -> HeadlessRenderer {
        return HeadlessRenderer {
            handle: HeadlessHandle::default(),
            load_on_initialize: false,
        };
    }

    pub fn handle(&self) -> HeadlessHandle {
        return self.handle.clone();
    }
}

impl MapRenderer for HeadlessRenderer {
    fn name(&self) -> RendererName {
        return RendererName::Headless;
    }

    fn initialize(&mut self, center: LngLat, zoom: f64, projection: Projection) {
        let mut state = self.handle.lock();
        state.center = center;
        state.zoom = zoom;
        state.projection = Some(projection);
        state.loaded = self.load_on_initialize;
        state.calls.push(RenderCall::Initialize {
            center,
            zoom,
            projection,
        });
    }

    fn dispose(&mut self) {
        let mut state = self.handle.lock();
        tracing::debug!(
            zoom = state.zoom,
            projection = ?state.projection,
            animations = state.animations,
            last_animation = ?state.last_animation,
            paths = state.paths.len(),
            markers = state.markers.len(),
            "Disposing headless map"
        );
        state.paths.clear();
        state.markers.clear();
        state.projection = None;
        state.loaded = false;
        state.load_callbacks.clear();
        state.calls.push(RenderCall::Dispose);
    }

    fn add_path_overlay(&mut self, id: &str, coordinates: &[LngLat], _style: &PathStyle) {
        let mut state = self.handle.lock();
        state.paths.retain(|(path_id, _)| return path_id != id);
        state.paths.push((id.to_string(), coordinates.to_vec()));
        state.calls.push(RenderCall::AddPath {
            id: id.to_string(),
            coordinates: coordinates.to_vec(),
        });
    }

    fn remove_path_overlay(&mut self, id: &str) {
        let mut state = self.handle.lock();
        state.paths.retain(|(path_id, _)| return path_id != id);
        state.calls.push(RenderCall::RemovePath { id: id.to_string() });
    }

    fn add_marker(&mut self, coordinate: LngLat, style: MarkerStyle) -> MarkerHandle {
        let mut state = self.handle.lock();
        let handle = MarkerHandle(state.next_marker);
        state.next_marker += 1;
        state.markers.push((handle, coordinate, style));
        state.calls.push(RenderCall::AddMarker {
            handle,
            coordinate,
            style,
        });

        return handle;
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        let mut state = self.handle.lock();
        state.markers.retain(|(marker, _, _)| return *marker != handle);
        state.calls.push(RenderCall::RemoveMarker { handle });
    }

    fn fit_to_bounds(&mut self, bounds: BoundingBox, padding: Padding) {
        let mut state = self.handle.lock();
        state.center = LngLat::new(
            (bounds.south_west.lng + bounds.north_east.lng) / 2.0,
            (bounds.south_west.lat + bounds.north_east.lat) / 2.0,
        );
        state.calls.push(RenderCall::FitToBounds { bounds, padding });
    }

    fn get_center(&self) -> LngLat {
        return self.handle.center();
    }

    fn animate_to(&mut self, center: LngLat, duration: Duration, easing: Easing) {
        let mut state = self.handle.lock();
        state.center = center;
        state.animations += 1;
        state.last_animation = Some((duration, easing));
    }

    fn on_load(&mut self, callback: LoadCallback) {
        let mut state = self.handle.lock();
        if !state.loaded {
            state.load_callbacks.push(callback);
            return;
        }

        drop(state);
        callback();
    }
}
