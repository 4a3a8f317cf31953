#[cfg(test)]
#[path = "route_sync_test.rs"]
mod tests;

use std::sync::Arc;
use std::time::Duration;

use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use tokio::sync::oneshot;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::domain::models::BoundingBox;
use crate::domain::models::Easing;
use crate::domain::models::LngLat;
use crate::domain::models::LocatorBox;
use crate::domain::models::MarkerHandle;
use crate::domain::models::MarkerStyle;
use crate::domain::models::Padding;
use crate::domain::models::PathStyle;
use crate::domain::models::Projection;
use crate::domain::models::RendererBox;
use crate::domain::models::RouteGeometry;
use crate::domain::models::WaypointCoords;

pub const ROUTE_OVERLAY_ID: &str = "route";
pub const FIT_PADDING: f64 = 50.0;
pub const LOCATED_ZOOM: f64 = 13.0;
pub const DEGRADED_ZOOM: f64 = 1.5;
pub const DEFAULT_CENTER: LngLat = LngLat {
    lng: -0.1278,
    lat: 51.5074,
};
pub const ROTATION_STEP: f64 = -0.5;
pub const ROTATION_ANIMATION: Duration = Duration::from_millis(1000);
pub const ROTATION_FRAME: Duration = Duration::from_millis(16);

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum PanelSide {
    Left,
    Right,
}

impl PanelSide {
    pub fn parse(text: String) -> Option<PanelSide> {
        return PanelSide::iter().find(|e| return e.to_string() == text);
    }
}

/// The chat panel covering part of the map. Route fits leave room for it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SidePanel {
    pub open: bool,
    pub side: PanelSide,
    pub width: f64,
}

impl Default for SidePanel {
    fn default() -> SidePanel {
        return SidePanel {
            open: true,
            side: PanelSide::Right,
            width: 400.0,
        };
    }
}

impl SidePanel {
    pub fn padding(&self) -> Padding {
        let mut padding = Padding::uniform(FIT_PADDING);
        if !self.open {
            return padding;
        }

        match self.side {
            PanelSide::Left => padding.left += self.width,
            PanelSide::Right => padding.right += self.width,
        }

        return padding;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MapState {
    Uninitialized,
    Ready,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CameraMode {
    Located(LngLat),
    Degraded,
}

fn wrap_longitude(lng: f64) -> f64 {
    if lng < -180.0 {
        return lng + 360.0;
    }
    if lng > 180.0 {
        return lng - 360.0;
    }

    return lng;
}

async fn rotate(
    renderer: Arc<Mutex<RendererBox>>,
    cancel: CancellationToken,
    loaded: oneshot::Receiver<()>,
) {
    tokio::select! {
        _ = cancel.cancelled() => return,
        res = loaded => {
            if res.is_err() {
                // Renderer went away before it finished loading.
                return;
            }
        }
    }

    tracing::debug!("Starting idle globe rotation");
    let mut frames = tokio::time::interval(ROTATION_FRAME);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => return,
            _ = frames.tick() => {}
        }

        let mut renderer = renderer.lock().await;
        if cancel.is_cancelled() {
            return;
        }

        let center = renderer.get_center();
        let next = LngLat::new(wrap_longitude(center.lng + ROTATION_STEP), center.lat);
        renderer.animate_to(next, ROTATION_ANIMATION, Easing::Linear);
    }
}

struct Rotation {
    cancel: CancellationToken,
    worker: JoinHandle<()>,
}

impl Rotation {
    fn start(renderer: Arc<Mutex<RendererBox>>, loaded: oneshot::Receiver<()>) -> Rotation {
        let cancel = CancellationToken::new();
        let worker = tokio::spawn(rotate(renderer, cancel.clone(), loaded));

        return Rotation { cancel, worker };
    }

    async fn stop(self) {
        self.cancel.cancel();
        if let Err(err) = self.worker.await {
            tracing::error!(error = ?err, "Globe rotation task failed");
        }
    }
}

/// Owns everything drawn on the map: the route overlay, waypoint markers, the
/// user's location marker and the idle rotation. Callers hand it complete
/// geometry and it replaces what is on screen.
pub struct RouteSynchronizer {
    renderer: Arc<Mutex<RendererBox>>,
    state: MapState,
    camera: Option<CameraMode>,
    panel: SidePanel,
    route: RouteGeometry,
    waypoints: WaypointCoords,
    markers: Vec<MarkerHandle>,
    user_marker: Option<MarkerHandle>,
    pending_route: Option<RouteGeometry>,
    pending_waypoints: Option<WaypointCoords>,
    rotation: Option<Rotation>,
}

impl RouteSynchronizer {
    pub fn new(renderer: RendererBox, panel: SidePanel) -> RouteSynchronizer {
        return RouteSynchronizer {
            renderer: Arc::new(Mutex::new(renderer)),
            state: MapState::Uninitialized,
            camera: None,
            panel,
            route: vec![],
            waypoints: vec![],
            markers: vec![],
            user_marker: None,
            pending_route: None,
            pending_waypoints: None,
            rotation: None,
        };
    }

    pub fn state(&self) -> MapState {
        return self.state;
    }

    pub fn camera(&self) -> Option<CameraMode> {
        return self.camera;
    }

    pub fn panel(&self) -> SidePanel {
        return self.panel;
    }

    pub fn route(&self) -> &[LngLat] {
        return &self.route;
    }

    pub fn user_marker(&self) -> Option<MarkerHandle> {
        return self.user_marker;
    }

    pub fn is_rotating(&self) -> bool {
        return self.rotation.is_some();
    }

    /// Waits for the user's location for at most `timeout`, then builds the
    /// map around it. Without a location the map falls back to a slowly
    /// spinning globe.
    pub async fn initialize(&mut self, locator: &LocatorBox, timeout: Duration) -> CameraMode {
        if self.state == MapState::Ready {
            self.unmount().await;
        }

        let located = tokio::select! {
            res = locator.locate() => match res {
                Ok(position) => Some(position),
                Err(err) => {
                    tracing::warn!(error = ?err, "Geolocation failed, showing globe");
                    None
                }
            },
            _ = tokio::time::sleep(timeout) => {
                tracing::warn!(timeout_ms = timeout.as_millis() as u64, "Geolocation timed out, showing globe");
                None
            }
        };

        let (camera, renderer_name) = {
            let mut renderer = self.renderer.lock().await;
            let camera = match located {
                Some(position) => {
                    renderer.initialize(position, LOCATED_ZOOM, Projection::Mercator);
                    self.user_marker =
                        Some(renderer.add_marker(position, MarkerStyle::UserLocation));
                    CameraMode::Located(position)
                }
                None => {
                    renderer.initialize(DEFAULT_CENTER, DEGRADED_ZOOM, Projection::Globe);
                    let (loaded_tx, loaded_rx) = oneshot::channel();
                    renderer.on_load(Box::new(move || {
                        let _ = loaded_tx.send(());
                    }));
                    self.rotation = Some(Rotation::start(self.renderer.clone(), loaded_rx));
                    CameraMode::Degraded
                }
            };
            (camera, renderer.name())
        };

        tracing::info!(camera = ?camera, renderer = %renderer_name, "Map ready");
        self.camera = Some(camera);
        self.state = MapState::Ready;

        if let Some(route) = self.pending_route.take() {
            self.update_route(route).await;
        }
        if let Some(waypoints) = self.pending_waypoints.take() {
            self.update_waypoints(waypoints).await;
        }

        return camera;
    }

    /// Stops the rotation, then tears down the renderer. What was on screen
    /// is kept so the next initialize draws it again.
    pub async fn unmount(&mut self) {
        if let Some(rotation) = self.rotation.take() {
            rotation.stop().await;
        }

        if self.state != MapState::Ready {
            return;
        }

        self.renderer.lock().await.dispose();
        self.state = MapState::Uninitialized;
        self.camera = None;
        self.markers.clear();
        self.user_marker = None;

        if self.route.len() >= 2 {
            self.pending_route = Some(std::mem::take(&mut self.route));
        }
        if !self.waypoints.is_empty() {
            self.pending_waypoints = Some(std::mem::take(&mut self.waypoints));
        }

        tracing::debug!("Map unmounted");
    }

    pub async fn reinitialize(&mut self, locator: &LocatorBox, timeout: Duration) -> CameraMode {
        self.unmount().await;
        return self.initialize(locator, timeout).await;
    }

    /// Draws `geometry` as the route and fits the camera to it. Paths with
    /// fewer than two points leave the map untouched.
    pub async fn update_route(&mut self, geometry: RouteGeometry) {
        if geometry.len() < 2 {
            return;
        }

        if self.state != MapState::Ready {
            self.pending_route = Some(geometry);
            return;
        }

        {
            let mut renderer = self.renderer.lock().await;
            renderer.remove_path_overlay(ROUTE_OVERLAY_ID);
            renderer.add_path_overlay(ROUTE_OVERLAY_ID, &geometry, &PathStyle::default());
            if let Some(bounds) = BoundingBox::from_points(&geometry) {
                renderer.fit_to_bounds(bounds, self.panel.padding());
            }
        }

        tracing::debug!(points = geometry.len(), "Route overlay replaced");
        self.route = geometry;
    }

    /// Replaces every waypoint marker. The first is the origin, the last the
    /// destination.
    pub async fn update_waypoints(&mut self, coords: WaypointCoords) {
        if self.state != MapState::Ready {
            self.pending_waypoints = Some(coords);
            return;
        }

        {
            let mut renderer = self.renderer.lock().await;
            for handle in self.markers.drain(..) {
                renderer.remove_marker(handle);
            }

            let last = coords.len().saturating_sub(1);
            for (idx, coord) in coords.iter().enumerate() {
                let style = if idx == 0 {
                    MarkerStyle::Origin
                } else if idx == last {
                    MarkerStyle::Destination
                } else {
                    MarkerStyle::Waypoint
                };
                self.markers.push(renderer.add_marker(*coord, style));
            }
        }

        tracing::debug!(markers = coords.len(), "Waypoint markers replaced");
        self.waypoints = coords;
    }

    /// Shows both overlays for one response.
    pub async fn sync(&mut self, geometry: RouteGeometry, coords: WaypointCoords) {
        self.update_route(geometry).await;
        self.update_waypoints(coords).await;
    }

    pub async fn set_side_panel(&mut self, panel: SidePanel) {
        self.panel = panel;

        if self.state != MapState::Ready || self.route.len() < 2 {
            return;
        }

        if let Some(bounds) = BoundingBox::from_points(&self.route) {
            self.renderer
                .lock()
                .await
                .fit_to_bounds(bounds, self.panel.padding());
        }
    }
}
