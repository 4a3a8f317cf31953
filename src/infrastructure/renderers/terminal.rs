#[cfg(test)]
#[path = "terminal_test.rs"]
mod tests;

use std::io;
use std::io::Write;
use std::time::Duration;

use yansi::Paint;

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

fn coord(point: &LngLat) -> String {
    return format!("{:.5},{:.5}", point.lat, point.lng);
}

/// One line per map operation. Camera animations are too frequent to print
/// and have no line.
pub fn describe(call: &RenderCall) -> String {
    match call {
        RenderCall::Initialize {
            center,
            zoom,
            projection,
        } => {
            return format!(
                "map opened at {} (zoom {zoom}, {projection})",
                coord(center)
            );
        }
        RenderCall::Dispose => return "map closed".to_string(),
        RenderCall::AddPath { id, coordinates } => {
            return format!("{id} drawn through {} points", coordinates.len());
        }
        RenderCall::RemovePath { id } => return format!("{id} cleared"),
        RenderCall::AddMarker {
            handle,
            coordinate,
            style,
        } => {
            return format!("{style} marker #{} at {}", handle.0, coord(coordinate));
        }
        RenderCall::RemoveMarker { handle } => {
            return format!("marker #{} removed", handle.0);
        }
        RenderCall::FitToBounds { bounds, padding } => {
            return format!(
                "view fit to {} .. {} (padding {} {} {} {})",
                coord(&bounds.south_west),
                coord(&bounds.north_east),
                padding.top,
                padding.right,
                padding.bottom,
                padding.left
            );
        }
    }
}

/// Prints map operations as they happen, to stdout unless told otherwise.
pub struct TerminalRenderer {
    out: Box<dyn Write + Send>,
    center: LngLat,
    next_marker: u64,
}

impl Default for TerminalRenderer {
    fn default() -> TerminalRenderer {
        return TerminalRenderer::with_writer(Box::new(io::stdout()));
    }
}

impl TerminalRenderer {
    pub fn with_writer(out: Box<dyn Write + Send>) -> TerminalRenderer {
        return TerminalRenderer {
            out,
            center: LngLat::default(),
            next_marker: 0,
        };
    }

    fn print(&mut self, call: RenderCall) {
        let line = describe(&call);
        if let Err(err) = writeln!(
            self.out,
            "{} {}",
            Paint::cyan("map").bold(),
            Paint::new(line).dimmed()
        ) {
            tracing::warn!(error = ?err, "Failed to print map operation");
        }
    }
}

impl MapRenderer for TerminalRenderer {
    fn name(&self) -> RendererName {
        return RendererName::Terminal;
    }

    fn initialize(&mut self, center: LngLat, zoom: f64, projection: Projection) {
        self.center = center;
        self.print(RenderCall::Initialize {
            center,
            zoom,
            projection,
        });
    }

    fn dispose(&mut self) {
        self.print(RenderCall::Dispose);
    }

    fn add_path_overlay(&mut self, id: &str, coordinates: &[LngLat], _style: &PathStyle) {
        self.print(RenderCall::AddPath {
            id: id.to_string(),
            coordinates: coordinates.to_vec(),
        });
    }

    fn remove_path_overlay(&mut self, id: &str) {
        self.print(RenderCall::RemovePath { id: id.to_string() });
    }

    fn add_marker(&mut self, coordinate: LngLat, style: MarkerStyle) -> MarkerHandle {
        let handle = MarkerHandle(self.next_marker);
        self.next_marker += 1;
        self.print(RenderCall::AddMarker {
            handle,
            coordinate,
            style,
        });

        return handle;
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        self.print(RenderCall::RemoveMarker { handle });
    }

    fn fit_to_bounds(&mut self, bounds: BoundingBox, padding: Padding) {
        self.center = LngLat::new(
            (bounds.south_west.lng + bounds.north_east.lng) / 2.0,
            (bounds.south_west.lat + bounds.north_east.lat) / 2.0,
        );
        self.print(RenderCall::FitToBounds { bounds, padding });
    }

    fn get_center(&self) -> LngLat {
        return self.center;
    }

    fn animate_to(&mut self, center: LngLat, duration: Duration, easing: Easing) {
        tracing::trace!(center = %coord(&center), duration_ms = duration.as_millis() as u64, easing = ?easing, "Animating camera");
        self.center = center;
    }

    fn on_load(&mut self, callback: LoadCallback) {
        callback();
    }
}
