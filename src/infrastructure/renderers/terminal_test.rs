use std::io;
use std::io::Write;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use super::describe;
use super::TerminalRenderer;
use crate::domain::models::BoundingBox;
use crate::domain::models::Easing;
use crate::domain::models::LngLat;
use crate::domain::models::MapRenderer;
use crate::domain::models::MarkerHandle;
use crate::domain::models::MarkerStyle;
use crate::domain::models::Padding;
use crate::domain::models::PathStyle;
use crate::domain::models::Projection;
use crate::infrastructure::renderers::RenderCall;

#[derive(Clone, Default)]
struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    fn text(&self) -> String {
        return String::from_utf8_lossy(&self.bytes.lock().unwrap()).to_string();
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().unwrap().extend_from_slice(buf);
        return Ok(buf.len());
    }

    fn flush(&mut self) -> io::Result<()> {
        return Ok(());
    }
}

#[test]
fn it_describes_initialization() {
    let line = describe(&RenderCall::Initialize {
        center: LngLat::new(-0.1278, 51.5074),
        zoom: 1.5,
        projection: Projection::Globe,
    });

    insta::assert_snapshot!(line, @"map opened at 51.50740,-0.12780 (zoom 1.5, globe)");
}

#[test]
fn it_describes_overlays() {
    let path = describe(&RenderCall::AddPath {
        id: "route".to_string(),
        coordinates: vec![LngLat::new(0.0, 0.0), LngLat::new(1.0, 1.0)],
    });
    let marker = describe(&RenderCall::AddMarker {
        handle: MarkerHandle(3),
        coordinate: LngLat::new(-120.2, 38.5),
        style: MarkerStyle::UserLocation,
    });

    insta::assert_snapshot!(path, @"route drawn through 2 points");
    insta::assert_snapshot!(marker, @"user-location marker #3 at 38.50000,-120.20000");
}

#[test]
fn it_describes_fits() {
    let line = describe(&RenderCall::FitToBounds {
        bounds: BoundingBox {
            south_west: LngLat::new(-1.0, -2.0),
            north_east: LngLat::new(3.0, 4.0),
        },
        padding: Padding {
            top: 50.0,
            bottom: 50.0,
            left: 50.0,
            right: 450.0,
        },
    });

    insta::assert_snapshot!(line, @"view fit to -2.00000,-1.00000 .. 4.00000,3.00000 (padding 50 450 50 50)");
}

#[test]
fn it_tracks_the_camera() {
    let mut renderer = TerminalRenderer::with_writer(Box::new(io::sink()));
    renderer.initialize(LngLat::new(10.0, 20.0), 13.0, Projection::Mercator);
    assert_eq!(renderer.get_center(), LngLat::new(10.0, 20.0));

    renderer.animate_to(
        LngLat::new(9.5, 20.0),
        Duration::from_millis(1000),
        Easing::Linear,
    );
    assert_eq!(renderer.get_center(), LngLat::new(9.5, 20.0));

    renderer.fit_to_bounds(
        BoundingBox {
            south_west: LngLat::new(0.0, 0.0),
            north_east: LngLat::new(2.0, 4.0),
        },
        Padding::uniform(50.0),
    );
    assert_eq!(renderer.get_center(), LngLat::new(1.0, 2.0));
}

#[test]
fn it_describes_removals() {
    let path = describe(&RenderCall::RemovePath {
        id: "route".to_string(),
    });
    let marker = describe(&RenderCall::RemoveMarker {
        handle: MarkerHandle(7),
    });

    insta::assert_snapshot!(path, @"route cleared");
    insta::assert_snapshot!(marker, @"marker #7 removed");
}

#[test]
fn it_prints_every_overlay_change() {
    let buffer = SharedBuffer::default();
    let mut renderer = TerminalRenderer::with_writer(Box::new(buffer.clone()));
    let path = vec![LngLat::new(0.0, 0.0), LngLat::new(1.0, 1.0)];

    renderer.add_path_overlay("route", &path, &PathStyle::default());
    let marker = renderer.add_marker(LngLat::new(1.0, 1.0), MarkerStyle::Origin);
    renderer.remove_marker(marker);
    renderer.remove_path_overlay("route");
    renderer.animate_to(
        LngLat::new(2.0, 2.0),
        Duration::from_millis(1000),
        Easing::Linear,
    );

    let text = buffer.text();
    assert_eq!(text.lines().count(), 4);
    assert!(text.contains("route drawn through 2 points"));
    assert!(text.contains("origin marker #0 at 1.00000,1.00000"));
    assert!(text.contains("marker #0 removed"));
    assert!(text.contains("route cleared"));
}
