#[cfg(test)]
#[path = "renderers_test.rs"]
mod tests;

pub mod headless;
pub mod terminal;

use anyhow::bail;
use anyhow::Result;

use crate::domain::models::BoundingBox;
use crate::domain::models::LngLat;
use crate::domain::models::MarkerHandle;
use crate::domain::models::MarkerStyle;
use crate::domain::models::Padding;
use crate::domain::models::Projection;
use crate::domain::models::RendererBox;
use crate::domain::models::RendererName;

/// One operation performed against a map renderer.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderCall {
    Initialize {
        center: LngLat,
        zoom: f64,
        projection: Projection,
    },
    Dispose,
    AddPath {
        id: String,
        coordinates: Vec<LngLat>,
    },
    RemovePath {
        id: String,
    },
    AddMarker {
        handle: MarkerHandle,
        coordinate: LngLat,
        style: MarkerStyle,
    },
    RemoveMarker {
        handle: MarkerHandle,
    },
    FitToBounds {
        bounds: BoundingBox,
        padding: Padding,
    },
}

pub struct RendererManager {}

impl RendererManager {
    pub fn get(name: RendererName) -> Result<RendererBox> {
        if name == RendererName::Terminal {
            return Ok(Box::<terminal::TerminalRenderer>::default());
        }

        if name == RendererName::Headless {
            return Ok(Box::<headless::HeadlessRenderer>::default());
        }

        bail!(format!("No renderer implemented for {name}"))
    }
}
