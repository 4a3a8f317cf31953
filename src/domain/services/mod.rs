pub mod actions;
pub mod aggregator;
mod app_state;
pub mod hours;
pub mod itinerary;
pub mod navigation;
pub mod polyline;
mod route_sync;
mod sessions;

pub use app_state::*;
pub use route_sync::*;
pub use sessions::*;
