mod action;
mod directions;
mod event;
mod geometry;
mod locator;
mod renderer;
mod session;
mod slash_commands;

pub use action::*;
pub use directions::*;
pub use event::*;
pub use geometry::*;
pub use locator::*;
pub use renderer::*;
pub use session::*;
pub use slash_commands::*;
