pub mod directions;
pub mod locators;
pub mod renderers;
