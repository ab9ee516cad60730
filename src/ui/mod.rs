//! Terminal UI components.

mod render;
mod status;

pub use render::draw;
