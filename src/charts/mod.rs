//! History chart rendering.

pub mod curve;
pub mod renderer;
pub mod svg;

pub use renderer::{ChartCanvas, ChartRenderer, ChartSpec};
pub use svg::SvgCanvas;
