/// Presentation layer: chart configuration and headless PNG rendering.

pub mod chart;
pub mod config;

pub use chart::render_chart;
pub use config::{ChartConfig, FontConfig};
