//! # retail-charts
//!
//! Chart geometry and SVG chart components for the Sigalli retail dashboard.
//! Each chart turns an ordered [`Series`] into drawable primitives, then a thin
//! Leptos component renders those primitives and owns the chart's selection.
//!
//! ## Modules
//!
//! - `chartkit` - Scales, normalization, primitives, SVG path builder
//! - `selection` - Per-chart tap selection and tooltip text
//! - `bar` - Vertical bar chart
//! - `horizontal_bar` - Ranked horizontal bar chart
//! - `line` - Line chart with rotated segments and area fill
//! - `donut` - Donut ring with legend

pub mod bar;
pub mod chartkit;
pub mod donut;
pub mod horizontal_bar;
pub mod line;
pub mod selection;

pub use bar::*;
pub use chartkit::*;
pub use donut::*;
pub use horizontal_bar::*;
pub use line::*;
pub use selection::*;

// Re-export core types for convenience
pub use retail_core::{Series, SeriesEntry, ValueFormat, colors};

/// Screen width assumed when no browser window is available
pub const FALLBACK_SCREEN_WIDTH: f64 = 390.0;

/// Horizontal space taken by screen margins and card padding around a chart
pub const SCREEN_CHART_PADDING: f64 = 80.0;

/// Default chart width: window width minus screen and card paddings
pub fn screen_chart_width() -> f64 {
    let screen = window_width().unwrap_or(FALLBACK_SCREEN_WIDTH);
    (screen - SCREEN_CHART_PADDING).max(0.0)
}

#[cfg(target_arch = "wasm32")]
fn window_width() -> Option<f64> {
    web_sys::window()?.inner_width().ok()?.as_f64()
}

#[cfg(not(target_arch = "wasm32"))]
fn window_width() -> Option<f64> {
    None
}

/// Chart box in logical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartDimensions {
    pub width: f64,
    pub height: f64,
}

impl ChartDimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// ViewBox string for SVG
    pub fn viewbox(&self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_width_off_browser() {
        assert_eq!(screen_chart_width(), FALLBACK_SCREEN_WIDTH - SCREEN_CHART_PADDING);
    }

    #[test]
    fn test_dimensions_never_negative() {
        let dims = ChartDimensions::new(-5.0, 120.0);
        assert_eq!(dims.width, 0.0);
        assert_eq!(dims.viewbox(), "0 0 0 120");
    }
}
