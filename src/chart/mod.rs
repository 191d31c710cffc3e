//! Chart rendering for a persisted comparison report
//!
//! Only successfully measured records are drawn; bars follow report order.

pub mod palette;
pub mod svg;

pub use palette::{Palette, FALLBACK_COLOUR};
pub use svg::{generation_timestamp, y_axis_max, ChartRenderer, CHART_HEIGHT, CHART_WIDTH};
