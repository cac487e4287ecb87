//! Chart adapters
//!
//! [`ChartRenderer`] rasterises computed chart data to PNG files;
//! [`PngChartLoader`] reads such a file back into an in-memory buffer.

mod png_loader;
mod renderer;

pub use png_loader::PngChartLoader;
pub use renderer::{ChartRenderError, ChartRenderer};
