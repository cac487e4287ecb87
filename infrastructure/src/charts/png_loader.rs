//! [`ChartLoader`] backed by the `image` crate

use image::ImageFormat;
use std::io::Cursor;
use std::path::Path;
use wizard_application::ports::chart_loader::{ChartLoadError, ChartLoader};
use wizard_domain::ChartImage;

/// Decodes a chart file and re-encodes it as PNG in memory.
#[derive(Debug, Default, Clone)]
pub struct PngChartLoader;

impl PngChartLoader {
    pub fn new() -> Self {
        Self
    }
}

impl ChartLoader for PngChartLoader {
    fn load(&self, path: &Path) -> Result<ChartImage, ChartLoadError> {
        if !path.is_file() {
            return Err(ChartLoadError::NotFound(path.to_path_buf()));
        }

        let decoded = image::open(path).map_err(|e| ChartLoadError::Undecodable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut buffer = Cursor::new(Vec::new());
        decoded
            .write_to(&mut buffer, ImageFormat::Png)
            .map_err(|e| ChartLoadError::Encode(e.to_string()))?;

        Ok(ChartImage::new(
            buffer.into_inner(),
            decoded.width(),
            decoded.height(),
        ))
    }
}
