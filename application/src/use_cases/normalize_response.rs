//! Response normalization.
//!
//! Turns an [`AnalysisOutcome`] into the transcript entry shown to the user:
//!
//! 1. `Image(path)` → the chart is loaded into an in-memory PNG buffer
//! 2. `Text(s)` → text message, verbatim
//! 3. `Other(v)` → text message of `v`'s display form

use crate::ports::chart_loader::{ChartLoadError, ChartLoader};
use std::sync::Arc;
use tracing::debug;
use wizard_domain::{AnalysisOutcome, Message};

#[derive(Clone)]
pub struct ResponseNormalizer {
    chart_loader: Arc<dyn ChartLoader>,
}

impl ResponseNormalizer {
    pub fn new(chart_loader: Arc<dyn ChartLoader>) -> Self {
        Self { chart_loader }
    }

    pub fn normalize(&self, outcome: AnalysisOutcome) -> Result<Message, ChartLoadError> {
        match outcome {
            AnalysisOutcome::Image(path) => {
                let image = self.chart_loader.load(&path)?;
                debug!(
                    "Loaded chart {} ({}x{}, {} bytes)",
                    path.display(),
                    image.width(),
                    image.height(),
                    image.byte_len()
                );
                Ok(Message::assistant_image(image))
            }
            AnalysisOutcome::Text(text) => Ok(Message::assistant_text(text)),
            AnalysisOutcome::Other(value) => Ok(Message::assistant_text(value.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};
    use wizard_domain::{ChartImage, DatasetHandle, Role, StructuredValue};

    /// Treats every path under /charts as a 10x10 chart.
    struct FakeChartLoader;

    impl ChartLoader for FakeChartLoader {
        fn load(&self, path: &Path) -> Result<ChartImage, ChartLoadError> {
            if path.starts_with("/charts") {
                Ok(ChartImage::new(vec![0x89, b'P', b'N', b'G'], 10, 10))
            } else {
                Err(ChartLoadError::NotFound(path.to_path_buf()))
            }
        }
    }

    fn normalizer() -> ResponseNormalizer {
        ResponseNormalizer::new(Arc::new(FakeChartLoader))
    }

    #[test]
    fn test_text_passes_through() {
        let msg = normalizer()
            .normalize(AnalysisOutcome::Text("Average is 42".to_string()))
            .unwrap();
        assert_eq!(msg, Message::assistant_text("Average is 42"));
        assert_eq!(msg.role(), Role::Assistant);
    }

    #[test]
    fn test_number_is_stringified() {
        let msg = normalizer()
            .normalize(AnalysisOutcome::Other(StructuredValue::Integer(42)))
            .unwrap();
        assert_eq!(msg.text(), Some("42"));
    }

    #[test]
    fn test_table_is_stringified() {
        let table = DatasetHandle::new("t.csv", vec!["city".into()], vec![vec!["Oslo".into()]])
            .unwrap()
            .head(1);
        let expected = table.to_string();
        let msg = normalizer()
            .normalize(AnalysisOutcome::Other(StructuredValue::Table(table)))
            .unwrap();
        assert_eq!(msg.text(), Some(expected.as_str()));
        assert!(expected.contains("Oslo"));
    }

    #[test]
    fn test_image_becomes_buffer() {
        let msg = normalizer()
            .normalize(AnalysisOutcome::Image(PathBuf::from("/charts/a.png")))
            .unwrap();
        let image = msg.image().unwrap();
        assert_eq!((image.width(), image.height()), (10, 10));
    }

    #[test]
    fn test_missing_image_fails() {
        let result = normalizer().normalize(AnalysisOutcome::Image(PathBuf::from("/tmp/gone.png")));
        assert!(matches!(result, Err(ChartLoadError::NotFound(_))));
    }
}
