//! CSV file → [`DatasetHandle`]

use csv::{ReaderBuilder, Trim};
use std::path::Path;
use wizard_application::ports::dataset_loader::{DatasetLoadError, DatasetLoader};
use wizard_domain::DatasetHandle;

/// Reads a CSV file with a header row.
///
/// Headers are trimmed. Records shorter than the header are padded with
/// nulls; a record longer than the header fails the load with its line.
#[derive(Debug, Default, Clone)]
pub struct CsvDatasetLoader;

impl CsvDatasetLoader {
    pub fn new() -> Self {
        Self
    }

    fn map_error(path: &Path, e: csv::Error) -> DatasetLoadError {
        if let csv::ErrorKind::Io(io) = e.kind() {
            return DatasetLoadError::Io {
                path: path.display().to_string(),
                reason: io.to_string(),
            };
        }
        DatasetLoadError::Malformed {
            line: e.position().map(|p| p.line()).unwrap_or(0),
            reason: e.to_string(),
        }
    }
}

impl DatasetLoader for CsvDatasetLoader {
    fn load(&self, path: &Path) -> Result<DatasetHandle, DatasetLoadError> {
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .trim(Trim::Headers)
            .from_path(path)
            .map_err(|e| Self::map_error(path, e))?;

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| Self::map_error(path, e))?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| Self::map_error(path, e))?;
            if record.len() > headers.len() {
                return Err(DatasetLoadError::Malformed {
                    line: record.position().map(|p| p.line()).unwrap_or(0),
                    reason: format!(
                        "expected {} fields, found {}",
                        headers.len(),
                        record.len()
                    ),
                });
            }
            rows.push(record.iter().map(|cell| cell.to_string()).collect());
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(DatasetHandle::new(name, headers, rows)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use wizard_domain::{DomainError, series_text};

    fn write_csv(dir: &tempfile::TempDir, name: &str, contents: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents).unwrap();
        path
    }

    fn column(dataset: &DatasetHandle, name: &str) -> Vec<Option<String>> {
        series_text(dataset.frame().column(name).unwrap()).unwrap()
    }

    fn cells(values: &[&str]) -> Vec<Option<String>> {
        values.iter().map(|v| Some(v.to_string())).collect()
    }

    #[test]
    fn test_loads_headers_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "people.csv",
            b" name , age,city\nAda,36,London\nLinus,28,Helsinki\n",
        );

        let dataset = CsvDatasetLoader::new().load(&path).unwrap();
        assert_eq!(dataset.name(), "people.csv");
        assert_eq!(dataset.column_list(), "['name', 'age', 'city']");
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(column(&dataset, "name"), cells(&["Ada", "Linus"]));
        assert_eq!(column(&dataset, "age"), cells(&["36", "28"]));
        assert_eq!(column(&dataset, "city"), cells(&["London", "Helsinki"]));
    }

    #[test]
    fn test_short_rows_are_padded() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "ragged.csv", b"a,b,c\n1,2\n4,5,6\n");

        let dataset = CsvDatasetLoader::new().load(&path).unwrap();
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(column(&dataset, "c"), vec![None, Some("6".to_string())]);
    }

    #[test]
    fn test_long_rows_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "sales.csv", b"name,sales\nnorth,10,999\nsouth,20\n");

        let result = CsvDatasetLoader::new().load(&path);
        assert_eq!(
            result.unwrap_err(),
            DatasetLoadError::Malformed {
                line: 2,
                reason: "expected 2 fields, found 3".to_string(),
            }
        );
    }

    #[test]
    fn test_quoted_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "quoted.csv", b"city,note\n\"New York, NY\",\"said \"\"hi\"\"\"\n");

        let dataset = CsvDatasetLoader::new().load(&path).unwrap();
        assert_eq!(column(&dataset, "city"), cells(&["New York, NY"]));
        assert_eq!(column(&dataset, "note"), cells(&["said \"hi\""]));
    }

    #[test]
    fn test_empty_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "empty.csv", b"");

        let result = CsvDatasetLoader::new().load(&path);
        assert_eq!(result, Err(DatasetLoadError::Domain(DomainError::EmptyHeader)));
    }

    #[test]
    fn test_invalid_utf8_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "binary.csv", b"a,b\n1,\xff\xfe\n");

        let result = CsvDatasetLoader::new().load(&path);
        assert!(matches!(result, Err(DatasetLoadError::Malformed { .. })));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = CsvDatasetLoader::new().load(Path::new("/definitely/not/here.csv"));
        assert!(matches!(result, Err(DatasetLoadError::Io { .. })));
    }
}
