//! Loaded tabular data

use crate::core::error::DomainError;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Inferred type of a column, used to describe the table to the answer model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Integer,
    Float,
    Boolean,
    Text,
    Empty,
}

impl ColumnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKind::Integer => "integer",
            ColumnKind::Float => "float",
            ColumnKind::Boolean => "boolean",
            ColumnKind::Text => "text",
            ColumnKind::Empty => "empty",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnKind::Integer | ColumnKind::Float)
    }

    /// Narrowest kind that holds every non-blank cell.
    fn infer(cells: &[Option<String>]) -> Self {
        let mut kind = ColumnKind::Empty;
        for cell in cells.iter().flatten() {
            let cell_kind = if cell.parse::<i64>().is_ok() {
                ColumnKind::Integer
            } else if parse_numeric(cell).is_some() {
                ColumnKind::Float
            } else if cell.eq_ignore_ascii_case("true") || cell.eq_ignore_ascii_case("false") {
                ColumnKind::Boolean
            } else {
                return ColumnKind::Text;
            };
            kind = match (kind, cell_kind) {
                (ColumnKind::Empty, k) => k,
                (a, b) if a == b => a,
                (ColumnKind::Integer, ColumnKind::Float) | (ColumnKind::Float, ColumnKind::Integer) => {
                    ColumnKind::Float
                }
                _ => return ColumnKind::Text,
            };
        }
        kind
    }

    fn series(self, name: &str, cells: &[Option<String>]) -> Series {
        match self {
            ColumnKind::Integer => {
                let values: Vec<Option<i64>> = cells
                    .iter()
                    .map(|c| c.as_deref().and_then(|s| s.parse().ok()))
                    .collect();
                Series::new(name, values)
            }
            ColumnKind::Float => {
                let values: Vec<Option<f64>> =
                    cells.iter().map(|c| c.as_deref().and_then(parse_numeric)).collect();
                Series::new(name, values)
            }
            ColumnKind::Boolean => {
                let values: Vec<Option<bool>> = cells
                    .iter()
                    .map(|c| c.as_deref().map(|s| s.eq_ignore_ascii_case("true")))
                    .collect();
                Series::new(name, values)
            }
            ColumnKind::Text | ColumnKind::Empty => Series::new(name, cells.to_vec()),
        }
    }
}

/// Parse a cell as a number, ignoring surrounding whitespace.
pub fn parse_numeric(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Cells of a series as text; nulls stay `None`.
pub fn series_text(series: &Series) -> Result<Vec<Option<String>>, DomainError> {
    let text = series.cast(&DataType::String)?;
    Ok(text.str()?.into_iter().map(|v| v.map(str::to_string)).collect())
}

/// Cells of a numeric series as `f64`; nulls stay `None`.
pub fn series_f64(series: &Series) -> Result<Vec<Option<f64>>, DomainError> {
    let values = series.cast(&DataType::Float64)?;
    Ok(values.f64()?.into_iter().collect())
}

/// Make header names unique the way dataframe readers do: blanks become
/// `Unnamed: <i>` and repeats get a `.1`, `.2`, ... suffix.
fn unique_column_names(columns: Vec<String>) -> Vec<String> {
    let mut taken = HashSet::new();
    columns
        .into_iter()
        .enumerate()
        .map(|(index, column)| {
            let base = match column.trim() {
                "" => format!("Unnamed: {}", index),
                trimmed => trimmed.to_string(),
            };
            let mut name = base.clone();
            let mut suffix = 1;
            while !taken.insert(name.clone()) {
                name = format!("{}.{}", base, suffix);
                suffix += 1;
            }
            name
        })
        .collect()
}

/// The uploaded table as a typed polars frame (Entity)
///
/// Created once per load and never mutated afterwards; share it behind an
/// `Arc` when more than one component needs it.
#[derive(Debug, Clone)]
pub struct DatasetHandle {
    name: String,
    columns: Vec<String>,
    kinds: Vec<ColumnKind>,
    frame: DataFrame,
}

impl DatasetHandle {
    /// Build a dataset from raw cells.
    ///
    /// Short rows are padded with nulls. A row with more cells than the
    /// header is rejected rather than cut, so no value is silently lost.
    pub fn new(
        name: impl Into<String>,
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> Result<Self, DomainError> {
        if columns.is_empty() || columns.iter().all(|c| c.trim().is_empty()) {
            return Err(DomainError::EmptyHeader);
        }

        let columns = unique_column_names(columns);
        let width = columns.len();
        let mut cells: Vec<Vec<Option<String>>> = vec![Vec::with_capacity(rows.len()); width];
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() > width {
                return Err(DomainError::TooManyFields {
                    row: index + 1,
                    found: row.len(),
                    expected: width,
                });
            }
            let mut row = row.into_iter();
            for column in cells.iter_mut() {
                let cell = row
                    .next()
                    .map(|c| c.trim().to_string())
                    .filter(|c| !c.is_empty());
                column.push(cell);
            }
        }

        let (kinds, series): (Vec<ColumnKind>, Vec<Series>) = columns
            .iter()
            .zip(&cells)
            .map(|(name, values)| {
                let kind = ColumnKind::infer(values);
                (kind, kind.series(name, values))
            })
            .unzip();

        Ok(Self {
            name: name.into(),
            columns,
            kinds,
            frame: DataFrame::new(series)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn row_count(&self) -> usize {
        self.frame.height()
    }

    /// Column names rendered as a list literal, e.g. `['age', 'city']`.
    pub fn column_list(&self) -> String {
        let quoted: Vec<String> = self.columns.iter().map(|c| format!("'{}'", c)).collect();
        format!("[{}]", quoted.join(", "))
    }

    /// Resolve a column name to its index.
    ///
    /// Exact matches win; otherwise a case-insensitive match is accepted,
    /// since models tend to normalize capitalization.
    pub fn column_index(&self, name: &str) -> Result<usize, DomainError> {
        let wanted = name.trim();
        self.columns
            .iter()
            .position(|c| c == wanted)
            .or_else(|| {
                self.columns
                    .iter()
                    .position(|c| c.eq_ignore_ascii_case(wanted))
            })
            .ok_or_else(|| DomainError::UnknownColumn(name.to_string()))
    }

    pub fn column_kind(&self, index: usize) -> ColumnKind {
        self.kinds.get(index).copied().unwrap_or(ColumnKind::Empty)
    }

    /// First `n` rows, for previews.
    pub fn head(&self, n: usize) -> DataFrame {
        self.frame.head(Some(n))
    }
}

impl PartialEq for DatasetHandle {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.columns == other.columns
            && self.frame.equals_missing(&other.frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DatasetHandle {
        DatasetHandle::new(
            "people.csv",
            vec!["name".into(), "age".into(), "score".into(), "member".into()],
            vec![
                vec!["Ana".into(), "31".into(), "7.5".into(), "true".into()],
                vec!["Bo".into(), "45".into(), "8".into(), "false".into()],
                vec!["Cy".into(), "".into()],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_short_rows_are_padded_with_nulls() {
        let ds = sample();
        assert_eq!(ds.row_count(), 3);
        let member = series_text(ds.frame().column("member").unwrap()).unwrap();
        assert_eq!(member[2], None);
        assert_eq!(ds.frame().column("age").unwrap().null_count(), 1);
    }

    #[test]
    fn test_long_rows_are_rejected() {
        let result = DatasetHandle::new(
            "sales.csv",
            vec!["name".into(), "sales".into()],
            vec![
                vec!["north".into(), "10".into(), "999".into()],
                vec!["south".into(), "20".into()],
            ],
        );
        assert_eq!(
            result.unwrap_err(),
            DomainError::TooManyFields {
                row: 1,
                found: 3,
                expected: 2
            }
        );
    }

    #[test]
    fn test_empty_header_rejected() {
        assert_eq!(
            DatasetHandle::new("x.csv", vec![], vec![]),
            Err(DomainError::EmptyHeader)
        );
    }

    #[test]
    fn test_duplicate_and_blank_headers_renamed() {
        let ds = DatasetHandle::new(
            "x.csv",
            vec!["a".into(), "a".into(), " ".into()],
            vec![vec!["1".into(), "2".into(), "3".into()]],
        )
        .unwrap();
        assert_eq!(ds.columns(), ["a", "a.1", "Unnamed: 2"]);
        assert_eq!(ds.frame().get_column_names(), vec!["a", "a.1", "Unnamed: 2"]);
    }

    #[test]
    fn test_column_list_literal() {
        assert_eq!(sample().column_list(), "['name', 'age', 'score', 'member']");
    }

    #[test]
    fn test_column_index_case_insensitive() {
        let ds = sample();
        assert_eq!(ds.column_index("age").unwrap(), 1);
        assert_eq!(ds.column_index("Age").unwrap(), 1);
        assert!(matches!(
            ds.column_index("salary"),
            Err(DomainError::UnknownColumn(_))
        ));
    }

    #[test]
    fn test_column_kinds_match_frame_types() {
        let ds = sample();
        assert_eq!(ds.column_kind(0), ColumnKind::Text);
        assert_eq!(ds.column_kind(1), ColumnKind::Integer);
        assert_eq!(ds.column_kind(2), ColumnKind::Float);
        assert_eq!(ds.column_kind(3), ColumnKind::Boolean);
        assert_eq!(ds.frame().column("age").unwrap().dtype(), &DataType::Int64);
        assert_eq!(ds.frame().column("score").unwrap().dtype(), &DataType::Float64);
        assert_eq!(ds.frame().column("member").unwrap().dtype(), &DataType::Boolean);
    }

    #[test]
    fn test_series_f64_keeps_nulls() {
        let ds = sample();
        let ages = series_f64(ds.frame().column("age").unwrap()).unwrap();
        assert_eq!(ages, vec![Some(31.0), Some(45.0), None]);
    }

    #[test]
    fn test_head() {
        let head = sample().head(2);
        assert_eq!(head.height(), 2);
        assert_eq!(head.get_column_names()[0], "name");
    }
}
