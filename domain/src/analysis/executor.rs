//! Evaluates analysis plans against a dataset.
//!
//! Every plan compiles to one lazy polars query over the dataset frame.
//! Pure and deterministic: the same plan over the same table always gives
//! the same output. Rendering charts and talking to models happen elsewhere.

use super::chart::{ChartData, ChartSeries};
use super::outcome::StructuredValue;
use super::plan::{AggregateOp, AnalysisPlan, ChartKind, Filter, FilterOp};
use crate::core::error::DomainError;
use crate::core::string::format_number;
use crate::dataset::entities::{ColumnKind, DatasetHandle, parse_numeric, series_f64, series_text};
use polars::prelude::*;

const DEFAULT_VALUE_COUNTS_LIMIT: usize = 10;
const HISTOGRAM_BINS: usize = 10;

/// Result of running one plan
#[derive(Debug, Clone, PartialEq)]
pub enum PlanOutput {
    Text(String),
    Value(StructuredValue),
    Chart(ChartData),
}

/// Stateless plan evaluator
pub struct PlanExecutor;

impl PlanExecutor {
    pub fn execute(plan: &AnalysisPlan, dataset: &DatasetHandle) -> Result<PlanOutput, DomainError> {
        match plan {
            AnalysisPlan::Answer { text } => Ok(PlanOutput::Text(text.clone())),
            AnalysisPlan::CountRows { filters } => {
                let counted = filtered(dataset, filters)?
                    .select([len().alias("rows")])
                    .collect()?;
                Ok(PlanOutput::Value(StructuredValue::Integer(first_i64(&counted, "rows")?)))
            }
            AnalysisPlan::Aggregate {
                op,
                column,
                group_by,
                filters,
            } => {
                let value = resolve(dataset, column)?.operand(*op)?;
                match group_by {
                    Some(group) => {
                        let group = resolve(dataset, group)?;
                        grouped(dataset, filters, *op, value, group.name)
                            .map(|t| PlanOutput::Value(StructuredValue::Table(t)))
                    }
                    None => aggregate(dataset, filters, *op, value).map(PlanOutput::Value),
                }
            }
            AnalysisPlan::Describe { columns } => describe(dataset, columns).map(PlanOutput::Value),
            AnalysisPlan::ValueCounts { column, limit } => {
                let column = resolve(dataset, column)?;
                let limit = limit.unwrap_or(DEFAULT_VALUE_COUNTS_LIMIT);
                let table = value_counts(dataset, &[], column.name)?
                    .limit(limit as IdxSize)
                    .collect()?;
                Ok(PlanOutput::Value(StructuredValue::Table(table)))
            }
            AnalysisPlan::Top {
                column,
                n,
                descending,
                filters,
            } => {
                let column = resolve(dataset, column)?.numeric()?;
                // Stable sort keeps file order among equal values
                let table = filtered(dataset, filters)?
                    .filter(col(column).is_not_null())
                    .sort_by_exprs(
                        [col(column)],
                        SortMultipleOptions::default()
                            .with_order_descending(*descending)
                            .with_maintain_order(true),
                    )
                    .limit(*n as IdxSize)
                    .collect()?;
                Ok(PlanOutput::Value(StructuredValue::Table(table)))
            }
            AnalysisPlan::Chart {
                chart,
                x,
                y,
                agg,
                title,
                filters,
            } => chart_data(dataset, *chart, x, y.as_deref(), *agg, title.as_deref(), filters)
                .map(PlanOutput::Chart),
        }
    }
}

/// A plan's column reference resolved against the dataset
struct Column<'a> {
    name: &'a str,
    kind: ColumnKind,
}

impl<'a> Column<'a> {
    fn numeric(&self) -> Result<&'a str, DomainError> {
        if self.kind.is_numeric() {
            Ok(self.name)
        } else {
            Err(DomainError::NonNumericColumn(self.name.to_string()))
        }
    }

    /// Counting works on any column; everything else needs numbers.
    fn operand(&self, op: AggregateOp) -> Result<&'a str, DomainError> {
        match op {
            AggregateOp::Count => Ok(self.name),
            _ => self.numeric(),
        }
    }
}

fn resolve<'a>(dataset: &'a DatasetHandle, name: &str) -> Result<Column<'a>, DomainError> {
    let index = dataset.column_index(name)?;
    Ok(Column {
        name: &dataset.columns()[index],
        kind: dataset.column_kind(index),
    })
}

fn filtered(dataset: &DatasetHandle, filters: &[Filter]) -> Result<LazyFrame, DomainError> {
    let mut frame = dataset.frame().clone().lazy();
    for filter in filters {
        frame = frame.filter(filter_expr(dataset, filter)?);
    }
    Ok(frame)
}

fn filter_expr(dataset: &DatasetHandle, filter: &Filter) -> Result<Expr, DomainError> {
    let column = resolve(dataset, &filter.column)?;
    let wanted = match &filter.value {
        serde_json::Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    };
    let target = col(column.name);

    if filter.op == FilterOp::Contains {
        let text = target.cast(DataType::String).str().to_lowercase();
        return Ok(compare(text, filter.op, lit(wanted.to_lowercase())));
    }

    match column.kind {
        ColumnKind::Integer | ColumnKind::Float => {
            let value = parse_numeric(&wanted).ok_or_else(|| {
                DomainError::InvalidPlan(format!(
                    "column '{}' is numeric but the filter value '{}' is not",
                    column.name, wanted
                ))
            })?;
            Ok(compare(target.cast(DataType::Float64), filter.op, lit(value)))
        }
        ColumnKind::Boolean => {
            let value = match wanted.to_ascii_lowercase().as_str() {
                "true" => true,
                "false" => false,
                _ => {
                    return Err(DomainError::InvalidPlan(format!(
                        "column '{}' only holds true/false",
                        column.name
                    )));
                }
            };
            match filter.op {
                FilterOp::Eq | FilterOp::Ne => Ok(compare(target, filter.op, lit(value))),
                _ => Err(DomainError::InvalidPlan(format!(
                    "column '{}' only supports eq and ne",
                    column.name
                ))),
            }
        }
        // Equality ignores case; ordering compares the text as written
        ColumnKind::Text | ColumnKind::Empty => match filter.op {
            FilterOp::Eq | FilterOp::Ne => Ok(compare(
                target.str().to_lowercase(),
                filter.op,
                lit(wanted.to_lowercase()),
            )),
            _ => Ok(compare(target, filter.op, lit(wanted))),
        },
    }
}

fn compare(left: Expr, op: FilterOp, right: Expr) -> Expr {
    match op {
        FilterOp::Eq => left.eq(right),
        FilterOp::Ne => left.neq(right),
        FilterOp::Gt => left.gt(right),
        FilterOp::Ge => left.gt_eq(right),
        FilterOp::Lt => left.lt(right),
        FilterOp::Le => left.lt_eq(right),
        FilterOp::Contains => left.str().contains_literal(right),
    }
}

fn aggregate_expr(op: AggregateOp, column: &str) -> Expr {
    let values = col(column).cast(DataType::Float64);
    match op {
        AggregateOp::Count => col(column).count(),
        AggregateOp::Sum => values.sum(),
        AggregateOp::Mean => values.mean(),
        AggregateOp::Min => values.min(),
        AggregateOp::Max => values.max(),
        AggregateOp::Median => values.median(),
    }
}

fn first_i64(frame: &DataFrame, column: &str) -> Result<i64, DomainError> {
    let values = frame.column(column)?.cast(&DataType::Int64)?;
    Ok(values.i64()?.get(0).unwrap_or(0))
}

fn first_f64(frame: &DataFrame, column: &str) -> Result<Option<f64>, DomainError> {
    let values = frame.column(column)?.cast(&DataType::Float64)?;
    Ok(values.f64()?.get(0))
}

fn aggregate(
    dataset: &DatasetHandle,
    filters: &[Filter],
    op: AggregateOp,
    column: &str,
) -> Result<StructuredValue, DomainError> {
    let result = filtered(dataset, filters)?
        .select([aggregate_expr(op, column).alias("value")])
        .collect()?;

    if op == AggregateOp::Count {
        return Ok(StructuredValue::Integer(first_i64(&result, "value")?));
    }
    first_f64(&result, "value")?
        .map(StructuredValue::Float)
        .ok_or_else(|| DomainError::NoMatchingRows(column.to_string()))
}

/// One row per group in first-seen order, holding `op(column)`.
fn grouped(
    dataset: &DatasetHandle,
    filters: &[Filter],
    op: AggregateOp,
    column: &str,
    group_by: &str,
) -> Result<DataFrame, DomainError> {
    let label = format!("{}({})", op.as_str(), column);
    let mut frame = filtered(dataset, filters)?.filter(col(group_by).is_not_null());
    if op != AggregateOp::Count {
        frame = frame.filter(col(column).is_not_null());
    }
    Ok(frame
        .group_by_stable([col(group_by)])
        .agg([aggregate_expr(op, column).alias(&label)])
        .collect()?)
}

fn describe(dataset: &DatasetHandle, columns: &[String]) -> Result<StructuredValue, DomainError> {
    let selected: Vec<&str> = if columns.is_empty() {
        (0..dataset.columns().len())
            .filter(|&i| dataset.column_kind(i).is_numeric())
            .map(|i| dataset.columns()[i].as_str())
            .collect()
    } else {
        columns
            .iter()
            .map(|c| resolve(dataset, c)?.numeric())
            .collect::<Result<_, _>>()?
    };
    if selected.is_empty() {
        return Err(DomainError::InvalidPlan(
            "the table has no numeric columns to describe".to_string(),
        ));
    }

    let mut counts = Vec::with_capacity(selected.len());
    let mut means = Vec::with_capacity(selected.len());
    let mut mins = Vec::with_capacity(selected.len());
    let mut maxes = Vec::with_capacity(selected.len());
    for &column in &selected {
        let values = col(column).cast(DataType::Float64);
        let stats = dataset
            .frame()
            .clone()
            .lazy()
            .select([
                col(column).count().alias("count"),
                values.clone().mean().alias("mean"),
                values.clone().min().alias("min"),
                values.max().alias("max"),
            ])
            .collect()?;
        counts.push(first_i64(&stats, "count")?);
        means.push(first_f64(&stats, "mean")?);
        mins.push(first_f64(&stats, "min")?);
        maxes.push(first_f64(&stats, "max")?);
    }

    let table = DataFrame::new(vec![
        Series::new("column", selected),
        Series::new("count", counts),
        Series::new("mean", means),
        Series::new("min", mins),
        Series::new("max", maxes),
    ])?;
    Ok(StructuredValue::Table(table))
}

/// Distinct values with their counts, most frequent first, ties by value.
fn value_counts(
    dataset: &DatasetHandle,
    filters: &[Filter],
    column: &str,
) -> Result<LazyFrame, DomainError> {
    let count = if column == "count" { "rows" } else { "count" };
    Ok(filtered(dataset, filters)?
        .filter(col(column).is_not_null())
        .group_by([col(column)])
        .agg([len().alias(count)])
        .sort_by_exprs(
            [col(count), col(column)],
            SortMultipleOptions::default().with_order_descendings([true, false]),
        ))
}

/// Split a two-column result into chart labels and values.
fn categories(frame: &DataFrame) -> Result<(Vec<String>, Vec<f64>), DomainError> {
    let columns = frame.get_columns();
    let (Some(keys), Some(values)) = (columns.first(), columns.get(1)) else {
        return Ok((Vec::new(), Vec::new()));
    };
    let labels = series_text(keys)?
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect();
    let values = series_f64(values)?
        .into_iter()
        .map(|v| v.unwrap_or(0.0))
        .collect();
    Ok((labels, values))
}

fn histogram(values: &[f64]) -> (Vec<String>, Vec<f64>) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min == max {
        return (vec![format_number(min)], vec![values.len() as f64]);
    }

    let width = (max - min) / HISTOGRAM_BINS as f64;
    let mut counts = vec![0.0; HISTOGRAM_BINS];
    for v in values {
        let bin = (((v - min) / width) as usize).min(HISTOGRAM_BINS - 1);
        counts[bin] += 1.0;
    }
    let labels = (0..HISTOGRAM_BINS)
        .map(|i| {
            let lo = min + width * i as f64;
            format!("{}-{}", format_number(lo), format_number(lo + width))
        })
        .collect();
    (labels, counts)
}

fn chart_data(
    dataset: &DatasetHandle,
    kind: ChartKind,
    x: &str,
    y: Option<&str>,
    agg: Option<AggregateOp>,
    title: Option<&str>,
    filters: &[Filter],
) -> Result<ChartData, DomainError> {
    let x = resolve(dataset, x)?;
    let x_label = x.name.to_string();

    let (series, y_label, default_title) = match (kind, y) {
        (ChartKind::Histogram, _) => {
            let column = x.numeric()?;
            let result = filtered(dataset, filters)?
                .select([col(column).cast(DataType::Float64)])
                .collect()?;
            let values: Vec<f64> = series_f64(result.column(column)?)?.into_iter().flatten().collect();
            if values.is_empty() {
                return Err(DomainError::NoMatchingRows(column.to_string()));
            }
            let (labels, counts) = histogram(&values);
            (
                ChartSeries::Categories {
                    labels,
                    values: counts,
                },
                "count".to_string(),
                format!("distribution of {}", x_label),
            )
        }
        (ChartKind::Scatter, Some(y)) => {
            let x_column = x.numeric()?;
            let y_column = resolve(dataset, y)?.numeric()?;
            let result = filtered(dataset, filters)?
                .filter(col(x_column).is_not_null().and(col(y_column).is_not_null()))
                .select([
                    col(x_column).cast(DataType::Float64).alias("x"),
                    col(y_column).cast(DataType::Float64).alias("y"),
                ])
                .collect()?;
            let points: Vec<(f64, f64)> = series_f64(result.column("x")?)?
                .into_iter()
                .zip(series_f64(result.column("y")?)?)
                .filter_map(|(x, y)| Some((x?, y?)))
                .collect();
            if points.is_empty() {
                return Err(DomainError::NoMatchingRows(format!("{}/{}", x_column, y_column)));
            }
            let y_label = y_column.to_string();
            let title = format!("{} vs {}", y_label, x_label);
            (ChartSeries::Points(points), y_label, title)
        }
        (ChartKind::Scatter, None) => {
            return Err(DomainError::InvalidPlan(
                "scatter chart needs both x and y".to_string(),
            ));
        }
        (_, Some(y)) => {
            let op = agg.unwrap_or(AggregateOp::Sum);
            let y_column = resolve(dataset, y)?.operand(op)?;
            let (labels, values) = categories(&grouped(dataset, filters, op, y_column, x.name)?)?;
            let y_label = format!("{}({})", op.as_str(), y_column);
            let title = format!("{} by {}", y_label, x_label);
            (ChartSeries::Categories { labels, values }, y_label, title)
        }
        (_, None) => {
            let counts = value_counts(dataset, filters, x.name)?.collect()?;
            let (labels, values) = categories(&counts)?;
            (
                ChartSeries::Categories { labels, values },
                "count".to_string(),
                format!("count by {}", x_label),
            )
        }
    };

    Ok(ChartData {
        kind,
        title: title.map(str::to_string).unwrap_or(default_title),
        x_label,
        y_label,
        series,
    })
}
