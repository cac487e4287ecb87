//! Chart data computed from a plan, ready to be rasterised

use super::plan::ChartKind;
use crate::core::string::format_number;

/// Values to draw
#[derive(Debug, Clone, PartialEq)]
pub enum ChartSeries {
    /// One bar or line point per label
    Categories { labels: Vec<String>, values: Vec<f64> },
    /// Free (x, y) pairs
    Points(Vec<(f64, f64)>),
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        match self {
            ChartSeries::Categories { values, .. } => values.len(),
            ChartSeries::Points(points) => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: ChartSeries,
}

impl ChartData {
    /// Plain-text summary, used when charts are not saved to disk.
    pub fn summary(&self) -> String {
        let mut out = format!("{} chart: {}", self.kind.as_str(), self.title);
        match &self.series {
            ChartSeries::Categories { labels, values } => {
                for (label, value) in labels.iter().zip(values).take(20) {
                    out.push_str(&format!("\n- {}: {}", label, format_number(*value)));
                }
                if labels.len() > 20 {
                    out.push_str(&format!("\n- ... {} more", labels.len() - 20));
                }
            }
            ChartSeries::Points(points) => {
                out.push_str(&format!(
                    "\n{} points of {} against {}",
                    points.len(),
                    self.y_label,
                    self.x_label
                ));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_lists_categories() {
        let chart = ChartData {
            kind: ChartKind::Bar,
            title: "sum of sales by region".to_string(),
            x_label: "region".to_string(),
            y_label: "sales".to_string(),
            series: ChartSeries::Categories {
                labels: vec!["north".into(), "south".into()],
                values: vec![10.0, 2.5],
            },
        };
        assert_eq!(
            chart.summary(),
            "bar chart: sum of sales by region\n- north: 10\n- south: 2.5"
        );
    }
}
