//! Column overviews: data types, non-null counts and summary statistics.

use arrow::array::{Array, Float64Array, StringArray};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use serde::Serialize;

use crate::stats::counts::value_counts;
use crate::stats::distribution::{mean, quantile, std_dev};

/// Name, type and completeness of a column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnInfo {
    pub column: String,
    pub non_null: usize,
    pub data_type: String,
}

/// Summary statistics of one column
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnSummary {
    /// Numeric column; statistics are `None` when there are too few values
    Numeric {
        column: String,
        count: usize,
        mean: Option<f64>,
        std: Option<f64>,
        min: Option<f64>,
        q25: Option<f64>,
        median: Option<f64>,
        q75: Option<f64>,
        max: Option<f64>,
    },
    /// Text column
    Text {
        column: String,
        count: usize,
        unique: usize,
        top: Option<String>,
        freq: Option<usize>,
    },
    /// Any other column type, only counted
    Other { column: String, count: usize },
}

impl ColumnSummary {
    /// Column the summary belongs to
    #[must_use]
    pub fn column(&self) -> &str {
        match self {
            Self::Numeric { column, .. } | Self::Text { column, .. } | Self::Other { column, .. } => {
                column
            }
        }
    }
}

/// Name, non-null count and data type of every column
#[must_use]
pub fn info(batch: &RecordBatch) -> Vec<ColumnInfo> {
    batch
        .schema()
        .fields()
        .iter()
        .zip(batch.columns())
        .map(|(field, column)| ColumnInfo {
            column: field.name().clone(),
            non_null: column.len() - column.null_count(),
            data_type: field.data_type().to_string(),
        })
        .collect()
}

/// Summary statistics of every column
///
/// Quantiles use linear interpolation between closest ranks and the
/// standard deviation is the sample one (n - 1).
#[must_use]
pub fn describe(batch: &RecordBatch) -> Vec<ColumnSummary> {
    batch
        .schema()
        .fields()
        .iter()
        .zip(batch.columns())
        .map(|(field, column)| {
            let name = field.name().clone();
            match field.data_type() {
                DataType::Float64 => column
                    .as_any()
                    .downcast_ref::<Float64Array>()
                    .map_or_else(|| other(name.clone(), column.as_ref()), |a| numeric(name.clone(), a)),
                DataType::Utf8 => column
                    .as_any()
                    .downcast_ref::<StringArray>()
                    .map_or_else(|| other(name.clone(), column.as_ref()), |a| text(name.clone(), a)),
                _ => other(name, column.as_ref()),
            }
        })
        .collect()
}

fn numeric(column: String, array: &Float64Array) -> ColumnSummary {
    let mut values: Vec<f64> = array.iter().flatten().filter(|v| !v.is_nan()).collect();
    values.sort_by(f64::total_cmp);

    ColumnSummary::Numeric {
        column,
        count: values.len(),
        mean: mean(&values),
        std: std_dev(&values),
        min: values.first().copied(),
        q25: quantile(&values, 0.25),
        median: quantile(&values, 0.5),
        q75: quantile(&values, 0.75),
        max: values.last().copied(),
    }
}

fn text(column: String, array: &StringArray) -> ColumnSummary {
    let counts = value_counts(array);
    let top = counts.iter().next().map(|(label, freq)| (label.to_string(), *freq));

    ColumnSummary::Text {
        column,
        count: counts.total(),
        unique: counts.len(),
        top: top.as_ref().map(|(label, _)| label.clone()),
        freq: top.map(|(_, freq)| freq),
    }
}

fn other(column: String, array: &dyn Array) -> ColumnSummary {
    ColumnSummary::Other {
        column,
        count: array.len() - array.null_count(),
    }
}
