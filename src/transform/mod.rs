//! Column selection and cleaning of survey responses.
//!
//! Record batches are immutable, so every step returns a new batch.

pub mod multiselect;

use std::sync::Arc;

use arrow::array::Array;
use arrow::compute::{CastOptions, cast_with_options, nullif};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use itertools::Itertools;
use serde::Serialize;

use crate::config::CleaningRules;
use crate::error::Result;
use crate::filter::{Expr, LiteralValue, drop_where, evaluate_expr};
use crate::utils::arrow::get_column_index;

pub use multiselect::{MultiSelect, split_multiselect};

/// Project a batch onto the named columns, in the given order
///
/// # Errors
/// Fails with `ColumnNotFound` for the first unknown name
pub fn select_columns(batch: &RecordBatch, names: &[&str]) -> Result<RecordBatch> {
    let indices = names
        .iter()
        .map(|name| get_column_index(batch, name))
        .collect::<Result<Vec<_>>>()?;
    Ok(batch.project(&indices)?)
}

/// Convert the named columns to `Float64`
///
/// Values that do not parse as numbers become missing.
pub fn coerce_numeric(batch: &RecordBatch, names: &[&str]) -> Result<RecordBatch> {
    let options = CastOptions {
        safe: true,
        ..Default::default()
    };

    let targets = names
        .iter()
        .map(|name| get_column_index(batch, name))
        .collect::<Result<Vec<_>>>()?;

    let schema = batch.schema();
    let mut fields = Vec::with_capacity(batch.num_columns());
    let mut columns = Vec::with_capacity(batch.num_columns());

    for (idx, field) in schema.fields().iter().enumerate() {
        let column = batch.column(idx);
        if targets.contains(&idx) && field.data_type() != &DataType::Float64 {
            let before = column.len() - column.null_count();
            let converted = cast_with_options(column.as_ref(), &DataType::Float64, &options)?;
            let coerced = before - (converted.len() - converted.null_count());
            if coerced > 0 {
                log::debug!("{coerced} non-numeric values in '{}' set to missing", field.name());
            }
            fields.push(Field::new(field.name(), DataType::Float64, true));
            columns.push(converted);
        } else {
            fields.push(field.as_ref().clone());
            columns.push(Arc::clone(column));
        }
    }

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
}

/// Set every value of the rows matching `expr` to missing
///
/// The number of rows is unchanged.
pub fn blank_rows_where(batch: &RecordBatch, expr: &Expr) -> Result<RecordBatch> {
    let mask = evaluate_expr(batch, expr)?;

    let schema = batch.schema();
    let fields = schema
        .fields()
        .iter()
        .map(|f| f.as_ref().clone().with_nullable(true))
        .collect_vec();
    let columns = batch
        .columns()
        .iter()
        .map(|column| nullif(column.as_ref(), &mask))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
}

/// What the cleaning step did to the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CleaningSummary {
    /// Rows before cleaning
    pub rows_in: usize,
    /// Rows removed as outliers
    pub outliers_dropped: usize,
    /// Rows whose values were all set to missing
    pub rows_blanked: usize,
    /// Rows after cleaning
    pub rows_out: usize,
}

/// Predicate matching the outlier rows described by `rules`
#[must_use]
pub fn outlier_expr(rules: &CleaningRules) -> Expr {
    Expr::Or(vec![
        Expr::Lt("Age".into(), LiteralValue::Float(rules.min_age)),
        Expr::Gt("Age".into(), LiteralValue::Float(rules.max_age)),
        Expr::Gt(
            "WorkWeekHrs".into(),
            LiteralValue::Float(rules.max_work_week_hours),
        ),
    ])
}

/// Apply the full cleaning sequence
///
/// 1. coerce the numeric columns,
/// 2. drop age and working-hour outliers (missing values are kept),
/// 3. blank the rows with more than one gender answer.
pub fn clean_survey(batch: &RecordBatch, rules: &CleaningRules) -> Result<(RecordBatch, CleaningSummary)> {
    let rows_in = batch.num_rows();

    let numeric = rules.numeric_columns.iter().map(String::as_str).collect_vec();
    let coerced = coerce_numeric(batch, &numeric)?;

    let trimmed = drop_where(&coerced, &outlier_expr(rules))?;
    let outliers_dropped = rows_in - trimmed.num_rows();

    let multi_gender = Expr::Contains("Gender".into(), rules.gender_multi_marker.clone());
    let rows_blanked = evaluate_expr(&trimmed, &multi_gender)?.true_count();
    let cleaned = blank_rows_where(&trimmed, &multi_gender)?;

    let summary = CleaningSummary {
        rows_in,
        outliers_dropped,
        rows_blanked,
        rows_out: cleaned.num_rows(),
    };
    log::info!(
        "Cleaning dropped {} outlier rows and blanked {} rows ({} -> {})",
        summary.outliers_dropped,
        summary.rows_blanked,
        summary.rows_in,
        summary.rows_out
    );

    Ok((cleaned, summary))
}
