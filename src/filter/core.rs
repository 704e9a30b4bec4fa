//! Core filtering functionality
//!
//! Common trait and functions for filtering Arrow record batches with
//! boolean masks.

use anyhow::Context;
use arrow::array::BooleanArray;
use arrow::compute::{filter_record_batch as arrow_filter_record_batch, not};
use arrow::record_batch::RecordBatch;

use crate::error::{Result, SurveyError};
use crate::filter::expr::{Expr, evaluate_expr};

/// Filter a record batch based on a boolean mask
///
/// # Arguments
/// * `batch` - The record batch to filter
/// * `mask` - The boolean mask indicating which rows to keep
///
/// # Returns
/// A new record batch with only rows where mask is true
///
/// # Errors
/// Returns an error if the mask length differs from the row count
pub fn filter_record_batch(batch: &RecordBatch, mask: &BooleanArray) -> Result<RecordBatch> {
    if batch.num_rows() != mask.len() {
        return Err(SurveyError::LengthMismatch {
            expected: batch.num_rows(),
            actual: mask.len(),
        });
    }

    let filtered = arrow_filter_record_batch(batch, mask)
        .with_context(|| "Failed to apply boolean filter to columns")?;
    Ok(filtered)
}

/// Remove every row matching `expr`
///
/// Rows where the predicate touches a missing value do not match and are kept.
pub fn drop_where(batch: &RecordBatch, expr: &Expr) -> Result<RecordBatch> {
    let matches = evaluate_expr(batch, expr)?;
    let keep = not(&matches)?;
    filter_record_batch(batch, &keep)
}

/// Trait for objects that can filter record batches
pub trait BatchFilter: std::fmt::Debug {
    /// Filter a record batch
    ///
    /// # Errors
    /// Returns an error if filtering fails
    fn filter(&self, batch: &RecordBatch) -> Result<RecordBatch>;

    /// Returns the set of column names required by this filter
    fn required_columns(&self) -> std::collections::HashSet<String>;
}
