//! Splitting of multi-select answers into indicator columns.
//!
//! A multi-select answer such as `"Rust;Python;SQL"` becomes one boolean
//! column per option. Options are ordered by first appearance. Rows whose
//! answer is missing are missing in every indicator column.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, BooleanArray, StringArray};
use arrow::compute::and;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use itertools::Itertools;
use rustc_hash::FxHashMap;

use crate::error::{Result, SurveyError};
use crate::stats::{Percentages, Ranking, ValueCounts};

/// Indicator table produced by [`split_multiselect`]
#[derive(Debug, Clone)]
pub struct MultiSelect {
    options: Vec<String>,
    columns: Vec<BooleanArray>,
    num_rows: usize,
}

/// Split a column of delimited answers into one indicator column per option
///
/// For every non-missing row the value is split on `delimiter`; the row is
/// `true` in the columns of its options and `false` in all others. Missing
/// rows are skipped while collecting options and are null in the output.
#[must_use]
pub fn split_multiselect(column: &StringArray, delimiter: char) -> MultiSelect {
    let mut positions: FxHashMap<&str, usize> = FxHashMap::default();
    let mut options: Vec<String> = Vec::new();
    let mut hits: Vec<Vec<usize>> = Vec::new();

    for (row, value) in column.iter().enumerate() {
        let Some(value) = value else { continue };
        for option in value.split(delimiter) {
            let idx = *positions.entry(option).or_insert_with(|| {
                options.push(option.to_string());
                hits.push(Vec::new());
                options.len() - 1
            });
            hits[idx].push(row);
        }
    }

    // false for answered rows, null for unanswered ones
    let template: Vec<Option<bool>> = column.iter().map(|v| v.map(|_| false)).collect();

    let columns = hits
        .into_iter()
        .map(|rows| {
            let mut values = template.clone();
            for row in rows {
                values[row] = Some(true);
            }
            BooleanArray::from(values)
        })
        .collect_vec();

    log::debug!(
        "Split {} rows into {} options",
        column.len(),
        options.len()
    );

    MultiSelect {
        options,
        columns,
        num_rows: column.len(),
    }
}

impl MultiSelect {
    /// Option names in order of first appearance
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Indicator column for an option
    #[must_use]
    pub fn column(&self, option: &str) -> Option<&BooleanArray> {
        self.options
            .iter()
            .position(|o| o == option)
            .map(|idx| &self.columns[idx])
    }

    /// Number of rows, equal to the length of the source column
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Number of rows selecting `option`, zero for unknown options
    #[must_use]
    pub fn count(&self, option: &str) -> usize {
        self.column(option).map_or(0, BooleanArray::true_count)
    }

    /// The indicator table as a record batch, one nullable boolean column per option
    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        let fields = self
            .options
            .iter()
            .map(|o| Field::new(o, DataType::Boolean, true))
            .collect_vec();
        let columns = self
            .columns
            .iter()
            .map(|c| Arc::new(c.clone()) as ArrayRef)
            .collect_vec();

        if columns.is_empty() {
            let options = arrow::record_batch::RecordBatchOptions::new().with_row_count(Some(self.num_rows));
            return Ok(RecordBatch::try_new_with_options(
                Arc::new(Schema::empty()),
                columns,
                &options,
            )?);
        }
        Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
    }

    /// Number of selections per option, largest first
    #[must_use]
    pub fn totals(&self) -> ValueCounts {
        Ranking::from_unsorted(
            self.options
                .iter()
                .zip(&self.columns)
                .map(|(o, c)| (o.clone(), c.true_count()))
                .collect(),
        )
    }

    /// Percentage of all rows selecting each option, largest first
    ///
    /// Rows with a missing answer count in the denominator.
    #[must_use]
    pub fn share_of_rows(&self) -> Percentages {
        if self.num_rows == 0 {
            return Ranking::default();
        }
        let rows = self.num_rows as f64;
        Ranking::from_unsorted(
            self.options
                .iter()
                .zip(&self.columns)
                .map(|(o, c)| (o.clone(), c.true_count() as f64 * 100.0 / rows))
                .collect(),
        )
    }

    /// Element-wise AND with another indicator table, aligned by option name
    ///
    /// The result has the options of `self`; options absent from `other` are
    /// treated as never selected.
    pub fn and(&self, other: &Self) -> Result<Self> {
        if self.num_rows != other.num_rows {
            return Err(SurveyError::LengthMismatch {
                expected: self.num_rows,
                actual: other.num_rows,
            });
        }

        let never = BooleanArray::from(vec![false; self.num_rows]);
        let columns = self
            .options
            .iter()
            .zip(&self.columns)
            .map(|(option, left)| and(left, other.column(option).unwrap_or(&never)))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            options: self.options.clone(),
            columns,
            num_rows: self.num_rows,
        })
    }

    /// For each option of `self`, the percentage of its selectors who also
    /// selected it in `other`, largest first
    pub fn retention_percentages(&self, other: &Self) -> Result<Percentages> {
        let both = self.and(other)?;
        Ok(Ranking::from_unsorted(
            self.options
                .iter()
                .zip(&self.columns)
                .filter(|(_, c)| c.true_count() > 0)
                .map(|(option, c)| {
                    let kept = both.count(option) as f64;
                    (option.clone(), kept * 100.0 / c.true_count() as f64)
                })
                .collect(),
        ))
    }
}
