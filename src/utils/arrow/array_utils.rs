//! Utilities for working with Arrow arrays.

use arrow::array::{Array, ArrayRef, Float64Array, StringArray};
use arrow::record_batch::RecordBatch;

use crate::error::{Result, SurveyError};

/// Get the column index by name from a record batch
///
/// # Errors
/// Returns `ColumnNotFound` if the column does not exist
pub fn get_column_index(batch: &RecordBatch, column_name: &str) -> Result<usize> {
    batch
        .schema()
        .index_of(column_name)
        .map_err(|_| SurveyError::column_not_found(column_name))
}

/// Get a column from a record batch by name
pub fn get_column<'a>(batch: &'a RecordBatch, column_name: &str) -> Result<&'a ArrayRef> {
    let idx = get_column_index(batch, column_name)?;
    Ok(batch.column(idx))
}

/// Downcast a column to a specific array type with clear error messages
///
/// # Type Parameters
///
/// * `A` - The target array type to downcast to
///
/// # Arguments
///
/// * `array` - The array reference to downcast
/// * `column_name` - The name of the column (for error messages)
/// * `expected_type_name` - A human-readable name of the expected type (for error messages)
pub fn downcast_array<'a, A: Array + 'static>(
    array: &'a dyn Array,
    column_name: &str,
    expected_type_name: &str,
) -> Result<&'a A> {
    array
        .as_any()
        .downcast_ref::<A>()
        .ok_or_else(|| SurveyError::TypeMismatch {
            column: column_name.to_string(),
            expected: expected_type_name.to_string(),
            actual: array.data_type().to_string(),
        })
}

/// Get a UTF-8 column by name
pub fn string_column<'a>(batch: &'a RecordBatch, column_name: &str) -> Result<&'a StringArray> {
    downcast_array::<StringArray>(get_column(batch, column_name)?.as_ref(), column_name, "Utf8")
}

/// Get a Float64 column by name
///
/// Columns are only Float64 after numeric coercion, see
/// [`crate::transform::coerce_numeric`].
pub fn float_column<'a>(batch: &'a RecordBatch, column_name: &str) -> Result<&'a Float64Array> {
    downcast_array::<Float64Array>(get_column(batch, column_name)?.as_ref(), column_name, "Float64")
}
