//! Module for reading survey CSV files into Arrow record batches.
//!
//! Every column is read as nullable UTF-8. Typing is left to the cleaning
//! step so that a stray "Less than 1 year" never aborts the load.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use arrow::compute::concat_batches;
use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use itertools::Itertools;
use regex::Regex;

use crate::config::CsvOptions;
use crate::error::util::safe_open_file;
use crate::error::{Result, SurveyError};
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// Build the regex matching any of the configured null tokens
pub fn null_regex(tokens: &[String]) -> Result<Regex> {
    let alternatives = tokens.iter().map(|t| regex::escape(t)).join("|");
    Regex::new(&format!("^(?:{alternatives})$"))
        .with_context(|| format!("Invalid null token set: {tokens:?}"))
        .map_err(SurveyError::from)
}

/// Read the header of a CSV file and return an all-UTF-8 schema
pub fn read_header(path: &Path, options: &CsvOptions) -> Result<SchemaRef> {
    let file = safe_open_file(path, "reading CSV header")?;
    let format = Format::default()
        .with_header(true)
        .with_delimiter(options.delimiter);
    let (inferred, _) = format
        .infer_schema(file, Some(0))
        .with_context(|| format!("Failed to read CSV header from {}", path.display()))?;

    let fields = inferred
        .fields()
        .iter()
        .map(|f| Field::new(f.name(), DataType::Utf8, true))
        .collect_vec();

    Ok(Arc::new(Schema::new(fields)))
}

/// Read a CSV file into a single record batch
///
/// # Arguments
/// * `path` - The CSV file
/// * `options` - Delimiter, batch size and null tokens
/// * `columns` - Optional projection; every name must exist in the header
///
/// # Returns
/// One record batch holding all rows, columns in projection order
pub fn read_csv(path: &Path, options: &CsvOptions, columns: Option<&[&str]>) -> Result<RecordBatch> {
    log_operation_start("Reading CSV", path);
    let start = Instant::now();

    let schema = read_header(path, options)?;

    let projection = columns
        .map(|names| {
            names
                .iter()
                .map(|name| {
                    schema
                        .index_of(name)
                        .map_err(|_| SurveyError::column_not_found(*name))
                })
                .collect::<Result<Vec<usize>>>()
        })
        .transpose()?;

    let file = safe_open_file(path, "reading CSV data")?;

    let output_schema = match &projection {
        Some(indices) => Arc::new(schema.project(indices)?),
        None => Arc::clone(&schema),
    };

    let mut builder = ReaderBuilder::new(Arc::clone(&schema))
        .with_header(true)
        .with_delimiter(options.delimiter)
        .with_batch_size(options.batch_size)
        .with_null_regex(null_regex(&options.null_tokens)?);
    if let Some(projection) = projection {
        builder = builder.with_projection(projection);
    }

    let reader = builder
        .build(file)
        .with_context(|| format!("Failed to build CSV reader for {}", path.display()))?;

    let batches = reader
        .map(|batch| {
            batch.with_context(|| format!("Failed to read record batch from {}", path.display()))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let batch = concat_batches(&output_schema, &batches)?;
    log_operation_complete("Read", path, batch.num_rows(), Some(start.elapsed()));
    Ok(batch)
}
