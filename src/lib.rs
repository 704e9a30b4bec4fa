//! Exploratory analysis of a developer survey stored as CSV.
//!
//! Responses are read into an Arrow [`RecordBatch`], cleaned, aggregated and
//! rendered as SVG charts. [`analysis::run`] executes the whole sequence.

pub mod analysis;
pub mod charts;
pub mod config;
pub mod error;
pub mod filter;
pub mod reader;
pub mod schema;
pub mod stats;
pub mod transform;
pub mod utils;

// Core types
pub use analysis::{AnalysisReport, run};
pub use config::{AnalysisConfig, ChartStyle, CleaningRules, CsvOptions};
pub use error::{Result, SurveyError};
pub use schema::QuestionSchema;

// Arrow types
pub use arrow::record_batch::RecordBatch;

// Data preparation
pub use filter::{Expr, LiteralValue, evaluate_expr, filter_record_batch};
pub use reader::read_csv;
pub use transform::{MultiSelect, clean_survey, split_multiselect};

// Aggregates
pub use stats::{Percentages, Ranking, ValueCounts, value_counts};
