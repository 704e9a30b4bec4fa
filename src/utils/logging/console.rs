//! Human-readable tables printed to stdout
//!
//! Logging goes to stderr through `log`; these helpers write the analysis
//! results themselves so they can be piped or redirected separately.

use std::fmt::Display;

use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;

use crate::error::Result;
use crate::stats::{ColumnInfo, ColumnSummary, Ranking};

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"))
}

/// Section heading underlined to its own width
pub fn print_heading(title: &str) {
    println!();
    println!("{title}");
    println!("{}", "=".repeat(title.chars().count()));
}

/// Column name, non-null count and type, one line per column
pub fn print_info(rows: usize, columns: &[ColumnInfo]) {
    println!("{rows} rows, {} columns", columns.len());
    let width = columns.iter().map(|c| c.column.len()).max().unwrap_or(0);
    for (i, info) in columns.iter().enumerate() {
        println!(
            "{i:>3}  {:<width$}  {:>7} non-null  {}",
            info.column, info.non_null, info.data_type
        );
    }
}

/// Summary statistics
///
/// Numeric columns are printed as one row each; text columns list their
/// unique count and most frequent value.
pub fn print_describe(summaries: &[ColumnSummary]) {
    for summary in summaries {
        match summary {
            ColumnSummary::Numeric {
                column,
                count,
                mean,
                std,
                min,
                q25,
                median,
                q75,
                max,
            } => println!(
                "{column}: count {count}, mean {}, std {}, min {}, 25% {}, 50% {}, 75% {}, max {}",
                fmt_opt(*mean),
                fmt_opt(*std),
                fmt_opt(*min),
                fmt_opt(*q25),
                fmt_opt(*median),
                fmt_opt(*q75),
                fmt_opt(*max),
            ),
            ColumnSummary::Text {
                column,
                count,
                unique,
                top,
                freq,
            } => println!(
                "{column}: count {count}, unique {unique}, top {}, freq {}",
                top.as_deref().unwrap_or("-"),
                freq.map_or_else(|| "-".to_string(), |f| f.to_string()),
            ),
            ColumnSummary::Other { column, count } => println!("{column}: count {count}"),
        }
    }
}

/// Rows of a batch as an ASCII table
pub fn print_sample(batch: &RecordBatch) -> Result<()> {
    println!("{}", pretty_format_batches(std::slice::from_ref(batch))?);
    Ok(())
}

/// A ranking as `label  value` lines
pub fn print_ranking<T: Display>(title: &str, ranking: &Ranking<T>) {
    print_heading(title);
    let width = ranking.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    for (label, value) in ranking.iter() {
        println!("{label:<width$}  {value:.2}");
    }
}

/// Question text for a column, as shown before a chart
pub fn print_question(column: &str, text: &str) {
    println!("{column}: {text}");
}
