//! Machine-readable summary of an analysis run.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{Result, SurveyError};
use crate::stats::{Percentages, Ranking, ValueCounts};
use crate::transform::CleaningSummary;

/// Bin edges with their counts
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

/// Everything the analysis computed, written as `summary.json`
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    pub rows_loaded: usize,
    pub columns_selected: usize,
    pub cleaning: CleaningSummary,
    pub years_code_pro_question: Option<String>,
    pub top_countries: ValueCounts,
    pub age_histogram: Histogram,
    pub gender_percentages: Percentages,
    pub ed_level_counts: ValueCounts,
    pub ed_level_percentages: Percentages,
    pub undergrad_major_percentages: Percentages,
    pub employment_percentages: Percentages,
    pub dev_type_totals: ValueCounts,
    /// Percentage of all developer-type selections naming data science
    pub data_science_share: Option<f64>,
    pub languages_worked: Percentages,
    pub languages_desired: Percentages,
    pub languages_loved: Percentages,
    /// Mean weekly hours of the best-represented countries
    pub work_hours_by_country: Ranking<f64>,
    pub age_first_code_histogram: Histogram,
    pub charts: Vec<PathBuf>,
}

impl AnalysisReport {
    /// Write the report as pretty-printed JSON
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| SurveyError::io_at(path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush().map_err(|e| SurveyError::io_at(path, e))?;
        log::info!("Wrote summary to {}", path.display());
        Ok(())
    }
}
