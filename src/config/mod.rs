//! Configuration for the survey analysis.

use std::path::PathBuf;

use crate::error::{Result, SurveyError};

/// Default batch size for CSV reading
pub const DEFAULT_BATCH_SIZE: usize = 8192;

/// Tokens that are read as missing values
pub const DEFAULT_NULL_TOKENS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "null", "#N/A"];

/// Options for reading CSV files
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Field delimiter
    pub delimiter: u8,
    /// Number of rows per record batch while reading
    pub batch_size: usize,
    /// Cell values that are treated as missing
    pub null_tokens: Vec<String>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            batch_size: DEFAULT_BATCH_SIZE,
            null_tokens: DEFAULT_NULL_TOKENS.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

/// Rules applied while cleaning the responses
#[derive(Debug, Clone)]
pub struct CleaningRules {
    /// Columns coerced to numbers, unparsable values become missing
    pub numeric_columns: Vec<String>,
    /// Respondents younger than this are dropped
    pub min_age: f64,
    /// Respondents older than this are dropped
    pub max_age: f64,
    /// Respondents reporting more weekly hours than this are dropped
    pub max_work_week_hours: f64,
    /// Rows whose gender answer contains this are blanked
    pub gender_multi_marker: String,
}

impl Default for CleaningRules {
    fn default() -> Self {
        Self {
            numeric_columns: ["Age", "WorkWeekHrs", "Age1stCode", "YearsCode", "YearsCodePro"]
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            min_age: 10.0,
            max_age: 100.0,
            max_work_week_hours: 140.0,
            gender_multi_marker: ";".to_string(),
        }
    }
}

/// Chart sizing and styling
#[derive(Debug, Clone, Copy)]
pub struct ChartStyle {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Base font size in pixels
    pub font_size: u32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 600,
            font_size: 14,
        }
    }
}

impl ChartStyle {
    /// Same style with a square canvas, used for long category lists
    #[must_use]
    pub fn tall(self) -> Self {
        Self {
            height: self.width,
            ..self
        }
    }
}

/// Configuration for a full analysis run
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Survey responses CSV
    pub results_path: PathBuf,
    /// Question text CSV (`Column`, `QuestionText`)
    pub schema_path: PathBuf,
    /// Directory receiving charts and the JSON summary
    pub output_dir: PathBuf,
    /// CSV reading options
    pub csv: CsvOptions,
    /// Cleaning thresholds
    pub cleaning: CleaningRules,
    /// Chart sizing
    pub chart_style: ChartStyle,
    /// Delimiter between options in multi-select answers
    pub multiselect_delimiter: char,
    /// Number of rows printed as a sample
    pub sample_size: usize,
    /// Seed for the printed sample
    pub sample_seed: u64,
    /// Countries need strictly more responses than this to be ranked by hours
    pub min_country_responses: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            results_path: PathBuf::from("survey_results_public.csv"),
            schema_path: PathBuf::from("survey_results_schema.csv"),
            output_dir: PathBuf::from("figures"),
            csv: CsvOptions::default(),
            cleaning: CleaningRules::default(),
            chart_style: ChartStyle::default(),
            multiselect_delimiter: ';',
            sample_size: 10,
            sample_seed: 42,
            min_country_responses: 250,
        }
    }
}

impl AnalysisConfig {
    /// Default configuration with environment overrides applied
    ///
    /// Recognised variables: `SURVEY_RESULTS_PATH`, `SURVEY_SCHEMA_PATH`,
    /// `SURVEY_OUTPUT_DIR`, `SURVEY_BATCH_SIZE`, `SURVEY_SAMPLE_SEED`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("SURVEY_RESULTS_PATH") {
            config.results_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("SURVEY_SCHEMA_PATH") {
            config.schema_path = PathBuf::from(path);
        }
        if let Some(dir) = lookup("SURVEY_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup("SURVEY_BATCH_SIZE") {
            let size = raw
                .parse::<usize>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or_else(|| SurveyError::Config(format!("invalid SURVEY_BATCH_SIZE: {raw}")))?;
            config.csv.batch_size = size;
        }
        if let Some(raw) = lookup("SURVEY_SAMPLE_SEED") {
            config.sample_seed = raw
                .parse::<u64>()
                .map_err(|e| SurveyError::Config(format!("invalid SURVEY_SAMPLE_SEED: {e}")))?;
        }

        Ok(config)
    }
}
