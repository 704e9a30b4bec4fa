//! Question text lookup for survey columns.
//!
//! The survey ships a second CSV with two columns, `Column` and
//! `QuestionText`, mapping every response column to the question that was
//! asked. It is used for chart titles.

use std::path::Path;

use arrow::array::Array;

use crate::config::CsvOptions;
use crate::error::{Result, SurveyError};
use crate::reader::read_csv;
use crate::utils::arrow::string_column;

/// Name of the key column in the schema file
pub const COLUMN_KEY: &str = "Column";

/// Name of the question text column in the schema file
pub const QUESTION_TEXT: &str = "QuestionText";

/// Ordered mapping from column name to question text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionSchema {
    entries: Vec<(String, String)>,
}

impl QuestionSchema {
    /// Build a schema from `(column, question)` pairs
    ///
    /// Later duplicates of a column name are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut schema = Self::default();
        for (column, question) in pairs {
            let column = column.into();
            if schema.question(&column).is_none() {
                schema.entries.push((column, question.into()));
            }
        }
        schema
    }

    /// Load the schema file
    pub fn load(path: &Path, options: &CsvOptions) -> Result<Self> {
        let batch = read_csv(path, options, Some(&[COLUMN_KEY, QUESTION_TEXT]))?;
        let columns = string_column(&batch, COLUMN_KEY)?;
        let questions = string_column(&batch, QUESTION_TEXT)?;

        let pairs = (0..batch.num_rows())
            .filter(|&row| !columns.is_null(row))
            .map(|row| {
                let question = if questions.is_null(row) {
                    ""
                } else {
                    questions.value(row)
                };
                (columns.value(row), question)
            });

        Ok(Self::from_pairs(pairs))
    }

    /// Question text for a column, if known
    #[must_use]
    pub fn question(&self, column: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, question)| question.as_str())
    }

    /// Question text for a column, failing when the column is unknown
    pub fn require(&self, column: &str) -> Result<&str> {
        self.question(column)
            .ok_or_else(|| SurveyError::QuestionNotFound {
                column: column.to_string(),
            })
    }

    /// Question text for a column, or the column name itself
    #[must_use]
    pub fn title_for<'a>(&'a self, column: &'a str) -> &'a str {
        self.question(column).unwrap_or(column)
    }

    /// Subset of the schema in the given column order
    ///
    /// # Errors
    /// Fails with `QuestionNotFound` for the first column that has no entry
    pub fn select(&self, columns: &[&str]) -> Result<Self> {
        let entries = columns
            .iter()
            .map(|column| {
                self.require(column)
                    .map(|question| ((*column).to_string(), question.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    /// Number of columns described
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no column is described
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(column, question)` pairs in file order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(c, q)| (c.as_str(), q.as_str()))
    }
}
