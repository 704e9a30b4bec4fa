//! Expression-based filtering for survey data
//!
//! Expressions are evaluated into non-null boolean masks. A comparison that
//! touches a missing value evaluates to `false`, so `Not` of a comparison is
//! `true` for missing values.

use std::collections::HashSet;

use arrow::array::{Array, ArrayRef, BooleanArray, Datum, Float64Array, StringArray};
use arrow::compute::kernels::cmp::{eq, gt, gt_eq, lt, lt_eq};
use arrow::compute::kernels::filter::prep_null_mask_filter;
use arrow::compute::{and, cast, is_not_null, is_null, not, or};
use arrow::datatypes::DataType;
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;

use crate::error::{Result, SurveyError};
use crate::filter::core::{BatchFilter, filter_record_batch};
use crate::utils::arrow::{downcast_array, get_column};

/// Represents a filter expression over survey columns
#[derive(Debug, Clone)]
pub enum Expr {
    /// Column equals a literal value
    Eq(String, LiteralValue),

    /// Column is greater than a literal value
    Gt(String, LiteralValue),

    /// Column is greater than or equal to a literal value
    GtEq(String, LiteralValue),

    /// Column is less than a literal value
    Lt(String, LiteralValue),

    /// Column is less than or equal to a literal value
    LtEq(String, LiteralValue),

    /// Column is null
    IsNull(String),

    /// Column is not null
    IsNotNull(String),

    /// Column value contains a substring
    Contains(String, String),

    /// Logical AND of expressions
    And(Vec<Expr>),

    /// Logical OR of expressions
    Or(Vec<Expr>),

    /// Logical NOT of an expression
    Not(Box<Expr>),

    /// Always evaluates to true
    AlwaysTrue,

    /// Always evaluates to false
    AlwaysFalse,
}

/// Represents a literal value that can be used in filter expressions
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// Integer value, compared as a float against numeric columns
    Int(i64),

    /// Floating point value
    Float(f64),

    /// String value
    String(String),
}

#[derive(Clone, Copy)]
enum CmpOp {
    Eq,
    Gt,
    GtEq,
    Lt,
    LtEq,
}

impl CmpOp {
    fn apply(self, lhs: &dyn Datum, rhs: &dyn Datum) -> std::result::Result<BooleanArray, ArrowError> {
        match self {
            Self::Eq => eq(lhs, rhs),
            Self::Gt => gt(lhs, rhs),
            Self::GtEq => gt_eq(lhs, rhs),
            Self::Lt => lt(lhs, rhs),
            Self::LtEq => lt_eq(lhs, rhs),
        }
    }
}

impl Expr {
    /// Returns a set of all column names required by this expression
    #[must_use]
    pub fn required_columns(&self) -> HashSet<String> {
        let mut columns = HashSet::new();
        self.collect_required_columns(&mut columns);
        columns
    }

    fn collect_required_columns(&self, columns: &mut HashSet<String>) {
        match self {
            Self::Eq(col, _)
            | Self::Gt(col, _)
            | Self::GtEq(col, _)
            | Self::Lt(col, _)
            | Self::LtEq(col, _)
            | Self::IsNull(col)
            | Self::IsNotNull(col)
            | Self::Contains(col, _) => {
                columns.insert(col.clone());
            }
            Self::And(exprs) | Self::Or(exprs) => {
                for expr in exprs {
                    expr.collect_required_columns(columns);
                }
            }
            Self::Not(expr) => {
                expr.collect_required_columns(columns);
            }
            Self::AlwaysTrue | Self::AlwaysFalse => {}
        }
    }

    /// Shorthand for `Not`
    #[must_use]
    pub fn negate(self) -> Self {
        Self::Not(Box::new(self))
    }
}

/// Evaluate an expression against a record batch
///
/// # Returns
/// A boolean array without nulls, `true` for matching rows
///
/// # Errors
/// Returns an error if a column is missing or has an unsupported type
pub fn evaluate_expr(batch: &RecordBatch, expr: &Expr) -> Result<BooleanArray> {
    match expr {
        Expr::AlwaysTrue => Ok(BooleanArray::from(vec![true; batch.num_rows()])),
        Expr::AlwaysFalse => Ok(BooleanArray::from(vec![false; batch.num_rows()])),

        Expr::And(exprs) => {
            let mut result = BooleanArray::from(vec![true; batch.num_rows()]);
            for expr in exprs {
                let mask = evaluate_expr(batch, expr)?;
                result = and(&result, &mask)?;
            }
            Ok(result)
        }

        Expr::Or(exprs) => {
            let mut result = BooleanArray::from(vec![false; batch.num_rows()]);
            for expr in exprs {
                let mask = evaluate_expr(batch, expr)?;
                result = or(&result, &mask)?;
            }
            Ok(result)
        }

        Expr::Not(expr) => {
            let mask = evaluate_expr(batch, expr)?;
            Ok(not(&mask)?)
        }

        Expr::Eq(col, value) => evaluate_comparison(batch, col, value, CmpOp::Eq),
        Expr::Gt(col, value) => evaluate_comparison(batch, col, value, CmpOp::Gt),
        Expr::GtEq(col, value) => evaluate_comparison(batch, col, value, CmpOp::GtEq),
        Expr::Lt(col, value) => evaluate_comparison(batch, col, value, CmpOp::Lt),
        Expr::LtEq(col, value) => evaluate_comparison(batch, col, value, CmpOp::LtEq),

        Expr::IsNull(col) => Ok(is_null(get_column(batch, col)?.as_ref())?),
        Expr::IsNotNull(col) => Ok(is_not_null(get_column(batch, col)?.as_ref())?),

        Expr::Contains(col, needle) => evaluate_contains(batch, col, needle),
    }
}

fn evaluate_comparison(
    batch: &RecordBatch,
    col_name: &str,
    literal: &LiteralValue,
    op: CmpOp,
) -> Result<BooleanArray> {
    let column = get_column(batch, col_name)?;

    let raw = match literal {
        LiteralValue::String(s) => {
            let strings = downcast_array::<StringArray>(column.as_ref(), col_name, "Utf8")?;
            op.apply(strings, &StringArray::new_scalar(s.as_str()))?
        }
        LiteralValue::Int(n) => compare_numeric(column, col_name, *n as f64, op)?,
        LiteralValue::Float(x) => compare_numeric(column, col_name, *x, op)?,
    };

    // Comparisons against missing values never match
    if raw.null_count() == 0 {
        return Ok(raw);
    }
    Ok(prep_null_mask_filter(&raw))
}

fn compare_numeric(column: &ArrayRef, col_name: &str, value: f64, op: CmpOp) -> Result<BooleanArray> {
    if !column.data_type().is_numeric() {
        return Err(SurveyError::TypeMismatch {
            column: col_name.to_string(),
            expected: "numeric".to_string(),
            actual: column.data_type().to_string(),
        });
    }

    let floats = if column.data_type() == &DataType::Float64 {
        column.clone()
    } else {
        cast(column.as_ref(), &DataType::Float64)?
    };
    let floats = downcast_array::<Float64Array>(floats.as_ref(), col_name, "Float64")?;

    Ok(op.apply(floats, &Float64Array::new_scalar(value))?)
}

fn evaluate_contains(batch: &RecordBatch, col_name: &str, needle: &str) -> Result<BooleanArray> {
    let strings = downcast_array::<StringArray>(get_column(batch, col_name)?.as_ref(), col_name, "Utf8")?;

    Ok(strings
        .iter()
        .map(|value| Some(value.is_some_and(|v| v.contains(needle))))
        .collect())
}

/// A filter that keeps the rows matching an expression
#[derive(Debug, Clone)]
pub struct ExpressionFilter {
    expr: Expr,
}

impl ExpressionFilter {
    /// Create a new expression filter
    #[must_use]
    pub fn new(expr: Expr) -> Self {
        Self { expr }
    }

    /// The wrapped expression
    #[must_use]
    pub fn expr(&self) -> &Expr {
        &self.expr
    }
}

impl BatchFilter for ExpressionFilter {
    fn filter(&self, batch: &RecordBatch) -> Result<RecordBatch> {
        let mask = evaluate_expr(batch, &self.expr)?;
        filter_record_batch(batch, &mask)
    }

    fn required_columns(&self) -> HashSet<String> {
        self.expr.required_columns()
    }
}
