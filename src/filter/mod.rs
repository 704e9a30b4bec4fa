//! Row filtering for survey record batches
//!
//! A small predicate language ([`Expr`]) evaluated into boolean masks, and the
//! helpers that apply those masks to record batches.

pub mod core;
pub mod expr;

pub use self::core::{BatchFilter, drop_where, filter_record_batch};
pub use self::expr::{Expr, ExpressionFilter, LiteralValue, evaluate_expr};
