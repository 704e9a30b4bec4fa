//! Arrow data handling utilities
//!
//! Helpers for looking up columns by name and downcasting them to the
//! concrete array types the analysis works with.

pub mod array_utils;

pub use array_utils::{
    downcast_array, float_column, get_column, get_column_index, string_column,
};
