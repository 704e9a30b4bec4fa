//! Descriptive statistics over survey record batches.

pub mod counts;
pub mod describe;
pub mod distribution;
pub mod group;
pub mod sampling;

pub use counts::{Percentages, Ranking, ValueCounts, value_counts, value_counts_in_order, value_counts_of};
pub use describe::{ColumnInfo, ColumnSummary, describe, info};
pub use distribution::{bin_edges, equal_width_edges, gaussian_kde, histogram, mean, quantile, std_dev};
pub use group::{filter_by_min_count, group_mean};
pub use sampling::sample_rows;

/// Round to a fixed number of decimal places
#[must_use]
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}
