//! Grouped aggregates.

use rustc_hash::FxHashMap;

use arrow::record_batch::RecordBatch;

use crate::error::Result;
use crate::stats::counts::{Ranking, ValueCounts};
use crate::utils::arrow::{float_column, string_column};

/// Mean of `value` per distinct `key`, highest mean first
///
/// Rows with a missing key or value are skipped; keys without any value
/// do not appear.
pub fn group_mean(batch: &RecordBatch, key: &str, value: &str) -> Result<Ranking<f64>> {
    let keys = string_column(batch, key)?;
    let values = float_column(batch, value)?;

    let mut sums: FxHashMap<&str, (f64, usize)> = FxHashMap::default();
    for (k, v) in keys.iter().zip(values.iter()) {
        if let (Some(k), Some(v)) = (k, v) {
            if v.is_nan() {
                continue;
            }
            let entry = sums.entry(k).or_insert((0.0, 0));
            entry.0 += v;
            entry.1 += 1;
        }
    }

    Ok(Ranking::from_unsorted(
        sums.into_iter()
            .map(|(k, (sum, n))| (k.to_string(), sum / n as f64))
            .collect(),
    ))
}

/// Keep the groups whose count is strictly greater than `min`
#[must_use]
pub fn filter_by_min_count(means: Ranking<f64>, counts: &ValueCounts, min: usize) -> Ranking<f64> {
    means.retain(|label, _| counts.get(label).is_some_and(|c| *c > min))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::counts::value_counts;
    use arrow::array::{Float64Array, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};
    use std::sync::Arc;

    fn batch() -> RecordBatch {
        let schema = Schema::new(vec![
            Field::new("Country", DataType::Utf8, true),
            Field::new("WorkWeekHrs", DataType::Float64, true),
        ]);
        RecordBatch::try_new(
            Arc::new(schema),
            vec![
                Arc::new(StringArray::from(vec![
                    Some("Iran"),
                    Some("Iran"),
                    Some("Israel"),
                    Some("Israel"),
                    Some("Israel"),
                    None,
                    Some("Chad"),
                ])),
                Arc::new(Float64Array::from(vec![
                    Some(50.0),
                    Some(46.0),
                    Some(40.0),
                    None,
                    Some(44.0),
                    Some(90.0),
                    None,
                ])),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_group_mean() {
        let means = group_mean(&batch(), "Country", "WorkWeekHrs").unwrap();
        assert_eq!(means.labels(), vec!["Iran", "Israel"]);
        assert_eq!(means.get("Iran"), Some(&48.0));
        assert_eq!(means.get("Israel"), Some(&42.0));
        assert_eq!(means.get("Chad"), None);
    }

    #[test]
    fn test_filter_by_min_count_is_strict() {
        let batch = batch();
        let means = group_mean(&batch, "Country", "WorkWeekHrs").unwrap();
        let counts = value_counts(string_column(&batch, "Country").unwrap());
        let kept = filter_by_min_count(means, &counts, 2);
        assert_eq!(kept.labels(), vec!["Israel"]);
    }
}
