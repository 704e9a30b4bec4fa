//! Moments, quantiles, histograms and kernel density estimates.

use std::f64::consts::PI;

/// Arithmetic mean, `None` for no values
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1), `None` for fewer than two values
#[must_use]
pub fn std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

/// Quantile of already sorted values with linear interpolation
#[must_use]
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Evenly spaced edges from `start` up to but excluding `stop`
#[must_use]
pub fn bin_edges(start: f64, stop: f64, step: f64) -> Vec<f64> {
    if step <= 0.0 || stop <= start {
        return Vec::new();
    }
    let n = ((stop - start) / step).ceil() as usize;
    (0..n).map(|i| start + i as f64 * step).collect()
}

/// `bins + 1` edges spanning `[min, max]`
///
/// A degenerate range is widened by half a unit on both sides.
#[must_use]
pub fn equal_width_edges(min: f64, max: f64, bins: usize) -> Vec<f64> {
    if bins == 0 {
        return Vec::new();
    }
    let (lo, hi) = if (max - min).abs() < f64::EPSILON {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    };
    let width = (hi - lo) / bins as f64;
    (0..=bins).map(|i| lo + i as f64 * width).collect()
}

/// Count values per bin
///
/// Bins are half-open `[edge_i, edge_i+1)` except the last, which also
/// includes its right edge. Values outside the edges and NaN are ignored.
#[must_use]
pub fn histogram<I>(values: I, edges: &[f64]) -> Vec<usize>
where
    I: IntoIterator<Item = f64>,
{
    if edges.len() < 2 {
        return Vec::new();
    }
    let mut counts = vec![0; edges.len() - 1];
    let first = edges[0];
    let last = edges[edges.len() - 1];

    for value in values {
        if value.is_nan() || value < first || value > last {
            continue;
        }
        let bin = if value == last {
            counts.len() - 1
        } else {
            edges.partition_point(|edge| *edge <= value) - 1
        };
        counts[bin] += 1;
    }
    counts
}

/// Gaussian kernel density estimate evaluated at `points`
///
/// The bandwidth is Scott's factor `n^(-1/5)` times the sample standard
/// deviation. Fewer than two values or zero spread yields zeros.
#[must_use]
pub fn gaussian_kde(values: &[f64], points: &[f64]) -> Vec<f64> {
    let bandwidth = std_dev(values)
        .map(|sd| sd * (values.len() as f64).powf(-0.2))
        .filter(|h| *h > 0.0);

    let Some(h) = bandwidth else {
        return vec![0.0; points.len()];
    };

    let norm = 1.0 / (values.len() as f64 * h * (2.0 * PI).sqrt());
    points
        .iter()
        .map(|x| {
            norm * values
                .iter()
                .map(|v| (-0.5 * ((x - v) / h).powi(2)).exp())
                .sum::<f64>()
        })
        .collect()
}
