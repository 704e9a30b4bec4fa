//! Random row sampling.

use arrow::array::{ArrayRef, UInt32Array};
use arrow::compute::take;
use arrow::record_batch::RecordBatch;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index;

use crate::error::Result;

/// Uniform sample of `n` rows without replacement
///
/// Deterministic for a given seed. Asking for more rows than the batch holds
/// returns every row in shuffled order.
pub fn sample_rows(batch: &RecordBatch, n: usize, seed: u64) -> Result<RecordBatch> {
    let mut rng = StdRng::seed_from_u64(seed);
    let amount = n.min(batch.num_rows());

    let indices: UInt32Array = index::sample(&mut rng, batch.num_rows(), amount)
        .into_iter()
        .map(|i| i as u32)
        .collect::<Vec<_>>()
        .into();

    let columns = batch
        .columns()
        .iter()
        .map(|column| take(column.as_ref(), &indices, None))
        .collect::<std::result::Result<Vec<ArrayRef>, _>>()?;

    Ok(RecordBatch::try_new(batch.schema(), columns)?)
}
