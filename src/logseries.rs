//! Natural-log evaluation through the atanh series
//! ln(x) = 2 * sum of y^(2k+1) / (2k+1) with y = (x - 1) / (x + 1),
//! convergent for any x > 0.

use crate::primes::partition;
use rayon::prelude::*;
use rayon::{ThreadPoolBuildError, ThreadPoolBuilder};
use std::ops::Range;

/// Single-threaded evaluation of the first `terms` series terms, carrying the
/// running odd power of `y` across iterations.
pub fn ln_sequential(x: f64, terms: u64) -> f64 {
    let y = (x - 1.0) / (x + 1.0);
    let mut power = y;
    let mut sum = 0.0;
    for k in 0..terms {
        sum += power / (2 * k + 1) as f64;
        power *= y * y;
    }
    2.0 * sum
}

/// Partial sum over one contiguous block of term indices. The power is seeded
/// at y^(2k0+1) so the block is independent of every other block.
fn partial_sum(y: f64, block: Range<u64>) -> f64 {
    let mut power = y.powf((2 * block.start + 1) as f64);
    let mut sum = 0.0;
    for k in block {
        sum += power / (2 * k + 1) as f64;
        power *= y * y;
    }
    sum
}

/// Splits the term indices across `workers` threads and sums the private
/// partials after the join. Agrees with [`ln_sequential`] up to floating-point
/// reassociation.
pub fn ln_parallel(x: f64, terms: u64, workers: usize) -> Result<f64, ThreadPoolBuildError> {
    assert!(workers > 0, "worker count must be at least 1");
    if terms == 0 {
        return Ok(0.0);
    }

    let y = (x - 1.0) / (x + 1.0);
    let pool = ThreadPoolBuilder::new().num_threads(workers).build()?;
    let sum: f64 = pool.install(|| {
        partition(0, terms - 1, workers)
            .into_par_iter()
            .map(|block| partial_sum(y, block))
            .sum()
    });
    Ok(2.0 * sum)
}
