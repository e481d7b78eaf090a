//! Counts non-overlapping occurrences of each pattern across the lines of a
//! text. Parallelism is per pattern: counts for different patterns never
//! touch, so each worker fills its own slot and nothing needs a lock.

use rayon::prelude::*;
use rayon::{ThreadPoolBuildError, ThreadPoolBuilder};

/// Non-overlapping occurrences of `pattern` in `line`; the scan resumes past
/// the end of each match. Patterns must be non-empty (the CLI rejects empty
/// ones before this is reached).
pub fn count_occurrences(line: &str, pattern: &str) -> u64 {
    line.matches(pattern).count() as u64
}

/// One count per pattern, accumulated over every line in order.
pub fn count_sequential(lines: &[String], patterns: &[String]) -> Vec<u64> {
    patterns
        .iter()
        .map(|pattern| {
            lines
                .iter()
                .map(|line| count_occurrences(line, pattern))
                .sum()
        })
        .collect()
}

/// Same counts with one task per pattern on a pool of `workers` threads.
/// Exact equality with [`count_sequential`] is expected; the counts are
/// integers and each is produced by a single worker.
pub fn count_parallel(
    lines: &[String],
    patterns: &[String],
    workers: usize,
) -> Result<Vec<u64>, ThreadPoolBuildError> {
    assert!(workers > 0, "worker count must be at least 1");
    let pool = ThreadPoolBuilder::new().num_threads(workers).build()?;
    Ok(pool.install(|| {
        patterns
            .par_iter()
            .map(|pattern| {
                lines
                    .iter()
                    .map(|line| count_occurrences(line, pattern))
                    .sum()
            })
            .collect()
    }))
}
