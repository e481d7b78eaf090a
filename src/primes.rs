//! Two-phase prime enumeration: a sequential pass collects every prime up to
//! the square root of the limit, then worker threads scan disjoint slices of
//! the remaining interval by trial division against that shared list.

use rayon::{ThreadPoolBuildError, ThreadPoolBuilder};
use std::ops::Range;
use std::sync::Mutex;

/// Integer square root, safe at the top of the u64 domain where a plain
/// `f64::sqrt` cast can land one off.
fn isqrt(n: u64) -> u64 {
    let mut root = (n as f64).sqrt() as u64;
    while u128::from(root) * u128::from(root) > u128::from(n) {
        root -= 1;
    }
    while (u128::from(root) + 1) * (u128::from(root) + 1) <= u128::from(n) {
        root += 1;
    }
    root
}

/// Trial division of `n` against an ascending list of known primes.
///
/// The caller must supply every prime up to the square root of `n`;
/// composites whose smallest factor lies beyond the list's coverage would
/// otherwise be misreported as prime. [`base_primes`] satisfies this by
/// construction. Reads only, so any number of threads may share one list.
pub fn is_prime(n: u64, known_primes: &[u64]) -> bool {
    if n <= 1 {
        return false;
    }
    if n == 2 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }
    let root = isqrt(n);
    for &p in known_primes {
        if p > root {
            break;
        }
        if n % p == 0 {
            return false;
        }
    }
    true
}

/// Sequentially collects every prime up to the square root of `limit`,
/// ascending. Each accepted prime joins the list before the next candidate is
/// tested; the growth order is what keeps the trial division sound.
///
/// Must run to completion before any range worker starts.
pub fn base_primes(limit: u64) -> Vec<u64> {
    let mut primes = vec![2];
    let root = isqrt(limit);
    let mut candidate = 3;
    while candidate <= root {
        if is_prime(candidate, &primes) {
            primes.push(candidate);
        }
        candidate += 2;
    }
    primes
}

/// Splits `[low, high]` into `workers` contiguous half-open ranges.
///
/// Sizes differ by at most one: the division remainder is spread one unit
/// each across the leading ranges. When `workers` exceeds the interval
/// length the trailing ranges come back empty, which scanning tolerates.
pub fn partition(low: u64, high: u64, workers: usize) -> Vec<Range<u64>> {
    assert!(workers > 0, "worker count must be at least 1");
    let len = if high < low { 0 } else { high - low + 1 };
    let base = len / workers as u64;
    let extra = len % workers as u64;
    let mut ranges = Vec::with_capacity(workers);
    let mut start = low;
    for i in 0..workers as u64 {
        let size = base + u64::from(i < extra);
        ranges.push(start..start + size);
        start += size;
    }
    ranges
}

/// One worker's pass over its slice: test each odd candidate against the
/// shared base list and append hits to the shared collection. The lock covers
/// only the append, never the primality test itself.
fn scan_range(range: Range<u64>, base_primes: &[u64], found: &Mutex<Vec<u64>>) {
    let mut candidate = range.start;
    if candidate % 2 == 0 {
        candidate += 1;
    }
    while candidate < range.end {
        if is_prime(candidate, base_primes) {
            found
                .lock()
                .expect("a range worker panicked mid-append")
                .push(candidate);
        }
        candidate += 2;
    }
}

/// Enumerates every prime up to `limit` using `workers` threads.
///
/// Builds a fresh fixed-size pool per call, runs the sequential base pass,
/// fans the residual interval out one slice per worker, and sorts the
/// collected primes once the scope's join barrier has passed. The output is
/// identical to [`enumerate_sequential`] for every `limit` and worker count.
pub fn enumerate_parallel(limit: u64, workers: usize) -> Result<Vec<u64>, ThreadPoolBuildError> {
    assert!(workers > 0, "worker count must be at least 1");
    if limit < 2 {
        return Ok(Vec::new());
    }

    let base = base_primes(limit);
    let root = isqrt(limit);

    let pool = ThreadPoolBuilder::new().num_threads(workers).build()?;
    let found = Mutex::new(Vec::new());

    pool.scope(|scope| {
        for range in partition(root + 1, limit, workers) {
            let base = &base;
            let found = &found;
            scope.spawn(move |_| scan_range(range, base, found));
        }
    });

    // Arrival order across workers is arbitrary; restore it here, after the
    // join, where no writer remains.
    let mut found = found
        .into_inner()
        .expect("a range worker panicked mid-append");
    found.sort_unstable();

    let mut primes = base;
    primes.extend(found);
    Ok(primes)
}

/// Single-threaded reference: the same two phases collapsed into one pass
/// over `[2, limit]`. Ground truth and timing baseline for the parallel path.
pub fn enumerate_sequential(limit: u64) -> Vec<u64> {
    if limit < 2 {
        return Vec::new();
    }

    let mut primes = vec![2];
    let root = isqrt(limit);
    let mut candidate = 3;
    while candidate <= root {
        if is_prime(candidate, &primes) {
            primes.push(candidate);
        }
        candidate += 2;
    }

    let mut candidate = root + 1;
    if candidate % 2 == 0 {
        candidate += 1;
    }
    while candidate <= limit {
        if is_prime(candidate, &primes) {
            primes.push(candidate);
        }
        candidate += 2;
    }
    primes
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRIMES_TO_97: [u64; 25] = [
        2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83,
        89, 97,
    ];

    #[test]
    fn isqrt_exact_and_off_by_one_inputs() {
        assert_eq!(isqrt(0), 0);
        assert_eq!(isqrt(1), 1);
        assert_eq!(isqrt(3), 1);
        assert_eq!(isqrt(4), 2);
        assert_eq!(isqrt(15), 3);
        assert_eq!(isqrt(16), 4);
        assert_eq!(isqrt(17), 4);
        assert_eq!(isqrt(10_000_000), 3162);
        assert_eq!(isqrt(u64::MAX), u64::from(u32::MAX));
    }

    #[test]
    fn trial_division_small_cases() {
        let base = [2, 3, 5, 7];
        assert!(!is_prime(0, &base));
        assert!(!is_prime(1, &base));
        assert!(is_prime(2, &base));
        assert!(is_prime(3, &base));
        assert!(!is_prime(4, &base));
        assert!(!is_prime(9, &base));
        assert!(!is_prime(25, &base));
        assert!(!is_prime(49, &base));
        assert!(is_prime(97, &base));
        assert!(!is_prime(91, &base)); // 7 * 13
    }

    #[test]
    fn base_pass_stops_at_the_root() {
        assert_eq!(base_primes(2), vec![2]);
        assert_eq!(base_primes(100), vec![2, 3, 5, 7]);
        assert_eq!(base_primes(121), vec![2, 3, 5, 7, 11]);
        // pi(100) = 25
        assert_eq!(base_primes(10_000).len(), 25);
    }

    fn assert_exact_cover(low: u64, high: u64, workers: usize) {
        let ranges = partition(low, high, workers);
        assert_eq!(ranges.len(), workers);
        let len = if high < low { 0 } else { high - low + 1 };
        let total: u64 = ranges.iter().map(|r| r.end - r.start).sum();
        assert_eq!(total, len);
        assert_eq!(ranges[0].start, low);
        assert_eq!(ranges[workers - 1].end, low + len);
        for pair in ranges.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
    }

    #[test]
    fn partition_covers_the_interval_exactly() {
        assert_exact_cover(4, 100, 1);
        assert_exact_cover(4, 100, 3);
        assert_exact_cover(4, 100, 97);
        assert_exact_cover(11, 11, 4);
        assert_exact_cover(10, 9, 5); // empty interval
        assert_exact_cover(2, 1_000_003, 33);
    }

    #[test]
    fn partition_spreads_the_remainder_evenly() {
        let ranges = partition(0, 9, 3);
        let sizes: Vec<u64> = ranges.iter().map(|r| r.end - r.start).collect();
        assert_eq!(sizes, vec![4, 3, 3]);
    }

    #[test]
    fn partition_tolerates_more_workers_than_candidates() {
        let ranges = partition(5, 7, 8);
        let nonempty = ranges.iter().filter(|r| !r.is_empty()).count();
        assert_eq!(nonempty, 3);
        assert_exact_cover(5, 7, 8);
    }

    #[test]
    #[should_panic(expected = "worker count must be at least 1")]
    fn partition_rejects_zero_workers() {
        partition(2, 100, 0);
    }

    #[test]
    fn sequential_boundary_limits() {
        assert!(enumerate_sequential(0).is_empty());
        assert!(enumerate_sequential(1).is_empty());
        assert_eq!(enumerate_sequential(2), vec![2]);
        assert_eq!(enumerate_sequential(3), vec![2, 3]);
        assert_eq!(enumerate_sequential(10), vec![2, 3, 5, 7]);
        assert_eq!(enumerate_sequential(97), PRIMES_TO_97);
        // pi(1000) = 168, pi(10^4) = 1229
        assert_eq!(enumerate_sequential(1_000).len(), 168);
        assert_eq!(enumerate_sequential(10_000).len(), 1229);
    }

    #[test]
    fn sequential_output_is_ascending_and_duplicate_free() {
        let primes = enumerate_sequential(5_000);
        assert!(primes.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn parallel_matches_sequential_for_any_worker_count() {
        for limit in [2, 3, 10, 97, 1_000, 10_000] {
            let expected = enumerate_sequential(limit);
            for workers in [1, 2, 8, 33] {
                let got = enumerate_parallel(limit, workers).unwrap();
                assert_eq!(got, expected, "limit {limit}, {workers} workers");
            }
        }
    }

    #[test]
    fn parallel_boundary_limits() {
        assert!(enumerate_parallel(0, 4).unwrap().is_empty());
        assert!(enumerate_parallel(1, 4).unwrap().is_empty());
        assert_eq!(enumerate_parallel(2, 4).unwrap(), vec![2]);
        assert_eq!(enumerate_parallel(3, 4).unwrap(), vec![2, 3]);
    }

    #[test]
    fn ninety_seven_with_four_workers() {
        assert_eq!(enumerate_parallel(97, 4).unwrap(), PRIMES_TO_97);
    }

    #[test]
    fn repeated_runs_are_stable() {
        // Interleavings of the shared collection differ run to run; the
        // sorted output must not. Catches appends outside the lock.
        let expected = enumerate_parallel(1_000, 4).unwrap();
        for _ in 0..100 {
            assert_eq!(enumerate_parallel(1_000, 4).unwrap(), expected);
        }
    }

    #[test]
    fn one_worker_degenerates_to_the_sequential_result() {
        assert_eq!(
            enumerate_parallel(5_000, 1).unwrap(),
            enumerate_sequential(5_000)
        );
    }
}
