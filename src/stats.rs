use serde::Serialize;
use std::time::{Duration, Instant};

/// Runs `f` and returns its value together with the wall-clock time it took.
pub fn time<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let value = f();
    (value, start.elapsed())
}

/// Sequential-over-parallel time ratio. Returns 0 when the parallel pass was
/// too fast to measure, which the console treats as "not meaningful".
pub fn speedup(sequential: Duration, parallel: Duration) -> f64 {
    let par = parallel.as_secs_f64();
    if par > 0.0 {
        sequential.as_secs_f64() / par
    } else {
        0.0
    }
}

/// One row of the results table: both timings for a workload plus a short
/// printable form of each path's result and whether the two paths agreed.
#[derive(Debug, Serialize)]
pub struct WorkloadRecord {
    pub workload: String,
    pub threads: usize,
    pub sequential_secs: f64,
    pub parallel_secs: f64,
    pub speedup: f64,
    pub sequential_result: String,
    pub parallel_result: String,
    pub results_match: bool,
}

impl WorkloadRecord {
    pub fn new(
        workload: &str,
        threads: usize,
        sequential: Duration,
        parallel: Duration,
        sequential_result: String,
        parallel_result: String,
        results_match: bool,
    ) -> Self {
        Self {
            workload: workload.to_string(),
            threads,
            sequential_secs: sequential.as_secs_f64(),
            parallel_secs: parallel.as_secs_f64(),
            speedup: speedup(sequential, parallel),
            sequential_result,
            parallel_result,
            results_match,
        }
    }
}

/// Everything one invocation produced, serialized as summary.json.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub limit: u64,
    pub threads: usize,
    pub records: Vec<WorkloadRecord>,
}
