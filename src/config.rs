use clap::Parser;

/// Compares sequential and multi-threaded implementations of classic numeric
/// workloads and reports the speedup of each.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Upper bound for the prime enumeration workload.
    #[arg(short = 'n', long, default_value_t = 10_000_000)]
    pub limit: u64,

    /// Worker thread count used by every parallel pass.
    #[arg(short, long, default_value_t = 4)]
    pub threads: usize,

    /// A comma-separated list of workloads to run. Known workloads:
    /// primes, logseries, matmul, patterns.
    #[arg(short, long, default_value = "primes", value_delimiter = ',')]
    pub workloads: Vec<String>,

    /// The value whose natural log the series workload evaluates. Must be > 0.
    #[arg(long, default_value_t = 2.0)]
    pub log_input: f64,

    /// Number of series terms for the natural-log workload.
    #[arg(long, default_value_t = 10_000_000)]
    pub log_terms: u64,

    /// Matrix dimension for the matrix-product workload.
    #[arg(long, default_value_t = 512)]
    pub matrix_size: usize,

    /// Text file scanned by the pattern-counting workload.
    #[arg(long)]
    pub text_file: Option<String>,

    /// A comma-separated list of patterns for the pattern-counting workload.
    #[arg(long, default_value = "the,and,of", value_delimiter = ',')]
    pub patterns: Vec<String>,

    /// Directory for output files.
    #[arg(short, long, default_value = "results")]
    pub output_dir: String,

    /// Generate a self-contained HTML report with interactive charts.
    #[arg(long)]
    pub web_report: bool,
}
