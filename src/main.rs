mod config;
mod logseries;
mod matmul;
mod output;
mod patterns;
mod primes;
mod report;
mod stats;

use clap::Parser;
use indicatif::ProgressBar;
use stats::{RunSummary, WorkloadRecord, time};
use std::error::Error;
use std::fs;
use std::time::Duration;

use crate::config::Config;

const KNOWN_WORKLOADS: &[&str] = &["primes", "logseries", "matmul", "patterns"];

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::parse();

    // --- Config Validation ---
    if config.threads == 0 {
        eprintln!("Error: Thread count cannot be 0.");
        std::process::exit(1);
    }
    if config.workloads.is_empty() {
        eprintln!("Error: No workloads selected.");
        std::process::exit(1);
    }
    for workload in &config.workloads {
        if !KNOWN_WORKLOADS.contains(&workload.as_str()) {
            eprintln!(
                "Error: Unknown workload '{}'. Known workloads: {}.",
                workload,
                KNOWN_WORKLOADS.join(", ")
            );
            std::process::exit(1);
        }
    }
    if config.workloads.iter().any(|w| w == "logseries") && config.log_input <= 0.0 {
        eprintln!("Error: --log-input must be positive.");
        std::process::exit(1);
    }
    if config.workloads.iter().any(|w| w == "matmul") && config.matrix_size == 0 {
        eprintln!("Error: --matrix-size cannot be 0.");
        std::process::exit(1);
    }
    if config.workloads.iter().any(|w| w == "patterns") {
        if config.text_file.is_none() {
            eprintln!("Error: The patterns workload requires --text-file.");
            std::process::exit(1);
        }
        if config.patterns.is_empty() || config.patterns.iter().any(|p| p.is_empty()) {
            eprintln!("Error: Patterns cannot be empty.");
            std::process::exit(1);
        }
    }

    println!("Threads: {}", config.threads);
    println!("Workloads: {}", config.workloads.join(", "));
    println!("Output Dir: {}", config.output_dir);

    let mut records = Vec::new();
    for workload in &config.workloads {
        let record = match workload.as_str() {
            "primes" => run_primes(&config)?,
            "logseries" => run_logseries(&config)?,
            "matmul" => run_matmul(&config)?,
            "patterns" => run_patterns(&config)?,
            _ => unreachable!("validated above"),
        };
        print_timings(&record);
        records.push(record);
    }

    let summary = RunSummary {
        limit: config.limit,
        threads: config.threads,
        records,
    };

    println!("\nWriting results...");
    output::write_results(&summary, &config)?;

    if config.web_report {
        println!("Generating HTML report...");
        report::generate_report(&config)?;
        println!("Report generated at {}/report.html", config.output_dir);
    }

    Ok(())
}

fn phase_spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.enable_steady_tick(Duration::from_millis(100));
    bar.set_message(message);
    bar
}

fn print_timings(record: &WorkloadRecord) {
    println!("Sequential time: {:.6} s", record.sequential_secs);
    println!("Parallel time: {:.6} s", record.parallel_secs);
    if record.speedup > 0.0 {
        println!("Speedup: {:.2}x", record.speedup);
    } else {
        println!("Speedup: not measurable (parallel pass too fast)");
    }
}

fn run_primes(config: &Config) -> Result<WorkloadRecord, Box<dyn Error>> {
    println!("\n--- primes: enumerate all primes up to {} ---", config.limit);

    let bar = phase_spinner("sequential pass".to_string());
    let (sequential, seq_time) = time(|| primes::enumerate_sequential(config.limit));
    bar.finish_with_message(format!("sequential pass: {:.6} s", seq_time.as_secs_f64()));

    let bar = phase_spinner(format!("parallel pass ({} threads)", config.threads));
    let (parallel, par_time) = time(|| primes::enumerate_parallel(config.limit, config.threads));
    let parallel = parallel?;
    bar.finish_with_message(format!("parallel pass: {:.6} s", par_time.as_secs_f64()));

    println!("Primes found: {}", parallel.len());
    let tail = &parallel[parallel.len().saturating_sub(10)..];
    println!(
        "Last 10 primes: {}",
        tail.iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    );

    let results_match = sequential == parallel;
    if !results_match {
        println!(
            "WARNING: the two passes found different primes! Sequential: {}, parallel: {}",
            sequential.len(),
            parallel.len()
        );
    }

    Ok(WorkloadRecord::new(
        "primes",
        config.threads,
        seq_time,
        par_time,
        sequential.len().to_string(),
        parallel.len().to_string(),
        results_match,
    ))
}

fn run_logseries(config: &Config) -> Result<WorkloadRecord, Box<dyn Error>> {
    println!(
        "\n--- logseries: ln({}) over {} terms ---",
        config.log_input, config.log_terms
    );

    let bar = phase_spinner("sequential pass".to_string());
    let (seq_value, seq_time) = time(|| logseries::ln_sequential(config.log_input, config.log_terms));
    bar.finish_with_message(format!("sequential pass: {:.6} s", seq_time.as_secs_f64()));

    let bar = phase_spinner(format!("parallel pass ({} threads)", config.threads));
    let (par_value, par_time) = time(|| {
        logseries::ln_parallel(config.log_input, config.log_terms, config.threads)
    });
    let par_value = par_value?;
    bar.finish_with_message(format!("parallel pass: {:.6} s", par_time.as_secs_f64()));

    let difference = (seq_value - par_value).abs();
    println!("Sequential result: {seq_value:.15}");
    println!("Parallel result: {par_value:.15}");
    println!("Difference: {difference:.3e}");

    let results_match = difference <= 1e-9 * seq_value.abs().max(1.0);
    if !results_match {
        println!("WARNING: the two passes drifted beyond rounding noise!");
    }

    Ok(WorkloadRecord::new(
        "logseries",
        config.threads,
        seq_time,
        par_time,
        format!("{seq_value:.15}"),
        format!("{par_value:.15}"),
        results_match,
    ))
}

fn run_matmul(config: &Config) -> Result<WorkloadRecord, Box<dyn Error>> {
    let size = config.matrix_size;
    println!("\n--- matmul: {size}x{size} product, A = 0.1, B = 0.2 ---");

    let a = matmul::filled(size, 0.1);
    let b = matmul::filled(size, 0.2);
    let mut c_seq = vec![0.0; size * size];
    let mut c_par = vec![0.0; size * size];

    let bar = phase_spinner("sequential pass".to_string());
    let (seq_checksum, seq_time) = time(|| matmul::multiply_sequential(&a, &b, &mut c_seq, size));
    bar.finish_with_message(format!("sequential pass: {:.6} s", seq_time.as_secs_f64()));

    let bar = phase_spinner(format!("parallel pass ({} threads)", config.threads));
    let (par_checksum, par_time) = time(|| {
        matmul::multiply_parallel(&a, &b, &mut c_par, size, config.threads)
    });
    let par_checksum = par_checksum?;
    bar.finish_with_message(format!("parallel pass: {:.6} s", par_time.as_secs_f64()));

    println!("Sequential checksum: {seq_checksum:.6e}");
    println!("Parallel checksum: {par_checksum:.6e}");

    // Each worker computes its cells with the sequential loop, so the
    // matrices themselves must be bit-identical.
    let results_match = c_seq == c_par;
    if !results_match {
        println!("WARNING: the two passes produced different matrices!");
    }

    Ok(WorkloadRecord::new(
        "matmul",
        config.threads,
        seq_time,
        par_time,
        format!("{seq_checksum:.6e}"),
        format!("{par_checksum:.6e}"),
        results_match,
    ))
}

fn run_patterns(config: &Config) -> Result<WorkloadRecord, Box<dyn Error>> {
    let path = config
        .text_file
        .as_deref()
        .expect("validated before dispatch");
    println!(
        "\n--- patterns: {} patterns over {} ---",
        config.patterns.len(),
        path
    );

    let lines: Vec<String> = fs::read_to_string(path)?
        .lines()
        .map(str::to_string)
        .collect();
    println!("Lines read: {}", lines.len());

    let bar = phase_spinner("sequential pass".to_string());
    let (seq_counts, seq_time) = time(|| patterns::count_sequential(&lines, &config.patterns));
    bar.finish_with_message(format!("sequential pass: {:.6} s", seq_time.as_secs_f64()));

    let bar = phase_spinner(format!("parallel pass ({} threads)", config.threads));
    let (par_counts, par_time) = time(|| {
        patterns::count_parallel(&lines, &config.patterns, config.threads)
    });
    let par_counts = par_counts?;
    bar.finish_with_message(format!("parallel pass: {:.6} s", par_time.as_secs_f64()));

    for (pattern, count) in config.patterns.iter().zip(&par_counts) {
        println!("Pattern \"{pattern}\": {count} occurrences");
    }

    let results_match = seq_counts == par_counts;
    if !results_match {
        println!("WARNING: the two passes counted different totals!");
    }

    let join = |counts: &[u64]| {
        counts
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    };

    Ok(WorkloadRecord::new(
        "patterns",
        config.threads,
        seq_time,
        par_time,
        join(&seq_counts),
        join(&par_counts),
        results_match,
    ))
}
