use crate::config::Config;
use crate::stats::{RunSummary, WorkloadRecord};
use csv::Writer;
use std::error::Error;
use std::fs;
use std::path::Path;

pub fn write_results(summary: &RunSummary, config: &Config) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(&config.output_dir)?;

    write_speedup_table(&summary.records, config)?;
    write_summary_json(summary, config)?;

    Ok(())
}

fn write_speedup_table(records: &[WorkloadRecord], config: &Config) -> Result<(), Box<dyn Error>> {
    let path = Path::new(&config.output_dir).join("speedup_results.csv");
    let mut wtr = Writer::from_path(path)?;

    for record in records {
        wtr.serialize(record)?;
    }

    wtr.flush()?;
    Ok(())
}

fn write_summary_json(summary: &RunSummary, config: &Config) -> Result<(), Box<dyn Error>> {
    let path = Path::new(&config.output_dir).join("summary.json");
    fs::write(path, serde_json::to_string_pretty(summary)?)?;
    Ok(())
}
