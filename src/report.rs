use crate::config::Config;
use std::collections::BTreeMap;
use std::error::Error;
use std::fs;
use std::path::Path;

/// Builds a self-contained HTML report from the CSV written by the output
/// step. Charts are rendered client-side with Chart.js pulled from a CDN.
pub fn generate_report(config: &Config) -> Result<(), Box<dyn Error>> {
    let output_dir = &config.output_dir;

    let csv_path = Path::new(output_dir).join("speedup_results.csv");
    let mut reader = csv::Reader::from_path(csv_path)?;
    let mut rows: Vec<BTreeMap<String, serde_json::Value>> = Vec::new();
    for result in reader.deserialize() {
        let record: BTreeMap<String, serde_json::Value> = result?;
        rows.push(record);
    }
    let rows_json = serde_json::to_string(&rows)?;

    let html_content = format!(
        r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Sequential vs Parallel Speedup Report</title>
    <script src="https://cdn.jsdelivr.net/npm/chart.js"></script>
    <style>
        body {{ font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif; margin: 0; background-color: #f8f9fa; color: #212529; }}
        .container {{ max-width: 1200px; margin: 2rem auto; padding: 2rem; background-color: #fff; border-radius: 8px; box-shadow: 0 4px 6px rgba(0,0,0,0.1); }}
        h1, h2 {{ text-align: center; color: #343a40; }}
        .summary {{ text-align: center; margin-bottom: 2rem; color: #6c757d; }}
        .chart-container {{ margin-top: 2rem; }}
    </style>
</head>
<body>
    <div class="container">
        <h1>Sequential vs Parallel Speedup Report</h1>
        <p class="summary">{threads} worker threads per parallel pass</p>

        <div class="chart-container">
            <h2>Wall-clock time per workload</h2>
            <canvas id="timeChart"></canvas>
        </div>

        <div class="chart-container">
            <h2>Speedup per workload</h2>
            <canvas id="speedupChart"></canvas>
        </div>
    </div>

    <script>
        const rows = {rows_json};
        const labels = rows.map(r => r.workload);

        new Chart(document.getElementById('timeChart'), {{
            type: 'bar',
            data: {{
                labels: labels,
                datasets: [
                    {{
                        label: 'Sequential (s)',
                        data: rows.map(r => Number(r.sequential_secs)),
                        backgroundColor: 'rgba(108, 117, 125, 0.6)',
                    }},
                    {{
                        label: 'Parallel (s)',
                        data: rows.map(r => Number(r.parallel_secs)),
                        backgroundColor: 'rgba(13, 110, 253, 0.6)',
                    }}
                ]
            }},
            options: {{
                scales: {{
                    y: {{ beginAtZero: true, title: {{ display: true, text: 'seconds' }} }}
                }}
            }}
        }});

        new Chart(document.getElementById('speedupChart'), {{
            type: 'bar',
            data: {{
                labels: labels,
                datasets: [
                    {{
                        label: 'Measured speedup',
                        data: rows.map(r => Number(r.speedup)),
                        backgroundColor: 'rgba(25, 135, 84, 0.6)',
                    }},
                    {{
                        label: 'Ideal ({threads}x)',
                        type: 'line',
                        data: rows.map(() => {threads}),
                        borderColor: 'rgba(220, 53, 69, 0.8)',
                        borderDash: [6, 6],
                        pointRadius: 0,
                    }}
                ]
            }},
            options: {{
                scales: {{
                    y: {{ beginAtZero: true, title: {{ display: true, text: 'speedup (x)' }} }}
                }}
            }}
        }});
    </script>
</body>
</html>
"#,
        threads = config.threads,
        rows_json = rows_json,
    );

    let report_path = Path::new(output_dir).join("report.html");
    fs::write(report_path, html_content)?;

    Ok(())
}
