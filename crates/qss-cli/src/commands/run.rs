//! Run command implementation.

use std::time::Duration;

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use super::common::{Connection, load_circuit, print_counts};

/// Interval between job status polls.
const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Execute the run command.
pub async fn execute(
    conn: &Connection,
    input: &str,
    backend: &str,
    shots: u32,
    timeout: u64,
) -> Result<()> {
    println!(
        "{} Running {} on {} ({} shots)",
        style("→").cyan().bold(),
        style(input).green(),
        style(backend).yellow(),
        shots
    );

    let circuit = load_circuit(input)?;
    println!(
        "  Loaded: {} qubits, depth {}",
        circuit.num_qubits(),
        circuit.depth()
    );

    let backend = conn.provider()?.get_backend(backend);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message("Submitting job...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let job = match backend.run(std::slice::from_ref(&circuit), shots).await {
        Ok(job) => job,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e.into());
        }
    };
    spinner.set_message(format!("Running job {}...", job.id()));

    let result = job
        .wait(POLL_INTERVAL, Duration::from_secs(timeout))
        .await;
    spinner.finish_and_clear();

    for counts in result? {
        print_counts(&counts);
    }
    println!("\n  Job: {}", style(job.id()).dim());

    Ok(())
}
