//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use qss_ir::{Circuit, resolve_circuit};
use qss_provider::{Counts, ProviderConfig, SuperstaqProvider};
use tracing::debug;

/// Connection flags shared by every remote command.
#[derive(Debug, Clone, Default)]
pub struct Connection {
    pub api_key: Option<String>,
    pub remote_host: Option<String>,
    pub verbose: bool,
}

impl Connection {
    /// Build a provider, falling back to the environment for unset flags.
    pub fn provider(&self) -> Result<SuperstaqProvider> {
        let config = ProviderConfig::from_lookup(
            self.api_key.clone(),
            self.remote_host.clone(),
            |key| std::env::var(key).ok(),
        )?
        .with_verbose(self.verbose);
        Ok(SuperstaqProvider::new(config)?)
    }
}

/// Load a circuit from a JSON file, restoring catalog gates.
pub fn load_circuit(path: &str) -> Result<Circuit> {
    if !Path::new(path).exists() {
        anyhow::bail!("File not found: {path}");
    }

    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;
    let circuit: Circuit =
        serde_json::from_str(&source).with_context(|| format!("Invalid circuit JSON: {path}"))?;
    debug!("Loaded circuit '{}' from {}", circuit.name(), path);
    Ok(resolve_circuit(&circuit))
}

/// Write a circuit as pretty JSON, to `path` or stdout.
pub fn save_circuit(circuit: &Circuit, path: Option<&str>) -> Result<()> {
    let json = serde_json::to_string_pretty(circuit)?;
    match path {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("Failed to write file: {path}"))?;
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Print one histogram as a bar table.
pub fn print_counts(counts: &Counts) {
    println!(
        "\n{} Results ({} shots):",
        style("✓").green().bold(),
        counts.total_shots()
    );

    let sorted = counts.sorted();
    let total = counts.total_shots().max(1) as f64;

    for (bitstring, count) in sorted.iter().take(16) {
        let prob = *count as f64 / total * 100.0;
        let bar_len = (prob / 2.0).round() as usize;
        let bar: String = "█".repeat(bar_len);

        println!(
            "  {}: {:>6} ({:>5.2}%) {}",
            style(bitstring).cyan(),
            count,
            prob,
            style(bar).green()
        );
    }

    if sorted.len() > 16 {
        println!("  ... and {} more outcomes", sorted.len() - 16);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qss_ir::{AceCr, QubitId};

    #[test]
    fn test_load_missing_file() {
        let err = load_circuit("/nonexistent/circuit.json").unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }

    #[test]
    fn test_save_then_load_restores_custom_gates() {
        let mut circuit = Circuit::with_size("cr", 2, 0);
        circuit
            .append(AceCr::new("+-").unwrap(), [QubitId(0), QubitId(1)])
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cr.json");
        let path = path.to_str().unwrap();
        save_circuit(&circuit, Some(path)).unwrap();

        let loaded = load_circuit(path).unwrap();
        assert_eq!(loaded, circuit);
        assert!(loaded.instructions()[0].as_gate().unwrap().is_custom());
    }

    #[test]
    fn test_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{\"name\": 3}").unwrap();
        let err = load_circuit(path.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("Invalid circuit JSON"));
    }

    #[test]
    fn test_out_of_range_qubit_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        let json = r#"{"name": "bad", "num_qubits": 1, "instructions": [
            {"kind": {"Gate": {"name": "x", "num_qubits": 1}}, "qubits": [5]}]}"#;
        fs::write(&path, json).unwrap();
        let err = load_circuit(path.to_str().unwrap()).unwrap_err();
        assert!(format!("{err:#}").contains("Qubit q5 not found"), "{err:#}");
    }

    #[test]
    fn test_connection_flags_override_environment() {
        let conn = Connection {
            api_key: Some("KEY".into()),
            remote_host: Some("http://localhost:1".into()),
            verbose: true,
        };
        let provider = conn.provider().unwrap();
        assert_eq!(provider.client().config().remote_host, "http://localhost:1");
        assert!(provider.client().config().verbose);
    }
}
