//! Compile command implementation.

use anyhow::{Context, Result};
use console::style;

use super::common::{Connection, load_circuit, save_circuit};
use crate::Compiler;

/// Execute the compile command.
pub async fn execute(
    conn: &Connection,
    input: &str,
    compiler: Compiler,
    target: Option<&str>,
    output: Option<&str>,
) -> Result<()> {
    eprintln!(
        "{} Compiling {} with {:?} compiler",
        style("→").cyan().bold(),
        style(input).green(),
        compiler
    );

    let circuit = load_circuit(input)?;
    eprintln!(
        "  Loaded: {} qubits, {} instructions, depth {}",
        circuit.num_qubits(),
        circuit.len(),
        circuit.depth()
    );

    let provider = conn.provider()?;
    let out = match compiler {
        Compiler::Aqt => provider.aqt_compile(&circuit, target).await?,
        Compiler::Qscout => provider.qscout_compile(&circuit, target).await?,
    };
    let compiled = out
        .circuit()
        .context("Service returned no compiled circuit")?;

    eprintln!("{} Compilation complete", style("✓").green().bold());
    eprintln!(
        "  Result: {} instructions, depth {}",
        compiled.len(),
        compiled.depth()
    );
    let mut ops: Vec<_> = compiled.count_ops().into_iter().collect();
    ops.sort();
    for (name, count) in ops {
        eprintln!("    {name}: {count}");
    }

    save_circuit(compiled, output)?;
    if let Some(path) = output {
        eprintln!("  Output: {}", style(path).green());
    }

    if let Some(program) = out.jaqal_program() {
        eprintln!("\n{}", style("Jaqal program:").bold());
        eprintln!("{program}");
    }

    Ok(())
}
