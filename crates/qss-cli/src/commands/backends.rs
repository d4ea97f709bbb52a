//! Backends command implementation.

use anyhow::Result;
use console::style;
use qss_provider::KNOWN_BACKENDS;

use super::common::Connection;

/// Execute the backends command.
///
/// The built-in list needs no API key; only `--remote` connects.
pub async fn execute(conn: &Connection, remote: bool) -> Result<()> {
    if !remote {
        println!("{} Known backends:\n", style("Superstaq").cyan().bold());
        for name in KNOWN_BACKENDS {
            println!("  {} {}", style("●").green(), style(name).bold());
        }
        println!(
            "\n  Use {} to ask the service for its current list.",
            style("--remote").yellow()
        );
        return Ok(());
    }

    let provider = conn.provider()?;
    let list = provider.fetch_backends().await?;
    println!(
        "{} Backends at {}:\n",
        style("Superstaq").cyan().bold(),
        style(&provider.client().config().remote_host).dim()
    );
    println!("  {}", style("Compile and run").bold());
    for name in &list.compile_and_run {
        println!("    {} {}", style("●").green(), name);
    }
    println!("\n  {}", style("Compile only").bold());
    for name in &list.compile_only {
        println!("    {} {}", style("○").yellow(), name);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_local_list_needs_no_api_key() {
        let conn = Connection {
            api_key: None,
            remote_host: Some("http://127.0.0.1:1".into()),
            verbose: false,
        };
        execute(&conn, false).await.unwrap();
    }
}
