//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - Superstaq client",
        style("qss").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qss-ir        Circuit model and custom gate catalog");
    println!("  qss-provider  Superstaq HTTP provider");
    println!("  qss-cli       Command-line interface");
    println!();
    println!("API version: {}", style(qss_provider::API_VERSION).dim());
}
