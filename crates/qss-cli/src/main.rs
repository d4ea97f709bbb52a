//! Superstaq Command-Line Interface
//!
//! The `qss` tool: list backends, compile circuits for AQT and QSCOUT
//! hardware, and run circuits through the Superstaq service.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::common::Connection;
use commands::{backends, compile, run, version};

/// qss - Superstaq compilation and execution from the command line
#[derive(Parser)]
#[command(name = "qss")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Superstaq API key (defaults to SUPERSTAQ_API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Service host (defaults to SUPERSTAQ_REMOTE_HOST)
    #[arg(long, global = true)]
    remote_host: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Remote compiler families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Compiler {
    /// AQT native gates and pulse lists
    Aqt,
    /// QSCOUT native gates and Jaqal programs
    Qscout,
}

#[derive(Subcommand)]
enum Commands {
    /// List backends
    Backends {
        /// Ask the service instead of printing the built-in list
        #[arg(long)]
        remote: bool,
    },

    /// Compile a JSON circuit remotely
    Compile {
        /// Input file (JSON circuit)
        #[arg(short, long)]
        input: String,

        /// Compiler to use
        #[arg(short = 't', long = "compiler", value_enum, default_value = "aqt")]
        compiler: Compiler,

        /// Compiler target (keysight for AQT, qscout for QSCOUT)
        #[arg(long)]
        target: Option<String>,

        /// Output file for the compiled circuit (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Run a JSON circuit on a backend and wait for the counts
    Run {
        /// Input file (JSON circuit)
        #[arg(short, long)]
        input: String,

        /// Backend to use
        #[arg(short, long, default_value = "ibmq_qasm_simulator")]
        backend: String,

        /// Number of shots
        #[arg(short, long, default_value = "1024")]
        shots: u32,

        /// Timeout in seconds
        #[arg(long, default_value = "300")]
        timeout: u64,
    },

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let conn = Connection {
        api_key: cli.api_key,
        remote_host: cli.remote_host,
        verbose: cli.verbose > 0,
    };

    let result = match cli.command {
        Commands::Backends { remote } => backends::execute(&conn, remote).await,

        Commands::Compile {
            input,
            compiler,
            target,
            output,
        } => compile::execute(&conn, &input, compiler, target.as_deref(), output.as_deref()).await,

        Commands::Run {
            input,
            backend,
            shots,
            timeout,
        } => run::execute(&conn, &input, &backend, shots, timeout).await,

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
