//! Coexist CLI: inspect how coexisting library versions rank against each other.

mod commands;
mod manifest;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use manifest::{CoexistManifest, MANIFEST_FILE};

#[derive(Parser)]
#[command(name = "coexist", version, about = "Coexisting library version coordination")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two versions and report which one takes precedence
    Compare {
        /// First version (e.g., 2.0.0-rc10, 3.0.0-next+1700000000)
        a: String,
        /// Second version
        b: String,
        /// Build time of the first version (overrides build metadata)
        #[arg(long)]
        build_time_a: Option<u64>,
        /// Build time of the second version (overrides build metadata)
        #[arg(long)]
        build_time_b: Option<u64>,
        /// Output format (human, json)
        #[arg(long)]
        format: Option<String>,
    },
    /// Register every bundle of a coexist.toml and report the winner
    Simulate {
        /// Path to the manifest (default: search upward for coexist.toml)
        #[arg(long)]
        manifest: Option<PathBuf>,
        /// Output format (human, json)
        #[arg(long)]
        format: Option<String>,
    },
    /// Print instructions for disabling version warnings
    Instructions,
    /// Show the version this binary registers
    Current,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

/// Log to stderr so JSON output on stdout stays clean. `RUST_LOG` wins over
/// `--debug` when set.
fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Compare {
            a,
            b,
            build_time_a,
            build_time_b,
            format,
        } => commands::compare::run(&a, &b, build_time_a, build_time_b, format.as_deref()),

        Commands::Simulate {
            manifest: manifest_path,
            format,
        } => {
            let (manifest, source) = match manifest_path {
                Some(path) => (CoexistManifest::load(&path)?, path),
                None => {
                    let cwd = std::env::current_dir()?;
                    let (manifest, dir) = CoexistManifest::find_and_load(&cwd)?.ok_or_else(|| {
                        anyhow::anyhow!(
                            "no {} found in {} or any parent directory",
                            MANIFEST_FILE,
                            cwd.display()
                        )
                    })?;
                    (manifest, dir.join(MANIFEST_FILE))
                }
            };
            tracing::debug!(manifest = %source.display(), "loaded simulation manifest");
            commands::simulate::run(&manifest, format.as_deref())
        }

        Commands::Instructions => commands::instructions::run(),

        Commands::Current => commands::current::run(),
    }
}
