//! apibridge CLI - Version-bridging adapter generator
//!
//! Commands:
//! - `apibridge generate` - Generate an interface or implementation file
//! - `apibridge check` - Validate an apibridge.toml and its schema sources
//! - `apibridge registry` - Print the abstraction registry of a family as JSON

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod generate;

/// Environment variable overriding the log filter
const LOG_ENV: &str = "APIBRIDGE_LOG";

#[derive(Parser)]
#[command(name = "apibridge")]
#[command(author, version, about = "Generates version-bridging traits and adapters", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an interface or implementation file
    Generate {
        /// Path to apibridge.toml
        #[arg(short, long, default_value = "apibridge.toml")]
        config: PathBuf,

        /// API family to generate for
        #[arg(long)]
        api: String,

        /// Emit the interface file instead of the implementation
        #[arg(long)]
        interface: bool,

        /// Output file
        #[arg(short, long)]
        out: PathBuf,

        /// Module path the generated file is compiled as
        #[arg(long)]
        my_package: String,

        /// Module path declaring the traits (default: --my-package)
        #[arg(long)]
        interface_package: Option<String>,
    },

    /// Validate an apibridge.toml and run discovery for every family
    Check {
        /// Path to apibridge.toml
        #[arg(short, long, default_value = "apibridge.toml")]
        config: PathBuf,
    },

    /// Print the abstraction registry of a family as JSON
    Registry {
        /// Path to apibridge.toml
        #[arg(short, long, default_value = "apibridge.toml")]
        config: PathBuf,

        /// API family to inspect
        #[arg(long)]
        api: String,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Generate {
            config,
            api,
            interface,
            out,
            my_package,
            interface_package,
        } => {
            let invocation = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
            generate::run(&generate::GenerateArgs {
                config,
                api,
                interface,
                out,
                my_package,
                interface_package,
                invocation,
            })?;
        }
        Commands::Check { config } => {
            generate::check(&config)?;
        }
        Commands::Registry { config, api } => {
            generate::registry(&config, &api)?;
        }
    }

    Ok(())
}
