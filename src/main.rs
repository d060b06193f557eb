use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use nbrates::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Fetch the rates published for a date (DD.MM.YYYY) and store them
    Fetch { date: String },
    /// Show stored rates for a date, optionally for a single currency code
    Get { date: String, code: Option<String> },
}

impl From<Commands> for nbrates::AppCommand {
    fn from(cmd: Commands) -> nbrates::AppCommand {
        match cmd {
            Commands::Fetch { date } => nbrates::AppCommand::Fetch { date },
            Commands::Get { date, code } => nbrates::AppCommand::Get { date, code },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => nbrates::cli::setup::setup(),
        Some(cmd) => nbrates::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
