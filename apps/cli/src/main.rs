use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod core;
mod host;
mod ui;

use crate::commands::{CheckCommand, InstallCommand, PlanCommand, SetupCommand};
use crate::core::app::App;
use crate::core::config::Config;
use crate::core::error::CliError;

#[derive(Parser)]
#[command(name = "onboard", version)]
#[command(about = "Plan and install a developer environment from a plain-language request", long_about = None)]
struct Cli {
    /// Config file (defaults to <config dir>/onboard/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Run the plan without asking for approval
    #[arg(short = 'y', long, global = true)]
    yes: bool,

    /// Skip installing tools that are already present
    #[arg(long, global = true)]
    skip_installed: bool,

    /// Debug logging (ONBOARD_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Describe an environment in plain words and install it
    Setup(SetupCommand),
    /// Install tools by name
    Install(InstallCommand),
    /// Show what an install would do
    Plan(PlanCommand),
    /// Report installed tools and package managers
    Check(CheckCommand),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        match err.downcast_ref::<CliError>() {
            Some(cli_err) => cli_err.render(),
            None => CliError::Runtime(format!("{:#}", err)).render(),
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_flags(cli.yes, cli.skip_installed);
    crate::core::logging::init(&config.log_level, cli.verbose);

    let app = App::new(config);
    match cli.command {
        Commands::Setup(cmd) => cmd.execute(&app).await,
        Commands::Install(cmd) => cmd.execute(&app).await,
        Commands::Plan(cmd) => cmd.execute(&app).await,
        Commands::Check(cmd) => cmd.execute(&app).await,
    }
}
