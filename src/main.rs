//! Adapter for heuristic programming contests: scaffolds a project, runs a
//! solver over numbered input cases, and collects the scores the solver
//! reports through a file-path argument.

mod commands;
mod interact;
mod languages;
mod logging;
mod project;
mod runner;
mod term;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::debug;

use crate::commands::clean::CleanArgs;
use crate::commands::init::InitArgs;
use crate::commands::run::RunArgs;

/// Run heuristic-contest solvers over local test cases and collect their
/// scores.
#[derive(Parser, Debug)]
#[command(name = "cp-heuristics-adapter", version, about)]
struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Initialize a new project.
    Init(InitArgs),
    /// Compile a solver and run it over the project's input cases.
    Run(RunArgs),
    /// Clean the project.
    Clean(CleanArgs),
}

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        term::failure(&format!("ERROR: {error:#}"));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    logging::init(cli.verbose)?;
    debug!("running subcommand: {:?}", cli.command);
    match cli.command {
        Commands::Init(args) => commands::init::run(args),
        Commands::Run(args) => commands::run::run(args),
        Commands::Clean(args) => commands::clean::run(args),
    }
}
