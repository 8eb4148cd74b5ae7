use clap::{Parser, Subcommand};

use quicknotes_tools::cli;
use quicknotes_tools::errors::Result;

#[derive(Parser)]
#[command(name = "qn")]
#[command(about = "Operational helpers for quicknotes", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the database container and run the local server against it
    Run,
    /// Compile assets, build the linux binary, and bundle the release artifact
    Package,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<()> = match cli.command {
        Commands::Run => cli::run::run(),
        Commands::Package => cli::package::run(),
    };

    if let Err(err) = result {
        eprintln!("{}", err);
        std::process::exit(err.exit_code());
    }
}
