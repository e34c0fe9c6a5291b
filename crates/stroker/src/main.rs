use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli;
mod config;
mod simulator;

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::List(args) => args.run(),
        Command::Simulate(args) => args.run(),
    }
}

#[derive(Parser)]
#[command(name = "stroker", about = "Stroke pattern tooling")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the available stroke patterns.
    List(cli::list::ListArgs),
    /// Drive a pattern with a simulated motion controller and print every move.
    Simulate(cli::simulate::SimulateArgs),
}
