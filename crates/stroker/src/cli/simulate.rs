use crate::{
    config::Config,
    simulator::{Simulator, render_table},
};
use anyhow::Result;
use clap::{Args, ValueEnum};
use std::path::PathBuf;
use stroker_core::TracingSink;
use tracing_subscriber::EnvFilter;

#[derive(Args)]
pub struct SimulateArgs {
    /// Path to the configuration file (TOML or JSON).
    pub config: PathBuf,

    /// Override `pattern.name`.
    #[arg(long)]
    pub pattern: Option<String>,

    /// Override `pattern.sensation`.
    #[arg(long, allow_hyphen_values = true)]
    pub sensation: Option<f64>,

    /// Override `simulation.strokes`.
    #[arg(long)]
    pub strokes: Option<u32>,

    #[arg(long, value_enum, default_value_t = Format::Table)]
    pub format: Format,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Table,
    /// One JSON object per line.
    Json,
}

impl SimulateArgs {
    pub fn run(&self) -> Result<()> {
        // stdout carries the results
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();

        let mut config = Config::from_file(&self.config)?;
        if let Some(pattern) = &self.pattern {
            config.pattern.name = pattern.clone();
        }
        if let Some(sensation) = self.sensation {
            config.pattern.sensation = sensation;
        }
        if let Some(strokes) = self.strokes {
            config.simulation.strokes = strokes;
        }
        config.validate()?;

        let kind = config.pattern_kind()?;
        let mut simulator = Simulator::new(&config, kind);
        simulator.set_diagnostics(Box::new(TracingSink));

        tracing::info!(
            pattern = simulator.pattern().name(),
            config = %self.config.display(),
            strokes = config.simulation.strokes,
            "starting simulation"
        );

        let events = simulator.run(config.simulation.strokes)?;

        match self.format {
            Format::Table => print!("{}", render_table(&events)),
            Format::Json => {
                for event in &events {
                    println!("{}", serde_json::to_string(event)?);
                }
            }
        }

        tracing::info!(elapsed = ?simulator.elapsed(), "simulation finished");
        Ok(())
    }
}
