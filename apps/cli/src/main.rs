//! Curricula CLI — curriculum document extraction tool.
//!
//! Turns directories of rendered academic-program text into structured JSON,
//! course CSVs, LLM-ready narratives, and cross-program summary tables.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
