//! `pm-config` entry point: load every configuration layer, then print the
//! requested view.

use std::io::{self, Write};

use clap::Parser;
use layered_config::Warning;

use pm_config_cli::cli::{CommandLine, Commands};
use pm_config_cli::error::Result;
use pm_config_cli::render::{write_get, write_list, write_source_errors, write_warnings};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    run().map_err(color_eyre::eyre::Report::from)
}

fn run() -> Result<()> {
    let cli = CommandLine::parse();
    let mut warnings: Vec<Warning> = Vec::new();
    let (stack, errors) = cli.globals.load(&mut warnings).into_parts();

    let mut stderr = io::stderr().lock();
    write_warnings(&mut stderr, &warnings)?;
    write_source_errors(&mut stderr, &errors)?;
    stderr.flush()?;

    let effective = stack.resolve_all();
    let mut stdout = io::stdout().lock();
    match &cli.command {
        Commands::Get(command) => write_get(&mut stdout, &effective, &command.keys)?,
        Commands::List(command) => write_list(&mut stdout, &effective, command)?,
    }
    stdout.flush()?;
    Ok(())
}
