#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a rover mission.
//!
//! Commands are read from stdin (or `--input`), one per line. Rover statuses
//! are written to stdout; diagnostics and errors go to stderr.

mod input;

use std::{
    fs,
    io::{self, Read, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use marsrover_system_mission_control::Mission;
use marsrover_system_rover::{CollisionPolicy, RoverLauncher};
use marsrover_world::PlateauBuilder;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "marsrover")]
#[command(about = "Drive rovers across a rectangular plateau")]
struct Cli {
    /// Read commands from this file instead of stdin
    #[arg(long, short)]
    input: Option<PathBuf>,

    /// What a rover does when the cell ahead is occupied
    #[arg(long, value_enum, default_value_t = CollisionArg::Abort)]
    on_collision: CollisionArg,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum CollisionArg {
    /// Fail the mission
    Abort,
    /// Skip the move and carry on
    Hold,
}

impl From<CollisionArg> for CollisionPolicy {
    fn from(arg: CollisionArg) -> Self {
        match arg {
            CollisionArg::Abort => Self::Abort,
            CollisionArg::Hold => Self::Hold,
        }
    }
}

/// Entry point for the rover mission command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let raw = read_input(cli.input.as_deref())?;
    let commands = input::split_commands(&raw);
    debug!(commands = commands.len(), "input read");

    let mission = Mission::new(
        PlateauBuilder,
        RoverLauncher::new(cli.on_collision.into()),
    );
    let statuses = mission
        .execute_mission(&commands)
        .context("mission aborted")?;

    let mut stdout = io::stdout().lock();
    for status in statuses {
        writeln!(stdout, "{status}").context("failed to write rover status")?;
    }
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read commands from {}", path.display())),
        None => {
            let mut raw = String::new();
            let _ = io::stdin()
                .read_to_string(&mut raw)
                .context("failed to read commands from stdin")?;
            Ok(raw)
        }
    }
}
