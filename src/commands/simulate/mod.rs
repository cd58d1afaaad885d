//! Simulation commands that drive the streaming scans over synthetic reads.

pub mod common;
pub mod dedup;
pub mod pileup;

use crate::commands::command::Command;
use anyhow::Result;
use clap::{Parser, Subcommand};

pub use dedup::SimulateDedup;
pub use pileup::SimulatePileup;

/// Run the streaming scans over simulated reads.
#[derive(Parser, Debug)]
#[command(
    name = "simulate",
    about = "\x1b[38;5;166m[UTILITIES]\x1b[0m      \x1b[36mRun scans over simulated reads\x1b[0m"
)]
pub struct Simulate {
    #[command(subcommand)]
    pub command: SimulateCommand,
}

impl Command for Simulate {
    fn execute(&self, command_line: &str) -> Result<()> {
        self.command.execute(command_line)
    }
}

#[derive(Subcommand, Debug)]
pub enum SimulateCommand {
    Dedup(SimulateDedup),
    Pileup(SimulatePileup),
}

impl SimulateCommand {
    fn execute(&self, command_line: &str) -> Result<()> {
        match self {
            Self::Dedup(cmd) => cmd.execute(command_line),
            Self::Pileup(cmd) => cmd.execute(command_line),
        }
    }
}
