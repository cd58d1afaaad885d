//! Count bases per reference position over simulated reads.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use fgoxide::io::DelimFile;
use fgpile_lib::Base;
use fgpile_lib::base_counts::{BaseCountScanner, PileupColumn};
use fgpile_lib::logging::{OperationTimer, log_pileup_summary};
use fgpile_lib::simulate::ReadSimulator;
use log::info;
use serde::Serialize;

use super::common::{FamilySizeArgs, SimulationCommon, simulation_params};
use crate::commands::command::Command;
use crate::commands::common::{MetricsOptions, WindowOptions};

/// Simulate reads and count the bases aligned to every covered reference position.
#[derive(Parser, Debug)]
#[command(
    name = "pileup",
    about = "Count bases per position in simulated reads",
    long_about = r#"
Simulate coordinate-sorted reads and emit one column per covered reference position with
the number of A, C, G, T and N bases aligned there.
"#
)]
pub struct SimulatePileup {
    /// Optional TSV of every pileup column
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Only report columns with at least this depth
    #[arg(long = "min-depth", default_value = "1")]
    pub min_depth: u64,

    #[command(flatten)]
    pub metrics: MetricsOptions,

    #[command(flatten)]
    pub window: WindowOptions,

    #[command(flatten)]
    pub common: SimulationCommon,

    #[command(flatten)]
    pub family_size: FamilySizeArgs,
}

/// One output row per pileup column.
#[derive(Debug, Serialize)]
struct ColumnRow {
    contig: u32,
    position: u32,
    depth: u64,
    a: u64,
    c: u64,
    g: u64,
    t: u64,
    n: u64,
    consensus: char,
}

impl From<&PileupColumn<'_>> for ColumnRow {
    fn from(column: &PileupColumn<'_>) -> Self {
        let counts = column.counts;
        Self {
            contig: column.contig,
            position: column.position,
            depth: column.depth(),
            a: counts.count(Base::A),
            c: counts.count(Base::C),
            g: counts.count(Base::G),
            t: counts.count(Base::T),
            n: counts.count(Base::N),
            consensus: char::from(column.consensus().unwrap_or(Base::N).to_ascii()),
        }
    }
}

impl Command for SimulatePileup {
    fn execute(&self, command_line: &str) -> Result<()> {
        info!("Running: {command_line}");
        let policy = self.window.growth_policy()?;
        let simulator = ReadSimulator::new(simulation_params(&self.common, &self.family_size)?)?;
        let reads = simulator.generate()?;
        info!("Simulated {} reads", reads.len());

        let timer = OperationTimer::new("Counting bases");
        let mut scanner = BaseCountScanner::new(policy);
        let mut rows = Vec::new();
        let keep_rows = self.output.is_some();
        let min_depth = self.min_depth;
        let mut collect = |column: &PileupColumn<'_>| {
            if keep_rows && column.depth() >= min_depth {
                rows.push(ColumnRow::from(column));
            }
        };
        for read in reads {
            scanner.add(read, &mut collect)?;
        }
        scanner.finish(&mut collect)?;

        let metrics = scanner.metrics().clone();
        timer.log_completion(metrics.total_records);
        log_pileup_summary(&metrics);

        if let Some(path) = &self.output {
            DelimFile::default()
                .write_tsv(path, rows)
                .with_context(|| format!("Failed to write pileup columns: {}", path.display()))?;
        }
        self.metrics.write(&metrics)
    }
}
