//! Mark duplicates in simulated coordinate-sorted reads.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use fgoxide::io::DelimFile;
use fgpile_lib::dedup::{DuplicateCandidate, DuplicateMarker};
use fgpile_lib::flags::{FlagCounts, tally_flags};
use fgpile_lib::logging::{OperationTimer, log_dedup_summary, log_flag_counts};
use fgpile_lib::simulate::{ReadSimulator, SimRead};
use log::info;
use serde::Serialize;

use super::common::{FamilySizeArgs, SimulationCommon, simulation_params};
use crate::commands::command::Command;
use crate::commands::common::{MetricsOptions, WindowOptions};

/// Simulate reads with PCR-duplicate families and mark duplicates in a single streaming pass.
#[derive(Parser, Debug)]
#[command(
    name = "dedup",
    about = "Mark duplicates in simulated reads",
    long_about = r#"
Simulate coordinate-sorted reads with PCR-duplicate families and mark duplicates.

Reads at the same position with the same strand and UMI form a duplicate set. The read with
the highest sum of base qualities >= 15 is kept and the rest are flagged as duplicates.
Reads are emitted in input order.
"#
)]
pub struct SimulateDedup {
    /// Optional TSV of every read with its duplicate flag
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub metrics: MetricsOptions,

    #[command(flatten)]
    pub window: WindowOptions,

    #[command(flatten)]
    pub common: SimulationCommon,

    #[command(flatten)]
    pub family_size: FamilySizeArgs,
}

/// One output row per read.
#[derive(Debug, Serialize)]
struct ReadRow {
    name: String,
    contig: u32,
    start: u32,
    strand: char,
    umi: u32,
    flags: u16,
    duplicate: bool,
}

impl From<SimRead> for ReadRow {
    fn from(read: SimRead) -> Self {
        Self {
            strand: if read.is_reverse() { '-' } else { '+' },
            duplicate: read.is_duplicate(),
            name: read.name,
            contig: read.contig,
            start: read.start,
            umi: read.umi,
            flags: read.flags,
        }
    }
}

impl Command for SimulateDedup {
    fn execute(&self, command_line: &str) -> Result<()> {
        info!("Running: {command_line}");
        let policy = self.window.growth_policy()?;
        let simulator = ReadSimulator::new(simulation_params(&self.common, &self.family_size)?)?;
        let reads = simulator.generate()?;
        info!("Simulated {} reads", reads.len());

        let timer = OperationTimer::new("Marking duplicates");
        let mut marker = DuplicateMarker::new(policy);
        let mut flag_counts = FlagCounts::new_counts();
        let mut rows = Vec::new();
        let keep_rows = self.output.is_some();
        let mut retire = |read: SimRead| {
            tally_flags(&mut flag_counts, read.flags);
            if keep_rows {
                rows.push(ReadRow::from(read));
            }
        };
        for read in reads {
            marker.add(read, &mut retire)?;
        }
        marker.finish(&mut retire)?;

        let metrics = marker.metrics().clone();
        timer.log_completion(metrics.total_records);
        log_dedup_summary(&metrics);
        log_flag_counts(&flag_counts);

        if let Some(path) = &self.output {
            DelimFile::default()
                .write_tsv(path, rows)
                .with_context(|| format!("Failed to write reads: {}", path.display()))?;
        }
        self.metrics.write(&metrics)
    }
}
