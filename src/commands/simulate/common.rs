//! Shared CLI arguments for simulation commands.

use anyhow::{Result, bail};
use clap::Args;

use fgpile_lib::simulate::{FamilySizeDistribution, SimulationParams, reads::DEFAULT_UMI_SPACE};

/// Common simulation options shared across all simulate subcommands.
#[derive(Args, Debug, Clone)]
pub struct SimulationCommon {
    /// Random seed for reproducibility
    #[arg(long = "seed")]
    pub seed: Option<u64>,

    /// Number of molecules to simulate
    #[arg(short = 'n', long = "num-molecules", default_value = "1000")]
    pub num_molecules: usize,

    /// Read length in bases
    #[arg(short = 'l', long = "read-length", default_value = "100")]
    pub read_length: u32,

    /// Number of reference contigs
    #[arg(long = "num-contigs", default_value = "1")]
    pub num_contigs: u32,

    /// Length of each synthetic reference contig.
    /// Shorter contigs stack more molecules at the same position.
    #[arg(long = "ref-length", default_value = "100000")]
    pub ref_length: u32,

    /// Per-base sequencing error rate
    #[arg(long = "error-rate", default_value = "0.001")]
    pub error_rate: f64,

    /// Number of distinct UMIs molecules draw from
    #[arg(long = "umi-space", default_value_t = DEFAULT_UMI_SPACE)]
    pub umi_space: u32,
}

/// Family size distribution options.
#[derive(Args, Debug, Clone)]
pub struct FamilySizeArgs {
    /// Family size distribution: "lognormal" or "negbin"
    #[arg(long = "family-size-dist", default_value = "lognormal")]
    pub family_size_dist: String,

    /// Mean family size (for lognormal)
    #[arg(long = "family-size-mean", default_value = "3.0")]
    pub family_size_mean: f64,

    /// Family size standard deviation (for lognormal)
    #[arg(long = "family-size-stddev", default_value = "2.0")]
    pub family_size_stddev: f64,

    /// r parameter for negative binomial
    #[arg(long = "family-size-r", default_value = "2.0")]
    pub family_size_r: f64,

    /// p parameter for negative binomial
    #[arg(long = "family-size-p", default_value = "0.5")]
    pub family_size_p: f64,
}

impl FamilySizeArgs {
    /// Convert to a [`FamilySizeDistribution`].
    pub fn to_family_size_distribution(&self) -> Result<FamilySizeDistribution> {
        match self.family_size_dist.as_str() {
            "lognormal" => Ok(FamilySizeDistribution::log_normal(
                self.family_size_mean,
                self.family_size_stddev,
            )),
            "negbin" => Ok(FamilySizeDistribution::negative_binomial(
                self.family_size_r,
                self.family_size_p,
            )),
            other => bail!("Unknown family size distribution '{other}': expected lognormal or negbin"),
        }
    }
}

/// Assembles the simulation parameters from the shared argument groups.
pub fn simulation_params(
    common: &SimulationCommon,
    family_size: &FamilySizeArgs,
) -> Result<SimulationParams> {
    Ok(SimulationParams {
        num_molecules: common.num_molecules,
        num_contigs: common.num_contigs,
        ref_length: common.ref_length,
        read_length: common.read_length,
        family_size: family_size.to_family_size_distribution()?,
        error_rate: common.error_rate,
        umi_space: common.umi_space,
        seed: common.seed,
    })
}
