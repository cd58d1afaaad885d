//! Coordinate-sorted aligned reads with PCR-duplicate families.
//!
//! Each simulated molecule gets a random contig, start, strand and UMI. It is then read
//! `family size` times; every copy carries the reference bases at its position with
//! independent sequencing errors, and sequencing errors get low base qualities. The reads
//! are returned in coordinate order, the order [`DuplicateMarker`](crate::dedup::DuplicateMarker)
//! and [`BaseCountScanner`](crate::base_counts::BaseCountScanner) require.

use anyhow::Result;
use fgpile_dna::Base;
use log::debug;
use rand::{Rng, RngExt};

use crate::base_counts::AlignedBases;
use crate::dedup::DuplicateCandidate;
use crate::flags::{DUPLICATE_FLAG, REVERSE_FLAG};
use crate::simulate::{FamilySizeDistribution, create_rng};
use crate::validation::{validate_fraction, validate_min_max, validate_positive};

/// Base quality at or above which a base contributes to a read's duplicate score.
pub const MIN_SCORING_QUALITY: u8 = 15;

/// Number of distinct UMIs molecules draw from.
pub const DEFAULT_UMI_SPACE: u32 = 1 << 16;

/// A simulated aligned read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimRead {
    /// Read name, `mol{molecule}:{copy}`
    pub name: String,
    /// Reference contig index
    pub contig: u32,
    /// 0-based alignment start
    pub start: u32,
    /// Unique molecular identifier shared by a duplicate family
    pub umi: u32,
    /// Read bases, aligned without gaps from `start`
    pub bases: Vec<u8>,
    /// Phred base qualities
    pub quals: Vec<u8>,
    /// SAM flags
    pub flags: u16,
}

impl SimRead {
    /// Returns true if the read maps to the reverse strand.
    #[must_use]
    pub fn is_reverse(&self) -> bool {
        self.flags & REVERSE_FLAG != 0
    }
}

impl DuplicateCandidate for SimRead {
    type Coordinate = (u32, u32);
    type Key = (bool, u32);

    fn coordinate(&self) -> (u32, u32) {
        (self.contig, self.start)
    }

    fn duplicate_key(&self) -> (bool, u32) {
        (self.is_reverse(), self.umi)
    }

    /// Sum of base qualities at or above [`MIN_SCORING_QUALITY`].
    fn score(&self) -> u32 {
        self.quals.iter().filter(|&&q| q >= MIN_SCORING_QUALITY).map(|&q| u32::from(q)).sum()
    }

    fn is_duplicate(&self) -> bool {
        self.flags & DUPLICATE_FLAG != 0
    }

    fn set_duplicate(&mut self, duplicate: bool) {
        if duplicate {
            self.flags |= DUPLICATE_FLAG;
        } else {
            self.flags &= !DUPLICATE_FLAG;
        }
    }
}

impl AlignedBases for SimRead {
    fn contig(&self) -> u32 {
        self.contig
    }

    fn start(&self) -> u32 {
        self.start
    }

    #[allow(clippy::cast_possible_truncation)]
    fn end(&self) -> u32 {
        self.start + self.bases.len() as u32
    }

    fn base_at(&self, position: u32) -> Option<Base> {
        let offset = position.checked_sub(self.start)? as usize;
        self.bases.get(offset).map(|&b| Base::from_ascii(b))
    }
}

/// Parameters for [`ReadSimulator`].
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationParams {
    /// Number of source molecules
    pub num_molecules: usize,
    /// Number of reference contigs
    pub num_contigs: u32,
    /// Length of each reference contig
    pub ref_length: u32,
    /// Length of every read
    pub read_length: u32,
    /// Reads per molecule
    pub family_size: FamilySizeDistribution,
    /// Per-base probability of a sequencing error
    pub error_rate: f64,
    /// Number of distinct UMIs
    pub umi_space: u32,
    /// Random seed; `None` seeds from OS entropy
    pub seed: Option<u64>,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            num_molecules: 1000,
            num_contigs: 1,
            ref_length: 100_000,
            read_length: 100,
            family_size: FamilySizeDistribution::default(),
            error_rate: 0.001,
            umi_space: DEFAULT_UMI_SPACE,
            seed: None,
        }
    }
}

impl SimulationParams {
    /// Checks that the parameters describe a simulation that can run.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid parameter.
    pub fn validate(&self) -> Result<()> {
        validate_positive(self.num_molecules, "num-molecules")?;
        validate_positive(self.num_contigs, "num-contigs")?;
        validate_positive(self.read_length, "read-length")?;
        validate_positive(self.umi_space, "umi-space")?;
        validate_min_max(self.read_length, self.ref_length, "read-length", "ref-length")?;
        validate_fraction(self.error_rate, "error-rate")?;
        Ok(())
    }
}

/// Generates coordinate-sorted reads with duplicate families.
#[derive(Debug, Clone)]
pub struct ReadSimulator {
    params: SimulationParams,
}

impl ReadSimulator {
    /// Creates a simulator, validating `params`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are invalid.
    pub fn new(params: SimulationParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// The simulation parameters.
    #[must_use]
    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// Generates every read, sorted by contig and start.
    ///
    /// # Errors
    ///
    /// Returns an error if the family size distribution is invalid.
    pub fn generate(&self) -> Result<Vec<SimRead>> {
        let params = &self.params;
        let sampler = params.family_size.sampler()?;
        let mut rng = create_rng(params.seed);

        let references: Vec<Vec<u8>> =
            (0..params.num_contigs).map(|_| random_sequence(&mut rng, params.ref_length)).collect();

        let mut reads = Vec::with_capacity(params.num_molecules * 2);
        for molecule in 0..params.num_molecules {
            let contig = rng.random_range(0..params.num_contigs);
            let start = rng.random_range(0..=params.ref_length - params.read_length);
            let flags = if rng.random_bool(0.5) { REVERSE_FLAG } else { 0 };
            let umi = rng.random_range(0..params.umi_space);
            let window = start as usize..(start + params.read_length) as usize;
            let template = &references[contig as usize][window];

            for copy in 0..sampler.sample(&mut rng, 1) {
                let (bases, quals) = self.sequence(&mut rng, template);
                reads.push(SimRead {
                    name: format!("mol{molecule}:{copy}"),
                    contig,
                    start,
                    umi,
                    bases,
                    quals,
                    flags,
                });
            }
        }

        reads.sort_by_key(|read| (read.contig, read.start));
        debug!("Simulated {} reads from {} molecules", reads.len(), params.num_molecules);
        Ok(reads)
    }

    /// Copies `template` with sequencing errors, returning bases and qualities.
    fn sequence(&self, rng: &mut impl Rng, template: &[u8]) -> (Vec<u8>, Vec<u8>) {
        template
            .iter()
            .map(|&base| {
                if rng.random_bool(self.params.error_rate) {
                    (substitute(rng, base), rng.random_range(2..MIN_SCORING_QUALITY))
                } else {
                    (base, rng.random_range(25..=40))
                }
            })
            .unzip()
    }
}

fn random_sequence(rng: &mut impl Rng, length: u32) -> Vec<u8> {
    (0..length).map(|_| Base::CALLED[rng.random_range(0..4)].to_ascii()).collect()
}

/// A different called base, or a no-call one time in five.
fn substitute(rng: &mut impl Rng, base: u8) -> u8 {
    let choice = rng.random_range(0..5);
    if choice == 4 {
        return Base::N.to_ascii();
    }
    let replacement = Base::CALLED[choice].to_ascii();
    if replacement == base { Base::CALLED[(choice + 1) % 4].to_ascii() } else { replacement }
}
