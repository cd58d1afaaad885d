//! Synthetic aligned reads for exercising the streaming scans.
//!
//! # Modules
//!
//! - [`rng`] - Seeded random number generator utilities
//! - [`family_size`] - Duplicate family size distribution models
//! - [`reads`] - Coordinate-sorted aligned reads with PCR-duplicate families

pub mod family_size;
pub mod reads;
pub mod rng;

pub use family_size::{FamilySizeDistribution, FamilySizeSampler};
pub use reads::{ReadSimulator, SimRead, SimulationParams};
pub use rng::create_rng;
