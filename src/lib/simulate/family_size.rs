//! Duplicate family size models.
//!
//! Each simulated molecule is sequenced a number of times drawn from one of these
//! distributions; every read beyond the first is a PCR duplicate.
//! - Log-normal (default)
//! - Negative binomial, as a Gamma-Poisson mixture

use anyhow::{Context, Result};
use rand::Rng;
use rand_distr::{Distribution, Gamma, LogNormal, Poisson};

/// Family size distribution, as configured on the command line.
///
/// # Examples
///
/// ```
/// use fgpile_lib::simulate::{FamilySizeDistribution, create_rng};
///
/// let sampler = FamilySizeDistribution::log_normal(3.0, 2.0).sampler().unwrap();
/// let mut rng = create_rng(Some(42));
/// assert!(sampler.sample(&mut rng, 1) >= 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FamilySizeDistribution {
    /// Log-normal distribution (natural for PCR)
    LogNormal {
        /// Mean family size
        mean: f64,
        /// Standard deviation
        stddev: f64,
    },
    /// Negative binomial distribution
    NegativeBinomial {
        /// Number of successes (shape parameter)
        r: f64,
        /// Probability of success
        p: f64,
    },
}

impl Default for FamilySizeDistribution {
    fn default() -> Self {
        Self::LogNormal { mean: 3.0, stddev: 2.0 }
    }
}

impl FamilySizeDistribution {
    /// Creates a log-normal family size distribution.
    #[must_use]
    pub fn log_normal(mean: f64, stddev: f64) -> Self {
        Self::LogNormal { mean, stddev }
    }

    /// Creates a negative binomial family size distribution.
    #[must_use]
    pub fn negative_binomial(r: f64, p: f64) -> Self {
        Self::NegativeBinomial { r, p }
    }

    /// Builds the underlying distribution once so it can be sampled repeatedly.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters do not describe a valid distribution.
    pub fn sampler(&self) -> Result<FamilySizeSampler> {
        match *self {
            Self::LogNormal { mean, stddev } => {
                // convert mean/stddev of the family size to parameters of the underlying normal
                let sigma_sq = (1.0 + stddev.powi(2) / mean.powi(2)).ln();
                let mu = mean.ln() - sigma_sq / 2.0;
                let dist = LogNormal::new(mu, sigma_sq.sqrt()).with_context(|| {
                    format!("Invalid log-normal family size: mean={mean} stddev={stddev}")
                })?;
                Ok(FamilySizeSampler::LogNormal(dist))
            }
            Self::NegativeBinomial { r, p } => {
                let gamma = Gamma::new(r, p / (1.0 - p))
                    .with_context(|| format!("Invalid negative binomial family size: r={r} p={p}"))?;
                Ok(FamilySizeSampler::NegativeBinomial(gamma))
            }
        }
    }
}

/// A ready-to-sample family size distribution.
#[derive(Debug, Clone, Copy)]
pub enum FamilySizeSampler {
    /// Log-normal
    LogNormal(LogNormal<f64>),
    /// Gamma mixing distribution of a Gamma-Poisson mixture
    NegativeBinomial(Gamma<f64>),
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
impl FamilySizeSampler {
    /// Samples a family size, clamped to at least `min_size`.
    pub fn sample(&self, rng: &mut impl Rng, min_size: usize) -> usize {
        let size = match self {
            Self::LogNormal(dist) => dist.sample(rng).round() as usize,
            Self::NegativeBinomial(gamma) => {
                let lambda = gamma.sample(rng);
                // Poisson rejects a zero or non-finite rate
                Poisson::new(lambda).map_or(0, |poisson| poisson.sample(rng) as usize)
            }
        };
        size.max(min_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulate::create_rng;

    #[test]
    fn test_log_normal_default() {
        let sampler = FamilySizeDistribution::default().sampler().unwrap();
        let mut rng = create_rng(Some(42));
        assert!((0..100).all(|_| sampler.sample(&mut rng, 1) >= 1));
    }

    #[test]
    fn test_min_size() {
        let sampler = FamilySizeDistribution::log_normal(1.5, 0.5).sampler().unwrap();
        let mut rng = create_rng(Some(42));
        assert!((0..100).all(|_| sampler.sample(&mut rng, 3) >= 3));
    }

    #[test]
    fn test_negative_binomial() {
        let sampler = FamilySizeDistribution::negative_binomial(2.0, 0.5).sampler().unwrap();
        let mut rng = create_rng(Some(42));
        assert!((0..100).all(|_| sampler.sample(&mut rng, 1) >= 1));
    }

    #[test]
    fn test_high_variance_produces_large_families() {
        let sampler = FamilySizeDistribution::log_normal(5.0, 10.0).sampler().unwrap();
        let mut rng = create_rng(Some(42));
        let max = (0..1000).map(|_| sampler.sample(&mut rng, 1)).max().unwrap();
        assert!(max > 10, "Expected some large family sizes with high variance");
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(FamilySizeDistribution::negative_binomial(-1.0, 0.5).sampler().is_err());
        let err = FamilySizeDistribution::log_normal(3.0, f64::NAN).sampler().unwrap_err();
        assert!(err.to_string().contains("Invalid log-normal family size"));
    }

    #[test]
    fn test_reproducibility() {
        let sampler = FamilySizeDistribution::log_normal(3.0, 2.0).sampler().unwrap();
        let mut rng1 = create_rng(Some(42));
        let mut rng2 = create_rng(Some(42));
        let samples1: Vec<usize> = (0..10).map(|_| sampler.sample(&mut rng1, 1)).collect();
        let samples2: Vec<usize> = (0..10).map(|_| sampler.sample(&mut rng2, 1)).collect();
        assert_eq!(samples1, samples2);
    }
}
