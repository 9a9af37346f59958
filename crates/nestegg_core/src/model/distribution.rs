//! Normally distributed rates of return and growth
//!
//! Every random draw in the engine goes through [`Dist`], and every draw takes
//! the caller's generator explicitly so that a trial seeded once is fully
//! reproducible.

use rand::Rng;
use rand::distr::Distribution;
use rand_distr::{Normal, StandardNormal};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const MONTHS_PER_YEAR: f64 = 12.0;

/// Serializable parameters of a [`Dist`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistParams {
    pub mean: f64,
    pub std_dev: f64,
}

impl DistParams {
    pub const fn new(mean: f64, std_dev: f64) -> Self {
        Self { mean, std_dev }
    }

    pub fn build(self) -> Result<Dist, ConfigError> {
        Dist::new(self.mean, self.std_dev)
    }
}

/// A normal distribution of annual rates.
///
/// A zero standard deviation yields the mean without consuming a draw.
#[derive(Debug, Clone, Copy)]
pub struct Dist {
    params: DistParams,
    normal: Option<Normal<f64>>,
}

impl Dist {
    pub fn new(mean: f64, std_dev: f64) -> Result<Self, ConfigError> {
        if !mean.is_finite() {
            return Err(ConfigError::InvalidDistribution {
                mean,
                std_dev,
                reason: "mean must be finite",
            });
        }
        let invalid = ConfigError::InvalidDistribution {
            mean,
            std_dev,
            reason: "std_dev must be non-negative and finite",
        };
        // Normal::new accepts a negative std_dev
        if !std_dev.is_finite() || std_dev < 0.0 {
            return Err(invalid);
        }
        let normal = Normal::new(mean, std_dev).map_err(|_| invalid)?;
        Ok(Self {
            params: DistParams { mean, std_dev },
            normal: (std_dev > 0.0).then_some(normal),
        })
    }

    /// A distribution that always yields `value`.
    pub fn fixed(value: f64) -> Self {
        Self {
            params: DistParams::new(value, 0.0),
            normal: None,
        }
    }

    /// Draw an annual rate.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match &self.normal {
            Some(normal) => normal.sample(rng),
            None => self.params.mean,
        }
    }

    /// Draw a monthly rate: the annual mean spread over twelve months and the
    /// annual volatility scaled by `1 / sqrt(12)`.
    pub fn sample_monthly<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let monthly_mean = self.params.mean / MONTHS_PER_YEAR;
        if self.normal.is_none() {
            return monthly_mean;
        }
        let z: f64 = StandardNormal.sample(rng);
        z * self.params.std_dev / MONTHS_PER_YEAR.sqrt() + monthly_mean
    }
}
