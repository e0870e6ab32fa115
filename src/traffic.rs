//! Downlink traffic arrivals.
//!
//! After HARQ has run, new data arrives in each user's buffer according to a
//! [`TrafficModel`]. The default is [`TrafficModel::None`]: buffers only drain.

use rand::Rng;
use rand_distr::{Distribution, Poisson};
use serde::{Deserialize, Serialize};

/// Per-user, per-TTI arrival distribution.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum TrafficModel {
    /// No arrivals (full-buffer drain scenario).
    #[default]
    None,
    /// Fixed number of bits every TTI.
    Constant { bits_per_tti: u64 },
    /// Uniform integer in `[0, max_bits]`.
    Uniform { max_bits: u64 },
    /// Poisson-distributed bits with the given mean.
    Poisson { mean_bits: f64 },
}

impl TrafficModel {
    /// Whether the parameters describe a valid distribution.
    pub fn is_valid(&self) -> bool {
        match *self {
            TrafficModel::Poisson { mean_bits } => mean_bits.is_finite() && mean_bits > 0.0,
            _ => true,
        }
    }
}

/// Sampler built from a validated [`TrafficModel`].
#[derive(Debug, Clone)]
pub struct ArrivalProcess {
    model: TrafficModel,
    poisson: Option<Poisson<f64>>,
}

impl ArrivalProcess {
    /// Builds the sampler; returns `None` for invalid parameters.
    pub fn new(model: TrafficModel) -> Option<Self> {
        let poisson = match model {
            TrafficModel::Poisson { mean_bits } => Some(Poisson::new(mean_bits).ok()?),
            _ => None,
        };
        Some(Self { model, poisson })
    }

    /// The model this process samples from.
    pub fn model(&self) -> TrafficModel {
        self.model
    }

    /// Draws the bits arriving for one user in one TTI.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> u64 {
        match self.model {
            TrafficModel::None => 0,
            TrafficModel::Constant { bits_per_tti } => bits_per_tti,
            TrafficModel::Uniform { max_bits } => rng.random_range(0..=max_bits),
            TrafficModel::Poisson { .. } => self
                .poisson
                .as_ref()
                .map(|p| p.sample(rng) as u64)
                .unwrap_or(0),
        }
    }
}
