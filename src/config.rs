//! Simulation configuration.

use serde::{Deserialize, Serialize};

use crate::channel::{ChannelMode, ChannelModel, PhysicalChannelParams};
use crate::harq::BlerModel;
use crate::scheduler::SchedulerPolicy;
use crate::traffic::TrafficModel;

/// Parameters that stay fixed for a whole run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Resource blocks available per TTI.
    pub total_rb: usize,
    /// TTI duration in seconds (default 1 ms).
    pub tti_duration_s: f64,
    /// RB allocation policy.
    pub scheduler: SchedulerPolicy,
    /// CQI model.
    pub channel: ChannelModel,
    /// Whether positions advance each TTI.
    pub mobility: bool,
    /// Buffer arrivals.
    pub traffic: TrafficModel,
    /// HARQ block error model.
    pub bler: BlerModel,
    /// Smoothing of the cross-TTI average throughput used by PF.
    pub throughput_alpha: f64,
    /// Lower bound of the average throughput (bits/TTI).
    pub throughput_floor: f64,
    /// RNG seed.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            total_rb: 50,
            tti_duration_s: 1e-3,
            scheduler: SchedulerPolicy::RoundRobin,
            channel: ChannelModel::default(),
            mobility: true,
            traffic: TrafficModel::None,
            bler: BlerModel::default(),
            throughput_alpha: 0.1,
            throughput_floor: 1.0,
            seed: 0,
        }
    }
}

impl SimulationConfig {
    /// Creates the default configuration (50 RBs, 1 ms TTI, RR, stochastic CQI).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the RB count.
    pub fn with_total_rb(mut self, total_rb: usize) -> Self {
        self.total_rb = total_rb;
        self
    }

    /// Sets the TTI duration (s).
    pub fn with_tti_duration(mut self, seconds: f64) -> Self {
        self.tti_duration_s = seconds;
        self
    }

    /// Sets the scheduling policy.
    pub fn with_scheduler(mut self, policy: SchedulerPolicy) -> Self {
        self.scheduler = policy;
        self
    }

    /// Sets the channel mode, keeping the physical parameters.
    pub fn with_channel_mode(mut self, mode: ChannelMode) -> Self {
        self.channel.mode = mode;
        self
    }

    /// Sets the physical channel parameters.
    pub fn with_physical_params(mut self, params: PhysicalChannelParams) -> Self {
        self.channel.physical = params;
        self
    }

    /// Enables or disables mobility.
    pub fn with_mobility(mut self, enabled: bool) -> Self {
        self.mobility = enabled;
        self
    }

    /// Sets the traffic model.
    pub fn with_traffic(mut self, traffic: TrafficModel) -> Self {
        self.traffic = traffic;
        self
    }

    /// Sets the HARQ error model.
    pub fn with_bler(mut self, bler: BlerModel) -> Self {
        self.bler = bler;
        self
    }

    /// Sets the average-throughput smoothing factor and floor.
    pub fn with_throughput_averaging(mut self, alpha: f64, floor: f64) -> Self {
        self.throughput_alpha = alpha;
        self.throughput_floor = floor;
        self
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = SimulationConfig::new();
        assert_eq!(c.total_rb, 50);
        assert!((c.tti_duration_s - 0.001).abs() < 1e-12);
        assert_eq!(c.scheduler, SchedulerPolicy::RoundRobin);
        assert_eq!(c.channel.mode, ChannelMode::Stochastic);
        assert_eq!(c.traffic, TrafficModel::None);
    }

    #[test]
    fn test_builder() {
        let c = SimulationConfig::new()
            .with_total_rb(25)
            .with_scheduler(SchedulerPolicy::ProportionalFair)
            .with_channel_mode(ChannelMode::Physical)
            .with_mobility(false)
            .with_traffic(TrafficModel::Constant { bits_per_tti: 100 })
            .with_throughput_averaging(0.2, 5.0)
            .with_seed(99);

        assert_eq!(c.total_rb, 25);
        assert_eq!(c.channel.mode, ChannelMode::Physical);
        assert!((c.channel.physical.tx_power_dbm - 46.0).abs() < 1e-10);
        assert!(!c.mobility);
        assert!((c.throughput_alpha - 0.2).abs() < 1e-10);
        assert_eq!(c.seed, 99);
    }

    #[test]
    fn test_serde_roundtrip() {
        let c = SimulationConfig::new()
            .with_scheduler(SchedulerPolicy::MaxCqi)
            .with_traffic(TrafficModel::Poisson { mean_bits: 800.0 });
        let json = serde_json::to_string(&c).unwrap();
        let back: SimulationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
