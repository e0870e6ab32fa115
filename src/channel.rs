//! Channel quality models.
//!
//! Computes a CQI in [0, 15] for each user every TTI, either from an i.i.d.
//! uniform draw or from a log-distance path loss model.
//!
//! # Physical model
//!
//! | Quantity | Formula |
//! |----------|---------|
//! | Path loss (dB) | `30 + 30·log10(d)` |
//! | Received power (dBm) | `46 - PL` |
//! | SINR (dB) | `Prx - (-101)` |
//! | CQI | `clamp((SINR - 30) / 4, 0, 15)` |
//!
//! Distances below `min_distance_m` are clamped so the logarithm stays finite.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::User;

/// Upper bound of the CQI scale.
pub const MAX_CQI: f64 = 15.0;

/// How CQI values are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChannelMode {
    /// `cqi = 15·U`, U uniform on [0, 1), independent per user and TTI.
    #[default]
    Stochastic,
    /// Deterministic CQI from the user's distance to the base station.
    Physical,
}

/// Parameters of the physical (path loss) channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalChannelParams {
    /// Base station transmit power (dBm).
    pub tx_power_dbm: f64,
    /// Receiver noise floor (dBm).
    pub noise_floor_dbm: f64,
    /// Path loss at 1 m (dB).
    pub pathloss_intercept_db: f64,
    /// Path loss per decade of distance (dB).
    pub pathloss_slope_db: f64,
    /// SINR mapped to CQI 0 (dB).
    pub sinr_offset_db: f64,
    /// SINR span of one CQI step (dB).
    pub sinr_per_cqi_db: f64,
    /// Distance floor (m).
    pub min_distance_m: f64,
}

impl Default for PhysicalChannelParams {
    fn default() -> Self {
        Self {
            tx_power_dbm: 46.0,
            noise_floor_dbm: -101.0,
            pathloss_intercept_db: 30.0,
            pathloss_slope_db: 30.0,
            sinr_offset_db: 30.0,
            sinr_per_cqi_db: 4.0,
            min_distance_m: 1.0,
        }
    }
}

impl PhysicalChannelParams {
    /// Path loss in dB at distance `d` meters (after the distance floor).
    pub fn pathloss_db(&self, distance_m: f64) -> f64 {
        let d = distance_m.max(self.min_distance_m);
        self.pathloss_intercept_db + self.pathloss_slope_db * d.log10()
    }

    /// SINR in dB at distance `d` meters.
    pub fn sinr_db(&self, distance_m: f64) -> f64 {
        let rx_power_dbm = self.tx_power_dbm - self.pathloss_db(distance_m);
        rx_power_dbm - self.noise_floor_dbm
    }

    /// CQI at distance `d` meters.
    pub fn cqi_at(&self, distance_m: f64) -> f64 {
        ((self.sinr_db(distance_m) - self.sinr_offset_db) / self.sinr_per_cqi_db)
            .clamp(0.0, MAX_CQI)
    }
}

/// Per-user CQI generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelModel {
    /// Active strategy.
    pub mode: ChannelMode,
    /// Parameters used in [`ChannelMode::Physical`].
    pub physical: PhysicalChannelParams,
}

impl ChannelModel {
    /// Creates a model in the given mode with default physical parameters.
    pub fn new(mode: ChannelMode) -> Self {
        Self {
            mode,
            physical: PhysicalChannelParams::default(),
        }
    }

    /// Replaces the physical parameters.
    pub fn with_physical(mut self, physical: PhysicalChannelParams) -> Self {
        self.physical = physical;
        self
    }

    /// Computes a CQI for `user` without modifying it.
    pub fn sample_cqi<R: Rng>(&self, user: &User, rng: &mut R) -> f64 {
        match self.mode {
            ChannelMode::Stochastic => MAX_CQI * rng.random::<f64>(),
            ChannelMode::Physical => self.physical.cqi_at(user.distance_to_origin()),
        }
    }

    /// Recomputes and stores the user's CQI.
    pub fn update_cqi<R: Rng>(&self, user: &mut User, rng: &mut R) {
        user.cqi = self.sample_cqi(user, rng);
    }
}
