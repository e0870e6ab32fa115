//! Setup validation for simulation runs.
//!
//! Checks the user list, MCS table and configuration once, before the first
//! TTI. Detects:
//! - Empty or duplicate users
//! - Empty, non-finite or non-monotonic MCS tables
//! - Non-positive RB count and TTI duration
//! - Out-of-range averaging and traffic parameters
//! - Non-finite channel and BLER parameters
//!
//! Every per-TTI computation is total for inputs that pass these checks.

use std::collections::HashSet;
use thiserror::Error;

use crate::config::SimulationConfig;
use crate::models::{McsTable, User};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind:?}: {message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// No users to schedule.
    EmptyUsers,
    /// Two users share the same ID.
    DuplicateId,
    /// The MCS table has no entries.
    EmptyMcsTable,
    /// MCS thresholds are not finite and strictly increasing.
    NonMonotonicMcs,
    /// RB count is zero.
    InvalidRbCount,
    /// TTI duration is not a positive finite number.
    InvalidTtiDuration,
    /// Throughput smoothing factor or floor out of range.
    InvalidAveraging,
    /// Traffic model parameters do not describe a distribution.
    InvalidTraffic,
    /// Physical channel parameters are unusable.
    InvalidChannel,
    /// BLER decay is negative or not finite.
    InvalidBler,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates everything a simulation needs before it starts.
///
/// Checks:
/// 1. At least one user, no duplicate user IDs
/// 2. Non-empty MCS table with finite, strictly increasing thresholds
/// 3. Positive RB count and TTI duration
/// 4. Throughput smoothing in (0, 1] and a positive floor
/// 5. Valid traffic parameters
/// 6. Finite physical channel parameters, positive minimum distance and
///    positive dB-per-CQI step
/// 7. Finite, non-negative BLER decay
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_setup(users: &[User], mcs: &McsTable, config: &SimulationConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if users.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyUsers,
            "At least one user is required",
        ));
    }

    let mut ids = HashSet::new();
    for u in users {
        if !ids.insert(u.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate user ID: {}", u.id),
            ));
        }
    }

    if mcs.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyMcsTable,
            "MCS table has no entries",
        ));
    } else if !mcs.is_monotonic() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NonMonotonicMcs,
            "MCS thresholds must be finite and strictly increasing",
        ));
    }

    if config.total_rb == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidRbCount,
            "RB count must be positive",
        ));
    }

    if !(config.tti_duration_s.is_finite() && config.tti_duration_s > 0.0) {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidTtiDuration,
            format!("TTI duration must be positive, got {}", config.tti_duration_s),
        ));
    }

    if !(config.throughput_alpha > 0.0 && config.throughput_alpha <= 1.0) {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidAveraging,
            format!(
                "Throughput smoothing must be in (0, 1], got {}",
                config.throughput_alpha
            ),
        ));
    }

    if !(config.throughput_floor.is_finite() && config.throughput_floor > 0.0) {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidAveraging,
            format!(
                "Throughput floor must be positive, got {}",
                config.throughput_floor
            ),
        ));
    }

    if !config.traffic.is_valid() {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidTraffic,
            format!("Invalid traffic model: {:?}", config.traffic),
        ));
    }

    let physical = &config.channel.physical;
    let channel_params = [
        ("tx_power_dbm", physical.tx_power_dbm),
        ("noise_floor_dbm", physical.noise_floor_dbm),
        ("pathloss_intercept_db", physical.pathloss_intercept_db),
        ("pathloss_slope_db", physical.pathloss_slope_db),
        ("sinr_offset_db", physical.sinr_offset_db),
        ("sinr_per_cqi_db", physical.sinr_per_cqi_db),
        ("min_distance_m", physical.min_distance_m),
    ];
    for (name, value) in channel_params {
        if !value.is_finite() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidChannel,
                format!("Channel parameter {name} must be finite, got {value}"),
            ));
        }
    }

    let min_distance = physical.min_distance_m;
    if min_distance.is_finite() && min_distance <= 0.0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidChannel,
            format!("Minimum distance must be positive, got {min_distance}"),
        ));
    }

    // divisor in the SINR -> CQI mapping
    let per_cqi = physical.sinr_per_cqi_db;
    if per_cqi.is_finite() && per_cqi <= 0.0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidChannel,
            format!("SINR per CQI step must be positive, got {per_cqi}"),
        ));
    }

    let decay = config.bler.decay;
    if !(decay.is_finite() && decay >= 0.0) {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidBler,
            format!("BLER decay must be finite and non-negative, got {decay}"),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harq::BlerModel;
    use crate::models::McsEntry;
    use crate::traffic::TrafficModel;

    fn sample_users() -> Vec<User> {
        vec![
            User::new(0).with_buffer(10_000),
            User::new(1).with_buffer(18_000),
            User::new(2).with_buffer(9_000),
        ]
    }

    fn has_kind(result: ValidationResult, kind: ValidationErrorKind) -> bool {
        result.unwrap_err().iter().any(|e| e.kind == kind)
    }

    #[test]
    fn test_valid_setup() {
        let config = SimulationConfig::default();
        assert!(validate_setup(&sample_users(), &McsTable::lte_default(), &config).is_ok());
    }

    #[test]
    fn test_empty_users() {
        let config = SimulationConfig::default();
        let result = validate_setup(&[], &McsTable::lte_default(), &config);
        assert!(has_kind(result, ValidationErrorKind::EmptyUsers));
    }

    #[test]
    fn test_duplicate_user_id() {
        let users = vec![User::new(4), User::new(4)];
        let result = validate_setup(&users, &McsTable::lte_default(), &SimulationConfig::default());
        let errors = result.unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains('4')));
    }

    #[test]
    fn test_empty_mcs() {
        let result = validate_setup(&sample_users(), &McsTable::default(), &SimulationConfig::default());
        assert!(has_kind(result, ValidationErrorKind::EmptyMcsTable));
    }

    #[test]
    fn test_non_monotonic_mcs() {
        let mcs = McsTable::new(vec![McsEntry::new(5.0, 100), McsEntry::new(3.0, 200)]);
        let result = validate_setup(&sample_users(), &mcs, &SimulationConfig::default());
        assert!(has_kind(result, ValidationErrorKind::NonMonotonicMcs));
    }

    #[test]
    fn test_zero_rb() {
        let config = SimulationConfig::default().with_total_rb(0);
        let result = validate_setup(&sample_users(), &McsTable::lte_default(), &config);
        assert!(has_kind(result, ValidationErrorKind::InvalidRbCount));
    }

    #[test]
    fn test_bad_tti_duration() {
        for d in [0.0, -1e-3, f64::INFINITY, f64::NAN] {
            let config = SimulationConfig::default().with_tti_duration(d);
            let result = validate_setup(&sample_users(), &McsTable::lte_default(), &config);
            assert!(has_kind(result, ValidationErrorKind::InvalidTtiDuration));
        }
    }

    #[test]
    fn test_bad_averaging() {
        let config = SimulationConfig::default().with_throughput_averaging(0.0, 1.0);
        let result = validate_setup(&sample_users(), &McsTable::lte_default(), &config);
        assert!(has_kind(result, ValidationErrorKind::InvalidAveraging));

        let config = SimulationConfig::default().with_throughput_averaging(0.5, 0.0);
        let result = validate_setup(&sample_users(), &McsTable::lte_default(), &config);
        assert!(has_kind(result, ValidationErrorKind::InvalidAveraging));
    }

    #[test]
    fn test_bad_traffic() {
        let config =
            SimulationConfig::default().with_traffic(TrafficModel::Poisson { mean_bits: -2.0 });
        let result = validate_setup(&sample_users(), &McsTable::lte_default(), &config);
        assert!(has_kind(result, ValidationErrorKind::InvalidTraffic));
    }

    #[test]
    fn test_bad_min_distance() {
        let mut config = SimulationConfig::default();
        config.channel.physical.min_distance_m = 0.0;
        let result = validate_setup(&sample_users(), &McsTable::lte_default(), &config);
        assert!(has_kind(result, ValidationErrorKind::InvalidChannel));
    }

    #[test]
    fn test_non_finite_channel_params() {
        let setters: [fn(&mut SimulationConfig, f64); 7] = [
            |c, v| c.channel.physical.tx_power_dbm = v,
            |c, v| c.channel.physical.noise_floor_dbm = v,
            |c, v| c.channel.physical.pathloss_intercept_db = v,
            |c, v| c.channel.physical.pathloss_slope_db = v,
            |c, v| c.channel.physical.sinr_offset_db = v,
            |c, v| c.channel.physical.sinr_per_cqi_db = v,
            |c, v| c.channel.physical.min_distance_m = v,
        ];
        for set in setters {
            for v in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
                let mut config = SimulationConfig::default();
                set(&mut config, v);
                let result = validate_setup(&sample_users(), &McsTable::lte_default(), &config);
                assert!(has_kind(result, ValidationErrorKind::InvalidChannel));
            }
        }
    }

    #[test]
    fn test_non_positive_sinr_per_cqi() {
        for v in [0.0, -3.0] {
            let mut config = SimulationConfig::default();
            config.channel.physical.sinr_per_cqi_db = v;
            let result = validate_setup(&sample_users(), &McsTable::lte_default(), &config);
            assert!(has_kind(result, ValidationErrorKind::InvalidChannel));
        }
    }

    #[test]
    fn test_bad_bler_decay() {
        for decay in [-0.1, f64::NAN, f64::INFINITY] {
            let config = SimulationConfig::default().with_bler(BlerModel { decay });
            let result = validate_setup(&sample_users(), &McsTable::lte_default(), &config);
            assert!(has_kind(result, ValidationErrorKind::InvalidBler));
        }

        // decay 0 is a valid always-NACK model
        let config = SimulationConfig::default().with_bler(BlerModel { decay: 0.0 });
        assert!(validate_setup(&sample_users(), &McsTable::lte_default(), &config).is_ok());
    }

    #[test]
    fn test_multiple_errors() {
        let config = SimulationConfig::default().with_total_rb(0);
        let errors = validate_setup(&[], &McsTable::default(), &config).unwrap_err();
        assert!(errors.len() >= 3);
    }

    #[test]
    fn test_error_display() {
        let err = ValidationError::new(ValidationErrorKind::InvalidRbCount, "RB count must be positive");
        assert_eq!(err.to_string(), "InvalidRbCount: RB count must be positive");
    }
}
