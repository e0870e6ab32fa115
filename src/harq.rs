//! HARQ retransmission engine.
//!
//! Each user owns a single HARQ process. Every TTI the process is driven by
//! the capacity (bits) the scheduler granted the user:
//!
//! | State | Capacity | Result |
//! |-------|----------|--------|
//! | idle | 0 or empty buffer | stays idle |
//! | idle | > 0 | admits `min(buffer, cap)`, first attempt |
//! | active | 0 | waits |
//! | active | > 0 | retransmits, attempt count + 1 |
//!
//! An attempt is acknowledged with probability `1 - exp(-k·cqi)^n`, where `n`
//! is 1 for the first transmission and otherwise the attempt count held
//! before the retransmission (so the first retransmission also uses `n = 1`).
//! Blocks are retried until acknowledged; there is no retry limit.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::models::{HarqStatus, User};

/// Block error model: `bler = exp(-decay·cqi)^attempts`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlerModel {
    /// Exponential decay of BLER with CQI (default: 0.35).
    pub decay: f64,
}

impl Default for BlerModel {
    fn default() -> Self {
        Self { decay: 0.35 }
    }
}

impl BlerModel {
    /// Single-attempt block error rate.
    pub fn base_bler(&self, cqi: f64) -> f64 {
        (-self.decay * cqi).exp()
    }

    /// Effective block error rate after `attempts` transmissions.
    pub fn effective_bler(&self, cqi: f64, attempts: u32) -> f64 {
        self.base_bler(cqi).powi(attempts as i32)
    }

    /// Draws an ACK (`true`) or NACK (`false`).
    pub fn decide_ack<R: Rng>(&self, cqi: f64, attempts: u32, rng: &mut R) -> bool {
        let u: f64 = rng.random();
        u >= self.effective_bler(cqi, attempts)
    }
}

/// Result of one HARQ step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarqOutcome {
    /// Status after the step.
    pub status: HarqStatus,
    /// Bits delivered (non-zero only on ACK).
    pub delivered_bits: u64,
}

impl HarqOutcome {
    fn quiet(status: HarqStatus) -> Self {
        Self {
            status,
            delivered_bits: 0,
        }
    }
}

/// Drives the per-user HARQ state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HarqEngine {
    /// Error model used to decide attempts.
    pub bler: BlerModel,
}

impl HarqEngine {
    /// Creates an engine with the given error model.
    pub fn new(bler: BlerModel) -> Self {
        Self { bler }
    }

    /// Runs one TTI of the user's HARQ process.
    ///
    /// `cap_bits` is the capacity granted by the scheduler this TTI and
    /// `user.cqi` the current channel quality.
    pub fn step<R: Rng>(&self, user: &mut User, cap_bits: u64, rng: &mut R) -> HarqOutcome {
        let outcome = if user.harq.active {
            if cap_bits == 0 {
                HarqOutcome::quiet(HarqStatus::Waiting)
            } else {
                // Decided with the count before this retransmission.
                let exponent = user.harq.attempts;
                user.harq.attempts += 1;
                self.transmit(user, exponent, rng)
            }
        } else if cap_bits == 0 || user.buffer_bits == 0 {
            HarqOutcome::quiet(HarqStatus::Idle)
        } else {
            user.harq.active = true;
            user.harq.tb_bits = user.buffer_bits.min(cap_bits);
            user.harq.attempts = 1;
            self.transmit(user, 1, rng)
        };

        user.harq.status = outcome.status;
        trace!(
            user = user.id,
            status = ?outcome.status,
            attempts = user.harq.attempts,
            delivered = outcome.delivered_bits,
            "harq step"
        );
        outcome
    }

    fn transmit<R: Rng>(&self, user: &mut User, exponent: u32, rng: &mut R) -> HarqOutcome {
        if !self.bler.decide_ack(user.cqi, exponent, rng) {
            return HarqOutcome::quiet(HarqStatus::Nacked);
        }

        let tb = user.harq.tb_bits;
        user.buffer_bits = user.buffer_bits.saturating_sub(tb);
        user.harq.active = false;
        user.harq.tb_bits = 0;
        user.harq.attempts = 0;
        HarqOutcome {
            status: HarqStatus::Acked,
            delivered_bits: tb,
        }
    }
}
