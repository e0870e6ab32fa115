//! End-of-run throughput indicators.
//!
//! Accumulated while the simulation runs and handed to downstream metric
//! collaborators (fairness indices are computed there, not here).
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total delivered | Sum of ACKed bits per user |
//! | Avg throughput | Delivered bits / TTIs (and / seconds) |
//! | RBs granted | Sum of scheduler grants per user |
//! | ACK / NACK | HARQ outcome counts per user |

use serde::{Deserialize, Serialize};

use super::TtiRecord;
use crate::models::HarqStatus;

/// Per-user totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    /// User identifier.
    pub user_id: u32,
    /// Bits delivered over the run.
    pub delivered_bits: u64,
    /// RBs granted over the run.
    pub allocated_rbs: u64,
    /// Acknowledged transmissions.
    pub acks: u64,
    /// Failed transmissions.
    pub nacks: u64,
    /// Buffer at the last recorded TTI.
    pub final_buffer_bits: u64,
}

impl UserSummary {
    fn new(user_id: u32) -> Self {
        Self {
            user_id,
            delivered_bits: 0,
            allocated_rbs: 0,
            acks: 0,
            nacks: 0,
            final_buffer_bits: 0,
        }
    }

    /// Fraction of transmissions that failed (0.0 when nothing was sent).
    pub fn nack_rate(&self) -> f64 {
        let sent = self.acks + self.nacks;
        if sent == 0 {
            0.0
        } else {
            self.nacks as f64 / sent as f64
        }
    }
}

/// Run-level totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// TTIs accumulated.
    pub ttis: u64,
    /// TTI duration (s), for rate conversions.
    pub tti_duration_s: f64,
    /// Per-user totals in user order.
    pub users: Vec<UserSummary>,
}

impl RunSummary {
    /// Creates an empty summary for the given user IDs.
    pub fn new(user_ids: impl IntoIterator<Item = u32>, tti_duration_s: f64) -> Self {
        Self {
            ttis: 0,
            tti_duration_s,
            users: user_ids.into_iter().map(UserSummary::new).collect(),
        }
    }

    /// Adds one TTI record; users are matched by position.
    pub fn record(&mut self, tti: &TtiRecord) {
        self.ttis += 1;
        for (summary, rec) in self.users.iter_mut().zip(&tti.users) {
            summary.delivered_bits += rec.delivered_bits;
            summary.allocated_rbs += rec.allocated_rbs as u64;
            summary.final_buffer_bits = rec.buffer_bits;
            match rec.harq_status {
                HarqStatus::Acked => summary.acks += 1,
                HarqStatus::Nacked => summary.nacks += 1,
                HarqStatus::Idle | HarqStatus::Waiting => {}
            }
        }
    }

    /// Bits delivered per user, in user order.
    pub fn delivered_per_user(&self) -> Vec<u64> {
        self.users.iter().map(|u| u.delivered_bits).collect()
    }

    /// Total bits delivered in the cell.
    pub fn total_delivered_bits(&self) -> u64 {
        self.users.iter().map(|u| u.delivered_bits).sum()
    }

    /// Average throughput per user in bits per TTI.
    pub fn avg_throughput_per_tti(&self) -> Vec<f64> {
        self.users
            .iter()
            .map(|u| {
                if self.ttis == 0 {
                    0.0
                } else {
                    u.delivered_bits as f64 / self.ttis as f64
                }
            })
            .collect()
    }

    /// Average throughput per user in bits per second.
    pub fn avg_throughput_bps(&self) -> Vec<f64> {
        self.avg_throughput_per_tti()
            .into_iter()
            .map(|t| t / self.tti_duration_s)
            .collect()
    }
}
