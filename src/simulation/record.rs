//! Per-TTI output records.

use serde::{Deserialize, Serialize};

use crate::models::HarqStatus;

/// State of one user at the end of a TTI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserTtiRecord {
    /// User identifier.
    pub user_id: u32,
    /// CQI used this TTI.
    pub cqi: f64,
    /// Bits per RB derived from the CQI.
    pub bits_per_rb: u32,
    /// RBs granted by the scheduler.
    pub allocated_rbs: usize,
    /// Capacity of the granted RBs (bits).
    pub capacity_bits: u64,
    /// Bits acknowledged this TTI.
    pub delivered_bits: u64,
    /// Buffer after HARQ and arrivals.
    pub buffer_bits: u64,
    /// HARQ status after this TTI.
    pub harq_status: HarqStatus,
    /// HARQ transmissions of the in-flight block (0 when idle).
    pub harq_attempts: u32,
}

/// Everything that happened in one TTI, one entry per user in user order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TtiRecord {
    /// Zero-based TTI index.
    pub tti: u64,
    /// Per-user results.
    pub users: Vec<UserTtiRecord>,
}

impl TtiRecord {
    /// Total bits delivered in the cell this TTI.
    pub fn delivered_bits(&self) -> u64 {
        self.users.iter().map(|u| u.delivered_bits).sum()
    }

    /// Total RBs granted this TTI.
    pub fn allocated_rbs(&self) -> usize {
        self.users.iter().map(|u| u.allocated_rbs).sum()
    }

    /// Record of a user by ID.
    pub fn user(&self, user_id: u32) -> Option<&UserTtiRecord> {
        self.users.iter().find(|u| u.user_id == user_id)
    }
}

/// Consumer of per-TTI records.
pub trait TtiSink {
    /// Called once per TTI, after all users were updated.
    fn on_tti(&mut self, record: &TtiRecord);
}

impl TtiSink for Vec<TtiRecord> {
    fn on_tti(&mut self, record: &TtiRecord) {
        self.push(record.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_record(user_id: u32, delivered_bits: u64, allocated_rbs: usize) -> UserTtiRecord {
        UserTtiRecord {
            user_id,
            cqi: 7.5,
            bits_per_rb: 150,
            allocated_rbs,
            capacity_bits: allocated_rbs as u64 * 150,
            delivered_bits,
            buffer_bits: 0,
            harq_status: HarqStatus::Acked,
            harq_attempts: 0,
        }
    }

    #[test]
    fn test_totals() {
        let record = TtiRecord {
            tti: 3,
            users: vec![user_record(0, 1500, 10), user_record(5, 0, 4)],
        };
        assert_eq!(record.delivered_bits(), 1500);
        assert_eq!(record.allocated_rbs(), 14);
        assert_eq!(record.user(5).map(|u| u.allocated_rbs), Some(4));
        assert!(record.user(1).is_none());
    }

    #[test]
    fn test_vec_sink() {
        let mut sink: Vec<TtiRecord> = Vec::new();
        let record = TtiRecord {
            tti: 0,
            users: vec![user_record(0, 10, 1)],
        };
        sink.on_tti(&record);
        sink.on_tti(&record);
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn test_serialize() {
        let record = TtiRecord {
            tti: 1,
            users: vec![user_record(2, 300, 2)],
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"harq_status\":\"Acked\""));
        let back: TtiRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
