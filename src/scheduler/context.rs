//! Per-TTI snapshot passed to resource block schedulers.

use crate::models::User;

/// Scheduler input for one TTI.
///
/// Vectors are indexed by user position in the simulation's user list and
/// always have the same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchedulingContext {
    /// Current CQI per user.
    pub cqi: Vec<f64>,
    /// Instantaneous rate per user (bits per RB).
    pub bits_per_rb: Vec<u32>,
    /// Buffered bits per user.
    pub buffer_bits: Vec<u64>,
    /// Cross-TTI average throughput per user (bits/TTI), floor-clamped.
    pub avg_throughput: Vec<f64>,
}

impl SchedulingContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the snapshot from the user list.
    ///
    /// `bits_per_rb` and `avg_throughput` must be parallel to `users`.
    pub fn from_users(users: &[User], bits_per_rb: &[u32], avg_throughput: &[f64]) -> Self {
        Self {
            cqi: users.iter().map(|u| u.cqi).collect(),
            bits_per_rb: bits_per_rb.to_vec(),
            buffer_bits: users.iter().map(|u| u.buffer_bits).collect(),
            avg_throughput: avg_throughput.to_vec(),
        }
    }

    /// Appends one user's state.
    pub fn with_user(mut self, cqi: f64, bits_per_rb: u32, buffer_bits: u64, avg: f64) -> Self {
        self.cqi.push(cqi);
        self.bits_per_rb.push(bits_per_rb);
        self.buffer_bits.push(buffer_bits);
        self.avg_throughput.push(avg);
        self
    }

    /// Number of users in the snapshot.
    pub fn num_users(&self) -> usize {
        self.cqi.len()
    }

    /// Whether user `idx` has data queued.
    pub fn has_backlog(&self, idx: usize) -> bool {
        self.buffer_bits.get(idx).is_some_and(|&b| b > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_users() {
        let mut users = vec![User::new(0).with_buffer(100), User::new(1)];
        users[0].cqi = 3.0;
        users[1].cqi = 9.0;

        let ctx = SchedulingContext::from_users(&users, &[50, 150], &[1.0, 2.0]);
        assert_eq!(ctx.num_users(), 2);
        assert_eq!(ctx.cqi, vec![3.0, 9.0]);
        assert_eq!(ctx.buffer_bits, vec![100, 0]);
        assert!(ctx.has_backlog(0));
        assert!(!ctx.has_backlog(1));
        assert!(!ctx.has_backlog(5));
    }
}
