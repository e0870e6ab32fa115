//! Resource block schedulers.
//!
//! Each TTI a scheduler maps every resource block (RB) to exactly one user.
//! Policies implement [`RbScheduler`]; [`SchedulerPolicy`] selects one of the
//! built-in policies from configuration.
//!
//! # Usage
//!
//! ```
//! use u_radio_sched::scheduler::{RbScheduler, SchedulerPolicy, SchedulingContext};
//!
//! let ctx = SchedulingContext::new()
//!     .with_user(3.0, 50, 1000, 1.0)
//!     .with_user(12.0, 250, 1000, 1.0);
//!
//! let scheduler = SchedulerPolicy::MaxCqi.build();
//! let assignment = scheduler.assign(&ctx, 10);
//! assert_eq!(assignment.rb_count(1), 10);
//! ```
//!
//! # References
//!
//! - Kelly (1997), "Charging and rate control for elastic traffic"
//! - Jalali, Padovani & Pankaj (2000), "Data throughput of CDMA-HDR"

mod context;
pub mod policies;

pub use context::SchedulingContext;
pub use policies::{MaxCqi, ProportionalFair, RoundRobin};

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// RB → user mapping for a single TTI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RbAssignment {
    owners: Vec<usize>,
}

impl RbAssignment {
    /// Creates an assignment with every RB given to user 0.
    pub fn new(total_rb: usize) -> Self {
        Self {
            owners: vec![0; total_rb],
        }
    }

    /// Creates an assignment from an explicit owner list.
    pub fn from_owners(owners: Vec<usize>) -> Self {
        Self { owners }
    }

    /// Grants `rb` to `user`.
    pub fn set(&mut self, rb: usize, user: usize) {
        self.owners[rb] = user;
    }

    /// Owner of `rb`.
    pub fn owner(&self, rb: usize) -> Option<usize> {
        self.owners.get(rb).copied()
    }

    /// All owners in RB order.
    pub fn owners(&self) -> &[usize] {
        &self.owners
    }

    /// Number of RBs.
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    /// Whether there are no RBs.
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// Number of RBs granted to `user`.
    pub fn rb_count(&self, user: usize) -> usize {
        self.owners.iter().filter(|&&o| o == user).count()
    }

    /// Sums `bits_per_rb[owner]` over all RBs, per user.
    ///
    /// Returns one capacity value (bits) per entry of `bits_per_rb`.
    pub fn capacity_bits(&self, bits_per_rb: &[u32]) -> Vec<u64> {
        let mut caps = vec![0u64; bits_per_rb.len()];
        for &owner in &self.owners {
            if let (Some(cap), Some(&rate)) = (caps.get_mut(owner), bits_per_rb.get(owner)) {
                *cap += u64::from(rate);
            }
        }
        caps
    }
}

/// A policy assigning resource blocks to users.
///
/// Implementations must be pure functions of the snapshot: every RB is
/// assigned to a valid user index `< context.num_users()` whenever the
/// snapshot holds at least one user.
pub trait RbScheduler: Send + Sync + Debug {
    /// Policy name (e.g., "RR", "PF").
    fn name(&self) -> &'static str;

    /// Assigns `total_rb` resource blocks for the current TTI.
    fn assign(&self, context: &SchedulingContext, total_rb: usize) -> RbAssignment;

    /// Policy description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Built-in scheduling policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SchedulerPolicy {
    /// RB `r` → user `r mod n`.
    #[default]
    RoundRobin,
    /// All RBs → highest CQI user.
    MaxCqi,
    /// Rate over average throughput, per RB.
    ProportionalFair,
}

impl SchedulerPolicy {
    /// Instantiates the policy with default parameters.
    pub fn build(self) -> Box<dyn RbScheduler> {
        match self {
            SchedulerPolicy::RoundRobin => Box::new(RoundRobin),
            SchedulerPolicy::MaxCqi => Box::new(MaxCqi),
            SchedulerPolicy::ProportionalFair => Box::new(ProportionalFair::default()),
        }
    }
}
