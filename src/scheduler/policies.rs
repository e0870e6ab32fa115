//! Built-in resource block scheduling policies.
//!
//! | Policy | Metric | Trade-off |
//! |--------|--------|-----------|
//! | RR | RB index | equal RB count, ignores channel |
//! | MaxCQI | CQI | max cell throughput, starves weak users |
//! | PF | rate / avg throughput | throughput vs. fairness |
//!
//! Ties are always broken in favor of the lowest user index.

use super::{RbAssignment, RbScheduler, SchedulingContext};

/// Round robin.
///
/// RB `r` goes to user `r mod n`. Each user receives `floor(R/n)` or
/// `ceil(R/n)` blocks regardless of channel or buffer state.
#[derive(Debug, Clone, Copy)]
pub struct RoundRobin;

impl RbScheduler for RoundRobin {
    fn name(&self) -> &'static str {
        "RR"
    }

    fn assign(&self, context: &SchedulingContext, total_rb: usize) -> RbAssignment {
        let n = context.num_users().max(1);
        RbAssignment::from_owners((0..total_rb).map(|rb| rb % n).collect())
    }

    fn description(&self) -> &'static str {
        "Round Robin"
    }
}

/// Maximum CQI.
///
/// Every RB goes to the user with the highest current CQI.
#[derive(Debug, Clone, Copy)]
pub struct MaxCqi;

impl MaxCqi {
    fn best_user(context: &SchedulingContext) -> usize {
        let mut best_cqi = f64::NEG_INFINITY;
        let mut best_user = 0;
        for (i, &cqi) in context.cqi.iter().enumerate() {
            if cqi > best_cqi {
                best_cqi = cqi;
                best_user = i;
            }
        }
        best_user
    }
}

impl RbScheduler for MaxCqi {
    fn name(&self) -> &'static str {
        "MaxCQI"
    }

    fn assign(&self, context: &SchedulingContext, total_rb: usize) -> RbAssignment {
        let winner = Self::best_user(context);
        RbAssignment::from_owners(vec![winner; total_rb])
    }

    fn description(&self) -> &'static str {
        "Maximum CQI"
    }
}

/// Proportional fair.
///
/// For each RB in order, picks the buffer-positive user maximizing
/// `bits_per_rb / avg`, where `avg` starts from the cross-TTI average and
/// the winner's copy is smoothed toward its rate after every grant:
/// `avg = (1 - alpha)·avg + alpha·rate`.
/// When no user has data, the RB goes to user 0.
#[derive(Debug, Clone, Copy)]
pub struct ProportionalFair {
    /// Within-TTI smoothing step (default: 0.01).
    pub alpha: f64,
}

impl Default for ProportionalFair {
    fn default() -> Self {
        Self { alpha: 0.01 }
    }
}

impl ProportionalFair {
    /// Creates a PF policy with a custom within-TTI smoothing step.
    pub fn with_alpha(alpha: f64) -> Self {
        Self { alpha }
    }

    /// PF metric for a user.
    pub fn metric(rate: f64, avg: f64) -> f64 {
        rate / avg
    }
}

impl RbScheduler for ProportionalFair {
    fn name(&self) -> &'static str {
        "PF"
    }

    fn assign(&self, context: &SchedulingContext, total_rb: usize) -> RbAssignment {
        let mut assignment = RbAssignment::new(total_rb);
        let mut shadow_avg = context.avg_throughput.clone();

        for rb in 0..total_rb {
            let mut best: Option<(usize, f64)> = None;

            for (i, &avg) in shadow_avg.iter().enumerate() {
                if !context.has_backlog(i) {
                    continue;
                }
                let rate = f64::from(context.bits_per_rb[i]);
                let metric = Self::metric(rate, avg);
                if best.is_none_or(|(_, m)| metric > m) {
                    best = Some((i, metric));
                }
            }

            // Nobody has data: fallback owner is user 0.
            let Some((winner, _)) = best else {
                continue;
            };

            assignment.set(rb, winner);
            let rate = f64::from(context.bits_per_rb[winner]);
            shadow_avg[winner] = (1.0 - self.alpha) * shadow_avg[winner] + self.alpha * rate;
        }

        assignment
    }

    fn description(&self) -> &'static str {
        "Proportional Fair"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(users: &[(f64, u32, u64, f64)]) -> SchedulingContext {
        users
            .iter()
            .fold(SchedulingContext::new(), |c, &(cqi, rate, buf, avg)| {
                c.with_user(cqi, rate, buf, avg)
            })
    }

    #[test]
    fn test_rr_cycles_users() {
        let c = ctx(&[(1.0, 50, 0, 1.0), (14.0, 350, 0, 1.0), (8.0, 150, 0, 1.0)]);
        let a = RoundRobin.assign(&c, 7);
        assert_eq!(a.owners(), &[0, 1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn test_rr_balanced_counts() {
        for users in 1..=7usize {
            let c = (0..users).fold(SchedulingContext::new(), |c, _| c.with_user(5.0, 80, 10, 1.0));
            for total_rb in [0usize, 1, 6, 25, 50, 100] {
                let a = RoundRobin.assign(&c, total_rb);
                assert_eq!(a.len(), total_rb);
                let lo = total_rb / users;
                let hi = total_rb.div_ceil(users);
                for u in 0..users {
                    let n = a.rb_count(u);
                    assert!(n == lo || n == hi, "users={users} rb={total_rb} n={n}");
                }
            }
        }
    }

    #[test]
    fn test_rr_ignores_state() {
        let a = ctx(&[(1.0, 50, 0, 1.0), (14.0, 350, 9000, 50.0)]);
        let b = ctx(&[(15.0, 350, 9000, 3.0), (0.0, 50, 0, 1.0)]);
        assert_eq!(RoundRobin.assign(&a, 11), RoundRobin.assign(&b, 11));
    }

    #[test]
    fn test_max_cqi_all_to_best() {
        let c = ctx(&[(3.0, 50, 10, 1.0), (12.5, 250, 10, 1.0), (9.0, 150, 10, 1.0)]);
        let a = MaxCqi.assign(&c, 50);
        assert_eq!(a.rb_count(1), 50);
    }

    #[test]
    fn test_max_cqi_tie_lowest_index() {
        let c = ctx(&[(2.0, 50, 10, 1.0), (11.0, 250, 10, 1.0), (11.0, 250, 10, 1.0)]);
        let a = MaxCqi.assign(&c, 8);
        assert_eq!(a.rb_count(1), 8);
        assert_eq!(a.rb_count(2), 0);
    }

    #[test]
    fn test_max_cqi_all_zero() {
        let c = ctx(&[(0.0, 50, 10, 1.0), (0.0, 50, 10, 1.0)]);
        assert_eq!(MaxCqi.assign(&c, 3).owners(), &[0, 0, 0]);
    }

    #[test]
    fn test_pf_prefers_lower_average() {
        let c = ctx(&[(10.0, 250, 1000, 800.0), (10.0, 250, 1000, 200.0)]);
        let a = ProportionalFair::default().assign(&c, 1);
        assert_eq!(a.owner(0), Some(1));
    }

    #[test]
    fn test_pf_tie_lowest_index() {
        let c = ctx(&[(10.0, 250, 1000, 100.0), (10.0, 250, 1000, 100.0)]);
        let a = ProportionalFair::default().assign(&c, 1);
        assert_eq!(a.owner(0), Some(0));
    }

    #[test]
    fn test_pf_skips_empty_buffers() {
        let c = ctx(&[(15.0, 350, 0, 1.0), (2.0, 50, 500, 1000.0), (15.0, 350, 0, 1.0)]);
        let a = ProportionalFair::default().assign(&c, 20);
        assert_eq!(a.rb_count(1), 20);
    }

    #[test]
    fn test_pf_all_empty_falls_back_to_zero() {
        let c = ctx(&[(15.0, 350, 0, 1.0), (9.0, 150, 0, 1.0)]);
        let a = ProportionalFair::default().assign(&c, 5);
        assert_eq!(a.owners(), &[0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_pf_shadow_average_redistributes() {
        // Equal rates; user 0 starts slightly ahead, so after enough grants
        // its shadow average rises above user 1's and user 1 gets served.
        let c = ctx(&[(10.0, 250, 1000, 10.0), (10.0, 250, 1000, 10.5)]);
        let a = ProportionalFair::with_alpha(0.05).assign(&c, 10);
        assert_eq!(a.owner(0), Some(0));
        assert!(a.rb_count(1) > 0);
        assert!(a.rb_count(0) > 0);
    }

    #[test]
    fn test_pf_zero_alpha_keeps_winner() {
        let c = ctx(&[(10.0, 250, 1000, 10.0), (10.0, 250, 1000, 10.5)]);
        let a = ProportionalFair::with_alpha(0.0).assign(&c, 10);
        assert_eq!(a.rb_count(0), 10);
    }

    #[test]
    fn test_metric() {
        assert!((ProportionalFair::metric(250.0, 125.0) - 2.0).abs() < 1e-10);
    }
}
