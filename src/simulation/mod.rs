//! TTI-driven simulation loop.
//!
//! [`Simulation`] owns all mutable state of a run (users, the PF fairness
//! memory, the RNG) and advances it one TTI at a time.
//!
//! # Per-TTI pipeline
//!
//! 1. Move users (if mobility is on) and recompute CQI.
//! 2. Look up bits per RB from the MCS table.
//! 3. Assign RBs with the configured scheduler.
//! 4. Sum granted capacity per user.
//! 5. Run each user's HARQ process.
//! 6. Update the cross-TTI average throughput (floor-clamped).
//! 7. Apply traffic arrivals.
//! 8. Emit one [`TtiRecord`] with an entry per user.

mod kpi;
mod record;

pub use kpi::{RunSummary, UserSummary};
pub use record::{TtiRecord, TtiSink, UserTtiRecord};

use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::SimulationConfig;
use crate::harq::HarqEngine;
use crate::models::{McsTable, User};
use crate::scheduler::{RbScheduler, SchedulingContext};
use crate::traffic::ArrivalProcess;
use crate::validation::{validate_setup, ValidationError, ValidationErrorKind};

/// Upper bound on the records reserved up front by [`Simulation::run`].
const RECORD_RESERVE_LIMIT: usize = 4096;

fn record_capacity(ttis: u64) -> usize {
    usize::try_from(ttis).map_or(RECORD_RESERVE_LIMIT, |n| n.min(RECORD_RESERVE_LIMIT))
}

/// Setup rejected before the first TTI.
#[derive(Debug, Error)]
pub enum SetupError {
    /// One or more validation checks failed.
    #[error("invalid simulation setup: {}", describe(.0))]
    Invalid(Vec<ValidationError>),
}

impl SetupError {
    /// The individual validation failures.
    pub fn errors(&self) -> &[ValidationError] {
        match self {
            SetupError::Invalid(errors) => errors,
        }
    }
}

fn describe(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// A single-cell downlink simulation.
///
/// # Example
///
/// ```
/// use u_radio_sched::config::SimulationConfig;
/// use u_radio_sched::models::{McsTable, User};
/// use u_radio_sched::simulation::Simulation;
///
/// let users = vec![
///     User::new(0).with_buffer(10_000),
///     User::new(1).with_buffer(18_000),
///     User::new(2).with_buffer(9_000),
/// ];
/// let config = SimulationConfig::new().with_seed(7);
/// let mut sim = Simulation::new(users, McsTable::lte_default(), config).unwrap();
///
/// let records = sim.run(10);
/// assert_eq!(records.len(), 10);
/// assert!(records.iter().all(|r| r.users.len() == 3));
/// ```
#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    users: Vec<User>,
    mcs: McsTable,
    scheduler: Box<dyn RbScheduler>,
    harq: HarqEngine,
    arrivals: ArrivalProcess,
    avg_throughput: Vec<f64>,
    rng: StdRng,
    tti: u64,
    summary: RunSummary,
}

impl Simulation {
    /// Validates the setup and builds a simulation.
    ///
    /// The scheduler is built from `config.scheduler`; the RNG is seeded from
    /// `config.seed`.
    pub fn new(users: Vec<User>, mcs: McsTable, config: SimulationConfig) -> Result<Self, SetupError> {
        if let Err(errors) = validate_setup(&users, &mcs, &config) {
            warn!(problems = errors.len(), "simulation setup rejected");
            return Err(SetupError::Invalid(errors));
        }

        let arrivals = ArrivalProcess::new(config.traffic).ok_or_else(|| {
            SetupError::Invalid(vec![ValidationError::new(
                ValidationErrorKind::InvalidTraffic,
                format!("Invalid traffic model: {:?}", config.traffic),
            )])
        })?;

        let scheduler = config.scheduler.build();
        info!(
            users = users.len(),
            total_rb = config.total_rb,
            scheduler = scheduler.name(),
            channel = ?config.channel.mode,
            seed = config.seed,
            "simulation created"
        );

        Ok(Self {
            avg_throughput: vec![config.throughput_floor; users.len()],
            summary: RunSummary::new(users.iter().map(|u| u.id), config.tti_duration_s),
            rng: StdRng::seed_from_u64(config.seed),
            harq: HarqEngine::new(config.bler),
            arrivals,
            scheduler,
            users,
            mcs,
            config,
            tti: 0,
        })
    }

    /// Replaces the scheduler with a custom policy.
    pub fn with_scheduler<S: RbScheduler + 'static>(mut self, scheduler: S) -> Self {
        self.scheduler = Box::new(scheduler);
        self
    }

    /// Advances one TTI and returns its record.
    pub fn step(&mut self) -> TtiRecord {
        let dt = self.config.tti_duration_s;
        for user in &mut self.users {
            if self.config.mobility {
                user.advance(dt);
            }
            self.config.channel.update_cqi(user, &mut self.rng);
        }

        let bits_per_rb: Vec<u32> = self
            .users
            .iter()
            .map(|u| self.mcs.bits_per_rb(u.cqi))
            .collect();

        let context = SchedulingContext::from_users(&self.users, &bits_per_rb, &self.avg_throughput);
        let assignment = self.scheduler.assign(&context, self.config.total_rb);
        let capacity = assignment.capacity_bits(&bits_per_rb);

        let outcomes: Vec<_> = self
            .users
            .iter_mut()
            .zip(&capacity)
            .map(|(user, &cap)| self.harq.step(user, cap, &mut self.rng))
            .collect();

        let alpha = self.config.throughput_alpha;
        let floor = self.config.throughput_floor;
        for (avg, outcome) in self.avg_throughput.iter_mut().zip(&outcomes) {
            *avg = ((1.0 - alpha) * *avg + alpha * outcome.delivered_bits as f64).max(floor);
        }

        for user in &mut self.users {
            let arrived = self.arrivals.sample(&mut self.rng);
            user.buffer_bits = user.buffer_bits.saturating_add(arrived);
        }

        let mut users = Vec::with_capacity(self.users.len());
        for (i, user) in self.users.iter_mut().enumerate() {
            user.bits_per_rb = bits_per_rb[i];
            user.throughput_bits = outcomes[i].delivered_bits;
            users.push(UserTtiRecord {
                user_id: user.id,
                cqi: user.cqi,
                bits_per_rb: bits_per_rb[i],
                allocated_rbs: assignment.rb_count(i),
                capacity_bits: capacity[i],
                delivered_bits: outcomes[i].delivered_bits,
                buffer_bits: user.buffer_bits,
                harq_status: outcomes[i].status,
                harq_attempts: user.harq.attempts,
            });
        }

        let record = TtiRecord {
            tti: self.tti,
            users,
        };
        debug!(
            tti = self.tti,
            delivered = record.delivered_bits(),
            scheduler = self.scheduler.name(),
            "tti complete"
        );

        self.summary.record(&record);
        self.tti += 1;
        record
    }

    /// Runs `ttis` TTIs and returns their records.
    pub fn run(&mut self, ttis: u64) -> Vec<TtiRecord> {
        let mut records = Vec::with_capacity(record_capacity(ttis));
        self.run_with(ttis, &mut records);
        records
    }

    /// Runs `ttis` TTIs, handing each record to `sink`.
    pub fn run_with<S: TtiSink + ?Sized>(&mut self, ttis: u64, sink: &mut S) {
        for _ in 0..ttis {
            let record = self.step();
            sink.on_tti(&record);
        }
        info!(
            ttis = self.tti,
            delivered = self.summary.total_delivered_bits(),
            "simulation run finished"
        );
    }

    /// Current user states.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Run configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// MCS table in use.
    pub fn mcs(&self) -> &McsTable {
        &self.mcs
    }

    /// Active scheduler.
    pub fn scheduler(&self) -> &dyn RbScheduler {
        self.scheduler.as_ref()
    }

    /// Cross-TTI average throughput per user (bits/TTI).
    pub fn avg_throughput(&self) -> &[f64] {
        &self.avg_throughput
    }

    /// Number of TTIs simulated so far.
    pub fn current_tti(&self) -> u64 {
        self.tti
    }

    /// Totals accumulated so far.
    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }
}
