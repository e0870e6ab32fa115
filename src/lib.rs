//! Downlink radio resource scheduler simulator.
//!
//! Simulates a single cell one Transmission Time Interval (TTI) at a time:
//! channel quality per user, resource block allocation under a configurable
//! policy, and a per-user HARQ retransmission process.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `User`, `HarqProcess`, `HarqStatus`,
//!   `McsTable`, `McsEntry`
//! - **`channel`**: CQI generation (stochastic or path loss based)
//! - **`scheduler`**: RB allocation policies — round robin, max-CQI,
//!   proportional fair
//! - **`harq`**: Transport block state machine and BLER model
//! - **`traffic`**: Buffer arrival processes
//! - **`config`**: Run configuration
//! - **`validation`**: Setup checks (empty users, MCS monotonicity, ...)
//! - **`simulation`**: The TTI loop, per-TTI records and run totals
//!
//! # Example
//!
//! ```
//! use u_radio_sched::config::SimulationConfig;
//! use u_radio_sched::models::{McsTable, User};
//! use u_radio_sched::scheduler::SchedulerPolicy;
//! use u_radio_sched::simulation::Simulation;
//!
//! let users = vec![User::new(0).with_buffer(20_000), User::new(1).with_buffer(20_000)];
//! let config = SimulationConfig::new()
//!     .with_scheduler(SchedulerPolicy::ProportionalFair)
//!     .with_seed(1);
//!
//! let mut sim = Simulation::new(users, McsTable::lte_default(), config).unwrap();
//! sim.run(100);
//! assert_eq!(sim.summary().ttis, 100);
//! ```
//!
//! # Determinism
//!
//! All randomness (CQI draws, HARQ outcomes, arrivals) comes from one RNG
//! seeded by `SimulationConfig::seed`; equal seeds reproduce equal records.
//!
//! # References
//!
//! - 3GPP TS 36.213, "Physical layer procedures"
//! - Capozzi et al. (2013), "Downlink Packet Scheduling in LTE Cellular Networks"

pub mod channel;
pub mod config;
pub mod harq;
pub mod models;
pub mod scheduler;
pub mod simulation;
pub mod traffic;
pub mod validation;
