//! Simulation domain models.
//!
//! Provides the data types shared by the channel model, the schedulers,
//! the HARQ engine and the simulation loop.
//!
//! # Domain Mappings
//!
//! | u-radio-sched | LTE/NR term | Scheduling term |
//! |---------------|-------------|-----------------|
//! | User | UE | Job |
//! | Resource block | PRB | Resource slot |
//! | McsTable | CQI/MCS table | Processing rate |
//! | HarqProcess | HARQ process | In-flight operation |

mod mcs;
mod user;

pub use mcs::{McsEntry, McsTable};
pub use user::{HarqProcess, HarqStatus, User};
