//! Mobile user (UE) model.
//!
//! A user carries its mobility state, the latest channel quality, a single
//! downlink queue, and one HARQ process.

use serde::{Deserialize, Serialize};

/// Outcome marker of the last HARQ step for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HarqStatus {
    /// No transport block in flight and nothing sent this TTI.
    #[default]
    Idle,
    /// A block is in flight but the user received no capacity this TTI.
    Waiting,
    /// The block was acknowledged this TTI.
    Acked,
    /// The block failed this TTI and stays in flight.
    Nacked,
}

impl HarqStatus {
    /// Single-character marker used in compact reports.
    pub fn marker(self) -> char {
        match self {
            HarqStatus::Idle => '.',
            HarqStatus::Waiting => 'W',
            HarqStatus::Acked => 'A',
            HarqStatus::Nacked => 'N',
        }
    }
}

/// State of the single HARQ process of a user.
///
/// `tb_bits` is zero whenever `active` is false.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HarqProcess {
    /// Whether a transport block is in flight.
    pub active: bool,
    /// Size of the in-flight transport block (bits).
    pub tb_bits: u64,
    /// Transmissions made for the in-flight block; 0 when idle.
    pub attempts: u32,
    /// Marker of the most recent step.
    pub status: HarqStatus,
}

/// A mobile station served by the cell.
///
/// Positions are in meters relative to the base station at the origin,
/// velocities in meters per second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: u32,
    /// Position (x, y) in meters.
    pub position: (f64, f64),
    /// Velocity (vx, vy) in m/s.
    pub velocity: (f64, f64),
    /// Channel quality indicator in [0, 15].
    pub cqi: f64,
    /// Bits awaiting delivery.
    pub buffer_bits: u64,
    /// HARQ process state.
    pub harq: HarqProcess,
    /// Bits per RB derived from `cqi` during the last TTI.
    pub bits_per_rb: u32,
    /// Bits delivered during the last TTI.
    pub throughput_bits: u64,
}

impl User {
    /// Creates a stationary user at the origin with an empty buffer.
    pub fn new(id: u32) -> Self {
        Self {
            id,
            position: (0.0, 0.0),
            velocity: (0.0, 0.0),
            cqi: 0.0,
            buffer_bits: 0,
            harq: HarqProcess::default(),
            bits_per_rb: 0,
            throughput_bits: 0,
        }
    }

    /// Sets the initial buffer occupancy (bits).
    pub fn with_buffer(mut self, bits: u64) -> Self {
        self.buffer_bits = bits;
        self
    }

    /// Sets the initial position (m).
    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = (x, y);
        self
    }

    /// Sets the velocity (m/s).
    pub fn with_velocity(mut self, vx: f64, vy: f64) -> Self {
        self.velocity = (vx, vy);
        self
    }

    /// Advances the position by one Euler step of `dt_s` seconds.
    pub fn advance(&mut self, dt_s: f64) {
        self.position.0 += self.velocity.0 * dt_s;
        self.position.1 += self.velocity.1 * dt_s;
    }

    /// Euclidean distance to the base station at the origin (m).
    pub fn distance_to_origin(&self) -> f64 {
        self.position.0.hypot(self.position.1)
    }

    /// Whether there is data left to deliver.
    pub fn has_backlog(&self) -> bool {
        self.buffer_bits > 0
    }
}
