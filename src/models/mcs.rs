//! Modulation and Coding Scheme (MCS) table.
//!
//! Maps a Channel Quality Indicator (CQI) to the number of bits a single
//! resource block can carry at the corresponding modulation order.
//!
//! # Reference
//! 3GPP TS 36.213, Table 7.2.3-1 (CQI table), simplified to five bands.

use serde::{Deserialize, Serialize};

/// One row of the MCS table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct McsEntry {
    /// Lowest CQI at which this entry applies.
    pub cqi_threshold: f64,
    /// Spectral efficiency expressed as bits per resource block.
    pub bits_per_rb: u32,
}

impl McsEntry {
    /// Creates a new entry.
    pub fn new(cqi_threshold: f64, bits_per_rb: u32) -> Self {
        Self {
            cqi_threshold,
            bits_per_rb,
        }
    }
}

/// Ordered MCS lookup table.
///
/// Entries are kept in insertion order; `validate_setup` rejects tables whose
/// thresholds are not strictly increasing. The first entry is the floor and
/// serves as fallback for any CQI below every threshold.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct McsTable {
    entries: Vec<McsEntry>,
}

impl McsTable {
    /// Creates a table from entries in ascending threshold order.
    pub fn new(entries: Vec<McsEntry>) -> Self {
        Self { entries }
    }

    /// Five-band LTE-like table: QPSK (low/high), 16QAM, 64QAM, 256QAM.
    pub fn lte_default() -> Self {
        Self::new(vec![
            McsEntry::new(0.0, 50),
            McsEntry::new(4.0, 80),
            McsEntry::new(7.0, 150),
            McsEntry::new(10.0, 250),
            McsEntry::new(13.0, 350),
        ])
    }

    /// Appends an entry.
    pub fn with_entry(mut self, cqi_threshold: f64, bits_per_rb: u32) -> Self {
        self.entries.push(McsEntry::new(cqi_threshold, bits_per_rb));
        self
    }

    /// Table rows in order.
    pub fn entries(&self) -> &[McsEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether thresholds are finite and strictly increasing.
    pub fn is_monotonic(&self) -> bool {
        self.entries.iter().all(|e| e.cqi_threshold.is_finite())
            && self
                .entries
                .windows(2)
                .all(|w| w[0].cqi_threshold < w[1].cqi_threshold)
    }

    /// Bits per RB for the given CQI.
    ///
    /// Scans from the highest threshold down and returns the first entry with
    /// `cqi >= threshold`. A CQI below every threshold (or NaN) falls back to
    /// the first entry. Returns 0 only for an empty table.
    pub fn bits_per_rb(&self, cqi: f64) -> u32 {
        self.entries
            .iter()
            .rev()
            .find(|e| cqi >= e.cqi_threshold)
            .or_else(|| self.entries.first())
            .map(|e| e.bits_per_rb)
            .unwrap_or(0)
    }

    /// Largest bits-per-RB value in the table.
    pub fn max_bits_per_rb(&self) -> u32 {
        self.entries
            .iter()
            .map(|e| e.bits_per_rb)
            .max()
            .unwrap_or(0)
    }
}
