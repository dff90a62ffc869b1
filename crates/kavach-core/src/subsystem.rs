//! Subsystem health board and the generator that flips entries.

use crate::rng::RandomSource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

// ---------------------------------------------------------------------------
// Subsystem
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Subsystem {
    Lidar,
    Gps,
    Camera,
    Ai,
    EdgeCompute,
    LedgerSync,
}

impl Subsystem {
    pub const COUNT: usize = 6;

    pub fn all() -> &'static [Subsystem; Subsystem::COUNT] {
        &[
            Subsystem::Lidar,
            Subsystem::Gps,
            Subsystem::Camera,
            Subsystem::Ai,
            Subsystem::EdgeCompute,
            Subsystem::LedgerSync,
        ]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Subsystem::Lidar => "lidar",
            Subsystem::Gps => "gps",
            Subsystem::Camera => "camera",
            Subsystem::Ai => "ai",
            Subsystem::EdgeCompute => "edge-compute",
            Subsystem::LedgerSync => "ledger-sync",
        }
    }
}

impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SubsystemStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubsystemStatus {
    Operational,
    Connected,
    Active,
    Processing,
    Online,
    Synced,
    #[serde(rename = "Attention Required")]
    AttentionRequired,
}

impl SubsystemStatus {
    /// Label written when a flip lands on the healthy side. Flips never
    /// restore a subsystem's own nominal label.
    pub const CANONICAL_HEALTHY: SubsystemStatus = SubsystemStatus::Operational;

    pub fn is_healthy(self) -> bool {
        matches!(
            self,
            SubsystemStatus::Operational
                | SubsystemStatus::Connected
                | SubsystemStatus::Active
                | SubsystemStatus::Online
                | SubsystemStatus::Synced
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SubsystemStatus::Operational => "Operational",
            SubsystemStatus::Connected => "Connected",
            SubsystemStatus::Active => "Active",
            SubsystemStatus::Processing => "Processing",
            SubsystemStatus::Online => "Online",
            SubsystemStatus::Synced => "Synced",
            SubsystemStatus::AttentionRequired => "Attention Required",
        }
    }
}

impl fmt::Display for SubsystemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SubsystemBoard
// ---------------------------------------------------------------------------

/// One status per subsystem. Backed by a fixed array so no entry can go missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsystemBoard {
    statuses: [SubsystemStatus; Subsystem::COUNT],
}

impl SubsystemBoard {
    pub fn initial() -> Self {
        Self {
            statuses: [
                SubsystemStatus::Operational,
                SubsystemStatus::Connected,
                SubsystemStatus::Active,
                SubsystemStatus::Processing,
                SubsystemStatus::Online,
                SubsystemStatus::Synced,
            ],
        }
    }

    pub fn get(&self, subsystem: Subsystem) -> SubsystemStatus {
        self.statuses[subsystem.index()]
    }

    pub fn set(&mut self, subsystem: Subsystem, status: SubsystemStatus) {
        self.statuses[subsystem.index()] = status;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Subsystem, SubsystemStatus)> + '_ {
        Subsystem::all().iter().map(|&s| (s, self.get(s)))
    }

    pub fn to_map(&self) -> BTreeMap<Subsystem, SubsystemStatus> {
        self.iter().collect()
    }
}

// ---------------------------------------------------------------------------
// SubsystemStatusGenerator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct SubsystemStatusGenerator {
    flip_probability: f64,
    healthy_probability: f64,
}

impl SubsystemStatusGenerator {
    pub fn new(flip_probability: f64, healthy_probability: f64) -> Self {
        Self {
            flip_probability,
            healthy_probability,
        }
    }

    /// Maybe overwrite one subsystem's status. Returns the change, if any.
    pub fn advance(
        &self,
        board: &mut SubsystemBoard,
        rng: &mut dyn RandomSource,
    ) -> Option<(Subsystem, SubsystemStatus)> {
        if !rng.chance(self.flip_probability) {
            return None;
        }
        let subsystem = Subsystem::all()[rng.index(Subsystem::COUNT)];
        let status = if rng.chance(self.healthy_probability) {
            SubsystemStatus::CANONICAL_HEALTHY
        } else {
            SubsystemStatus::AttentionRequired
        };
        debug!(%subsystem, %status, "subsystem status flipped");
        board.set(subsystem, status);
        Some((subsystem, status))
    }
}
