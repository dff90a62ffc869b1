//! Alert events and the feed that synthesizes them.

use crate::clock::Clock;
use crate::feed::Feed;
use crate::rng::RandomSource;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertId(pub u64);

impl fmt::Display for AlertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertKind {
    Warning,
    Caution,
    Info,
}

impl AlertKind {
    pub fn all() -> &'static [AlertKind] {
        &[AlertKind::Warning, AlertKind::Caution, AlertKind::Info]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AlertKind::Warning => "WARNING",
            AlertKind::Caution => "CAUTION",
            AlertKind::Info => "INFO",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn all() -> &'static [Priority] {
        &[Priority::High, Priority::Medium, Priority::Low]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: AlertId,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub message: String,
    pub timestamp: NaiveTime,
    pub priority: Priority,
}

fn hms(h: u32, m: u32, s: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, s).unwrap_or(NaiveTime::MIN)
}

/// Alerts shown before the first tick, newest-first.
pub fn initial_alerts() -> Vec<Alert> {
    vec![
        Alert {
            id: AlertId(1),
            kind: AlertKind::Warning,
            message: "Worker detected in blind spot".to_string(),
            timestamp: hms(10, 42, 15),
            priority: Priority::High,
        },
        Alert {
            id: AlertId(2),
            kind: AlertKind::Caution,
            message: "Approaching geofence boundary".to_string(),
            timestamp: hms(10, 42, 10),
            priority: Priority::Medium,
        },
        Alert {
            id: AlertId(3),
            kind: AlertKind::Info,
            message: "System performing optimally".to_string(),
            timestamp: hms(10, 42, 5),
            priority: Priority::Low,
        },
    ]
}

// ---------------------------------------------------------------------------
// AlertFeed
// ---------------------------------------------------------------------------

/// Alert queue plus the id counter that numbers new entries.
#[derive(Debug, Clone)]
pub struct AlertFeed {
    feed: Feed<Alert>,
    probability: f64,
    messages: Vec<String>,
    next_id: u64,
}

impl AlertFeed {
    /// `messages` must be non-empty.
    pub fn new(capacity: usize, probability: f64, messages: Vec<String>, seed: Vec<Alert>) -> Self {
        let next_id = seed.iter().map(|a| a.id.0).max().unwrap_or(0) + 1;
        Self {
            feed: Feed::with_entries(capacity, seed),
            probability,
            messages,
            next_id,
        }
    }

    pub fn feed(&self) -> &Feed<Alert> {
        &self.feed
    }

    /// Identifier the next injected alert will carry.
    pub fn next_id(&self) -> AlertId {
        AlertId(self.next_id)
    }

    /// Maybe synthesize and prepend one alert. Returns a copy of it.
    pub fn advance(&mut self, rng: &mut dyn RandomSource, clock: &dyn Clock) -> Option<Alert> {
        if !rng.chance(self.probability) {
            return None;
        }
        let kinds = AlertKind::all();
        let kind = kinds[rng.index(kinds.len())];
        let message = self.messages[rng.index(self.messages.len())].clone();
        let priorities = Priority::all();
        let priority = priorities[rng.index(priorities.len())];

        let alert = Alert {
            id: AlertId(self.next_id),
            kind,
            message,
            timestamp: clock.time_of_day(),
            priority,
        };
        self.next_id += 1;

        debug!(id = %alert.id, kind = %alert.kind, priority = %alert.priority, "alert raised");
        self.feed.push(alert.clone());
        Some(alert)
    }
}
