//! Safety action log.

use crate::clock::Clock;
use crate::feed::Feed;
use crate::rng::RandomSource;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionStatus {
    Active,
    Resolved,
}

impl fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ActionStatus::Active => "Active",
            ActionStatus::Resolved => "Resolved",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub time: NaiveTime,
    pub action: String,
    pub status: ActionStatus,
}

fn record(h: u32, m: u32, s: u32, action: &str, status: ActionStatus) -> ActionRecord {
    ActionRecord {
        time: NaiveTime::from_hms_opt(h, m, s).unwrap_or(NaiveTime::MIN),
        action: action.to_string(),
        status,
    }
}

pub fn initial_actions() -> Vec<ActionRecord> {
    vec![
        record(10, 41, 23, "Emergency stop triggered", ActionStatus::Resolved),
        record(10, 40, 15, "Speed reduction activated", ActionStatus::Active),
        record(10, 39, 45, "Geofence warning issued", ActionStatus::Resolved),
    ]
}

#[derive(Debug, Clone)]
pub struct ActionFeed {
    feed: Feed<ActionRecord>,
    probability: f64,
    active_probability: f64,
    messages: Vec<String>,
}

impl ActionFeed {
    pub fn new(
        capacity: usize,
        probability: f64,
        active_probability: f64,
        messages: Vec<String>,
        seed: Vec<ActionRecord>,
    ) -> Self {
        Self {
            feed: Feed::with_entries(capacity, seed),
            probability,
            active_probability,
            messages,
        }
    }

    pub fn feed(&self) -> &Feed<ActionRecord> {
        &self.feed
    }

    pub fn advance(
        &mut self,
        rng: &mut dyn RandomSource,
        clock: &dyn Clock,
    ) -> Option<ActionRecord> {
        if !rng.chance(self.probability) {
            return None;
        }
        let action = self.messages[rng.index(self.messages.len())].clone();
        let status = if rng.chance(self.active_probability) {
            ActionStatus::Active
        } else {
            ActionStatus::Resolved
        };
        let entry = ActionRecord {
            time: clock.time_of_day(),
            action,
            status,
        };
        debug!(action = %entry.action, status = %entry.status, "action logged");
        self.feed.push(entry.clone());
        Some(entry)
    }
}
