use crate::action::ActionRecord;
use crate::alert::Alert;
use crate::maintenance::MaintenanceItem;
use crate::metrics::SafetyMetrics;
use crate::proximity::ProximityReading;
use crate::subsystem::{Subsystem, SubsystemStatus};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Complete dashboard state produced by exactly one tick (or the initial
/// state, at tick 0). Feeds are newest-first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub tick: u64,
    pub time: DateTime<Local>,
    pub proximity: ProximityReading,
    pub safety_metrics: SafetyMetrics,
    pub subsystem_status: BTreeMap<Subsystem, SubsystemStatus>,
    pub alerts: Vec<Alert>,
    pub actions: Vec<ActionRecord>,
    pub maintenance_items: Vec<MaintenanceItem>,
}

impl DashboardSnapshot {
    pub fn healthy_subsystems(&self) -> usize {
        self.subsystem_status
            .values()
            .filter(|s| s.is_healthy())
            .count()
    }

    pub fn degraded_subsystems(&self) -> Vec<Subsystem> {
        self.subsystem_status
            .iter()
            .filter(|(_, s)| !s.is_healthy())
            .map(|(&name, _)| name)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::clock::FixedClock;
    use crate::config::EngineConfig;
    use crate::engine::Engine;
    use crate::rng::ScriptedRandom;
    use crate::subsystem::Subsystem;
    use chrono::{Local, TimeZone};

    fn initial() -> super::DashboardSnapshot {
        let clock = FixedClock(
            Local
                .with_ymd_and_hms(2026, 3, 1, 8, 30, 0)
                .single()
                .unwrap(),
        );
        Engine::with_sources(
            EngineConfig::default(),
            Box::new(ScriptedRandom::constant(0.5).unwrap()),
            Box::new(clock),
        )
        .unwrap()
        .snapshot()
    }

    #[test]
    fn ai_processing_counts_as_degraded() {
        let s = initial();
        assert_eq!(s.healthy_subsystems(), 5);
        assert_eq!(s.degraded_subsystems(), vec![Subsystem::Ai]);
    }

    #[test]
    fn json_shape() {
        let json = serde_json::to_value(initial()).unwrap();
        assert_eq!(json["tick"], 0);
        assert_eq!(json["proximity"]["front"], 8.2);
        assert_eq!(json["safety_metrics"]["geofence_compliance"], 100.0);
        assert_eq!(json["subsystem_status"]["ledger-sync"], "Synced");
        assert_eq!(json["alerts"].as_array().unwrap().len(), 3);
        assert_eq!(json["actions"][0]["status"], "Resolved");
        assert_eq!(json["maintenance_items"][1]["status"], "Attention Needed");
    }

    #[test]
    fn json_round_trip_preserves_feeds() {
        let s = initial();
        let text = serde_json::to_string(&s).unwrap();
        let back: super::DashboardSnapshot = serde_json::from_str(&text).unwrap();
        assert_eq!(back.alerts, s.alerts);
        assert_eq!(back.subsystem_status, s.subsystem_status);
    }
}
