//! Safety-performance percentages and their generator.

use crate::rng::RandomSource;
use crate::walk::BoundedWalk;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    CollisionPrevention,
    GeofenceCompliance,
    OperatorAlertness,
    SystemHealth,
}

impl Metric {
    pub fn all() -> &'static [Metric] {
        &[
            Metric::CollisionPrevention,
            Metric::GeofenceCompliance,
            Metric::OperatorAlertness,
            Metric::SystemHealth,
        ]
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::CollisionPrevention => "Collision Prevention",
            Metric::GeofenceCompliance => "Geofence Compliance",
            Metric::OperatorAlertness => "Operator Alertness",
            Metric::SystemHealth => "System Health",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SafetyMetrics {
    pub collision_prevention: f64,
    pub geofence_compliance: f64,
    pub operator_alertness: f64,
    pub system_health: f64,
}

impl SafetyMetrics {
    pub fn initial() -> Self {
        Self {
            collision_prevention: 98.0,
            geofence_compliance: 100.0,
            operator_alertness: 95.0,
            system_health: 97.0,
        }
    }

    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::CollisionPrevention => self.collision_prevention,
            Metric::GeofenceCompliance => self.geofence_compliance,
            Metric::OperatorAlertness => self.operator_alertness,
            Metric::SystemHealth => self.system_health,
        }
    }

    fn get_mut(&mut self, metric: Metric) -> &mut f64 {
        match metric {
            Metric::CollisionPrevention => &mut self.collision_prevention,
            Metric::GeofenceCompliance => &mut self.geofence_compliance,
            Metric::OperatorAlertness => &mut self.operator_alertness,
            Metric::SystemHealth => &mut self.system_health,
        }
    }
}

// ---------------------------------------------------------------------------
// MetricBand
// ---------------------------------------------------------------------------

/// Display severity for a percentage. The engine never consults this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricBand {
    Good,
    Warning,
    Critical,
}

impl MetricBand {
    pub fn classify(value: f64) -> Self {
        if value >= 95.0 {
            MetricBand::Good
        } else if value >= 80.0 {
            MetricBand::Warning
        } else {
            MetricBand::Critical
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MetricBand::Good => "good",
            MetricBand::Warning => "warning",
            MetricBand::Critical => "critical",
        }
    }
}

// ---------------------------------------------------------------------------
// SafetyMetricsGenerator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct SafetyMetricsGenerator {
    walk: BoundedWalk,
}

impl SafetyMetricsGenerator {
    pub fn new(floor: f64, ceiling: f64, max_step: f64) -> Self {
        Self {
            walk: BoundedWalk::clamped(floor, ceiling, max_step),
        }
    }

    pub fn walk(&self) -> &BoundedWalk {
        &self.walk
    }

    pub fn advance(&self, metrics: &mut SafetyMetrics, rng: &mut dyn RandomSource) {
        for &metric in Metric::all() {
            let slot = metrics.get_mut(metric);
            *slot = self.walk.advance(*slot, rng);
        }
    }
}
