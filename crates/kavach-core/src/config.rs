use crate::error::{KavachError, Result};
use crate::maintenance::{self, MaintenanceItem};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn default_tick_interval_ms() -> u64 {
    1000
}

fn default_max_step() -> f64 {
    1.0
}

fn default_proximity_floor() -> f64 {
    0.0
}

fn default_proximity_warning_m() -> f64 {
    6.0
}

fn default_metric_floor() -> f64 {
    90.0
}

fn default_metric_ceiling() -> f64 {
    100.0
}

fn default_status_flip_probability() -> f64 {
    0.10
}

fn default_healthy_probability() -> f64 {
    0.8
}

fn default_alert_probability() -> f64 {
    0.20
}

fn default_action_probability() -> f64 {
    0.15
}

fn default_active_probability() -> f64 {
    0.7
}

fn default_feed_capacity() -> usize {
    3
}

fn default_alert_messages() -> Vec<String> {
    [
        "New worker detected in operation zone",
        "Wind speed increasing",
        "Load weight fluctuation detected",
        "Approaching maximum reach limit",
        "Weather conditions changing",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_action_messages() -> Vec<String> {
    [
        "Speed adjustment initiated",
        "Proximity warning triggered",
        "Load balance checked",
        "Emergency protocol activated",
        "System diagnostic completed",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

const CATALOG_SIZE: usize = 5;
const MIN_SENSIBLE_INTERVAL_MS: u64 = 50;

// ---------------------------------------------------------------------------
// EngineConfig
// ---------------------------------------------------------------------------

/// Named simulation parameters. Every field falls back to the dashboard's
/// built-in value when absent from YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// Largest magnitude of a single random-walk step.
    #[serde(default = "default_max_step")]
    pub max_step: f64,
    #[serde(default = "default_proximity_floor")]
    pub proximity_floor: f64,
    /// Distances below this are reported as too close. Display only.
    #[serde(default = "default_proximity_warning_m")]
    pub proximity_warning_m: f64,
    #[serde(default = "default_metric_floor")]
    pub metric_floor: f64,
    #[serde(default = "default_metric_ceiling")]
    pub metric_ceiling: f64,
    #[serde(default = "default_status_flip_probability")]
    pub status_flip_probability: f64,
    #[serde(default = "default_healthy_probability")]
    pub healthy_probability: f64,
    #[serde(default = "default_alert_probability")]
    pub alert_probability: f64,
    #[serde(default = "default_action_probability")]
    pub action_probability: f64,
    #[serde(default = "default_active_probability")]
    pub active_probability: f64,
    #[serde(default = "default_feed_capacity")]
    pub feed_capacity: usize,
    #[serde(default = "default_alert_messages")]
    pub alert_messages: Vec<String>,
    #[serde(default = "default_action_messages")]
    pub action_messages: Vec<String>,
    #[serde(default = "maintenance::default_items")]
    pub maintenance: Vec<MaintenanceItem>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            max_step: default_max_step(),
            proximity_floor: default_proximity_floor(),
            proximity_warning_m: default_proximity_warning_m(),
            metric_floor: default_metric_floor(),
            metric_ceiling: default_metric_ceiling(),
            status_flip_probability: default_status_flip_probability(),
            healthy_probability: default_healthy_probability(),
            alert_probability: default_alert_probability(),
            action_probability: default_action_probability(),
            active_probability: default_active_probability(),
            feed_capacity: default_feed_capacity(),
            alert_messages: default_alert_messages(),
            action_messages: default_action_messages(),
            maintenance: maintenance::default_items(),
        }
    }
}

impl EngineConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(KavachError::ConfigNotFound(path.to_path_buf()));
        }
        let data = std::fs::read_to_string(path)?;
        let cfg: EngineConfig = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let data = serde_yaml::to_string(self)?;
        std::fs::write(path, data)?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        let mut error = |message: String| {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message,
            })
        };

        if self.tick_interval_ms == 0 {
            error("tick_interval_ms must be greater than zero".to_string());
        }

        for (name, p) in [
            ("status_flip_probability", self.status_flip_probability),
            ("healthy_probability", self.healthy_probability),
            ("alert_probability", self.alert_probability),
            ("action_probability", self.action_probability),
            ("active_probability", self.active_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                error(format!("{name} must lie in [0, 1], got {p}"));
            }
        }

        if !self.max_step.is_finite() || self.max_step < 0.0 {
            error(format!(
                "max_step must be a finite non-negative number, got {}",
                self.max_step
            ));
        }

        if !self.proximity_floor.is_finite() || self.proximity_floor < 0.0 {
            error(format!(
                "proximity_floor must be finite and non-negative, got {}",
                self.proximity_floor
            ));
        }

        if !(self.metric_floor.is_finite() && self.metric_ceiling.is_finite())
            || self.metric_floor > self.metric_ceiling
        {
            error(format!(
                "metric bounds [{}, {}] are not a valid range",
                self.metric_floor, self.metric_ceiling
            ));
        }

        if self.feed_capacity == 0 {
            error("feed_capacity must be at least 1".to_string());
        }

        if self.alert_messages.is_empty() {
            error("alert_messages catalog is empty".to_string());
        }

        if self.action_messages.is_empty() {
            error("action_messages catalog is empty".to_string());
        }

        if self.tick_interval_ms > 0 && self.tick_interval_ms < MIN_SENSIBLE_INTERVAL_MS {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "tick_interval_ms={} (<{MIN_SENSIBLE_INTERVAL_MS} is unusually fast)",
                    self.tick_interval_ms
                ),
            });
        }

        for (name, catalog) in [
            ("alert_messages", &self.alert_messages),
            ("action_messages", &self.action_messages),
        ] {
            if !catalog.is_empty() && catalog.len() != CATALOG_SIZE {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!(
                        "{name} has {} entries (dashboard ships {CATALOG_SIZE})",
                        catalog.len()
                    ),
                });
            }
        }

        warnings
    }

    /// Fail on any error-level finding.
    pub fn ensure_valid(&self) -> Result<()> {
        let errors: Vec<String> = self
            .validate()
            .into_iter()
            .filter(|w| w.level == WarnLevel::Error)
            .map(|w| w.message)
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(KavachError::InvalidConfig(errors.join("; ")))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
