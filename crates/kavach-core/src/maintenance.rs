use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaintenanceStatus {
    Optimal,
    #[serde(rename = "Attention Needed")]
    AttentionNeeded,
}

impl fmt::Display for MaintenanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MaintenanceStatus::Optimal => "Optimal",
            MaintenanceStatus::AttentionNeeded => "Attention Needed",
        })
    }
}

/// Static maintenance entry; the engine passes these through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceItem {
    pub component: String,
    pub status: MaintenanceStatus,
    /// Opaque label such as "15 days".
    pub next_service: String,
}

impl MaintenanceItem {
    pub fn new(
        component: impl Into<String>,
        status: MaintenanceStatus,
        next_service: impl Into<String>,
    ) -> Self {
        Self {
            component: component.into(),
            status,
            next_service: next_service.into(),
        }
    }
}

pub fn default_items() -> Vec<MaintenanceItem> {
    vec![
        MaintenanceItem::new("LIDAR Sensor", MaintenanceStatus::Optimal, "15 days"),
        MaintenanceItem::new(
            "Brake System",
            MaintenanceStatus::AttentionNeeded,
            "2 days",
        ),
        MaintenanceItem::new("GPS Module", MaintenanceStatus::Optimal, "30 days"),
    ]
}
