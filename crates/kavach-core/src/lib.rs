pub mod action;
pub mod alert;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod feed;
pub mod maintenance;
pub mod metrics;
pub mod proximity;
pub mod rng;
pub mod scheduler;
pub mod snapshot;
pub mod subsystem;
pub mod walk;

pub use engine::{Engine, RunningEngine};
pub use error::{KavachError, Result};
pub use snapshot::DashboardSnapshot;
