use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KavachError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("random source unavailable: {0}")]
    RandomSource(String),

    #[error("invalid scripted draw {0}: values must lie in [0, 1)")]
    InvalidDraw(f64),

    #[error("scripted random source needs at least one draw")]
    EmptyScript,

    #[error("timer unavailable: {0}")]
    TimerUnavailable(String),

    #[error("tick interval must be greater than zero")]
    InvalidInterval,

    #[error("scheduler task failed: {0}")]
    Scheduler(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, KavachError>;
