use thiserror::Error;

pub mod app_config;
mod candidates;
mod config;
pub mod geo;

pub use app_config::{AppConfig, Environment};
pub use candidates::{MedicineCandidate, StoreCandidate};
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::{distance_km, rank_by_proximity, round_2dp, GeoError, GeoPoint, RadiusKm};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
