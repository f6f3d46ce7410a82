#[allow(clippy::module_inception)]
mod config;

pub use config::{init_app_config, AppConfig, DEFAULT_FEATURE_SERVICE_URL, DEFAULT_GEOCODER_URL};
