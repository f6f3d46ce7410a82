use color_eyre::eyre::eyre;
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/search";
pub const DEFAULT_FEATURE_SERVICE_URL: &str = "https://services1.arcgis.com/Z3qsB1OAIjFLs23T/ArcGIS/rest/services/JP_Precincts_20181129/FeatureServer/0/query";
const DEFAULT_USER_AGENT: &str = "precinct_lookup_app";
const DEFAULT_LOG_FILE: &str = "precinct_lookup.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub geocoder_url: String,
    pub user_agent: String,
    pub feature_service_url: String,
    /// Applied to both HTTP calls. `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
    pub log_file: PathBuf,
    pub debug: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            geocoder_url: DEFAULT_GEOCODER_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            feature_service_url: DEFAULT_FEATURE_SERVICE_URL.to_string(),
            request_timeout: None,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            debug: false,
        }
    }
}

impl AppConfig {
    /// Builds the configuration from a variable lookup, falling back to defaults
    pub fn from_vars<F>(var: F) -> color_eyre::eyre::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| var(key).filter(|value| !value.trim().is_empty());

        let request_timeout = match non_empty("REQUEST_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .map_err(|e| eyre!("Invalid REQUEST_TIMEOUT_SECS '{raw}': {e}"))?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            geocoder_url: non_empty("GEOCODER_URL").unwrap_or(defaults.geocoder_url),
            user_agent: non_empty("GEOCODER_USER_AGENT").unwrap_or(defaults.user_agent),
            feature_service_url: non_empty("FEATURE_SERVICE_URL")
                .unwrap_or(defaults.feature_service_url),
            request_timeout,
            log_file: non_empty("LOG_FILE").map_or(defaults.log_file, PathBuf::from),
            debug: non_empty("DEBUG").is_some_and(|value| value != "0"),
        })
    }
}

/// Initializes the application configuration from `.env` and the process environment
pub fn init_app_config() -> color_eyre::eyre::Result<AppConfig> {
    // Load environment variables from .env file
    dotenv().ok();

    AppConfig::from_vars(|key| env::var(key).ok())
}
