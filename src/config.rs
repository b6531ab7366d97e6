//! Configuration management for the `ParkTrips` planner
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::PlannerError;
use crate::clustering::DEFAULT_THRESHOLD_MILES;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable read when `google.api_key` is not configured
pub const API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";

/// Bare `.env` names for the Firebase settings, in `FirebaseConfig` field order
pub const FIREBASE_ENV: [&str; 7] = [
    "FIREBASE_API_KEY",
    "FIREBASE_AUTH_DOMAIN",
    "FIREBASE_DATABASE_URL",
    "FIREBASE_PROJECT_ID",
    "FIREBASE_STORAGE_BUCKET",
    "FIREBASE_MESSAGING_SENDER_ID",
    "FIREBASE_APP_ID",
];

/// Root configuration structure for the planner
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Google Maps API configuration
    pub google: GoogleConfig,
    /// Where trips start from
    pub home: HomeConfig,
    /// Trip clustering settings
    pub clustering: ClusteringConfig,
    /// Cache, template and output file locations
    pub paths: PathsConfig,
    /// Static site settings
    pub site: SiteConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Local preview server
    pub server: ServerConfig,
}

/// Google Maps API settings shared by geocoding and distance lookups
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GoogleConfig {
    /// Google Maps API key
    pub api_key: Option<String>,
    /// Appended to every park name before geocoding
    pub geocode_suffix: String,
    /// Base URL for the Maps web services
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
    /// Pause after each request, in milliseconds
    pub request_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeConfig {
    /// Address geocoded as the origin of every drive
    pub address: String,
    /// Coordinates published in the static site instead of the geocoded address
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringConfig {
    /// Maximum distance from a cluster's seed park, in miles
    pub threshold_miles: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub parks_file: PathBuf,
    pub drive_times_file: PathBuf,
    pub output_dir: PathBuf,
    pub map_file: PathBuf,
    pub report_file: PathBuf,
    pub template_file: PathBuf,
    pub site_file: PathBuf,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub firebase: FirebaseConfig,
}

/// Firebase web app settings embedded in the static site
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FirebaseConfig {
    pub api_key: String,
    pub auth_domain: String,
    pub database_url: String,
    pub project_id: String,
    pub storage_bucket: String,
    pub messaging_sender_id: String,
    pub app_id: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

// Default value functions
fn default_google_base_url() -> String {
    "https://maps.googleapis.com/maps/api".to_string()
}

fn default_geocode_suffix() -> String {
    ", California".to_string()
}

fn default_google_timeout() -> u32 {
    30
}

fn default_request_delay() -> u64 {
    100
}

fn default_home_address() -> String {
    "Santa Cruz, CA".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            geocode_suffix: default_geocode_suffix(),
            base_url: default_google_base_url(),
            timeout_seconds: default_google_timeout(),
            request_delay_ms: default_request_delay(),
        }
    }
}

impl Default for HomeConfig {
    fn default() -> Self {
        // general downtown area rather than a street address
        Self {
            address: default_home_address(),
            latitude: 36.9741,
            longitude: -122.0308,
        }
    }
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            threshold_miles: DEFAULT_THRESHOLD_MILES,
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            parks_file: PathBuf::from("res/parks.json"),
            drive_times_file: PathBuf::from("res/drive_times.json"),
            output_dir: PathBuf::from("output"),
            map_file: PathBuf::from("output/parks_map.html"),
            report_file: PathBuf::from("output/trip_report.txt"),
            template_file: PathBuf::from("templates/index.html"),
            site_file: PathBuf::from("output/parks_site.html"),
        }
    }
}

impl Default for FirebaseConfig {
    fn default() -> Self {
        Self {
            api_key: "YOUR_FIREBASE_API_KEY".to_string(),
            auth_domain: "YOUR_PROJECT.firebaseapp.com".to_string(),
            database_url: "https://YOUR_PROJECT-default-rtdb.firebaseio.com".to_string(),
            project_id: "YOUR_PROJECT".to_string(),
            storage_bucket: "YOUR_PROJECT.appspot.com".to_string(),
            messaging_sender_id: "YOUR_SENDER_ID".to_string(),
            app_id: "YOUR_APP_ID".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

impl GoogleConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.into())
    }

    #[must_use]
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }
}

impl PlannerConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path()
                .filter(|path| path.exists())
                .unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides, e.g. PARKTRIPS_HOME__ADDRESS
        builder = builder.add_source(
            Environment::with_prefix("PARKTRIPS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: PlannerConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_env_fallbacks(|name| std::env::var(name).ok());
        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Fill settings still at their defaults from bare environment variables
    /// (`GOOGLE_MAPS_API_KEY`, `FIREBASE_*`). Configured values win.
    pub fn apply_env_fallbacks(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if self.google.api_key.is_none() {
            self.google.api_key = lookup(API_KEY_ENV);
        }

        let defaults = FirebaseConfig::default();
        let firebase = &mut self.site.firebase;
        let fields = [
            (&mut firebase.api_key, defaults.api_key),
            (&mut firebase.auth_domain, defaults.auth_domain),
            (&mut firebase.database_url, defaults.database_url),
            (&mut firebase.project_id, defaults.project_id),
            (&mut firebase.storage_bucket, defaults.storage_bucket),
            (&mut firebase.messaging_sender_id, defaults.messaging_sender_id),
            (&mut firebase.app_id, defaults.app_id),
        ];
        for ((field, default), name) in fields.into_iter().zip(FIREBASE_ENV) {
            if *field == default {
                if let Some(value) = lookup(name) {
                    *field = value;
                }
            }
        }
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("parktrips").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.google.base_url.is_empty() {
            self.google.base_url = default_google_base_url();
        }
        if self.google.timeout_seconds == 0 {
            self.google.timeout_seconds = default_google_timeout();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.server.port == 0 {
            self.server.port = default_port();
        }
    }

    /// Validate all configuration settings that every command relies on
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate API keys and the home address, required before any lookup
    pub fn validate_api_keys(&self) -> Result<()> {
        match self.google.api_key.as_deref() {
            None | Some("") => {
                return Err(PlannerError::config(format!(
                    "{API_KEY_ENV} not set. Add it to your .env file or set google.api_key"
                ))
                .into());
            }
            Some(key) if key.len() < 8 => {
                return Err(PlannerError::config(
                    "Google Maps API key appears to be invalid (too short)",
                )
                .into());
            }
            Some(_) => {}
        }

        if self.home.address.trim().is_empty() {
            return Err(PlannerError::config("home.address not set").into());
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.google.timeout_seconds > 300 {
            return Err(
                PlannerError::config("Google API timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.google.request_delay_ms > 60_000 {
            return Err(PlannerError::config("Request delay cannot exceed 60000 ms").into());
        }

        let threshold = self.clustering.threshold_miles;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(PlannerError::config(
                "Cluster threshold must be a non-negative number of miles",
            )
            .into());
        }

        if !(-90.0..=90.0).contains(&self.home.latitude)
            || !(-180.0..=180.0).contains(&self.home.longitude)
        {
            return Err(PlannerError::config("Home coordinates are out of range").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(PlannerError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(PlannerError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.google.base_url.starts_with("http://")
            && !self.google.base_url.starts_with("https://")
        {
            return Err(PlannerError::config(
                "Google API base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        Ok(())
    }
}
