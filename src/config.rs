//! Configuration management for universal-pwa
//!
//! `PwaConfig` carries everything the client passes to the remote generation
//! service plus the few fields the local detection core consumes (project root,
//! backend override, auto-detect flag). It is built with defaults via
//! [`PwaConfig::new`] or overlaid from environment variables via
//! [`PwaConfig::from_env`], and checked with [`PwaConfig::validate`].
//!
//! # Environment Variables
//!
//! - `UPWA_API_ENDPOINT`: Core API endpoint - default: "http://localhost:3000"
//! - `UPWA_TIMEOUT`: Request timeout in seconds (1-300) - default: "30"
//! - `UPWA_BACKEND`: Explicit backend (django|flask|fastapi|laravel|symfony)
//! - `UPWA_AUTO_DETECT`: Auto-detect backend (true|false) - default: "true"
//! - `UPWA_CACHING_STRATEGY`: aggressive|balanced|conservative - default: "balanced"
//!
//! # Example
//!
//! ```no_run
//! use universal_pwa::PwaConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut config = PwaConfig::from_env("/path/to/project")?;
//! config.app_name = Some("My App".to_string());
//! config.validate()?;
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

const DEFAULT_API_ENDPOINT: &str = "http://localhost:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const MAX_TIMEOUT_SECS: u64 = 300;

/// Backend names accepted by the `backend` override
pub const SUPPORTED_BACKENDS: &[&str] = &["django", "flask", "fastapi", "laravel", "symfony"];

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("project_root is required")]
    MissingProjectRoot,

    #[error("Project root does not exist: {}", .0.display())]
    ProjectRootNotFound(PathBuf),

    #[error("Invalid backend: {0}. Valid options: django, flask, fastapi, laravel, symfony")]
    InvalidBackend(String),

    #[error("Invalid caching strategy: {0}. Valid options: aggressive, balanced, conservative")]
    InvalidCachingStrategy(String),

    #[error("Invalid timeout: {0}s. Must be between 1 and 300 seconds")]
    InvalidTimeout(u64),

    #[error("Invalid API endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

/// Caching tier passed through to the generation service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CachingStrategy {
    Aggressive,
    #[default]
    Balanced,
    Conservative,
}

impl CachingStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CachingStrategy::Aggressive => "aggressive",
            CachingStrategy::Balanced => "balanced",
            CachingStrategy::Conservative => "conservative",
        }
    }
}

impl fmt::Display for CachingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CachingStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "aggressive" => Ok(CachingStrategy::Aggressive),
            "balanced" => Ok(CachingStrategy::Balanced),
            "conservative" => Ok(CachingStrategy::Conservative),
            _ => Err(ConfigError::InvalidCachingStrategy(s.to_string())),
        }
    }
}

/// Main configuration for PWA detection and generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PwaConfig {
    /// Root directory of the project
    pub project_root: PathBuf,

    // Application metadata
    pub app_name: Option<String>,
    pub app_description: Option<String>,
    #[serde(default = "default_theme_color")]
    pub app_theme_color: String,
    #[serde(default = "default_background_color")]
    pub app_background_color: String,
    #[serde(default = "default_root_path")]
    pub app_start_url: String,
    #[serde(default = "default_root_path")]
    pub app_scope: String,

    // Backend detection
    #[serde(default = "default_true")]
    pub auto_detect_backend: bool,
    /// Explicit backend; must be one of [`SUPPORTED_BACKENDS`]
    #[serde(default)]
    pub backend: Option<String>,

    // Icon generation
    #[serde(default = "default_true")]
    pub generate_icons: bool,
    #[serde(default)]
    pub generate_splash_screens: bool,
    #[serde(default)]
    pub icon_source: Option<String>,

    #[serde(default)]
    pub caching_strategy: CachingStrategy,

    // Output
    #[serde(default)]
    pub output_dir: Option<String>,
    #[serde(default = "default_manifest_path")]
    pub manifest_path: String,
    #[serde(default = "default_service_worker_path")]
    pub service_worker_path: String,

    // API connection
    #[serde(default = "default_api_endpoint")]
    pub api_endpoint: String,
    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

fn default_theme_color() -> String {
    "#000000".to_string()
}

fn default_background_color() -> String {
    "#FFFFFF".to_string()
}

fn default_root_path() -> String {
    "/".to_string()
}

fn default_true() -> bool {
    true
}

fn default_manifest_path() -> String {
    "public/manifest.json".to_string()
}

fn default_service_worker_path() -> String {
    "public/sw.js".to_string()
}

fn default_api_endpoint() -> String {
    DEFAULT_API_ENDPOINT.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl PwaConfig {
    /// Configuration with defaults for every optional field
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            app_name: None,
            app_description: None,
            app_theme_color: default_theme_color(),
            app_background_color: default_background_color(),
            app_start_url: default_root_path(),
            app_scope: default_root_path(),
            auto_detect_backend: true,
            backend: None,
            generate_icons: true,
            generate_splash_screens: false,
            icon_source: None,
            caching_strategy: CachingStrategy::default(),
            output_dir: None,
            manifest_path: default_manifest_path(),
            service_worker_path: default_service_worker_path(),
            api_endpoint: default_api_endpoint(),
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Defaults overlaid with `UPWA_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ParseError` when a variable is set but malformed.
    pub fn from_env(project_root: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::new(project_root);

        if let Ok(endpoint) = env::var("UPWA_API_ENDPOINT") {
            config.api_endpoint = endpoint;
        }

        if let Ok(timeout) = env::var("UPWA_TIMEOUT") {
            config.timeout = timeout.parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::ParseError {
                    field: "UPWA_TIMEOUT".to_string(),
                    error: e.to_string(),
                }
            })?;
        }

        if let Ok(backend) = env::var("UPWA_BACKEND") {
            if !backend.is_empty() {
                config.backend = Some(backend.to_lowercase());
            }
        }

        if let Ok(auto_detect) = env::var("UPWA_AUTO_DETECT") {
            config.auto_detect_backend =
                auto_detect
                    .parse()
                    .map_err(|e: std::str::ParseBoolError| ConfigError::ParseError {
                        field: "UPWA_AUTO_DETECT".to_string(),
                        error: e.to_string(),
                    })?;
        }

        if let Ok(strategy) = env::var("UPWA_CACHING_STRATEGY") {
            config.caching_strategy = strategy.parse()?;
        }

        Ok(config)
    }

    /// Validates field values
    ///
    /// Checks that:
    /// - project_root is set
    /// - backend, if given, is a supported name
    /// - timeout is between 1 and 300 seconds
    /// - api_endpoint is an http(s) URL
    ///
    /// Whether the project root exists on disk is checked by the client at
    /// construction, see [`PwaConfig::ensure_project_root`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.project_root.as_os_str().is_empty() {
            return Err(ConfigError::MissingProjectRoot);
        }

        if let Some(backend) = &self.backend {
            if !SUPPORTED_BACKENDS.contains(&backend.as_str()) {
                return Err(ConfigError::InvalidBackend(backend.clone()));
            }
        }

        if self.timeout == 0 || self.timeout > MAX_TIMEOUT_SECS {
            return Err(ConfigError::InvalidTimeout(self.timeout));
        }

        match reqwest::Url::parse(&self.api_endpoint) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => return Err(ConfigError::InvalidEndpoint(self.api_endpoint.clone())),
        }

        Ok(())
    }

    /// Fails if the project root does not exist on disk
    pub fn ensure_project_root(&self) -> Result<&Path, ConfigError> {
        if self.project_root.exists() {
            Ok(&self.project_root)
        } else {
            Err(ConfigError::ProjectRootNotFound(self.project_root.clone()))
        }
    }
}
