//! Client for the remote PWA generation service
//!
//! [`UniversalPwaClient`] wraps the three service operations (scan, generate,
//! validate) and gives access to the local backend integration for the
//! configured project. Transport failures are wrapped in an operation-specific
//! [`PwaError`] variant so callers can tell which phase failed.
//!
//! # Example
//!
//! ```no_run
//! use universal_pwa::{BackendIntegration, PwaConfig, UniversalPwaClient};
//!
//! # fn main() -> Result<(), universal_pwa::PwaError> {
//! let client = UniversalPwaClient::new(PwaConfig::new("/path/to/project"))?;
//! let scan = client.scan()?;
//! println!("framework: {:?}", scan.framework_name());
//!
//! let backend = client.local_backend()?;
//! let sw = backend.generate_service_worker_config();
//! println!("{} runtime caching rules", sw.runtime_caching.len());
//! # Ok(())
//! # }
//! ```

pub mod http;
pub mod types;

pub use http::{HttpClient, RetryPolicy, RETRY_STATUSES};
pub use types::{GenerationResult, ScanResult, ValidationResult};

use crate::backends::{BackendIntegration, IntegrationRegistry};
use crate::config::{ConfigError, PwaConfig};
use crate::error::PwaError;
use serde_json::{json, Map, Value};
use tracing::info;

pub struct UniversalPwaClient {
    config: PwaConfig,
    http: HttpClient,
    registry: IntegrationRegistry,
}

impl UniversalPwaClient {
    /// Validates `config` and checks that the project root exists. Nothing is
    /// sent over the network here.
    pub fn new(config: PwaConfig) -> Result<Self, PwaError> {
        config.validate()?;
        config.ensure_project_root()?;

        let http = HttpClient::new(&config.api_endpoint, config.timeout).map_err(|e| {
            ConfigError::ParseError {
                field: "api_endpoint".to_string(),
                error: e.to_string(),
            }
        })?;
        let registry = IntegrationRegistry::for_project(&config.project_root);

        Ok(Self {
            config,
            http,
            registry,
        })
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.http = self.http.with_retry_policy(retry);
        self
    }

    pub fn config(&self) -> &PwaConfig {
        &self.config
    }

    pub fn registry(&self) -> &IntegrationRegistry {
        &self.registry
    }

    /// Detect the framework and inventory assets on the service side
    pub fn scan(&self) -> Result<ScanResult, PwaError> {
        let body = json!({
            "projectRoot": self.config.project_root.to_string_lossy(),
            "autoDetectBackend": self.config.auto_detect_backend,
        });

        let result: ScanResult = self.http.post("/api/scan", &body).map_err(PwaError::Scan)?;
        info!(framework = ?result.framework_name(), "Scan complete");
        Ok(result)
    }

    /// Generate PWA files; `overrides` replace top-level config keys
    pub fn generate(
        &self,
        overrides: Option<Map<String, Value>>,
    ) -> Result<GenerationResult, PwaError> {
        let body = json!({ "config": self.merged_config(overrides)? });

        let result: GenerationResult = self
            .http
            .post("/api/generate", &body)
            .map_err(PwaError::Generation)?;
        info!(
            success = result.success,
            files = result.files.len(),
            "Generation complete"
        );
        Ok(result)
    }

    /// PWA readiness check on the service side
    pub fn validate(&self) -> Result<ValidationResult, PwaError> {
        let body = json!({
            "projectRoot": self.config.project_root.to_string_lossy(),
        });

        let result: ValidationResult = self
            .http
            .post("/api/validate", &body)
            .map_err(PwaError::Validation)?;
        info!(valid = result.valid, score = result.score, "Validation complete");
        Ok(result)
    }

    /// Local integration for the project: the configured backend, or the
    /// best auto-detected one
    pub fn local_backend(&self) -> Result<&dyn BackendIntegration, PwaError> {
        self.registry.select(&self.config)
    }

    fn merged_config(&self, overrides: Option<Map<String, Value>>) -> Result<Value, PwaError> {
        let mut merged = match serde_json::to_value(&self.config) {
            Ok(Value::Object(map)) => map,
            Ok(_) => Map::new(),
            Err(e) => {
                return Err(PwaError::Config(ConfigError::ParseError {
                    field: "config".to_string(),
                    error: e.to_string(),
                }));
            }
        };

        if let Some(overrides) = overrides {
            merged.extend(overrides);
        }

        Ok(Value::Object(merged))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::FrameworkId;
    use mockito::{Matcher, Server};
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    fn client_for(dir: &TempDir, endpoint: &str) -> UniversalPwaClient {
        let mut config = PwaConfig::new(dir.path());
        config.api_endpoint = endpoint.to_string();
        UniversalPwaClient::new(config)
            .unwrap()
            .with_retry_policy(RetryPolicy {
                max_retries: 1,
                backoff_factor: Duration::from_millis(1),
            })
    }

    #[test]
    fn test_new_rejects_missing_root() {
        let err = UniversalPwaClient::new(PwaConfig::new("/definitely/not/here/upwa")).err();
        assert!(matches!(
            err,
            Some(PwaError::Config(ConfigError::ProjectRootNotFound(_)))
        ));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let dir = TempDir::new().unwrap();
        let mut config = PwaConfig::new(dir.path());
        config.timeout = 0;

        let err = UniversalPwaClient::new(config).err();
        assert!(matches!(
            err,
            Some(PwaError::Config(ConfigError::InvalidTimeout(0)))
        ));
    }

    #[test]
    fn test_scan_request() {
        let dir = TempDir::new().unwrap();
        let mut server = Server::new();
        let mock = server
            .mock("POST", "/api/scan")
            .match_body(Matcher::Json(json!({
                "projectRoot": dir.path().to_string_lossy(),
                "autoDetectBackend": true,
            })))
            .with_status(200)
            .with_body(r#"{"framework": {"name": "flask"}, "features": {}, "assets": {}}"#)
            .create();

        let result = client_for(&dir, &server.url()).scan().unwrap();
        assert_eq!(result.framework_name(), Some("flask"));
        mock.assert();
    }

    #[test]
    fn test_generate_merges_overrides() {
        let dir = TempDir::new().unwrap();
        let mut server = Server::new();
        let mock = server
            .mock("POST", "/api/generate")
            .match_body(Matcher::PartialJson(json!({
                "config": {
                    "app_name": "Override",
                    "caching_strategy": "balanced",
                    "manifest_path": "public/manifest.json"
                }
            })))
            .with_status(200)
            .with_body(r#"{"success": true, "manifest": {}, "service_worker": ""}"#)
            .create();

        let mut overrides = Map::new();
        overrides.insert("app_name".to_string(), json!("Override"));

        let result = client_for(&dir, &server.url())
            .generate(Some(overrides))
            .unwrap();
        assert!(result.success);
        mock.assert();
    }

    #[test]
    fn test_failures_are_wrapped_per_operation() {
        let dir = TempDir::new().unwrap();
        let mut server = Server::new();
        server.mock("POST", "/api/scan").with_status(404).create();
        server.mock("POST", "/api/generate").with_status(400).create();
        server.mock("POST", "/api/validate").with_status(500).create();

        let client = client_for(&dir, &server.url());

        assert!(matches!(client.scan(), Err(PwaError::Scan(_))));
        assert!(matches!(client.generate(None), Err(PwaError::Generation(_))));

        let err = client.validate().err().unwrap();
        assert!(err.to_string().starts_with("Failed to validate project"));
        assert!(matches!(err, PwaError::Validation(ref e) if e.status() == Some(500)));
    }

    #[test]
    fn test_local_backend_detects_project() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("manage.py"), "").unwrap();
        fs::write(dir.path().join("settings.py"), "STATIC_URL = '/static/'").unwrap();

        let client = client_for(&dir, "http://localhost:3000");
        let backend = client.local_backend().unwrap();
        assert_eq!(backend.framework(), FrameworkId::Django);
        assert_eq!(backend.project_path(), dir.path());
    }
}
