//! Output types produced by backend integrations

use super::BackendLanguage;
use globset::{Glob, GlobSetBuilder};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use tracing::warn;

/// Seconds in one day, for expiration tables
pub const DAY_SECS: u64 = 86_400;

/// Caching strategy applied by the Service Worker to matching requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CacheHandler {
    CacheFirst,
    NetworkFirst,
    NetworkOnly,
    StaleWhileRevalidate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expiration {
    pub max_entries: u32,
    pub max_age_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheOptions {
    pub cache_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<Expiration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_timeout_seconds: Option<u32>,
}

/// Maps a URL glob to a caching handler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeCachingRule {
    pub url_pattern: String,
    pub handler: CacheHandler,
    pub options: CacheOptions,
}

impl RuntimeCachingRule {
    pub fn cache_first(
        url_pattern: &str,
        cache_name: &str,
        max_entries: u32,
        max_age_seconds: u64,
    ) -> Self {
        Self::with_expiration(
            url_pattern,
            CacheHandler::CacheFirst,
            cache_name,
            max_entries,
            max_age_seconds,
        )
    }

    pub fn stale_while_revalidate(
        url_pattern: &str,
        cache_name: &str,
        max_entries: u32,
        max_age_seconds: u64,
    ) -> Self {
        Self::with_expiration(
            url_pattern,
            CacheHandler::StaleWhileRevalidate,
            cache_name,
            max_entries,
            max_age_seconds,
        )
    }

    pub fn network_first(
        url_pattern: &str,
        cache_name: &str,
        network_timeout_seconds: u32,
        max_entries: u32,
        max_age_seconds: u64,
    ) -> Self {
        let mut rule = Self::with_expiration(
            url_pattern,
            CacheHandler::NetworkFirst,
            cache_name,
            max_entries,
            max_age_seconds,
        );
        rule.options.network_timeout_seconds = Some(network_timeout_seconds);
        rule
    }

    /// Never served from cache
    pub fn network_only(url_pattern: &str, cache_name: &str) -> Self {
        Self {
            url_pattern: url_pattern.to_string(),
            handler: CacheHandler::NetworkOnly,
            options: CacheOptions {
                cache_name: cache_name.to_string(),
                expiration: None,
                network_timeout_seconds: None,
            },
        }
    }

    fn with_expiration(
        url_pattern: &str,
        handler: CacheHandler,
        cache_name: &str,
        max_entries: u32,
        max_age_seconds: u64,
    ) -> Self {
        Self {
            url_pattern: url_pattern.to_string(),
            handler,
            options: CacheOptions {
                cache_name: cache_name.to_string(),
                expiration: Some(Expiration {
                    max_entries,
                    max_age_seconds,
                }),
                network_timeout_seconds: None,
            },
        }
    }
}

/// Service Worker configuration for one framework
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceWorkerConfig {
    pub precache: Vec<String>,
    /// Ordered; the first matching rule wins
    pub runtime_caching: Vec<RuntimeCachingRule>,
    pub skip_waiting: bool,
    pub clients_claim: bool,
    pub navigation_preload: bool,
}

impl ServiceWorkerConfig {
    /// Config with the given rules, taking control of clients immediately
    pub fn new(runtime_caching: Vec<RuntimeCachingRule>) -> Self {
        Self {
            precache: Vec::new(),
            runtime_caching,
            skip_waiting: true,
            clients_claim: true,
            navigation_preload: false,
        }
    }

    /// First rule whose pattern matches `path`, as a Service Worker would
    /// pick it.
    pub fn resolve(&self, path: &str) -> Option<&RuntimeCachingRule> {
        let mut builder = GlobSetBuilder::new();
        let mut rule_indices = Vec::with_capacity(self.runtime_caching.len());

        for (index, rule) in self.runtime_caching.iter().enumerate() {
            match Glob::new(&rule.url_pattern) {
                Ok(glob) => {
                    builder.add(glob);
                    rule_indices.push(index);
                }
                Err(e) => {
                    warn!(
                        pattern = %rule.url_pattern,
                        error = %e,
                        "Skipping invalid cache rule pattern"
                    );
                }
            }
        }

        let set = builder.build().ok()?;
        let first = set.matches(path).into_iter().min()?;
        self.runtime_caching.get(rule_indices[first])
    }

    pub fn patterns(&self) -> Vec<&str> {
        self.runtime_caching
            .iter()
            .map(|r| r.url_pattern.as_str())
            .collect()
    }
}

impl Default for ServiceWorkerConfig {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// Variables for the web app manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestVariables {
    pub start_url: String,
    pub scope: String,
    pub display: String,
    pub theme_color: String,
    pub background_color: String,
}

impl ManifestVariables {
    pub fn new(start_url: impl Into<String>) -> Self {
        Self {
            start_url: start_url.into(),
            scope: "/".to_string(),
            display: "standalone".to_string(),
            theme_color: "#ffffff".to_string(),
            background_color: "#ffffff".to_string(),
        }
    }
}

/// Findings from a backend setup check.
///
/// Validity is derived from the error list, so a report can never claim to be
/// valid while holding errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: Vec<String>,
    warnings: Vec<String>,
    suggestions: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A condition that breaks PWA functionality outright
    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Degraded but working setup
    pub fn warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Optional improvement
    pub fn suggestion(&mut self, message: impl Into<String>) {
        self.suggestions.push(message.into());
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }
}

impl Serialize for ValidationReport {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("ValidationReport", 4)?;
        state.serialize_field("isValid", &self.is_valid())?;
        state.serialize_field("errors", &self.errors)?;
        state.serialize_field("warnings", &self.warnings)?;
        state.serialize_field("suggestions", &self.suggestions)?;
        state.end()
    }
}

/// Manual integration steps for a developer; never applied automatically
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiddlewareInjection {
    pub code: String,
    pub path: String,
    pub language: BackendLanguage,
    pub instructions: Vec<String>,
}
