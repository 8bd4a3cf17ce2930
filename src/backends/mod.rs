//! Backend framework integrations
//!
//! Each supported framework is a small struct bound to a project root that
//! implements [`BackendIntegration`]. Integrations are independent of each
//! other and hold no state beyond the project path, so a registry may run them
//! in any order or in parallel.
//!
//! Detection reads the file system; the Service Worker config, manifest
//! variables and route helpers are fixed per framework and never look at the
//! project tree. `validate_setup` reads the live tree again and does not reuse
//! detection results.

#[macro_use]
pub mod id_enum_macro;

pub mod django;
pub mod fastapi;
pub mod flask;
pub mod framework_id;
pub mod registry;
pub mod types;

pub use django::DjangoIntegration;
pub use fastapi::FastApiIntegration;
pub use flask::FlaskIntegration;
pub use framework_id::{BackendLanguage, FrameworkId};
pub use registry::IntegrationRegistry;
pub use types::{
    CacheHandler, CacheOptions, Expiration, ManifestVariables, MiddlewareInjection,
    RuntimeCachingRule, ServiceWorkerConfig, ValidationReport, DAY_SECS,
};

use crate::detection::{extract_version, DetectionResult, EvidenceCollector, ProjectScanner};
use std::path::Path;

/// Routes that need CSRF/session protection
pub const SECURE_ROUTES: &[&str] = &["/admin/**", "/api/auth/**", "/dashboard/**"];

/// API endpoint patterns
pub const API_PATTERNS: &[&str] = &["/api/**", "/json/**", "/graphql/**"];

/// Static asset patterns
pub const STATIC_ASSET_PATTERNS: &[&str] = &[
    "/assets/**",
    "/public/**",
    "/static/**",
    "**/*.{js,css,png,jpg,svg,webp,woff,woff2}",
];

/// Capability contract shared by every backend framework integration
pub trait BackendIntegration: Send + Sync {
    fn framework(&self) -> FrameworkId;

    fn language(&self) -> BackendLanguage;

    /// Project root this integration was constructed with
    fn project_path(&self) -> &Path;

    /// Backend identifier, e.g. "django"
    fn id(&self) -> &'static str {
        self.framework().as_str()
    }

    /// Display name, e.g. "Django"
    fn name(&self) -> &'static str {
        self.framework().name()
    }

    /// Look for evidence of this framework in the project. Never fails.
    fn detect(&self) -> DetectionResult;

    /// Framework-tailored runtime caching rules
    fn generate_service_worker_config(&self) -> ServiceWorkerConfig;

    fn generate_manifest_variables(&self) -> ManifestVariables {
        ManifestVariables::new(self.get_start_url())
    }

    /// Recommended PWA start URL
    fn get_start_url(&self) -> String {
        "/".to_string()
    }

    /// Check the project for framework-specific PWA prerequisites
    fn validate_setup(&self) -> ValidationReport;

    /// Code snippet and steps a developer applies by hand
    fn inject_middleware(&self) -> MiddlewareInjection {
        let path = self.middleware_path();
        MiddlewareInjection {
            code: self.middleware_code().to_string(),
            path: path.to_string(),
            language: self.language(),
            instructions: vec![
                format!("Add the following code to {}", path),
                "Restart your server".to_string(),
                "The PWA routes will be automatically available".to_string(),
            ],
        }
    }

    fn middleware_code(&self) -> &'static str {
        "# Add PWA middleware here"
    }

    fn middleware_path(&self) -> &'static str {
        "middleware/pwa.py"
    }

    fn secure_routes(&self) -> &'static [&'static str] {
        SECURE_ROUTES
    }

    fn api_patterns(&self) -> &'static [&'static str] {
        API_PATTERNS
    }

    fn static_asset_patterns(&self) -> &'static [&'static str] {
        STATIC_ASSET_PATTERNS
    }
}

/// A dependency manifest checked as a corroborating signal
pub(crate) struct ManifestCheck {
    pub file: &'static str,
    pub label: &'static str,
}

/// Record corroborating evidence for every manifest that mentions `package`,
/// returning the first version constraint found across them.
pub(crate) fn check_manifests(
    scanner: &ProjectScanner,
    collector: &mut EvidenceCollector,
    package: &str,
    manifests: &[ManifestCheck],
) -> Option<String> {
    let mut version = None;

    for manifest in manifests {
        if let Some(content) = scanner.manifest_mentioning(manifest.file, package) {
            collector.corroborating(manifest.label);
            if version.is_none() {
                version = extract_version(&content, package);
            }
        }
    }

    version
}
