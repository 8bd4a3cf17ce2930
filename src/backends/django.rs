//! Django framework integration
//!
//! Detection checks for:
//! - `manage.py` (primary marker)
//! - `settings.py` or a `settings/` package
//! - `urls.py`
//! - Django in `requirements.txt` or `pyproject.toml`

use super::*;
use crate::fs::FileSystem;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

const MIDDLEWARE_CODE: &str = r#"from django.http import FileResponse, JsonResponse
from django.urls import path
from django.conf import settings


def manifest(request):
    return JsonResponse(settings.PWA_MANIFEST)


def service_worker(request):
    response = FileResponse(open(settings.PWA_SERVICE_WORKER_PATH, "rb"))
    response["Content-Type"] = "application/javascript"
    response["Service-Worker-Allowed"] = "/"
    return response


urlpatterns = [
    path("manifest.json", manifest, name="pwa-manifest"),
    path("sw.js", service_worker, name="pwa-service-worker"),
]
"#;

pub struct DjangoIntegration {
    scanner: ProjectScanner,
}

impl DjangoIntegration {
    pub fn new(project_path: impl Into<PathBuf>) -> Self {
        Self {
            scanner: ProjectScanner::new(project_path),
        }
    }

    pub fn with_fs(project_path: impl Into<PathBuf>, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            scanner: ProjectScanner::with_fs(project_path, fs),
        }
    }
}

impl BackendIntegration for DjangoIntegration {
    fn framework(&self) -> FrameworkId {
        FrameworkId::Django
    }

    fn language(&self) -> BackendLanguage {
        BackendLanguage::Python
    }

    fn project_path(&self) -> &Path {
        self.scanner.root()
    }

    fn detect(&self) -> DetectionResult {
        let mut collector = EvidenceCollector::new();

        if self.scanner.file_exists("manage.py") {
            collector.primary("manage.py");
        }

        if self.scanner.file_exists("settings.py") || self.scanner.dir_exists("settings") {
            collector.corroborating("settings.py or settings/");
        }

        if self.scanner.file_exists("urls.py") {
            collector.corroborating("urls.py");
        }

        let version = check_manifests(
            &self.scanner,
            &mut collector,
            "django",
            &[
                ManifestCheck {
                    file: "requirements.txt",
                    label: "requirements.txt: Django",
                },
                ManifestCheck {
                    file: "pyproject.toml",
                    label: "pyproject.toml: django",
                },
            ],
        );

        debug!(
            root = %self.scanner.root().display(),
            confidence = %collector.confidence(),
            indicators = ?collector.indicators(),
            "Django detection finished"
        );

        collector.finish(version)
    }

    /// Static and media files are cache-first, the API is network-first with a
    /// short timeout, and the admin is never cached.
    fn generate_service_worker_config(&self) -> ServiceWorkerConfig {
        ServiceWorkerConfig::new(vec![
            RuntimeCachingRule::cache_first(
                "/static/**",
                "django-static-cache",
                100,
                30 * DAY_SECS,
            ),
            RuntimeCachingRule::cache_first("/media/**", "django-media-cache", 50, 7 * DAY_SECS),
            RuntimeCachingRule::network_first("/api/**", "django-api-cache", 3, 50, 300),
            RuntimeCachingRule::network_only("/admin/**", "django-admin-cache"),
        ])
    }

    fn validate_setup(&self) -> ValidationReport {
        let mut report = ValidationReport::new();

        if !self.scanner.file_exists("settings.py") && !self.scanner.dir_exists("settings") {
            report.error("Django settings.py or settings/ directory not found");
        }

        if let Some(settings) = self.scanner.try_read("settings.py") {
            if !settings.contains("STATIC_URL") {
                report.warning("STATIC_URL not found in settings.py");
            }
            if !settings.contains("STATIC_ROOT") {
                report.suggestion("Consider setting STATIC_ROOT for production");
            }
        }

        if !self.scanner.file_exists("urls.py") {
            report.warning("urls.py not found in project root");
        }

        report
    }

    fn middleware_code(&self) -> &'static str {
        MIDDLEWARE_CODE
    }

    fn middleware_path(&self) -> &'static str {
        "pwa/views.py"
    }
}
