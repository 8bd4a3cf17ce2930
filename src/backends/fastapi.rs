//! FastAPI framework integration

use super::*;
use crate::fs::FileSystem;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

const ENTRY_POINTS: &[&str] = &["main.py", "app/main.py"];

const MIDDLEWARE_CODE: &str = r#"from fastapi import APIRouter
from fastapi.responses import FileResponse, JSONResponse

from .settings import PWA_MANIFEST, PWA_SERVICE_WORKER_PATH

router = APIRouter()


@router.get("/manifest.json", include_in_schema=False)
async def manifest() -> JSONResponse:
    return JSONResponse(PWA_MANIFEST)


@router.get("/sw.js", include_in_schema=False)
async def service_worker() -> FileResponse:
    return FileResponse(
        PWA_SERVICE_WORKER_PATH,
        media_type="application/javascript",
        headers={"Service-Worker-Allowed": "/"},
    )

# In main.py:
#     app.include_router(router)
"#;

pub struct FastApiIntegration {
    scanner: ProjectScanner,
}

impl FastApiIntegration {
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

impl BackendIntegration for FastApiIntegration {
    fn framework(&self) -> FrameworkId {
        FrameworkId::FastApi
    }

    fn language(&self) -> BackendLanguage {
        BackendLanguage::Python
    }

    fn project_path(&self) -> &Path {
        self.scanner.root()
    }

    fn detect(&self) -> DetectionResult {
        let mut collector = EvidenceCollector::new();

        if self.scanner.any_file_exists(ENTRY_POINTS) {
            collector.primary("main.py or app/main.py");
        }

        let version = check_manifests(
            &self.scanner,
            &mut collector,
            "fastapi",
            &[
                ManifestCheck {
                    file: "requirements.txt",
                    label: "requirements.txt: FastAPI",
                },
                ManifestCheck {
                    file: "pyproject.toml",
                    label: "pyproject.toml: fastapi",
                },
            ],
        );

        if self.scanner.any_dir_exists(&["routers", "app/routers"]) {
            collector.corroborating("FastAPI structure (routers/ or app/routers/)");
        }

        debug!(
            root = %self.scanner.root().display(),
            confidence = %collector.confidence(),
            indicators = ?collector.indicators(),
            "FastAPI detection finished"
        );

        collector.finish(version)
    }

    /// Interactive docs change rarely and are served stale while revalidating.
    fn generate_service_worker_config(&self) -> ServiceWorkerConfig {
        ServiceWorkerConfig::new(vec![
            RuntimeCachingRule::cache_first(
                "/static/**",
                "fastapi-static-cache",
                100,
                30 * DAY_SECS,
            ),
            RuntimeCachingRule::stale_while_revalidate(
                "/docs/**",
                "fastapi-docs-cache",
                10,
                DAY_SECS,
            ),
            RuntimeCachingRule::network_first("/api/**", "fastapi-api-cache", 3, 50, 300),
            RuntimeCachingRule::network_only("/admin/**", "fastapi-admin-cache"),
        ])
    }

    fn validate_setup(&self) -> ValidationReport {
        let mut report = ValidationReport::new();

        let Some(entry) = self.scanner.first_existing(ENTRY_POINTS) else {
            report.error("FastAPI entry point (main.py or app/main.py) not found");
            return report;
        };

        if let Some(source) = self.scanner.try_read(entry) {
            if !source.contains("FastAPI(") {
                report.warning(format!(
                    "FastAPI application instance not found in {}",
                    entry
                ));
            }
            if !source.contains("StaticFiles") {
                report.suggestion("Consider mounting StaticFiles to serve PWA assets");
            }
        }

        report
    }

    fn middleware_code(&self) -> &'static str {
        MIDDLEWARE_CODE
    }

    fn middleware_path(&self) -> &'static str {
        "pwa_routes.py"
    }
}
