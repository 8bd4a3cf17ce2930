//! Flask framework integration

use super::*;
use crate::fs::FileSystem;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

const ENTRY_POINTS: &[&str] = &["app.py", "application.py"];

const MIDDLEWARE_CODE: &str = r#"from flask import Blueprint, current_app, jsonify, send_from_directory

pwa = Blueprint("pwa", __name__)


@pwa.route("/manifest.json")
def manifest():
    return jsonify(current_app.config["PWA_MANIFEST"])


@pwa.route("/sw.js")
def service_worker():
    response = send_from_directory(current_app.static_folder, "sw.js")
    response.headers["Content-Type"] = "application/javascript"
    response.headers["Service-Worker-Allowed"] = "/"
    return response

# In your application factory:
#     app.register_blueprint(pwa)
"#;

pub struct FlaskIntegration {
    scanner: ProjectScanner,
}

impl FlaskIntegration {
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

impl BackendIntegration for FlaskIntegration {
    fn framework(&self) -> FrameworkId {
        FrameworkId::Flask
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
            collector.primary("app.py or application.py");
        }

        let from_requirements = check_manifests(
            &self.scanner,
            &mut collector,
            "flask",
            &[ManifestCheck {
                file: "requirements.txt",
                label: "requirements.txt: Flask",
            }],
        );

        if self.scanner.any_dir_exists(&["templates", "static"]) {
            collector.corroborating("Flask structure (templates/ or static/)");
        }

        let from_pyproject = check_manifests(
            &self.scanner,
            &mut collector,
            "flask",
            &[ManifestCheck {
                file: "pyproject.toml",
                label: "pyproject.toml: flask",
            }],
        );

        debug!(
            root = %self.scanner.root().display(),
            confidence = %collector.confidence(),
            indicators = ?collector.indicators(),
            "Flask detection finished"
        );

        collector.finish(from_requirements.or(from_pyproject))
    }

    fn generate_service_worker_config(&self) -> ServiceWorkerConfig {
        ServiceWorkerConfig::new(vec![
            RuntimeCachingRule::cache_first(
                "/static/**",
                "flask-static-cache",
                100,
                30 * DAY_SECS,
            ),
            RuntimeCachingRule::network_first("/api/**", "flask-api-cache", 3, 50, 300),
            RuntimeCachingRule::network_only("/admin/**", "flask-admin-cache"),
        ])
    }

    /// A missing `app.py` is only a warning: application factories often
    /// live inside a package instead.
    fn validate_setup(&self) -> ValidationReport {
        let mut report = ValidationReport::new();

        match self.scanner.first_existing(ENTRY_POINTS) {
            None => report.warning("app.py or application.py not found"),
            Some(entry) => {
                if let Some(source) = self.scanner.try_read(entry) {
                    if !source.contains("Flask(") {
                        report.warning(format!(
                            "Flask application instance not found in {}",
                            entry
                        ));
                    }
                }
            }
        }

        if !self.scanner.dir_exists("static") {
            report.suggestion("Create a static/ directory to serve PWA assets");
        }

        report
    }

    fn middleware_code(&self) -> &'static str {
        MIDDLEWARE_CODE
    }

    fn middleware_path(&self) -> &'static str {
        "pwa.py"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::ConfidenceLevel;
    use crate::fs::MockFileSystem;

    fn integration_with(setup: impl FnOnce(&MockFileSystem)) -> FlaskIntegration {
        let fs = MockFileSystem::with_root(PathBuf::from("/project"));
        setup(&fs);
        FlaskIntegration::with_fs("/project", Arc::new(fs))
    }

    #[test]
    fn test_identity() {
        let integration = integration_with(|_| {});
        assert_eq!(integration.id(), "flask");
        assert_eq!(integration.name(), "Flask");
        assert_eq!(integration.framework(), FrameworkId::Flask);
        assert_eq!(integration.language(), BackendLanguage::Python);
    }

    #[test]
    fn test_detect_app_py() {
        let result =
            integration_with(|fs| fs.add_file("app.py", "from flask import Flask")).detect();
        assert!(result.detected);
        assert_eq!(result.confidence, ConfidenceLevel::Medium);
        assert!(result.has_indicator("app.py or application.py"));
    }

    #[test]
    fn test_detect_application_py() {
        let result = integration_with(|fs| fs.add_file("application.py", "")).detect();
        assert_eq!(result.confidence, ConfidenceLevel::Medium);
    }

    #[test]
    fn test_detect_requirements() {
        let result = integration_with(|fs| {
            fs.add_file("app.py", "from flask import Flask");
            fs.add_file("requirements.txt", "Flask==2.3.0");
        })
        .detect();

        assert!(result.detected);
        assert_eq!(result.confidence, ConfidenceLevel::High);
        assert_eq!(result.version.as_deref(), Some("2.3.0"));
    }

    #[test]
    fn test_detect_structure() {
        let result = integration_with(|fs| {
            fs.add_file("app.py", "from flask import Flask");
            fs.add_dir("templates");
        })
        .detect();

        assert_eq!(result.confidence, ConfidenceLevel::High);
        assert_eq!(
            result.indicators,
            vec![
                "app.py or application.py",
                "Flask structure (templates/ or static/)"
            ]
        );
    }

    #[test]
    fn test_detect_structure_alone_is_low() {
        let result = integration_with(|fs| fs.add_dir("static")).detect();
        assert!(result.detected);
        assert_eq!(result.confidence, ConfidenceLevel::Low);
    }

    #[test]
    fn test_detect_no_flask() {
        let result = integration_with(|fs| fs.add_file("README.md", "# hello")).detect();
        assert!(!result.detected);
        assert_eq!(result.confidence, ConfidenceLevel::Low);
    }

    #[test]
    fn test_service_worker_routes() {
        let config = integration_with(|_| {}).generate_service_worker_config();
        assert_eq!(config.patterns(), vec!["/static/**", "/api/**", "/admin/**"]);
        assert_eq!(
            config.resolve("/static/app.js").map(|r| r.handler),
            Some(CacheHandler::CacheFirst)
        );
    }

    #[test]
    fn test_validate_missing_entry_is_warning() {
        let report = integration_with(|_| {}).validate_setup();
        assert!(report.is_valid());
        assert_eq!(report.warnings(), &["app.py or application.py not found"]);
        assert_eq!(
            report.suggestions(),
            &["Create a static/ directory to serve PWA assets"]
        );
    }

    #[test]
    fn test_validate_entry_without_app_instance() {
        let report = integration_with(|fs| {
            fs.add_file("application.py", "import os\n");
            fs.add_dir("static");
        })
        .validate_setup();

        assert_eq!(
            report.warnings(),
            &["Flask application instance not found in application.py"]
        );
        assert!(report.suggestions().is_empty());
    }

    #[test]
    fn test_validate_complete_setup() {
        let report = integration_with(|fs| {
            fs.add_file("app.py", "app = Flask(__name__)\n");
            fs.add_dir("static");
        })
        .validate_setup();

        assert!(report.is_valid());
        assert!(report.warnings().is_empty());
    }
}
