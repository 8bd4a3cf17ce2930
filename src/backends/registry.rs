use super::{
    BackendIntegration, DjangoIntegration, FastApiIntegration, FlaskIntegration, FrameworkId,
};
use crate::config::PwaConfig;
use crate::detection::DetectionResult;
use crate::error::PwaError;
use crate::fs::{FileSystem, RealFileSystem};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Local integrations for one project, in registration order
pub struct IntegrationRegistry {
    root: PathBuf,
    integrations: Vec<Box<dyn BackendIntegration>>,
}

impl IntegrationRegistry {
    /// Every local integration bound to `root`, reading the real file system
    pub fn for_project(root: impl Into<PathBuf>) -> Self {
        Self::with_fs(root, Arc::new(RealFileSystem))
    }

    pub fn with_fs(root: impl Into<PathBuf>, fs: Arc<dyn FileSystem>) -> Self {
        let root = root.into();
        let mut integrations: Vec<Box<dyn BackendIntegration>> = Vec::new();

        for id in FrameworkId::all_variants() {
            let integration: Box<dyn BackendIntegration> = match id {
                FrameworkId::Django => Box::new(DjangoIntegration::with_fs(&root, fs.clone())),
                FrameworkId::Flask => Box::new(FlaskIntegration::with_fs(&root, fs.clone())),
                FrameworkId::FastApi => Box::new(FastApiIntegration::with_fs(&root, fs.clone())),
                _ => continue,
            };
            integrations.push(integration);
        }

        Self { root, integrations }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn get(&self, id: FrameworkId) -> Option<&dyn BackendIntegration> {
        self.integrations
            .iter()
            .find(|i| i.framework() == id)
            .map(|i| i.as_ref())
    }

    /// Lookup by backend id or display name, case-insensitive
    pub fn get_by_id(&self, id: &str) -> Option<&dyn BackendIntegration> {
        FrameworkId::from_name(id).and_then(|id| self.get(id))
    }

    pub fn all(&self) -> impl Iterator<Item = &dyn BackendIntegration> {
        self.integrations.iter().map(|i| i.as_ref())
    }

    /// Detection results for every integration, in registration order
    pub fn detect_all(&self) -> Vec<(FrameworkId, DetectionResult)> {
        self.integrations
            .iter()
            .map(|i| (i.framework(), i.detect()))
            .collect()
    }

    /// Highest-confidence detected integration. Ties go to the one
    /// registered first.
    pub fn detect_best(&self) -> Option<(&dyn BackendIntegration, DetectionResult)> {
        let mut best: Option<(&dyn BackendIntegration, DetectionResult)> = None;

        for integration in &self.integrations {
            let result = integration.detect();
            if !result.detected {
                continue;
            }

            debug!(
                framework = %integration.framework(),
                confidence = %result.confidence,
                "Backend candidate"
            );

            let better = match &best {
                Some((_, current)) => result.confidence > current.confidence,
                None => true,
            };
            if better {
                best = Some((integration.as_ref(), result));
            }
        }

        best
    }

    /// Integration for a configured project.
    ///
    /// An explicit `backend` wins over auto-detection. A backend accepted by
    /// the configuration but without a local integration fails with
    /// [`PwaError::UnsupportedBackend`]; no detected backend (or auto-detect
    /// disabled with nothing configured) fails with
    /// [`PwaError::FrameworkNotDetected`].
    pub fn select(&self, config: &PwaConfig) -> Result<&dyn BackendIntegration, PwaError> {
        if let Some(backend) = &config.backend {
            return self
                .get_by_id(backend)
                .ok_or_else(|| PwaError::UnsupportedBackend(backend.clone()));
        }

        if config.auto_detect_backend {
            if let Some((integration, result)) = self.detect_best() {
                info!(
                    framework = %integration.framework(),
                    confidence = %result.confidence,
                    version = ?result.version,
                    "Detected backend"
                );
                return Ok(integration);
            }
        }

        Err(PwaError::FrameworkNotDetected(self.root.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::ConfidenceLevel;
    use crate::fs::MockFileSystem;

    fn registry_with(setup: impl FnOnce(&MockFileSystem)) -> IntegrationRegistry {
        let fs = MockFileSystem::with_root(PathBuf::from("/project"));
        setup(&fs);
        IntegrationRegistry::with_fs("/project", Arc::new(fs))
    }

    #[test]
    fn test_registration_order() {
        let registry = registry_with(|_| {});
        let ids: Vec<_> = registry.all().map(|i| i.id()).collect();
        assert_eq!(ids, vec!["django", "flask", "fastapi"]);
    }

    #[test]
    fn test_get_by_id() {
        let registry = registry_with(|_| {});
        assert_eq!(registry.get_by_id("FastAPI").map(|i| i.id()), Some("fastapi"));
        assert_eq!(
            registry.get(FrameworkId::Django).map(|i| i.name()),
            Some("Django")
        );
        assert!(registry.get_by_id("laravel").is_none());
        assert!(registry.get_by_id("rails").is_none());
    }

    #[test]
    fn test_detect_all_empty_project() {
        let results = registry_with(|_| {}).detect_all();
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|(_, r)| !r.detected));
    }

    #[test]
    fn test_detect_best_prefers_higher_confidence() {
        // main.py alone is MEDIUM for FastAPI; Flask gets HIGH from app.py + requirements
        let registry = registry_with(|fs| {
            fs.add_file("main.py", "");
            fs.add_file("app.py", "app = Flask(__name__)");
            fs.add_file("requirements.txt", "Flask==2.3.0\n");
        });

        let (integration, result) = registry.detect_best().unwrap();
        assert_eq!(integration.framework(), FrameworkId::Flask);
        assert_eq!(result.confidence, ConfidenceLevel::High);
    }

    #[test]
    fn test_detect_best_tie_goes_to_first_registered() {
        let registry = registry_with(|fs| {
            fs.add_file("manage.py", "");
            fs.add_file("app.py", "");
        });

        let (integration, result) = registry.detect_best().unwrap();
        assert_eq!(integration.framework(), FrameworkId::Django);
        assert_eq!(result.confidence, ConfidenceLevel::Medium);
    }

    #[test]
    fn test_select_explicit_backend() {
        let registry = registry_with(|fs| fs.add_file("manage.py", ""));
        let mut config = PwaConfig::new("/project");
        config.backend = Some("fastapi".to_string());

        let integration = registry.select(&config).unwrap();
        assert_eq!(integration.framework(), FrameworkId::FastApi);
    }

    #[test]
    fn test_select_backend_without_local_integration() {
        let registry = registry_with(|_| {});
        let mut config = PwaConfig::new("/project");
        config.backend = Some("symfony".to_string());

        let err = registry.select(&config).err().unwrap();
        assert!(matches!(err, PwaError::UnsupportedBackend(ref b) if b == "symfony"));
    }

    #[test]
    fn test_select_auto_detect() {
        let registry = registry_with(|fs| fs.add_file("app/main.py", "app = FastAPI()"));
        let config = PwaConfig::new("/project");

        let integration = registry.select(&config).unwrap();
        assert_eq!(integration.id(), "fastapi");
    }

    #[test]
    fn test_select_nothing_detected() {
        let registry = registry_with(|fs| fs.add_file("index.html", "<html></html>"));
        let err = registry.select(&PwaConfig::new("/project")).err().unwrap();
        assert!(matches!(err, PwaError::FrameworkNotDetected(_)));
    }

    #[test]
    fn test_select_auto_detect_disabled() {
        let registry = registry_with(|fs| fs.add_file("manage.py", ""));
        let mut config = PwaConfig::new("/project");
        config.auto_detect_backend = false;

        assert!(matches!(
            registry.select(&config),
            Err(PwaError::FrameworkNotDetected(_))
        ));
    }
}
