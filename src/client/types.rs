//! Response bodies of the remote generation service

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// `POST /api/scan`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    #[serde(default)]
    pub framework: Map<String, Value>,
    #[serde(default)]
    pub features: HashMap<String, bool>,
    #[serde(default)]
    pub assets: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub routes: Vec<Map<String, Value>>,
    #[serde(default)]
    pub errors: Vec<Map<String, Value>>,
}

impl ScanResult {
    /// Framework name reported by the service, if any
    pub fn framework_name(&self) -> Option<&str> {
        self.framework.get("name").and_then(Value::as_str)
    }

    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.get(feature).copied().unwrap_or(false)
    }
}

/// `POST /api/generate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub success: bool,
    #[serde(default)]
    pub manifest: Map<String, Value>,
    /// Generated Service Worker source
    #[serde(default)]
    pub service_worker: String,
    #[serde(default)]
    pub icons: Vec<Map<String, Value>>,
    #[serde(default)]
    pub splash_screens: Vec<Map<String, Value>>,
    #[serde(default)]
    pub files: Vec<Map<String, Value>>,
    #[serde(default)]
    pub stats: Map<String, Value>,
}

/// `POST /api/validate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub score: f64,
    #[serde(default)]
    pub errors: Vec<Map<String, Value>>,
    #[serde(default)]
    pub warnings: Vec<Map<String, Value>>,
    #[serde(default)]
    pub suggestions: Vec<Map<String, Value>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scan_result_defaults() {
        let result: ScanResult = serde_json::from_value(json!({
            "framework": {"name": "django", "confidence": "high"},
            "features": {"hasManifest": false, "hasServiceWorker": true}
        }))
        .unwrap();

        assert_eq!(result.framework_name(), Some("django"));
        assert!(result.has_feature("hasServiceWorker"));
        assert!(!result.has_feature("hasManifest"));
        assert!(!result.has_feature("unknown"));
        assert!(result.assets.is_empty());
        assert!(result.routes.is_empty());
    }

    #[test]
    fn test_generation_result_requires_success() {
        let err = serde_json::from_value::<GenerationResult>(json!({"manifest": {}}));
        assert!(err.is_err());

        let result: GenerationResult = serde_json::from_value(json!({
            "success": true,
            "manifest": {"name": "My App"},
            "service_worker": "self.addEventListener('fetch', () => {});"
        }))
        .unwrap();
        assert!(result.success);
        assert_eq!(result.manifest["name"], "My App");
        assert!(result.icons.is_empty());
        assert!(result.stats.is_empty());
    }

    #[test]
    fn test_validation_result() {
        let result: ValidationResult = serde_json::from_value(json!({
            "valid": false,
            "score": 42.5,
            "errors": [{"code": "NO_MANIFEST", "message": "manifest.json missing"}]
        }))
        .unwrap();

        assert!(!result.valid);
        assert_eq!(result.score, 42.5);
        assert_eq!(result.errors[0]["code"], "NO_MANIFEST");
        assert!(result.warnings.is_empty());
    }
}
