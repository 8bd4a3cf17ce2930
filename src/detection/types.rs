use super::ConfidenceLevel;
use serde::{Deserialize, Serialize};

/// Outcome of one `detect()` run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionResult {
    /// True iff at least one indicator was found
    pub detected: bool,
    pub confidence: ConfidenceLevel,
    /// Evidence labels in check order
    pub indicators: Vec<String>,
    /// Normalized `major.minor.patch` version, if one was found
    pub version: Option<String>,
}

impl DetectionResult {
    pub fn new(
        confidence: ConfidenceLevel,
        indicators: Vec<String>,
        version: Option<String>,
    ) -> Self {
        Self {
            detected: !indicators.is_empty(),
            confidence,
            indicators,
            version,
        }
    }

    pub fn not_detected() -> Self {
        Self::new(ConfidenceLevel::Low, Vec::new(), None)
    }

    pub fn has_indicator(&self, label: &str) -> bool {
        self.indicators.iter().any(|i| i == label)
    }
}
