//! Confidence model for detection runs

use super::DetectionResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse strength of a detection, ordered LOW < MEDIUM < HIGH
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    /// Level after a primary marker is seen: LOW rises to MEDIUM
    pub fn after_primary(self) -> Self {
        match self {
            ConfidenceLevel::Low => ConfidenceLevel::Medium,
            other => other,
        }
    }

    /// Level after a corroborating signal is seen.
    ///
    /// Only MEDIUM rises (to HIGH). A corroborating signal seen while still LOW
    /// leaves the level at LOW, even if a primary marker shows up later.
    pub fn after_corroborating(self) -> Self {
        match self {
            ConfidenceLevel::Medium => ConfidenceLevel::High,
            other => other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLevel::Low => "low",
            ConfidenceLevel::Medium => "medium",
            ConfidenceLevel::High => "high",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accumulates evidence for one detection run.
///
/// Indicators keep the order in which checks were recorded. Confidence only
/// ever moves up, one step per recorded signal.
#[derive(Debug, Default)]
pub struct EvidenceCollector {
    indicators: Vec<String>,
    confidence: ConfidenceLevel,
}

impl EvidenceCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn primary(&mut self, label: impl Into<String>) {
        self.indicators.push(label.into());
        self.confidence = self.confidence.after_primary();
    }

    pub fn corroborating(&mut self, label: impl Into<String>) {
        self.indicators.push(label.into());
        self.confidence = self.confidence.after_corroborating();
    }

    pub fn confidence(&self) -> ConfidenceLevel {
        self.confidence
    }

    pub fn indicators(&self) -> &[String] {
        &self.indicators
    }

    pub fn finish(self, version: Option<String>) -> DetectionResult {
        DetectionResult::new(self.confidence, self.indicators, version)
    }
}
