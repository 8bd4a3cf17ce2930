//! Backend framework detection
//!
//! Detection is built from three pieces shared by every backend integration:
//!
//! - [`ProjectScanner`]: read-only checks for marker files, directories and
//!   dependency manifests under a fixed project root
//! - [`EvidenceCollector`]: accumulates evidence labels and escalates a
//!   [`ConfidenceLevel`] (LOW → MEDIUM → HIGH) as primary and corroborating
//!   signals are recorded
//! - [`extract_version`]: pulls a normalized `major.minor.patch` version for a
//!   package out of a dependency manifest
//!
//! Detection is best-effort and never fails: a check that cannot be completed
//! counts as an absent signal.

pub mod confidence;
pub mod evidence;
pub mod types;
pub mod version;

pub use confidence::{ConfidenceLevel, EvidenceCollector};
pub use evidence::ProjectScanner;
pub use types::DetectionResult;
pub use version::extract_version;
