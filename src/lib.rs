//! universal-pwa - backend detection and Service Worker configuration for PWAs
//!
//! This library looks at a web project on disk, works out which backend
//! framework it uses and how confident that guess is, and derives a
//! framework-tailored Service Worker caching policy, manifest variables and a
//! setup validation report. A blocking client talks to the remote generation
//! service that turns this into actual PWA files.
//!
//! # Core Concepts
//!
//! - **Evidence**: labelled signals (marker files, directories, dependency
//!   manifest mentions) collected while scanning a project
//! - **Confidence**: LOW, MEDIUM or HIGH; a primary marker raises LOW to MEDIUM,
//!   a corroborating signal raises MEDIUM to HIGH
//! - **Backend integration**: one implementation of [`BackendIntegration`] per
//!   framework (Django, Flask, FastAPI), bound to a project root
//!
//! # Example Usage
//!
//! ```no_run
//! use universal_pwa::{BackendIntegration, IntegrationRegistry};
//!
//! let registry = IntegrationRegistry::for_project("/path/to/project");
//! if let Some((backend, result)) = registry.detect_best() {
//!     println!("{} ({}) {:?}", backend.name(), result.confidence, result.indicators);
//!
//!     for rule in backend.generate_service_worker_config().runtime_caching {
//!         println!("{} -> {:?}", rule.url_pattern, rule.handler);
//!     }
//!
//!     let report = backend.validate_setup();
//!     println!("valid: {}", report.is_valid());
//! }
//! ```
//!
//! # Project Structure
//!
//! - [`fs`]: file system abstraction with real and in-memory implementations
//! - [`detection`]: evidence scanning, confidence model, version extraction
//! - [`backends`]: framework integrations and their registry
//! - [`client`]: remote generation service client
//! - [`config`]: client configuration
//! - [`error`]: error taxonomy

pub mod backends;
pub mod client;
pub mod config;
pub mod detection;
pub mod error;
pub mod fs;
pub mod util;

pub use backends::{
    BackendIntegration, BackendLanguage, CacheHandler, DjangoIntegration, FastApiIntegration,
    FlaskIntegration, FrameworkId, IntegrationRegistry, ManifestVariables, MiddlewareInjection,
    RuntimeCachingRule, ServiceWorkerConfig, ValidationReport,
};
pub use client::{
    GenerationResult, HttpClient, RetryPolicy, ScanResult, UniversalPwaClient, ValidationResult,
};
pub use config::{CachingStrategy, ConfigError, PwaConfig};
pub use detection::{extract_version, ConfidenceLevel, DetectionResult, ProjectScanner};
pub use error::{EvidenceError, PwaError, TransportError};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
