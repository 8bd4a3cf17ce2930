mod support;

use mockito::{Matcher, Server};
use serde_json::{json, Map};
use serial_test::serial;
use std::time::Duration;
use support::{fixture_path, scratch_project};
use universal_pwa::{
    ConfigError, FrameworkId, PwaConfig, PwaError, RetryPolicy, TransportError, UniversalPwaClient,
};

fn quick_retries() -> RetryPolicy {
    RetryPolicy {
        max_retries: 2,
        backoff_factor: Duration::from_millis(1),
    }
}

fn client(config: PwaConfig) -> UniversalPwaClient {
    UniversalPwaClient::new(config)
        .unwrap()
        .with_retry_policy(quick_retries())
}

#[test]
fn test_full_workflow_against_stub_service() {
    let project = fixture_path("flask-app");
    let mut server = Server::new();

    let scan = server
        .mock("POST", "/api/scan")
        .match_body(Matcher::PartialJson(json!({"autoDetectBackend": true})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "framework": {"name": "flask", "confidence": "high"},
                "features": {"hasServiceWorker": false},
                "assets": {"css": ["static/css/app.css"]},
                "routes": [{"path": "/"}]
            })
            .to_string(),
        )
        .create();

    let generate = server
        .mock("POST", "/api/generate")
        .match_body(Matcher::PartialJson(json!({
            "config": {"app_name": "Flask PWA", "timeout": 30}
        })))
        .with_status(200)
        .with_body(
            json!({
                "success": true,
                "manifest": {"name": "Flask PWA", "start_url": "/"},
                "service_worker": "self.skipWaiting();",
                "files": [{"path": "static/sw.js"}],
                "stats": {"duration_ms": 12}
            })
            .to_string(),
        )
        .create();

    let validate = server
        .mock("POST", "/api/validate")
        .with_status(200)
        .with_body(json!({"valid": true, "score": 96.0}).to_string())
        .create();

    let mut config = PwaConfig::new(&project);
    config.api_endpoint = format!("{}/", server.url());
    let client = client(config);

    let scanned = client.scan().unwrap();
    assert_eq!(scanned.framework_name(), Some("flask"));
    assert_eq!(scanned.assets["css"], vec!["static/css/app.css"]);

    let mut overrides = Map::new();
    overrides.insert("app_name".to_string(), json!("Flask PWA"));
    let generated = client.generate(Some(overrides)).unwrap();
    assert!(generated.success);
    assert_eq!(generated.files.len(), 1);

    let validated = client.validate().unwrap();
    assert!(validated.valid);
    assert_eq!(validated.score, 96.0);

    let backend = client.local_backend().unwrap();
    assert_eq!(backend.framework(), FrameworkId::Flask);

    scan.assert();
    generate.assert();
    validate.assert();
}

#[test]
fn test_retryable_status_exhausts_retries() {
    let project = scratch_project(&[]);
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/api/scan")
        .with_status(429)
        .with_body("slow down")
        .expect(3)
        .create();

    let mut config = PwaConfig::new(project.path());
    config.api_endpoint = server.url();

    let err = client(config).scan().unwrap_err();
    match err {
        PwaError::Scan(TransportError::Status { status, ref body }) => {
            assert_eq!(status, 429);
            assert_eq!(body, "slow down");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    mock.assert();
}

#[test]
fn test_unreachable_service() {
    let project = scratch_project(&[]);
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let mut config = PwaConfig::new(project.path());
    config.api_endpoint = format!("http://127.0.0.1:{}", port);

    let err = client(config).validate().unwrap_err();
    assert!(matches!(
        err,
        PwaError::Validation(TransportError::Unreachable { .. })
    ));
    assert!(err.to_string().contains("Cannot reach API"));
}

#[test]
fn test_silent_service_times_out() {
    let project = scratch_project(&[]);
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    let mut config = PwaConfig::new(project.path());
    config.api_endpoint = format!("http://127.0.0.1:{}", port);
    config.timeout = 1;

    let client = UniversalPwaClient::new(config)
        .unwrap()
        .with_retry_policy(RetryPolicy::none());

    let err = client.scan().unwrap_err();
    assert!(
        matches!(err, PwaError::Scan(TransportError::Timeout { seconds: 1, .. })),
        "unexpected error: {:?}",
        err
    );
    assert!(err.to_string().contains("timed out after 1s"));
    drop(listener);
}

#[test]
fn test_explicit_unsupported_backend() {
    let project = scratch_project(&[("composer.json", "{}")]);
    let mut config = PwaConfig::new(project.path());
    config.backend = Some("laravel".to_string());

    let client = UniversalPwaClient::new(config).unwrap();
    assert!(matches!(
        client.local_backend(),
        Err(PwaError::UnsupportedBackend(ref b)) if b == "laravel"
    ));
}

#[test]
fn test_rejects_unknown_backend_at_construction() {
    let project = scratch_project(&[]);
    let mut config = PwaConfig::new(project.path());
    config.backend = Some("rails".to_string());

    assert!(matches!(
        UniversalPwaClient::new(config),
        Err(PwaError::Config(ConfigError::InvalidBackend(_)))
    ));
}

#[test]
#[serial]
fn test_config_from_env_drives_client() {
    let project = fixture_path("django-app");
    std::env::set_var("UPWA_BACKEND", "FastAPI");
    std::env::set_var("UPWA_TIMEOUT", "5");

    let config = PwaConfig::from_env(&project);

    std::env::remove_var("UPWA_BACKEND");
    std::env::remove_var("UPWA_TIMEOUT");

    let config = config.unwrap();
    assert_eq!(config.timeout, 5);

    let client = UniversalPwaClient::new(config).unwrap();
    assert_eq!(
        client.local_backend().unwrap().framework(),
        FrameworkId::FastApi
    );
}
