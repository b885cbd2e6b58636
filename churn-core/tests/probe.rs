//! Integration Test: Connectivity probe bounds

use std::time::{Duration, Instant};

use churn_core::{ClientConfig, ConnectivityProber};
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn prober_for(base: &str, timeout_ms: u64) -> ConnectivityProber {
    let mut config = ClientConfig::with_api_base(base);
    config.probe_timeout_ms = timeout_ms;
    ConnectivityProber::new(&config).unwrap()
}

/// Accepts connections and never writes a byte
async fn silent_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_probe_healthy_service() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = prober_for(&server.uri(), 3000).probe().await;
    assert!(outcome.reachable);
    assert!(outcome.reason.is_none());
}

#[tokio::test]
async fn test_probe_non_success_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let outcome = prober_for(&server.uri(), 3000).probe().await;
    assert!(!outcome.reachable);
    assert!(outcome.reason.unwrap().contains("503"));
}

#[tokio::test]
async fn test_probe_no_listener() {
    // Grab a free port, then close it
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };

    let started = Instant::now();
    let outcome = prober_for(&format!("http://{}", addr), 3000).probe().await;

    assert!(!outcome.reachable);
    assert!(started.elapsed() < Duration::from_millis(3500));
}

#[tokio::test]
async fn test_probe_hanging_server_respects_short_bound() {
    let base = silent_server().await;

    let started = Instant::now();
    let outcome = prober_for(&base, 300).probe().await;

    assert!(!outcome.reachable);
    assert!(started.elapsed() < Duration::from_millis(1500));
}

#[tokio::test]
async fn test_probe_hanging_server_default_bound() {
    let base = silent_server().await;

    let started = Instant::now();
    let outcome = prober_for(&base, 3000).probe().await;
    let elapsed = started.elapsed();

    assert!(!outcome.reachable);
    assert!(elapsed >= Duration::from_millis(2900), "gave up early: {:?}", elapsed);
    assert!(elapsed < Duration::from_millis(3500), "exceeded bound: {:?}", elapsed);
}

#[tokio::test]
async fn test_probe_slow_health_is_unreachable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let started = Instant::now();
    let outcome = prober_for(&server.uri(), 200).probe().await;

    assert!(!outcome.reachable);
    assert!(started.elapsed() < Duration::from_secs(2));
}
