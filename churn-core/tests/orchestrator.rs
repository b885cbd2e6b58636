//! Integration Test: Mode selection and dual-path dispatch

use std::time::Duration;

use churn_core::api::commands;
use churn_core::logic::model::Source;
use churn_core::{
    ClientConfig, CustomerRecord, InferenceError, ModeTransition, OperatingMode, Orchestrator, Plan,
    Region, SimulatedLatency,
};
use serde_json::json;
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(base: &str) -> ClientConfig {
    let mut config = ClientConfig::with_api_base(base);
    config.probe_timeout_ms = 500;
    config.simulated_latency = false;
    config
}

async fn dead_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    format!("http://{}", listener.local_addr().unwrap())
}

fn record() -> CustomerRecord {
    CustomerRecord {
        age: 52,
        tenure_months: 3,
        monthly_spend: 49.0,
        support_tickets_last_90d: 8,
        plan: Plan::Basic,
        region: Region::Latam,
    }
}

async fn mount_health(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_startup_reachable_selects_remote() {
    let server = MockServer::start().await;
    mount_health(&server).await;

    let session = Orchestrator::connect(&config_for(&server.uri())).await.unwrap();
    assert_eq!(session.mode(), OperatingMode::Remote);
}

#[tokio::test]
async fn test_startup_unreachable_selects_local() {
    let base = dead_address().await;

    let session = Orchestrator::connect(&config_for(&base)).await.unwrap();
    assert_eq!(session.mode(), OperatingMode::Local);

    // Local path answers without any service
    let predictions = session.predict(&[record()]).await.unwrap();
    assert_eq!(predictions[0].label, 1);
    let explanation = session.explain().await.unwrap();
    assert_eq!(explanation.method, "demo_logreg_coefficients");
    assert_eq!(session.health().await.unwrap().source, Source::Local);
}

#[tokio::test]
async fn test_remote_failure_does_not_flip_mode() {
    let server = MockServer::start().await;
    mount_health(&server).await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "boom"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/train"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let session = Orchestrator::connect(&config_for(&server.uri())).await.unwrap();

    let err = session.predict(&[record()]).await.unwrap_err();
    assert_eq!(
        err,
        InferenceError::RemoteRejected { status: Some(500), message: "boom".to_string() }
    );
    assert_eq!(session.mode(), OperatingMode::Remote);

    let err = session.train("demo", "churn", 0.2).await.unwrap_err();
    assert_eq!(err.to_string(), "API error 503");
    assert_eq!(session.mode(), OperatingMode::Remote);
}

#[tokio::test]
async fn test_remote_outage_mid_session_keeps_remote() {
    // Session started REMOTE, service has since gone away
    let base = dead_address().await;
    let session = Orchestrator::with_mode(&config_for(&base), OperatingMode::Remote).unwrap();

    let err = session.explain().await.unwrap_err();
    assert!(err.is_network());
    assert_eq!(session.mode(), OperatingMode::Remote);
}

#[tokio::test]
async fn test_remote_results_pass_through() {
    let server = MockServer::start().await;
    mount_health(&server).await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "predictions": [{"label": 0, "probability": 0.12}]
        })))
        .mount(&server)
        .await;

    let session = Orchestrator::connect(&config_for(&server.uri())).await.unwrap();
    let predictions = session.predict(&[record()]).await.unwrap();

    // The remote answer wins over the local model's label 1
    assert_eq!(predictions[0].label, 0);
    assert_eq!(predictions[0].probability, 0.12);
}

#[tokio::test]
async fn test_reconnect_moves_local_to_remote() {
    let server = MockServer::start().await;
    let session =
        Orchestrator::with_mode(&config_for(&server.uri()), OperatingMode::Local).unwrap();
    let mut rx = session.subscribe();

    // Still down: stays LOCAL
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    let transition = session.reconnect().await;
    assert_eq!(transition, ModeTransition::Unchanged { mode: OperatingMode::Local });

    // Back up: goes REMOTE and signals the consumer
    mount_health(&server).await;
    let outcome = commands::reconnect(&session).await;
    assert_eq!(outcome.mode, OperatingMode::Remote);
    assert!(outcome.discard_local_results);
    assert!(rx.has_changed().unwrap());
    assert_eq!(*rx.borrow_and_update(), OperatingMode::Remote);
}

#[tokio::test]
async fn test_concurrent_local_operations() {
    let base = dead_address().await;
    let session = Orchestrator::with_mode(&config_for(&base), OperatingMode::Local)
        .unwrap()
        .with_latency(SimulatedLatency {
            train: Duration::from_millis(50),
            predict: Duration::from_millis(50),
            explain: Duration::from_millis(50),
        });

    let records = [record()];
    let (train, predict, explain) = tokio::join!(
        session.train("demo", "churn", 0.2),
        session.predict(&records),
        session.explain(),
    );

    assert_eq!(train.unwrap().metric("f1"), Some(0.8745));
    assert_eq!(predict.unwrap().len(), 1);
    assert_eq!(explain.unwrap().top_features.len(), 8);
}

#[tokio::test(start_paused = true)]
async fn test_local_latency_is_applied() {
    let session = Orchestrator::with_mode(&ClientConfig::default(), OperatingMode::Local)
        .unwrap()
        .with_latency(SimulatedLatency::default());

    let started = tokio::time::Instant::now();
    session.train("demo", "churn", 0.2).await.unwrap();
    assert!(started.elapsed() >= Duration::from_millis(1000));

    let started = tokio::time::Instant::now();
    session.explain().await.unwrap();
    assert!(started.elapsed() >= Duration::from_millis(600));
}
