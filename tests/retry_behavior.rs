//! Retry behavior tests: attempt accounting, strategy opt-out, and 404
//! suppression end-to-end through the default HTTP transport.

use refetch::config::TransportConfig;
use refetch::{FetcherConfig, HttpTransport, ResourceCache, ResourceCoordinator};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

mod common;
use common::{start_json_backend, ScriptedTransport};

fn quick_retry_config(max_retries: u32) -> FetcherConfig {
    let mut config = FetcherConfig::default();
    config.retry.max_retries = max_retries;
    config.retry.base_delay_ms = 10;
    config.retry.max_delay_ms = 50;
    config
}

fn build(
    transport: Arc<dyn refetch::Transport>,
    config: &FetcherConfig,
    url: &str,
) -> ResourceCoordinator<Value> {
    ResourceCoordinator::new(
        "resource",
        url,
        config,
        ResourceCache::new(config.cache.ttl()),
        transport,
    )
    .unwrap()
}

#[tokio::test]
async fn test_exhausted_retries_surface_final_error() {
    // Three distinct failures so the surfaced error is provably the last.
    let transport = ScriptedTransport::new(|call| {
        Box::pin(async move {
            Err(refetch::FetchError::Status {
                status: 500 + call as u16,
            })
        })
    });
    let config = quick_retry_config(2);
    let coordinator = build(transport.clone(), &config, "http://localhost/r");

    coordinator.fetch(true).await;

    assert_eq!(transport.calls(), 3);
    let state = coordinator.state();
    assert_eq!(state.error.as_ref().and_then(|e| e.status()), Some(502));
    assert!(state.data.is_none());
    assert!(!state.is_validating);
}

#[tokio::test]
async fn test_zero_delay_strategy_means_single_attempt() {
    let transport = ScriptedTransport::new(|_| {
        Box::pin(async { Err(refetch::FetchError::Status { status: 500 }) })
    });
    let config = quick_retry_config(3);
    let coordinator = build(transport.clone(), &config, "http://localhost/r")
        .with_retry_strategy(Arc::new(|_, _| Duration::ZERO));

    coordinator.fetch(true).await;

    assert_eq!(transport.calls(), 1);
    // The original error propagated unchanged.
    assert_eq!(
        coordinator.state().error.as_ref().and_then(|e| e.status()),
        Some(500)
    );
}

#[tokio::test]
async fn test_recovers_after_transient_server_errors() {
    let backend_addr: SocketAddr = "127.0.0.1:29331".parse().unwrap();
    start_json_backend(backend_addr, |call| async move {
        if call < 2 {
            (503, "{\"error\":\"unavailable\"}".to_string())
        } else {
            (200, "{\"ok\":true}".to_string())
        }
    })
    .await;

    let config = quick_retry_config(3);
    let transport = Arc::new(HttpTransport::new(&TransportConfig::default()).unwrap());
    let coordinator = build(
        transport,
        &config,
        &format!("http://{}/resource", backend_addr),
    );

    coordinator.fetch(true).await;

    let state = coordinator.state();
    assert_eq!(state.data, Some(json!({ "ok": true })));
    assert!(state.error.is_none());
}

#[tokio::test]
async fn test_not_found_is_never_retried() {
    let backend_addr: SocketAddr = "127.0.0.1:29332".parse().unwrap();
    start_json_backend(backend_addr, |_| async move {
        (404, "{\"error\":\"missing\"}".to_string())
    })
    .await;

    let hits = Arc::new(std::sync::atomic::AtomicU32::new(0));
    let on_error_hits = hits.clone();

    let config = quick_retry_config(5);
    let transport = Arc::new(HttpTransport::new(&TransportConfig::default()).unwrap());
    let coordinator = build(
        transport,
        &config,
        &format!("http://{}/resource", backend_addr),
    )
    .with_on_error(move |_| {
        on_error_hits.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    });

    let started = std::time::Instant::now();
    coordinator.fetch(true).await;

    // A permanent 404 settles on the first attempt: no backoff waits.
    assert!(started.elapsed() < Duration::from_millis(500));
    let state = coordinator.state();
    assert_eq!(state.error.as_ref().and_then(|e| e.status()), Some(404));
    assert_eq!(hits.load(std::sync::atomic::Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_backoff_delays_pace_the_attempts() {
    let transport = ScriptedTransport::new(|call| {
        Box::pin(async move {
            if call < 2 {
                Err(refetch::FetchError::Status { status: 503 })
            } else {
                Ok(json!("recovered"))
            }
        })
    });
    let mut config = quick_retry_config(3);
    config.retry.base_delay_ms = 40;
    config.retry.max_delay_ms = 200;
    let coordinator = build(transport.clone(), &config, "http://localhost/r");

    let started = std::time::Instant::now();
    coordinator.fetch(true).await;

    // Two backoff waits: 40 * 2^1 + 40 * 2^2 = 240ms at minimum.
    assert!(started.elapsed() >= Duration::from_millis(200));
    assert_eq!(transport.calls(), 3);
    assert_eq!(coordinator.state().data, Some(json!("recovered")));
}

#[tokio::test]
async fn test_error_state_recovers_on_next_success() {
    let transport = ScriptedTransport::new(|call| {
        Box::pin(async move {
            if call == 0 {
                Err(refetch::FetchError::Status { status: 500 })
            } else {
                Ok(json!("healed"))
            }
        })
    });
    let config = quick_retry_config(0);
    let coordinator = build(transport.clone(), &config, "http://localhost/r");

    coordinator.fetch(true).await;
    assert!(coordinator.state().error.is_some());

    coordinator.fetch(true).await;
    let state = coordinator.state();
    assert_eq!(state.data, Some(json!("healed")));
    assert!(state.error.is_none());
}
