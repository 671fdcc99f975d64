// tests/probe_retry.rs

mod common;
use crate::common::init_tracing;

use std::time::Duration;

use preflight::config::ProbeSection;
use preflight::dsn::Endpoint;
use preflight::errors::PreflightError;
use preflight::probe::{wait_until_ready, RetryPolicy, TcpDialer};
use preflight_test_utils::fake_dialer::FlakyDialer;

fn test_endpoint() -> Endpoint {
    Endpoint {
        host: "db".to_string(),
        port: 5432,
    }
}

fn fast_policy(max_attempts: Option<u32>) -> RetryPolicy {
    RetryPolicy {
        interval: Duration::from_millis(1),
        max_attempts,
    }
}

#[tokio::test]
async fn succeeds_after_scripted_failures() {
    init_tracing();

    let dialer = FlakyDialer::new(2);
    let attempts = wait_until_ready(&dialer, &test_endpoint(), &fast_policy(Some(10)))
        .await
        .unwrap();

    assert_eq!(attempts, 3);
    assert_eq!(dialer.attempts(), 3);
}

#[tokio::test]
async fn first_attempt_success_returns_immediately() {
    init_tracing();

    let dialer = FlakyDialer::new(0);
    let attempts = wait_until_ready(&dialer, &test_endpoint(), &fast_policy(Some(10)))
        .await
        .unwrap();

    assert_eq!(attempts, 1);
}

#[tokio::test]
async fn exhaustion_yields_dependency_unavailable() {
    init_tracing();

    let dialer = FlakyDialer::never();
    let result = wait_until_ready(&dialer, &test_endpoint(), &fast_policy(Some(5))).await;

    match result {
        Err(PreflightError::DependencyUnavailable {
            host,
            port,
            attempts,
        }) => {
            assert_eq!(host, "db");
            assert_eq!(port, 5432);
            assert_eq!(attempts, 5);
        }
        other => panic!("Expected DependencyUnavailable, got: {:?}", other),
    }

    assert_eq!(dialer.attempts(), 5);
}

#[tokio::test]
async fn real_tcp_dialer_reaches_local_listener() {
    init_tracing();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let endpoint = Endpoint {
        host: "127.0.0.1".to_string(),
        port,
    };

    let attempts = wait_until_ready(&TcpDialer, &endpoint, &fast_policy(Some(3)))
        .await
        .unwrap();

    assert_eq!(attempts, 1);
    drop(listener);
}

#[test]
fn zero_max_attempts_means_unbounded_policy() {
    let probe = ProbeSection {
        max_attempts: 0,
        ..ProbeSection::default()
    };
    let policy = RetryPolicy::from(&probe);
    assert_eq!(policy.max_attempts, None);

    let probe = ProbeSection::default();
    let policy = RetryPolicy::from(&probe);
    assert_eq!(policy.max_attempts, Some(120));
    assert_eq!(policy.interval, Duration::from_millis(500));
}
