// src/probe/mod.rs

//! TCP readiness probing.
//!
//! [`wait_until_ready`] blocks the boot sequence until the dependency
//! accepts a TCP connection. Connection attempts go through the [`Dialer`]
//! trait so tests can script reachability instead of binding sockets.
//!
//! The retry policy is explicit: a bounded number of attempts is the
//! default, and `max_attempts = 0` in the config restores the legacy
//! retry-forever behaviour.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use tokio::net::TcpStream;
use tracing::{debug, info};

use crate::config::ProbeSection;
use crate::dsn::Endpoint;
use crate::errors::{PreflightError, Result};

/// Trait abstracting a single connection attempt.
///
/// Production code uses [`TcpDialer`]; tests can provide an implementation
/// that fails a scripted number of times before succeeding.
pub trait Dialer: Send + Sync {
    fn dial(
        &self,
        endpoint: &Endpoint,
    ) -> Pin<Box<dyn Future<Output = std::io::Result<()>> + Send + '_>>;
}

/// Real dialer used in production: a raw `tokio` TCP connect.
#[derive(Debug, Clone, Default)]
pub struct TcpDialer;

impl Dialer for TcpDialer {
    fn dial(
        &self,
        endpoint: &Endpoint,
    ) -> Pin<Box<dyn Future<Output = std::io::Result<()>> + Send + '_>> {
        let addr = (endpoint.host.clone(), endpoint.port);

        Box::pin(async move {
            // Connect and immediately drop the stream; reachability is all
            // we need to know.
            TcpStream::connect(addr).await.map(|_| ())
        })
    }
}

/// How long and how often to retry the connect attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Delay between attempts.
    pub interval: Duration,
    /// `Some(n)`: give up after `n` attempts. `None`: retry forever.
    pub max_attempts: Option<u32>,
}

impl From<&ProbeSection> for RetryPolicy {
    fn from(probe: &ProbeSection) -> Self {
        Self {
            interval: Duration::from_millis(probe.interval_ms),
            max_attempts: (probe.max_attempts > 0).then_some(probe.max_attempts),
        }
    }
}

/// Block until the endpoint accepts a TCP connection.
///
/// Returns the number of attempts it took. When the policy bounds the wait
/// and the limit is exhausted, returns
/// [`PreflightError::DependencyUnavailable`].
pub async fn wait_until_ready(
    dialer: &dyn Dialer,
    endpoint: &Endpoint,
    policy: &RetryPolicy,
) -> Result<u32> {
    info!(
        host = %endpoint.host,
        port = endpoint.port,
        "waiting for dependency to accept connections"
    );

    let mut attempts: u32 = 0;
    loop {
        attempts += 1;

        match dialer.dial(endpoint).await {
            Ok(()) => {
                info!(
                    host = %endpoint.host,
                    port = endpoint.port,
                    attempts,
                    "dependency is ready"
                );
                return Ok(attempts);
            }
            Err(err) => {
                debug!(
                    host = %endpoint.host,
                    port = endpoint.port,
                    attempts,
                    error = %err,
                    "connect attempt failed"
                );

                if let Some(max) = policy.max_attempts {
                    if attempts >= max {
                        return Err(PreflightError::DependencyUnavailable {
                            host: endpoint.host.clone(),
                            port: endpoint.port,
                            attempts,
                        });
                    }
                }

                tokio::time::sleep(policy.interval).await;
            }
        }
    }
}
