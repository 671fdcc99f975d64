use std::future::Future;
use std::io;
use std::pin::Pin;
use std::sync::atomic::{AtomicU32, Ordering};

use preflight::dsn::Endpoint;
use preflight::probe::Dialer;

/// A dialer that refuses a scripted number of connection attempts before
/// succeeding. `FlakyDialer::never()` refuses forever, for exhaustion
/// tests.
#[derive(Debug)]
pub struct FlakyDialer {
    failures_before_success: u32,
    attempts: AtomicU32,
}

impl FlakyDialer {
    pub fn new(failures_before_success: u32) -> Self {
        Self {
            failures_before_success,
            attempts: AtomicU32::new(0),
        }
    }

    pub fn never() -> Self {
        Self::new(u32::MAX)
    }

    /// How many dial attempts have been made so far.
    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl Dialer for FlakyDialer {
    fn dial(
        &self,
        _endpoint: &Endpoint,
    ) -> Pin<Box<dyn Future<Output = io::Result<()>> + Send + '_>> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        let ok = attempt > self.failures_before_success;

        Box::pin(async move {
            if ok {
                Ok(())
            } else {
                Err(io::Error::new(
                    io::ErrorKind::ConnectionRefused,
                    "connection refused",
                ))
            }
        })
    }
}
