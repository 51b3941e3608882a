//! Transport readiness gate
//!
//! Before sending, a sync run waits for the transport session to connect.
//! The wait subscribes to connection-state changes and gives up after a
//! fixed number of fixed-length waits (5 x 1 s by default). There is no
//! backoff and no jitter; a session that connects mid-wait releases the
//! gate immediately.

use std::time::Duration;

use tracing::{debug, warn};

use crate::error::ApplicationError;
use crate::ports::TransportPort;

/// Bounded wait for the transport session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessPolicy {
    /// Number of waits before giving up
    pub attempts: u32,
    /// Length of each wait
    pub interval: Duration,
}

impl ReadinessPolicy {
    /// Default number of waits
    pub const DEFAULT_ATTEMPTS: u32 = 5;

    /// Default wait length
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

    /// Create a policy
    #[must_use]
    pub const fn new(attempts: u32, interval: Duration) -> Self {
        Self { attempts, interval }
    }

    /// Longest time a sync run can spend in the gate
    #[must_use]
    pub fn budget(&self) -> Duration {
        self.interval.saturating_mul(self.attempts)
    }
}

impl Default for ReadinessPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ATTEMPTS, Self::DEFAULT_INTERVAL)
    }
}

/// Wait until the transport reports `Connected`, within the policy's budget
///
/// Returns `TransportNotReady` once every wait has elapsed, or earlier if the
/// transport drops its state channel.
pub async fn wait_until_ready(
    transport: &dyn TransportPort,
    policy: &ReadinessPolicy,
) -> Result<(), ApplicationError> {
    let mut state = transport.watch_connection();
    if state.borrow_and_update().is_connected() {
        return Ok(());
    }

    for attempt in 1..=policy.attempts {
        debug!(attempt, attempts = policy.attempts, "Waiting for transport connection");

        let waited = tokio::time::timeout(policy.interval, state.wait_for(|s| s.is_connected()))
            .await
            .map(|changed| changed.map(|_| ()));

        match waited {
            Ok(Ok(())) => {
                debug!(attempt, "Transport connected");
                return Ok(());
            },
            Ok(Err(_)) => {
                warn!(attempt, "Transport state channel closed while waiting");
                break;
            },
            Err(_) => {},
        }
    }

    Err(ApplicationError::TransportNotReady {
        attempts: policy.attempts,
    })
}
