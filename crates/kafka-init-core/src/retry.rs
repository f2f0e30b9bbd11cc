//! Broker readiness wait.

use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::{debug, info};

use crate::broker::TopicBroker;
use crate::error::{Error, Result};

/// Polling policy for the readiness wait.
///
/// The default reproduces the original bootstrap behavior: probe every two
/// seconds, forever. Setting `max_wait` bounds the wait without changing the
/// algorithm; the caller gets [`Error::ReadinessTimeout`] once the deadline
/// passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Fixed sleep between probes. No jitter, no backoff growth.
    pub interval: Duration,

    /// Overall deadline for the wait. `None` waits indefinitely.
    pub max_wait: Option<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            max_wait: None,
        }
    }
}

impl RetryPolicy {
    pub fn new(interval: Duration, max_wait: Option<Duration>) -> Self {
        Self { interval, max_wait }
    }
}

/// Block until the broker answers a metadata probe.
///
/// Every failed probe is followed by exactly one `policy.interval` sleep.
/// Returns the topic listing from the first successful probe.
pub async fn wait_for_broker(
    broker: &dyn TopicBroker,
    policy: &RetryPolicy,
) -> Result<Vec<String>> {
    let start = Instant::now();
    let mut attempt: u64 = 0;

    loop {
        attempt += 1;
        match broker.list_topics().await {
            Ok(topics) => {
                info!(attempts = attempt, "Broker is ready");
                return Ok(topics);
            }
            Err(e) => {
                debug!(attempt, error = %e, "Broker not ready yet");
                if let Some(max_wait) = policy.max_wait {
                    if start.elapsed() + policy.interval > max_wait {
                        return Err(Error::ReadinessTimeout(max_wait));
                    }
                }
                info!(
                    "Waiting for broker ({}s between attempts)...",
                    policy.interval.as_secs_f64()
                );
                sleep(policy.interval).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::topic::TopicSpec;

    /// Fails the first `failures` probes, then answers with a fixed listing.
    struct FlakyBroker {
        failures: usize,
        probes: AtomicUsize,
    }

    impl FlakyBroker {
        fn new(failures: usize) -> Self {
            Self {
                failures,
                probes: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl TopicBroker for FlakyBroker {
        async fn list_topics(&self) -> Result<Vec<String>> {
            let n = self.probes.fetch_add(1, Ordering::SeqCst);
            if n < self.failures {
                Err(Error::Unreachable("connection refused".to_string()))
            } else {
                Ok(vec!["domain.events".to_string()])
            }
        }

        async fn create_topic(&self, _spec: &TopicSpec) -> Result<()> {
            unreachable!("readiness tests never create topics")
        }
    }

    #[tokio::test(start_paused = true)]
    async fn succeeds_immediately_when_broker_is_up() {
        let broker = FlakyBroker::new(0);
        let topics = wait_for_broker(&broker, &RetryPolicy::default())
            .await
            .unwrap();
        assert_eq!(topics, vec!["domain.events"]);
        assert_eq!(broker.probes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn performs_exactly_n_failed_probes_before_success() {
        let broker = FlakyBroker::new(5);
        let start = Instant::now();

        wait_for_broker(&broker, &RetryPolicy::default())
            .await
            .unwrap();

        // 5 failures + 1 success, with one 2s sleep after each failure.
        assert_eq!(broker.probes.load(Ordering::SeqCst), 6);
        assert_eq!(start.elapsed(), Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn bounded_wait_times_out() {
        let broker = FlakyBroker::new(usize::MAX);
        let policy = RetryPolicy::new(Duration::from_secs(2), Some(Duration::from_secs(5)));

        let err = wait_for_broker(&broker, &policy).await.unwrap_err();
        assert!(matches!(err, Error::ReadinessTimeout(_)));
    }
}
