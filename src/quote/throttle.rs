use super::{Quote, QuoteRequest, QuoteSource};
use crate::errors::Result;
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::trace;

/// Enforces a minimum interval between consecutive calls to the inner source.
pub struct Throttled<Q> {
    inner: Q,
    interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl<Q> Throttled<Q> {
    pub fn new(inner: Q, interval: Duration) -> Self {
        Self {
            inner,
            interval,
            last_call: Mutex::new(None),
        }
    }

    pub fn inner(&self) -> &Q {
        &self.inner
    }
}

#[async_trait]
impl<Q: QuoteSource> QuoteSource for Throttled<Q> {
    async fn quote(&self, request: &QuoteRequest) -> Result<Quote> {
        // Held across the call so requests never overlap.
        let mut last_call = self.last_call.lock().await;
        if let Some(previous) = *last_call {
            let ready_at = previous + self.interval;
            if ready_at > Instant::now() {
                trace!(
                    wait_ms = (ready_at - Instant::now()).as_millis() as u64,
                    "[QUOTE] throttling"
                );
                tokio::time::sleep_until(ready_at).await;
            }
        }
        let result = self.inner.quote(request).await;
        *last_call = Some(Instant::now());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::types::Address;
    use num_bigint::BigUint;
    use std::sync::Mutex as StdMutex;

    /// Records the (virtual) instant of every call.
    #[derive(Default)]
    struct Recorder {
        calls: StdMutex<Vec<Instant>>,
    }

    #[async_trait]
    impl QuoteSource for Recorder {
        async fn quote(&self, request: &QuoteRequest) -> Result<Quote> {
            self.calls.lock().unwrap().push(Instant::now());
            Ok(Quote {
                amount_out: request.amount_in.clone(),
                route: vec![],
            })
        }
    }

    fn request() -> QuoteRequest {
        QuoteRequest::new(BigUint::from(1u8), Address::zero(), Address::repeat_byte(1))
    }

    #[tokio::test(start_paused = true)]
    async fn spaces_consecutive_calls() {
        let throttled = Throttled::new(Recorder::default(), Duration::from_millis(1500));
        for _ in 0..3 {
            throttled.quote(&request()).await.unwrap();
        }
        let calls = throttled.inner().calls.lock().unwrap().clone();
        assert_eq!(calls.len(), 3);
        for pair in calls.windows(2) {
            assert!(pair[1] - pair[0] >= Duration::from_millis(1500));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn first_call_is_immediate() {
        let start = Instant::now();
        let throttled = Throttled::new(Recorder::default(), Duration::from_secs(5));
        throttled.quote(&request()).await.unwrap();
        assert!(start.elapsed() < Duration::from_millis(1));
    }

    #[tokio::test(start_paused = true)]
    async fn no_wait_once_interval_elapsed() {
        let throttled = Throttled::new(Recorder::default(), Duration::from_millis(100));
        throttled.quote(&request()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(250)).await;
        let before = Instant::now();
        throttled.quote(&request()).await.unwrap();
        assert!(before.elapsed() < Duration::from_millis(1));
    }
}
