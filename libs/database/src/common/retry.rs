use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Backoff policy for retried connection attempts.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries after the initial attempt
    pub max_retries: u32,
    /// Delay before the first retry, in milliseconds
    pub initial_delay_ms: u64,
    /// Ceiling on the delay between retries, in milliseconds
    pub max_delay_ms: u64,
    /// Growth factor applied after each retry
    pub backoff_multiplier: f64,
    /// Randomize delays to avoid synchronized reconnect storms
    pub use_jitter: bool,
}

impl RetryConfig {
    /// The default policy: 3 retries, 100ms initial delay, 5s ceiling,
    /// doubling with jitter.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_initial_delay(mut self, delay_ms: u64) -> Self {
        self.initial_delay_ms = delay_ms;
        self
    }

    pub fn with_max_delay(mut self, delay_ms: u64) -> Self {
        self.max_delay_ms = delay_ms;
        self
    }

    pub fn without_jitter(mut self) -> Self {
        self.use_jitter = false;
        self
    }

    fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let factor = self.backoff_multiplier.powi(attempt.saturating_sub(1) as i32);
        let base = ((self.initial_delay_ms as f64 * factor) as u64).min(self.max_delay_ms);
        let millis = if self.use_jitter { jitter(base) } else { base };
        Duration::from_millis(millis)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 100,
            max_delay_ms: 5000,
            backoff_multiplier: 2.0,
            use_jitter: true,
        }
    }
}

/// Scale a delay to somewhere between 50% and 100% of its value.
fn jitter(delay_ms: u64) -> u64 {
    use std::collections::hash_map::RandomState;
    use std::hash::BuildHasher;

    let roll = RandomState::new().hash_one(std::time::SystemTime::now()) % 50;
    delay_ms / 2 + delay_ms * roll / 100
}

/// Run `operation` until it succeeds or the policy's retries are spent.
///
/// ```ignore
/// use database::common::{retry_with_backoff, RetryConfig};
///
/// let policy = RetryConfig::new().with_max_retries(5);
/// let client = retry_with_backoff(|| connect(&url), policy).await?;
/// ```
pub async fn retry_with_backoff<F, Fut, T, E>(mut operation: F, policy: RetryConfig) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut last_err = None;

    for attempt in 0..=policy.max_retries {
        if attempt > 0 {
            let delay = policy.delay_for_attempt(attempt);
            debug!(
                "Retry {}/{} in {:?} after: {}",
                attempt,
                policy.max_retries,
                delay,
                last_err.as_ref().map(E::to_string).unwrap_or_default()
            );
            tokio::time::sleep(delay).await;
        }

        match operation().await {
            Ok(value) => {
                if attempt > 0 {
                    debug!("Operation succeeded on retry {}", attempt);
                }
                return Ok(value);
            }
            Err(e) => last_err = Some(e),
        }
    }

    let err = last_err.expect("at least one attempt ran");
    warn!(
        "Operation failed after {} retries: {}",
        policy.max_retries, err
    );
    Err(err)
}

/// [`retry_with_backoff`] with the default policy.
pub async fn retry<F, Fut, T, E>(operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    retry_with_backoff(operation, RetryConfig::default()).await
}
