use super::transport::{HttpResponse, Transport};
use crate::error::AppError;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const TOO_MANY_REQUESTS: u16 = 429;

pub trait Sleeper: Send + Sync {
    fn sleep(&self, duration: Duration);
}

pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts per call, including the first.
    pub max_attempts: u32,
    /// First backoff wait; doubled after every attempt.
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        RetryPolicy {
            max_attempts: max_attempts.max(1),
            base_delay: Duration::from_secs(1),
        }
    }
}

/// GET with exponential backoff on 429 and on transport failures.
pub struct RetryClient {
    transport: Arc<dyn Transport>,
    sleeper: Arc<dyn Sleeper>,
    policy: RetryPolicy,
}

impl RetryClient {
    pub fn new(transport: Arc<dyn Transport>, sleeper: Arc<dyn Sleeper>, policy: RetryPolicy) -> Self {
        RetryClient {
            transport,
            sleeper,
            policy,
        }
    }

    /// Returns the first non-429 response. Once attempts run out, returns the
    /// last 429 if one was received, otherwise `RetriesExhausted`.
    pub fn get(&self, url: &str, query: &[(&'static str, String)]) -> Result<HttpResponse, AppError> {
        let attempts = self.policy.max_attempts.max(1);
        let mut backoff = self.policy.base_delay;
        let mut last_response: Option<HttpResponse> = None;
        let mut last_error: Option<AppError> = None;

        for attempt in 1..=attempts {
            let wait = match self.transport.get(url, query) {
                Ok(resp) if resp.status == TOO_MANY_REQUESTS => {
                    let wait = resp.retry_after.map(Duration::from_secs).unwrap_or(backoff);
                    tracing::warn!(
                        url,
                        attempt,
                        wait_secs = wait.as_secs_f64(),
                        "rate limit hit, backing off"
                    );
                    last_response = Some(resp);
                    wait
                }
                Ok(resp) => return Ok(resp),
                Err(err) => {
                    tracing::warn!(url, attempt, error = %err, "request failed, backing off");
                    last_error = Some(err);
                    backoff
                }
            };

            if attempt < attempts {
                self.sleeper.sleep(wait);
            }
            backoff = backoff.saturating_mul(2);
        }

        match last_response {
            Some(resp) => Ok(resp),
            None => Err(AppError::RetriesExhausted {
                url: url.to_string(),
                attempts,
                last_error: last_error
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| "no attempt made".to_string()),
            }),
        }
    }
}
