//! Retry Infrastructure
//!
//! "Attempt N times with a fixed delay, log every outcome". Shared by every
//! task module; it knows nothing about what the action does beyond whether
//! a failure is worth another attempt.

use std::borrow::Cow;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// Retry policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one. `0` is treated as `1`.
    pub max_attempts: u32,
    /// Flat delay between attempts
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

/// Failure classification consulted between attempts
pub trait Retryable {
    /// `false` stops the loop and returns the error at once
    fn is_retryable(&self) -> bool;
}

/// Line logged when an attempt succeeds: fixed text, or rendered from the result
pub enum SuccessMessage<'a, T> {
    Text(Cow<'a, str>),
    Render(Box<dyn Fn(&T) -> String + Send + Sync + 'a>),
}

impl<'a, T> SuccessMessage<'a, T> {
    /// Build the message from the successful value
    pub fn render_with(f: impl Fn(&T) -> String + Send + Sync + 'a) -> Self {
        SuccessMessage::Render(Box::new(f))
    }

    fn render(&self, value: &T) -> Cow<'_, str> {
        match self {
            SuccessMessage::Text(text) => Cow::Borrowed(text.as_ref()),
            SuccessMessage::Render(f) => Cow::Owned(f(value)),
        }
    }
}

impl<'a, T> From<&'a str> for SuccessMessage<'a, T> {
    fn from(text: &'a str) -> Self {
        SuccessMessage::Text(Cow::Borrowed(text))
    }
}

impl<T> From<String> for SuccessMessage<'_, T> {
    fn from(text: String) -> Self {
        SuccessMessage::Text(Cow::Owned(text))
    }
}

/// Run `action` until it succeeds or `policy.max_attempts` is exhausted
///
/// Returns the first successful value, or the last error. Sleeps
/// `policy.delay` between attempts and logs one line per attempt. A
/// non-retryable error ends the loop without further attempts.
pub async fn retry<'a, T, E, F, Fut>(
    mut action: F,
    policy: &RetryPolicy,
    on_success: impl Into<SuccessMessage<'a, T>>,
    on_failure: &str,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display + Retryable,
{
    let on_success = on_success.into();
    let max_attempts = policy.attempts();
    let mut attempt = 1u32;

    loop {
        match action().await {
            Ok(value) => {
                tracing::info!(attempt, "{}", on_success.render(&value));
                return Ok(value);
            }
            Err(e) if attempt < max_attempts && e.is_retryable() => {
                tracing::warn!(attempt, max_attempts, error = %e, "{}", on_failure);
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
            Err(e) => {
                tracing::error!(attempt, max_attempts, error = %e, "{}", on_failure);
                return Err(e);
            }
        }
    }
}
