//! Mandatory pause after calls to providers with a usage policy.

use std::time::Duration;

/// Fixed sleep taken after every call, successful or not.
///
/// # Example
///
/// ```
/// use itinera_rate_limit::PostCallDelay;
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let delay = PostCallDelay::new(Duration::from_millis(5));
/// let value = delay.run(async { 42 }).await;
/// assert_eq!(value, 42);
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostCallDelay {
    delay: Duration,
}

impl PostCallDelay {
    /// Create a delay of `delay` per call.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Await `call`, then pause before handing back its output.
    pub async fn run<F, R>(&self, call: F) -> R
    where
        F: std::future::Future<Output = R>,
    {
        let output = call.await;
        self.pause().await;
        output
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            tracing::trace!(delay_ms = self.delay.as_millis() as u64, "Post-call delay");
            tokio::time::sleep(self.delay).await;
        }
    }
}
