//! Bounded retry for reading back a freshly-sent event.
//!
//! Events are not immediately readable after ingestion, so the lookback
//! retries a fetch while it keeps answering HTTP 404, with exponential
//! backoff starting at one second. Any other failure aborts immediately;
//! the gateway itself never retries.

use std::time::Duration;

use tracing::debug;

use crate::error::Result;

/// Maximum number of fetch attempts.
pub const LOOKBACK_ATTEMPTS: u32 = 5;

/// Initial delay between attempts; doubles after every 404.
const INITIAL_BACKOFF: Duration = Duration::from_secs(1);

/// Retries `fetch` until it succeeds, fails with something other than a
/// 404, or [`LOOKBACK_ATTEMPTS`] attempts are exhausted.
///
/// Worst case the call sleeps 1 + 2 + 4 + 8 seconds between the five
/// attempts; there is no sleep after the last one.
///
/// # Errors
///
/// Returns the last fetch error when attempts are exhausted, or the first
/// non-404 error immediately.
///
/// # Examples
///
/// ```no_run
/// use sntr_api::{Client, wait_for_event};
///
/// # async fn example(client: Client) -> sntr_api::Result<()> {
/// let event = wait_for_event(|| {
///     client.get_single("organizations/acme/eventids/0123456789abcdef0123456789abcdef")
/// })
/// .await?;
/// # Ok(())
/// # }
/// ```
pub async fn wait_for_event<T, F, Fut>(mut fetch: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut delay = INITIAL_BACKOFF;
    let mut attempt = 0;
    loop {
        attempt += 1;
        match fetch().await {
            Err(err) if err.is_not_found() && attempt < LOOKBACK_ATTEMPTS => {
                debug!(attempt, delay_secs = delay.as_secs(), "event not readable yet");
                tokio::time::sleep(delay).await;
                delay *= 2;
            }
            result => return result,
        }
    }
}
