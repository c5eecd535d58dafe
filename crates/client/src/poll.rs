//! Bounded polling for generation completion.
//!
//! The browser original polled `retrieve-user` every 500ms with no upper
//! bound and no failure cap; only unmounting the page stopped it. This
//! version keeps the fixed interval but makes the policy explicit: a
//! terminal timeout separates "waiting" from "stuck", and repeated request
//! failures abort instead of spinning forever.
//!
//! Requests are issued sequentially, so at most one is in flight, and none
//! are issued after the function returns.

use std::time::Duration;

use tokio::time::{Instant, sleep};
use tracing::{debug, instrument, warn};

use resell_core::{Generation, User};

use crate::backend::BackendClient;
use crate::error::ClientError;
use crate::session::SessionToken;

/// Give up after this many back-to-back request failures; a single flaky
/// response just waits for the next tick.
const MAX_CONSECUTIVE_FAILURES: u32 = 5;

/// Polling policy while a generation is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Delay between consecutive `retrieve-user` requests.
    pub interval: Duration,
    /// After this long, progress reports are flagged slow so the front end
    /// can warn the user. Warning never cancels the loop.
    pub warn_after: Duration,
    /// Terminal timeout; reaching it returns [`ClientError::TimedOut`].
    pub timeout: Duration,
}

impl PollPolicy {
    /// Default poll interval, matching the original client's 500ms.
    pub const DEFAULT_INTERVAL_MS: u64 = 500;
    /// Default warning threshold, matching the original's 30-second copy.
    pub const DEFAULT_WARN_SECS: u64 = 30;
    /// Default terminal timeout.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(Self::DEFAULT_INTERVAL_MS),
            warn_after: Duration::from_secs(Self::DEFAULT_WARN_SECS),
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Progress report passed to the caller once per tick.
#[derive(Debug, Clone, Copy)]
pub struct PollProgress {
    /// Time since polling started.
    pub elapsed: Duration,
    /// Requests issued so far.
    pub attempts: u32,
    /// Whether the wait has exceeded [`PollPolicy::warn_after`].
    pub slow: bool,
}

/// Poll `retrieve-user` until the latest generation record appears.
///
/// Returns the fetched user together with the record; classifying the
/// result (error / not-clothing / login and quota gating) is the caller's
/// job via [`resell_core::flow::resolve_generation`].
///
/// `on_progress` is invoked after every request so the front end can render
/// an elapsed-time counter without owning a timer.
///
/// # Errors
///
/// Returns [`ClientError::TimedOut`] when the policy's terminal timeout
/// elapses, or the last request error after too many consecutive failures.
#[instrument(skip_all, fields(timeout_secs = policy.timeout.as_secs()))]
pub async fn await_generation(
    client: &BackendClient,
    token: &SessionToken,
    policy: &PollPolicy,
    mut on_progress: impl FnMut(PollProgress),
) -> Result<(User, Generation), ClientError> {
    let started = Instant::now();
    let mut attempts: u32 = 0;
    let mut consecutive_failures: u32 = 0;

    loop {
        attempts += 1;

        match client.retrieve_user(token).await {
            Ok((user, rotated)) => {
                consecutive_failures = 0;

                if rotated.is_some() {
                    // Rotation mid-poll is unexpected; bootstrap is the only
                    // rotation point in the backend contract.
                    debug!("backend rotated session token during poll");
                }

                if let Some(generation) = user.last_generation.clone() {
                    debug!(attempts, "generation record appeared");
                    return Ok((user, generation));
                }
            }
            Err(e) => {
                consecutive_failures += 1;
                warn!(
                    error = %e,
                    consecutive_failures,
                    "poll request failed"
                );
                if consecutive_failures >= MAX_CONSECUTIVE_FAILURES {
                    return Err(e);
                }
            }
        }

        let elapsed = started.elapsed();
        on_progress(PollProgress {
            elapsed,
            attempts,
            slow: elapsed >= policy.warn_after,
        });

        if elapsed >= policy.timeout {
            return Err(ClientError::TimedOut { waited: elapsed });
        }

        sleep(policy.interval).await;
    }
}
