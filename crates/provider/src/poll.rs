//! Fixed-cadence polling of long-running operations.

use std::time::Duration;

use tracing::{debug, warn};

use crate::api::ProviderJobs;
use crate::wire::{OperationHandle, OperationResponse};

/// Interval between consecutive polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Total time allowed for an operation to finish.
pub const DEFAULT_POLL_BUDGET: Duration = Duration::from_secs(300);

/// Polling cadence and budget.
///
/// The budget is wall-clock time measured from the start of polling; failed
/// or malformed poll responses consume it like any other attempt.
#[derive(Debug, Clone)]
pub struct PollConfig {
    pub interval: Duration,
    pub budget: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            budget: DEFAULT_POLL_BUDGET,
        }
    }
}

/// Upper bound on poll attempts implied by a config.
pub fn max_polls(config: &PollConfig) -> u32 {
    if config.interval.is_zero() {
        return u32::MAX;
    }
    let attempts = config.budget.as_millis() / config.interval.as_millis();
    (attempts as u32).max(1)
}

/// Terminal outcome of a polling loop.
#[derive(Debug)]
pub enum PollOutcome {
    /// The operation finished; the response body may still lack videos.
    Completed(Option<OperationResponse>),
    /// The provider reported the operation as failed.
    Failed { message: String },
    /// The budget elapsed before a terminal status was observed.
    TimedOut,
}

/// Poll an operation until it reaches a terminal state or the budget runs out.
///
/// Each iteration sleeps first, then polls. Poll attempts that error out or
/// return unparsable bodies are logged and skipped; only a `done` snapshot or
/// the budget ends the loop.
pub async fn poll_until_done(
    jobs: &dyn ProviderJobs,
    handle: &OperationHandle,
    config: &PollConfig,
) -> PollOutcome {
    let started = tokio::time::Instant::now();
    let mut polls_attempted: u32 = 0;

    debug!(
        operation = %handle,
        interval_secs = config.interval.as_secs(),
        budget_secs = config.budget.as_secs(),
        max_polls = max_polls(config),
        "Polling operation"
    );

    loop {
        if started.elapsed() >= config.budget {
            warn!(
                operation = %handle,
                polls_attempted,
                budget_secs = config.budget.as_secs(),
                "Operation did not finish within the polling budget"
            );
            return PollOutcome::TimedOut;
        }

        tokio::time::sleep(config.interval).await;
        polls_attempted += 1;

        match jobs.fetch_operation(handle).await {
            Ok(snapshot) if !snapshot.done => {
                debug!(operation = %handle, polls_attempted, "Operation still running");
            }
            Ok(snapshot) => {
                if let Some(fault) = snapshot.error {
                    return PollOutcome::Failed {
                        message: fault.text(),
                    };
                }
                return PollOutcome::Completed(snapshot.response);
            }
            Err(e) => {
                // Transient by design: the budget still bounds the loop.
                warn!(operation = %handle, polls_attempted, error = %e, "Ignoring failed poll");
            }
        }
    }
}
