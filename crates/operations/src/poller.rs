//! Long-running operation poller
//!
//! Blocks the calling thread while repeatedly asking the service whether an
//! operation has finished, doubling the wait after every "not yet".
//!
//! ## States
//!
//! ```text
//! Pending(0) --not done--> sleep --> Pending(1) --> ... --> Pending(max) => TimedOut
//!     \                                  \
//!      +--------------done---------------+----------------------------------> Done
//! ```
//!
//! - A failed status query ends the poll immediately with that error; only
//!   "not done" answers are retried.
//! - A never-completing operation sees exactly `max_retries` queries and
//!   `max_retries` waits: `base, 2*base, ..., 2^(max_retries-1)*base`.
//! - With `max_retries == 0` the status is queried once and never waited on.
//! - On timeout the handle stays incomplete; the caller may poll again with
//!   a fresh budget.
//!
//! No cancellation primitive exists here. A caller that needs one runs the
//! poll on its own thread and races it against its own signal.

use crate::config::PollConfig;
use crate::handle::OperationHandle;
use bigtable_compat_core::{CompatError, CompatResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

// ============================================================================
// Collaborator Boundary
// ============================================================================

/// Status reported by the service for one operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationStatus {
    /// Whether the operation has finished
    pub done: bool,
    /// Opaque response payload, passed through untouched
    pub response: Option<Vec<u8>>,
}

impl OperationStatus {
    /// Status of an unfinished operation
    pub fn pending() -> Self {
        Self::default()
    }

    /// Status of a finished operation carrying a response payload
    pub fn done(response: impl Into<Vec<u8>>) -> Self {
        Self {
            done: true,
            response: Some(response.into()),
        }
    }
}

/// Fetches the current status of an operation
///
/// Implementations must not retry internally; the poller owns the retry
/// policy.
pub trait StatusQuery {
    /// Issue one status query with the given per-call timeout
    fn query(
        &mut self,
        handle: &OperationHandle,
        timeout: Duration,
    ) -> CompatResult<OperationStatus>;
}

impl<F> StatusQuery for F
where
    F: FnMut(&OperationHandle, Duration) -> CompatResult<OperationStatus>,
{
    fn query(
        &mut self,
        handle: &OperationHandle,
        timeout: Duration,
    ) -> CompatResult<OperationStatus> {
        self(handle, timeout)
    }
}

/// Suspends the caller between status queries
pub trait Sleeper {
    /// Suspend for at least `duration`
    fn sleep(&mut self, duration: Duration);
}

impl<F> Sleeper for F
where
    F: FnMut(Duration),
{
    fn sleep(&mut self, duration: Duration) {
        self(duration)
    }
}

/// Sleeper backed by `std::thread::sleep`
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

// ============================================================================
// Poller
// ============================================================================

/// Drives an operation handle to completion or timeout
#[derive(Debug, Clone, Copy, Default)]
pub struct OperationPoller {
    config: PollConfig,
}

impl OperationPoller {
    /// Create a poller with the given configuration
    pub fn new(config: PollConfig) -> Self {
        Self { config }
    }

    /// Configuration in effect
    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    /// Poll until the operation reports done or the retry budget runs out.
    ///
    /// `timeout_budget` replaces the configured per-call query timeout. It
    /// does not change the backoff schedule or the retry cap.
    ///
    /// # Returns
    /// * `Ok(status)` - The first status reporting done; the handle is marked
    ///   complete
    /// * `Err(OperationTimeout)` - The retry budget ran out
    /// * `Err(OperationAlreadyComplete)` - The handle was already complete
    /// * `Err(e)` - The status query failed with `e`
    pub fn poll<Q, S>(
        &self,
        handle: &mut OperationHandle,
        query: &mut Q,
        sleeper: &mut S,
        timeout_budget: Option<Duration>,
    ) -> CompatResult<OperationStatus>
    where
        Q: StatusQuery + ?Sized,
        S: Sleeper + ?Sized,
    {
        ensure_incomplete(handle)?;
        let timeout = timeout_budget.unwrap_or(self.config.rpc_timeout);

        let mut retries: u32 = 0;
        let mut queries: u32 = 0;
        loop {
            let status = query.query(handle, timeout)?;
            queries += 1;

            if status.done {
                handle.mark_complete();
                info!(
                    operation_id = handle.operation_id(),
                    kind = %handle.kind(),
                    queries,
                    "Operation completed"
                );
                return Ok(status);
            }

            if retries >= self.config.max_retries {
                break;
            }

            let wait = self.config.wait_for(retries);
            debug!(
                operation_id = handle.operation_id(),
                retry = retries,
                wait = ?wait,
                "Operation not done, waiting"
            );
            sleeper.sleep(wait);
            retries += 1;

            if retries >= self.config.max_retries {
                break;
            }
        }

        warn!(
            operation_id = handle.operation_id(),
            kind = %handle.kind(),
            queries,
            "Operation did not complete within retry budget"
        );
        Err(CompatError::OperationTimeout {
            operation_id: handle.operation_id(),
            attempts: queries,
        })
    }

    /// Query the status once, without waiting.
    ///
    /// Returns `Ok(true)` and marks the handle complete if the operation has
    /// finished.
    ///
    /// # Errors
    ///
    /// Returns `OperationAlreadyComplete` if the handle was already
    /// complete, or the status query's own error.
    pub fn check<Q>(
        &self,
        handle: &mut OperationHandle,
        query: &mut Q,
        timeout_budget: Option<Duration>,
    ) -> CompatResult<bool>
    where
        Q: StatusQuery + ?Sized,
    {
        ensure_incomplete(handle)?;
        let timeout = timeout_budget.unwrap_or(self.config.rpc_timeout);
        let status = query.query(handle, timeout)?;
        if status.done {
            handle.mark_complete();
        }
        Ok(status.done)
    }
}

fn ensure_incomplete(handle: &OperationHandle) -> CompatResult<()> {
    if handle.is_complete() {
        return Err(CompatError::OperationAlreadyComplete {
            operation_id: handle.operation_id(),
        });
    }
    Ok(())
}
