//! Poll configuration
//!
//! Contains PollConfig for operation polling behavior.

use std::time::Duration;

// ============================================================================
// Poll Configuration
// ============================================================================

/// Default number of waits before an operation is declared timed out
pub const DEFAULT_MAX_RETRIES: u32 = 10;
/// Default first wait between status queries
pub const DEFAULT_BASE_WAIT: Duration = Duration::from_secs(1);
/// Default per-call status query timeout
pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for operation polling behavior
///
/// The wait before retry `n` (0-based) is `base_wait * 2^n`, with no jitter
/// and no cap. `max_retries` bounds the number of status queries.
///
/// # Example
/// ```ignore
/// let config = PollConfig::new()
///     .with_max_retries(5)
///     .with_base_wait(Duration::from_millis(500));
/// let poller = OperationPoller::new(config);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// Maximum number of status queries (0 = query once, never wait)
    pub max_retries: u32,
    /// Wait before the first retry
    pub base_wait: Duration,
    /// Timeout passed to each status query when no budget is supplied
    pub rpc_timeout: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_wait: DEFAULT_BASE_WAIT,
            rpc_timeout: DEFAULT_RPC_TIMEOUT,
        }
    }
}

impl PollConfig {
    /// Create a new PollConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum number of retries
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set base wait for exponential backoff
    pub fn with_base_wait(mut self, base_wait: Duration) -> Self {
        self.base_wait = base_wait;
        self
    }

    /// Set the default per-call status query timeout
    pub fn with_rpc_timeout(mut self, rpc_timeout: Duration) -> Self {
        self.rpc_timeout = rpc_timeout;
        self
    }

    /// Wait before retry `retry` (exponential backoff)
    ///
    /// Exact `Duration` arithmetic; saturates at `Duration::MAX`.
    pub fn wait_for(&self, retry: u32) -> Duration {
        if self.base_wait.is_zero() {
            return Duration::ZERO;
        }
        1u32.checked_shl(retry)
            .and_then(|factor| self.base_wait.checked_mul(factor))
            .unwrap_or(Duration::MAX)
    }

    /// Full wait schedule for a never-completing operation
    pub fn schedule(&self) -> Vec<Duration> {
        (0..self.max_retries).map(|retry| self.wait_for(retry)).collect()
    }
}
