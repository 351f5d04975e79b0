//! Handler configuration.

use std::time::Duration;

/// Polling budget for one stabilization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StabilizationConfig {
    /// Total time (across re-invocations) before giving up with NotStabilized.
    pub timeout: Duration,
    /// Delay between probes.
    pub delay: Duration,
    /// Wall time one invocation may spend polling before handing back to the
    /// host with an in-progress event. `None` polls the whole budget inline.
    pub invocation_window: Option<Duration>,
}

impl StabilizationConfig {
    pub fn new(timeout: Duration, delay: Duration) -> Self {
        Self {
            timeout,
            delay,
            invocation_window: None,
        }
    }

    pub fn with_invocation_window(mut self, window: Duration) -> Self {
        self.invocation_window = Some(window);
        self
    }
}

/// Configuration shared by all handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerConfig {
    /// Waiting for an asynchronous KMS key update after an update call.
    ///
    /// Thirty minutes gives the control plane's own key update three
    /// attempts (initial, +5 min, +15 min).
    pub update_stabilization: StabilizationConfig,
    /// Waiting for a deleted domain to enter its grace period.
    pub delete_stabilization: StabilizationConfig,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            update_stabilization: StabilizationConfig::new(
                Duration::from_secs(30 * 60),
                Duration::from_secs(60),
            ),
            delete_stabilization: StabilizationConfig::new(
                Duration::from_secs(5 * 60),
                Duration::from_secs(10),
            ),
        }
    }
}
