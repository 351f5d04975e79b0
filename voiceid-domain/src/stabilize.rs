//! Stabilization polling.
//!
//! A [`Stabilizer`] re-probes remote state until a classifier reports it
//! stable, reports a fatal error, or the time budget runs out. Probes are
//! sequential; the delay between them is a `tokio` sleep.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::config::StabilizationConfig;
use crate::error::{HandlerError, Result};
use crate::model::{DomainStatus, EncryptionUpdateStatus, RemoteDomain};
use crate::progress::OperationContext;

/// Classification of one probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe<T> {
    /// Converged; stop polling.
    Stable(T),
    /// Not there yet; probe again after the delay.
    Retry,
}

/// How a poll ended without error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome<T> {
    Stable(T),
    /// The invocation window is used up; the host should re-invoke after
    /// `delay` with the updated context.
    Suspended { delay: Duration },
}

/// Bounded polling loop.
#[derive(Debug, Clone, Copy)]
pub struct Stabilizer {
    config: StabilizationConfig,
}

impl Stabilizer {
    pub fn new(config: StabilizationConfig) -> Self {
        Self { config }
    }

    /// Poll `probe` until it is stable.
    ///
    /// An `Err` from the probe is fatal and returned as-is. Exhausting the
    /// budget yields [`HandlerError::NotStabilized`]. Elapsed time and the
    /// probe count are carried in `ctx` so a resumed invocation continues
    /// the same budget.
    pub async fn poll<T, F, Fut>(
        &self,
        ctx: &mut OperationContext,
        mut probe: F,
    ) -> Result<PollOutcome<T>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Probe<T>>>,
    {
        let started = Instant::now();
        let carried = Duration::from_millis(ctx.stabilization_elapsed_ms);

        loop {
            ctx.probes += 1;
            let attempt = ctx.probes;

            match probe().await {
                Ok(Probe::Stable(value)) => {
                    info!("Stabilized after {} probe(s)", attempt);
                    reset(ctx);
                    return Ok(PollOutcome::Stable(value));
                }
                Err(e) => {
                    warn!("Stabilization failed on probe {}: {}", attempt, e);
                    reset(ctx);
                    return Err(e);
                }
                Ok(Probe::Retry) => {}
            }

            let elapsed = carried + started.elapsed();
            if elapsed >= self.config.timeout {
                warn!(
                    "Not stabilized after {} probe(s) in {:?} (budget {:?})",
                    attempt, elapsed, self.config.timeout
                );
                reset(ctx);
                return Err(HandlerError::NotStabilized(format!(
                    "resource did not stabilize within {} seconds",
                    self.config.timeout.as_secs()
                )));
            }

            if let Some(window) = self.config.invocation_window {
                if started.elapsed() + self.config.delay > window {
                    ctx.stabilization_elapsed_ms =
                        (elapsed + self.config.delay).as_millis() as u64;
                    debug!(
                        "Invocation window used up after probe {}, resuming in {:?}",
                        attempt, self.config.delay
                    );
                    return Ok(PollOutcome::Suspended {
                        delay: self.config.delay,
                    });
                }
            }

            debug!("Probe {} not stable, retrying in {:?}", attempt, self.config.delay);
            tokio::time::sleep(self.config.delay).await;
        }
    }
}

fn reset(ctx: &mut OperationContext) {
    ctx.stabilization_elapsed_ms = 0;
    ctx.probes = 0;
}

/// Classify a domain after an update that may have started a KMS key change.
///
/// Stable carries the ARN when the key update completed, so the caller can
/// re-capture it after stabilization.
pub fn classify_encryption_update(domain: &RemoteDomain) -> Result<Probe<Option<String>>> {
    let Some(details) = &domain.encryption_update else {
        // No key change on record for this domain.
        return Ok(Probe::Stable(None));
    };

    match details.update_status {
        EncryptionUpdateStatus::Completed => {
            info!("Domain {} encryption update completed", domain.domain_id);
            Ok(Probe::Stable(Some(domain.arn.clone())))
        }
        EncryptionUpdateStatus::NotApplicable => Ok(Probe::Stable(None)),
        EncryptionUpdateStatus::InProgress => Ok(Probe::Retry),
        EncryptionUpdateStatus::Failed => Err(HandlerError::Conflict(format!(
            "Failed to update domain {} due to KMS key failure{}",
            domain.domain_id,
            details
                .message
                .as_deref()
                .map(|m| format!(": {}", m))
                .unwrap_or_default()
        ))),
        EncryptionUpdateStatus::Unrecognized(value) => {
            warn!(
                "Unrecognized encryption update status {} on domain {}, continuing to stabilize",
                value, domain.domain_id
            );
            Ok(Probe::Retry)
        }
    }
}

/// Classify a domain after a delete call: stable once it is suspended.
pub fn classify_deletion(status: DomainStatus) -> Probe<()> {
    match status {
        DomainStatus::Suspended => Probe::Stable(()),
        DomainStatus::Active | DomainStatus::Pending => Probe::Retry,
        DomainStatus::Unrecognized(value) => {
            warn!("Unrecognized domain status {} while deleting, retrying", value);
            Probe::Retry
        }
    }
}
