//! Eviction sweeper
//!
//! Background task that expires stale presences on a fixed period. It talks
//! to the store only through `PresenceService::sweep_expired` and never
//! shares in-process state with request handlers.

use std::sync::Arc;
use std::time::Duration;

use room_common::PresenceConfig;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info, instrument, warn};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::presence::PresenceService;

/// Shortest period the background loop will run at
pub const MIN_SWEEP_INTERVAL: Duration = Duration::from_secs(1);

/// Timing of the sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweeperSettings {
    /// Longest allowed silence before a participant is evicted
    pub ttl: Duration,
    /// Period between two sweeps
    pub interval: Duration,
}

impl Default for SweeperSettings {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(10),
            interval: Duration::from_secs(15),
        }
    }
}

impl SweeperSettings {
    /// Same settings with the interval raised to at least [`MIN_SWEEP_INTERVAL`]
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            interval: self.interval.max(MIN_SWEEP_INTERVAL),
            ..self
        }
    }
}

impl From<&PresenceConfig> for SweeperSettings {
    fn from(config: &PresenceConfig) -> Self {
        Self {
            ttl: config.ttl(),
            interval: config.sweep_interval(),
        }
    }
}

/// Periodic eviction of stale participants
pub struct Sweeper {
    ctx: Arc<ServiceContext>,
    settings: SweeperSettings,
}

impl Sweeper {
    pub fn new(ctx: Arc<ServiceContext>, settings: SweeperSettings) -> Self {
        Self { ctx, settings }
    }

    /// Run one sweep now and return the evicted names
    #[instrument(skip(self))]
    pub async fn tick(&self) -> ServiceResult<Vec<String>> {
        let ttl = chrono::Duration::from_std(self.settings.ttl)
            .map_err(|e| ServiceError::internal(format!("presence ttl out of range: {e}")))?;
        let now = self.ctx.clock().now();

        PresenceService::new(&self.ctx).sweep_expired(now, ttl).await
    }

    /// Start sweeping in the background
    ///
    /// The first sweep happens one full interval after start. A sweep that
    /// overruns delays the next one instead of bursting to catch up. An
    /// interval below [`MIN_SWEEP_INTERVAL`] is raised to it.
    pub fn spawn(ctx: Arc<ServiceContext>, settings: SweeperSettings) -> SweeperHandle {
        if settings.interval < MIN_SWEEP_INTERVAL {
            warn!(
                interval_ms = settings.interval.as_millis(),
                "Sweep interval too short, raising it"
            );
        }
        let settings = settings.clamped();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let sweeper = Self::new(ctx, settings);

        info!(
            ttl_secs = settings.ttl.as_secs(),
            interval_secs = settings.interval.as_secs(),
            "Starting presence sweeper"
        );

        let task = tokio::spawn(sweeper.run(shutdown_rx));

        SweeperHandle {
            shutdown: shutdown_tx,
            task,
        }
    }

    async fn run(self, mut shutdown: oneshot::Receiver<()>) {
        let period = self.settings.interval;
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = ticker.tick() => match self.tick().await {
                    Ok(evicted) if evicted.is_empty() => debug!("Sweep found no stale participants"),
                    Ok(evicted) => debug!(count = evicted.len(), "Sweep complete"),
                    Err(e) => error!(error = %e, "Sweep failed, waiting for next tick"),
                },
            }
        }

        info!("Presence sweeper stopped");
    }
}

/// Handle to a running sweeper
#[derive(Debug)]
pub struct SweeperHandle {
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Signal the sweeper and wait for it to finish the current tick
    pub async fn shutdown(self) {
        // The task may already be gone; nothing to signal then
        let _ = self.shutdown.send(());
        if let Err(e) = self.task.await {
            error!(error = %e, "Presence sweeper task failed");
        }
    }
}
