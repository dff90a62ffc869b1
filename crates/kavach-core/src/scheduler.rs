//! Fixed-period tick driver.
//!
//! A [`Scheduler`] spawns one tokio task that calls `on_tick` once per
//! interval. Ticks run to completion inside the task, so they never overlap,
//! and missed ticks are skipped rather than queued. [`TickerHandle::stop`]
//! joins the task before returning: once it resolves no further tick can run.

use crate::error::{KavachError, Result};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::info;

#[derive(Debug, Clone, Copy)]
pub struct Scheduler {
    interval: Duration,
}

impl Scheduler {
    pub fn new(interval: Duration) -> Result<Self> {
        if interval.is_zero() {
            return Err(KavachError::InvalidInterval);
        }
        Ok(Self { interval })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Begin ticking on the current tokio runtime. `on_tick` receives the
    /// 1-based tick number. The first tick fires one interval after start.
    ///
    /// Fails with [`KavachError::TimerUnavailable`] when called outside a
    /// runtime.
    pub fn start<F>(&self, mut on_tick: F) -> Result<TickerHandle>
    where
        F: FnMut(u64) + Send + 'static,
    {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| KavachError::TimerUnavailable(e.to_string()))?;

        let period = self.interval;
        let (stop_tx, mut stop_rx) = watch::channel(false);

        let join = runtime.spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut fired = 0u64;
            loop {
                tokio::select! {
                    biased;
                    // Also resolves when the handle is dropped.
                    _ = stop_rx.changed() => break,
                    _ = ticker.tick() => {
                        fired += 1;
                        on_tick(fired);
                    }
                }
            }
            fired
        });

        info!(interval_ms = period.as_millis() as u64, "scheduler started");
        Ok(TickerHandle { stop_tx, join })
    }
}

/// Owner of a running ticker. Dropping it stops the ticker without waiting.
#[derive(Debug)]
pub struct TickerHandle {
    stop_tx: watch::Sender<bool>,
    join: JoinHandle<u64>,
}

impl TickerHandle {
    pub fn is_running(&self) -> bool {
        !self.join.is_finished()
    }

    /// Halt ticking and wait for the task to exit. Returns the number of
    /// ticks that fired.
    pub async fn stop(self) -> Result<u64> {
        let _ = self.stop_tx.send(true);
        let fired = self
            .join
            .await
            .map_err(|e| KavachError::Scheduler(e.to_string()))?;
        info!(ticks = fired, "scheduler stopped");
        Ok(fired)
    }
}
