//! Background expiry of idle members.
//!
//! One tokio task ticks every `interval` and evicts members idle longer than
//! `timeout`. The first pass happens a full interval after spawn. Each pass
//! runs to completion inside the task before the next tick is awaited, so
//! passes never overlap.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use onduty_core::PresenceRegistry;

use crate::clock;
use crate::obs::OndutyMetrics;

pub struct Sweeper {
    stop_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl Sweeper {
    pub fn spawn(
        registry: Arc<PresenceRegistry>,
        timeout: Duration,
        interval: Duration,
        metrics: Arc<OndutyMetrics>,
    ) -> Self {
        let (stop_tx, mut stop_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut tick = interval_at(Instant::now() + interval, interval);
            tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

            tracing::info!(
                timeout_secs = timeout.as_secs(),
                interval_secs = interval.as_secs(),
                "presence sweeper started"
            );

            loop {
                tokio::select! {
                    _ = tick.tick() => {
                        sweep_once(&registry, timeout, &metrics);
                    }
                    changed = stop_rx.changed() => {
                        // Sender dropped with the handle: stop as well.
                        if changed.is_err() || *stop_rx.borrow() {
                            break;
                        }
                    }
                }
            }

            tracing::info!("presence sweeper stopped");
        });

        Self { stop_tx, handle }
    }

    /// Signal the task and wait for it to finish its current pass.
    pub async fn shutdown(self) {
        let _ = self.stop_tx.send(true);
        if let Err(e) = self.handle.await {
            tracing::warn!(error = %e, "presence sweeper task ended abnormally");
        }
    }
}

/// Run a single pass against the current clock. Returns the number evicted.
pub fn sweep_once(registry: &PresenceRegistry, timeout: Duration, metrics: &OndutyMetrics) -> usize {
    let evicted = registry.sweep(clock::now(), timeout);
    if evicted > 0 {
        metrics.evictions.add(&[], evicted as u64);
        tracing::info!(evicted, online = registry.count(), "auto-removed inactive members");
    } else {
        tracing::debug!("presence sweep found nothing to evict");
    }
    evicted
}
