//! Connection monitor
//!
//! Periodically asks the backend whether it is reachable and logs the answer.
//! A failed check is logged and reported as the synthetic `error` status; it
//! never stops the timer and is never returned to the caller. There is no
//! backoff: the next check runs on schedule regardless of earlier outcomes.

use crate::api::{HealthProbe, HealthStatus};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Default period between two health checks
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(30);

/// Run one health check, absorbing any failure
///
/// # Returns
/// * The backend's reported status, or `{ status: "error" }` if the check failed
pub async fn check_connection<P: HealthProbe + ?Sized>(probe: &P) -> HealthStatus {
    match probe.health_check().await {
        Ok(status) => {
            info!(status = %status.status, "Connection status");
            status
        }
        Err(e) => {
            error!(error = %e, "Health check failed");
            HealthStatus::error()
        }
    }
}

/// Periodic health checker
pub struct ConnectionMonitor;

impl ConnectionMonitor {
    /// Start monitoring: one check right away, then one every `period`
    ///
    /// Must be called inside a tokio runtime. The returned handle stops the
    /// task on [`MonitorHandle::stop`] or when dropped.
    pub fn spawn<P>(probe: Arc<P>, period: Duration) -> MonitorHandle
    where
        P: HealthProbe + ?Sized + 'static,
    {
        // tokio::time::interval panics on a zero period
        let period = period.max(Duration::from_millis(1));
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let (status_tx, status_rx) = watch::channel(None);
        let checks = Arc::new(AtomicU64::new(0));

        info!(interval_secs = period.as_secs_f64(), "Connection monitor started");
        let task = tokio::spawn(run(probe, period, shutdown_rx, status_tx, checks.clone()));

        MonitorHandle {
            shutdown: Some(shutdown_tx),
            task: Some(task),
            status: status_rx,
            checks,
        }
    }
}

async fn run<P>(
    probe: Arc<P>,
    period: Duration,
    mut shutdown: oneshot::Receiver<()>,
    status: watch::Sender<Option<HealthStatus>>,
    checks: Arc<AtomicU64>,
) where
    P: HealthProbe + ?Sized,
{
    let mut ticker = tokio::time::interval(period);

    loop {
        tokio::select! {
            // Resolves on stop() and when the handle is dropped
            _ = &mut shutdown => break,
            _ = ticker.tick() => {
                let result = check_connection(probe.as_ref()).await;
                checks.fetch_add(1, Ordering::SeqCst);
                status.send_replace(Some(result));
            }
        }
    }

    info!("Connection monitor stopped");
}

/// Handle to a running connection monitor
pub struct MonitorHandle {
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
    status: watch::Receiver<Option<HealthStatus>>,
    checks: Arc<AtomicU64>,
}

impl MonitorHandle {
    /// Status of the most recent check, `None` before the first one completes
    pub fn last_status(&self) -> Option<HealthStatus> {
        self.status.borrow().clone()
    }

    /// Number of checks completed so far
    pub fn checks(&self) -> u64 {
        self.checks.load(Ordering::SeqCst)
    }

    /// Wait for the next check to complete and return its status
    ///
    /// Returns `None` once the monitor has stopped.
    pub async fn next_status(&mut self) -> Option<HealthStatus> {
        self.status.changed().await.ok()?;
        self.status.borrow_and_update().clone()
    }

    /// Whether the monitor task is still running
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stop the monitor and wait for its task to finish
    pub async fn stop(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(error = %e, "Connection monitor task did not finish cleanly");
            }
        }
    }
}

impl Drop for MonitorHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
