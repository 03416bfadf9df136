//! Periodic refresh scheduling
//!
//! The poller is an explicit cancellable task owned by the view's
//! lifecycle: `start` spawns it, `stop` signals shutdown and awaits the
//! task so teardown is deterministic. Manual refresh reuses the same
//! fetch path; in-flight fetches are not cancelled, the dashboard's
//! sequence guard makes the overlap safe.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::client::ReadingSource;
use crate::state::Dashboard;

/// Run one fetch cycle against the source and apply the outcome.
pub async fn refresh(dashboard: &Mutex<Dashboard>, source: &dyn ReadingSource) {
    let seq = dashboard.lock().await.begin_fetch();
    match source.fetch().await {
        Ok(readings) => {
            info!(seq, count = readings.len(), "rainfall snapshot fetched");
            dashboard.lock().await.apply_success(seq, readings);
        }
        Err(e) => {
            warn!(seq, error = %e, "rainfall fetch failed");
            dashboard.lock().await.apply_failure(seq, e.to_string());
        }
    }
}

/// Handle to the background polling task.
pub struct Poller {
    handle: JoinHandle<()>,
    shutdown: watch::Sender<bool>,
}

impl Poller {
    /// Spawn the polling loop. The first tick fires immediately, then every
    /// `every` thereafter.
    pub fn start(
        dashboard: Arc<Mutex<Dashboard>>,
        source: Arc<dyn ReadingSource>,
        every: Duration,
    ) -> Self {
        let (shutdown, mut stop_rx) = watch::channel(false);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                tokio::select! {
                    _ = ticker.tick() => refresh(&dashboard, source.as_ref()).await,
                    _ = stop_rx.changed() => {
                        info!("poller stopping");
                        break;
                    }
                }
            }
        });
        Self { handle, shutdown }
    }

    /// Signal shutdown and wait for the task to finish.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.handle.await {
            warn!(error = ?e, "poller task join failed");
        }
    }
}
