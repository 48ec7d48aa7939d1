//! Background worker that snapshots the character being edited

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::application::services::SheetService;

/// Snapshot the session's character every `period`, forever.
///
/// Snapshot failures are logged by the service and never stop the loop.
pub async fn autosave_worker(sheet: Arc<SheetService>, period: Duration) {
    tracing::info!("Starting autosave worker ({:?})", period);
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately
    ticker.tick().await;

    loop {
        ticker.tick().await;
        sheet.snapshot().await;
        tracing::trace!("Autosaved character");
    }
}

/// Start the worker on the runtime; abort the handle to stop it
pub fn spawn_autosave(sheet: Arc<SheetService>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(autosave_worker(sheet, period))
}
