//! Session deadline background task

use std::{sync::Arc, time::Duration};
use tokio::time::interval;
use tracing::{info, warn};

use crate::state::AppState;

/// Background task that raises a one-shot notice when the elapsed focus
/// time first reaches the configured session length.
///
/// Read-only apart from the latch inside the session; it never touches
/// the deposit or the transition instant.
pub async fn deadline_watch_task(state: Arc<AppState>) {
    info!("Starting deadline watch task");

    let mut ticker = interval(Duration::from_secs(1));

    loop {
        ticker.tick().await;

        match state.deadline_reached() {
            Ok(true) => {
                state.notifier.notify(
                    &format!("Focus time has reached {} minutes!", state.config.session_length),
                    10_000,
                );
            }
            Ok(false) => {
                // Deadline not crossed yet, or the notice already fired this cycle
            }
            Err(e) => {
                warn!("Failed to check focus deadline: {}", e);
            }
        }
    }
}
