//! User-facing notices
//!
//! Fire-and-forget notifications. The latest notice is kept around for
//! the status endpoint, mirroring what a host status bar would show.

use std::sync::{Arc, Mutex};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// A single notice with its suggested display duration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notice {
    pub message: String,
    pub duration_ms: u64,
    pub posted_at: DateTime<Utc>,
}

/// Posts notices and remembers the most recent one
#[derive(Debug, Clone, Default)]
pub struct Notifier {
    last_notice: Arc<Mutex<Option<Notice>>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Post a notice; nothing is returned to the caller
    pub fn notify(&self, message: &str, duration_ms: u64) {
        info!("Notice ({}ms): {}", duration_ms, message);

        match self.last_notice.lock() {
            Ok(mut last) => {
                *last = Some(Notice {
                    message: message.to_string(),
                    duration_ms,
                    posted_at: Utc::now(),
                });
            }
            Err(e) => warn!("Failed to record notice: {}", e),
        }
    }

    /// Most recent notice, if any was posted
    pub fn last_notice(&self) -> Option<Notice> {
        self.last_notice.lock().ok().and_then(|last| last.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_the_latest_notice() {
        let notifier = Notifier::new();
        assert!(notifier.last_notice().is_none());

        notifier.notify("Focus session started", 1500);
        notifier.notify("Focus session paused", 1500);

        let last = notifier.last_notice().unwrap();
        assert_eq!(last.message, "Focus session paused");
        assert_eq!(last.duration_ms, 1500);
    }
}
