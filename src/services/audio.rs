//! Cue playback scheduling
//!
//! Owns the timer tasks that fire cue audio at computed offsets. The
//! session core only hands over offset lists; actual playback is a player
//! subprocess, or a log line when no player is configured.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::{process::Command, task::JoinHandle, time::sleep};
use tracing::{debug, info, warn};

/// Schedules and cancels the pending cue playback tasks
#[derive(Debug, Clone)]
pub struct AudioScheduler {
    player: Option<String>,
    pending: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl AudioScheduler {
    /// Create a scheduler that plays cues through `player`
    pub fn new(player: Option<String>) -> Self {
        Self {
            player,
            pending: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Fire one cue `delay_secs` from now
    pub fn play_once(&self, url: &str, delay_secs: u64) {
        self.spawn_cue(url.to_string(), delay_secs);
    }

    /// Fire the same cue at each offset in `delays`
    pub fn play_sequence(&self, url: &str, delays: &[u64]) {
        for &delay in delays {
            self.spawn_cue(url.to_string(), delay);
        }
    }

    /// Abort every pending cue task so a superseded plan cannot fire late.
    /// Returns how many tasks were dropped.
    pub fn cancel_all(&self) -> usize {
        let mut pending = match self.pending.lock() {
            Ok(pending) => pending,
            Err(e) => {
                warn!("Failed to lock pending cue list: {}", e);
                return 0;
            }
        };
        let count = pending.len();
        for handle in pending.drain(..) {
            handle.abort();
        }
        count
    }

    fn spawn_cue(&self, url: String, delay_secs: u64) {
        let player = self.player.clone();
        let handle = tokio::spawn(async move {
            sleep(Duration::from_secs(delay_secs)).await;
            play_cue(player.as_deref(), &url).await;
        });

        match self.pending.lock() {
            Ok(mut pending) => {
                pending.retain(|task| !task.is_finished());
                pending.push(handle);
            }
            Err(e) => warn!("Failed to lock pending cue list: {}", e),
        }
    }
}

/// Run the player subprocess for one cue, or just log the firing
async fn play_cue(player: Option<&str>, url: &str) {
    let Some(player) = player else {
        info!("Cue fired: {} (no player configured)", url);
        return;
    };

    let mut parts = player.split_whitespace();
    let Some(program) = parts.next() else {
        warn!("Player command is empty, cue {} skipped", url);
        return;
    };

    match Command::new(program).args(parts).arg(url).output().await {
        Ok(output) if output.status.success() => debug!("Cue played: {}", url),
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!("Player exited with {}: {}", output.status, stderr);
        }
        Err(e) => warn!("Failed to run player '{}': {}", program, e),
    }
}

/// Check that the configured player command is runnable
pub async fn check_player_available(player: &str) -> Result<(), String> {
    let program = player.split_whitespace().next().unwrap_or(player);

    Command::new(program)
        .arg("--version")
        .output()
        .await
        .map_err(|_| format!("Player '{}' is not available, cue playback will fail", program))?;

    info!("Player '{}' is available", program);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn cancel_all_aborts_every_pending_cue() {
        let audio = AudioScheduler::new(None);
        audio.play_sequence("ding.flac", &[60, 120]);
        audio.play_once("gong.flac", 180);
        assert_eq!(audio.cancel_all(), 3);
        assert_eq!(audio.cancel_all(), 0);
    }

    #[tokio::test]
    async fn scheduling_after_cancel_starts_a_fresh_batch() {
        let audio = AudioScheduler::new(None);
        audio.play_sequence("ding.flac", &[30, 60, 90]);
        audio.cancel_all();
        audio.play_once("ding.flac", 45);
        assert_eq!(audio.cancel_all(), 1);
    }
}
