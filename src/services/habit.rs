//! Habit data hand-off

use tracing::info;

/// Record the final deposit of a finished cycle.
///
/// Called exactly once per transition back to ready, with the total
/// focused seconds of the cycle. The upstream habit tracker is not wired
/// up yet, so for now the hand-off only logs.
// TODO: submit to the habit tracker endpoint once it exists
pub fn record(deposited_seconds: u64) {
    info!("Habit data recorded: {} focused seconds", deposited_seconds);
}
