//! Configuration and CLI argument handling

use clap::Parser;
use tracing::warn;

/// CLI argument parsing structure
#[derive(Parser, Debug, Clone)]
#[command(name = "focus-pop")]
#[command(about = "A state-managed HTTP server for focus session tracking with randomized audio cues")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20997")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Focus session length in minutes
    #[arg(short, long, default_value = "90")]
    pub session_length: u64,

    /// Shortest gap between break cues in minutes
    #[arg(long, default_value = "3")]
    pub min_interval: u64,

    /// Longest gap between break cues in minutes
    #[arg(long, default_value = "5")]
    pub max_interval: u64,

    /// Short break length in seconds
    #[arg(long, default_value = "10")]
    pub short_break: u64,

    /// Long break length in minutes, observed after the session ends
    #[arg(long, default_value = "20")]
    pub long_break: u64,

    /// Audio file or URL played when a short break starts
    #[arg(long)]
    pub cue_start: Option<String>,

    /// Audio file or URL played when a short break ends
    #[arg(long)]
    pub cue_end: Option<String>,

    /// Audio file or URL played when the long break starts
    #[arg(long)]
    pub cue_long: Option<String>,

    /// Player command used to play cue audio (e.g. "paplay"); cues are
    /// logged only when no player is configured
    #[arg(long)]
    pub player: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Focus session length in seconds
    pub fn session_length_secs(&self) -> u64 {
        self.session_length * 60
    }

    /// Shortest cue gap in seconds
    pub fn min_interval_secs(&self) -> u64 {
        self.min_interval * 60
    }

    /// Longest cue gap in seconds
    pub fn max_interval_secs(&self) -> u64 {
        self.max_interval * 60
    }

    /// Revert degenerate timing values to their defaults.
    ///
    /// A zero duration or an inverted interval range would produce an
    /// empty or never-ending cue plan, so those values fall back to the
    /// documented defaults instead of reaching the scheduler.
    pub fn normalize(mut self) -> Self {
        if self.session_length == 0 {
            warn!("Session length of 0 minutes is invalid, using default of 90");
            self.session_length = 90;
        }
        if self.min_interval == 0 || self.max_interval == 0 || self.min_interval > self.max_interval {
            warn!(
                "Cue interval range {}-{} minutes is invalid, using default of 3-5",
                self.min_interval, self.max_interval
            );
            self.min_interval = 3;
            self.max_interval = 5;
        }
        if self.short_break == 0 {
            warn!("Short break of 0 seconds is invalid, using default of 10");
            self.short_break = 10;
        }
        if self.long_break == 0 {
            warn!("Long break of 0 minutes is invalid, using default of 20");
            self.long_break = 20;
        }
        self
    }
}
