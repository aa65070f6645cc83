//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod deadline_watch;

// Re-export main functions
pub use deadline_watch::deadline_watch_task;
