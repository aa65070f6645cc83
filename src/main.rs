//! Focus Pop - A state-managed HTTP server for focus session tracking
//!
//! This is the main entry point for the focus-pop application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use focus_pop::{
    api::create_router,
    config::Config,
    services::check_player_available,
    state::AppState,
    tasks::deadline_watch_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("focus_pop={},tower_http=info", config.log_level()))
        .init();

    let config = config.normalize();

    info!("Starting focus-pop server v0.1.0");
    info!("Configuration: host={}, port={}, session={}min, cue gap={}-{}min",
          config.host, config.port, config.session_length,
          config.min_interval, config.max_interval);

    // A missing player is not fatal; cue firings degrade to log lines
    if let Some(player) = &config.player {
        if let Err(e) = check_player_available(player).await {
            warn!("{}", e);
        }
    }

    // Create application state
    let state = Arc::new(AppState::new(config.clone()));

    // Start the deadline watch background task
    let watch_state = Arc::clone(&state);
    tokio::spawn(async move {
        deadline_watch_task(watch_state).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start  - Start or resume a focus session");
    info!("  POST /pause  - Pause the running session");
    info!("  POST /stop   - End the session and record the deposit");
    info!("  GET  /status - Session state, elapsed time and last notice");
    info!("  GET  /health - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
