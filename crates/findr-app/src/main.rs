//! Findr client entry point
//!
//! Run with:
//! ```bash
//! cargo run -p findr-app
//! ```
//!
//! Configuration is loaded from environment variables or a `.env` file.

use findr_app::{create_app_state, run_session};
use findr_common::{init_telemetry, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!(error = %e, "Session failed");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    // Load configuration
    let config = AppConfig::from_env()?;

    // Initialize tracing
    let tracing_config = TracingConfig::for_environment(config.app.env, &config.telemetry);
    if let Err(e) = init_telemetry(&tracing_config) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        app = %config.app.name,
        env = ?config.app.env,
        project_id = %config.store.project_id,
        "Configuration loaded"
    );

    let state = create_app_state(config)?;
    let report = run_session(&state).await?;

    info!(
        display_name = ?report.display_name,
        avatar = %report.avatar_uri,
        post = %report.post_text,
        likes = report.likes,
        comments = report.comments_count,
        posts_after_delete = report.posts_after_delete,
        final_route = %report.final_route,
        alerts = report.alerts.len(),
        "Session finished"
    );
    Ok(())
}
