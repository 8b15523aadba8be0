use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use ptb_core::{CoreConfig, ExternalClassifier};

/// Main entry point for the PTB service
///
/// Loads configuration from the environment, opens the database (creating the two tables when
/// missing) and serves the REST API.
///
/// # Environment Variables
/// - `PTB_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `DATABASE_URL`: SQLite connection string (default: "sqlite://ptb.db?mode=rwc")
/// - `API_KEY`: key required in `x-api-key` on protected routes
/// - `PTB_CLASSIFIER_PROGRAM` / `PTB_CLASSIFIER_ARGS`: external classifier command
/// - `PTB_CLASSIFIER_TIMEOUT_SECS`: classifier time limit (default: 30)
/// - `PTB_RECENT_LIMIT`: size of the recent predictions view (default: 5)
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ptb_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("PTB_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let api_key = std::env::var("API_KEY").context("API_KEY must be set")?;
    if api_key.trim().is_empty() {
        anyhow::bail!("API_KEY must not be empty");
    }

    let cfg = CoreConfig::from_env().context("invalid PTB configuration")?;
    let workflow = ptb_core::workflow_from_config(&cfg)
        .await
        .context("failed to open the PTB database")?;
    let classifier = ExternalClassifier::new(cfg.classifier().clone());

    let app = api_rest::router(AppState::new(workflow, classifier, api_key));

    tracing::info!("++ Starting PTB REST on {}", rest_addr);
    let listener = tokio::net::TcpListener::bind(&rest_addr)
        .await
        .with_context(|| format!("failed to bind {}", rest_addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
