//! Diabetic Retinopathy Prediction - server entry point

use anyhow::Context;
use dr_scoring_core::constants::{APP_NAME, APP_VERSION};
use dr_scoring_core::load_classifier;
use dr_web_server::{config::Config, create_router, AppState, ModelState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "dr_web_server=debug,dr_scoring_core=info,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);
    if config.log_json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("{} v{} starting...", APP_NAME, APP_VERSION);
    tracing::info!("Model: {}", config.model_path);

    // Load the classifier once; every request shares it
    let model = match load_classifier(&config.model_path) {
        Ok(loaded) => {
            if !loaded.metadata.schema_compatible {
                tracing::warn!(
                    "Model features {:?} do not match the input layout - predictions will fail",
                    loaded.metadata.feature_names
                );
            }
            ModelState::ready(loaded)
        }
        Err(e) if config.require_model => {
            return Err(e)
                .with_context(|| format!("Failed to load model from {}", config.model_path));
        }
        Err(e) => {
            tracing::error!("Model unavailable: {} - predictions will be refused", e);
            ModelState::Unavailable(e.to_string())
        }
    };

    let state = AppState::new(config.clone(), model);
    let app = create_router(state);

    // Start server
    let addr = config.bind_addr();
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
