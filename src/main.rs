use std::env;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bank_hours_engine::api::{AppState, create_router};
use bank_hours_engine::config::ConfigLoader;

const DEFAULT_CONFIG_DIR: &str = "./config/default";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bank_hours_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config_dir = env::var("BANK_HOURS_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.into());
    let mut config = ConfigLoader::load(&config_dir)?;
    if let Ok(bind_addr) = env::var("BIND_ADDR") {
        config = config.with_bind_addr(bind_addr);
    }

    let bind_addr = config.engine().server.bind_addr.clone();
    tracing::info!(
        "Starting Bank of Hours Engine v{}",
        env!("CARGO_PKG_VERSION")
    );
    tracing::info!(
        config_dir = %config_dir,
        employees = config.seed().employees.len(),
        holidays = config.holidays().len(),
        "Configuration loaded"
    );

    let app = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("HTTP server listening on {}", bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
