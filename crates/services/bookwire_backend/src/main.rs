// File: crates/services/bookwire_backend/src/main.rs
use bookwire_backend::{build_app, shutdown::shutdown_signal};
use bookwire_common::logging;
use bookwire_config::env_vars::config_path_to_env_var;
use bookwire_config::{ensure_dotenv_loaded, load_config};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    // .env may carry RUST_LOG, so load it before the subscriber
    ensure_dotenv_loaded();
    logging::init();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            error!("✗ Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = config.validate() {
        error!("✗ {}", e);
        info!(
            "Webhook URLs can also be set as {} and {}",
            config_path_to_env_var("n8n.book_webhook_url"),
            config_path_to_env_var("n8n.cancel_webhook_url")
        );
        return ExitCode::FAILURE;
    }
    info!("✓ Configuration validated");

    let config = Arc::new(config);
    let app = match build_app(config.clone()) {
        Ok(app) => app,
        Err(e) => {
            error!("✗ Failed to build application: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("✗ Failed to bind {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    info!("✓ Server running on port {}", config.server.port);
    info!("✓ Environment: {}", config.environment);
    info!("✓ Health check: http://localhost:{}/health", config.server.port);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Server closed");
    ExitCode::SUCCESS
}
