use botctl_server::{AppState, build_router, error::ServerError, logger};

use std::error::Error;
use std::path::PathBuf;

use log::{error, info};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Any config problem stops us before the port is opened
    let config = botctl_config::Config::load()?;
    config.validate()?;

    let log_file_path = config.logging.file.as_ref().map(PathBuf::from);
    if let Some(dir) = log_file_path.as_ref().and_then(|p| p.parent())
        && !dir.as_os_str().is_empty()
    {
        std::fs::create_dir_all(dir)?;
    }

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting botctl-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let app = build_router(AppState::from_config(&config));

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| ServerError::Bind {
            addr: bind_addr.clone(),
            source: e,
        })?;

    let actual_addr = listener.local_addr()?;
    info!("Control panel listening on http://{}", actual_addr);

    // The bot runs in its own session and outlives the panel.
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;

    info!("Graceful shutdown complete; {} left as is", config.bot.name);
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received SIGINT (Ctrl+C), initiating graceful shutdown"),
        Err(e) => {
            error!("Failed to listen for SIGINT: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
