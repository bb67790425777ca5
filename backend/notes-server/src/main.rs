use notes_server::{build_router, build_state, logger};

use std::error::Error;
use std::time::Duration;

use log::{error, info, warn};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // .env is optional; real environment variables win
    if let Err(e) = dotenvy::dotenv()
        && !e.not_found()
    {
        eprintln!("Failed to read .env: {}", e);
    }

    let config = notes_config::Config::load()?;
    config.validate()?;

    logger::initialize(
        config.logging.level,
        config.log_file_path()?,
        config.logging.colored,
    )?;

    info!("Starting notes-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let database_path = config.database_path()?;
    let pool = notes_db::connect(&database_path, config.database.max_connections).await?;

    notes_db::run_migrations(&pool).await?;

    let state = build_state(&config, pool.clone())?;
    let app = build_router(
        state,
        &config.server.base_path,
        Duration::from_secs(config.server.request_timeout_secs),
    );

    let listener = TcpListener::bind(config.bind_addr()).await?;
    // Port 0 means the OS picked one
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("Graceful shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received SIGINT (Ctrl+C), initiating graceful shutdown"),
        Err(e) => {
            error!("Failed to listen for SIGINT: {}", e);
            warn!("Graceful shutdown unavailable; the process must be killed");
            std::future::pending::<()>().await;
        }
    }
}
