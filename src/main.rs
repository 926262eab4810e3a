use std::net::SocketAddr;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};
use weight_tracker::{AppState, Config, load_data, router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();

    fmt()
        .with_env_filter(EnvFilter::try_new(&config.log_filter)?)
        .init();

    if let Some(parent) = config
        .data_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
    {
        tokio::fs::create_dir_all(parent).await?;
    }

    let data = load_data(&config.data_path).await;
    info!(
        users = data.users.len(),
        entries = data.entries.len(),
        path = %config.data_path.display(),
        "tracker data ready"
    );
    let app = router(AppState::new(config.data_path.clone(), data));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
