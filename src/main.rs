use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use storefront_api::cli::{self, Cli, Commands};
use storefront_api::config::{self, AppConfig};
use storefront_api::database::Store;
use storefront_api::{app, AppState};

fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let mut config = config::config().clone();

    init_tracing(&config.server.log_level);
    config.validate()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.server.worker_threads)
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;

    runtime.block_on(async move {
        match cli.command() {
            Commands::Serve { port } => {
                if let Some(port) = port {
                    config.server.port = port;
                }
                serve(config).await
            }
            Commands::CreateUser { username, password } => create_user(config, username, password).await,
        }
    })
}

fn init_tracing(default_level: &str) {
    // RUST_LOG wins over LOG_LEVEL
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    tracing::info!(
        "Starting storefront API in {:?} mode with {} worker threads",
        config.environment,
        config.server.worker_threads
    );

    let store = Store::from_config(&config.database)
        .await
        .context("failed to open store")?;
    tracing::info!("Using {} store", store.backend());

    let bind_addr = config.bind_addr();
    let state = AppState::new(config, store.clone());

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    store.close().await;
    tracing::info!("Server stopped");
    Ok(())
}

async fn create_user(config: AppConfig, username: String, password: String) -> anyhow::Result<()> {
    if config.database.url.is_none() {
        anyhow::bail!("create-user requires DATABASE_URL");
    }

    let store = Store::from_config(&config.database)
        .await
        .context("failed to open store")?;
    let result = cli::create_user(&store, username, password).await;
    store.close().await;

    let user = result?;
    println!("Created user '{}' ({})", user.username, user.id);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
