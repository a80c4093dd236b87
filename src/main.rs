use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use stories_api::{app, config, state::AppState};

#[derive(Parser)]
#[command(name = "stories-api")]
#[command(about = "Stories API server")]
#[command(version)]
struct Args {
    #[arg(long, help = "Port to listen on (overrides PORT)")]
    port: Option<u16>,

    #[arg(long, help = "Address to bind (overrides BIND_ADDRESS)")]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up SUPABASE_URL, ADMIN_PASSWORD, etc.
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();

    let config = config::config().clone();
    tracing::info!("Starting Stories API in {:?} mode", config.environment);
    if config.backend.url.is_none() {
        tracing::warn!("SUPABASE_URL is not set; backend-backed routes will fail");
    }

    let bind_addr = format!(
        "{}:{}",
        args.bind.unwrap_or_else(|| config.server.bind_address.clone()),
        args.port.unwrap_or(config.server.port)
    );

    let state = AppState::from_config(config).context("failed to build backend client")?;

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Stories API listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await.context("server error")?;
    Ok(())
}
