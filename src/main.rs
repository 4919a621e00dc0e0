use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use dotenv::dotenv;
use tracing::info;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use logforge_config::store::FileConfigStore;
use logforge_config::web;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the persisted configuration document (falls back to the
    /// CONFIG_PATH environment variable)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind the config service on
    #[arg(short, long, default_value = "0.0.0.0:8080")]
    listen: SocketAddr,
}

fn init_logging() {
    // Log to a file: JSON format, daily rotation
    let file_appender = rolling::daily("logs", "config-service.log");
    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .json();

    // Log to stdout: human-readable format
    let stdout_layer = fmt::layer().with_writer(std::io::stdout);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenv().ok();
    init_logging();

    let args = Args::parse();
    let config_path = args
        .config
        .or_else(|| env::var("CONFIG_PATH").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("data/config.json"));

    info!(path = %config_path.display(), "Starting config service.");

    let store = Arc::new(FileConfigStore::new(config_path));
    let app = web::create_axum_router(store);

    let listener = tokio::net::TcpListener::bind(args.listen).await?;
    info!(address = %args.listen, "Config service listening.");

    axum::serve(listener, app.into_make_service())
        .await
        .map_err(Box::new)?;

    Ok(())
}
