//! Web server for the FM admin console
#![forbid(unsafe_code)]

use clap::Parser;
use fm_admin_client::{FileTokenStore, Session};
use fm_admin_core::{Config, init_logging};
use fm_admin_web::build_app;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use tracing::{debug, info};

/// Command line interface for the admin console
#[derive(Parser)]
#[command(
    name = "fm-admin",
    version = env!("CARGO_PKG_VERSION"),
    about = "Admin console for the FM business API"
)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Address to bind (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Enable structured JSON logging
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn apply(self, config: &mut Config) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }
        if self.json {
            config.logging.format = "json".to_string();
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = Config::load_from(cli.config.as_deref())?;
    cli.apply(&mut config);

    init_logging(&config.logging)?;

    let store = FileTokenStore::new(&config.session.token_file);
    debug!("Token slot at {}", store.path().display());
    let session = Session::restore(store);
    info!(
        "Using API at {} ({})",
        config.api.base_url,
        if session.is_authenticated() { "signed in" } else { "signed out" }
    );

    let host: IpAddr = config
        .server
        .host
        .parse()
        .map_err(|e| format!("Invalid server host '{}': {}", config.server.host, e))?;
    let addr = SocketAddr::new(host, config.server.port);

    let app = build_app(config, session)?;

    info!("Starting admin console on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Admin console stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
