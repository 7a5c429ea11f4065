use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use dispensary_lib::api::start_api_server;
use dispensary_lib::config::{self, AppConfig};
use dispensary_lib::core_state::CoreState;
use dispensary_lib::session::StaticCredentials;

/// Clinic and pharmacy back office API.
#[derive(Parser, Debug)]
#[command(name = "dispensary", version, about)]
struct Cli {
    /// Store file; overrides DISPENSARY_DATABASE
    #[arg(long)]
    database: Option<PathBuf>,

    /// Listen address; overrides DISPENSARY_BIND
    #[arg(long)]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    dispensary_lib::init_tracing();

    let mut app_config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(path) = cli.database {
        app_config.database_path = path;
    }
    if let Some(addr) = cli.bind {
        app_config.bind_addr = addr;
    }

    tracing::info!(
        "{} starting v{} (store {})",
        config::APP_NAME,
        config::APP_VERSION,
        app_config.database_path.display()
    );

    if let Some(parent) = app_config.database_path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            tracing::error!("Cannot create {}: {e}", parent.display());
            return ExitCode::FAILURE;
        }
    }

    let verifier = StaticCredentials::new(&app_config.username, &app_config.password);
    let core = Arc::new(
        CoreState::new(app_config.database_path, Box::new(verifier))
            .with_inactivity_timeout(app_config.session_timeout),
    );

    let mut server = match start_api_server(core, app_config.bind_addr).await {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(addr = %server.info.server_addr, "Listening");

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Cannot listen for Ctrl-C: {e}");
    }
    server.shutdown();
    server.stopped().await;
    ExitCode::SUCCESS
}
