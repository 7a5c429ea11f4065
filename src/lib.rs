pub mod api;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod core_state;
pub mod db;
pub mod models;
pub mod recommendation;
pub mod registry;
pub mod session;

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}
