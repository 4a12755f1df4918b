pub mod config;
pub mod models;
pub mod pipeline;
pub mod intelligence;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Initialize tracing. An explicit `level` (from `-v`/`-q`) wins; otherwise
/// `RUST_LOG`, then `config::default_log_filter()`. Safe to call more than once.
pub fn init_tracing(level: Option<LevelFilter>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level_directives(level)),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    tracing::debug!("{} v{} tracing initialized", config::APP_NAME, config::APP_VERSION);
}

fn level_directives(level: LevelFilter) -> String {
    let level = level.to_string().to_lowercase();
    format!("labsift={level},labsift_lib={level}")
}
