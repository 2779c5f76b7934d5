//! Process-level configuration: environment loading and tracing setup

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ag_shared::config::{AppConfig, LogFormat, LoggingConfig};

/// Load `.env` (if present) and build the application configuration
pub fn load_config() -> AppConfig {
    if let Err(e) = dotenvy::dotenv() {
        // A missing .env file is normal outside development
        if !e.not_found() {
            eprintln!("Failed to read .env file: {}", e);
        }
    }

    AppConfig::from_env()
}

/// Install the global tracing subscriber
///
/// The filter comes from `logging.level`, which already honours `RUST_LOG`.
pub fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(&logging.level)
        .or_else(|_| EnvFilter::try_new("info"))?;

    let registry = tracing_subscriber::registry().with(filter);

    match logging.format {
        LogFormat::Pretty => registry.with(fmt::layer().pretty()).try_init()?,
        LogFormat::Compact => registry.with(fmt::layer().compact()).try_init()?,
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(true))
            .try_init()?,
    }

    Ok(())
}
