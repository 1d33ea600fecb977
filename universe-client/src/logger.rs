//! Logging setup
//!
//! Console output always; an optional daily-rotating file under `log_dir`.
//! `RUST_LOG` overrides the level passed in.

use std::fs;
use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global subscriber
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug", "universe_client=trace")
/// * `json_format` - JSON lines instead of human-readable output
/// * `log_dir` - Optional directory for `client.YYYY-MM-DD.log` files
///
/// # Examples
/// ```no_run
/// universe_client::logger::init_logger("debug", false, None)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logger(level: &str, json_format: bool, log_dir: Option<&str>) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console_layer = if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .boxed()
    } else {
        fmt::layer().with_target(true).boxed()
    };

    let file_layer = match log_dir {
        Some(dir) => {
            let appender = file_appender(Path::new(dir))?;
            Some(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::sync::Mutex::new(appender))
                    .boxed(),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    tracing::info!(level, json_format, "Logger initialized");
    Ok(())
}

/// Daily file appender writing `client.YYYY-MM-DD.log`
fn file_appender(dir: &Path) -> anyhow::Result<RollingFileAppender> {
    fs::create_dir_all(dir)?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("client")
        .filename_suffix("log")
        .build(dir)?;
    Ok(appender)
}

/// Initialize from a [`crate::ClientConfig`]
pub fn init_from_config(config: &crate::ClientConfig) -> anyhow::Result<()> {
    init_logger(&config.log_level, config.log_json, None)
}
