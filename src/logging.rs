use anyhow::Context;
use std::{fs::File, path::Path, sync::Mutex};
use tracing::debug;
use tracing_subscriber::{
    fmt, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Sends logs to `path`, filtered by `RUST_LOG` or else `default_filter`.
pub fn init_tracing(path: &Path, default_filter: &str) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("couldn't create log file {}", path.display()))?;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter)
            .with_context(|| format!("invalid log filter {default_filter:?}"))?,
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(filter)
        .try_init()
        .context("couldn't install the tracing subscriber")?;

    debug!(path = %path.display(), "logging initialised");

    Ok(())
}
