//! Logging setup
//!
//! Logs go to stderr so stdout only ever carries versions. `RUST_LOG` wins
//! when set; otherwise `--verbose` selects debug and the default is warn.

use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Default filter directive for a verbosity flag
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "lastver=debug"
    } else {
        "warn"
    }
}

/// Install the global tracing subscriber
pub fn init(verbose: bool) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
