use crate::error::Result;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise the level is `debug` when verbose
/// and `warn` when not. With a log file, events go there without ANSI colours.
/// A subscriber installed by an earlier call in the same process stays active.
pub fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let installed = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init(),
    };

    if let Err(err) = installed {
        debug!(error = %err, "Tracing subscriber already installed");
    }
    Ok(())
}
