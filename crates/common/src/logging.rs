//! Logging setup
//!
//! Leveled text log written to the console and, when a path is given,
//! appended to a per-area log file (products, users, authentication).
//! The file layer never truncates: one run's entries follow the last.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::Result;

/// Install the global subscriber. Safe to call from every test binary;
/// only the first call in a process takes effect.
pub fn init(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let console = fmt::layer().with_target(false);

    match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let file_layer = fmt::layer().with_ansi(false).with_writer(Arc::new(file));

            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .with(file_layer)
                .try_init();
        }
        None => {
            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .try_init();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_creates_log_directory_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("suite.log");

        init(Some(&path)).unwrap();
        tracing::info!("logging smoke entry");

        assert!(path.exists());
    }

    #[test]
    fn repeated_init_is_harmless() {
        init(None).unwrap();
        init(None).unwrap();
    }
}
