//! Storecheck Common Library
//!
//! Shared configuration, error types, random identity data, logging
//! setup, and the direct backend-store maintenance utility.

pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod random;

// Re-export commonly used types
pub use config::SuiteConfig;
pub use db::{UserRow, UserStore};
pub use error::{Error, Result};

/// Storecheck version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Configuration file path: `STORECHECK_CONFIG` when set, otherwise the
/// workspace's `configurations/storecheck.toml`.
pub fn default_config_path() -> std::path::PathBuf {
    std::env::var_os("STORECHECK_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|| {
            std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
                .join("../../configurations/storecheck.toml")
        })
}
