//! Suite configuration
//!
//! All endpoints, credentials, and file paths come from a single TOML
//! document read once at startup. Components receive the parsed
//! [`SuiteConfig`] by reference; there is no process-wide config state.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Top-level suite configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteConfig {
    /// Shared connection settings
    pub common: CommonSection,

    /// Admin account credentials
    pub admin: AdminSection,

    /// Seeded account used by the authentication suite
    pub test_user_account: TestUserAccount,

    /// API endpoint catalog
    pub end_points: Endpoints,

    /// Per-area log file paths
    pub logger: LoggerSection,

    /// Backend store settings for the maintenance utility
    pub database: DatabaseSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommonSection {
    /// Base URL the endpoint paths are appended to
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminSection {
    pub admin_username: String,
    pub admin_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestUserAccount {
    pub test_user_id: i64,
    pub test_user_name: String,
    pub test_user_username: String,
    pub test_user_email: String,
    pub test_user_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoints {
    pub login_endpoint: String,
    pub register_user_endpoint: String,
    pub users_endpoint: String,
    pub edit_user_endpoint: String,
    pub delete_user_endpoint: String,
    pub products_endpoint: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerSection {
    pub logs_user_path: PathBuf,
    pub logs_authentication_path: PathBuf,
    pub logs_product_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSection {
    /// Path to the backend's SQLite store
    pub path: PathBuf,

    /// Seed accounts preserved by `users prune`
    pub keep_seed_users: usize,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            common: CommonSection {
                base_url: "http://127.0.0.1:8000/api/".to_string(),
            },
            admin: AdminSection {
                admin_username: "admin".to_string(),
                admin_password: "admin".to_string(),
            },
            test_user_account: TestUserAccount {
                test_user_id: 2,
                test_user_name: "Suite User".to_string(),
                test_user_username: "suite.user@example.com".to_string(),
                test_user_email: "suite.user@example.com".to_string(),
                test_user_password: "SuitePass123@".to_string(),
            },
            end_points: Endpoints {
                login_endpoint: "users/login/".to_string(),
                register_user_endpoint: "users/register/".to_string(),
                users_endpoint: "users".to_string(),
                edit_user_endpoint: "users/profile/update/".to_string(),
                delete_user_endpoint: "users/delete/".to_string(),
                products_endpoint: "products".to_string(),
            },
            logger: LoggerSection {
                logs_user_path: PathBuf::from("logs/users.log"),
                logs_authentication_path: PathBuf::from("logs/authentication.log"),
                logs_product_path: PathBuf::from("logs/products.log"),
            },
            database: DatabaseSection {
                path: PathBuf::from("backend/db.sqlite3"),
                keep_seed_users: 4,
            },
        }
    }
}

impl SuiteConfig {
    /// Load configuration from a TOML file.
    ///
    /// A missing file or missing required key is fatal; there is no
    /// partial fallback to defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load from `STORECHECK_CONFIG` if set, otherwise from the
    /// workspace's `configurations/storecheck.toml`.
    pub fn load_default() -> Result<Self> {
        Self::load(&crate::default_config_path())
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}
