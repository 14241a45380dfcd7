//! Storecheck maintenance CLI
//!
//! Out-of-band repair of test-data drift, straight against the
//! backend's store. No test invokes this implicitly; it exists for the
//! operator cleaning up after interrupted runs.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use storecheck_common::{logging, SuiteConfig, UserStore};

/// Storecheck maintenance commands
#[derive(Parser)]
#[command(name = "storecheck")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the suite configuration file
    #[arg(long, env = "STORECHECK_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Backend store path (overrides the configured one)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Maintain the backend's user table
    #[command(subcommand)]
    Users(UsersCommands),

    /// Show version information
    Version,
}

#[derive(Subcommand)]
enum UsersCommands {
    /// List all user rows ordered by id
    List,

    /// Delete a single user by primary key
    Delete {
        /// Row id to delete
        id: i64,
    },

    /// Delete every user except the first N seed accounts
    Prune {
        /// How many of the lowest ids to keep (default from config)
        #[arg(long)]
        keep: Option<usize>,
    },
}

fn main() -> anyhow::Result<()> {
    logging::init(None)?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Users(command) => {
            let config_path = cli
                .config
                .unwrap_or_else(storecheck_common::default_config_path);
            let config = SuiteConfig::load(&config_path)
                .with_context(|| format!("loading configuration from {}", config_path.display()))?;

            let db_path = cli.database.unwrap_or_else(|| config.database.path.clone());
            let store = UserStore::open(&db_path)
                .with_context(|| format!("opening backend store at {}", db_path.display()))?;
            run_users_command(command, &store, &config)
        }
        Commands::Version => {
            println!("storecheck {}", storecheck_common::VERSION);
            Ok(())
        }
    }
}

fn run_users_command(
    command: UsersCommands,
    store: &UserStore,
    config: &SuiteConfig,
) -> anyhow::Result<()> {
    match command {
        UsersCommands::List => {
            let users = store.list_users()?;
            for user in &users {
                println!("{}\t{}\t{}", user.id, user.username, user.email);
            }
            info!("{} users", users.len());
        }
        UsersCommands::Delete { id } => {
            if store.delete_user(id)? {
                println!("User with id {} deleted", id);
            } else {
                println!("No user found with id {}", id);
            }
        }
        UsersCommands::Prune { keep } => {
            let keep = keep.unwrap_or(config.database.keep_seed_users);
            let removed = store.prune_users(keep)?;
            println!("Removed {} users, kept the first {}", removed, keep);
        }
    }
    Ok(())
}
