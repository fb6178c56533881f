//! Environment-driven configuration
//!
//! Loaded once at startup via dotenvy. Nothing here is consulted by the
//! pricing or document engines directly; they receive everything they need
//! as explicit parameters.

use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string
    pub database_url: String,
    /// Usernames allowed to view and delete quotations of all users
    pub admin_users: Vec<String>,
}

impl Config {
    /// Load configuration from the environment (and `.env` if present).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost/tripquote".to_string());

        let admin_users = env::var("TRIPQUOTE_ADMIN_USERS")
            .unwrap_or_else(|_| "admin".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self {
            database_url,
            admin_users,
        }
    }

    /// Check a username against the static admin allow-list.
    pub fn is_admin(&self, username: &str) -> bool {
        self.admin_users.iter().any(|u| u == username)
    }
}
