use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Storage backend to use: "sqlite", "rest" or "memory" (default: "sqlite").
    pub backend: String,
    /// Path to SQLite database file (default: "postalstore.db").
    /// Note: Only used when the `sqlite` feature is enabled.
    #[allow(dead_code)]
    pub sqlite_path: String,
    /// Base URL of the remote table API (default: "http://localhost:3000").
    /// Note: Only used when the `rest` feature is enabled.
    #[allow(dead_code)]
    pub store_url: String,
    /// API key sent with every remote table API request, if set.
    #[allow(dead_code)]
    pub store_api_key: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `STORE_BACKEND` - Storage backend name (default: "sqlite")
    /// - `SQLITE_PATH` - SQLite database path (default: "postalstore.db")
    /// - `STORE_URL` - Remote table API base URL (default: "http://localhost:3000")
    /// - `STORE_API_KEY` - Remote table API key (default: unset)
    pub fn from_env() -> Self {
        Self {
            backend: env::var("STORE_BACKEND").unwrap_or_else(|_| "sqlite".to_string()),
            sqlite_path: env::var("SQLITE_PATH").unwrap_or_else(|_| "postalstore.db".to_string()),
            store_url: env::var("STORE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            store_api_key: env::var("STORE_API_KEY").ok(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
