//! Application configuration loaded from environment variables.

use std::net::{IpAddr, SocketAddr};

use serde::Deserialize;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Database ===
    /// Database connection string (e.g. `sqlite://patients.db`).
    pub database_url: String,

    /// Maximum number of pooled database connections.
    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,

    /// How long to wait for a pooled connection, in milliseconds.
    #[serde(default = "default_acquire_timeout")]
    pub database_acquire_timeout_ms: u64,

    // === Server Configuration ===
    /// HTTP listening port. `FLASK_PORT` is read as a fallback name.
    #[serde(default = "default_port", alias = "flask_port")]
    pub port: u16,

    /// Address the HTTP server binds to.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Install the Prometheus recorder and expose `/metrics`.
    #[serde(default = "default_true")]
    pub enable_metrics: bool,
}

fn default_max_connections() -> u32 {
    5
}

fn default_acquire_timeout() -> u64 {
    5_000
}

fn default_port() -> u16 {
    5001
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Configuration for the given database with every other setting at its default.
    pub fn for_database(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            database_max_connections: default_max_connections(),
            database_acquire_timeout_ms: default_acquire_timeout(),
            port: default_port(),
            bind_address: default_bind_address(),
            enable_metrics: default_true(),
        }
    }

    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.database_url.trim().is_empty() {
            return Err("DATABASE_URL is required".to_string());
        }

        if !self.database_url.starts_with("sqlite:") {
            return Err("DATABASE_URL must be a sqlite: connection string".to_string());
        }

        if self.database_max_connections == 0 {
            return Err("DATABASE_MAX_CONNECTIONS must be at least 1".to_string());
        }

        if self.bind_address.parse::<IpAddr>().is_err() {
            return Err(format!(
                "BIND_ADDRESS {:?} is not a valid IP address",
                self.bind_address
            ));
        }

        Ok(())
    }

    /// Socket address the HTTP server listens on.
    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        let ip: IpAddr = self
            .bind_address
            .parse()
            .map_err(|e| format!("invalid BIND_ADDRESS: {e}"))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Whether the database lives only in memory.
    pub fn is_in_memory(&self) -> bool {
        self.database_url.contains(":memory:") || self.database_url.contains("mode=memory")
    }
}
