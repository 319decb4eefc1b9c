use colcalc_monday::client::{DEFAULT_API_URL, DEFAULT_API_VERSION};

use crate::auth::session::SessionConfig;

/// Where calculation records are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// Postgres at the given URL.
    Postgres { database_url: String },
    /// Process-local storage; records are lost on restart.
    Memory,
}

/// Settings for outbound monday GraphQL calls.
#[derive(Debug, Clone)]
pub struct MondayConfig {
    /// GraphQL endpoint (default: `https://api.monday.com/v2`).
    pub api_url: String,
    /// `API-Version` header (default: `2024-04`).
    pub api_version: String,
    /// Per-call HTTP timeout in seconds (default: `30`).
    pub http_timeout_secs: u64,
}

/// Server configuration loaded from environment variables.
///
/// All fields except the signing secret have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Session token verification settings.
    pub session: SessionConfig,
    pub monday: MondayConfig,
    pub store: StoreBackend,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                      |
    /// |----------------------------|------------------------------|
    /// | `HOST`                     | `0.0.0.0`                    |
    /// | `PORT`                     | `3000`                       |
    /// | `CORS_ORIGINS`             | `http://localhost:5173`      |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                         |
    /// | `MONDAY_SIGNING_SECRET`    | -- (required)                |
    /// | `MONDAY_API_URL`           | `https://api.monday.com/v2`  |
    /// | `MONDAY_API_VERSION`       | `2024-04`                    |
    /// | `MONDAY_HTTP_TIMEOUT_SECS` | `30`                         |
    /// | `CALCULATION_STORE`        | `postgres` (or `memory`)     |
    /// | `DATABASE_URL`             | -- (required for `postgres`) |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let monday = MondayConfig {
            api_url: std::env::var("MONDAY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into()),
            api_version: std::env::var("MONDAY_API_VERSION")
                .unwrap_or_else(|_| DEFAULT_API_VERSION.into()),
            http_timeout_secs: std::env::var("MONDAY_HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".into())
                .parse()
                .expect("MONDAY_HTTP_TIMEOUT_SECS must be a valid u64"),
        };

        let store = match std::env::var("CALCULATION_STORE")
            .unwrap_or_else(|_| "postgres".into())
            .to_ascii_lowercase()
            .as_str()
        {
            "memory" => StoreBackend::Memory,
            "postgres" => StoreBackend::Postgres {
                database_url: std::env::var("DATABASE_URL")
                    .expect("DATABASE_URL must be set when CALCULATION_STORE=postgres"),
            },
            other => panic!("CALCULATION_STORE must be 'postgres' or 'memory', got '{other}'"),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            session: SessionConfig::from_env(),
            monday,
            store,
        }
    }
}
