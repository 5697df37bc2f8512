/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
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
    /// Base URL of the raffle/prize backend.
    pub backend_base_url: String,
    /// Service credential id for the backend token exchange.
    pub backend_client_id: String,
    /// Service credential secret for the backend token exchange.
    pub backend_client_secret: String,
    /// Refresh the upstream bearer token this many seconds before it expires.
    pub token_refresh_margin_secs: i64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                     | Default                 |
    /// |-----------------------------|-------------------------|
    /// | `HOST`                      | `0.0.0.0`               |
    /// | `PORT`                      | `3000`                  |
    /// | `CORS_ORIGINS`              | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`      | `30`                    |
    /// | `BACKEND_BASE_URL`          | `http://localhost:8080` |
    /// | `BACKEND_CLIENT_ID`         | `tombola-admin`         |
    /// | `BACKEND_CLIENT_SECRET`     | (empty)                 |
    /// | `TOKEN_REFRESH_MARGIN_SECS` | `60`                    |
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

        let backend_base_url =
            std::env::var("BACKEND_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".into());

        let backend_client_id =
            std::env::var("BACKEND_CLIENT_ID").unwrap_or_else(|_| "tombola-admin".into());

        let backend_client_secret = std::env::var("BACKEND_CLIENT_SECRET").unwrap_or_default();

        let token_refresh_margin_secs: i64 = std::env::var("TOKEN_REFRESH_MARGIN_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("TOKEN_REFRESH_MARGIN_SECS must be a valid i64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            backend_base_url,
            backend_client_id,
            backend_client_secret,
            token_refresh_margin_secs,
        }
    }
}
