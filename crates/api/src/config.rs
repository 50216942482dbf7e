use std::path::PathBuf;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `120`). Bounds a whole
    /// import batch, which runs inside one request.
    pub request_timeout_secs: u64,
    /// Directory uploaded CSV files wait in until a mapping is applied.
    pub staging_dir: PathBuf,
    /// Staged uploads not applied or discarded within this many seconds are
    /// purged (default: `86400`).
    pub staging_ttl_secs: u64,
    /// Upper bound on an uploaded request body, in bytes.
    pub max_upload_bytes: usize,
    /// Emit logs as JSON lines instead of human-readable text.
    pub log_json: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `120`                      |
    /// | `STAGING_DIR`          | `/tmp/stackdesk/imports`   |
    /// | `STAGING_TTL_SECS`     | `86400`                    |
    /// | `MAX_UPLOAD_BYTES`     | `10485760`                 |
    /// | `LOG_FORMAT`           | `text` (`json` to switch)  |
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
            .unwrap_or_else(|_| "120".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let staging_dir = PathBuf::from(
            std::env::var("STAGING_DIR").unwrap_or_else(|_| "/tmp/stackdesk/imports".into()),
        );

        let staging_ttl_secs: u64 = std::env::var("STAGING_TTL_SECS")
            .unwrap_or_else(|_| "86400".into())
            .parse()
            .expect("STAGING_TTL_SECS must be a valid u64");

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| "10485760".into())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        let log_json = std::env::var("LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            staging_dir,
            staging_ttl_secs,
            max_upload_bytes,
            log_json,
        }
    }
}
