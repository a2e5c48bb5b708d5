use std::path::PathBuf;

use anyhow::Context;
use threadline_core::authorization::AccessPolicy;
use threadline_ledger::containment::ContainmentMode;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JSON access policy file. The built-in matrix is used when unset.
    pub policy_path: Option<PathBuf>,
    /// Containment check strategy for both channels (default: `scan`).
    pub containment_mode: ContainmentMode,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `POLICY_PATH`          | unset                      |
    /// | `CONTAINMENT_MODE`     | `scan`                     |
    pub fn from_env() -> anyhow::Result<Self> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .context("PORT must be a valid u16")?;

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .context("REQUEST_TIMEOUT_SECS must be a valid u64")?;

        let policy_path = std::env::var("POLICY_PATH")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let containment_mode = match std::env::var("CONTAINMENT_MODE") {
            Ok(raw) => raw.trim().parse().map_err(anyhow::Error::msg)?,
            Err(_) => ContainmentMode::default(),
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            policy_path,
            containment_mode,
        })
    }

    /// The configured access policy, validated.
    pub fn load_policy(&self) -> anyhow::Result<AccessPolicy> {
        match &self.policy_path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read policy file {}", path.display()))?;
                AccessPolicy::from_json(&raw)
                    .with_context(|| format!("Invalid policy file {}", path.display()))
            }
            None => Ok(AccessPolicy::default()),
        }
    }
}
