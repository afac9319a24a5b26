//! Runtime configuration loaded from environment variables.

use chrono::Duration;
use envconfig::Envconfig;

use sexyboom_auth::Credentials;
use sexyboom_observability::{LogConfig, LogFormat};

/// Password the login gate falls back to when none is configured.
pub const DEFAULT_ADMIN_PASSWORD: &str = "2308";

#[derive(Debug, Clone, Envconfig)]
pub struct AppConfig {
    #[envconfig(nested = true)]
    pub server: ServerConfig,

    #[envconfig(nested = true)]
    pub auth: AuthConfig,

    /// Stock level at or below which a product counts as low on stock.
    #[envconfig(from = "LOW_STOCK_THRESHOLD", default = "5")]
    pub low_stock_threshold: u64,
}

#[derive(Debug, Clone, Envconfig)]
pub struct ServerConfig {
    #[envconfig(from = "HOST", default = "0.0.0.0")]
    pub host: String,

    #[envconfig(from = "PORT", default = "8080")]
    pub port: u16,

    #[envconfig(from = "LOG_LEVEL", default = "info")]
    pub log_level: String,

    /// `json` or `pretty`.
    #[envconfig(from = "LOG_FORMAT", default = "json")]
    pub log_format: String,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Unknown formats fall back to JSON.
    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            level: self.log_level.clone(),
            format: self.log_format.parse().unwrap_or(LogFormat::Json),
        }
    }
}

#[derive(Clone, Envconfig)]
pub struct AuthConfig {
    #[envconfig(from = "ADMIN_USERNAME", default = "admin")]
    pub admin_username: String,

    #[envconfig(from = "ADMIN_PASSWORD", default = "2308")]
    pub admin_password: String,

    #[envconfig(from = "SESSION_TTL_MINUTES", default = "480")]
    pub session_ttl_minutes: i64,
}

impl core::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("admin_username", &self.admin_username)
            .field("admin_password", &"***")
            .field("session_ttl_minutes", &self.session_ttl_minutes)
            .finish()
    }
}

impl AuthConfig {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.admin_username.clone(), self.admin_password.clone())
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::minutes(self.session_ttl_minutes)
    }

    pub fn uses_default_password(&self) -> bool {
        self.admin_password == DEFAULT_ADMIN_PASSWORD
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let config = Self::init_from_env()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.auth.admin_username.trim().is_empty() {
            anyhow::bail!("ADMIN_USERNAME cannot be empty");
        }
        if self.auth.admin_password.is_empty() {
            anyhow::bail!("ADMIN_PASSWORD cannot be empty");
        }
        if self.auth.session_ttl_minutes <= 0 {
            anyhow::bail!("SESSION_TTL_MINUTES must be positive");
        }
        Ok(())
    }

    /// Log the effective configuration. The password is never printed.
    pub fn log_config(&self) {
        tracing::info!(
            address = %self.server.address(),
            log_level = %self.server.log_level,
            log_format = %self.server.log_format,
            "server configuration"
        );
        tracing::info!(
            admin_username = %self.auth.admin_username,
            session_ttl_minutes = self.auth.session_ttl_minutes,
            low_stock_threshold = self.low_stock_threshold,
            "application configuration"
        );
        if self.auth.uses_default_password() {
            tracing::warn!("ADMIN_PASSWORD not set; using insecure default");
        }
    }
}
