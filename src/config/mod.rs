use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub pagination: PaginationConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
    pub email: EmailConfig,
    pub otp: OtpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Server-side cap on the `limit` query parameter. Off by default; no
    /// agreed ceiling exists yet.
    pub max_limit: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret the identity provider signs access tokens with.
    pub jwt_secret: String,
    /// Base URL of the identity provider HTTP API.
    pub provider_url: String,
    /// Service-role key, sent as a bearer token on admin calls. Lives only in
    /// process configuration.
    pub service_key: String,
    /// Public API key sent as the `apikey` header on every provider call.
    pub anon_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub bucket: String,
    /// Default lifetime of presigned GET URLs.
    pub presign_expiry_secs: u64,
    /// Upper bound a client may request via the `expires_in` parameter.
    pub max_presign_expiry_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    pub transport: EmailTransportConfig,
    pub from_email: String,
    pub from_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EmailTransportConfig {
    Smtp { host: String, port: u16, username: String, password: String },
    /// Writes outgoing mail to files; development and tests.
    File { path: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpConfig {
    pub ttl_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("SERVER_PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }

        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECT_TIMEOUT_SECS") {
            self.database.connect_timeout_secs =
                v.parse().unwrap_or(self.database.connect_timeout_secs);
        }

        if let Ok(v) = env::var("PAGINATION_MAX_LIMIT") {
            self.pagination.max_limit = v.parse().ok();
        }

        if let Ok(v) = env::var("AUTH_JWT_SECRET") {
            self.auth.jwt_secret = v;
        }
        if let Ok(v) = env::var("AUTH_PROVIDER_URL") {
            self.auth.provider_url = v.trim_end_matches('/').to_string();
        }
        if let Ok(v) = env::var("AUTH_SERVICE_KEY") {
            self.auth.service_key = v;
        }
        if let Ok(v) = env::var("AUTH_ANON_KEY") {
            self.auth.anon_key = v;
        }

        if let Ok(v) = env::var("STORAGE_BUCKET") {
            self.storage.bucket = v;
        }
        if let Ok(v) = env::var("STORAGE_PRESIGN_EXPIRY_SECS") {
            self.storage.presign_expiry_secs =
                v.parse().unwrap_or(self.storage.presign_expiry_secs);
        }
        if let Ok(v) = env::var("STORAGE_MAX_PRESIGN_EXPIRY_SECS") {
            self.storage.max_presign_expiry_secs =
                v.parse().unwrap_or(self.storage.max_presign_expiry_secs);
        }

        if let (Ok(host), Ok(username), Ok(password)) = (
            env::var("SMTP_HOST"),
            env::var("SMTP_USERNAME"),
            env::var("SMTP_PASSWORD"),
        ) {
            let port = env::var("SMTP_PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(587);
            self.email.transport = EmailTransportConfig::Smtp { host, port, username, password };
        }
        if let Ok(v) = env::var("EMAIL_FROM_ADDRESS") {
            self.email.from_email = v;
        }
        if let Ok(v) = env::var("EMAIL_FROM_NAME") {
            self.email.from_name = v;
        }

        if let Ok(v) = env::var("OTP_TTL_SECS") {
            self.otp.ttl_secs = v.parse().unwrap_or(self.otp.ttl_secs);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig { port: 3000 },
            database: DatabaseConfig { max_connections: 10, connect_timeout_secs: 30 },
            pagination: PaginationConfig { max_limit: None },
            auth: AuthConfig {
                jwt_secret: String::new(),
                provider_url: "http://localhost:9999".to_string(),
                service_key: String::new(),
                anon_key: String::new(),
            },
            storage: StorageConfig {
                bucket: "practice-files-dev".to_string(),
                presign_expiry_secs: 900,
                max_presign_expiry_secs: 3600,
            },
            email: EmailConfig {
                transport: EmailTransportConfig::File { path: "./outbox".to_string() },
                from_email: "noreply@localhost".to_string(),
                from_name: "Practice API (dev)".to_string(),
            },
            otp: OtpConfig { ttl_secs: 600 },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig { port: 3000 },
            database: DatabaseConfig { max_connections: 20, connect_timeout_secs: 10 },
            pagination: PaginationConfig { max_limit: None },
            auth: AuthConfig {
                jwt_secret: String::new(),
                provider_url: String::new(),
                service_key: String::new(),
                anon_key: String::new(),
            },
            storage: StorageConfig {
                bucket: "practice-files-staging".to_string(),
                presign_expiry_secs: 900,
                max_presign_expiry_secs: 3600,
            },
            email: EmailConfig {
                transport: EmailTransportConfig::File { path: "./outbox".to_string() },
                from_email: "noreply@staging.example.com".to_string(),
                from_name: "Practice API".to_string(),
            },
            otp: OtpConfig { ttl_secs: 600 },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig { port: 3000 },
            database: DatabaseConfig { max_connections: 50, connect_timeout_secs: 5 },
            pagination: PaginationConfig { max_limit: None },
            auth: AuthConfig {
                jwt_secret: String::new(),
                provider_url: String::new(),
                service_key: String::new(),
                anon_key: String::new(),
            },
            storage: StorageConfig {
                bucket: "practice-files".to_string(),
                presign_expiry_secs: 900,
                max_presign_expiry_secs: 3600,
            },
            email: EmailConfig {
                // SMTP must come from env in production; the file fallback
                // keeps missing configuration visible in the outbox.
                transport: EmailTransportConfig::File { path: "./outbox".to_string() },
                from_email: "noreply@example.com".to_string(),
                from_name: "Practice API".to_string(),
            },
            otp: OtpConfig { ttl_secs: 300 },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn development_defaults() {
        let config = AppConfig::development();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.pagination.max_limit, None);
        assert!(matches!(config.email.transport, EmailTransportConfig::File { .. }));
    }

    #[test]
    fn production_tightens_database_settings() {
        let config = AppConfig::production();
        assert_eq!(config.database.max_connections, 50);
        assert_eq!(config.database.connect_timeout_secs, 5);
        assert_eq!(config.otp.ttl_secs, 300);
    }
}
