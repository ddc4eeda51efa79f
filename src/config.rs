use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

#[derive(Clone)]
pub struct Config {
    pub server_addr: String,
    pub database_url: String,
    pub session_secret: String,
    /// True when no SESSION_SECRET was configured and one was generated
    pub ephemeral_secret: bool,
    /// Session cookie lifetime in seconds
    pub session_ttl: usize,
    pub qr_ttl_minutes: i64,

    // Seeded admin credential
    pub admin_username: String,
    pub admin_password: String,

    /// Overrides the scheme/host taken from the request when building scan URLs
    pub public_base_url: Option<String>,
    pub scan_require_expiry: bool,
    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        // Serverless deployments only have a writable /tmp
        let default_db = if var("VERCEL").is_some() {
            "sqlite:/tmp/attendance.db"
        } else {
            "sqlite:attendance.db"
        };

        let (session_secret, ephemeral_secret) = match var("SESSION_SECRET") {
            Some(secret) if !secret.is_empty() => (secret, false),
            _ => (uuid::Uuid::new_v4().to_string(), true),
        };

        Ok(Self {
            server_addr: var("SERVER_ADDR").unwrap_or_else(|| "0.0.0.0:5000".to_string()),
            database_url: var("DATABASE_URL").unwrap_or_else(|| default_db.to_string()),
            session_secret,
            ephemeral_secret,
            session_ttl: parse_or(&var, "SESSION_TTL", 8 * 60 * 60)?, // 8 hours
            qr_ttl_minutes: parse_or(&var, "QR_TTL_MINUTES", 2)?,

            admin_username: var("ADMIN_USERNAME").unwrap_or_else(|| "admin".to_string()),
            admin_password: var("ADMIN_PASSWORD").unwrap_or_else(|| "admin123".to_string()),

            public_base_url: var("PUBLIC_BASE_URL").filter(|url| !url.is_empty()),
            scan_require_expiry: parse_or(&var, "SCAN_REQUIRE_EXPIRY", false)?,
            log_dir: var("LOG_DIR").unwrap_or_else(|| "logs".to_string()),
        })
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            server_addr: "127.0.0.1:0".to_string(),
            database_url: "sqlite::memory:".to_string(),
            session_secret: "test-secret".to_string(),
            ephemeral_secret: false,
            session_ttl: 3600,
            qr_ttl_minutes: 2,
            admin_username: "admin".to_string(),
            admin_password: "admin123".to_string(),
            public_base_url: None,
            scan_require_expiry: false,
            log_dir: "logs".to_string(),
        }
    }
}

fn parse_or<T>(var: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        None => Ok(default),
    }
}
