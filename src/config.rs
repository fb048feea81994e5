use std::path::PathBuf;

use serde::Deserialize;

/// Longest accepted session lifetime (10 years).
pub const MAX_TTL_MINUTES: i64 = 60 * 24 * 365 * 10;
const DEFAULT_TTL_MINUTES: i64 = 60 * 24 * 7;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Postgres URL. Without it the service keeps users in memory.
    pub database_url: Option<String>,
    pub jwt: JwtConfig,
    pub upload_dir: PathBuf,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty());
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET must be set"))?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "photo-album".into()),
            audience: std::env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "photo-album-users".into()),
            ttl_minutes: parse_ttl_minutes(std::env::var("JWT_TTL_MINUTES").ok().as_deref()),
        };
        let upload_dir = std::env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("public/uploads"));
        let host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = std::env::var("APP_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(8080);

        Ok(Self {
            database_url,
            jwt,
            upload_dir,
            host,
            port,
        })
    }
}

/// Positive minute count, capped at [`MAX_TTL_MINUTES`].
fn parse_ttl_minutes(raw: Option<&str>) -> i64 {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|v| *v > 0)
        .map(|v| v.min(MAX_TTL_MINUTES))
        .unwrap_or(DEFAULT_TTL_MINUTES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ttl_defaults_when_missing_or_invalid() {
        assert_eq!(parse_ttl_minutes(None), DEFAULT_TTL_MINUTES);
        assert_eq!(parse_ttl_minutes(Some("abc")), DEFAULT_TTL_MINUTES);
        assert_eq!(parse_ttl_minutes(Some("0")), DEFAULT_TTL_MINUTES);
        assert_eq!(parse_ttl_minutes(Some("-5")), DEFAULT_TTL_MINUTES);
    }

    #[test]
    fn ttl_is_capped() {
        assert_eq!(parse_ttl_minutes(Some("90")), 90);
        assert_eq!(parse_ttl_minutes(Some(&i64::MAX.to_string())), MAX_TTL_MINUTES);
    }
}
