//! API server configuration

use std::env;

use anyhow::{bail, Context, Result};
use quotebook_shared_config::{CommonConfig, DatabaseConfig};

/// Header the upstream auth layer uses to pass the authenticated user id
pub const DEFAULT_VIEWER_HEADER: &str = "x-viewer-id";

/// API server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Common configuration shared with other services
    pub common: CommonConfig,

    /// Server port (default: 8080)
    pub port: u16,

    /// CORS allowed origins (optional)
    pub cors_allowed_origins: Option<Vec<String>>,

    /// Request header carrying the viewer's user id, lowercased
    pub viewer_header: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// In production `DATABASE_URL` must be set explicitly. Elsewhere the
    /// local development database is used when it is missing.
    pub fn from_env() -> Result<Self> {
        let common = CommonConfig::from_env().context("Failed to load config")?;

        Ok(Self {
            common,

            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid PORT value")?,

            cors_allowed_origins: env::var("CORS_ORIGINS").ok().map(|s| {
                s.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            }),

            viewer_header: Self::load_viewer_header()?,
        })
    }

    fn load_viewer_header() -> Result<String> {
        let name = env::var("VIEWER_HEADER")
            .ok()
            .map(|s| s.trim().to_ascii_lowercase())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_VIEWER_HEADER.to_string());

        if axum::http::HeaderName::from_bytes(name.as_bytes()).is_err() {
            bail!("VIEWER_HEADER is not a valid header name: {}", name);
        }
        Ok(name)
    }

    /// Get database configuration
    pub fn database(&self) -> &DatabaseConfig {
        &self.common.database
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.common.environment.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_url_required_in_production() {
        temp_env::with_vars(
            [("ENVIRONMENT", Some("production")), ("DATABASE_URL", None)],
            || {
                let err = format!("{:#}", Config::from_env().unwrap_err());
                assert!(err.contains("DATABASE_URL"));
            },
        );
    }

    #[test]
    fn test_production_with_database_url() {
        temp_env::with_vars(
            [
                ("ENVIRONMENT", Some("production")),
                ("DATABASE_URL", Some("postgres://quotes:secret@db:5432/quotes")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert!(config.is_production());
                assert_eq!(config.database().url, "postgres://quotes:secret@db:5432/quotes");
            },
        );
    }

    #[test]
    fn test_development_defaults() {
        temp_env::with_vars(
            [
                ("ENVIRONMENT", None::<&str>),
                ("DATABASE_URL", None),
                ("PORT", None),
                ("CORS_ORIGINS", None),
                ("VIEWER_HEADER", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.port, 8080);
                assert_eq!(config.viewer_header, DEFAULT_VIEWER_HEADER);
                assert!(config.cors_allowed_origins.is_none());
                assert!(!config.is_production());
            },
        );
    }

    #[test]
    fn test_cors_origins_are_split_and_trimmed() {
        temp_env::with_var(
            "CORS_ORIGINS",
            Some("https://a.example, https://b.example,,"),
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(
                    config.cors_allowed_origins,
                    Some(vec![
                        "https://a.example".to_string(),
                        "https://b.example".to_string()
                    ])
                );
            },
        );
    }

    #[test]
    fn test_viewer_header_is_lowercased() {
        temp_env::with_var("VIEWER_HEADER", Some(" X-Forwarded-User "), || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.viewer_header, "x-forwarded-user");
        });
    }

    #[test]
    fn test_invalid_viewer_header_rejected() {
        temp_env::with_var("VIEWER_HEADER", Some("not a header"), || {
            let err = Config::from_env().unwrap_err().to_string();
            assert!(err.contains("VIEWER_HEADER"));
        });
    }

    #[test]
    fn test_invalid_port_rejected() {
        temp_env::with_var("PORT", Some("eighty"), || {
            assert!(Config::from_env().is_err());
        });
    }
}
