//! Process configuration.
//!
//! Every option can be given as a flag or an environment variable; `main`
//! loads a `.env` file first so local development only needs that file.

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Config {
    /// MongoDB connection string
    #[arg(long, env = "ATLAS_URI", hide_env_values = true)]
    pub database_url: String,

    /// Database holding the `meals` and `archive` collections
    #[arg(long, env = "DATABASE_NAME", default_value = "all")]
    pub database_name: String,

    /// Address or hostname to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Comma-separated list of origins allowed by CORS
    #[arg(
        long,
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,

    /// Shared password checked by `/api/auth/verify`; the endpoint is off when unset
    #[arg(long, env = "APP_PASSWORD", hide_env_values = true)]
    pub app_password: Option<String>,
}

impl Config {
    /// `host:port` to bind the listener to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Parsed CORS origins, blanks dropped
    pub fn cors_origins(&self) -> Result<Vec<HeaderValue>> {
        self.allowed_origins
            .iter()
            .map(|origin| origin.trim())
            .filter(|origin| !origin.is_empty())
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .with_context(|| format!("Invalid CORS origin: {}", origin))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["meal-planner-backend", "--database-url", "mongodb://localhost"])
            .unwrap();

        assert_eq!(config.database_name, "all");
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
        assert_eq!(config.cors_origins().unwrap(), vec!["http://localhost:3000"]);
        assert!(config.app_password.is_none());
    }

    #[test]
    fn test_origin_list_and_port() {
        let config = Config::try_parse_from([
            "meal-planner-backend",
            "--database-url",
            "mongodb://localhost",
            "--port",
            "5050",
            "--allowed-origins",
            "https://plan.example.com, http://localhost:5173,",
        ])
        .unwrap();

        assert_eq!(config.port, 5050);
        assert_eq!(
            config.cors_origins().unwrap(),
            vec!["https://plan.example.com", "http://localhost:5173"]
        );
    }

    #[test]
    fn test_invalid_origin_is_rejected() {
        let config = Config::try_parse_from([
            "meal-planner-backend",
            "--database-url",
            "mongodb://localhost",
            "--allowed-origins",
            "http://bad\norigin",
        ])
        .unwrap();

        assert!(config.cors_origins().is_err());
    }
}
