//! Application configuration loaded from environment variables.

use std::env;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

const DEFAULT_JWT_SECRET: &str = "your-super-secret-jwt-key-change-in-production";
const DEFAULT_DATABASE_URL: &str = "sqlite://./dev.db";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000,http://localhost:5173";

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
    Test,
}

impl Environment {
    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            "test" => Ok(Environment::Test),
            other => Err(ConfigError::Invalid {
                var: "APP_ENV",
                reason: format!("unknown environment '{other}'"),
            }),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Environment::Development => "development",
            Environment::Production => "production",
            Environment::Test => "test",
        };
        f.write_str(name)
    }
}

/// Configuration errors. Any of these stops the server from starting.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub jwt_secret: String,
    /// Recorded but unused: storage is in-memory.
    pub database_url: String,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let environment = match lookup("APP_ENV") {
            Some(value) => value.parse()?,
            None => Environment::Development,
        };

        // Production must not fall back to the baked-in secret or database
        if environment.is_production() {
            for var in ["JWT_SECRET", "DATABASE_URL"] {
                if lookup(var).is_none_or(|v| v.trim().is_empty()) {
                    return Err(ConfigError::Missing(var));
                }
            }
        }

        let port = match lookup("PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                var: "PORT",
                reason: format!("'{value}' is not a port number"),
            })?,
            None => 3000,
        };

        let cors_origins = lookup("CORS_ORIGIN")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        let jwt_secret = lookup("JWT_SECRET").unwrap_or_else(|| DEFAULT_JWT_SECRET.to_string());
        if jwt_secret == DEFAULT_JWT_SECRET {
            tracing::warn!("Using default JWT secret. Set JWT_SECRET for production use.");
        }

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            environment,
            jwt_secret,
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            cors_origins,
        })
    }
}
