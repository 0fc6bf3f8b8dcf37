//! Connection configuration for the deployment tool.
//!
//! The connection descriptor is always supplied by the operator, either as
//! a CLI flag or an environment variable, never compiled into the binary.

use thiserror::Error;

/// Primary environment variable naming the target database.
pub const DATABASE_URL_ENV: &str = "ROTADB_DATABASE_URL";

/// Fallback shared with the rest of the Postgres tooling ecosystem.
pub const DATABASE_URL_FALLBACK_ENV: &str = "DATABASE_URL";

/// Errors raised while resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("ROTADB_DATABASE_URL or DATABASE_URL environment variable must be set")]
    MissingDatabaseUrl,
}

/// Resolved deployment configuration.
#[derive(Debug, Clone)]
pub struct DeployConfig {
    pub database_url: String,
}

impl DeployConfig {
    /// Resolve the connection descriptor: an explicit value wins, otherwise
    /// the environment is consulted.
    pub fn resolve(database_url: Option<String>) -> Result<Self, ConfigError> {
        match database_url {
            Some(database_url) => Ok(Self { database_url }),
            None => Self::from_env(),
        }
    }

    /// Read `ROTADB_DATABASE_URL`, falling back to `DATABASE_URL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        std::env::var(DATABASE_URL_ENV)
            .or_else(|_| std::env::var(DATABASE_URL_FALLBACK_ENV))
            .map(|database_url| Self { database_url })
            .map_err(|_| ConfigError::MissingDatabaseUrl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env mutation is process-global, so all precedence cases run inside a
    // single test to keep them off parallel test threads.
    #[test]
    fn resolve_precedence() {
        unsafe {
            std::env::remove_var(DATABASE_URL_ENV);
            std::env::remove_var(DATABASE_URL_FALLBACK_ENV);
        }

        assert!(matches!(DeployConfig::from_env(), Err(ConfigError::MissingDatabaseUrl)));

        let flagged = DeployConfig::resolve(Some("postgres://flag/db".to_owned())).unwrap();
        assert_eq!(flagged.database_url, "postgres://flag/db");

        unsafe { std::env::set_var(DATABASE_URL_FALLBACK_ENV, "postgres://fallback/db") };
        assert_eq!(DeployConfig::from_env().unwrap().database_url, "postgres://fallback/db");

        unsafe { std::env::set_var(DATABASE_URL_ENV, "postgres://primary/db") };
        assert_eq!(DeployConfig::from_env().unwrap().database_url, "postgres://primary/db");

        let flagged = DeployConfig::resolve(Some("postgres://flag/db".to_owned())).unwrap();
        assert_eq!(flagged.database_url, "postgres://flag/db");

        unsafe {
            std::env::remove_var(DATABASE_URL_ENV);
            std::env::remove_var(DATABASE_URL_FALLBACK_ENV);
        }
    }
}
