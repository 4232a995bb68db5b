//! Query layer configuration
//!
//! The connection URL is the only configuration this crate needs; it is read
//! once and handed to [`QueryBuilder::new`](crate::QueryBuilder::new), which
//! resolves the SQL dialect from it at construction time. Nothing in the
//! query path re-reads the environment.

use serde::Deserialize;

use super::constants::ENV_DATABASE_URL;
use crate::data::error::QueryError;

/// Configuration for the query layer
#[derive(Debug, Clone, Deserialize)]
pub struct QueryConfig {
    /// Database connection URL; its scheme selects the SQL dialect
    pub database_url: String,
}

impl QueryConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
        }
    }

    /// Build the configuration from the `DATABASE_URL` environment variable
    pub fn from_env() -> Result<Self, QueryError> {
        let database_url = std::env::var(ENV_DATABASE_URL)
            .map_err(|_| QueryError::Config(format!("{ENV_DATABASE_URL} is not set")))?;
        Ok(Self { database_url })
    }
}
