//! Collaborator traits for the query layer
//!
//! This layer builds queries; it does not own a database connection or the
//! website catalog. Both live behind these traits and are injected into
//! [`QueryBuilder`](crate::data::query::QueryBuilder). Neither operation is
//! retried here — transient-failure policy belongs to the implementations
//! and their callers.

use async_trait::async_trait;
use serde_json::Value;

use crate::data::error::QueryError;
use crate::data::types::{Row, Website};

/// Executes bound queries against the active database
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    /// Run a query with positional parameters and return its rows
    async fn execute(&self, query: &str, params: &[Value]) -> Result<Vec<Row>, QueryError>;
}

/// Loads website metadata (reset timestamp, configured domain)
#[async_trait]
pub trait WebsiteStore: Send + Sync {
    /// Look up a website by id; `None` when it does not exist
    async fn load_website(&self, website_id: &str) -> Result<Option<Website>, QueryError>;
}
