//! Query builder composition root
//!
//! `QueryBuilder` ties the layer together: it resolves the SQL dialect once
//! at construction, exposes the dialect's fragment builders, compiles filters
//! with website metadata from the injected store, and executes bound
//! templates through the injected database client. It holds references to its
//! collaborators; it does not wrap or inherit from them.

use std::sync::Arc;

use serde_json::Value;

use crate::core::config::QueryConfig;
use crate::data::error::QueryError;
use crate::data::filters::{
    ParsedFilters, QueryFilters, QueryOptions, SESSION_JOIN, build_filter_clauses,
    needs_session_join, normalize_filters,
};
use crate::data::sql::{BoundQuery, Dialect, SearchMode, TimeUnit, bind_template};
use crate::data::traits::{DatabaseClient, WebsiteStore};
use crate::data::types::{ParamMap, Row};
use crate::utils::time::max_date;

/// Dialect-aware query construction and execution front
pub struct QueryBuilder {
    dialect: Dialect,
    client: Arc<dyn DatabaseClient>,
    websites: Arc<dyn WebsiteStore>,
}

impl QueryBuilder {
    /// Build from configuration, resolving the dialect from the connection URL
    pub fn new(
        config: &QueryConfig,
        client: Arc<dyn DatabaseClient>,
        websites: Arc<dyn WebsiteStore>,
    ) -> Result<Self, QueryError> {
        let dialect = Dialect::from_url(&config.database_url)?;
        Ok(Self::with_dialect(dialect, client, websites))
    }

    /// Build with an explicit dialect
    pub fn with_dialect(
        dialect: Dialect,
        client: Arc<dyn DatabaseClient>,
        websites: Arc<dyn WebsiteStore>,
    ) -> Self {
        Self {
            dialect,
            client,
            websites,
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    // ==================== Fragment builders ====================

    pub fn add_interval(&self, field: &str, interval: &str) -> String {
        self.dialect.dialect().add_interval(field, interval)
    }

    pub fn day_diff(&self, field1: &str, field2: &str) -> String {
        self.dialect.dialect().day_diff(field1, field2)
    }

    pub fn cast_column(&self, field: &str, sql_type: &str) -> String {
        self.dialect.dialect().cast_column(field, sql_type)
    }

    pub fn truncate_date(
        &self,
        field: &str,
        unit: TimeUnit,
        timezone: Option<&str>,
    ) -> Result<String, QueryError> {
        self.dialect.dialect().truncate_date(field, unit, timezone)
    }

    pub fn timestamp_diff(&self, field1: &str, field2: &str) -> String {
        self.dialect.dialect().timestamp_diff(field1, field2)
    }

    pub fn search_mode(&self) -> Option<SearchMode> {
        self.dialect.dialect().search_mode()
    }

    // ==================== Filters ====================

    /// Compile filters into join/WHERE fragments and the parameter map
    ///
    /// Loads the website the filters are scoped to and injects the derived
    /// parameters: `website_id`, `website_domain`, and `start_date` clamped
    /// to the website's reset timestamp (a query never reaches earlier than
    /// the last stats reset).
    pub async fn parse_filters(
        &self,
        website_id: &str,
        filters: &QueryFilters,
        options: &QueryOptions,
    ) -> Result<ParsedFilters, QueryError> {
        let website = self
            .websites
            .load_website(website_id)
            .await?
            .ok_or_else(|| QueryError::unknown_website(website_id))?;

        let filter_query = build_filter_clauses(filters, options)?;
        let join_session = if needs_session_join(filters, options) {
            SESSION_JOIN.to_string()
        } else {
            String::new()
        };

        let mut params = normalize_filters(filters);
        if let Some(end_date) = filters.end_date {
            params.insert("end_date".to_string(), Value::String(end_date.to_rfc3339()));
        }
        params.insert(
            "website_id".to_string(),
            Value::String(website_id.to_string()),
        );
        params.insert(
            "start_date".to_string(),
            max_date(filters.start_date, website.reset_at)
                .map(|d| Value::String(d.to_rfc3339()))
                .unwrap_or(Value::Null),
        );
        params.insert(
            "website_domain".to_string(),
            website.domain.map(Value::String).unwrap_or(Value::Null),
        );

        tracing::debug!(
            website_id,
            clauses = filter_query.lines().count(),
            join_session = !join_session.is_empty(),
            "parsed query filters"
        );

        Ok(ParsedFilters {
            join_session,
            filter_query,
            params,
        })
    }

    // ==================== Execution ====================

    /// Bind a template against a parameter map without executing it
    pub fn bind(&self, sql: &str, params: &ParamMap) -> Result<BoundQuery, QueryError> {
        bind_template(self.dialect, sql, params)
    }

    /// Bind a template and execute it through the database client
    pub async fn raw_query(&self, sql: &str, params: &ParamMap) -> Result<Vec<Row>, QueryError> {
        let bound = self.bind(sql, params)?;
        tracing::debug!(
            dialect = %self.dialect,
            params = bound.params.len(),
            "executing raw query"
        );
        self.client.execute(&bound.query, &bound.params).await
    }
}
