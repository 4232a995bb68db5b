//! Unified error type for the query layer
//!
//! Every failure mode of query construction is represented here. Errors that
//! would change the semantics of emitted SQL are never swallowed: an
//! unresolvable dialect, placeholder, or filter operator aborts query
//! construction instead of producing a partial or malformed query.

use thiserror::Error;

/// Unified error type for query construction and execution
#[derive(Error, Debug)]
pub enum QueryError {
    /// Connection-string scheme does not match a supported SQL dialect
    #[error("Unsupported database dialect: {scheme}")]
    UnsupportedDialect { scheme: String },

    /// Template references a name absent from the parameter map
    #[error("No value bound for placeholder: {name}")]
    UnboundPlaceholder { name: String },

    /// The website the filters are scoped to does not exist
    #[error("Website not found: {website_id}")]
    UnknownWebsite { website_id: String },

    /// Filter operator has no SQL mapping
    #[error("Filter {name} has no SQL mapping for operator {operator}")]
    UnresolvedFilter { name: String, operator: String },

    /// Date truncation unit the dialect cannot express
    #[error("{dialect} cannot truncate dates to the {unit} unit")]
    UnsupportedTimeUnit {
        dialect: &'static str,
        unit: &'static str,
    },

    /// Time unit string outside the supported vocabulary
    #[error("Unknown time unit: {unit}")]
    InvalidTimeUnit { unit: String },

    /// Timezone name not found in the IANA database
    #[error("Unknown timezone: {name}")]
    InvalidTimezone { name: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error reported by the database execution collaborator
    #[error("Database error: {0}")]
    Database(String),
}

impl QueryError {
    /// Create an unsupported dialect error from a connection-string scheme
    pub fn unsupported_dialect(scheme: impl Into<String>) -> Self {
        Self::UnsupportedDialect {
            scheme: scheme.into(),
        }
    }

    /// Create an unbound placeholder error
    pub fn unbound_placeholder(name: impl Into<String>) -> Self {
        Self::UnboundPlaceholder { name: name.into() }
    }

    /// Create an unknown website error
    pub fn unknown_website(website_id: impl Into<String>) -> Self {
        Self::UnknownWebsite {
            website_id: website_id.into(),
        }
    }

    /// Create an unresolved filter error
    pub fn unresolved_filter(name: impl Into<String>, operator: impl Into<String>) -> Self {
        Self::UnresolvedFilter {
            name: name.into(),
            operator: operator.into(),
        }
    }

    /// Create an unsupported time unit error
    pub fn unsupported_time_unit(dialect: &'static str, unit: &'static str) -> Self {
        Self::UnsupportedTimeUnit { dialect, unit }
    }

    /// Create an invalid timezone error
    pub fn invalid_timezone(name: impl Into<String>) -> Self {
        Self::InvalidTimezone { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_dialect_display() {
        let err = QueryError::unsupported_dialect("mongodb");
        assert_eq!(err.to_string(), "Unsupported database dialect: mongodb");
    }

    #[test]
    fn test_unbound_placeholder_display() {
        let err = QueryError::unbound_placeholder("start_date");
        assert_eq!(err.to_string(), "No value bound for placeholder: start_date");
    }

    #[test]
    fn test_unknown_website_display() {
        let err = QueryError::unknown_website("site-1");
        assert_eq!(err.to_string(), "Website not found: site-1");
    }

    #[test]
    fn test_unresolved_filter_display() {
        let err = QueryError::unresolved_filter("url", "contains");
        assert_eq!(
            err.to_string(),
            "Filter url has no SQL mapping for operator contains"
        );
    }

    #[test]
    fn test_unsupported_time_unit_display() {
        let err = QueryError::unsupported_time_unit("sqlite", "minute");
        assert_eq!(
            err.to_string(),
            "sqlite cannot truncate dates to the minute unit"
        );
    }
}
