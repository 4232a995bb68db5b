//! Named-placeholder substitution
//!
//! Rewrites SQL templates containing `{{name}}` or `{{name::type}}`
//! placeholders into the active dialect's native parameter syntax, producing
//! the ordered positional parameter array alongside the query text.

use std::sync::OnceLock;

use regex::Regex;

use super::Dialect;
use crate::data::error::QueryError;
use crate::data::types::ParamMap;

/// An executable query: dialect-native text plus ordered parameters
#[derive(Debug, Clone, PartialEq)]
pub struct BoundQuery {
    pub query: String,
    pub params: Vec<serde_json::Value>,
}

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"\{\{\s*(\w+)(::\w+)?\s*\}\}").expect("Invalid regex"))
}

/// Rewrite a template into the dialect's parameter syntax
///
/// Placeholders are replaced in left-to-right order: `?` for MySQL/SQLite,
/// `$k` (1-based, with the template's `::type` suffix kept as a cast) for
/// PostgreSQL. The Nth occurrence always corresponds to the Nth positional
/// parameter; a name appearing twice is bound twice. A name absent from
/// `params` fails fast with [`QueryError::UnboundPlaceholder`] — `null` is a
/// bindable value, a missing key is a programming error.
pub fn bind_template(
    dialect: Dialect,
    sql: &str,
    params: &ParamMap,
) -> Result<BoundQuery, QueryError> {
    let engine = dialect.dialect();
    let mut query = String::with_capacity(sql.len());
    let mut positional = Vec::new();
    let mut last = 0;

    for caps in placeholder_regex().captures_iter(sql) {
        let matched = caps.get(0).expect("capture 0 always present");
        let name = &caps[1];
        let cast = caps.get(2).map(|c| c.as_str());

        let value = params
            .get(name)
            .ok_or_else(|| QueryError::unbound_placeholder(name))?;
        positional.push(value.clone());

        query.push_str(&sql[last..matched.start()]);
        query.push_str(&engine.placeholder(positional.len(), cast));
        last = matched.end();
    }
    query.push_str(&sql[last..]);

    tracing::trace!(
        dialect = %dialect,
        params = positional.len(),
        "bound query template"
    );

    Ok(BoundQuery {
        query,
        params: positional,
    })
}
