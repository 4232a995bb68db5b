//! Shared types for the query layer
//!
//! Parameter maps and result rows, website metadata loaded through the
//! [`WebsiteStore`](crate::data::traits::WebsiteStore) collaborator, and the
//! pagination types translating page requests into take/skip options.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::constants::DEFAULT_PAGE_SIZE;

/// Named parameter map consumed by template binding
pub type ParamMap = serde_json::Map<String, Value>;

/// A single result row from the execution collaborator
pub type Row = serde_json::Map<String, Value>;

/// Website metadata the filter compiler scopes queries to
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Website {
    pub website_id: String,
    /// Configured domain, used by the referrer-exclusion clause
    pub domain: Option<String>,
    /// Stats reset timestamp; queries never reach earlier than this
    pub reset_at: Option<DateTime<Utc>>,
}

/// Sort direction for an ordered query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

/// Single-column ordering specification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderBy {
    pub column: String,
    pub direction: OrderDirection,
}

impl OrderBy {
    pub fn to_sql(&self) -> String {
        let dir = match self.direction {
            OrderDirection::Asc => "asc",
            OrderDirection::Desc => "desc",
        };
        format!("{} {}", self.column, dir)
    }
}

/// Pagination request as supplied by callers
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PageRequest {
    pub page: u32,
    /// 0 means "no limit"
    pub page_size: u32,
    pub order_by: Option<String>,
    pub sort_descending: bool,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            order_by: None,
            sort_descending: false,
        }
    }
}

/// Dialect-agnostic take/skip/order options derived from a [`PageRequest`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageOptions {
    pub take: Option<u32>,
    pub skip: Option<u32>,
    pub order_by: Option<OrderBy>,
}

/// Normalized pagination metadata echoed back to callers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageMeta {
    pub page: u32,
    pub page_size: u32,
    pub order_by: Option<String>,
}

impl PageRequest {
    /// Translate the request into database options plus a metadata echo
    ///
    /// `page` is not validated below 1 (it defaults to 1; anything else is
    /// the caller's responsibility), but skip can never underflow.
    pub fn to_page_options(&self) -> (PageOptions, PageMeta) {
        let mut options = PageOptions::default();

        if self.page_size > 0 {
            options.take = Some(self.page_size);
            options.skip = Some(self.page_size * self.page.saturating_sub(1));
        }

        if let Some(column) = &self.order_by {
            options.order_by = Some(OrderBy {
                column: column.clone(),
                direction: if self.sort_descending {
                    OrderDirection::Desc
                } else {
                    OrderDirection::Asc
                },
            });
        }

        let meta = PageMeta {
            page: self.page,
            page_size: self.page_size,
            order_by: self.order_by.clone(),
        };

        (options, meta)
    }
}
