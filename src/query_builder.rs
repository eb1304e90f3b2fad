//! Catalog search-expression builder.
//!
//! Produces the `q` / `page` / `pageSize` triple the catalog's `/cards`
//! endpoint expects. Pure data: nothing here performs I/O or fails.
//!
//! # Example
//!
//! ```rust
//! use pokemaster_sdk::CatalogQueryBuilder;
//! let search = CatalogQueryBuilder::new()
//!     .name_prefix("Char")
//!     .set_id("base1")
//!     .page(2)
//!     .build();
//! assert_eq!(search.q, r#"name:"Char"* set.id:"base1""#);
//! assert_eq!(search.page, 2);
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, SET_PAGE_SIZE};

// ---------------------------------------------------------------------------
// CardSearch
// ---------------------------------------------------------------------------

/// A transport-agnostic description of one catalog page request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSearch {
    /// Query expression; empty means "match everything".
    pub q: String,
    pub page: u32,
    pub page_size: u32,
}

impl CardSearch {
    /// Forward (prefix) match on the card name.
    pub fn name_prefix(name: &str, page: Option<u32>, page_size: Option<u32>) -> Self {
        let mut qb = CatalogQueryBuilder::new();
        qb.name_prefix(name);
        qb.page_opt(page);
        qb.page_size_opt(page_size);
        qb.build()
    }

    /// Every card of one set, exact match on the set id.
    pub fn by_set(set_id: &str, page: Option<u32>, page_size: Option<u32>) -> Self {
        let mut qb = CatalogQueryBuilder::with_default_page_size(SET_PAGE_SIZE);
        qb.set_id(set_id);
        qb.page_opt(page);
        qb.page_size_opt(page_size);
        qb.build()
    }
}

// ---------------------------------------------------------------------------
// SearchCriteria
// ---------------------------------------------------------------------------

/// Optional search fields for the advanced card search.
///
/// All fields are optional. `None` and empty strings contribute no clause.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    pub name: Option<String>,
    pub set_id: Option<String>,
    pub rarity: Option<String>,
    pub type_field: Option<String>,
    pub supertype: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl SearchCriteria {
    /// Build the request, emitting clauses in the fixed order
    /// name, set id, rarity, type, supertype.
    pub fn to_search(&self) -> CardSearch {
        let mut qb = CatalogQueryBuilder::new();

        if let Some(ref name) = self.name {
            qb.name_prefix(name);
        }
        if let Some(ref set_id) = self.set_id {
            qb.set_id(set_id);
        }
        if let Some(ref rarity) = self.rarity {
            qb.rarity(rarity);
        }
        if let Some(ref t) = self.type_field {
            qb.types(t);
        }
        if let Some(ref supertype) = self.supertype {
            qb.supertype(supertype);
        }

        qb.page_opt(self.page);
        qb.page_size_opt(self.page_size);
        qb.build()
    }
}

// ---------------------------------------------------------------------------
// CatalogQueryBuilder
// ---------------------------------------------------------------------------

/// Builds catalog query expressions clause by clause.
///
/// Clauses are AND-combined by joining with a single space, in the order
/// they were added. Methods return `&mut Self` for chaining.
pub struct CatalogQueryBuilder {
    clauses: Vec<String>,
    page: u32,
    page_size: u32,
    default_page_size: u32,
}

impl Default for CatalogQueryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogQueryBuilder {
    /// Create a builder using the search page size default (20).
    pub fn new() -> Self {
        Self::with_default_page_size(DEFAULT_PAGE_SIZE)
    }

    /// Create a builder whose page size falls back to `default_page_size`.
    pub fn with_default_page_size(default_page_size: u32) -> Self {
        let default_page_size = default_page_size.clamp(1, MAX_PAGE_SIZE);
        Self {
            clauses: Vec::new(),
            page: 1,
            page_size: default_page_size,
            default_page_size,
        }
    }

    /// Add a prefix-match clause: `{field}:"{value}"*`.
    ///
    /// Empty values are skipped.
    pub fn prefix(&mut self, field: &str, value: &str) -> &mut Self {
        if !value.is_empty() {
            self.clauses
                .push(format!("{}:\"{}\"*", field, escape_value(value)));
        }
        self
    }

    /// Add an exact-match clause: `{field}:"{value}"`.
    ///
    /// Empty values are skipped.
    pub fn exact(&mut self, field: &str, value: &str) -> &mut Self {
        if !value.is_empty() {
            self.clauses
                .push(format!("{}:\"{}\"", field, escape_value(value)));
        }
        self
    }

    /// Forward match on the card name (`name:"{value}"*`).
    pub fn name_prefix(&mut self, value: &str) -> &mut Self {
        self.prefix("name", value)
    }

    /// Exact match on `set.id`.
    pub fn set_id(&mut self, value: &str) -> &mut Self {
        self.exact("set.id", value)
    }

    /// Exact match on `rarity`.
    pub fn rarity(&mut self, value: &str) -> &mut Self {
        self.exact("rarity", value)
    }

    /// Exact match on the energy type list (`types`).
    pub fn types(&mut self, value: &str) -> &mut Self {
        self.exact("types", value)
    }

    /// Exact match on `supertype`.
    pub fn supertype(&mut self, value: &str) -> &mut Self {
        self.exact("supertype", value)
    }

    /// Set the 1-based page number. Zero falls back to page 1.
    pub fn page(&mut self, n: u32) -> &mut Self {
        self.page = n.max(1);
        self
    }

    /// Set the page size. Zero falls back to the builder's default; values
    /// above the catalog maximum are clamped to it.
    pub fn page_size(&mut self, n: u32) -> &mut Self {
        self.page_size = if n == 0 {
            self.default_page_size
        } else {
            n.min(MAX_PAGE_SIZE)
        };
        self
    }

    fn page_opt(&mut self, n: Option<u32>) -> &mut Self {
        match n {
            Some(n) => self.page(n),
            None => self,
        }
    }

    fn page_size_opt(&mut self, n: Option<u32>) -> &mut Self {
        match n {
            Some(n) => self.page_size(n),
            None => self,
        }
    }

    /// Build the final request description.
    pub fn build(&self) -> CardSearch {
        CardSearch {
            q: self.clauses.join(" "),
            page: self.page,
            page_size: self.page_size,
        }
    }
}

/// Backslash-escape `\` and `"` so a value cannot close its quoted clause.
fn escape_value(value: &str) -> String {
    if !value.contains(['"', '\\']) {
        return value.to_string();
    }
    let mut out = String::with_capacity(value.len() + 2);
    for ch in value.chars() {
        if ch == '"' || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}
