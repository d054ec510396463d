//! Sort parameters for list queries

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static FIELD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("valid sort field pattern"));

/// Sort order for list queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Asc
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "ASC"),
            SortOrder::Desc => write!(f, "DESC"),
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("Invalid sort order: {}", other)),
        }
    }
}

/// A single sort criterion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortParams {
    /// Field to sort by, in its wire (camelCase) form
    pub field: String,

    /// Sort order
    #[serde(default)]
    pub order: SortOrder,
}

impl SortParams {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortOrder::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortOrder::Desc)
    }

    pub fn is_desc(&self) -> bool {
        self.order == SortOrder::Desc
    }
}

/// Ordered list of sort criteria
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort(pub Vec<SortParams>);

impl Sort {
    pub fn unsorted() -> Self {
        Self(Vec::new())
    }

    pub fn by(params: SortParams) -> Self {
        Self(vec![params])
    }

    /// Parse `field[,asc|desc]` segments separated by `;`.
    ///
    /// Fields outside `allowed` and malformed segments are dropped. When nothing
    /// usable remains the `fallback` is returned.
    pub fn parse(raw: Option<&str>, allowed: &[&str], fallback: Sort) -> Sort {
        let Some(raw) = raw else {
            return fallback;
        };

        let params: Vec<SortParams> = raw
            .split(';')
            .filter_map(|segment| {
                let mut parts = segment.split(',').map(str::trim);
                let field = parts.next().filter(|f| FIELD_PATTERN.is_match(f))?;
                if !allowed.contains(&field) {
                    return None;
                }
                let order = match parts.next() {
                    Some(order) if !order.is_empty() => order.parse().ok()?,
                    _ => SortOrder::Asc,
                };
                Some(SortParams::new(field, order))
            })
            .collect();

        if params.is_empty() {
            fallback
        } else {
            Sort(params)
        }
    }

    pub fn is_unsorted(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SortParams> {
        self.0.iter()
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "UNSORTED");
        }
        let rendered: Vec<String> = self
            .0
            .iter()
            .map(|p| format!("{}: {}", p.field, p.order))
            .collect();
        write!(f, "{}", rendered.join(", "))
    }
}
