use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use crate::utilities::errors::AppError;

#[derive(Serialize, Debug)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub total: i64,
}

#[serde_as]
#[derive(Deserialize, Serialize, Clone, Copy, Debug)]
pub struct Pagination {
    #[serde_as(as = "DisplayFromStr")]
    #[serde(default = "default_offset")]
    pub offset: i64,
    #[serde_as(as = "DisplayFromStr")]
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_offset() -> i64 {
    0
}

fn default_limit() -> i64 {
    20
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: default_offset(),
            limit: default_limit(),
        }
    }
}

impl Pagination {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.offset < 0 {
            return Err(AppError::ValidationError(
                "Offset must be non-negative".to_string(),
            ));
        }

        if self.limit < 0 {
            return Err(AppError::ValidationError(
                "Limit must be positive".to_string(),
            ));
        } else if self.limit == 0 {
            return Err(AppError::ValidationError(
                "Limit must not be zero!".to_string(),
            ));
        }

        if self.limit > 100 {
            return Err(AppError::ValidationError(
                "Limit cannot exceed 100".to_string(),
            ));
        }

        Ok(())
    }
}

/// Query string of the admin list endpoints.
#[derive(Deserialize, Debug, Default)]
pub struct AdminListQuery {
    pub q: Option<String>,
    #[serde(flatten)]
    pub pagination: Pagination,
}

impl AdminListQuery {
    /// Trimmed search term, `None` when blank.
    pub fn term(&self) -> Option<&str> {
        self.q
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }
}

/// Wraps a substring for `ILIKE`, escaping the pattern metacharacters it contains.
pub fn contains_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

pub fn ensure_non_negative(field: &str, value: &BigDecimal) -> Result<(), AppError> {
    if *value < BigDecimal::from(0) {
        return Err(AppError::ValidationError(format!(
            "{field} cannot be negative"
        )));
    }
    Ok(())
}
