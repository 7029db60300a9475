//! User-entered search criteria and the coercion of raw form input into them.
//!
//! Field edits never issue a query by themselves; they only reshape the
//! criteria that the next search or page change will compile.

use std::{fmt, str::FromStr};

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::utilities::errors::AppError;

/// A numeric filter bound that keeps "cleared" and "typed zero" apart.
///
/// Only `Positive` bounds constrain a query; `Zero` is kept so callers can see
/// that the user asked for zero even though it filters nothing.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Default, Debug)]
#[serde(tag = "state", content = "value", rename_all = "lowercase")]
pub enum NumericFilter<T> {
    #[default]
    Unset,
    Zero,
    Positive(T),
}

impl<T> NumericFilter<T> {
    pub fn bound(&self) -> Option<&T> {
        match self {
            NumericFilter::Positive(value) => Some(value),
            NumericFilter::Unset | NumericFilter::Zero => None,
        }
    }
}

impl<T> NumericFilter<T>
where
    T: FromStr + PartialOrd + Default,
{
    /// Reads a numeric form field. Blank input clears the bound; anything that
    /// is not a non-negative number is an [`AppError::InputCoercionError`].
    pub fn parse(field: FilterField, raw: &str) -> Result<Self, AppError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(NumericFilter::Unset);
        }

        let coercion_error = || AppError::InputCoercionError {
            field: field.to_string(),
            value: raw.to_string(),
        };

        let value = T::from_str(trimmed).map_err(|_| coercion_error())?;
        let zero = T::default();
        if value < zero {
            return Err(coercion_error());
        }
        if value == zero {
            return Ok(NumericFilter::Zero);
        }
        Ok(NumericFilter::Positive(value))
    }

    /// Like [`NumericFilter::parse`], but invalid input clears the bound.
    pub fn coerce(field: FilterField, raw: &str) -> Self {
        Self::parse(field, raw).unwrap_or_else(|e| {
            debug!("{e}; treating {field} as unset");
            NumericFilter::Unset
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[serde(rename_all = "camelCase")]
pub enum FilterField {
    Location,
    MinPrice,
    MaxPrice,
    MinCapacity,
}

impl FilterField {
    pub const ALL: [FilterField; 4] = [
        FilterField::Location,
        FilterField::MinPrice,
        FilterField::MaxPrice,
        FilterField::MinCapacity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterField::Location => "location",
            FilterField::MinPrice => "minPrice",
            FilterField::MaxPrice => "maxPrice",
            FilterField::MinCapacity => "minCapacity",
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterField::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AppError::ValidationError(format!("Unknown filter field {s:?}")))
    }
}

/// The user's current search intent. The default value constrains nothing.
#[derive(Serialize, Deserialize, Clone, PartialEq, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    pub location_substring: String,
    pub min_price: NumericFilter<BigDecimal>,
    pub max_price: NumericFilter<BigDecimal>,
    pub min_capacity: NumericFilter<i32>,
}

impl FilterCriteria {
    /// Applies one raw form edit. Never fails: unreadable numbers clear the field.
    pub fn set_field(&mut self, field: FilterField, raw: &str) {
        match field {
            FilterField::Location => self.location_substring = raw.to_string(),
            FilterField::MinPrice => self.min_price = NumericFilter::coerce(field, raw),
            FilterField::MaxPrice => self.max_price = NumericFilter::coerce(field, raw),
            FilterField::MinCapacity => self.min_capacity = NumericFilter::coerce(field, raw),
        }
    }

    pub fn with_field(mut self, field: FilterField, raw: &str) -> Self {
        self.set_field(field, raw);
        self
    }

    /// `minPrice > maxPrice` is accepted and simply matches nothing.
    pub fn has_inverted_price_range(&self) -> bool {
        match (self.min_price.bound(), self.max_price.bound()) {
            (Some(min), Some(max)) => min > max,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_numeric_capacity_is_coerced_to_unset() {
        let criteria = FilterCriteria::default()
            .with_field(FilterField::MinCapacity, "4")
            .with_field(FilterField::MinCapacity, "abc");

        assert_eq!(criteria.min_capacity, NumericFilter::Unset);
    }

    #[test]
    fn parse_reports_coercion_errors() {
        let err = NumericFilter::<i32>::parse(FilterField::MinCapacity, "abc").unwrap_err();
        assert!(matches!(
            err,
            AppError::InputCoercionError { ref field, ref value } if field == "minCapacity" && value == "abc"
        ));

        assert!(NumericFilter::<BigDecimal>::parse(FilterField::MinPrice, "-10").is_err());
    }

    #[test]
    fn zero_and_blank_stay_distinct() {
        assert_eq!(
            NumericFilter::<BigDecimal>::coerce(FilterField::MinPrice, "0"),
            NumericFilter::Zero
        );
        assert_eq!(
            NumericFilter::<BigDecimal>::coerce(FilterField::MinPrice, "0.00"),
            NumericFilter::Zero
        );
        assert_eq!(
            NumericFilter::<BigDecimal>::coerce(FilterField::MinPrice, "   "),
            NumericFilter::Unset
        );
    }

    #[test]
    fn positive_values_are_kept() {
        let criteria = FilterCriteria::default()
            .with_field(FilterField::MinPrice, " 100 ")
            .with_field(FilterField::MaxPrice, "199.50");

        assert_eq!(criteria.min_price.bound(), Some(&BigDecimal::from(100)));
        assert_eq!(
            criteria.max_price.bound(),
            Some(&"199.50".parse::<BigDecimal>().unwrap())
        );
        assert!(!criteria.has_inverted_price_range());
    }

    #[test]
    fn inverted_price_range_is_detected_not_rejected() {
        let criteria = FilterCriteria::default()
            .with_field(FilterField::MinPrice, "300")
            .with_field(FilterField::MaxPrice, "100");

        assert!(criteria.has_inverted_price_range());
        assert_eq!(criteria.min_price.bound(), Some(&BigDecimal::from(300)));
    }

    #[test]
    fn field_names_parse_case_insensitively() {
        assert_eq!("minPrice".parse::<FilterField>().unwrap(), FilterField::MinPrice);
        assert_eq!("MINCAPACITY".parse::<FilterField>().unwrap(), FilterField::MinCapacity);
        assert!("rooms".parse::<FilterField>().is_err());
    }
}
