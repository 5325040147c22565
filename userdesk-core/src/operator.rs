//! Operator catalog: which comparison operators each column variant accepts.
//!
//! The catalog is a single exhaustive dispatch over [`FilterVariant`]. Both
//! the mutation API and the query-string codec validate against it.

use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// VARIANTS
// ============================================================================

/// Value-type classification of a filterable column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum FilterVariant {
    #[default]
    Text,
    Number,
    Range,
    Date,
    DateRange,
    Boolean,
    Select,
    MultiSelect,
}

impl FilterVariant {
    pub fn all() -> &'static [FilterVariant] {
        &[
            FilterVariant::Text,
            FilterVariant::Number,
            FilterVariant::Range,
            FilterVariant::Date,
            FilterVariant::DateRange,
            FilterVariant::Boolean,
            FilterVariant::Select,
            FilterVariant::MultiSelect,
        ]
    }

    /// Wire name, as written into the query string.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterVariant::Text => "text",
            FilterVariant::Number => "number",
            FilterVariant::Range => "range",
            FilterVariant::Date => "date",
            FilterVariant::DateRange => "dateRange",
            FilterVariant::Boolean => "boolean",
            FilterVariant::Select => "select",
            FilterVariant::MultiSelect => "multiSelect",
        }
    }

    /// Parse a variant name, falling back to `Text` for anything unknown.
    pub fn parse_lossy(s: &str) -> Self {
        s.parse().unwrap_or(FilterVariant::Text)
    }

    /// Whether values of this variant are always a `[from, to]` pair.
    pub fn is_ranged(&self) -> bool {
        matches!(self, FilterVariant::Range | FilterVariant::DateRange)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, FilterVariant::Number | FilterVariant::Range)
    }

    pub fn is_temporal(&self) -> bool {
        matches!(self, FilterVariant::Date | FilterVariant::DateRange)
    }
}

impl fmt::Display for FilterVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FilterVariant {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(FilterVariant::Text),
            "number" => Ok(FilterVariant::Number),
            "range" => Ok(FilterVariant::Range),
            "date" => Ok(FilterVariant::Date),
            "dateRange" => Ok(FilterVariant::DateRange),
            "boolean" => Ok(FilterVariant::Boolean),
            "select" => Ok(FilterVariant::Select),
            // The source's column metadata spells it with a hyphen.
            "multiSelect" | "multi-select" => Ok(FilterVariant::MultiSelect),
            _ => Err(ParseError::UnknownVariant(s.to_string())),
        }
    }
}

// ============================================================================
// OPERATORS
// ============================================================================

/// Comparison operator of a single filter entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterOperator {
    Contains,
    NotContains,
    Equals,
    NotEquals,
    StartsWith,
    EndsWith,
    IsEmpty,
    IsNotEmpty,
    GreaterThan,
    GreaterOrEqual,
    LessThan,
    LessOrEqual,
    Between,
    Before,
    After,
    OnOrBefore,
    OnOrAfter,
    Includes,
    NotIncludes,
    IncludesAll,
}

impl FilterOperator {
    pub fn all() -> &'static [FilterOperator] {
        &[
            FilterOperator::Contains,
            FilterOperator::NotContains,
            FilterOperator::Equals,
            FilterOperator::NotEquals,
            FilterOperator::StartsWith,
            FilterOperator::EndsWith,
            FilterOperator::IsEmpty,
            FilterOperator::IsNotEmpty,
            FilterOperator::GreaterThan,
            FilterOperator::GreaterOrEqual,
            FilterOperator::LessThan,
            FilterOperator::LessOrEqual,
            FilterOperator::Between,
            FilterOperator::Before,
            FilterOperator::After,
            FilterOperator::OnOrBefore,
            FilterOperator::OnOrAfter,
            FilterOperator::Includes,
            FilterOperator::NotIncludes,
            FilterOperator::IncludesAll,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Contains => "contains",
            FilterOperator::NotContains => "notContains",
            FilterOperator::Equals => "equals",
            FilterOperator::NotEquals => "notEquals",
            FilterOperator::StartsWith => "startsWith",
            FilterOperator::EndsWith => "endsWith",
            FilterOperator::IsEmpty => "isEmpty",
            FilterOperator::IsNotEmpty => "isNotEmpty",
            FilterOperator::GreaterThan => "greaterThan",
            FilterOperator::GreaterOrEqual => "greaterOrEqual",
            FilterOperator::LessThan => "lessThan",
            FilterOperator::LessOrEqual => "lessOrEqual",
            FilterOperator::Between => "between",
            FilterOperator::Before => "before",
            FilterOperator::After => "after",
            FilterOperator::OnOrBefore => "onOrBefore",
            FilterOperator::OnOrAfter => "onOrAfter",
            FilterOperator::Includes => "includes",
            FilterOperator::NotIncludes => "notIncludes",
            FilterOperator::IncludesAll => "includesAll",
        }
    }

    /// `isEmpty` / `isNotEmpty` carry no value.
    pub fn ignores_value(&self) -> bool {
        matches!(self, FilterOperator::IsEmpty | FilterOperator::IsNotEmpty)
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FilterOperator {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterOperator::all()
            .iter()
            .copied()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| ParseError::UnknownOperator(s.to_string()))
    }
}

// ============================================================================
// CATALOG
// ============================================================================

/// One selectable operator, with the label shown in the operator picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorOption {
    pub label: &'static str,
    pub value: FilterOperator,
}

const fn opt(label: &'static str, value: FilterOperator) -> OperatorOption {
    OperatorOption { label, value }
}

const TEXT_OPERATORS: &[OperatorOption] = &[
    opt("Contains", FilterOperator::Contains),
    opt("Does not contain", FilterOperator::NotContains),
    opt("Is", FilterOperator::Equals),
    opt("Is not", FilterOperator::NotEquals),
    opt("Starts with", FilterOperator::StartsWith),
    opt("Ends with", FilterOperator::EndsWith),
    opt("Is empty", FilterOperator::IsEmpty),
    opt("Is not empty", FilterOperator::IsNotEmpty),
];

const NUMBER_OPERATORS: &[OperatorOption] = &[
    opt("Is", FilterOperator::Equals),
    opt("Is not", FilterOperator::NotEquals),
    opt("Greater than", FilterOperator::GreaterThan),
    opt("Greater or equal to", FilterOperator::GreaterOrEqual),
    opt("Less than", FilterOperator::LessThan),
    opt("Less or equal to", FilterOperator::LessOrEqual),
    opt("Is between", FilterOperator::Between),
    opt("Is empty", FilterOperator::IsEmpty),
    opt("Is not empty", FilterOperator::IsNotEmpty),
];

const DATE_OPERATORS: &[OperatorOption] = &[
    opt("Is", FilterOperator::Equals),
    opt("Is not", FilterOperator::NotEquals),
    opt("Is before", FilterOperator::Before),
    opt("Is after", FilterOperator::After),
    opt("Is on or before", FilterOperator::OnOrBefore),
    opt("Is on or after", FilterOperator::OnOrAfter),
    opt("Is between", FilterOperator::Between),
    opt("Is empty", FilterOperator::IsEmpty),
    opt("Is not empty", FilterOperator::IsNotEmpty),
];

const SELECT_OPERATORS: &[OperatorOption] = &[
    opt("Is", FilterOperator::Equals),
    opt("Is not", FilterOperator::NotEquals),
    opt("Is empty", FilterOperator::IsEmpty),
    opt("Is not empty", FilterOperator::IsNotEmpty),
];

const MULTI_SELECT_OPERATORS: &[OperatorOption] = &[
    opt("Has any of", FilterOperator::Includes),
    opt("Has none of", FilterOperator::NotIncludes),
    opt("Has all of", FilterOperator::IncludesAll),
    opt("Is empty", FilterOperator::IsEmpty),
    opt("Is not empty", FilterOperator::IsNotEmpty),
];

const BOOLEAN_OPERATORS: &[OperatorOption] = &[opt("Is", FilterOperator::Equals)];

/// Ordered operator list for a variant.
pub fn operators_for(variant: FilterVariant) -> &'static [OperatorOption] {
    match variant {
        FilterVariant::Text => TEXT_OPERATORS,
        FilterVariant::Number | FilterVariant::Range => NUMBER_OPERATORS,
        FilterVariant::Date | FilterVariant::DateRange => DATE_OPERATORS,
        FilterVariant::Select => SELECT_OPERATORS,
        FilterVariant::MultiSelect => MULTI_SELECT_OPERATORS,
        FilterVariant::Boolean => BOOLEAN_OPERATORS,
    }
}

/// Operator list for a variant given by name; unknown names get the text set.
pub fn operators_for_name(variant: &str) -> &'static [OperatorOption] {
    operators_for(FilterVariant::parse_lossy(variant))
}

pub fn default_operator_for(variant: FilterVariant) -> FilterOperator {
    match variant {
        FilterVariant::Text => FilterOperator::Contains,
        FilterVariant::Number
        | FilterVariant::Range
        | FilterVariant::Date
        | FilterVariant::DateRange
        | FilterVariant::Select
        | FilterVariant::Boolean => FilterOperator::Equals,
        FilterVariant::MultiSelect => FilterOperator::Includes,
    }
}

pub fn is_valid_operator(variant: FilterVariant, operator: FilterOperator) -> bool {
    operators_for(variant).iter().any(|o| o.value == operator)
}

/// Label for an operator within a variant's list, if it belongs there.
pub fn operator_label(variant: FilterVariant, operator: FilterOperator) -> Option<&'static str> {
    operators_for(variant)
        .iter()
        .find(|o| o.value == operator)
        .map(|o| o.label)
}

/// The operator following `current` in the variant's list, wrapping around.
pub fn next_operator(variant: FilterVariant, current: FilterOperator) -> FilterOperator {
    let ops = operators_for(variant);
    let next = ops
        .iter()
        .position(|o| o.value == current)
        .map(|i| (i + 1) % ops.len())
        .unwrap_or(0);
    ops[next].value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(variant: FilterVariant) -> Vec<&'static str> {
        operators_for(variant).iter().map(|o| o.value.as_str()).collect()
    }

    #[test]
    fn test_text_operators_in_order() {
        assert_eq!(
            values(FilterVariant::Text),
            vec![
                "contains",
                "notContains",
                "equals",
                "notEquals",
                "startsWith",
                "endsWith",
                "isEmpty",
                "isNotEmpty"
            ]
        );
    }

    #[test]
    fn test_number_and_range_share_operators() {
        assert_eq!(values(FilterVariant::Number), values(FilterVariant::Range));
        assert!(values(FilterVariant::Number).contains(&"greaterOrEqual"));
        assert!(values(FilterVariant::Number).contains(&"between"));
    }

    #[test]
    fn test_date_and_date_range_share_operators() {
        assert_eq!(values(FilterVariant::Date), values(FilterVariant::DateRange));
        assert_eq!(values(FilterVariant::Date)[4], "onOrBefore");
    }

    #[test]
    fn test_boolean_only_equals() {
        assert_eq!(values(FilterVariant::Boolean), vec!["equals"]);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(default_operator_for(FilterVariant::Text), FilterOperator::Contains);
        assert_eq!(default_operator_for(FilterVariant::Number), FilterOperator::Equals);
        assert_eq!(default_operator_for(FilterVariant::Date), FilterOperator::Equals);
        assert_eq!(default_operator_for(FilterVariant::Select), FilterOperator::Equals);
        assert_eq!(
            default_operator_for(FilterVariant::MultiSelect),
            FilterOperator::Includes
        );
        assert_eq!(default_operator_for(FilterVariant::Boolean), FilterOperator::Equals);
    }

    #[test]
    fn test_unknown_variant_name_falls_back_to_text() {
        assert_eq!(operators_for_name("slider"), operators_for(FilterVariant::Text));
        assert_eq!(
            operators_for_name("multi-select"),
            operators_for(FilterVariant::MultiSelect)
        );
    }

    #[test]
    fn test_variant_roundtrips_through_str() {
        for variant in FilterVariant::all() {
            assert_eq!(variant.as_str().parse::<FilterVariant>(), Ok(*variant));
        }
    }

    #[test]
    fn test_operator_roundtrips_through_str() {
        for op in FilterOperator::all() {
            assert_eq!(op.as_str().parse::<FilterOperator>(), Ok(*op));
        }
        assert!("isBetween".parse::<FilterOperator>().is_err());
    }

    #[test]
    fn test_serde_uses_camel_case() {
        let json = serde_json::to_string(&FilterVariant::MultiSelect).unwrap();
        assert_eq!(json, "\"multiSelect\"");
        let json = serde_json::to_string(&FilterOperator::OnOrAfter).unwrap();
        assert_eq!(json, "\"onOrAfter\"");
    }

    #[test]
    fn test_next_operator_wraps() {
        assert_eq!(
            next_operator(FilterVariant::Select, FilterOperator::IsNotEmpty),
            FilterOperator::Equals
        );
        assert_eq!(
            next_operator(FilterVariant::Boolean, FilterOperator::Equals),
            FilterOperator::Equals
        );
        // Operator outside the list restarts at the first entry.
        assert_eq!(
            next_operator(FilterVariant::Text, FilterOperator::Between),
            FilterOperator::Contains
        );
    }
}
