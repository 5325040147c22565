//! Filter entry model: one column/operator/value condition, and the ordered
//! collection of such conditions combined by a single join operator.

use crate::error::ParseError;
use crate::operator::{default_operator_for, is_valid_operator, FilterOperator, FilterVariant};
use rand::distr::Alphanumeric;
use rand::Rng;
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Length of generated filter ids.
pub const FILTER_ID_LENGTH: usize = 8;

/// Generate a short random alphanumeric id.
///
/// No collision check is made; at 62^8 possibilities and a few dozen
/// entries per collection the risk is accepted.
pub fn generate_id(length: usize) -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

// ============================================================================
// IDENTITY
// ============================================================================

/// Opaque, stable identifier of a filter entry within its collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterId(String);

impl FilterId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(generate_id(FILTER_ID_LENGTH))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FilterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// VALUES
// ============================================================================

/// Shape a filter value must have for a given variant and operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    Scalar,
    Pair,
    List,
}

impl ValueShape {
    /// The shape required by `operator` on a column of `variant`.
    pub fn expected(variant: FilterVariant, operator: FilterOperator) -> Self {
        if operator.ignores_value() {
            ValueShape::Scalar
        } else if variant == FilterVariant::MultiSelect {
            ValueShape::List
        } else if variant.is_ranged() || operator == FilterOperator::Between {
            ValueShape::Pair
        } else {
            ValueShape::Scalar
        }
    }

    pub fn neutral(&self) -> FilterValue {
        match self {
            ValueShape::Scalar => FilterValue::Scalar(String::new()),
            ValueShape::Pair => FilterValue::Pair(String::new(), String::new()),
            ValueShape::List => FilterValue::List(Vec::new()),
        }
    }
}

/// Value of a filter entry. Numbers and dates are kept as their text form,
/// dates as epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FilterValue {
    Scalar(String),
    Pair(String, String),
    List(Vec<String>),
}

impl FilterValue {
    /// Neutral value for an entry of `variant` using `operator`.
    pub fn neutral_for(variant: FilterVariant, operator: FilterOperator) -> Self {
        ValueShape::expected(variant, operator).neutral()
    }

    pub fn shape(&self) -> ValueShape {
        match self {
            FilterValue::Scalar(_) => ValueShape::Scalar,
            FilterValue::Pair(_, _) => ValueShape::Pair,
            FilterValue::List(_) => ValueShape::List,
        }
    }

    /// True when the value carries nothing the user typed or picked.
    pub fn is_blank(&self) -> bool {
        match self {
            FilterValue::Scalar(s) => s.is_empty(),
            FilterValue::Pair(from, to) => from.is_empty() && to.is_empty(),
            FilterValue::List(items) => items.is_empty(),
        }
    }
}

impl Default for FilterValue {
    fn default() -> Self {
        FilterValue::Scalar(String::new())
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Scalar(s) => f.write_str(s),
            FilterValue::Pair(from, to) => write!(f, "{} - {}", from, to),
            FilterValue::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

impl Serialize for FilterValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FilterValue::Scalar(s) => serializer.serialize_str(s),
            FilterValue::Pair(from, to) => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(from)?;
                seq.serialize_element(to)?;
                seq.end()
            }
            FilterValue::List(items) => serializer.collect_seq(items),
        }
    }
}

// ============================================================================
// ENTRIES
// ============================================================================

/// One filter condition.
///
/// Field names on the wire follow the query format: the column id is `id`
/// and the entry id is `filterId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterEntry {
    #[serde(rename = "id")]
    pub column_id: String,
    pub value: FilterValue,
    pub variant: FilterVariant,
    pub operator: FilterOperator,
    #[serde(rename = "filterId")]
    pub filter_id: FilterId,
}

impl FilterEntry {
    /// New entry for a column, with the variant's default operator and a
    /// neutral value.
    pub fn new(column_id: impl Into<String>, variant: FilterVariant) -> Self {
        Self::with_filter_id(FilterId::generate(), column_id, variant)
    }

    pub fn with_filter_id(
        filter_id: FilterId,
        column_id: impl Into<String>,
        variant: FilterVariant,
    ) -> Self {
        let operator = default_operator_for(variant);
        Self {
            column_id: column_id.into(),
            value: FilterValue::neutral_for(variant, operator),
            variant,
            operator,
            filter_id,
        }
    }

    /// Operator belongs to the variant and the value has the required shape.
    /// Value-less operators additionally require the neutral value.
    pub fn is_well_formed(&self) -> bool {
        if !is_valid_operator(self.variant, self.operator) {
            return false;
        }
        let expected = ValueShape::expected(self.variant, self.operator);
        if self.operator.ignores_value() {
            return self.value == expected.neutral();
        }
        self.value.shape() == expected
    }

    /// Replace the value by the neutral one whenever it does not fit the
    /// current variant/operator.
    pub(crate) fn normalize_value(&mut self) {
        let expected = ValueShape::expected(self.variant, self.operator);
        if self.operator.ignores_value() || self.value.shape() != expected {
            self.value = expected.neutral();
        }
    }
}

// ============================================================================
// COLLECTION
// ============================================================================

/// Boolean combinator applied between every entry after the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum JoinOperator {
    #[default]
    And,
    Or,
}

impl JoinOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            JoinOperator::And => "and",
            JoinOperator::Or => "or",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            JoinOperator::And => JoinOperator::Or,
            JoinOperator::Or => JoinOperator::And,
        }
    }
}

impl fmt::Display for JoinOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JoinOperator {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "and" => Ok(JoinOperator::And),
            "or" => Ok(JoinOperator::Or),
            _ => Err(ParseError::UnknownJoinOperator(s.to_string())),
        }
    }
}

/// Ordered filter entries plus their join operator.
///
/// Never mutated in place by the mutation API: every change produces a new
/// collection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCollection {
    pub entries: Vec<FilterEntry>,
    pub join_operator: JoinOperator,
}

impl FilterCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<FilterEntry>, join_operator: JoinOperator) -> Self {
        Self {
            entries,
            join_operator,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FilterEntry> {
        self.entries.iter()
    }

    pub fn get(&self, filter_id: &FilterId) -> Option<&FilterEntry> {
        self.entries.iter().find(|e| &e.filter_id == filter_id)
    }

    pub fn position(&self, filter_id: &FilterId) -> Option<usize> {
        self.entries.iter().position(|e| &e.filter_id == filter_id)
    }

    pub fn last(&self) -> Option<&FilterEntry> {
        self.entries.last()
    }

    /// The label shown before the entry at `index`: "Where" for the first,
    /// the join operator afterwards.
    pub fn join_label(&self, index: usize) -> &'static str {
        if index == 0 {
            "Where"
        } else {
            self.join_operator.as_str()
        }
    }

    pub fn has_unique_ids(&self) -> bool {
        let mut seen = std::collections::HashSet::new();
        self.entries.iter().all(|e| seen.insert(&e.filter_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_length_and_alphabet() {
        let id = generate_id(8);
        assert_eq!(id.len(), 8);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(generate_id(0), "");
    }

    #[test]
    fn test_new_entry_uses_defaults() {
        let entry = FilterEntry::new("name", FilterVariant::Text);
        assert_eq!(entry.operator, FilterOperator::Contains);
        assert_eq!(entry.value, FilterValue::Scalar(String::new()));
        assert_eq!(entry.filter_id.as_str().len(), FILTER_ID_LENGTH);
        assert!(entry.is_well_formed());
    }

    #[test]
    fn test_neutral_values_per_variant() {
        let multi = FilterEntry::new("tags", FilterVariant::MultiSelect);
        assert_eq!(multi.operator, FilterOperator::Includes);
        assert_eq!(multi.value, FilterValue::List(vec![]));

        let range = FilterEntry::new("age", FilterVariant::Range);
        assert_eq!(range.value, FilterValue::Pair(String::new(), String::new()));

        let date_range = FilterEntry::new("createdAt", FilterVariant::DateRange);
        assert_eq!(date_range.value, FilterValue::Pair(String::new(), String::new()));

        let number = FilterEntry::new("score", FilterVariant::Number);
        assert_eq!(number.value, FilterValue::Scalar(String::new()));
    }

    #[test]
    fn test_between_requires_pair() {
        assert_eq!(
            ValueShape::expected(FilterVariant::Number, FilterOperator::Between),
            ValueShape::Pair
        );
        assert_eq!(
            ValueShape::expected(FilterVariant::Date, FilterOperator::Before),
            ValueShape::Scalar
        );
        assert_eq!(
            ValueShape::expected(FilterVariant::MultiSelect, FilterOperator::IsEmpty),
            ValueShape::Scalar
        );
    }

    #[test]
    fn test_empty_operator_requires_neutral_value() {
        let mut entry = FilterEntry::new("name", FilterVariant::Text);
        entry.operator = FilterOperator::IsEmpty;
        entry.value = FilterValue::Scalar("x".to_string());
        assert!(!entry.is_well_formed());

        entry.normalize_value();
        assert!(entry.is_well_formed());
        assert_eq!(entry.value, FilterValue::Scalar(String::new()));
    }

    #[test]
    fn test_invalid_operator_not_well_formed() {
        let mut entry = FilterEntry::new("active", FilterVariant::Boolean);
        entry.operator = FilterOperator::Contains;
        assert!(!entry.is_well_formed());
    }

    #[test]
    fn test_value_serialization() {
        let scalar = serde_json::to_string(&FilterValue::Scalar("Omar".into())).unwrap();
        assert_eq!(scalar, "\"Omar\"");
        let pair = serde_json::to_string(&FilterValue::Pair("1".into(), "5".into())).unwrap();
        assert_eq!(pair, "[\"1\",\"5\"]");
        let list = serde_json::to_string(&FilterValue::List(vec!["a".into()])).unwrap();
        assert_eq!(list, "[\"a\"]");
    }

    #[test]
    fn test_entry_serializes_wire_names() {
        let entry = FilterEntry::with_filter_id(FilterId::new("abc"), "name", FilterVariant::Text);
        let json: serde_json::Value = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["id"], "name");
        assert_eq!(json["filterId"], "abc");
        assert_eq!(json["variant"], "text");
        assert_eq!(json["operator"], "contains");
        assert_eq!(json["value"], "");
    }

    #[test]
    fn test_join_operator_parse_and_toggle() {
        assert_eq!("or".parse::<JoinOperator>(), Ok(JoinOperator::Or));
        assert!("OR".parse::<JoinOperator>().is_err());
        assert_eq!(JoinOperator::And.toggled(), JoinOperator::Or);
        assert_eq!(JoinOperator::default(), JoinOperator::And);
    }

    #[test]
    fn test_join_label() {
        let collection = FilterCollection {
            entries: vec![],
            join_operator: JoinOperator::Or,
        };
        assert_eq!(collection.join_label(0), "Where");
        assert_eq!(collection.join_label(2), "or");
    }

    #[test]
    fn test_unique_ids_detection() {
        let a = FilterEntry::with_filter_id(FilterId::new("a"), "name", FilterVariant::Text);
        let b = FilterEntry::with_filter_id(FilterId::new("a"), "email", FilterVariant::Text);
        let collection = FilterCollection::from_entries(vec![a.clone()], JoinOperator::And);
        assert!(collection.has_unique_ids());
        let collection = FilterCollection::from_entries(vec![a, b], JoinOperator::And);
        assert!(!collection.has_unique_ids());
    }
}
