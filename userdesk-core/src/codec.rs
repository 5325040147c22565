//! Query-string codec for filter state.
//!
//! The filter collection is stored as a JSON array in one query parameter
//! and the join operator in another. Both parameters are cleared (absent)
//! when they hold their default value. Decoding is fail-soft: an entry that
//! does not validate is dropped, never the whole collection.

use crate::filter::{FilterCollection, FilterEntry, FilterId, FilterValue, JoinOperator, ValueShape};
use crate::operator::{is_valid_operator, FilterOperator, FilterVariant};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::HashSet;

/// Names of the query parameters holding filter state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueryKeys {
    pub filters: String,
    pub join_operator: String,
}

impl Default for QueryKeys {
    fn default() -> Self {
        Self {
            filters: "filters".to_string(),
            join_operator: String::new(),
        }
    }
}

// ============================================================================
// FILTERS PARAMETER
// ============================================================================

/// Encode the entries of a collection. `None` means the parameter is absent.
pub fn encode_filters(collection: &FilterCollection) -> Option<String> {
    if collection.is_empty() {
        return None;
    }
    match serde_json::to_string(&collection.entries) {
        Ok(text) => Some(text),
        Err(err) => {
            tracing::warn!(error = %err, "Failed to encode filter state");
            None
        }
    }
}

/// Decode filter entries, keeping only those that validate against the
/// catalog and reference a known column. Never fails.
pub fn decode_filters(text: &str, known_column_ids: &[String]) -> Vec<FilterEntry> {
    let items = match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(items)) => items,
        Ok(_) => {
            tracing::debug!("Filter state is not a list, ignoring it");
            return Vec::new();
        }
        Err(err) => {
            tracing::debug!(error = %err, "Filter state is not valid JSON, ignoring it");
            return Vec::new();
        }
    };

    let known: HashSet<&str> = known_column_ids.iter().map(String::as_str).collect();
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter_map(|item| decode_entry(item, &known))
        .filter(|entry| seen.insert(entry.filter_id.clone()))
        .collect()
}

#[derive(Deserialize)]
struct WireEntry {
    id: String,
    #[serde(default)]
    value: Value,
    variant: String,
    operator: String,
    #[serde(rename = "filterId")]
    filter_id: String,
}

fn decode_entry(item: Value, known: &HashSet<&str>) -> Option<FilterEntry> {
    let wire: WireEntry = match serde_json::from_value(item) {
        Ok(wire) => wire,
        Err(err) => {
            tracing::debug!(error = %err, "Dropping malformed filter entry");
            return None;
        }
    };

    if wire.filter_id.is_empty() {
        tracing::debug!(column_id = %wire.id, "Dropping filter entry without id");
        return None;
    }
    if !known.contains(wire.id.as_str()) {
        tracing::debug!(column_id = %wire.id, "Dropping filter on unknown column");
        return None;
    }

    let variant = FilterVariant::parse_lossy(&wire.variant);
    let operator = match wire.operator.parse::<FilterOperator>() {
        Ok(op) if is_valid_operator(variant, op) => op,
        _ => {
            tracing::debug!(
                column_id = %wire.id,
                variant = %variant,
                operator = %wire.operator,
                "Dropping filter with invalid operator"
            );
            return None;
        }
    };

    let value = match decode_value(wire.value, variant, operator) {
        Some(value) => value,
        None => {
            tracing::debug!(column_id = %wire.id, "Dropping filter with mismatched value");
            return None;
        }
    };

    Some(FilterEntry {
        column_id: wire.id,
        value,
        variant,
        operator,
        filter_id: FilterId::new(wire.filter_id),
    })
}

fn decode_value(raw: Value, variant: FilterVariant, operator: FilterOperator) -> Option<FilterValue> {
    if operator.ignores_value() {
        return Some(ValueShape::Scalar.neutral());
    }
    match (ValueShape::expected(variant, operator), raw) {
        (ValueShape::Scalar, raw) => scalar_text(&raw).map(FilterValue::Scalar),
        (ValueShape::Pair, Value::Array(items)) if items.len() == 2 => {
            let from = scalar_text(&items[0])?;
            let to = scalar_text(&items[1])?;
            Some(FilterValue::Pair(from, to))
        }
        (ValueShape::List, Value::Array(items)) => items
            .iter()
            .map(scalar_text)
            .collect::<Option<Vec<_>>>()
            .map(FilterValue::List),
        _ => None,
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

// ============================================================================
// JOIN OPERATOR PARAMETER
// ============================================================================

/// `None` (absent) for the default `and`.
pub fn encode_join_operator(join: JoinOperator) -> Option<&'static str> {
    match join {
        JoinOperator::And => None,
        JoinOperator::Or => Some(JoinOperator::Or.as_str()),
    }
}

/// Unknown or missing text decodes to the default `and`.
pub fn decode_join_operator(text: Option<&str>) -> JoinOperator {
    text.and_then(|t| t.parse().ok()).unwrap_or_default()
}

// ============================================================================
// QUERY STRING
// ============================================================================

/// Ordered, percent-decoded view of a query string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryState {
    params: Vec<(String, String)>,
}

impl QueryState {
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let params = query
            .split('&')
            .filter(|segment| !segment.is_empty())
            .filter_map(|segment| {
                let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
                Some((decode_component(key)?, decode_component(value)?))
            })
            .collect();
        Self { params }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set or clear a parameter. The first occurrence keeps its position;
    /// duplicates are removed.
    pub fn set(&mut self, key: &str, value: Option<String>) {
        let position = self.params.iter().position(|(k, _)| k == key);
        self.params.retain(|(k, _)| k != key);
        if let Some(value) = value {
            let index = position.unwrap_or(self.params.len()).min(self.params.len());
            self.params.insert(index, (key.to_string(), value));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn to_query_string(&self) -> String {
        self.params
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

fn decode_component(raw: &str) -> Option<String> {
    let spaced: Cow<'_, str> = if raw.contains('+') {
        Cow::Owned(raw.replace('+', " "))
    } else {
        Cow::Borrowed(raw)
    };
    match urlencoding::decode(&spaced) {
        Ok(decoded) => Some(decoded.into_owned()),
        Err(err) => {
            tracing::debug!(error = %err, "Skipping query parameter that is not UTF-8");
            None
        }
    }
}

/// Hydrate a filter collection from a query string.
pub fn load(query: &str, keys: &QueryKeys, known_column_ids: &[String]) -> FilterCollection {
    let state = QueryState::parse(query);
    let entries = state
        .get(&keys.filters)
        .map(|text| decode_filters(text, known_column_ids))
        .unwrap_or_default();
    let join_operator = decode_join_operator(state.get(&keys.join_operator));
    FilterCollection::from_entries(entries, join_operator)
}

/// Write a filter collection into `query`, leaving other parameters alone.
pub fn commit(collection: &FilterCollection, keys: &QueryKeys, query: &str) -> String {
    let mut state = QueryState::parse(query);
    state.set(&keys.filters, encode_filters(collection));
    state.set(
        &keys.join_operator,
        encode_join_operator(collection.join_operator).map(str::to_string),
    );
    state.to_query_string()
}
