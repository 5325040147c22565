//! Filter mutation API.
//!
//! Every operation takes the current collection and returns a new one.
//! Intents that cannot apply (unknown id, out-of-range index, no filterable
//! column) return an unchanged copy and are logged at debug level.

use crate::filter::{FilterCollection, FilterEntry, FilterId, FilterValue, JoinOperator};
use crate::operator::{default_operator_for, is_valid_operator, FilterOperator, FilterVariant};
use crate::table::{ColumnCatalog, ColumnDef};

/// Partial update of one entry. Unset fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch {
    pub column_id: Option<String>,
    pub variant: Option<FilterVariant>,
    pub operator: Option<FilterOperator>,
    pub value: Option<FilterValue>,
}

impl FilterPatch {
    /// Switch the entry to another column.
    pub fn column(column: &ColumnDef) -> Self {
        Self {
            column_id: Some(column.id.clone()),
            variant: Some(column.variant),
            ..Self::default()
        }
    }

    pub fn operator(operator: FilterOperator) -> Self {
        Self {
            operator: Some(operator),
            ..Self::default()
        }
    }

    pub fn value(value: FilterValue) -> Self {
        Self {
            value: Some(value),
            ..Self::default()
        }
    }
}

/// Append an entry for the first filterable column.
pub fn add(collection: &FilterCollection, catalog: &ColumnCatalog) -> FilterCollection {
    let Some(column) = catalog.first_filterable() else {
        tracing::debug!("No filterable column, nothing to add");
        return collection.clone();
    };
    let mut next = collection.clone();
    next.entries.push(FilterEntry::new(column.id.clone(), column.variant));
    next
}

/// Apply `patch` to the entry with `filter_id`.
///
/// A new column resets variant, operator and value to that column's
/// defaults before the rest of the patch applies. An operator outside the
/// variant's set falls back to the default one, and a value that does not
/// fit the resulting operator is replaced by the neutral value.
pub fn update(
    collection: &FilterCollection,
    filter_id: &FilterId,
    patch: FilterPatch,
) -> FilterCollection {
    let Some(index) = collection.position(filter_id) else {
        tracing::debug!(filter_id = %filter_id, "Update for unknown filter ignored");
        return collection.clone();
    };

    let mut next = collection.clone();
    let entry = &mut next.entries[index];

    match patch.column_id {
        Some(column_id) if column_id != entry.column_id => {
            let variant = patch.variant.unwrap_or(entry.variant);
            entry.column_id = column_id;
            entry.variant = variant;
            entry.operator = default_operator_for(variant);
            entry.value = FilterValue::neutral_for(variant, entry.operator);
        }
        _ => {
            if let Some(variant) = patch.variant {
                entry.variant = variant;
            }
        }
    }

    if let Some(operator) = patch.operator {
        entry.operator = operator;
    }
    if !is_valid_operator(entry.variant, entry.operator) {
        tracing::debug!(
            filter_id = %filter_id,
            variant = %entry.variant,
            operator = %entry.operator,
            "Operator not allowed for variant, using default"
        );
        entry.operator = default_operator_for(entry.variant);
    }
    if let Some(value) = patch.value {
        entry.value = value;
    }
    entry.normalize_value();

    next
}

pub fn remove(collection: &FilterCollection, filter_id: &FilterId) -> FilterCollection {
    let mut next = collection.clone();
    next.entries.retain(|e| &e.filter_id != filter_id);
    if next.len() == collection.len() {
        tracing::debug!(filter_id = %filter_id, "Remove for unknown filter ignored");
    }
    next
}

/// Remove the last entry; no-op on an empty collection.
pub fn remove_last(collection: &FilterCollection) -> FilterCollection {
    match collection.last() {
        Some(entry) => remove(collection, &entry.filter_id),
        None => collection.clone(),
    }
}

/// Move the entry at `from` to position `to`.
pub fn reorder(collection: &FilterCollection, from: usize, to: usize) -> FilterCollection {
    let len = collection.len();
    if from >= len || to >= len {
        tracing::debug!(from, to, len, "Reorder out of range ignored");
        return collection.clone();
    }
    let mut next = collection.clone();
    let entry = next.entries.remove(from);
    next.entries.insert(to, entry);
    next
}

/// Empty collection joined by `and`.
pub fn reset() -> FilterCollection {
    FilterCollection::new()
}

pub fn set_join_operator(collection: &FilterCollection, join: JoinOperator) -> FilterCollection {
    FilterCollection {
        entries: collection.entries.clone(),
        join_operator: join,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> ColumnCatalog {
        ColumnCatalog::new(vec![
            ColumnDef::new("name", "Name", FilterVariant::Text),
            ColumnDef::new("age", "Age", FilterVariant::Number),
            ColumnDef::new("tags", "Tags", FilterVariant::MultiSelect),
        ])
    }

    fn entry(id: &str, column: &str, variant: FilterVariant) -> FilterEntry {
        FilterEntry::with_filter_id(FilterId::new(id), column, variant)
    }

    fn abc() -> FilterCollection {
        FilterCollection::from_entries(
            vec![
                entry("A", "name", FilterVariant::Text),
                entry("B", "age", FilterVariant::Number),
                entry("C", "tags", FilterVariant::MultiSelect),
            ],
            JoinOperator::And,
        )
    }

    fn ids(collection: &FilterCollection) -> Vec<&str> {
        collection.iter().map(|e| e.filter_id.as_str()).collect()
    }

    #[test]
    fn test_add_uses_first_filterable_column() {
        let added = add(&FilterCollection::new(), &catalog());
        assert_eq!(added.len(), 1);
        let entry = &added.entries[0];
        assert_eq!(entry.column_id, "name");
        assert_eq!(entry.operator, FilterOperator::Contains);
        assert_eq!(entry.value, FilterValue::Scalar(String::new()));
    }

    #[test]
    fn test_add_without_filterable_columns_is_noop() {
        let catalog = ColumnCatalog::new(vec![
            ColumnDef::new("name", "Name", FilterVariant::Text).not_filterable()
        ]);
        let collection = abc();
        assert_eq!(add(&collection, &catalog), collection);
        assert_eq!(add(&FilterCollection::new(), &ColumnCatalog::default()), FilterCollection::new());
    }

    #[test]
    fn test_add_preserves_existing_entries() {
        let added = add(&abc(), &catalog());
        assert_eq!(&ids(&added)[..3], ["A", "B", "C"]);
        assert!(added.has_unique_ids());
    }

    #[test]
    fn test_reorder_moves_first_to_last() {
        assert_eq!(ids(&reorder(&abc(), 0, 2)), vec!["B", "C", "A"]);
        assert_eq!(ids(&reorder(&abc(), 2, 0)), vec!["C", "A", "B"]);
        assert_eq!(reorder(&abc(), 1, 1), abc());
        assert_eq!(reorder(&abc(), 0, 3), abc());
    }

    #[test]
    fn test_update_missing_id_is_noop() {
        let collection = abc();
        let patched = update(&collection, &FilterId::new("Z"), FilterPatch::operator(FilterOperator::IsEmpty));
        assert_eq!(patched, collection);
    }

    #[test]
    fn test_update_to_empty_operator_neutralizes_value() {
        let collection = update(
            &abc(),
            &FilterId::new("A"),
            FilterPatch::value(FilterValue::Scalar("Omar".into())),
        );
        let patched = update(&collection, &FilterId::new("A"), FilterPatch::operator(FilterOperator::IsEmpty));
        let entry = patched.get(&FilterId::new("A")).unwrap();
        assert_eq!(entry.operator, FilterOperator::IsEmpty);
        assert_eq!(entry.value, FilterValue::Scalar(String::new()));
        assert!(entry.is_well_formed());

        // Value patches on an empty operator are discarded too.
        let patched = update(&patched, &FilterId::new("A"), FilterPatch::value(FilterValue::Scalar("x".into())));
        assert_eq!(patched.get(&FilterId::new("A")).unwrap().value, FilterValue::Scalar(String::new()));
    }

    #[test]
    fn test_update_invalid_operator_coerced_to_default() {
        let patched = update(&abc(), &FilterId::new("A"), FilterPatch::operator(FilterOperator::GreaterThan));
        assert_eq!(patched.get(&FilterId::new("A")).unwrap().operator, FilterOperator::Contains);
    }

    #[test]
    fn test_update_column_change_resets_defaults() {
        let collection = update(
            &abc(),
            &FilterId::new("A"),
            FilterPatch {
                operator: Some(FilterOperator::StartsWith),
                value: Some(FilterValue::Scalar("Om".into())),
                ..FilterPatch::default()
            },
        );
        let age = catalog().get("age").cloned().unwrap();
        let patched = update(&collection, &FilterId::new("A"), FilterPatch::column(&age));
        let entry = patched.get(&FilterId::new("A")).unwrap();
        assert_eq!(entry.column_id, "age");
        assert_eq!(entry.variant, FilterVariant::Number);
        assert_eq!(entry.operator, FilterOperator::Equals);
        assert_eq!(entry.value, FilterValue::Scalar(String::new()));
        assert_eq!(patched.position(&FilterId::new("A")), Some(0));
    }

    #[test]
    fn test_update_between_requires_pair() {
        let patched = update(&abc(), &FilterId::new("B"), FilterPatch::value(FilterValue::Scalar("5".into())));
        let patched = update(&patched, &FilterId::new("B"), FilterPatch::operator(FilterOperator::Between));
        let entry = patched.get(&FilterId::new("B")).unwrap();
        assert_eq!(entry.value, FilterValue::Pair(String::new(), String::new()));

        let patched = update(
            &patched,
            &FilterId::new("B"),
            FilterPatch::value(FilterValue::Pair("1".into(), "9".into())),
        );
        assert_eq!(
            patched.get(&FilterId::new("B")).unwrap().value,
            FilterValue::Pair("1".into(), "9".into())
        );
    }

    #[test]
    fn test_update_keeps_value_between_scalar_operators() {
        let patched = update(&abc(), &FilterId::new("A"), FilterPatch::value(FilterValue::Scalar("Om".into())));
        let patched = update(&patched, &FilterId::new("A"), FilterPatch::operator(FilterOperator::StartsWith));
        assert_eq!(patched.get(&FilterId::new("A")).unwrap().value, FilterValue::Scalar("Om".into()));
    }

    #[test]
    fn test_remove_and_remove_last() {
        assert_eq!(ids(&remove(&abc(), &FilterId::new("B"))), vec!["A", "C"]);
        assert_eq!(remove(&abc(), &FilterId::new("Z")), abc());
        assert_eq!(ids(&remove_last(&abc())), vec!["A", "B"]);
        assert_eq!(remove_last(&FilterCollection::new()), FilterCollection::new());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let once = reset();
        assert_eq!(once, FilterCollection::new());
        assert_eq!(once.join_operator, JoinOperator::And);
        assert_eq!(reset(), once);
    }

    #[test]
    fn test_set_join_operator_keeps_entries() {
        let joined = set_join_operator(&abc(), JoinOperator::Or);
        assert_eq!(joined.join_operator, JoinOperator::Or);
        assert_eq!(joined.entries, abc().entries);
    }
}
