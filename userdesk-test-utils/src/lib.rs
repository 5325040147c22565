//! Userdesk Test Utilities
//!
//! Shared test infrastructure for the userdesk workspace:
//! - Proptest generators for filter entries and collections
//! - Fixtures for the users table and common filter states
//! - Assertions for filter-specific validation

pub use userdesk_core::{
    ColumnCatalog, ColumnDef, ColumnOption, FilterCollection, FilterEntry, FilterId,
    FilterOperator, FilterValue, FilterVariant, JoinOperator, QueryKeys, UserRow, ValueShape,
};

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for the filter model.

    use super::*;
    use proptest::prelude::*;
    use userdesk_core::operator::operators_for;

    /// Any filter variant.
    pub fn arb_variant() -> impl Strategy<Value = FilterVariant> {
        prop::sample::select(FilterVariant::all().to_vec())
    }

    /// An operator from the catalog of `variant`.
    pub fn arb_operator_for(variant: FilterVariant) -> impl Strategy<Value = FilterOperator> {
        let values: Vec<FilterOperator> = operators_for(variant).iter().map(|o| o.value).collect();
        prop::sample::select(values)
    }

    /// Text as a user would type it, including characters that need
    /// percent-encoding in a query string.
    pub fn arb_value_text() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9 &=+%?#\"'/,\\-]{0,12}"
    }

    /// A value with the shape required by `variant` and `operator`.
    pub fn arb_value_for(
        variant: FilterVariant,
        operator: FilterOperator,
    ) -> BoxedStrategy<FilterValue> {
        if operator.ignores_value() {
            return Just(FilterValue::Scalar(String::new())).boxed();
        }
        match ValueShape::expected(variant, operator) {
            ValueShape::Scalar => arb_value_text().prop_map(FilterValue::Scalar).boxed(),
            ValueShape::Pair => (arb_value_text(), arb_value_text())
                .prop_map(|(from, to)| FilterValue::Pair(from, to))
                .boxed(),
            ValueShape::List => prop::collection::vec(arb_value_text(), 0..4)
                .prop_map(FilterValue::List)
                .boxed(),
        }
    }

    /// A well-formed entry on one of `column_ids`. The filter id is left to
    /// the caller so collections can assign unique ones.
    pub fn arb_well_formed_entry(column_ids: Vec<String>) -> impl Strategy<Value = FilterEntry> {
        (prop::sample::select(column_ids), arb_variant())
            .prop_flat_map(|(column_id, variant)| {
                (Just(column_id), Just(variant), arb_operator_for(variant))
            })
            .prop_flat_map(|(column_id, variant, operator)| {
                (
                    Just(column_id),
                    Just(variant),
                    Just(operator),
                    arb_value_for(variant, operator),
                )
            })
            .prop_map(|(column_id, variant, operator, value)| FilterEntry {
                column_id,
                value,
                variant,
                operator,
                filter_id: FilterId::new("pending"),
            })
    }

    pub fn arb_join_operator() -> impl Strategy<Value = JoinOperator> {
        prop_oneof![Just(JoinOperator::And), Just(JoinOperator::Or)]
    }

    /// A well-formed collection of up to `max_len` entries with unique ids.
    pub fn arb_collection(
        column_ids: Vec<String>,
        max_len: usize,
    ) -> impl Strategy<Value = FilterCollection> {
        (
            prop::collection::vec(arb_well_formed_entry(column_ids), 0..=max_len),
            arb_join_operator(),
        )
            .prop_map(|(entries, join_operator)| {
                let entries = entries
                    .into_iter()
                    .enumerate()
                    .map(|(i, mut entry)| {
                        entry.filter_id = FilterId::new(format!("f{:07}", i));
                        entry
                    })
                    .collect();
                FilterCollection::from_entries(entries, join_operator)
            })
    }

    /// Arbitrary JSON text, mostly malformed filter state.
    pub fn arb_junk_filter_text() -> impl Strategy<Value = String> {
        prop_oneof![
            ".{0,40}",
            Just("[]".to_string()),
            Just("null".to_string()),
            Just("{\"id\":\"name\"}".to_string()),
            "\\[\\{\"id\":\"[a-z]{0,6}\",\"variant\":\"[a-zA-Z]{0,8}\",\"operator\":\"[a-zA-Z]{0,10}\",\"filterId\":\"[a-z0-9]{0,4}\"\\}\\]",
        ]
    }
}

// ============================================================================
// TEST FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built fixtures for common testing scenarios.

    use super::*;

    /// Columns covering every variant.
    pub fn sample_catalog() -> ColumnCatalog {
        ColumnCatalog::new(vec![
            ColumnDef::new("name", "Name", FilterVariant::Text),
            ColumnDef::new("age", "Age", FilterVariant::Number),
            ColumnDef::new("score", "Score", FilterVariant::Range).with_range(0.0, 100.0),
            ColumnDef::new("createdAt", "Created At", FilterVariant::Date),
            ColumnDef::new("period", "Period", FilterVariant::DateRange),
            ColumnDef::new("active", "Active", FilterVariant::Boolean),
            ColumnDef::new("role", "Role", FilterVariant::Select)
                .with_options(vec![ColumnOption::new("Admin", "admin"), ColumnOption::new("User", "user")]),
            ColumnDef::new("tags", "Tags", FilterVariant::MultiSelect)
                .with_options(vec![ColumnOption::new("New", "new"), ColumnOption::new("Vip", "vip")]),
            ColumnDef::new("notes", "Notes", FilterVariant::Text).not_filterable(),
        ])
    }

    pub fn sample_column_ids() -> Vec<String> {
        sample_catalog().filterable_ids()
    }

    /// An entry with a fixed id.
    pub fn entry(filter_id: &str, column_id: &str, variant: FilterVariant) -> FilterEntry {
        FilterEntry::with_filter_id(FilterId::new(filter_id), column_id, variant)
    }

    /// `name contains "Omar"`.
    pub fn omar_filter() -> FilterCollection {
        let mut omar = entry("omar0001", "name", FilterVariant::Text);
        omar.value = FilterValue::Scalar("Omar".to_string());
        FilterCollection::from_entries(vec![omar], JoinOperator::And)
    }

    pub fn user_row(id: &str, name: &str, email: &str, created_at: &str) -> UserRow {
        UserRow {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            mobile: String::new(),
            role: userdesk_core::user::DEFAULT_ROLE.to_string(),
            created_at: created_at.to_string(),
        }
    }

    pub fn sample_users() -> Vec<UserRow> {
        vec![
            user_row("1", "Omar Haddad", "omar@example.com", "2023-05-01T10:30:00Z"),
            user_row("2", "Ana Lopez", "ana@example.com", "2022-11-12T08:00:00Z"),
            user_row("3", "Bea Omarova", "bea@example.com", "2024-01-20T17:45:00Z"),
            user_row("4", "Carl Wu", "carl@example.com", "2021-03-03T12:00:00Z"),
        ]
    }

    /// A users API body with `count` users.
    pub fn users_body(count: usize) -> String {
        let data: Vec<serde_json::Value> = (0..count)
            .map(|i| {
                serde_json::json!({
                    "id": i + 1,
                    "firstName": format!("First{}", i),
                    "lastName": format!("Last{}", i),
                    "email": format!("user{}@example.com", i),
                    "mobile": format!("555-{:04}", i),
                    "registeredAt": "2023-05-01T10:30:00Z",
                })
            })
            .collect();
        serde_json::json!({ "data": data }).to_string()
    }
}

// ============================================================================
// CUSTOM ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Assertions for filter-specific validation.

    use super::*;

    /// Assert that every entry is well formed and ids are unique.
    #[track_caller]
    pub fn assert_valid_collection(collection: &FilterCollection) {
        for entry in collection.iter() {
            assert!(entry.is_well_formed(), "Entry not well formed: {:?}", entry);
        }
        assert!(collection.has_unique_ids(), "Duplicate filter ids: {:?}", collection);
    }

    /// Assert that every entry references one of `column_ids`.
    #[track_caller]
    pub fn assert_known_columns(collection: &FilterCollection, column_ids: &[String]) {
        for entry in collection.iter() {
            assert!(
                column_ids.contains(&entry.column_id),
                "Entry on unknown column {}: {:?}",
                entry.column_id,
                entry
            );
        }
    }
}
