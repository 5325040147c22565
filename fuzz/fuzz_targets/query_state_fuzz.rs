//! Fuzz target for query-string parsing and filter hydration.
//!
//! Run with: cargo +nightly fuzz run query_state_fuzz -- -max_total_time=60

#![no_main]

use libfuzzer_sys::fuzz_target;
use userdesk_core::codec::{commit, load, QueryKeys, QueryState};
use userdesk_core::user::users_catalog;

fuzz_target!(|data: &[u8]| {
    if let Ok(query) = std::str::from_utf8(data) {
        let keys = QueryKeys::default();
        let known = users_catalog().filterable_ids();

        let state = QueryState::parse(query);
        let reparsed = QueryState::parse(&state.to_query_string());
        assert_eq!(state, reparsed, "serialized query must parse back identically");

        let collection = load(query, &keys, &known);
        let written = commit(&collection, &keys, query);
        assert_eq!(load(&written, &keys, &known), collection);
    }
});
