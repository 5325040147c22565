//! Fuzz target for the filters parameter decoder.
//!
//! Arbitrary text must decode without panicking into well-formed entries
//! on known columns with unique filter ids.
//!
//! Run with: cargo +nightly fuzz run decode_filters_fuzz -- -max_total_time=60

#![no_main]

use libfuzzer_sys::fuzz_target;
use userdesk_core::codec::{decode_filters, encode_filters};
use userdesk_core::user::users_catalog;
use userdesk_core::{FilterCollection, JoinOperator};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let known = users_catalog().filterable_ids();
        let entries = decode_filters(input, &known);

        for entry in &entries {
            assert!(entry.is_well_formed(), "decoded malformed entry: {:?}", entry);
            assert!(known.contains(&entry.column_id));
        }

        let collection = FilterCollection::from_entries(entries, JoinOperator::And);
        assert!(collection.has_unique_ids());

        // Whatever survived decoding must survive a second round trip.
        if let Some(text) = encode_filters(&collection) {
            assert_eq!(decode_filters(&text, &known), collection.entries);
        }
    }
});
