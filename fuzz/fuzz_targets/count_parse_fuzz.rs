//! Fuzz test for count parsing
//!
//! Arbitrary text for the three count fields must either parse to integers
//! or be rejected with the failing field named, never panic.
//!
//! Run with: cargo +nightly fuzz run count_parse_fuzz -- -max_total_time=60

#![no_main]

use headcount_core::{CountValues, ValidationError};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let mut fields = input.splitn(3, '\u{1f}');
    let rse = fields.next().unwrap_or("");
    let dse = fields.next().unwrap_or("");
    let itc = fields.next().unwrap_or("");

    match CountValues::parse(rse, dse, itc) {
        Ok(counts) => {
            assert_eq!(Ok(counts.rse_count), rse.trim().parse::<i32>());
            assert_eq!(
                counts.total(),
                i64::from(counts.rse_count)
                    + i64::from(counts.dse_count)
                    + i64::from(counts.itc_count)
            );
        }
        Err(ValidationError::InvalidInteger { field, .. }) => {
            assert!(["rse_count", "dse_count", "itc_count"].contains(&field.as_str()));
        }
        Err(other) => panic!("unexpected error kind: {other}"),
    }
});
