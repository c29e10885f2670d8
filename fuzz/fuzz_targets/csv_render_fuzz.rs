//! Fuzz test for CSV rendering
//!
//! Arbitrary dimension text must render to exactly one logical record per
//! row, with quotes balanced.
//!
//! Run with: cargo +nightly fuzz run csv_render_fuzz -- -max_total_time=60

#![no_main]

use headcount_core::{render_csv, CountValues, SiteLocation, SiteRecord};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let mut parts = input.splitn(4, '\u{1f}');
    let location = SiteLocation::new(
        parts.next().unwrap_or(""),
        parts.next().unwrap_or(""),
        parts.next().unwrap_or(""),
        parts.next().unwrap_or(""),
    );
    let record = SiteRecord::new(1, location, CountValues::new(1, 2, 3));

    let bytes = render_csv(&[record]);
    let text = String::from_utf8(bytes).expect("CSV output is UTF-8");

    assert!(text.ends_with(",1,2,3,6\r\n"));
    assert_eq!(text.matches('"').count() % 2, 0, "unbalanced quotes");
});
