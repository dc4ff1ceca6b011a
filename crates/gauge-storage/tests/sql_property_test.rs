//! Placeholder numbering properties of the statement builder.

use gauge_storage::batch::sql::build_insert;
use proptest::prelude::*;

/// Collect every `?N` placeholder number in order of appearance.
fn placeholder_numbers(sql: &str) -> Vec<usize> {
    let mut numbers = Vec::new();
    let bytes = sql.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'?' {
            let start = i + 1;
            let mut end = start;
            while end < bytes.len() && bytes[end].is_ascii_digit() {
                end += 1;
            }
            numbers.push(sql[start..end].parse().unwrap());
            i = end;
        } else {
            i += 1;
        }
    }
    numbers
}

proptest! {
    #[test]
    fn placeholders_are_row_major_and_gap_free(
        records in 1usize..40,
        columns in 1usize..8,
    ) {
        let sql = build_insert("t", records, columns);
        prop_assert!(sql.ends_with(';'));

        let numbers = placeholder_numbers(&sql);
        prop_assert_eq!(numbers.len(), records * columns);
        prop_assert!(numbers.iter().enumerate().all(|(i, n)| *n == i + 1));

        // One parenthesized group per record.
        prop_assert_eq!(sql.matches('(').count(), records + 1); // +1 for the column list
        prop_assert_eq!(sql.matches(')').count(), records + 1);
    }
}
