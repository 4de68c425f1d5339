//! Property-based tests for value conversion and filter compilation using proptest

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_orm_system::core::codec::{convert, quoted_literal, sql_text};
use rust_orm_system::prelude::*;

fn two_digits(part: &str) -> bool {
    part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit())
}

// ============================================================================
// Conversion Tests
// ============================================================================

proptest! {
    /// Dates render as `Y-MM-DD HH:MM:SS` with zero-padded fields
    #[test]
    fn test_datetime_format(
        year in 1i32..=9999,
        month in 1u32..=12,
        day in 1u32..=28,
        hour in 0u32..24,
        minute in 0u32..60,
        second in 0u32..60,
    ) {
        let value = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hour, minute, second))
            .map(DatabaseValue::DateTime)
            .unwrap();
        let text = sql_text(&value);

        let (date, time) = text.split_once(' ').unwrap();
        let date_parts: Vec<&str> = date.split('-').collect();
        let time_parts: Vec<&str> = time.split(':').collect();

        prop_assert_eq!(date_parts.len(), 3);
        prop_assert_eq!(date_parts[0], year.to_string());
        prop_assert!(date_parts[1..].iter().all(|p| two_digits(p)));
        prop_assert_eq!(time_parts.len(), 3);
        prop_assert!(time_parts.iter().all(|p| two_digits(p)));
    }

    /// Booleans become 1 or 0
    #[test]
    fn test_bool_becomes_digit(value in any::<bool>()) {
        let converted = convert(&DatabaseValue::from(value));
        prop_assert_eq!(converted, DatabaseValue::Int(i32::from(value)));
        prop_assert_eq!(sql_text(&DatabaseValue::from(value)), if value { "1" } else { "0" });
    }

    /// Strings pass through unchanged
    #[test]
    fn test_string_passthrough(value in ".*") {
        let db_val = DatabaseValue::from(value.clone());
        prop_assert_eq!(convert(&db_val), db_val);
        prop_assert_eq!(sql_text(&DatabaseValue::from(value.clone())), value);
    }

    /// Integers pass through unchanged
    #[test]
    fn test_long_passthrough(value in any::<i64>()) {
        let db_val = DatabaseValue::from(value);
        prop_assert_eq!(convert(&db_val), db_val);
        prop_assert_eq!(sql_text(&DatabaseValue::from(value)), value.to_string());
    }

    /// Quoted literals never contain an unpaired double quote
    #[test]
    fn test_quoted_literal_is_balanced(value in ".*") {
        let literal = quoted_literal(&DatabaseValue::from(value));
        prop_assert!(literal.starts_with('"') && literal.ends_with('"'));
        let inner = &literal[1..literal.len() - 1];
        prop_assert!(!inner.replace("\"\"", "").contains('"'));
    }

    /// Integer truthiness follows zero
    #[test]
    fn test_long_truthiness(value in any::<i64>()) {
        prop_assert_eq!(DatabaseValue::from(value).is_truthy(), value != 0);
    }
}

// ============================================================================
// Filter Tests
// ============================================================================

proptest! {
    /// Equality terms quote the column and the value
    #[test]
    fn test_equality_term(field in "[a-z_]{1,12}", value in any::<i64>()) {
        let sql = Filter::new().eq(&field, value).compile().unwrap();
        prop_assert_eq!(sql, format!("`{field}` = \"{value}\""));
    }

    /// Terms are joined with AND in insertion order
    #[test]
    fn test_terms_keep_order(fields in prop::collection::btree_set("[a-z]{1,8}", 1..6)) {
        let fields: Vec<String> = fields.into_iter().collect();
        let filter = fields
            .iter()
            .fold(Filter::new(), |filter, field| filter.eq(field, 1));
        let sql = filter.compile().unwrap();

        let expected: Vec<String> = fields.iter().map(|f| format!("`{f}` = \"1\"")).collect();
        prop_assert_eq!(sql, expected.join(" AND "));
    }

    /// `$in` lists made only of falsy values are rejected
    #[test]
    fn test_in_with_only_falsy_values(count in 0usize..8) {
        let err = Filter::new()
            .is_in("id", vec![0i64; count])
            .compile()
            .unwrap_err();
        prop_assert!(err.is_empty_filter_set());
    }

    /// `$in` keeps every truthy value, unquoted
    #[test]
    fn test_in_keeps_truthy_values(values in prop::collection::vec(1i64..1000, 1..10)) {
        let sql = Filter::new().is_in("id", values.clone()).compile().unwrap();
        let listed: Vec<String> = values.iter().map(i64::to_string).collect();
        prop_assert_eq!(sql, format!("`id` IN ({})", listed.join(", ")));
    }
}
