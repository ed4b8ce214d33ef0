use chrono::NaiveDate;
use ecrf_validate::coerce::{is_date, is_number, parse_date};
use proptest::prelude::*;

proptest! {
    #[test]
    fn finite_floats_are_numbers(n in any::<f64>().prop_filter("finite", |n| n.is_finite())) {
        prop_assert!(is_number(&n.to_string()));
        let padded = format!("  {n} ");
        prop_assert!(is_number(&padded));
    }

    #[test]
    fn calendar_dates_parse_in_iso_and_day_first_forms(
        y in 1900i32..2100,
        m in 1u32..=12,
        d in 1u32..=28,
    ) {
        let expected = NaiveDate::from_ymd_opt(y, m, d);
        prop_assert_eq!(parse_date(&format!("{y:04}-{m:02}-{d:02}")), expected);
        prop_assert_eq!(parse_date(&format!("{y:04}-{m:02}")), NaiveDate::from_ymd_opt(y, m, 1));
        let dotted = format!("{d:02}.{m:02}.{y:04}");
        prop_assert!(is_date(&dotted));
        let slashed = format!("{d:02}/{m:02}/{y:04}");
        prop_assert!(is_date(&slashed));
    }

    #[test]
    fn letters_only_are_neither(word in "[g-zG-Z]{1,12}") {
        prop_assert!(!is_number(&word));
        prop_assert!(!is_date(&word));
    }
}
