use chrono::{Datelike, Duration, NaiveDate};
use proptest::prelude::*;

use miqat::prelude::*;
use miqat::types::{DayTimings, DualDate, MonthName, ProviderDate};

fn september() -> Vec<ProviderDay> {
    (1..=30)
        .map(|day| ProviderDay {
            date: DualDate {
                gregorian: ProviderDate {
                    date: format!("{:02}-09-2026", day),
                    month: MonthName {
                        number: 9,
                        en: "September".to_string(),
                    },
                    year: "2026".to_string(),
                },
                hijri: ProviderDate {
                    date: format!("{:02}-03-1448", day),
                    month: MonthName {
                        number: 3,
                        en: "Rabi al-awwal".to_string(),
                    },
                    year: "1448".to_string(),
                },
            },
            timings: DayTimings {
                fajr: "05:12".to_string(),
                sunrise: "06:31".to_string(),
                dhuhr: "12:57".to_string(),
                asr: "16:29".to_string(),
                maghrib: "19:21".to_string(),
                isha: "20:41".to_string(),
            },
        })
        .collect()
}

proptest! {
    /// Invariant: `parse_instant` never panics, whatever the provider sends.
    #[test]
    fn no_panic_parse_invariant(raw in "\\PC*") {
        let date = NaiveDate::from_ymd_opt(2026, 9, 14).unwrap();
        let _ = parse_instant(date, &raw);
    }

    /// Invariant: a dynamic rule is exactly start-plus-offset.
    #[test]
    fn dynamic_is_exact_offset(hour in 0u32..24, minute in 0u32..60, offset in 0i64..240) {
        let date = NaiveDate::from_ymd_opt(2026, 9, 14).unwrap();
        let raw = format!("{:02}:{:02}", hour, minute);

        let start = parse_instant(date, &raw).unwrap();
        let iqama = compute_iqama(date, &raw, &IqamaRule::Dynamic(offset)).unwrap();
        prop_assert_eq!(iqama, start + Duration::minutes(offset));
    }

    /// Invariant: a static rule never depends on the prayer start.
    #[test]
    fn static_ignores_start(hour in 0u32..24, minute in 0u32..60) {
        let date = NaiveDate::from_ymd_opt(2026, 9, 14).unwrap();
        let raw = format!("{:02}:{:02}", hour, minute);
        let rule = IqamaRule::Static("5:30 AM".to_string());

        let iqama = compute_iqama(date, &raw, &rule).unwrap();
        prop_assert_eq!(iqama, parse_instant(date, "5:30 AM").unwrap());
    }

    /// Invariant: 12-hour formatting round-trips through the parser at
    /// minute resolution.
    #[test]
    fn format_parse_roundtrip(hour in 0u32..24, minute in 0u32..60) {
        let date = NaiveDate::from_ymd_opt(2026, 9, 14).unwrap();
        let instant = date.and_hms_opt(hour, minute, 0).unwrap();

        let rendered = format_time(instant, true);
        prop_assert_eq!(parse_instant(date, &rendered).unwrap(), instant);
    }

    /// Invariant: a propagated override covers exactly the suffix from its
    /// date onward, minus Fridays for Dhuhr.
    #[test]
    fn propagation_covers_suffix(start_day in 1u32..=30, prayer_idx in 0usize..5) {
        let days = september();
        let prayer = Prayer::ALL[prayer_idx];
        let mut store = OverrideStore::new();

        // 10:30 PM is after every start in the fixture month.
        let from = NaiveDate::from_ymd_opt(2026, 9, start_day).unwrap();
        store.set(&days, from, prayer, "10:30 PM").unwrap();

        for n in 1..=30u32 {
            let date = NaiveDate::from_ymd_opt(2026, 9, n).unwrap();
            let skipped = prayer == Prayer::Dhuhr
                && date.weekday() == chrono::Weekday::Fri;
            let expected = n >= start_day && !skipped;
            prop_assert_eq!(store.get(date, prayer).is_some(), expected);
        }
    }

    /// Invariant: writing the same override twice is a no-op.
    #[test]
    fn propagation_idempotent(start_day in 1u32..=30, prayer_idx in 0usize..5) {
        let days = september();
        let prayer = Prayer::ALL[prayer_idx];
        let from = NaiveDate::from_ymd_opt(2026, 9, start_day).unwrap();

        let mut once = OverrideStore::new();
        once.set(&days, from, prayer, "10:30 PM").unwrap();
        let mut twice = once.clone();
        twice.set(&days, from, prayer, "10:30 PM").unwrap();

        prop_assert_eq!(once, twice);
    }
}
