// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DayKind, HolidaySet, add_months, day_kind, days_in_month, enumerate_dates, format_iso_date,
    is_leap_year, is_leap_year_simplified, is_public_holiday, is_weekend, months_of_year,
    parse_iso_date, span_length,
};
use time::Date;
use time::Month;
use time::macros::date;

#[test]
fn test_gregorian_leap_years() {
    assert!(is_leap_year(2024));
    assert!(is_leap_year(2000));
    assert!(!is_leap_year(2025));
    assert!(!is_leap_year(1900));
    assert!(!is_leap_year(2100));
}

#[test]
fn test_simplified_leap_rule_disagrees_on_century_years() {
    assert!(is_leap_year_simplified(2100));
    assert!(!is_leap_year(2100));

    // Both rules agree outside century years
    for year in 2001..2099 {
        assert_eq!(is_leap_year(year), is_leap_year_simplified(year), "{year}");
    }
}

#[test]
fn test_days_in_month() {
    assert_eq!(days_in_month(2024, Month::February), 29);
    assert_eq!(days_in_month(2025, Month::February), 28);
    assert_eq!(days_in_month(2100, Month::February), 28);
    assert_eq!(days_in_month(2025, Month::April), 30);
    assert_eq!(days_in_month(2025, Month::December), 31);
}

#[test]
fn test_months_of_year_total_days() {
    let total_2024: u32 = months_of_year(2024).iter().map(|m| u32::from(m.days)).sum();
    let total_2025: u32 = months_of_year(2025).iter().map(|m| u32::from(m.days)).sum();

    assert_eq!(total_2024, 366);
    assert_eq!(total_2025, 365);
    assert_eq!(months_of_year(2025)[0].month, Month::January);
    assert_eq!(months_of_year(2025)[11].month, Month::December);
}

#[test]
fn test_enumerate_dates_inclusive() {
    let dates: Vec<Date> = enumerate_dates(date!(2026 - 03 - 05), date!(2026 - 03 - 10)).collect();

    assert_eq!(dates.len(), 6);
    assert_eq!(dates.first(), Some(&date!(2026 - 03 - 05)));
    assert_eq!(dates.last(), Some(&date!(2026 - 03 - 10)));
}

#[test]
fn test_enumerate_dates_reversed_input_is_ascending() {
    let forward: Vec<Date> = enumerate_dates(date!(2026 - 03 - 05), date!(2026 - 03 - 10)).collect();
    let backward: Vec<Date> =
        enumerate_dates(date!(2026 - 03 - 10), date!(2026 - 03 - 05)).collect();

    assert_eq!(forward, backward);
}

#[test]
fn test_enumerate_dates_single_day_and_month_boundary() {
    let single: Vec<Date> = enumerate_dates(date!(2024 - 02 - 29), date!(2024 - 02 - 29)).collect();
    assert_eq!(single, vec![date!(2024 - 02 - 29)]);

    let crossing: Vec<Date> =
        enumerate_dates(date!(2024 - 02 - 28), date!(2024 - 03 - 01)).collect();
    assert_eq!(
        crossing,
        vec![date!(2024 - 02 - 28), date!(2024 - 02 - 29), date!(2024 - 03 - 01)]
    );
}

#[test]
fn test_enumerate_dates_is_restartable() {
    let span = enumerate_dates(date!(2026 - 01 - 01), date!(2026 - 01 - 31));
    assert_eq!(span.clone().count(), 31);
    assert_eq!(span.count(), 31);
}

#[test]
fn test_span_length_order_independent() {
    assert_eq!(span_length(date!(2026 - 03 - 10), date!(2026 - 03 - 05)), 6);
    assert_eq!(span_length(date!(2026 - 03 - 05), date!(2026 - 03 - 10)), 6);
    assert_eq!(span_length(date!(2026 - 03 - 05), date!(2026 - 03 - 05)), 1);
}

#[test]
fn test_is_weekend() {
    // 2026-03-07 is a Saturday
    assert!(is_weekend(date!(2026 - 03 - 07)));
    assert!(is_weekend(date!(2026 - 03 - 08)));
    assert!(!is_weekend(date!(2026 - 03 - 09)));
}

#[test]
fn test_public_holiday_membership() {
    let holidays: HolidaySet =
        HolidaySet::from_iso_strings(["2025-01-01", "2025-05-09", "2025-05-09"]).unwrap();

    assert_eq!(holidays.len(), 2);
    assert!(is_public_holiday(date!(2025 - 05 - 09), &holidays));
    assert!(!is_public_holiday(date!(2026 - 05 - 09), &holidays));
}

#[test]
fn test_holiday_set_rejects_bad_dates() {
    assert!(HolidaySet::from_iso_strings(["2025-02-30"]).is_err());
}

#[test]
fn test_day_kind_holiday_wins_over_weekend() {
    // 2025-03-08 is a Saturday and a public holiday
    let holidays: HolidaySet = HolidaySet::from_iso_strings(["2025-03-08"]).unwrap();

    assert_eq!(day_kind(date!(2025 - 03 - 08), &holidays), DayKind::Holiday);
    assert_eq!(day_kind(date!(2025 - 03 - 09), &holidays), DayKind::Weekend);
    assert_eq!(day_kind(date!(2025 - 03 - 10), &holidays), DayKind::Weekday);
}

#[test]
fn test_add_months_clamps_to_month_end() {
    assert_eq!(add_months(date!(2025 - 05 - 15), 6).unwrap(), date!(2025 - 11 - 15));
    assert_eq!(add_months(date!(2025 - 08 - 31), 6).unwrap(), date!(2026 - 02 - 28));
    assert_eq!(add_months(date!(2023 - 08 - 31), 6).unwrap(), date!(2024 - 02 - 29));
    assert_eq!(add_months(date!(2025 - 12 - 01), 0).unwrap(), date!(2025 - 12 - 01));
}

#[test]
fn test_iso_round_trip() {
    let parsed: Date = parse_iso_date("2026-03-05").unwrap();
    assert_eq!(parsed, date!(2026 - 03 - 05));
    assert_eq!(format_iso_date(parsed), "2026-03-05");
    assert!(parse_iso_date("not-a-date").is_err());
}
