use chrono::{Datelike, NaiveDate, Weekday};
use cpm_engine::calendar::{WorkCalendar, WorkCalendarConfig};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn five_day_week() -> WorkCalendar {
    WorkCalendar::custom(
        vec![
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
        ],
        Vec::new(),
    )
    .unwrap()
}

#[test]
fn default_calendar_weekends_unavailable() {
    let cal = WorkCalendar::default();
    // 2025-01-04 is a Saturday, 2025-01-05 is a Sunday
    assert!(!cal.is_available(d(2025, 1, 4)));
    assert!(!cal.is_available(d(2025, 1, 5)));
}

#[test]
fn default_calendar_weekday_available_except_holidays() {
    let cal = WorkCalendar::default();
    assert!(cal.is_available(d(2025, 1, 2)));
    // New Year's Day is in the default holiday list
    assert!(!cal.is_available(d(2025, 1, 1)));
}

#[test]
fn next_available_skips_weekend() {
    let cal = five_day_week();
    // From Friday 2025-01-03, next available is Monday 2025-01-06
    let next = cal.next_available(d(2025, 1, 3));
    assert_eq!(next.weekday(), Weekday::Mon);
    assert_eq!(next, d(2025, 1, 6));
}

#[test]
fn find_next_available_counts_only_workdays() {
    let cal = five_day_week();
    let mon = d(2025, 1, 6);
    let four_ahead = cal.find_next_available(mon, 4);
    assert_eq!(four_ahead, d(2025, 1, 10));
    assert_eq!(four_ahead.weekday(), Weekday::Fri);
}

#[test]
fn shift_available_zero_is_identity_even_on_weekend() {
    let cal = five_day_week();
    let sat = d(2025, 1, 4);
    // No snap on a zero shift
    assert_eq!(cal.shift_available(sat, 0), sat);
}

#[test]
fn shift_available_negative_recedes() {
    let cal = five_day_week();
    // Two working days back from Monday lands on Thursday
    assert_eq!(cal.shift_available(d(2025, 1, 6), -2), d(2025, 1, 2));
}

#[test]
fn shift_available_round_trips_on_working_days() {
    let cal = five_day_week();
    let wed = d(2025, 1, 8);
    let forward = cal.shift_available(wed, 7);
    assert_eq!(cal.shift_available(forward, -7), wed);
}

#[test]
fn working_days_between_is_signed() {
    let cal = five_day_week();
    let mon = d(2025, 1, 6);
    let fri = d(2025, 1, 10);
    assert_eq!(cal.working_days_between(mon, fri), 4);
    assert_eq!(cal.working_days_between(fri, mon), -4);
    assert_eq!(cal.working_days_between(mon, mon), 0);
}

#[test]
fn working_days_between_skips_holidays() {
    let mut cal = five_day_week();
    cal.add_holiday(d(2025, 1, 8));
    assert_eq!(cal.working_days_between(d(2025, 1, 6), d(2025, 1, 10)), 3);
}

#[test]
fn snap_forward_and_backward() {
    let cal = five_day_week();
    let sat = d(2025, 1, 4);
    assert_eq!(cal.snap_forward(sat), d(2025, 1, 6));
    assert_eq!(cal.snap_backward(sat), d(2025, 1, 3));
    // Working days stay put
    assert_eq!(cal.snap_forward(d(2025, 1, 6)), d(2025, 1, 6));
    assert_eq!(cal.snap_backward(d(2025, 1, 3)), d(2025, 1, 3));
}

#[test]
fn holidays_block_days() {
    let mut cal = five_day_week();
    let custom = d(2025, 2, 4);
    cal.add_holiday(custom);
    assert!(!cal.is_available(custom));
    // Shift arithmetic skips the holiday
    assert_eq!(cal.shift_available(d(2025, 2, 3), 1), d(2025, 2, 5));
}

#[test]
fn recurring_holiday_applies_to_each_year() {
    let mut cal = five_day_week();
    cal.add_recurring_holiday(12, 24, 2025, 2026);
    assert!(!cal.is_available(d(2025, 12, 24)));
    assert!(!cal.is_available(d(2026, 12, 24)));
}

#[test]
fn empty_working_mask_is_rejected() {
    assert!(WorkCalendarConfig::new(Vec::new(), Vec::new()).is_err());
    assert!(WorkCalendar::custom(Vec::new(), Vec::new()).is_err());

    let mut cal = five_day_week();
    assert!(cal.set_working_days(Vec::new()).is_err());
}

#[test]
fn config_round_trip_preserves_mask_and_holidays() {
    let holidays = vec![d(2025, 6, 19), d(2025, 7, 3)];
    let cal = WorkCalendar::custom(
        vec![
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Sat,
        ],
        holidays.clone(),
    )
    .unwrap();

    assert!(!cal.is_available(d(2025, 6, 20))); // Friday
    assert!(cal.is_available(d(2025, 6, 21))); // Saturday is working

    let config = cal.to_config();
    assert_eq!(config.holidays(), holidays.as_slice());
    let recreated = WorkCalendar::from_config(&config).unwrap();
    assert_eq!(recreated.to_config(), config);
}
