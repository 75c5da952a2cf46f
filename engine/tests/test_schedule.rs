//! Tests for the round schedule calculator

use chrono::{Datelike, NaiveDate};
use tanda_core_rs::{compute_schedule, Frequency, ValidationError};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_returns_exactly_total_rounds_windows() {
    for rounds in [1u32, 5, 12, 52] {
        let windows = compute_schedule(ymd(2024, 1, 15), rounds, Frequency::Weekly).unwrap();
        assert_eq!(windows.len(), rounds as usize);
    }
}

#[test]
fn test_round_numbers_are_one_based_and_sequential() {
    let windows = compute_schedule(ymd(2024, 1, 15), 6, Frequency::Biweekly).unwrap();
    for (i, window) in windows.iter().enumerate() {
        assert_eq!(window.round_number, i as u32 + 1);
    }
}

#[test]
fn test_start_dates_strictly_increasing() {
    for frequency in [Frequency::Weekly, Frequency::Biweekly, Frequency::Monthly] {
        let windows = compute_schedule(ymd(2024, 1, 31), 12, frequency).unwrap();
        for pair in windows.windows(2) {
            assert!(
                pair[0].start_date < pair[1].start_date,
                "{:?}: {} !< {}",
                frequency,
                pair[0].start_date,
                pair[1].start_date
            );
        }
    }
}

#[test]
fn test_due_date_is_start_plus_five_days() {
    let windows = compute_schedule(ymd(2024, 3, 10), 8, Frequency::Weekly).unwrap();
    for window in &windows {
        assert_eq!(
            window.due_date,
            window.start_date + chrono::Days::new(5),
            "round {}",
            window.round_number
        );
    }
}

#[test]
fn test_weekly_steps_seven_days() {
    let windows = compute_schedule(ymd(2024, 6, 3), 4, Frequency::Weekly).unwrap();
    assert_eq!(windows[0].start_date, ymd(2024, 6, 3));
    assert_eq!(windows[1].start_date, ymd(2024, 6, 10));
    assert_eq!(windows[2].start_date, ymd(2024, 6, 17));
    assert_eq!(windows[3].start_date, ymd(2024, 6, 24));
}

#[test]
fn test_monthly_from_jan_31_clamps_every_round() {
    // Non-leap year
    let windows = compute_schedule(ymd(2023, 1, 31), 4, Frequency::Monthly).unwrap();
    assert_eq!(windows[1].start_date, ymd(2023, 2, 28));
    assert_eq!(windows[2].start_date, ymd(2023, 3, 28));
    assert_eq!(windows[3].start_date, ymd(2023, 4, 28));

    // Leap year
    let windows = compute_schedule(ymd(2024, 1, 31), 4, Frequency::Monthly).unwrap();
    assert_eq!(windows[1].start_date, ymd(2024, 2, 29));
    assert_eq!(windows[2].start_date, ymd(2024, 3, 29));
    assert_eq!(windows[3].start_date, ymd(2024, 4, 29));
}

#[test]
fn test_monthly_mid_month_day_is_preserved() {
    let windows = compute_schedule(ymd(2024, 1, 15), 13, Frequency::Monthly).unwrap();
    assert_eq!(windows[12].start_date, ymd(2025, 1, 15));
    for window in &windows {
        assert_eq!(window.start_date.day(), 15);
    }
}

#[test]
fn test_zero_rounds_is_empty_not_error() {
    let windows = compute_schedule(ymd(2024, 1, 1), 0, Frequency::Monthly).unwrap();
    assert!(windows.is_empty());
}

#[test]
fn test_birthday_frequency_is_a_validation_error() {
    let result = compute_schedule(ymd(2024, 1, 1), 5, Frequency::Birthday);
    assert!(matches!(
        result,
        Err(ValidationError::UnsupportedFrequency { .. })
    ));
}
