//! Tests for active-round resolution

use chrono::{NaiveDate, TimeZone, Utc};
use tanda_core_rs::{
    current_round, is_upcoming, next_birthday_occurrence, register_birthday_participant,
    Frequency, Participant, Pool,
};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn fixed_pool(frequency: Frequency, rounds: u32, start: NaiveDate) -> Pool {
    Pool::new("T".to_string(), 10_000, rounds, frequency, Some(start)).unwrap()
}

#[test]
fn test_pool_started_yesterday_is_in_round_one() {
    let today = ymd(2024, 5, 20);
    let pool = fixed_pool(Frequency::Weekly, 10, ymd(2024, 5, 19));
    assert_eq!(current_round(&pool, &[], today), 1);
    assert!(!is_upcoming(&pool, today));
}

#[test]
fn test_weekly_pool_started_twenty_days_ago_is_in_round_three() {
    let today = ymd(2024, 5, 21);
    let pool = fixed_pool(Frequency::Weekly, 10, ymd(2024, 5, 1));
    assert_eq!(current_round(&pool, &[], today), 3);
}

#[test]
fn test_round_boundary_day_activates_the_round() {
    let pool = fixed_pool(Frequency::Weekly, 10, ymd(2024, 5, 1));
    // Day before round 2 starts
    assert_eq!(current_round(&pool, &[], ymd(2024, 5, 7)), 1);
    // Round 2's start date itself
    assert_eq!(current_round(&pool, &[], ymd(2024, 5, 8)), 2);
}

#[test]
fn test_upcoming_pool_still_reports_round_one() {
    let pool = fixed_pool(Frequency::Monthly, 6, ymd(2024, 8, 1));
    let today = ymd(2024, 7, 1);
    assert_eq!(current_round(&pool, &[], today), 1);
    assert!(is_upcoming(&pool, today));
}

#[test]
fn test_finished_pool_clamps_to_last_round() {
    let pool = fixed_pool(Frequency::Biweekly, 5, ymd(2023, 1, 2));
    assert_eq!(current_round(&pool, &[], ymd(2024, 1, 1)), 5);
}

#[test]
fn test_next_occurrence_same_day_not_rolled() {
    let birth = ymd(1993, 8, 26);
    let today = ymd(2026, 8, 26);
    assert_eq!(next_birthday_occurrence(birth, today), today);
}

#[test]
fn test_next_occurrence_passed_rolls_to_next_year() {
    let birth = ymd(1993, 8, 25);
    let today = ymd(2026, 8, 26);
    assert_eq!(next_birthday_occurrence(birth, today), ymd(2027, 8, 25));
}

#[test]
fn test_birthday_pool_resolves_nearest_upcoming_birthday() {
    let pool = Pool::new("T".to_string(), 10_000, 4, Frequency::Birthday, None).unwrap();
    let mut participants: Vec<Participant> = Vec::new();
    let birthdays = [
        ("feb", ymd(1990, 2, 14)),
        ("may", ymd(1992, 5, 30)),
        ("sep", ymd(1988, 9, 9)),
        ("dec", ymd(1995, 12, 1)),
    ];
    for (i, (name, birth)) in birthdays.iter().enumerate() {
        register_birthday_participant(
            &pool,
            &mut participants,
            name,
            "555",
            *birth,
            Utc.timestamp_opt(i as i64, 0).unwrap(),
        )
        .unwrap();
    }

    // Mid-June: September 9 is the nearest upcoming birthday, turn 3
    assert_eq!(current_round(&pool, &participants, ymd(2024, 6, 15)), 3);
    // Mid-October: December 1, turn 4
    assert_eq!(current_round(&pool, &participants, ymd(2024, 10, 15)), 4);
    // Late December: wraps to February 14, turn 1
    assert_eq!(current_round(&pool, &participants, ymd(2024, 12, 20)), 1);
}

#[test]
fn test_birthday_pool_without_birth_dates_defaults_to_one() {
    let pool = Pool::new("T".to_string(), 10_000, 4, Frequency::Birthday, None).unwrap();
    assert_eq!(current_round(&pool, &[], ymd(2024, 6, 15)), 1);
}
