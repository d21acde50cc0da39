use chrono::{DateTime, Datelike, TimeDelta, TimeZone, Timelike, Utc, Weekday};
use timeline_rs::TimelineError;
use timeline_rs::core::{
    TickStep, TickUnit, TimeRange, TimeTick, generate_time_ticks, select_tick_step,
};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .expect("valid date")
}

fn collect(start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<TimeTick> {
    generate_time_ticks(start, end).expect("ticks").collect()
}

#[test]
fn week_window_uses_daily_ticks_at_midnight() {
    let ticks = collect(at(2024, 1, 1, 0, 0), at(2024, 1, 8, 0, 0));

    assert_eq!(ticks.len(), 8);
    assert_eq!(ticks[0].label, "Jan 1");
    assert_eq!(ticks[7].label, "Jan 8");
    assert!(ticks.iter().all(|tick| tick.time.hour() == 0));
    assert!((ticks[0].position - 0.0).abs() <= 1e-9);
    assert!((ticks[7].position - 100.0).abs() <= 1e-9);
    assert!((ticks[1].position - 100.0 / 7.0).abs() <= 1e-9);
}

#[test]
fn unaligned_window_starts_at_next_natural_boundary() {
    let start = at(2024, 1, 3, 5, 17);
    let ticks = collect(start, start + TimeDelta::days(7));

    assert_eq!(ticks[0].time, at(2024, 1, 4, 0, 0));
    assert!(ticks[0].position > 0.0);
    assert!(ticks.iter().all(|tick| tick.time >= start));
}

#[test]
fn one_hour_window_uses_ten_minute_ticks() {
    let ticks = collect(at(2024, 1, 1, 10, 0), at(2024, 1, 1, 11, 0));

    assert_eq!(ticks.len(), 7);
    assert_eq!(ticks[0].label, "10:00");
    assert_eq!(ticks[1].label, "10:10");
    assert_eq!(ticks[6].label, "11:00");
}

#[test]
fn three_day_window_uses_half_day_ticks() {
    let range = TimeRange::new(at(2024, 1, 1, 0, 0), at(2024, 1, 4, 0, 0)).expect("range");
    assert_eq!(select_tick_step(range), TickStep::new(TickUnit::Hour, 12));

    let ticks = collect(range.start, range.end);
    assert_eq!(ticks.len(), 7);
    assert_eq!(ticks[1].label, "12:00");
}

#[test]
fn two_month_window_uses_weekly_ticks_on_mondays() {
    let ticks = collect(at(2024, 1, 1, 0, 0), at(2024, 3, 1, 0, 0));

    assert_eq!(ticks.len(), 9);
    assert!(ticks.iter().all(|tick| tick.time.weekday() == Weekday::Mon));
    assert_eq!(ticks[1].label, "Jan 8");
}

#[test]
fn year_window_uses_bimonthly_ticks_on_month_starts() {
    let ticks = collect(at(2024, 1, 1, 0, 0), at(2025, 1, 1, 0, 0));

    let labels: Vec<&str> = ticks.iter().map(|tick| tick.label.as_str()).collect();
    assert_eq!(
        labels,
        [
            "Jan 2024", "Mar 2024", "May 2024", "Jul 2024", "Sep 2024", "Nov 2024", "Jan 2025"
        ]
    );
    assert!(ticks.iter().all(|tick| tick.time.day() == 1));
}

#[test]
fn multi_year_window_uses_half_year_ticks() {
    let range = TimeRange::new(at(2020, 1, 1, 0, 0), at(2025, 1, 1, 0, 0)).expect("range");
    assert_eq!(select_tick_step(range), TickStep::new(TickUnit::Month, 6));

    let ticks = collect(range.start, range.end);
    assert_eq!(ticks.len(), 11);
    assert_eq!(ticks[1].time, at(2020, 7, 1, 0, 0));
}

#[test]
fn yearly_ticks_are_labeled_by_year() {
    let step = TickStep::new(TickUnit::Month, 12);
    assert_eq!(step.label(at(2031, 1, 1, 0, 0)), "2031");
}

#[test]
fn tick_sequence_is_restartable() {
    let ticks = generate_time_ticks(at(2024, 1, 1, 0, 0), at(2024, 1, 8, 0, 0)).expect("ticks");
    let replay = ticks.clone();

    let first: Vec<TimeTick> = ticks.collect();
    let second: Vec<TimeTick> = replay.collect();
    assert_eq!(first, second);
}

#[test]
fn positions_are_strictly_increasing_percentages() {
    let ticks = collect(at(2024, 2, 11, 7, 30), at(2024, 4, 2, 19, 0));

    assert!(!ticks.is_empty());
    for pair in ticks.windows(2) {
        assert!(pair[0].position < pair[1].position);
    }
    assert!(
        ticks
            .iter()
            .all(|tick| (0.0..=100.0).contains(&tick.position))
    );
}

#[test]
fn inverted_window_is_rejected() {
    let err = generate_time_ticks(at(2024, 1, 8, 0, 0), at(2024, 1, 1, 0, 0))
        .expect_err("inverted window");
    assert!(matches!(err, TimelineError::InvalidTimeRange { .. }));
}
