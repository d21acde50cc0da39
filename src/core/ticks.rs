use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::core::scale::LinearTimeScale;
use crate::core::types::TimeRange;
use crate::error::TimelineResult;

/// Lower edge of the tick-count band the step selector aims for.
pub const MIN_TARGET_TICKS: f64 = 6.0;
/// Upper edge of the tick-count band the step selector aims for.
pub const MAX_TARGET_TICKS: f64 = 12.0;

const MINUTE_MS: i64 = 60_000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;
const WEEK_MS: i64 = 7 * DAY_MS;
// Mean Gregorian month, only used to estimate tick counts.
const AVERAGE_MONTH_MS: f64 = 30.436_875 * DAY_MS as f64;
// 1969-12-29 00:00 UTC, the Monday on or before the unix epoch.
const WEEK_ORIGIN_MS: i64 = -3 * DAY_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TickUnit {
    Minute,
    Hour,
    Day,
    Week,
    Month,
}

/// One rung of the granularity ladder, e.g. "every 6 hours".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TickStep {
    pub unit: TickUnit,
    pub count: u32,
}

/// Candidate steps ordered from finest to coarsest. Every sub-day step divides
/// a day evenly so boundaries stay aligned to midnight.
pub const TICK_STEP_LADDER: [TickStep; 17] = [
    TickStep::new(TickUnit::Minute, 10),
    TickStep::new(TickUnit::Minute, 15),
    TickStep::new(TickUnit::Minute, 30),
    TickStep::new(TickUnit::Hour, 1),
    TickStep::new(TickUnit::Hour, 2),
    TickStep::new(TickUnit::Hour, 3),
    TickStep::new(TickUnit::Hour, 6),
    TickStep::new(TickUnit::Hour, 12),
    TickStep::new(TickUnit::Day, 1),
    TickStep::new(TickUnit::Day, 2),
    TickStep::new(TickUnit::Week, 1),
    TickStep::new(TickUnit::Week, 2),
    TickStep::new(TickUnit::Month, 1),
    TickStep::new(TickUnit::Month, 2),
    TickStep::new(TickUnit::Month, 3),
    TickStep::new(TickUnit::Month, 6),
    TickStep::new(TickUnit::Month, 12),
];

impl TickStep {
    #[must_use]
    pub const fn new(unit: TickUnit, count: u32) -> Self {
        Self { unit, count }
    }

    /// Nominal step length. Months use the mean Gregorian month length.
    #[must_use]
    pub fn approx_duration_ms(self) -> f64 {
        match self.fixed_step_ms() {
            Some(step_ms) => step_ms as f64,
            None => AVERAGE_MONTH_MS * f64::from(self.count),
        }
    }

    fn fixed_step_ms(self) -> Option<i64> {
        let unit_ms = match self.unit {
            TickUnit::Minute => MINUTE_MS,
            TickUnit::Hour => HOUR_MS,
            TickUnit::Day => DAY_MS,
            TickUnit::Week => WEEK_MS,
            TickUnit::Month => return None,
        };
        Some(unit_ms * i64::from(self.count))
    }

    fn origin_ms(self) -> i64 {
        match self.unit {
            TickUnit::Week => WEEK_ORIGIN_MS,
            _ => 0,
        }
    }

    /// Index of the aligned boundary at or before `time`.
    fn index_at_or_before(self, time: DateTime<Utc>) -> i64 {
        match self.fixed_step_ms() {
            Some(step_ms) => (time.timestamp_millis() - self.origin_ms()).div_euclid(step_ms),
            None => {
                let month_index = i64::from(time.year()) * 12 + i64::from(time.month0());
                month_index.div_euclid(i64::from(self.count))
            }
        }
    }

    fn boundary(self, index: i64) -> Option<DateTime<Utc>> {
        match self.fixed_step_ms() {
            Some(step_ms) => {
                let millis = index.checked_mul(step_ms)?.checked_add(self.origin_ms())?;
                DateTime::from_timestamp_millis(millis)
            }
            None => {
                let month_index = index.checked_mul(i64::from(self.count))?;
                let year = i32::try_from(month_index.div_euclid(12)).ok()?;
                let month = u32::try_from(month_index.rem_euclid(12)).ok()? + 1;
                Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0).single()
            }
        }
    }

    /// Label for a boundary produced by this step.
    #[must_use]
    pub fn label(self, time: DateTime<Utc>) -> String {
        let pattern = match self.unit {
            TickUnit::Minute | TickUnit::Hour => "%H:%M",
            TickUnit::Day | TickUnit::Week => "%b %-d",
            TickUnit::Month if self.count >= 12 => "%Y",
            TickUnit::Month => "%b %Y",
        };
        time.format(pattern).to_string()
    }
}

/// One labeled grid line. `position` is a percentage of the visible span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeTick {
    pub position: f64,
    pub time: DateTime<Utc>,
    pub label: String,
}

/// Picks the coarsest ladder step yielding a tick count inside
/// `[MIN_TARGET_TICKS, MAX_TARGET_TICKS]`.
///
/// When no step lands in the band, the step whose count is nearest to it wins
/// (the coarser one on ties).
#[must_use]
pub fn select_tick_step(range: TimeRange) -> TickStep {
    let span_ms = range.span().num_milliseconds() as f64;

    let mut best = TICK_STEP_LADDER[0];
    let mut best_distance = f64::INFINITY;
    for step in TICK_STEP_LADDER.iter().rev().copied() {
        let count = span_ms / step.approx_duration_ms();
        if (MIN_TARGET_TICKS..=MAX_TARGET_TICKS).contains(&count) {
            return step;
        }

        let distance = if count < MIN_TARGET_TICKS {
            MIN_TARGET_TICKS - count
        } else {
            count - MAX_TARGET_TICKS
        };
        if distance < best_distance {
            best = step;
            best_distance = distance;
        }
    }
    best
}

/// Generates aligned grid ticks for the window `[view_start, view_end]`.
///
/// The returned iterator is lazy and finite. Clone it to replay the sequence.
pub fn generate_time_ticks(
    view_start: DateTime<Utc>,
    view_end: DateTime<Utc>,
) -> TimelineResult<TimeTicks> {
    let range = TimeRange::new(view_start, view_end)?;
    Ok(TimeTicks::new(range, select_tick_step(range)))
}

#[derive(Debug, Clone)]
pub struct TimeTicks {
    range: TimeRange,
    scale: LinearTimeScale,
    step: TickStep,
    next_index: i64,
    done: bool,
}

impl TimeTicks {
    #[must_use]
    pub fn new(range: TimeRange, step: TickStep) -> Self {
        Self {
            range,
            scale: LinearTimeScale::from_range(range),
            step,
            next_index: step.index_at_or_before(range.start),
            done: false,
        }
    }

    #[must_use]
    pub fn step(&self) -> TickStep {
        self.step
    }
}

impl Iterator for TimeTicks {
    type Item = TimeTick;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let Some(time) = self.step.boundary(self.next_index) else {
                self.done = true;
                break;
            };
            if time > self.range.end {
                self.done = true;
                break;
            }
            self.next_index += 1;
            if time < self.range.start {
                continue;
            }

            return Some(TimeTick {
                position: self.scale.time_to_percent(time),
                time,
                label: self.step.label(time),
            });
        }
        None
    }
}

impl std::iter::FusedIterator for TimeTicks {}
