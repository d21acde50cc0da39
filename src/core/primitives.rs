use chrono::{DateTime, TimeDelta, Utc};

use crate::error::{TimelineError, TimelineResult};

// Largest magnitude that survives an `f64 -> i64` cast without saturating.
const MAX_EXACT_MILLIS: f64 = 9.0e18;

#[must_use]
pub fn datetime_to_unix_millis(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64
}

#[must_use]
pub fn delta_to_millis(delta: TimeDelta) -> f64 {
    delta.num_milliseconds() as f64
}

/// Rounds a floating millisecond count into a `TimeDelta`.
pub fn millis_to_delta(millis: f64, field_name: &str) -> TimelineResult<TimeDelta> {
    let rounded = rounded_millis(millis, field_name)?;
    TimeDelta::try_milliseconds(rounded).ok_or_else(|| {
        TimelineError::InvalidData(format!("{field_name} is outside the representable duration"))
    })
}

/// Rounds a floating unix-millisecond timestamp into a UTC instant.
pub fn unix_millis_to_datetime(millis: f64, field_name: &str) -> TimelineResult<DateTime<Utc>> {
    let rounded = rounded_millis(millis, field_name)?;
    DateTime::from_timestamp_millis(rounded).ok_or_else(|| {
        TimelineError::InvalidData(format!("{field_name} is outside the representable time range"))
    })
}

pub fn shift_datetime(
    time: DateTime<Utc>,
    delta: TimeDelta,
    field_name: &str,
) -> TimelineResult<DateTime<Utc>> {
    time.checked_add_signed(delta).ok_or_else(|| {
        TimelineError::InvalidData(format!("{field_name} is outside the representable time range"))
    })
}

pub fn validate_container_width(width_px: f64) -> TimelineResult<f64> {
    if !width_px.is_finite() || width_px <= 0.0 {
        return Err(TimelineError::InvalidViewport { width_px });
    }
    Ok(width_px)
}

fn rounded_millis(millis: f64, field_name: &str) -> TimelineResult<i64> {
    if !millis.is_finite() {
        return Err(TimelineError::InvalidData(format!(
            "{field_name} must be finite"
        )));
    }
    let rounded = millis.round();
    if rounded.abs() >= MAX_EXACT_MILLIS {
        return Err(TimelineError::InvalidData(format!(
            "{field_name} overflows millisecond precision"
        )));
    }
    Ok(rounded as i64)
}
