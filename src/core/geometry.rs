use chrono::{DateTime, TimeDelta, Utc};

use crate::core::primitives::{datetime_to_unix_millis, delta_to_millis, validate_container_width};
use crate::core::scale::project;
use crate::error::{TimelineError, TimelineResult};

/// Width given to point markers and to items narrower than a few pixels.
pub const MIN_ITEM_WIDTH_PX: f64 = 4.0;

/// Maps a point in time to a horizontal pixel offset from the viewport start.
///
/// The result is not clamped: items before the window are negative and items
/// after it exceed `container_width_px`. Callers cull.
pub fn calculate_position(
    time: DateTime<Utc>,
    view_start: DateTime<Utc>,
    total_view_duration: TimeDelta,
    container_width_px: f64,
) -> TimelineResult<f64> {
    let span_ms = positive_span_ms(view_start, total_view_duration)?;
    let width = validate_container_width(container_width_px)?;

    let offset_ms = datetime_to_unix_millis(time) - datetime_to_unix_millis(view_start);
    Ok(project(offset_ms, span_ms, width))
}

/// Pixel width of an item, never below [`MIN_ITEM_WIDTH_PX`].
pub fn calculate_width(
    item_start: DateTime<Utc>,
    item_end: Option<DateTime<Utc>>,
    total_view_duration: TimeDelta,
    container_width_px: f64,
) -> TimelineResult<f64> {
    calculate_width_with_min(
        item_start,
        item_end,
        total_view_duration,
        container_width_px,
        MIN_ITEM_WIDTH_PX,
    )
}

/// Same as [`calculate_width`] with an explicit minimum width.
pub fn calculate_width_with_min(
    item_start: DateTime<Utc>,
    item_end: Option<DateTime<Utc>>,
    total_view_duration: TimeDelta,
    container_width_px: f64,
    min_width_px: f64,
) -> TimelineResult<f64> {
    if !min_width_px.is_finite() || min_width_px < 0.0 {
        return Err(TimelineError::InvalidData(
            "minimum item width must be finite and >= 0".to_owned(),
        ));
    }
    let span_ms = positive_span_ms(item_start, total_view_duration)?;
    let width = validate_container_width(container_width_px)?;

    let Some(item_end) = item_end else {
        return Ok(min_width_px);
    };
    let duration_ms = datetime_to_unix_millis(item_end) - datetime_to_unix_millis(item_start);
    Ok(project(duration_ms, span_ms, width).max(min_width_px))
}

fn positive_span_ms(anchor: DateTime<Utc>, duration: TimeDelta) -> TimelineResult<f64> {
    // Sub-millisecond spans would divide by zero once converted.
    if duration.num_milliseconds() <= 0 {
        return Err(TimelineError::InvalidTimeRange {
            start: anchor,
            end: anchor.checked_add_signed(duration).unwrap_or(anchor),
        });
    }
    Ok(delta_to_millis(duration))
}
