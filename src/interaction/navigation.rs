use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::{
    datetime_to_unix_millis, delta_to_millis, millis_to_delta, shift_datetime,
    validate_container_width,
};
use crate::core::TimeRange;
use crate::error::{TimelineError, TimelineResult};

pub const HOUR_MS: i64 = 3_600_000;
pub const DAY_MS: i64 = 24 * HOUR_MS;

/// Bounds applied to the visible span by zoom operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoomLimits {
    pub min_span_ms: i64,
    pub max_span_ms: Option<i64>,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min_span_ms: HOUR_MS,
            max_span_ms: Some(5 * 365 * DAY_MS),
        }
    }
}

impl ZoomLimits {
    pub fn validate(self) -> TimelineResult<Self> {
        if self.min_span_ms < 1 {
            return Err(TimelineError::InvalidData(
                "zoom min span must be >= 1ms".to_owned(),
            ));
        }
        if let Some(max_span_ms) = self.max_span_ms {
            if max_span_ms < self.min_span_ms {
                return Err(TimelineError::InvalidData(
                    "zoom max span must be >= min span".to_owned(),
                ));
            }
        }
        Ok(self)
    }

    fn clamp_span_ms(self, span_ms: f64) -> f64 {
        let span_ms = span_ms.max(self.min_span_ms as f64);
        match self.max_span_ms {
            Some(max_span_ms) => span_ms.min(max_span_ms as f64),
            None => span_ms,
        }
    }
}

/// Scales the visible window around its midpoint.
///
/// `factor < 1.0` zooms in, `factor > 1.0` zooms out. Uses [`ZoomLimits::default`].
pub fn zoom_timeline(
    view_start: DateTime<Utc>,
    view_end: DateTime<Utc>,
    factor: f64,
) -> TimelineResult<TimeRange> {
    zoom_timeline_with_limits(view_start, view_end, factor, ZoomLimits::default())
}

/// Midpoint zoom with explicit span limits.
///
/// The limits clamp the new span, never the midpoint, so clamped zooms do not
/// re-center the view.
pub fn zoom_timeline_with_limits(
    view_start: DateTime<Utc>,
    view_end: DateTime<Utc>,
    factor: f64,
    limits: ZoomLimits,
) -> TimelineResult<TimeRange> {
    let range = TimeRange::new(view_start, view_end)?;
    validate_factor(factor)?;
    let limits = limits.validate()?;

    let span_ms = range.span().num_milliseconds();
    let target_ms = millis_to_delta(limits.clamp_span_ms(span_ms as f64 * factor), "zoom span")?
        .num_milliseconds();
    resize_around_midpoint(range, target_ms)
}

/// Pulls a window's span inside `limits`, keeping its midpoint.
///
/// Windows already inside the limits come back unchanged.
pub fn clamp_timeline_span(
    view_start: DateTime<Utc>,
    view_end: DateTime<Utc>,
    limits: ZoomLimits,
) -> TimelineResult<TimeRange> {
    let range = TimeRange::new(view_start, view_end)?;
    let limits = limits.validate()?;

    let span_ms = range.span().num_milliseconds();
    let target_ms = limits.clamp_span_ms(span_ms as f64) as i64;
    if target_ms == span_ms {
        return Ok(range);
    }
    resize_around_midpoint(range, target_ms)
}

fn resize_around_midpoint(range: TimeRange, target_ms: i64) -> TimelineResult<TimeRange> {
    let span_ms = range.span().num_milliseconds();
    // Integer halving keeps zoom-in followed by the inverse zoom-out exact.
    let start = shift_datetime(
        range.start,
        TimeDelta::milliseconds((span_ms - target_ms) / 2),
        "zoom start",
    )?;
    let end = shift_datetime(start, TimeDelta::milliseconds(target_ms), "zoom end")?;
    TimeRange::new(start, end)
}

/// Zooms while keeping `anchor` at the same relative position in the window.
pub fn zoom_timeline_around(
    view_start: DateTime<Utc>,
    view_end: DateTime<Utc>,
    factor: f64,
    anchor: DateTime<Utc>,
    limits: ZoomLimits,
) -> TimelineResult<TimeRange> {
    let range = TimeRange::new(view_start, view_end)?;
    validate_factor(factor)?;
    let limits = limits.validate()?;

    let span_ms = delta_to_millis(range.span());
    let target_ms = limits.clamp_span_ms(span_ms * factor);
    let left_ratio =
        (datetime_to_unix_millis(anchor) - datetime_to_unix_millis(range.start)) / span_ms;

    let start = shift_datetime(
        anchor,
        millis_to_delta(-left_ratio * target_ms, "zoom anchor offset")?,
        "zoom start",
    )?;
    let end = shift_datetime(start, millis_to_delta(target_ms, "zoom span")?, "zoom end")?;
    TimeRange::new(start, end)
}

/// Shifts the window by a pixel delta at the current scale.
///
/// The time delta is rounded to whole milliseconds and applied to both bounds,
/// so the span is preserved exactly.
pub fn pan_timeline(
    view_start: DateTime<Utc>,
    view_end: DateTime<Utc>,
    delta_pixels: f64,
    container_width_px: f64,
) -> TimelineResult<TimeRange> {
    let range = TimeRange::new(view_start, view_end)?;
    let width = validate_container_width(container_width_px)?;
    if !delta_pixels.is_finite() {
        return Err(TimelineError::InvalidData(
            "pan delta must be finite".to_owned(),
        ));
    }

    let delta = millis_to_delta(
        delta_pixels * delta_to_millis(range.span()) / width,
        "pan delta",
    )?;
    Ok(TimeRange {
        start: shift_datetime(range.start, delta, "pan start")?,
        end: shift_datetime(range.end, delta, "pan end")?,
    })
}

fn validate_factor(factor: f64) -> TimelineResult<()> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(TimelineError::InvalidData(
            "zoom factor must be finite and > 0".to_owned(),
        ));
    }
    Ok(())
}
