use chrono::{DateTime, Utc};

use crate::core::primitives::{
    datetime_to_unix_millis, unix_millis_to_datetime, validate_container_width,
};
use crate::core::types::TimeRange;
use crate::error::{TimelineError, TimelineResult};

/// Linear mapping between a visible time window and a pixel axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTimeScale {
    domain_start_ms: f64,
    domain_end_ms: f64,
}

impl LinearTimeScale {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> TimelineResult<Self> {
        let range = TimeRange::new(start, end)?;
        Ok(Self::from_range(range))
    }

    #[must_use]
    pub fn from_range(range: TimeRange) -> Self {
        Self {
            domain_start_ms: datetime_to_unix_millis(range.start),
            domain_end_ms: datetime_to_unix_millis(range.end),
        }
    }

    #[must_use]
    pub fn span_ms(self) -> f64 {
        self.domain_end_ms - self.domain_start_ms
    }

    pub fn time_to_pixel(self, time: DateTime<Utc>, container_width_px: f64) -> TimelineResult<f64> {
        let width = validate_container_width(container_width_px)?;
        Ok(project(
            datetime_to_unix_millis(time) - self.domain_start_ms,
            self.span_ms(),
            width,
        ))
    }

    pub fn pixel_to_time(self, pixel: f64, container_width_px: f64) -> TimelineResult<DateTime<Utc>> {
        let width = validate_container_width(container_width_px)?;
        if !pixel.is_finite() {
            return Err(TimelineError::InvalidData("pixel must be finite".to_owned()));
        }

        let offset_ms = pixel * self.span_ms() / width;
        unix_millis_to_datetime(self.domain_start_ms + offset_ms, "pixel time")
    }

    /// Position of `time` as a percentage of the visible span (0 at start, 100 at end).
    #[must_use]
    pub fn time_to_percent(self, time: DateTime<Utc>) -> f64 {
        project(
            datetime_to_unix_millis(time) - self.domain_start_ms,
            self.span_ms(),
            100.0,
        )
    }
}

// Multiplying before dividing keeps whole-millisecond inputs exact at both edges.
pub(crate) fn project(offset_ms: f64, span_ms: f64, extent: f64) -> f64 {
    offset_ms * extent / span_ms
}
