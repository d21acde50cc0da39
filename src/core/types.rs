use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::primitives::validate_container_width;
use crate::error::{TimelineError, TimelineResult};

/// One schedulable entry on the timeline.
///
/// `end` is optional: an item without an end is a point marker. An end earlier
/// than the start is discarded on construction so every stored item satisfies
/// `end >= start`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineItem {
    id: String,
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
    title: String,
}

impl TimelineItem {
    /// Creates a point item whose title defaults to its id.
    #[must_use]
    pub fn new(id: impl Into<String>, start: DateTime<Utc>) -> Self {
        let id = id.into();
        Self {
            title: id.clone(),
            id,
            start,
            end: None,
        }
    }

    #[must_use]
    pub fn with_end(mut self, end: DateTime<Utc>) -> Self {
        self.end = if end < self.start {
            trace!(id = %self.id, start = %self.start, end = %end, "end before start, treating as point item");
            None
        } else {
            Some(end)
        };
        self
    }

    #[must_use]
    pub fn with_optional_end(self, end: Option<DateTime<Utc>>) -> Self {
        match end {
            Some(end) => self.with_end(end),
            None => self,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.end
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// End used for lane occupancy. Point items end where they start.
    #[must_use]
    pub fn effective_end(&self) -> DateTime<Utc> {
        self.end.unwrap_or(self.start)
    }

    #[must_use]
    pub fn is_point(&self) -> bool {
        self.effective_end() == self.start
    }
}

/// Half-open time window `[start, end)` spanning at least one millisecond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> TimelineResult<Self> {
        Self { start, end }.validate()
    }

    pub fn validate(self) -> TimelineResult<Self> {
        if self.end <= self.start || (self.end - self.start).num_milliseconds() < 1 {
            return Err(TimelineError::InvalidTimeRange {
                start: self.start,
                end: self.end,
            });
        }
        Ok(self)
    }

    #[must_use]
    pub fn span(self) -> TimeDelta {
        self.end - self.start
    }

    #[must_use]
    pub fn contains(self, time: DateTime<Utc>) -> bool {
        time >= self.start && time < self.end
    }
}

/// Visible window plus the pixel width it is projected onto.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    range: TimeRange,
    container_width_px: f64,
}

impl Viewport {
    pub fn new(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        container_width_px: f64,
    ) -> TimelineResult<Self> {
        Ok(Self {
            range: TimeRange::new(start, end)?,
            container_width_px: validate_container_width(container_width_px)?,
        })
    }

    #[must_use]
    pub fn start(self) -> DateTime<Utc> {
        self.range.start
    }

    #[must_use]
    pub fn end(self) -> DateTime<Utc> {
        self.range.end
    }

    #[must_use]
    pub fn range(self) -> TimeRange {
        self.range
    }

    #[must_use]
    pub fn duration(self) -> TimeDelta {
        self.range.span()
    }

    #[must_use]
    pub fn container_width_px(self) -> f64 {
        self.container_width_px
    }

    pub fn set_range(&mut self, range: TimeRange) -> TimelineResult<()> {
        self.range = range.validate()?;
        Ok(())
    }

    pub fn set_container_width(&mut self, width_px: f64) -> TimelineResult<()> {
        self.container_width_px = validate_container_width(width_px)?;
        Ok(())
    }
}
