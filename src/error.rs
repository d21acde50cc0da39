use chrono::{DateTime, Utc};
use thiserror::Error;

pub type TimelineResult<T> = Result<T, TimelineError>;

#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("invalid viewport: container width={width_px}px")]
    InvalidViewport { width_px: f64 },

    #[error("invalid time range: start={start}, end={end}")]
    InvalidTimeRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
