use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::core::TimeRange;
use crate::core::primitives::{shift_datetime, validate_container_width};
use crate::error::{TimelineError, TimelineResult};
use crate::interaction::{DAY_MS, ZoomLimits};

pub const VIEW_CONFIG_JSON_SCHEMA_V1: u32 = 1;

/// Window expressed relative to "now": `[now - before, now + after]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelativeWindow {
    pub before_ms: i64,
    pub after_ms: i64,
}

impl RelativeWindow {
    #[must_use]
    pub const fn days(before: i64, after: i64) -> Self {
        Self {
            before_ms: before * DAY_MS,
            after_ms: after * DAY_MS,
        }
    }

    pub fn resolve(self, now: DateTime<Utc>) -> TimelineResult<TimeRange> {
        let before = TimeDelta::try_milliseconds(self.before_ms).ok_or_else(|| {
            TimelineError::InvalidData("relative window `before_ms` is out of range".to_owned())
        })?;
        let after = TimeDelta::try_milliseconds(self.after_ms).ok_or_else(|| {
            TimelineError::InvalidData("relative window `after_ms` is out of range".to_owned())
        })?;
        TimeRange::new(
            shift_datetime(now, -before, "relative window start")?,
            shift_datetime(now, after, "relative window end")?,
        )
    }

    fn validate(self, name: &str) -> TimelineResult<Self> {
        match self.before_ms.checked_add(self.after_ms) {
            Some(span) if span >= 1 => Ok(self),
            _ => Err(TimelineError::InvalidData(format!(
                "`{name}` must span at least 1ms"
            ))),
        }
    }
}

/// Layout and navigation settings for [`TimelineView`](super::TimelineView).
///
/// Serializable so hosts can persist view setup. Missing fields fall back to
/// [`Default`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineViewConfig {
    pub container_width_px: f64,
    pub lane_height_px: f64,
    pub header_height_px: f64,
    pub lane_top_inset_px: f64,
    pub lane_gap_px: f64,
    pub canvas_bottom_padding_px: f64,
    pub min_item_width_px: f64,
    pub zoom_in_factor: f64,
    pub zoom_out_factor: f64,
    pub wheel_zoom_in_factor: f64,
    pub wheel_zoom_out_factor: f64,
    pub zoom_limits: ZoomLimits,
    /// Initial window when no explicit `initial_range` is given.
    pub default_window: RelativeWindow,
    /// Window restored by [`reset_view`](super::TimelineView::reset_view).
    pub reset_window: RelativeWindow,
    pub initial_range: Option<TimeRange>,
    pub show_now_indicator: bool,
}

impl Default for TimelineViewConfig {
    fn default() -> Self {
        Self {
            container_width_px: 1000.0,
            lane_height_px: 40.0,
            header_height_px: 40.0,
            lane_top_inset_px: 10.0,
            lane_gap_px: 8.0,
            canvas_bottom_padding_px: 100.0,
            min_item_width_px: crate::core::MIN_ITEM_WIDTH_PX,
            zoom_in_factor: 0.8,
            zoom_out_factor: 1.25,
            wheel_zoom_in_factor: 0.95,
            wheel_zoom_out_factor: 1.05,
            zoom_limits: ZoomLimits::default(),
            default_window: RelativeWindow::days(7, 7),
            reset_window: RelativeWindow::days(3, 10),
            initial_range: None,
            show_now_indicator: true,
        }
    }
}

impl TimelineViewConfig {
    #[must_use]
    pub fn new(container_width_px: f64) -> Self {
        Self {
            container_width_px,
            ..Self::default()
        }
    }

    /// Sets explicit initial viewport bounds.
    #[must_use]
    pub fn with_initial_range(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.initial_range = Some(TimeRange { start, end });
        self
    }

    #[must_use]
    pub fn with_lane_height(mut self, lane_height_px: f64) -> Self {
        self.lane_height_px = lane_height_px;
        self
    }

    #[must_use]
    pub fn with_min_item_width(mut self, min_item_width_px: f64) -> Self {
        self.min_item_width_px = min_item_width_px;
        self
    }

    #[must_use]
    pub fn with_zoom_limits(mut self, zoom_limits: ZoomLimits) -> Self {
        self.zoom_limits = zoom_limits;
        self
    }

    #[must_use]
    pub fn with_reset_window(mut self, reset_window: RelativeWindow) -> Self {
        self.reset_window = reset_window;
        self
    }

    #[must_use]
    pub fn with_now_indicator(mut self, show: bool) -> Self {
        self.show_now_indicator = show;
        self
    }

    pub fn validate(self) -> TimelineResult<Self> {
        validate_container_width(self.container_width_px)?;

        for (value, name) in [
            (self.lane_height_px, "lane_height_px"),
            (self.zoom_in_factor, "zoom_in_factor"),
            (self.zoom_out_factor, "zoom_out_factor"),
            (self.wheel_zoom_in_factor, "wheel_zoom_in_factor"),
            (self.wheel_zoom_out_factor, "wheel_zoom_out_factor"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(TimelineError::InvalidData(format!(
                    "view config `{name}` must be finite and > 0"
                )));
            }
        }
        for (value, name) in [
            (self.header_height_px, "header_height_px"),
            (self.lane_top_inset_px, "lane_top_inset_px"),
            (self.lane_gap_px, "lane_gap_px"),
            (self.canvas_bottom_padding_px, "canvas_bottom_padding_px"),
            (self.min_item_width_px, "min_item_width_px"),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(TimelineError::InvalidData(format!(
                    "view config `{name}` must be finite and >= 0"
                )));
            }
        }
        if self.lane_gap_px >= self.lane_height_px {
            return Err(TimelineError::InvalidData(
                "view config `lane_gap_px` must be smaller than `lane_height_px`".to_owned(),
            ));
        }

        self.zoom_limits.validate()?;
        self.default_window.validate("default_window")?;
        self.reset_window.validate("reset_window")?;
        if let Some(range) = self.initial_range {
            range.validate()?;
        }
        Ok(self)
    }

    /// Height of an item box inside its lane.
    #[must_use]
    pub fn item_height_px(self) -> f64 {
        self.lane_height_px - self.lane_gap_px
    }

    pub fn to_json_pretty(self) -> TimelineResult<String> {
        serde_json::to_string_pretty(&self).map_err(|e| {
            TimelineError::InvalidData(format!("failed to serialize view config: {e}"))
        })
    }

    pub fn to_json_contract_v1_pretty(self) -> TimelineResult<String> {
        let payload = TimelineViewConfigJsonContractV1 {
            schema_version: VIEW_CONFIG_JSON_SCHEMA_V1,
            config: self,
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            TimelineError::InvalidData(format!("failed to serialize view config contract v1: {e}"))
        })
    }

    /// Parses either a bare config object or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> TimelineResult<Self> {
        let value: serde_json::Value = serde_json::from_str(input).map_err(|e| {
            TimelineError::InvalidData(format!("failed to parse view config json: {e}"))
        })?;

        let config = if value.get("schema_version").is_some() {
            let payload: TimelineViewConfigJsonContractV1 = serde_json::from_value(value)
                .map_err(|e| {
                    TimelineError::InvalidData(format!(
                        "failed to parse view config contract payload: {e}"
                    ))
                })?;
            if payload.schema_version != VIEW_CONFIG_JSON_SCHEMA_V1 {
                return Err(TimelineError::InvalidData(format!(
                    "unsupported view config schema version: {}",
                    payload.schema_version
                )));
            }
            payload.config
        } else {
            serde_json::from_value(value).map_err(|e| {
                TimelineError::InvalidData(format!("failed to parse view config json: {e}"))
            })?
        };
        config.validate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineViewConfigJsonContractV1 {
    pub schema_version: u32,
    pub config: TimelineViewConfig,
}
