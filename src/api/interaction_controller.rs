use chrono::{DateTime, Utc};
use tracing::{debug, trace, warn};

use crate::core::TimeRange;
use crate::error::TimelineResult;
use crate::interaction::{
    InteractionMode, WheelAction, WheelInput, clamp_timeline_span, pan_timeline, resolve_wheel,
    zoom_timeline_with_limits,
};
use crate::render::Renderer;

use super::TimelineView;

impl<T, R: Renderer> TimelineView<T, R> {
    #[must_use]
    pub fn visible_range(&self) -> TimeRange {
        self.viewport.range()
    }

    #[must_use]
    pub fn container_width_px(&self) -> f64 {
        self.viewport.container_width_px()
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.drag.mode()
    }

    /// Shows `[start, end]`, widened or narrowed around its midpoint when the
    /// span falls outside the configured zoom limits.
    pub fn set_visible_range(
        &mut self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> TimelineResult<()> {
        self.apply_range(TimeRange::new(start, end)?, "set")
    }

    pub fn pointer_down(&mut self, x: f64) {
        self.drag.on_pointer_down(x);
        trace!(x, "drag started");
    }

    /// Pans while dragging. Returns whether the viewport moved.
    pub fn pointer_move(&mut self, x: f64) -> TimelineResult<bool> {
        match self.drag.on_pointer_move(x) {
            Some(delta_px) => self.pan_by_pixels(delta_px),
            None => Ok(false),
        }
    }

    pub fn pointer_up(&mut self) {
        self.drag.on_pointer_up();
        trace!("drag ended");
    }

    pub fn pointer_leave(&mut self) {
        self.drag.on_pointer_leave();
        trace!("drag ended by pointer leave");
    }

    /// Applies a wheel event. Works the same whether or not a drag is active.
    pub fn wheel(&mut self, input: WheelInput) -> TimelineResult<bool> {
        match resolve_wheel(
            input,
            self.config.wheel_zoom_in_factor,
            self.config.wheel_zoom_out_factor,
        ) {
            WheelAction::Zoom { factor } => self.zoom_by(factor),
            WheelAction::Pan { delta_px } => self.pan_by_pixels(delta_px),
            WheelAction::None => Ok(false),
        }
    }

    pub fn zoom_in(&mut self) -> TimelineResult<bool> {
        self.zoom_by(self.config.zoom_in_factor)
    }

    pub fn zoom_out(&mut self) -> TimelineResult<bool> {
        self.zoom_by(self.config.zoom_out_factor)
    }

    /// Midpoint zoom clamped by the configured span limits.
    pub fn zoom_by(&mut self, factor: f64) -> TimelineResult<bool> {
        let range = self.viewport.range();
        let zoomed =
            zoom_timeline_with_limits(range.start, range.end, factor, self.config.zoom_limits)?;
        self.apply_range_if_changed(zoomed, "zoom")
    }

    pub fn pan_by_pixels(&mut self, delta_px: f64) -> TimelineResult<bool> {
        let range = self.viewport.range();
        let panned = pan_timeline(
            range.start,
            range.end,
            delta_px,
            self.viewport.container_width_px(),
        )?;
        self.apply_range_if_changed(panned, "pan")
    }

    /// Restores the configured window around the current time.
    pub fn reset_view(&mut self) -> TimelineResult<()> {
        let range = self.config.reset_window.resolve((self.clock)())?;
        self.apply_range(range, "reset")
    }

    /// Records a container width to apply on the next animation frame.
    ///
    /// Bursts of resize notifications collapse into one layout pass: only the
    /// latest width survives.
    pub fn request_resize(&mut self, width_px: f64) {
        trace!(width_px, "resize requested");
        self.pending_width_px = Some(width_px);
    }

    #[must_use]
    pub fn has_pending_resize(&self) -> bool {
        self.pending_width_px.is_some()
    }

    /// Applies the pending resize, if any. Returns whether the width changed.
    ///
    /// Non-positive widths (a collapsed or hidden container) are ignored and the
    /// previous width is kept.
    pub fn on_animation_frame(&mut self) -> bool {
        let Some(width_px) = self.pending_width_px.take() else {
            return false;
        };
        if width_px == self.viewport.container_width_px() {
            return false;
        }
        match self.viewport.set_container_width(width_px) {
            Ok(()) => {
                debug!(width_px, "container resized");
                true
            }
            Err(err) => {
                warn!(error = %err, "ignoring resize to unusable width");
                false
            }
        }
    }

    fn apply_range_if_changed(&mut self, range: TimeRange, reason: &str) -> TimelineResult<bool> {
        if range == self.viewport.range() {
            return Ok(false);
        }
        self.apply_range(range, reason)?;
        Ok(true)
    }

    // Every applied window is kept inside the zoom limits, so a later zoom-in
    // can only narrow it.
    fn apply_range(&mut self, range: TimeRange, reason: &str) -> TimelineResult<()> {
        let range = clamp_timeline_span(range.start, range.end, self.config.zoom_limits)?;
        self.viewport.set_range(range)?;
        debug!(
            reason,
            start = %range.start,
            end = %range.end,
            "visible range updated"
        );
        Ok(())
    }
}
