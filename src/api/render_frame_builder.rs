use serde::Serialize;
use tracing::trace;

use crate::core::{TimeTicks, calculate_position, calculate_width_with_min, generate_time_ticks};
use crate::error::TimelineResult;
use crate::render::{
    Color, LinePrimitive, RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

use super::TimelineView;

const GRID_LINE_COLOR: Color = Color::rgba(0.55, 0.58, 0.63, 0.4);
const GRID_LABEL_COLOR: Color = Color::rgb(0.45, 0.48, 0.53);
const ITEM_FILL_COLOR: Color = Color::rgba(0.23, 0.42, 0.92, 0.2);
const ITEM_BORDER_COLOR: Color = Color::rgba(0.23, 0.42, 0.92, 0.5);
const ITEM_LABEL_COLOR: Color = Color::rgb(0.1, 0.12, 0.16);
const NOW_INDICATOR_COLOR: Color = Color::rgb(0.94, 0.27, 0.27);

const GRID_LABEL_FONT_PX: f64 = 10.0;
const GRID_LABEL_OFFSET_X_PX: f64 = 6.0;
const GRID_LABEL_OFFSET_Y_PX: f64 = 8.0;
const ITEM_LABEL_FONT_PX: f64 = 12.0;
const ITEM_LABEL_PADDING_PX: f64 = 8.0;
const ITEM_CORNER_RADIUS_PX: f64 = 6.0;
const NOW_INDICATOR_STROKE_PX: f64 = 2.0;

/// Pixel box of one visible item.
///
/// `top_px` is relative to the item canvas (below the header) when returned by
/// [`TimelineView::visible_items`], and relative to the frame when handed to an
/// item renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemGeometry {
    /// Index of the original record in the slice passed to `set_items`.
    pub source_index: usize,
    pub id: String,
    pub title: String,
    pub lane: usize,
    pub left_px: f64,
    pub width_px: f64,
    pub top_px: f64,
    pub height_px: f64,
}

impl ItemGeometry {
    #[must_use]
    pub fn right_px(&self) -> f64 {
        self.left_px + self.width_px
    }

    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left_px
            && x <= self.right_px()
            && y >= self.top_px
            && y <= self.top_px + self.height_px
    }
}

impl<T, R: Renderer> TimelineView<T, R> {
    /// Geometry for items intersecting `[0, container_width]`, in lane-layout order.
    ///
    /// Items whose `[left, left + width]` lies entirely outside the container are
    /// culled. Touching an edge still counts as visible.
    pub fn visible_items(&self) -> TimelineResult<Vec<ItemGeometry>> {
        let view_start = self.viewport.start();
        let duration = self.viewport.duration();
        let container_width = self.viewport.container_width_px();
        let item_height = self.config.item_height_px();

        let mut visible = Vec::new();
        for laned in self.layout.items() {
            let item = &laned.item;
            let left = calculate_position(item.start(), view_start, duration, container_width)?;
            let width = calculate_width_with_min(
                item.start(),
                item.end(),
                duration,
                container_width,
                self.config.min_item_width_px,
            )?;
            if left + width < 0.0 || left > container_width {
                continue;
            }

            visible.push(ItemGeometry {
                source_index: self.record_index_for_prepared(laned.source_index),
                id: item.id().to_owned(),
                title: item.title().to_owned(),
                lane: laned.lane,
                left_px: left,
                width_px: width,
                top_px: laned.lane as f64 * self.config.lane_height_px
                    + self.config.lane_top_inset_px,
                height_px: item_height,
            });
        }
        trace!(
            total = self.layout.len(),
            visible = visible.len(),
            "culled timeline items"
        );
        Ok(visible)
    }

    /// Grid ticks for the current window, recomputed on each call.
    pub fn ticks(&self) -> TimelineResult<TimeTicks> {
        generate_time_ticks(self.viewport.start(), self.viewport.end())
    }

    /// X offset of the current time when it lies strictly inside the window.
    pub fn now_indicator_px(&self) -> TimelineResult<Option<f64>> {
        if !self.config.show_now_indicator {
            return Ok(None);
        }
        let now = (self.clock)();
        if now <= self.viewport.start() || now >= self.viewport.end() {
            return Ok(None);
        }
        calculate_position(
            now,
            self.viewport.start(),
            self.viewport.duration(),
            self.viewport.container_width_px(),
        )
        .map(Some)
    }

    /// Toolbar caption such as `Jan 1 - Jan 8, 2024`.
    #[must_use]
    pub fn range_label(&self) -> String {
        format!(
            "{} - {}",
            self.viewport.start().format("%b %-d"),
            self.viewport.end().format("%b %-d, %Y")
        )
    }

    /// Hit-tests a click at canvas coordinates (`y` relative to the item canvas).
    ///
    /// The topmost visible item under the pointer wins; its original record is
    /// passed to the click handler. Returns the record index that was hit.
    pub fn click_at(&mut self, x: f64, y: f64) -> TimelineResult<Option<usize>> {
        let hit = self
            .visible_items()?
            .into_iter()
            .rev()
            .find(|geometry| geometry.contains(x, y))
            .map(|geometry| geometry.source_index);

        if let Some(index) = hit {
            trace!(index, "timeline item clicked");
            if let Some(handler) = self.on_item_click.as_mut() {
                handler(&self.records[index]);
            }
        }
        Ok(hit)
    }

    /// Materializes grid, items and overlays for the current state.
    pub fn build_frame(&self) -> TimelineResult<RenderFrame> {
        let width = self.viewport.container_width_px();
        let header = self.config.header_height_px;
        let mut frame = RenderFrame::new(width, header + self.canvas_height_px());

        for tick in self.ticks()? {
            let x = tick.position / 100.0 * width;
            frame.grid_lines.push(LinePrimitive::vertical(
                x,
                0.0,
                frame.height_px,
                1.0,
                GRID_LINE_COLOR,
            ));
            frame.grid_labels.push(TextPrimitive::new(
                tick.label,
                x + GRID_LABEL_OFFSET_X_PX,
                GRID_LABEL_OFFSET_Y_PX,
                GRID_LABEL_FONT_PX,
                GRID_LABEL_COLOR,
                TextHAlign::Left,
            ));
        }

        for mut geometry in self.visible_items()? {
            geometry.top_px += header;
            match &self.item_renderer {
                Some(render_item) => {
                    render_item(&self.records[geometry.source_index], &geometry, &mut frame);
                }
                None => push_default_item(&mut frame, &geometry),
            }
        }

        if let Some(x) = self.now_indicator_px()? {
            frame.overlay_lines.push(LinePrimitive::vertical(
                x,
                0.0,
                frame.height_px,
                NOW_INDICATOR_STROKE_PX,
                NOW_INDICATOR_COLOR,
            ));
        }

        Ok(frame)
    }

    pub fn render(&mut self) -> TimelineResult<()> {
        let frame = self.build_frame()?;
        self.renderer.render(&frame)
    }
}

fn push_default_item(frame: &mut RenderFrame, geometry: &ItemGeometry) {
    frame.push_item_rect(
        RectPrimitive::new(
            geometry.left_px,
            geometry.top_px,
            geometry.width_px,
            geometry.height_px,
            ITEM_FILL_COLOR,
        )
        .with_corner_radius(ITEM_CORNER_RADIUS_PX)
        .with_border(ITEM_BORDER_COLOR),
    );

    if geometry.title.is_empty() {
        return;
    }
    frame.push_item_label(
        TextPrimitive::new(
            geometry.title.clone(),
            geometry.left_px + ITEM_LABEL_PADDING_PX,
            geometry.top_px + geometry.height_px / 2.0,
            ITEM_LABEL_FONT_PX,
            ITEM_LABEL_COLOR,
            TextHAlign::Left,
        )
        .with_max_width((geometry.width_px - 2.0 * ITEM_LABEL_PADDING_PX).max(0.0)),
    );
}
