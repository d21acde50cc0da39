//! Stateful timeline view component.
//!
//! `TimelineView` owns the viewport, drag state and pending resize, wires input
//! events into the pure functions in [`crate::core`] and [`crate::interaction`],
//! and materializes culled frames for a [`Renderer`].

mod accessors;
mod data_controller;
mod export;
mod interaction_controller;
mod render_frame_builder;
mod view_config;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::core::{LaneLayout, TimelineItem, Viewport};
use crate::error::TimelineResult;
use crate::interaction::{DragState, clamp_timeline_span};
use crate::render::{RenderFrame, Renderer};

pub use accessors::TimelineAccessors;
pub use export::{ExportFormat, export_items};
pub use render_frame_builder::ItemGeometry;
pub use view_config::{
    RelativeWindow, TimelineViewConfig, TimelineViewConfigJsonContractV1,
    VIEW_CONFIG_JSON_SCHEMA_V1,
};

/// Draws one item into the frame. Receives the original record and its
/// geometry in frame coordinates.
pub type ItemRenderer<T> = Box<dyn Fn(&T, &ItemGeometry, &mut RenderFrame)>;
/// Invoked with the original record when an item is clicked.
pub type ItemClickHandler<T> = Box<dyn FnMut(&T)>;
pub type Clock = Box<dyn Fn() -> DateTime<Utc>>;

pub struct TimelineView<T, R: Renderer> {
    renderer: R,
    config: TimelineViewConfig,
    accessors: TimelineAccessors<T>,
    records: Vec<T>,
    prepared: Vec<TimelineItem>,
    // `prepared[i]` was built from `records[prepared_sources[i]]`.
    prepared_sources: Vec<usize>,
    layout: LaneLayout,
    dropped_records: usize,
    viewport: Viewport,
    drag: DragState,
    pending_width_px: Option<f64>,
    clock: Clock,
    item_renderer: Option<ItemRenderer<T>>,
    on_item_click: Option<ItemClickHandler<T>>,
}

impl<T, R: Renderer> TimelineView<T, R> {
    pub fn new(
        renderer: R,
        accessors: TimelineAccessors<T>,
        config: TimelineViewConfig,
    ) -> TimelineResult<Self> {
        Self::with_clock(renderer, accessors, config, Box::new(Utc::now))
    }

    /// Builds a view whose notion of "now" comes from `clock`.
    pub fn with_clock(
        renderer: R,
        accessors: TimelineAccessors<T>,
        config: TimelineViewConfig,
        clock: Clock,
    ) -> TimelineResult<Self> {
        let config = config.validate()?;
        let requested = match config.initial_range {
            Some(range) => range,
            None => config.default_window.resolve(clock())?,
        };
        let range = clamp_timeline_span(requested.start, requested.end, config.zoom_limits)?;
        let viewport = Viewport::new(range.start, range.end, config.container_width_px)?;
        debug!(
            start = %viewport.start(),
            end = %viewport.end(),
            width_px = viewport.container_width_px(),
            "timeline view created"
        );

        Ok(Self {
            renderer,
            config,
            accessors,
            records: Vec::new(),
            prepared: Vec::new(),
            prepared_sources: Vec::new(),
            layout: LaneLayout::default(),
            dropped_records: 0,
            viewport,
            drag: DragState::default(),
            pending_width_px: None,
            clock,
            item_renderer: None,
            on_item_click: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> TimelineViewConfig {
        self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_item_renderer(&mut self, renderer: ItemRenderer<T>) {
        self.item_renderer = Some(renderer);
    }

    pub fn clear_item_renderer(&mut self) {
        self.item_renderer = None;
    }

    pub fn set_on_item_click(&mut self, handler: ItemClickHandler<T>) {
        self.on_item_click = Some(handler);
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
