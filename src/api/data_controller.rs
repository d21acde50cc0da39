use tracing::{debug, trace};

use crate::core::{LaneLayout, TimelineItem, calculate_lanes};
use crate::error::TimelineResult;
use crate::render::Renderer;

use super::{ExportFormat, TimelineView, export_items};

impl<T, R: Renderer> TimelineView<T, R> {
    /// Replaces the record set and recomputes the lane layout.
    ///
    /// Records whose start accessor yields `None` are skipped rather than
    /// failing the whole layout. Panning and zooming never re-run this pass.
    pub fn set_items(&mut self, records: Vec<T>) {
        let mut prepared = Vec::with_capacity(records.len());
        let mut prepared_sources = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            match self.accessors.to_item(record) {
                Some(item) => {
                    prepared.push(item);
                    prepared_sources.push(index);
                }
                None => trace!(index, "skipping timeline record without start"),
            }
        }

        self.dropped_records = records.len() - prepared.len();
        self.layout = calculate_lanes(&prepared);
        self.records = records;
        self.prepared = prepared;
        self.prepared_sources = prepared_sources;
        debug!(
            records = self.records.len(),
            dropped = self.dropped_records,
            lanes = self.layout.lane_count(),
            "timeline items set"
        );
    }

    #[must_use]
    pub fn records(&self) -> &[T] {
        &self.records
    }

    /// Items that made it into layout, in record order.
    #[must_use]
    pub fn timeline_items(&self) -> &[TimelineItem] {
        &self.prepared
    }

    #[must_use]
    pub fn layout(&self) -> &LaneLayout {
        &self.layout
    }

    #[must_use]
    pub fn lane_count(&self) -> usize {
        self.layout.lane_count()
    }

    /// Number of records left out of layout because they had no start.
    #[must_use]
    pub fn dropped_record_count(&self) -> usize {
        self.dropped_records
    }

    /// Scrollable item-canvas height. At least one lane tall even when empty.
    #[must_use]
    pub fn canvas_height_px(&self) -> f64 {
        self.layout.lane_count().max(1) as f64 * self.config.lane_height_px
            + self.config.canvas_bottom_padding_px
    }

    /// Exports every laid-out item, including those outside the viewport.
    pub fn export(&self, format: ExportFormat) -> TimelineResult<String> {
        let output = export_items(&self.prepared, format)?;
        debug!(%format, items = self.prepared.len(), bytes = output.len(), "exported timeline");
        Ok(output)
    }

    pub(super) fn record_index_for_prepared(&self, prepared_index: usize) -> usize {
        self.prepared_sources[prepared_index]
    }
}
