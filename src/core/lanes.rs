use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::core::types::TimelineItem;

/// A timeline item annotated with its assigned lane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanedItem {
    pub item: TimelineItem,
    pub lane: usize,
    /// Index of the item in the slice handed to [`calculate_lanes`].
    pub source_index: usize,
}

/// Result of a lane assignment pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaneLayout {
    items: Vec<LanedItem>,
    lanes_by_id: IndexMap<String, usize>,
    lane_count: usize,
}

impl LaneLayout {
    /// Laid-out items in placement order (start ascending, then id).
    #[must_use]
    pub fn items(&self) -> &[LanedItem] {
        &self.items
    }

    /// Number of lanes to draw. Never zero, so an empty layout still gets one row.
    #[must_use]
    pub fn lane_count(&self) -> usize {
        self.lane_count
    }

    #[must_use]
    pub fn lane_of(&self, id: &str) -> Option<usize> {
        self.lanes_by_id.get(id).copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl Default for LaneLayout {
    fn default() -> Self {
        calculate_lanes(&[])
    }
}

/// Assigns every item a lane so that items sharing a lane never overlap.
///
/// Greedy interval scheduling: items are visited by `(start, id)` and take the
/// lowest lane whose last occupied end is `<=` their start, opening a new lane
/// otherwise. Intervals are half-open, so an item ending at `t` and one starting
/// at `t` can share a lane, and a point item releases its lane at its own start.
#[must_use]
pub fn calculate_lanes(items: &[TimelineItem]) -> LaneLayout {
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by(|&a, &b| {
        items[a]
            .start()
            .cmp(&items[b].start())
            .then_with(|| items[a].id().cmp(items[b].id()))
    });

    let mut lane_ends: SmallVec<[DateTime<Utc>; 8]> = SmallVec::new();
    let mut laid_out = Vec::with_capacity(items.len());
    let mut lanes_by_id = IndexMap::with_capacity(items.len());

    for source_index in order {
        let item = &items[source_index];
        let lane = allocate_lane(&mut lane_ends, item.start(), item.effective_end());
        if lanes_by_id.insert(item.id().to_owned(), lane).is_some() {
            warn!(id = item.id(), "duplicate timeline item id, lane lookup keeps the last one");
        }
        laid_out.push(LanedItem {
            item: item.clone(),
            lane,
            source_index,
        });
    }

    let lane_count = lane_ends.len().max(1);
    debug!(items = laid_out.len(), lane_count, "calculated timeline lanes");

    LaneLayout {
        items: laid_out,
        lanes_by_id,
        lane_count,
    }
}

/// Largest number of items active at a single instant.
///
/// An interval is active on `[start, end)` and a point item at its own instant.
/// Greedy lane assignment never needs more lanes than this.
#[must_use]
pub fn max_concurrent_items(items: &[TimelineItem]) -> usize {
    items
        .iter()
        .map(|probe| {
            let instant = probe.start();
            items
                .iter()
                .filter(|item| {
                    if item.is_point() {
                        item.start() == instant
                    } else {
                        item.start() <= instant && instant < item.effective_end()
                    }
                })
                .count()
        })
        .max()
        .unwrap_or(0)
}

fn allocate_lane(
    lane_ends: &mut SmallVec<[DateTime<Utc>; 8]>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> usize {
    for (lane, lane_end) in lane_ends.iter_mut().enumerate() {
        if *lane_end <= start {
            *lane_end = end;
            return lane;
        }
    }
    lane_ends.push(end);
    lane_ends.len() - 1
}
