pub mod geometry;
pub mod lanes;
pub mod primitives;
pub mod scale;
pub mod ticks;
pub mod types;

pub use geometry::{MIN_ITEM_WIDTH_PX, calculate_position, calculate_width, calculate_width_with_min};
pub use lanes::{LaneLayout, LanedItem, calculate_lanes, max_concurrent_items};
pub use scale::LinearTimeScale;
pub use ticks::{
    MAX_TARGET_TICKS, MIN_TARGET_TICKS, TICK_STEP_LADDER, TickStep, TickUnit, TimeTick, TimeTicks,
    generate_time_ticks, select_tick_step,
};
pub use types::{TimeRange, TimelineItem, Viewport};
