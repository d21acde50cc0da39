use crate::error::TimelineResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer for tests and headless use.
///
/// Frames are still validated so invalid geometry surfaces without a real backend.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_grid_line_count: usize,
    pub last_item_count: usize,
    pub last_overlay_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> TimelineResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_grid_line_count = frame.grid_lines.len();
        self.last_item_count = frame.item_rects.len();
        self.last_overlay_count = frame.overlay_lines.len();
        Ok(())
    }
}
