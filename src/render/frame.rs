use crate::error::{TimelineError, TimelineResult};
use crate::render::{LinePrimitive, RectPrimitive, TextPrimitive};

/// Backend-agnostic scene for one timeline draw pass.
///
/// Primitives are grouped by role so backends can layer them: grid first, then
/// items, then overlays such as the current-time indicator.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderFrame {
    pub width_px: f64,
    pub height_px: f64,
    pub grid_lines: Vec<LinePrimitive>,
    pub grid_labels: Vec<TextPrimitive>,
    pub item_rects: Vec<RectPrimitive>,
    pub item_labels: Vec<TextPrimitive>,
    pub overlay_lines: Vec<LinePrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(width_px: f64, height_px: f64) -> Self {
        Self {
            width_px,
            height_px,
            ..Self::default()
        }
    }

    pub fn push_item_rect(&mut self, rect: RectPrimitive) {
        self.item_rects.push(rect);
    }

    pub fn push_item_label(&mut self, label: TextPrimitive) {
        self.item_labels.push(label);
    }

    pub fn validate(&self) -> TimelineResult<()> {
        if !self.width_px.is_finite() || self.width_px <= 0.0 {
            return Err(TimelineError::InvalidViewport {
                width_px: self.width_px,
            });
        }
        if !self.height_px.is_finite() || self.height_px <= 0.0 {
            return Err(TimelineError::InvalidData(
                "frame height must be finite and > 0".to_owned(),
            ));
        }

        for line in self.grid_lines.iter().chain(&self.overlay_lines) {
            line.validate()?;
        }
        for rect in &self.item_rects {
            rect.validate()?;
        }
        for text in self.grid_labels.iter().chain(&self.item_labels) {
            text.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.grid_lines.is_empty()
            && self.grid_labels.is_empty()
            && self.item_rects.is_empty()
            && self.item_labels.is_empty()
            && self.overlay_lines.is_empty()
    }
}
