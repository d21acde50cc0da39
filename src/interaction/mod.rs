//! Pointer/wheel interaction model and the pure zoom/pan transforms it drives.

mod navigation;

use serde::{Deserialize, Serialize};

pub use navigation::{
    DAY_MS, HOUR_MS, ZoomLimits, clamp_timeline_span, pan_timeline, zoom_timeline,
    zoom_timeline_around, zoom_timeline_with_limits,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    Dragging,
}

/// Drag-to-pan state machine.
///
/// `Idle -> Dragging` on pointer down, `Dragging -> Idle` on pointer up or
/// leave. Each move reports the delta from the previous pointer position, not
/// from the drag origin, so successive moves accumulate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    mode: InteractionMode,
    last_x: f64,
}

impl Default for DragState {
    fn default() -> Self {
        Self {
            mode: InteractionMode::Idle,
            last_x: 0.0,
        }
    }
}

impl DragState {
    #[must_use]
    pub fn mode(self) -> InteractionMode {
        self.mode
    }

    #[must_use]
    pub fn is_dragging(self) -> bool {
        self.mode == InteractionMode::Dragging
    }

    #[must_use]
    pub fn last_x(self) -> f64 {
        self.last_x
    }

    /// Starts a drag at `x`. Non-finite positions are ignored.
    pub fn on_pointer_down(&mut self, x: f64) {
        if !x.is_finite() {
            return;
        }
        self.mode = InteractionMode::Dragging;
        self.last_x = x;
    }

    /// Returns the pan delta in pixels while dragging.
    ///
    /// The delta is `last_x - x`: dragging right yields a negative delta, which
    /// moves the window back in time so content follows the pointer.
    pub fn on_pointer_move(&mut self, x: f64) -> Option<f64> {
        if self.mode != InteractionMode::Dragging || !x.is_finite() {
            return None;
        }
        let delta = self.last_x - x;
        self.last_x = x;
        Some(delta)
    }

    pub fn on_pointer_up(&mut self) {
        self.mode = InteractionMode::Idle;
    }

    pub fn on_pointer_leave(&mut self) {
        self.on_pointer_up();
    }
}

/// Raw wheel event. `modifier` is ctrl on most platforms and cmd on macOS.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelInput {
    pub delta_x: f64,
    pub delta_y: f64,
    pub modifier: bool,
}

impl WheelInput {
    #[must_use]
    pub fn scroll(delta_x: f64, delta_y: f64) -> Self {
        Self {
            delta_x,
            delta_y,
            modifier: false,
        }
    }

    #[must_use]
    pub fn zoom(delta_y: f64) -> Self {
        Self {
            delta_x: 0.0,
            delta_y,
            modifier: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WheelAction {
    Zoom { factor: f64 },
    Pan { delta_px: f64 },
    None,
}

/// Resolves a wheel event independently of drag state.
///
/// Modifier wheels always zoom: `delta_y > 0` zooms out, anything else zooms
/// in. Plain wheels pan by the combined horizontal and vertical delta.
#[must_use]
pub fn resolve_wheel(input: WheelInput, zoom_in_factor: f64, zoom_out_factor: f64) -> WheelAction {
    if !input.delta_x.is_finite() || !input.delta_y.is_finite() {
        return WheelAction::None;
    }

    if input.modifier {
        let factor = if input.delta_y > 0.0 {
            zoom_out_factor
        } else {
            zoom_in_factor
        };
        return WheelAction::Zoom { factor };
    }

    let delta_px = input.delta_x + input.delta_y;
    if delta_px == 0.0 {
        WheelAction::None
    } else {
        WheelAction::Pan { delta_px }
    }
}
