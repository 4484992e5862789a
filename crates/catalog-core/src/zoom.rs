use crate::constants::*;
use serde::{Deserialize, Serialize};

/// Allowed zoom range and the increment used by the zoom buttons
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomLimits {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min: DEFAULT_ZOOM_MIN,
            max: DEFAULT_ZOOM_MAX,
            step: DEFAULT_ZOOM_STEP,
        }
    }
}

/// Zoom level and pan offset of the book view.
///
/// Panning only applies while zoomed in; dropping back to 1.0 recenters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomState {
    limits: ZoomLimits,
    level: f32,
    pan_x: f32,
    pan_y: f32,
}

impl Default for ZoomState {
    fn default() -> Self {
        Self::new(ZoomLimits::default())
    }
}

impl ZoomState {
    pub fn new(limits: ZoomLimits) -> Self {
        Self {
            limits,
            level: 1.0_f32.clamp(limits.min, limits.max),
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn pan(&self) -> (f32, f32) {
        (self.pan_x, self.pan_y)
    }

    pub fn is_zoomed(&self) -> bool {
        self.level > 1.0
    }

    pub fn can_zoom_in(&self) -> bool {
        self.level < self.limits.max
    }

    pub fn can_zoom_out(&self) -> bool {
        self.level > self.limits.min
    }

    pub fn set_level(&mut self, level: f32) {
        self.level = level.clamp(self.limits.min, self.limits.max);
        if !self.is_zoomed() {
            self.pan_x = 0.0;
            self.pan_y = 0.0;
        }
    }

    pub fn zoom_in(&mut self) {
        self.set_level(self.level + self.limits.step);
    }

    pub fn zoom_out(&mut self) {
        self.set_level(self.level - self.limits.step);
    }

    pub fn reset(&mut self) {
        self.set_level(1.0);
        self.pan_x = 0.0;
        self.pan_y = 0.0;
    }

    /// Move the view; ignored unless zoomed in
    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        if !self.is_zoomed() {
            return;
        }
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Zoom percentage for display, e.g. "150%"
    pub fn percent_label(&self) -> String {
        format!("{}%", (self.level * 100.0).round() as i32)
    }
}
