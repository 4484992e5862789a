//! Book size calculation for a given viewport
//!
//! Narrow viewports show one page at a time, wider ones a two-page spread.
//! Both fit to the available width first and fall back to the available
//! height; spreads are never scaled past the native image resolution.

use crate::constants::*;
use crate::types::DisplayMode;
use serde::{Deserialize, Serialize};

/// Page dimensions and the chrome reserved around the book
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutGeometry {
    /// Native page width in pixels
    pub page_width: f32,
    /// Native page height in pixels
    pub page_height: f32,
    /// Reserved above the book
    pub top_margin: f32,
    /// Reserved below the book
    pub bottom_margin: f32,
    /// Reserved on the left and on the right of the book
    pub side_padding: f32,
    /// Widths below this are treated as mobile
    pub mobile_breakpoint: f32,
}

impl Default for LayoutGeometry {
    fn default() -> Self {
        Self {
            page_width: DEFAULT_PAGE_WIDTH,
            page_height: DEFAULT_PAGE_HEIGHT,
            top_margin: DEFAULT_TOP_MARGIN,
            bottom_margin: DEFAULT_BOTTOM_MARGIN,
            side_padding: DEFAULT_SIDE_PADDING,
            mobile_breakpoint: DEFAULT_MOBILE_BREAKPOINT,
        }
    }
}

/// Result of a layout pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BookLayout {
    pub display_mode: DisplayMode,
    /// Width of the whole book (both pages in spread mode)
    pub width: f32,
    pub height: f32,
}

impl LayoutGeometry {
    /// Page width / page height
    pub fn page_aspect_ratio(&self) -> f32 {
        self.page_width / self.page_height
    }

    pub fn is_mobile_width(&self, viewport_width: f32) -> bool {
        viewport_width < self.mobile_breakpoint
    }

    /// Largest spread allowed: two native pages side by side
    pub fn max_spread_size(&self) -> (f32, f32) {
        (self.page_width * 2.0, self.page_height)
    }

    /// Compute the display mode and book size for a viewport
    pub fn compute(&self, viewport_width: f32, viewport_height: f32, is_mobile: bool) -> BookLayout {
        let available_width = (viewport_width - 2.0 * self.side_padding).max(0.0);
        let available_height = (viewport_height - self.top_margin - self.bottom_margin).max(0.0);
        let page_aspect = self.page_aspect_ratio();

        if is_mobile {
            let (width, height) = fit(available_width, available_height, page_aspect);
            return BookLayout {
                display_mode: DisplayMode::Single,
                width,
                height,
            };
        }

        let spread_aspect = 2.0 * page_aspect;
        let (mut width, mut height) = fit(available_width, available_height, spread_aspect);

        let (max_width, max_height) = self.max_spread_size();
        if width > max_width {
            width = max_width;
            height = width / spread_aspect;
        }
        if height > max_height {
            height = max_height;
            width = height * spread_aspect;
        }

        BookLayout {
            display_mode: DisplayMode::Double,
            width: width.floor(),
            height: height.floor(),
        }
    }
}

/// Fit a box with the given aspect ratio: width first, then height
fn fit(available_width: f32, available_height: f32, aspect: f32) -> (f32, f32) {
    let mut width = available_width;
    let mut height = width / aspect;

    if height > available_height {
        height = available_height;
        width = height * aspect;
    }

    (width.floor(), height.floor())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mobile_fits_width() {
        let geometry = LayoutGeometry::default();
        // 400 - 40 = 360 wide, 360 / 0.8 = 450 tall; 1000 - 170 = 830 available
        let layout = geometry.compute(400.0, 1000.0, true);

        assert_eq!(layout.display_mode, DisplayMode::Single);
        assert_eq!(layout.width, 360.0);
        assert_eq!(layout.height, 450.0);
    }

    #[test]
    fn test_mobile_falls_back_to_height() {
        let geometry = LayoutGeometry::default();
        // 700 - 170 = 530 available height; width-fit would need 850
        let layout = geometry.compute(720.0, 700.0, true);

        assert_eq!(layout.height, 530.0);
        assert_eq!(layout.width, 424.0);
    }

    #[test]
    fn test_desktop_clamped_to_native_size() {
        let geometry = LayoutGeometry::default();
        let layout = geometry.compute(3000.0, 2000.0, false);

        assert_eq!(layout.display_mode, DisplayMode::Double);
        assert_eq!(layout.width, 960.0);
        assert_eq!(layout.height, 600.0);
    }

    #[test]
    fn test_desktop_height_limited() {
        let geometry = LayoutGeometry::default();
        // 1200 - 40 = 1160 wide would need 725 tall; only 400 available
        let layout = geometry.compute(1200.0, 570.0, false);

        assert_eq!(layout.height, 400.0);
        assert_eq!(layout.width, 640.0);
    }

    #[test]
    fn test_tiny_viewport_does_not_go_negative() {
        let geometry = LayoutGeometry::default();
        let layout = geometry.compute(10.0, 10.0, false);

        assert_eq!(layout.width, 0.0);
        assert_eq!(layout.height, 0.0);
    }
}
