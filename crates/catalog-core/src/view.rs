//! View window classification and page labels
//!
//! Every label shown in the UI (page indicator, slider preview, thumbnail
//! captions) is derived here so the label and the view kind never disagree.

use crate::types::{BookConfig, ViewKind};
use std::fmt;

/// Positions visible at once, as reported by the flip engine.
///
/// A position of 0 means the engine rendered no page in that slot (the empty
/// side next to a closed cover).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewWindow {
    Single(u32),
    Spread(u32, u32),
}

impl ViewWindow {
    /// Build a window from an engine report; only 1 or 2 positions are valid
    pub fn from_positions(positions: &[u32]) -> Option<Self> {
        match *positions {
            [pos] => Some(ViewWindow::Single(pos)),
            [left, right] => Some(ViewWindow::Spread(left, right)),
            _ => None,
        }
    }

    pub fn positions(&self) -> Vec<u32> {
        match *self {
            ViewWindow::Single(pos) => vec![pos],
            ViewWindow::Spread(left, right) => vec![left, right],
        }
    }

    /// Positions that actually hold a page (placeholders dropped)
    pub fn present(&self) -> impl Iterator<Item = u32> {
        self.positions().into_iter().filter(|&p| p != 0)
    }
}

/// Human-readable page indicator text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLabel {
    Cover,
    BackCover,
    /// Two facing content images
    Range(u32, u32),
    /// One content image
    Single(u32),
    /// Structural position with no cover/content meaning
    Raw(u32),
}

impl fmt::Display for PageLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageLabel::Cover => write!(f, "Cover"),
            PageLabel::BackCover => write!(f, "Back cover"),
            PageLabel::Range(left, right) => write!(f, "{}-{}", left, right),
            PageLabel::Single(idx) => write!(f, "{}", idx),
            PageLabel::Raw(pos) => write!(f, "{}", pos),
        }
    }
}

/// Derived description of a view window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewInfo {
    pub kind: ViewKind,
    pub label: PageLabel,
}

/// Classify a view window and compute its label
pub fn classify_view(config: &BookConfig, window: ViewWindow) -> ViewInfo {
    ViewInfo {
        kind: view_kind(config, window),
        label: view_label(config, window),
    }
}

fn view_kind(config: &BookConfig, window: ViewWindow) -> ViewKind {
    let back_start = config.back_cover_start();

    if window.present().all(|p| p <= config.front_cover_pages) {
        ViewKind::FrontCover
    } else if window.present().all(|p| p >= back_start) {
        ViewKind::BackCover
    } else {
        ViewKind::Spread
    }
}

fn view_label(config: &BookConfig, window: ViewWindow) -> PageLabel {
    match window {
        ViewWindow::Spread(left, right) => {
            match (
                config.position_to_image_index(left),
                config.position_to_image_index(right),
            ) {
                (Some(l), Some(r)) => PageLabel::Range(l, r),
                (Some(idx), None) | (None, Some(idx)) => PageLabel::Single(idx),
                (None, None) => {
                    if left <= config.front_cover_pages && right <= config.front_cover_pages {
                        PageLabel::Cover
                    } else {
                        PageLabel::BackCover
                    }
                }
            }
        }
        ViewWindow::Single(pos) => position_label(config, pos),
    }
}

/// Label for a single position (slider previews and thumbnails)
pub fn position_label(config: &BookConfig, pos: u32) -> PageLabel {
    if let Some(idx) = config.position_to_image_index(pos) {
        PageLabel::Single(idx)
    } else if pos <= config.front_cover_pages {
        PageLabel::Cover
    } else if pos >= config.back_cover_start() {
        PageLabel::BackCover
    } else {
        PageLabel::Raw(pos)
    }
}

// =============================================================================
// Tests
// =============================================================================
