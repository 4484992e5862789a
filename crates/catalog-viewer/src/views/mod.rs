pub mod book;
pub mod controls;
pub mod overlays;
pub mod sidebar;
pub mod stickies;
pub mod toolbar;

use catalog_core::{CatalogSession, RangeSlider};
use eframe::egui;
use std::collections::HashMap;

use crate::engine::PageFlipEngine;

pub type Session = CatalogSession<PageFlipEngine, SliderState>;

/// Value shown by the position slider
#[derive(Debug, Clone, Copy, Default)]
pub struct SliderState {
    pub value: u32,
}

impl RangeSlider for SliderState {
    fn set_value(&mut self, value: u32) {
        self.value = value;
    }
}

/// Load state of one content image as far as the UI knows
pub enum PageImage {
    Ready(egui::TextureHandle),
    Failed(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SidebarTab {
    #[default]
    Thumbnails,
    Stickies,
    Notes,
    Log,
}

/// UI-only state that is not part of the session
#[derive(Default)]
pub struct ViewState {
    /// Content image index -> texture or failure
    pub images: HashMap<u32, PageImage>,
    pub jump_input: String,
    /// Modal message, e.g. an invalid page-jump number
    pub alert: Option<String>,
    /// Sticky note awaiting delete confirmation: (page, id)
    pub pending_delete: Option<(u32, String)>,
    pub sidebar_tab: SidebarTab,
    /// Edit buffers of the sticky note elements on screen, by note id
    pub sticky_drafts: HashMap<String, String>,
    pub notes_draft: String,
    /// Slider value while the handle is held
    pub slider_drag: Option<u32>,
    /// Last window size handed to the session
    pub viewport: Option<egui::Vec2>,
}

/// Palette color for a sticky note color name
pub fn sticky_color(name: &str) -> egui::Color32 {
    match name {
        "pink" => egui::Color32::from_rgb(248, 187, 208),
        "blue" => egui::Color32::from_rgb(179, 229, 252),
        "green" => egui::Color32::from_rgb(200, 230, 201),
        _ => egui::Color32::from_rgb(255, 245, 157),
    }
}
