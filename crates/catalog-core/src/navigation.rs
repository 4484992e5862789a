//! Navigation controller
//!
//! Owns the current book position. Commands go out to the flip engine; the
//! engine's "turned" notification comes back through [`NavigationController::handle_turned`],
//! which is the only place the settled position is committed.

use crate::types::{BookConfig, DisplayMode};
use crate::view::{PageLabel, ViewInfo, ViewWindow, classify_view, position_label};
use crate::{CatalogError, Result};
use std::time::{Duration, Instant};

/// Settings handed to the flip engine at startup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub width: f32,
    pub height: f32,
    pub display_mode: DisplayMode,
    pub page_count: u32,
    pub duration_ms: u64,
}

/// The page-flip rendering engine.
///
/// Implementations own the page-turn animation and report back through the
/// controller's `handle_turning` / `handle_turned` / `handle_missing`.
pub trait FlipEngine {
    fn initialize(&mut self, config: EngineConfig);
    fn jump_to(&mut self, position: u32);
    fn next(&mut self);
    fn previous(&mut self);
    fn current_view(&self) -> ViewWindow;
    fn resize(&mut self, width: f32, height: f32);
    fn set_display_mode(&mut self, mode: DisplayMode);
}

/// The position slider widget
pub trait RangeSlider {
    fn set_value(&mut self, value: u32);
}

/// Drops calls that arrive within `interval` of the last accepted one
#[derive(Debug, Clone)]
pub struct DebounceGuard {
    interval: Duration,
    last: Option<Instant>,
}

impl DebounceGuard {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Returns true and records `now` if the call may proceed
    pub fn try_acquire(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last {
            if now.saturating_duration_since(last) < self.interval {
                return false;
            }
        }
        self.last = Some(now);
        true
    }
}

/// Enabled state of the navigation buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlsState {
    pub prev_enabled: bool,
    pub next_enabled: bool,
    pub first_content_enabled: bool,
    pub last_content_enabled: bool,
}

impl ControlsState {
    pub fn for_position(config: &BookConfig, position: u32) -> Self {
        Self {
            prev_enabled: position > 1,
            next_enabled: position < config.total_positions(),
            first_content_enabled: position > config.first_content_position(),
            last_content_enabled: position < config.last_content_position(),
        }
    }
}

/// Everything derived from one settled page turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettledView {
    pub position: u32,
    pub window: ViewWindow,
    pub info: ViewInfo,
    pub controls: ControlsState,
}

pub struct NavigationController<E: FlipEngine> {
    config: BookConfig,
    engine: E,
    current_position: u32,
    initialized: bool,
    guard: DebounceGuard,
    slider_dragging: bool,
}

impl<E: FlipEngine> NavigationController<E> {
    pub fn new(config: BookConfig, engine: E, double_tap_interval: Duration) -> Self {
        Self {
            config,
            engine,
            current_position: 1,
            initialized: false,
            guard: DebounceGuard::new(double_tap_interval),
            slider_dragging: false,
        }
    }

    /// Hand the engine its configuration; navigation is ignored until then
    pub fn initialize(&mut self, engine_config: EngineConfig) {
        self.engine.initialize(engine_config);
        self.initialized = true;
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn config(&self) -> &BookConfig {
        &self.config
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn current_position(&self) -> u32 {
        self.current_position
    }

    pub fn is_slider_dragging(&self) -> bool {
        self.slider_dragging
    }

    pub fn controls(&self) -> ControlsState {
        ControlsState::for_position(&self.config, self.current_position)
    }

    /// Ask the engine to jump. Returns false when the request was ignored.
    pub fn go_to_position(&mut self, pos: u32) -> bool {
        if !self.initialized || !self.config.contains(pos) {
            return false;
        }
        self.engine.jump_to(pos);
        true
    }

    pub fn next(&mut self) -> bool {
        self.next_at(Instant::now())
    }

    pub fn next_at(&mut self, now: Instant) -> bool {
        if !self.initialized || !self.guard.try_acquire(now) {
            return false;
        }
        self.engine.next();
        true
    }

    pub fn previous(&mut self) -> bool {
        self.previous_at(Instant::now())
    }

    pub fn previous_at(&mut self, now: Instant) -> bool {
        if !self.initialized || !self.guard.try_acquire(now) {
            return false;
        }
        self.engine.previous();
        true
    }

    pub fn go_to_first_content(&mut self) -> bool {
        self.go_to_position(self.config.first_content_position())
    }

    pub fn go_to_last_content(&mut self) -> bool {
        self.go_to_position(self.config.last_content_position())
    }

    /// Jump to a content image by its 1-based index (page-jump input)
    pub fn jump_to_image_index(&mut self, idx: i64) -> Result<()> {
        let max = self.config.content_pages;
        if idx < 1 || idx > i64::from(max) {
            return Err(CatalogError::PageOutOfRange {
                requested: idx,
                max,
            });
        }
        let position = self.config.image_index_to_position(idx as u32);
        self.go_to_position(position);
        Ok(())
    }

    /// Mid-animation notification: the position being settled into
    pub fn handle_turning(&mut self, position: u32) {
        self.current_position = position;
    }

    /// Animation complete: commit the position and derive the view
    pub fn handle_turned(&mut self, position: u32, window: ViewWindow) -> SettledView {
        self.current_position = position;
        SettledView {
            position,
            window,
            info: classify_view(&self.config, window),
            controls: self.controls(),
        }
    }

    /// The engine had no page element for some requested positions
    pub fn handle_missing(&self, positions: &[u32]) {
        log::warn!("Missing pages: {:?}", positions);
    }

    pub fn begin_slider_drag(&mut self) {
        self.slider_dragging = true;
    }

    /// Label preview while the slider handle moves; does not navigate
    pub fn slider_drag_move(&self, value: u32) -> PageLabel {
        position_label(&self.config, value)
    }

    pub fn end_slider_drag(&mut self, value: u32) -> bool {
        self.slider_dragging = false;
        self.go_to_position(value)
    }
}
