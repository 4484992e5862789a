//! In-app page-flip engine
//!
//! Lays positions out like a hard-cover book: in spread mode the front cover
//! sits alone on the right, inner pages pair up as (even, odd) and the back
//! cover sits alone on the left. Turns animate over the configured duration
//! and report back through [`EngineEvent`]s that the app forwards to the
//! session.

use catalog_core::{DisplayMode, EngineConfig, FlipEngine, ViewWindow};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// A turn started; the position it will settle on
    Turning(u32),
    /// The turn finished
    Turned(u32),
    /// Requested positions that have no page
    Missing(Vec<u32>),
}

#[derive(Debug, Clone, Copy)]
struct Flip {
    from: ViewWindow,
    target: u32,
    started: Instant,
}

pub struct PageFlipEngine {
    config: Option<EngineConfig>,
    position: u32,
    flip: Option<Flip>,
    events: Vec<EngineEvent>,
}

impl PageFlipEngine {
    pub fn new() -> Self {
        Self {
            config: None,
            position: 1,
            flip: None,
            events: Vec::new(),
        }
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.config
            .map(|c| c.display_mode)
            .unwrap_or_default()
    }

    /// Book size in points
    pub fn size(&self) -> (f32, f32) {
        self.config.map_or((0.0, 0.0), |c| (c.width, c.height))
    }

    fn page_count(&self) -> u32 {
        self.config.map_or(0, |c| c.page_count)
    }

    fn duration(&self) -> Duration {
        Duration::from_millis(self.config.map_or(0, |c| c.duration_ms))
    }

    /// Window that shows `position` in the current display mode
    pub fn window_for(&self, position: u32) -> ViewWindow {
        if self.display_mode() == DisplayMode::Single {
            return ViewWindow::Single(position);
        }
        if position <= 1 {
            return ViewWindow::Spread(0, 1);
        }
        let left = position - position % 2;
        let right = if left + 1 > self.page_count() {
            0
        } else {
            left + 1
        };
        ViewWindow::Spread(left, right)
    }

    /// Window being turned away from, with the animation progress in 0..1
    pub fn flip_progress(&self, now: Instant) -> Option<(ViewWindow, f32)> {
        let flip = self.flip?;
        let duration = self.duration().as_secs_f32();
        let elapsed = now.saturating_duration_since(flip.started).as_secs_f32();
        let t = if duration > 0.0 {
            (elapsed / duration).min(1.0)
        } else {
            1.0
        };
        Some((flip.from, t))
    }

    pub fn is_flipping(&self) -> bool {
        self.flip.is_some()
    }

    /// Settle a finished turn
    pub fn tick(&mut self, now: Instant) {
        if let Some(flip) = self.flip {
            if now.saturating_duration_since(flip.started) >= self.duration() {
                self.finish_flip();
            }
        }
    }

    pub fn take_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    fn finish_flip(&mut self) {
        if let Some(flip) = self.flip.take() {
            self.position = flip.target;
            self.events.push(EngineEvent::Turned(flip.target));
        }
    }

    fn start_flip(&mut self, target: u32) {
        // A new command completes the running turn first
        self.finish_flip();

        if self.window_for(target) == self.window_for(self.position) {
            self.position = target;
            self.events.push(EngineEvent::Turned(target));
            return;
        }

        self.events.push(EngineEvent::Turning(target));
        self.flip = Some(Flip {
            from: self.window_for(self.position),
            target,
            started: Instant::now(),
        });
    }

    fn settled_position(&self) -> u32 {
        self.flip.map_or(self.position, |f| f.target)
    }
}

impl Default for PageFlipEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FlipEngine for PageFlipEngine {
    fn initialize(&mut self, config: EngineConfig) {
        log::debug!(
            "Flip engine: {} pages, {:.0}x{:.0}, {:?}",
            config.page_count,
            config.width,
            config.height,
            config.display_mode
        );
        self.config = Some(config);
        self.position = 1;
        self.flip = None;
    }

    fn jump_to(&mut self, position: u32) {
        if position == 0 || position > self.page_count() {
            self.events.push(EngineEvent::Missing(vec![position]));
            return;
        }
        self.start_flip(position);
    }

    fn next(&mut self) {
        let window = self.window_for(self.settled_position());
        let Some(last) = window.present().last() else {
            return;
        };
        if last >= self.page_count() {
            return;
        }
        // Turns report the first page of the window they land on
        if let Some(target) = self.window_for(last + 1).present().next() {
            self.start_flip(target);
        }
    }

    fn previous(&mut self) {
        let window = self.window_for(self.settled_position());
        let Some(first) = window.present().next() else {
            return;
        };
        if first <= 1 {
            return;
        }
        if let Some(target) = self.window_for(first - 1).present().next() {
            self.start_flip(target);
        }
    }

    fn current_view(&self) -> ViewWindow {
        self.window_for(self.position)
    }

    fn resize(&mut self, width: f32, height: f32) {
        if let Some(config) = &mut self.config {
            config.width = width;
            config.height = height;
        }
    }

    fn set_display_mode(&mut self, mode: DisplayMode) {
        if let Some(config) = &mut self.config {
            config.display_mode = mode;
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(mode: DisplayMode, duration_ms: u64) -> PageFlipEngine {
        let mut engine = PageFlipEngine::new();
        engine.initialize(EngineConfig {
            width: 960.0,
            height: 600.0,
            display_mode: mode,
            page_count: 8,
            duration_ms,
        });
        engine
    }

    #[test]
    fn test_spread_layout() {
        let engine = engine(DisplayMode::Double, 0);
        assert_eq!(engine.window_for(1), ViewWindow::Spread(0, 1));
        assert_eq!(engine.window_for(2), ViewWindow::Spread(2, 3));
        assert_eq!(engine.window_for(3), ViewWindow::Spread(2, 3));
        assert_eq!(engine.window_for(7), ViewWindow::Spread(6, 7));
        assert_eq!(engine.window_for(8), ViewWindow::Spread(8, 0));
    }

    #[test]
    fn test_next_walks_spreads() {
        let mut engine = engine(DisplayMode::Double, 0);
        let mut settled = Vec::new();
        for _ in 0..6 {
            engine.next();
            engine.tick(Instant::now());
            for event in engine.take_events() {
                if let EngineEvent::Turned(pos) = event {
                    settled.push(pos);
                }
            }
        }
        assert_eq!(settled, vec![2, 4, 6, 8]);
        assert_eq!(engine.current_view(), ViewWindow::Spread(8, 0));
    }

    #[test]
    fn test_previous_from_back_cover() {
        let mut engine = engine(DisplayMode::Double, 0);
        engine.jump_to(8);
        engine.tick(Instant::now());
        engine.take_events();

        engine.previous();
        engine.tick(Instant::now());
        assert_eq!(
            engine.take_events(),
            vec![EngineEvent::Turning(6), EngineEvent::Turned(6)]
        );
    }

    #[test]
    fn test_single_mode_steps_one_position() {
        let mut engine = engine(DisplayMode::Single, 0);
        engine.next();
        engine.tick(Instant::now());
        assert_eq!(engine.current_view(), ViewWindow::Single(2));
    }

    #[test]
    fn test_turn_waits_for_animation() {
        let mut engine = engine(DisplayMode::Double, 60_000);
        engine.jump_to(5);
        assert_eq!(engine.take_events(), vec![EngineEvent::Turning(5)]);
        assert!(engine.is_flipping());

        engine.tick(Instant::now());
        assert!(engine.take_events().is_empty());
        assert_eq!(engine.current_view(), ViewWindow::Spread(0, 1));

        // A second command settles the first turn immediately
        engine.jump_to(8);
        assert_eq!(
            engine.take_events(),
            vec![EngineEvent::Turned(5), EngineEvent::Turning(8)]
        );
    }

    #[test]
    fn test_jump_within_current_spread_settles_at_once() {
        let mut engine = engine(DisplayMode::Double, 60_000);
        engine.jump_to(1);
        assert_eq!(engine.take_events(), vec![EngineEvent::Turned(1)]);
        assert!(!engine.is_flipping());
    }

    #[test]
    fn test_missing_page() {
        let mut engine = engine(DisplayMode::Double, 0);
        engine.jump_to(12);
        assert_eq!(engine.take_events(), vec![EngineEvent::Missing(vec![12])]);
    }
}
