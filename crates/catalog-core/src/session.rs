//! Viewer session: the single owner of all mutable viewer state
//!
//! UI event handlers receive `&mut CatalogSession` and call into it. After a
//! page turn settles, [`CatalogSession::handle_turned`] updates every
//! dependent surface in a fixed order:
//!
//! 1. page indicator label
//! 2. slider value (skipped while the handle is being dragged)
//! 3. URL query
//! 4. priority preload request
//! 5. sticky notes of the visible pages
//! 6. thumbnail highlight

use crate::annotations::{AnnotationStore, StickyLayer, StickyNote};
use crate::constants::{GUIDE_STORAGE_KEY, SIDEBAR_STORAGE_KEY};
use crate::layout::BookLayout;
use crate::navigation::{ControlsState, FlipEngine, NavigationController, RangeSlider, SettledView};
use crate::notes::NotesPad;
use crate::options::CatalogOptions;
use crate::preload::priority_images;
use crate::storage::Storage;
use crate::types::BookConfig;
use crate::url::{position_from_query, query_with_position};
use crate::view::{PageLabel, position_label};
use crate::zoom::ZoomState;
use crate::{CatalogError, Result};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Fails when the image directory the catalog needs is absent
pub fn check_assets(root: &Path, options: &CatalogOptions) -> Result<()> {
    let dir = root.join(&options.image_base_path);
    if !dir.is_dir() {
        return Err(CatalogError::MissingDependency {
            dependency: "catalog images".to_string(),
            hint: format!("Please check that {} exists.", dir.display()),
        });
    }
    Ok(())
}

/// Runs an action once no new trigger has arrived for `delay`
#[derive(Debug, Clone)]
pub struct TrailingDebounce<T> {
    delay: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> TrailingDebounce<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn trigger(&mut self, value: T, now: Instant) {
        self.pending = Some((now, value));
    }

    /// Take the pending value once it is due
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((at, _)) if now.saturating_duration_since(*at) >= self.delay => {
                self.pending.take().map(|(_, value)| value)
            }
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// First-visit guide overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuideState {
    Hidden,
    Visible { since: Instant },
}

pub struct CatalogSession<E: FlipEngine, S: RangeSlider> {
    options: CatalogOptions,
    storage: Arc<dyn Storage>,
    nav: NavigationController<E>,
    slider: S,
    annotations: AnnotationStore,
    sticky_layer: StickyLayer,
    zoom: ZoomState,
    notes: NotesPad,
    layout: BookLayout,
    resize: TrailingDebounce<(f32, f32, bool)>,
    label: PageLabel,
    query: String,
    preload_request: Option<Vec<u32>>,
    new_sticky_elements: Vec<(u32, StickyNote)>,
    highlighted_thumbnails: Vec<u32>,
    sticky_mode: bool,
    sidebar_open: bool,
    guide: GuideState,
    last_settled: Option<SettledView>,
}

impl<E: FlipEngine, S: RangeSlider> CatalogSession<E, S> {
    /// Validate options, lay out the book, start the engine and resume the
    /// position stored in `query`
    pub fn start(
        options: CatalogOptions,
        storage: Arc<dyn Storage>,
        engine: E,
        slider: S,
        query: &str,
        viewport: (f32, f32),
    ) -> Result<Self> {
        options.validate()?;

        let book = options.book;
        let is_mobile = options.layout.is_mobile_width(viewport.0);
        let layout = options.layout.compute(viewport.0, viewport.1, is_mobile);

        let mut nav = NavigationController::new(book, engine, options.double_tap_interval());
        nav.initialize(options.engine_config(layout.width, layout.height, layout.display_mode));

        let sidebar_open = matches!(storage.get(SIDEBAR_STORAGE_KEY), Ok(Some(ref v)) if v == "open");

        let mut session = Self {
            annotations: AnnotationStore::load(storage.clone()),
            notes: NotesPad::load(storage.clone(), options.notes_save_delay()),
            zoom: ZoomState::new(options.zoom),
            resize: TrailingDebounce::new(options.resize_debounce()),
            label: PageLabel::Cover,
            query: query.to_string(),
            preload_request: None,
            new_sticky_elements: Vec::new(),
            highlighted_thumbnails: Vec::new(),
            sticky_layer: StickyLayer::new(),
            sticky_mode: false,
            sidebar_open,
            guide: GuideState::Hidden,
            last_settled: None,
            storage,
            nav,
            slider,
            layout,
            options,
        };

        let initial = position_from_query(query, book.total_positions());
        session.nav.go_to_position(initial);
        session.label = position_label(&book, initial);
        session.slider.set_value(initial);
        session.preload_request = Some(priority_images(&book, initial, None, session.options.preload_range));

        log::info!(
            "Catalog initialized: {} content pages, {} positions, starting at {}",
            book.content_pages,
            book.total_positions(),
            initial
        );
        Ok(session)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn options(&self) -> &CatalogOptions {
        &self.options
    }

    pub fn book(&self) -> &BookConfig {
        self.nav.config()
    }

    pub fn engine(&self) -> &E {
        self.nav.engine()
    }

    pub fn engine_mut(&mut self) -> &mut E {
        self.nav.engine_mut()
    }

    pub fn slider(&self) -> &S {
        &self.slider
    }

    pub fn current_position(&self) -> u32 {
        self.nav.current_position()
    }

    pub fn controls(&self) -> ControlsState {
        self.nav.controls()
    }

    pub fn label(&self) -> PageLabel {
        self.label
    }

    /// URL query carrying the current position
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn layout(&self) -> BookLayout {
        self.layout
    }

    pub fn last_settled(&self) -> Option<&SettledView> {
        self.last_settled.as_ref()
    }

    pub fn highlighted_thumbnails(&self) -> &[u32] {
        &self.highlighted_thumbnails
    }

    pub fn annotations(&self) -> &AnnotationStore {
        &self.annotations
    }

    pub fn zoom(&self) -> &ZoomState {
        &self.zoom
    }

    pub fn zoom_mut(&mut self) -> &mut ZoomState {
        &mut self.zoom
    }

    pub fn notes(&self) -> &NotesPad {
        &self.notes
    }

    pub fn is_sticky_mode(&self) -> bool {
        self.sticky_mode
    }

    pub fn is_sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    pub fn guide(&self) -> GuideState {
        self.guide
    }

    /// Image indices the preload worker should fetch next
    pub fn take_preload_request(&mut self) -> Option<Vec<u32>> {
        self.preload_request.take()
    }

    /// Notes that need an on-screen element since the last call
    pub fn take_new_sticky_elements(&mut self) -> Vec<(u32, StickyNote)> {
        std::mem::take(&mut self.new_sticky_elements)
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    pub fn go_to_position(&mut self, pos: u32) -> bool {
        self.nav.go_to_position(pos)
    }

    pub fn next(&mut self, now: Instant) -> bool {
        self.nav.next_at(now)
    }

    pub fn previous(&mut self, now: Instant) -> bool {
        self.nav.previous_at(now)
    }

    pub fn go_to_first_content(&mut self) -> bool {
        self.nav.go_to_first_content()
    }

    pub fn go_to_last_content(&mut self) -> bool {
        self.nav.go_to_last_content()
    }

    /// Page-jump input; the error message is meant for the user
    pub fn jump_to_image_index(&mut self, idx: i64) -> Result<()> {
        self.nav.jump_to_image_index(idx)
    }

    pub fn thumbnail_clicked(&mut self, idx: u32) -> bool {
        let position = self.book().image_index_to_position(idx);
        self.nav.go_to_position(position)
    }

    pub fn handle_turning(&mut self, position: u32) {
        self.nav.handle_turning(position);
    }

    pub fn handle_missing(&self, positions: &[u32]) {
        self.nav.handle_missing(positions);
    }

    /// Commit a settled turn and update every surface, in order
    pub fn handle_turned(&mut self, position: u32) -> SettledView {
        let window = self.nav.engine().current_view();
        let settled = self.nav.handle_turned(position, window);
        let book = *self.nav.config();

        self.label = settled.info.label;

        if !self.nav.is_slider_dragging() {
            self.slider.set_value(position);
        }

        self.query = query_with_position(&self.query, position);

        self.preload_request = Some(priority_images(
            &book,
            position,
            Some(window),
            self.options.preload_range,
        ));

        for page in window.present() {
            self.render_sticky_page(page);
        }

        self.highlighted_thumbnails = window
            .present()
            .filter_map(|p| book.position_to_image_index(p))
            .collect();

        self.last_settled = Some(settled);
        settled
    }

    pub fn slider_drag_start(&mut self) {
        self.nav.begin_slider_drag();
    }

    pub fn slider_drag_move(&mut self, value: u32) {
        self.label = self.nav.slider_drag_move(value);
    }

    pub fn slider_drag_end(&mut self, value: u32) -> bool {
        self.nav.end_slider_drag(value)
    }

    // =========================================================================
    // Sticky notes
    // =========================================================================

    pub fn set_sticky_mode(&mut self, enabled: bool) {
        self.sticky_mode = enabled;
    }

    /// A click on a page. Creates a note when sticky mode is on.
    pub fn page_clicked(&mut self, page: u32, x: f32, y: f32) -> Result<Option<String>> {
        if !self.sticky_mode {
            return Ok(None);
        }
        if !self.book().is_content_position(page) {
            return Err(CatalogError::NotContentPage(page));
        }
        let id = self.annotations.add(page, x, y);
        self.render_sticky_page(page);
        Ok(Some(id))
    }

    pub fn update_sticky_text(&mut self, page: u32, id: &str, text: &str) {
        self.annotations.update_text(page, id, text);
    }

    pub fn update_sticky_color(&mut self, page: u32, id: &str, color: &str) {
        self.annotations.update_color(page, id, color);
    }

    pub fn move_sticky(&mut self, page: u32, id: &str, x: f32, y: f32) {
        self.annotations.update_position(page, id, x, y);
    }

    /// Delete after the user confirmed
    pub fn delete_sticky(&mut self, page: u32, id: &str) {
        self.annotations.delete(page, id);
        self.render_sticky_page(page);
    }

    /// Entry in the sticky list panel clicked
    pub fn sticky_list_clicked(&mut self, page: u32) -> bool {
        self.nav.go_to_position(page)
    }

    fn render_sticky_page(&mut self, page: u32) {
        let notes = self.annotations.notes_for(page);
        let created = self.sticky_layer.render_page(page, notes);
        self.new_sticky_elements
            .extend(created.into_iter().map(|note| (page, note.clone())));
    }

    // =========================================================================
    // Notes, sidebar, guide, resize
    // =========================================================================

    pub fn set_notes_text(&mut self, text: impl Into<String>, now: Instant) {
        self.notes.set_text(text, now);
    }

    pub fn set_sidebar_open(&mut self, open: bool) {
        self.sidebar_open = open;
        let value = if open { "open" } else { "closed" };
        if let Err(e) = self.storage.set(SIDEBAR_STORAGE_KEY, value) {
            log::warn!("Failed to save sidebar state: {}", e);
        }
    }

    /// Show the guide unless it was seen in an earlier session
    pub fn show_guide_if_first_visit(&mut self, now: Instant) {
        if matches!(self.storage.get(GUIDE_STORAGE_KEY), Ok(Some(_))) {
            return;
        }
        self.guide = GuideState::Visible { since: now };
    }

    pub fn dismiss_guide(&mut self) {
        if self.guide == GuideState::Hidden {
            return;
        }
        self.guide = GuideState::Hidden;
        if let Err(e) = self.storage.set(GUIDE_STORAGE_KEY, "true") {
            log::warn!("Failed to save guide flag: {}", e);
        }
    }

    pub fn viewport_resized(&mut self, width: f32, height: f32, now: Instant) {
        let is_mobile = self.options.layout.is_mobile_width(width);
        self.resize.trigger((width, height, is_mobile), now);
    }

    /// Timer tick: resize debounce, notes autosave, guide timeout
    pub fn poll(&mut self, now: Instant) {
        if let Some((width, height, is_mobile)) = self.resize.poll(now) {
            let layout = self.options.layout.compute(width, height, is_mobile);
            let mode_changed = layout.display_mode != self.layout.display_mode;
            if mode_changed {
                self.nav.engine_mut().set_display_mode(layout.display_mode);
            }
            self.nav.engine_mut().resize(layout.width, layout.height);
            self.layout = layout;

            // The engine now shows a different window around the same position
            if mode_changed {
                self.handle_turned(self.current_position());
            }
        }

        self.notes.flush_if_due(now);

        if let GuideState::Visible { since } = self.guide {
            if now.saturating_duration_since(since) >= self.options.guide_duration() {
                self.dismiss_guide();
            }
        }
    }

    /// Write anything still pending (window closing)
    pub fn shutdown(&mut self) {
        self.notes.flush();
    }
}
