use catalog_async_runtime::{CatalogCommand, CatalogUpdate, WorkerChannels, channels};
use catalog_core::{CatalogSession, FileStorage, Storage, check_assets};
use eframe::egui;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::Launch;
use crate::engine::{EngineEvent, PageFlipEngine};
use crate::logger::AppLogger;
use crate::views::{
    PageImage, Session, SliderState, ViewState, book, controls, overlays, sidebar, stickies,
    toolbar,
};

#[derive(Clone)]
struct ProgressState {
    operation: String,
    current: usize,
    total: usize,
}

pub struct CatalogApp {
    logger: AppLogger,

    // Async infrastructure
    channels: WorkerChannels,
    remaining_requested: bool,

    // Progress tracking
    progress: Option<ProgressState>,

    session: Option<Session>,
    startup_error: Option<String>,
    view: ViewState,

    _tokio_handle: tokio::runtime::Handle,
}

impl CatalogApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        tokio_handle: tokio::runtime::Handle,
        logger: AppLogger,
        launch: Launch,
    ) -> Self {
        let (channels, endpoints) = channels();

        // Spawn worker task
        tokio_handle.spawn(crate::worker::worker_task(endpoints));

        let mut app = Self {
            logger,
            channels,
            remaining_requested: false,
            progress: None,
            session: None,
            startup_error: None,
            view: ViewState::default(),
            _tokio_handle: tokio_handle,
        };

        match app.start_session(launch) {
            Ok(()) => {}
            Err(e) => {
                log::error!("{}", e);
                app.startup_error = Some(e.to_string());
            }
        }
        app
    }

    fn start_session(&mut self, launch: Launch) -> catalog_core::Result<()> {
        check_assets(&launch.root, &launch.options)?;

        let storage: Arc<dyn Storage> = Arc::new(FileStorage::open(&launch.state_path));
        let mut session = CatalogSession::start(
            launch.options.clone(),
            storage,
            PageFlipEngine::new(),
            SliderState::default(),
            &launch.query,
            (1280.0, 860.0),
        )?;
        session.show_guide_if_first_visit(Instant::now());
        self.view.notes_draft = session.notes().text().to_string();

        if self
            .channels
            .send(CatalogCommand::LoadCatalog {
                root: launch.root,
                options: launch.options,
            })
            .is_err()
        {
            log::error!("Image worker is not running");
        }

        self.session = Some(session);
        Ok(())
    }

    fn process_updates(&mut self, ctx: &egui::Context) {
        for update in self.channels.drain_updates() {
            match update {
                CatalogUpdate::Progress {
                    operation,
                    current,
                    total,
                } => {
                    self.progress = Some(ProgressState {
                        operation,
                        current,
                        total,
                    });
                }
                CatalogUpdate::CatalogLoaded { content_pages } => {
                    log::info!("Catalog ready: {} pages", content_pages);
                }
                CatalogUpdate::ImageLoaded {
                    index,
                    width,
                    height,
                    rgba_data,
                } => {
                    let color_image =
                        egui::ColorImage::from_rgba_unmultiplied([width, height], &rgba_data);
                    let texture = ctx.load_texture(
                        format!("page-{}", index),
                        color_image,
                        egui::TextureOptions::LINEAR,
                    );
                    self.view.images.insert(index, PageImage::Ready(texture));
                    if self
                        .progress
                        .as_ref()
                        .is_some_and(|p| p.current + 1 >= p.total)
                    {
                        self.progress = None;
                    }
                }
                CatalogUpdate::ImageFailed { index, message } => {
                    self.view.images.insert(index, PageImage::Failed(message));
                }
                CatalogUpdate::Error { message } => {
                    log::error!("{}", message);
                    self.progress = None;
                }
            }
            ctx.request_repaint();
        }
    }

    fn send(&self, command: CatalogCommand) {
        if let Err(e) = self.channels.send(command) {
            log::error!("{}", e);
        }
    }
}

/// Forward engine notifications to the session
fn dispatch_engine_events(session: &mut Session) {
    for event in session.engine_mut().take_events() {
        match event {
            EngineEvent::Turning(position) => session.handle_turning(position),
            EngineEvent::Turned(position) => {
                session.handle_turned(position);
            }
            EngineEvent::Missing(positions) => session.handle_missing(&positions),
        }
    }
}

/// Latest warning or error; must be added before the central panel
fn show_status_bar(ctx: &egui::Context, logger: &AppLogger) {
    if let Some(problem) = logger.latest_problem() {
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.weak(problem);
        });
    }
}

fn handle_keyboard(ctx: &egui::Context, session: &mut Session, now: Instant) {
    if ctx.wants_keyboard_input() {
        return;
    }
    ctx.input(|i| {
        if i.key_pressed(egui::Key::ArrowRight) {
            session.next(now);
        }
        if i.key_pressed(egui::Key::ArrowLeft) {
            session.previous(now);
        }
        if i.key_pressed(egui::Key::Escape) {
            session.set_sticky_mode(false);
            session.zoom_mut().reset();
        }
    });
}

impl eframe::App for CatalogApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_updates(ctx);

        let Some(mut session) = self.session.take() else {
            let message = self
                .startup_error
                .clone()
                .unwrap_or_else(|| "Catalog not loaded".to_string());
            overlays::show_startup_error(ctx, &message);
            return;
        };

        let now = Instant::now();

        // Window size drives the layout
        if let Some(rect) = ctx.input(|i| i.viewport().inner_rect) {
            let size = rect.size();
            if self.view.viewport != Some(size) {
                self.view.viewport = Some(size);
                session.viewport_resized(size.x, size.y, now);
            }
        }

        handle_keyboard(ctx, &mut session, now);
        session.engine_mut().tick(now);
        dispatch_engine_events(&mut session);
        session.poll(now);

        toolbar::show(ctx, &mut session, &mut self.view);
        controls::show(ctx, &mut session, &mut self.view);
        sidebar::show(ctx, &mut session, &mut self.view, &self.logger);
        show_status_bar(ctx, &self.logger);

        egui::CentralPanel::default().show(ctx, |ui| {
            let (slots, scale) = book::show(ui, &mut session, &mut self.view);
            if !session.engine().is_flipping() {
                stickies::show(ctx, &mut session, &mut self.view, &slots, scale);
            }

            if let Some(progress) = &self.progress {
                ui.label(format!(
                    "{} ({}/{})",
                    progress.operation, progress.current, progress.total
                ));
            }
        });

        overlays::show_guide(ctx, &mut session);
        overlays::show_dialogs(ctx, &mut session, &mut self.view);

        // Commands issued by this frame's input
        dispatch_engine_events(&mut session);

        for (page, note) in session.take_new_sticky_elements() {
            log::debug!("Sticky note {} shown on page {}", note.id, page);
            self.view.sticky_drafts.insert(note.id, note.text);
        }

        if let Some(indices) = session.take_preload_request() {
            self.send(CatalogCommand::PreloadPriority { indices });
            if !self.remaining_requested {
                self.remaining_requested = true;
                self.send(CatalogCommand::PreloadRemaining);
            }
        }

        if session.engine().is_flipping() {
            ctx.request_repaint();
        } else {
            // Timers: resize debounce, notes autosave, guide
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        self.session = Some(session);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Some(session) = &mut self.session {
            session.shutdown();
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, Log, Record};

    /// Height left to the central panel after the status bar
    fn central_height(logger: &AppLogger) -> f32 {
        let ctx = egui::Context::default();
        let mut height = 0.0;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            show_status_bar(ctx, logger);
            egui::CentralPanel::default().show(ctx, |ui| {
                height = ui.max_rect().height();
            });
        });
        height
    }

    #[test]
    fn test_status_bar_reserves_space_below_book() {
        let quiet = AppLogger::new(10);
        let logger = AppLogger::new(10);
        logger.log(
            &Record::builder()
                .level(Level::Warn)
                .args(format_args!("Missing pages: [9]"))
                .build(),
        );

        assert!(central_height(&logger) < central_height(&quiet));
    }
}
