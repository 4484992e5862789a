use catalog_core::{BookConfig, CatalogError, CoverContent, FlipEngine, ViewWindow};
use eframe::egui;
use std::time::Instant;

use super::{PageImage, Session, ViewState};

const COVER_OUTER: egui::Color32 = egui::Color32::from_rgb(31, 45, 72);
const COVER_INNER: egui::Color32 = egui::Color32::from_rgb(240, 236, 228);
const PAGE_PAPER: egui::Color32 = egui::Color32::from_rgb(252, 252, 250);

/// Where one position was drawn this frame
#[derive(Debug, Clone, Copy)]
pub struct PageSlot {
    pub position: u32,
    pub rect: egui::Rect,
}

/// Draw the book and handle page clicks. Returns the drawn slots and the
/// points-per-pixel scale of the pages.
pub fn show(ui: &mut egui::Ui, session: &mut Session, view: &mut ViewState) -> (Vec<PageSlot>, f32) {
    let now = Instant::now();
    let (width, height) = session.engine().size();
    let (area, response) =
        ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());

    if width <= 0.0 || height <= 0.0 {
        return (Vec::new(), 1.0);
    }

    let zoom = *session.zoom();
    let fit = (area.width() / width).min(area.height() / height).min(1.0);
    let scale = fit.max(0.0) * zoom.level();
    let (pan_x, pan_y) = zoom.pan();
    let book_rect = egui::Rect::from_center_size(
        area.center() + egui::vec2(pan_x, pan_y),
        egui::vec2(width, height) * scale,
    );

    let window = session.engine().current_view();
    let slots = layout_slots(window, book_rect);
    let painter = ui.painter_at(area);
    let config = *session.book();

    for slot in &slots {
        draw_page(&painter, slot, &config, view, scale);
    }

    if let Some((_, t)) = session.engine().flip_progress(now) {
        draw_turning_sheet(&painter, book_rect, window, t);
        ui.ctx().request_repaint();
    }

    if response.dragged() && zoom.is_zoomed() {
        let delta = response.drag_delta();
        session.zoom_mut().pan_by(delta.x, delta.y);
    }

    if response.clicked() {
        if let Some(pointer) = response.interact_pointer_pos() {
            handle_click(session, view, &slots, book_rect, pointer, scale, now);
        }
    }

    (slots, scale)
}

fn layout_slots(window: ViewWindow, book_rect: egui::Rect) -> Vec<PageSlot> {
    match window {
        ViewWindow::Single(position) => vec![PageSlot {
            position,
            rect: book_rect,
        }],
        ViewWindow::Spread(left, right) => {
            let (left_rect, right_rect) = book_rect.split_left_right_at_fraction(0.5);
            vec![
                PageSlot {
                    position: left,
                    rect: left_rect,
                },
                PageSlot {
                    position: right,
                    rect: right_rect,
                },
            ]
        }
    }
}

fn handle_click(
    session: &mut Session,
    view: &mut ViewState,
    slots: &[PageSlot],
    book_rect: egui::Rect,
    pointer: egui::Pos2,
    scale: f32,
    now: Instant,
) {
    if !session.is_sticky_mode() {
        // Clicking a page edge turns the page
        if pointer.x >= book_rect.center().x {
            session.next(now);
        } else {
            session.previous(now);
        }
        return;
    }

    let Some(slot) = slots
        .iter()
        .find(|slot| slot.position != 0 && slot.rect.contains(pointer))
    else {
        return;
    };

    let local = (pointer - slot.rect.min) / scale;
    match session.page_clicked(slot.position, local.x, local.y) {
        Ok(Some(id)) => log::info!("Added sticky note {} on page {}", id, slot.position),
        Ok(None) => {}
        Err(CatalogError::NotContentPage(_)) => {
            view.alert = Some("Sticky notes can only be placed on catalog pages.".to_string());
        }
        Err(e) => view.alert = Some(e.to_string()),
    }
}

fn draw_page(
    painter: &egui::Painter,
    slot: &PageSlot,
    config: &BookConfig,
    view: &ViewState,
    scale: f32,
) {
    if slot.position == 0 {
        return;
    }
    let rect = slot.rect;

    if let Some(content) = config.cover_content(slot.position) {
        draw_cover(painter, rect, content, scale);
        return;
    }

    let Some(idx) = config.position_to_image_index(slot.position) else {
        return;
    };

    painter.rect_filled(rect, 0.0, PAGE_PAPER);
    match view.images.get(&idx) {
        Some(PageImage::Ready(texture)) => {
            painter.image(
                texture.id(),
                rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }
        Some(PageImage::Failed(message)) => {
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "⚠ Image unavailable",
                egui::FontId::proportional(18.0),
                egui::Color32::DARK_RED,
            );
            painter.text(
                rect.center() + egui::vec2(0.0, 24.0),
                egui::Align2::CENTER_CENTER,
                message,
                egui::FontId::proportional(11.0),
                egui::Color32::GRAY,
            );
        }
        None => {
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                format!("Loading page {}…", idx),
                egui::FontId::proportional(16.0),
                egui::Color32::GRAY,
            );
        }
    }

    painter.text(
        rect.center_bottom() - egui::vec2(0.0, 8.0 * scale.max(0.5)),
        egui::Align2::CENTER_BOTTOM,
        idx.to_string(),
        egui::FontId::proportional(12.0),
        egui::Color32::DARK_GRAY,
    );
    painter.rect_stroke(
        rect,
        0.0,
        egui::Stroke::new(1.0, egui::Color32::from_gray(200)),
        egui::StrokeKind::Inside,
    );
}

fn draw_cover(painter: &egui::Painter, rect: egui::Rect, content: CoverContent, scale: f32) {
    let outer = matches!(content, CoverContent::FrontOuter | CoverContent::BackOuter);
    let (fill, text_color) = if outer {
        (COVER_OUTER, egui::Color32::WHITE)
    } else {
        (COVER_INNER, egui::Color32::from_gray(40))
    };
    painter.rect_filled(rect, 4.0, fill);

    let margin = 32.0 * scale.max(0.4);
    let wrap_width = (rect.width() - 2.0 * margin).max(10.0);
    let mut y = rect.top() + if outer { rect.height() * 0.35 } else { margin };

    if let Some(heading) = content.heading() {
        let size = if outer { 28.0 } else { 20.0 };
        let galley = painter.layout(
            heading.to_string(),
            egui::FontId::proportional(size * scale.max(0.5)),
            text_color,
            wrap_width,
        );
        let x = if outer {
            rect.center().x - galley.size().x / 2.0
        } else {
            rect.left() + margin
        };
        y += galley.size().y;
        painter.galley(egui::pos2(x, y - galley.size().y), galley, text_color);
        y += margin / 2.0;
    }

    for paragraph in content.paragraphs() {
        let galley = painter.layout(
            paragraph.to_string(),
            egui::FontId::proportional(14.0 * scale.max(0.5)),
            text_color,
            wrap_width,
        );
        let height = galley.size().y;
        painter.galley(egui::pos2(rect.left() + margin, y), galley, text_color);
        y += height + margin / 3.0;
    }
}

/// Sheet sweeping across the spine while a turn is animating
fn draw_turning_sheet(painter: &egui::Painter, book_rect: egui::Rect, window: ViewWindow, t: f32) {
    let spine = book_rect.center().x;
    let half = match window {
        ViewWindow::Single(_) => book_rect.width(),
        ViewWindow::Spread(..) => book_rect.width() / 2.0,
    };
    let (min_x, max_x) = if t < 0.5 {
        let w = half * (1.0 - 2.0 * t);
        (spine, spine + w)
    } else {
        let w = half * (2.0 * t - 1.0);
        (spine - w, spine)
    };
    let sheet = egui::Rect::from_x_y_ranges(min_x..=max_x, book_rect.y_range());
    let shade = (80.0 * (1.0 - (2.0 * t - 1.0).abs())) as u8;

    painter.rect_filled(sheet, 0.0, PAGE_PAPER);
    painter.rect_filled(sheet, 0.0, egui::Color32::from_black_alpha(shade));
    painter.rect_stroke(
        sheet,
        0.0,
        egui::Stroke::new(1.0, egui::Color32::from_gray(160)),
        egui::StrokeKind::Inside,
    );
}
