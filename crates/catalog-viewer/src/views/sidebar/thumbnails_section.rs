use eframe::egui;

use crate::views::{PageImage, Session, ViewState};

const THUMBNAIL_WIDTH: f32 = 96.0;

pub fn show(ui: &mut egui::Ui, session: &mut Session, view: &ViewState) {
    let config = *session.book();
    let height = THUMBNAIL_WIDTH / session.options().layout.page_aspect_ratio();
    let size = egui::vec2(THUMBNAIL_WIDTH, height);

    let mut clicked = None;
    ui.horizontal_wrapped(|ui| {
        for idx in 1..=config.content_pages {
            let highlighted = session.highlighted_thumbnails().contains(&idx);
            let response = ui
                .vertical(|ui| {
                    let response = match view.images.get(&idx) {
                        Some(PageImage::Ready(texture)) => ui.add(
                            egui::Image::new((texture.id(), size)).sense(egui::Sense::click()),
                        ),
                        Some(PageImage::Failed(_)) => placeholder(ui, size, "⚠"),
                        None => placeholder(ui, size, "…"),
                    };
                    if highlighted {
                        ui.painter().rect_stroke(
                            response.rect.expand(2.0),
                            2.0,
                            egui::Stroke::new(2.0, ui.visuals().selection.bg_fill),
                            egui::StrokeKind::Outside,
                        );
                    }
                    ui.label(idx.to_string());
                    response
                })
                .inner;

            if response.clicked() {
                clicked = Some(idx);
            }
        }
    });

    if let Some(idx) = clicked {
        session.thumbnail_clicked(idx);
    }
}

fn placeholder(ui: &mut egui::Ui, size: egui::Vec2, text: &str) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());
    ui.painter()
        .rect_filled(rect, 2.0, ui.visuals().extreme_bg_color);
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        text,
        egui::FontId::proportional(16.0),
        ui.visuals().weak_text_color(),
    );
    response
}
