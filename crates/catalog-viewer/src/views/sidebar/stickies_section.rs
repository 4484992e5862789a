use catalog_core::position_label;
use eframe::egui;

use crate::views::{Session, sticky_color};

/// Every sticky note in the catalog, by page
pub fn show(ui: &mut egui::Ui, session: &mut Session) {
    let config = *session.book();
    let entries: Vec<(u32, String, String)> = session
        .annotations()
        .list_all()
        .into_iter()
        .map(|(page, note)| (page, note.text.clone(), note.color.clone()))
        .collect();

    if entries.is_empty() {
        ui.weak("No sticky notes yet. Turn on sticky notes and click a page.");
        return;
    }

    let mut target = None;
    for (page, text, color) in entries {
        let preview = if text.trim().is_empty() {
            "(empty note)".to_string()
        } else {
            text.lines().next().unwrap_or_default().to_string()
        };
        ui.horizontal(|ui| {
            let (swatch, _) = ui.allocate_exact_size(egui::vec2(10.0, 10.0), egui::Sense::hover());
            ui.painter().rect_filled(swatch, 2.0, sticky_color(&color));
            let label = format!("Page {}: {}", position_label(&config, page), preview);
            if ui.link(label).clicked() {
                target = Some(page);
            }
        });
    }

    if let Some(page) = target {
        session.sticky_list_clicked(page);
    }
}
