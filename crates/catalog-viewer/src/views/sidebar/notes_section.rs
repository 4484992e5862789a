use eframe::egui;
use std::time::Instant;

use crate::views::{Session, ViewState};

/// Freeform memo saved shortly after typing stops
pub fn show(ui: &mut egui::Ui, session: &mut Session, view: &mut ViewState) {
    ui.label("Notes");
    let response = ui.add(
        egui::TextEdit::multiline(&mut view.notes_draft)
            .desired_rows(12)
            .desired_width(f32::INFINITY)
            .hint_text("Jot down anything…"),
    );
    if response.changed() {
        session.set_notes_text(view.notes_draft.clone(), Instant::now());
    }
    if session.notes().is_dirty() {
        ui.weak("Saving…");
    }
}
