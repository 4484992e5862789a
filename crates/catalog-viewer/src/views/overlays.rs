use catalog_core::GuideState;
use eframe::egui;

use super::{Session, ViewState};

/// Replaces the whole viewer when startup failed
pub fn show_startup_error(ctx: &egui::Context, message: &str) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(80.0);
            ui.heading("Unable to open catalog");
            ui.add_space(12.0);
            ui.colored_label(egui::Color32::DARK_RED, message);
        });
    });
}

/// First-visit hints; any click dismisses them
pub fn show_guide(ctx: &egui::Context, session: &mut Session) {
    if session.guide() == GuideState::Hidden {
        return;
    }

    let response = egui::Area::new(egui::Id::new("guide"))
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .order(egui::Order::Tooltip)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.heading("How to browse");
                ui.label("◀ ▶  Click a page edge or use the arrow keys to turn pages");
                ui.label("⟷  Drag the slider to jump through the catalog");
                ui.label("📝  Turn on sticky notes, then click a page to annotate it");
            });
        })
        .response;

    if response.clicked() || ctx.input(|i| i.pointer.any_click()) {
        session.dismiss_guide();
    }
}

/// Modal alert and delete confirmation
pub fn show_dialogs(ctx: &egui::Context, session: &mut Session, view: &mut ViewState) {
    if let Some(message) = view.alert.clone() {
        egui::Window::new("Notice")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(&message);
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    view.alert = None;
                }
            });
    }

    if let Some((page, id)) = view.pending_delete.clone() {
        egui::Window::new("Delete note")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label("Delete this sticky note?");
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Delete").clicked() {
                        session.delete_sticky(page, &id);
                        view.sticky_drafts.remove(&id);
                        view.pending_delete = None;
                    }
                    if ui.button("Cancel").clicked() {
                        view.pending_delete = None;
                    }
                });
            });
    }
}
