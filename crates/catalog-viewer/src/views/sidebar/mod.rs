mod log_section;
mod notes_section;
mod stickies_section;
mod thumbnails_section;

use eframe::egui;

use super::{SidebarTab, Session, ViewState};
use crate::logger::AppLogger;

pub fn show(ctx: &egui::Context, session: &mut Session, view: &mut ViewState, logger: &AppLogger) {
    if !session.is_sidebar_open() {
        return;
    }

    egui::SidePanel::left("sidebar")
        .resizable(true)
        .default_width(260.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut view.sidebar_tab, SidebarTab::Thumbnails, "🖼 Pages");
                ui.selectable_value(&mut view.sidebar_tab, SidebarTab::Stickies, "📝 Notes");
                ui.selectable_value(&mut view.sidebar_tab, SidebarTab::Notes, "🗒 Memo");
                ui.selectable_value(&mut view.sidebar_tab, SidebarTab::Log, "📜 Log");
            });
            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| match view.sidebar_tab {
                SidebarTab::Thumbnails => thumbnails_section::show(ui, session, view),
                SidebarTab::Stickies => stickies_section::show(ui, session),
                SidebarTab::Notes => notes_section::show(ui, session, view),
                SidebarTab::Log => log_section::show(ui, logger),
            });
        });
}
