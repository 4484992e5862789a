use eframe::egui;
use log::Level;

use crate::logger::AppLogger;

pub fn show(ui: &mut egui::Ui, logger: &AppLogger) {
    if ui.button("Clear").clicked() {
        logger.clear();
    }
    ui.separator();

    for entry in logger.get_entries().iter().rev() {
        let color = match entry.level {
            Level::Error => egui::Color32::RED,
            Level::Warn => egui::Color32::from_rgb(200, 140, 0),
            _ => ui.visuals().text_color(),
        };
        ui.colored_label(
            color,
            format!(
                "{} {} {}",
                entry.timestamp.format("%H:%M:%S"),
                entry.target,
                entry.message
            ),
        );
    }
}
