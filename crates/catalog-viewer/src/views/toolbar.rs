use eframe::egui;

use super::{Session, ViewState};

pub fn show(ctx: &egui::Context, session: &mut Session, view: &mut ViewState) {
    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let sidebar_open = session.is_sidebar_open();
            if ui.selectable_label(sidebar_open, "☰ Panel").clicked() {
                session.set_sidebar_open(!sidebar_open);
            }

            ui.separator();
            ui.heading("Catalog");
            ui.separator();

            ui.label(format!(
                "{} / {} pages",
                session.label(),
                session.book().content_pages
            ));

            ui.separator();

            let sticky_mode = session.is_sticky_mode();
            if ui
                .selectable_label(sticky_mode, "📝 Sticky notes")
                .on_hover_text("Click a catalog page to place a note")
                .clicked()
            {
                session.set_sticky_mode(!sticky_mode);
            }

            ui.separator();

            let zoom = session.zoom_mut();
            if ui
                .add_enabled(zoom.can_zoom_out(), egui::Button::new("➖"))
                .clicked()
            {
                zoom.zoom_out();
            }
            ui.label(zoom.percent_label());
            if ui
                .add_enabled(zoom.can_zoom_in(), egui::Button::new("➕"))
                .clicked()
            {
                zoom.zoom_in();
            }
            if ui
                .add_enabled(zoom.is_zoomed(), egui::Button::new("Reset"))
                .clicked()
            {
                zoom.reset();
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .button("🔗 Copy link")
                    .on_hover_text(session.query())
                    .clicked()
                {
                    ctx.copy_text(session.query().to_string());
                    log::info!("Copied link {}", session.query());
                }
                if view.alert.is_some() {
                    ui.label("⚠");
                }
            });
        });
    });
}
