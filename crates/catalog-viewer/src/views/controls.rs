use eframe::egui;
use std::time::Instant;

use super::{Session, ViewState};

/// Bottom bar: navigation buttons, position slider and page-jump input
pub fn show(ctx: &egui::Context, session: &mut Session, view: &mut ViewState) {
    egui::TopBottomPanel::bottom("controls").show(ctx, |ui| {
        ui.add_space(4.0);
        show_slider(ui, session, view);
        ui.add_space(4.0);

        ui.horizontal(|ui| {
            let controls = session.controls();
            let now = Instant::now();

            if ui
                .add_enabled(controls.first_content_enabled, egui::Button::new("⏮"))
                .on_hover_text("First page")
                .clicked()
            {
                session.go_to_first_content();
            }
            if ui
                .add_enabled(controls.prev_enabled, egui::Button::new("◀ Previous"))
                .clicked()
            {
                session.previous(now);
            }
            if ui
                .add_enabled(controls.next_enabled, egui::Button::new("Next ▶"))
                .clicked()
            {
                session.next(now);
            }
            if ui
                .add_enabled(controls.last_content_enabled, egui::Button::new("⏭"))
                .on_hover_text("Last page")
                .clicked()
            {
                session.go_to_last_content();
            }

            ui.separator();

            ui.label("Go to page:");
            let input = ui.add(
                egui::TextEdit::singleline(&mut view.jump_input)
                    .desired_width(48.0)
                    .hint_text("1"),
            );
            let submitted =
                input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Go").clicked() || submitted {
                jump(session, view);
            }
        });
        ui.add_space(4.0);
    });
}

fn show_slider(ui: &mut egui::Ui, session: &mut Session, view: &mut ViewState) {
    let total = session.book().total_positions();
    let mut value = view.slider_drag.unwrap_or(session.slider().value);

    ui.spacing_mut().slider_width = ui.available_width() - 16.0;
    let response = ui.add(egui::Slider::new(&mut value, 1..=total).show_value(false));

    if response.drag_started() {
        session.slider_drag_start();
    }
    if response.dragged() {
        view.slider_drag = Some(value);
        session.slider_drag_move(value);
    }
    if response.drag_stopped() {
        view.slider_drag = None;
        session.slider_drag_end(value);
    } else if response.changed() && !response.dragged() {
        // Click on the track or keyboard step
        session.slider_drag_start();
        session.slider_drag_end(value);
    }
}

fn jump(session: &mut Session, view: &mut ViewState) {
    let max = session.book().content_pages;
    match view.jump_input.trim().parse::<i64>() {
        Ok(idx) => {
            if let Err(e) = session.jump_to_image_index(idx) {
                view.alert = Some(e.to_string());
            } else {
                view.jump_input.clear();
            }
        }
        Err(_) => {
            view.alert = Some(format!("Please enter a page number between 1 and {}", max));
        }
    }
}
