use catalog_core::StickyNote;
use catalog_core::constants::STICKY_COLORS;
use eframe::egui;

use super::book::PageSlot;
use super::{Session, ViewState, sticky_color};

/// Sticky note elements on the visible content pages
pub fn show(
    ctx: &egui::Context,
    session: &mut Session,
    view: &mut ViewState,
    slots: &[PageSlot],
    scale: f32,
) {
    for slot in slots {
        if slot.position == 0 || !session.book().is_content_position(slot.position) {
            continue;
        }
        let notes: Vec<StickyNote> = session.annotations().notes_for(slot.position).to_vec();
        for note in notes {
            show_note(ctx, session, view, slot, &note, scale);
        }
    }
}

fn show_note(
    ctx: &egui::Context,
    session: &mut Session,
    view: &mut ViewState,
    slot: &PageSlot,
    note: &StickyNote,
    scale: f32,
) {
    let page = slot.position;
    let pos = slot.rect.min + egui::vec2(note.x, note.y) * scale;
    let fill = sticky_color(&note.color);

    egui::Area::new(egui::Id::new(("sticky", &note.id)))
        .fixed_pos(pos)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            egui::Frame::NONE
                .fill(fill)
                .corner_radius(4.0)
                .inner_margin(egui::Margin::same(6))
                .stroke(egui::Stroke::new(1.0, egui::Color32::from_black_alpha(60)))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        let handle = ui.add(
                            egui::Label::new("✥")
                                .sense(egui::Sense::drag())
                                .selectable(false),
                        );
                        if handle.dragged() {
                            let delta = handle.drag_delta() / scale.max(0.01);
                            session.move_sticky(page, &note.id, note.x + delta.x, note.y + delta.y);
                        }

                        for color in STICKY_COLORS {
                            let swatch = egui::Button::new("")
                                .fill(sticky_color(color))
                                .min_size(egui::vec2(12.0, 12.0))
                                .selected(note.color == color);
                            if ui.add(swatch).on_hover_text(color).clicked() {
                                session.update_sticky_color(page, &note.id, color);
                            }
                        }

                        if ui.small_button("✕").on_hover_text("Delete note").clicked() {
                            view.pending_delete = Some((page, note.id.clone()));
                        }
                    });

                    let draft = view
                        .sticky_drafts
                        .entry(note.id.clone())
                        .or_insert_with(|| note.text.clone());
                    let edit = ui.add(
                        egui::TextEdit::multiline(draft)
                            .desired_width(140.0)
                            .desired_rows(3)
                            .frame(false)
                            .hint_text("Write a note…"),
                    );
                    if edit.changed() {
                        session.update_sticky_text(page, &note.id, draft.as_str());
                    }
                });
        });
}
