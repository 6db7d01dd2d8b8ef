use eframe::egui::{self, DragValue, Frame, RichText, ScrollArea, Stroke, Ui};

use pin_collector::data::model::{Record, RecordId};
use pin_collector::state::AppState;

use crate::color::CollectionColors;

const CARD_WIDTH: f32 = 220.0;

enum CardAction {
    Edit,
    Save,
    Cancel,
    Remove,
}

// ---------------------------------------------------------------------------
// Card gallery (central panel)
// ---------------------------------------------------------------------------

/// Render the visible records as cards. Each card toggles its own edit mode.
pub fn pin_gallery(ui: &mut Ui, state: &mut AppState, colors: &CollectionColors) {
    if ui.button("+ Add pin").clicked() {
        let id = state.add_record();
        state.begin_edit(id);
    }
    ui.add_space(4.0);

    if state.visible.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No pins match the current filters");
        });
        return;
    }

    let ids: Vec<RecordId> = state.visible.clone();
    let thumb = state.config.thumbnail_size;
    let mut actions: Vec<(RecordId, CardAction)> = Vec::new();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.horizontal_wrapped(|ui: &mut Ui| {
                for id in ids {
                    let Some(record) = state.table.get(id).cloned() else {
                        continue;
                    };
                    let accent = colors.color_for(&record.collection);
                    Frame::group(ui.style())
                        .stroke(Stroke::new(1.5, accent))
                        .show(ui, |ui: &mut Ui| {
                            ui.set_width(CARD_WIDTH);
                            ui.vertical(|ui: &mut Ui| {
                                let action = match state.draft_mut(id) {
                                    Some(draft) => edit_card(ui, draft),
                                    None => view_card(ui, &record, thumb),
                                };
                                if let Some(action) = action {
                                    actions.push((id, action));
                                }
                            });
                        });
                }
            });
        });

    for (id, action) in actions {
        match action {
            CardAction::Edit => state.begin_edit(id),
            CardAction::Save => {
                state.commit_edit(id);
            }
            CardAction::Cancel => state.cancel_edit(id),
            CardAction::Remove => {
                state.remove_record(id);
            }
        }
    }
}

fn view_card(ui: &mut Ui, record: &Record, thumb: f32) -> Option<CardAction> {
    if record.image_url.is_empty() {
        ui.add_sized([thumb, thumb], egui::Label::new("no image"));
    } else {
        ui.add(
            egui::Image::from_uri(record.image_url.as_str())
                .max_width(thumb)
                .max_height(thumb)
                .rounding(4.0),
        );
    }

    let title = if record.name.is_empty() {
        "(unnamed)"
    } else {
        record.name.as_str()
    };
    ui.label(RichText::new(title).strong());
    ui.label(format!("{} · {}", record.serie, record.collection));
    ui.label(format!(
        "x{}  ·  {:.2} €  ·  {}",
        record.quantity,
        record.price,
        if record.tradeable { "tradeable" } else { "kept" }
    ));
    if !record.state.is_empty() {
        ui.label(format!("State: {}", record.state));
    }
    if !record.tags.is_empty() {
        ui.small(&record.tags);
    }
    if !record.notes.is_empty() {
        ui.small(RichText::new(&record.notes).italics());
    }

    let mut action = None;
    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("Edit").clicked() {
            action = Some(CardAction::Edit);
        }
        if ui.small_button("Remove").clicked() {
            action = Some(CardAction::Remove);
        }
    });
    action
}

fn edit_card(ui: &mut Ui, draft: &mut Record) -> Option<CardAction> {
    egui::Grid::new(("edit_card", draft.id))
        .num_columns(2)
        .show(ui, |ui: &mut Ui| {
            for (label, value) in [
                ("Name", &mut draft.name),
                ("Series", &mut draft.serie),
                ("Collection", &mut draft.collection),
                ("State", &mut draft.state),
                ("Tags", &mut draft.tags),
                ("Notes", &mut draft.notes),
                ("Image URL", &mut draft.image_url),
            ] {
                ui.label(label);
                ui.text_edit_singleline(value);
                ui.end_row();
            }
            ui.label("Quantity");
            ui.add(DragValue::new(&mut draft.quantity).range(0..=u32::MAX));
            ui.end_row();
            ui.label("Price");
            ui.add(
                DragValue::new(&mut draft.price)
                    .range(0.0..=f64::MAX)
                    .speed(0.1)
                    .fixed_decimals(2),
            );
            ui.end_row();
            ui.label("Tradeable");
            ui.checkbox(&mut draft.tradeable, "");
            ui.end_row();
        });

    let mut action = None;
    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("Save").clicked() {
            action = Some(CardAction::Save);
        }
        if ui.small_button("Cancel").clicked() {
            action = Some(CardAction::Cancel);
        }
    });
    action
}
