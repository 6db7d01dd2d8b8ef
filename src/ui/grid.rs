use eframe::egui::{self, Align, DragValue, Id, Response, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder, TableRow};

use pin_collector::data::model::{CellValue, Record, RecordId};
use pin_collector::state::AppState;

// ---------------------------------------------------------------------------
// Dense editable grid (central panel)
// ---------------------------------------------------------------------------

/// Render the visible records as an editable table.
///
/// Rows are edited on copies; changed copies are merged back by id after the
/// table is drawn, so hidden rows are never touched.
pub fn pin_grid(ui: &mut Ui, state: &mut AppState) {
    if ui.button("+ Add pin").clicked() {
        state.add_record();
    }
    ui.add_space(4.0);

    let columns: Vec<String> = state
        .table
        .columns()
        .iter()
        .map(|c| c.to_string())
        .collect();
    let rows: Vec<Record> = state
        .visible
        .iter()
        .filter_map(|id| state.table.get(*id).cloned())
        .collect();

    let mut edited: Vec<Record> = Vec::new();
    let mut to_remove: Option<RecordId> = None;

    ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(Align::Center))
            .column(Column::auto())
            .columns(Column::initial(110.0).at_least(40.0).clip(true), columns.len())
            .header(22.0, |mut header| {
                header.col(|_ui| {});
                for name in &columns {
                    header.col(|ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|mut body| {
                for mut record in rows {
                    let mut changed = false;
                    body.row(24.0, |mut row| {
                        row.col(|ui| {
                            if ui.small_button("✖").on_hover_text("Remove").clicked() {
                                to_remove = Some(record.id);
                            }
                        });
                        changed = record_cells(&mut row, &mut record);
                    });
                    if changed {
                        edited.push(record);
                    }
                }
            });
    });

    if let Some(id) = to_remove {
        state.remove_record(id);
    } else if !edited.is_empty() {
        state.merge_edits(edited);
    }
}

/// Single-line editor that keeps keystrokes in egui memory and writes into
/// `value` only when the field loses focus. Returns whether `value` changed.
fn text_cell(ui: &mut Ui, key: Id, value: &mut String) -> (Response, bool) {
    let mut text = ui
        .data_mut(|d| d.get_temp::<String>(key))
        .unwrap_or_else(|| value.clone());
    let response = ui.text_edit_singleline(&mut text);
    let mut changed = false;
    if response.lost_focus() {
        ui.data_mut(|d| d.remove::<String>(key));
        if text != *value {
            *value = text;
            changed = true;
        }
    } else if response.has_focus() {
        ui.data_mut(|d| d.insert_temp(key, text));
    }
    (response, changed)
}

fn record_cells(row: &mut TableRow<'_, '_>, record: &mut Record) -> bool {
    let id = record.id;
    let key = |col: usize| Id::new(("pin_grid", id, col));
    let mut changed = false;

    for (col, value) in [
        (0, &mut record.name),
        (1, &mut record.serie),
        (2, &mut record.collection),
    ] {
        row.col(|ui| changed |= text_cell(ui, key(col), value).1);
    }
    row.col(|ui| {
        changed |= ui
            .add(DragValue::new(&mut record.quantity).range(0..=u32::MAX))
            .changed();
    });
    row.col(|ui| changed |= text_cell(ui, key(4), &mut record.state).1);
    row.col(|ui| {
        changed |= ui.checkbox(&mut record.tradeable, "").changed();
    });
    row.col(|ui| {
        changed |= ui
            .add(
                DragValue::new(&mut record.price)
                    .range(0.0..=f64::MAX)
                    .speed(0.1)
                    .fixed_decimals(2),
            )
            .changed();
    });
    row.col(|ui| changed |= text_cell(ui, key(7), &mut record.tags).1);
    row.col(|ui| changed |= text_cell(ui, key(8), &mut record.notes).1);
    row.col(|ui| {
        let (response, url_changed) = text_cell(ui, key(9), &mut record.image_url);
        changed |= url_changed;
        if !record.image_url.is_empty() {
            response.on_hover_ui(|ui| {
                ui.add(egui::Image::from_uri(record.image_url.as_str()).max_width(160.0));
            });
        }
    });
    for (i, cell) in record.extra.iter_mut().enumerate() {
        row.col(|ui| {
            let mut text = cell.to_string();
            if text_cell(ui, key(10 + i), &mut text).1 {
                *cell = if text.is_empty() {
                    CellValue::Null
                } else {
                    CellValue::String(text)
                };
                changed = true;
            }
        });
    }
    changed
}
