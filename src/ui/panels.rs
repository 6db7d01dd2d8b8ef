use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use pin_collector::data::filter::TradeableFilter;
use pin_collector::data::model::FIXED_COLUMNS;
use pin_collector::state::{AppState, Layout};

// ---------------------------------------------------------------------------
// Left side panel – filters and export options
// ---------------------------------------------------------------------------

fn tradeable_label(filter: TradeableFilter) -> &'static str {
    match filter {
        TradeableFilter::Any => "Any",
        TradeableFilter::Yes => "Yes",
        TradeableFilter::No => "No",
    }
}

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Filters");
            ui.separator();

            let mut changed = false;

            ui.strong("Search");
            changed |= ui.text_edit_singleline(&mut state.filters.query).changed();
            ui.strong("Series");
            changed |= ui.text_edit_singleline(&mut state.filters.serie).changed();
            ui.strong("Collection");
            changed |= ui.text_edit_singleline(&mut state.filters.collection).changed();

            ui.strong("Tradeable");
            egui::ComboBox::from_id_salt("tradeable_filter")
                .selected_text(tradeable_label(state.filters.tradeable))
                .show_ui(ui, |ui: &mut Ui| {
                    for option in TradeableFilter::ALL {
                        changed |= ui
                            .selectable_value(
                                &mut state.filters.tradeable,
                                option,
                                tradeable_label(option),
                            )
                            .changed();
                    }
                });

            let clear = egui::Button::new("Clear filters").small();
            if ui.add_enabled(!state.filters.is_blank(), clear).clicked() {
                state.filters = Default::default();
                changed = true;
            }

            if changed {
                state.refilter();
            }

            ui.add_space(8.0);
            ui.heading("Export");
            ui.separator();
            ui.label("Export file name");
            ui.text_edit_singleline(&mut state.export_name);
            let local = format!("Also save to {}", state.config.data_path.display());
            ui.checkbox(&mut state.save_local_on_export, local);

            ui.add_space(8.0);
            egui::CollapsingHeader::new(RichText::new("Help").strong())
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    ui.label("Recommended columns:");
                    ui.label(FIXED_COLUMNS.join(", "));
                    ui.label("Other columns are kept as they are.");
                });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Import…").clicked() {
                import_file_dialog(state);
                ui.close_menu();
            }
            let local = format!("Load {}", state.config.data_path.display());
            if ui.button(local).clicked() {
                report(state, "load local file", |s| s.load_local());
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Export…").clicked() {
                export_file_dialog(state);
                ui.close_menu();
            }
            let save = format!("Save to {}", state.config.data_path.display());
            if ui.button(save).clicked() {
                report(state, "save local file", |s| s.save_local());
                ui.close_menu();
            }
        });

        ui.separator();

        if ui
            .selectable_label(state.layout == Layout::Grid, "Grid")
            .clicked()
        {
            state.layout = Layout::Grid;
        }
        if ui
            .selectable_label(state.layout == Layout::Gallery, "Gallery")
            .clicked()
        {
            state.layout = Layout::Gallery;
        }

        ui.separator();

        let summary = state.summary();
        ui.label(format!(
            "{} entries, {} visible",
            summary.total, summary.visible
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                ui.visuals().text_color()
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

/// Run a fallible state action, logging and surfacing any error.
fn report(state: &mut AppState, what: &str, action: impl FnOnce(&mut AppState) -> anyhow::Result<()>) {
    if let Err(e) = action(state) {
        log::error!("Failed to {what}: {e:#}");
        state.status_message = Some(format!("Error: {e:#}"));
    }
}

pub fn import_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Import pins")
        .add_filter("Supported files", &["xlsx", "xlsm", "xlsb", "xls", "ods", "csv", "json"])
        .add_filter("Excel", &["xlsx", "xlsm", "xlsb", "xls"])
        .add_filter("OpenDocument", &["ods"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        report(state, "import file", |s| s.import_file(&path));
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export pins")
        .set_file_name(state.export_name.as_str())
        .add_filter("Excel", &["xlsx"])
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        report(state, "export", |s| s.export_to(&path));
    }
}
