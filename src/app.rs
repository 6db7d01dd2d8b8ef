use eframe::egui;

use pin_collector::config::AppConfig;
use pin_collector::state::{AppState, Layout};

use crate::color::CollectionColors;
use crate::ui::{gallery, grid, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PinCollectorApp {
    pub state: AppState,
}

impl PinCollectorApp {
    pub fn new(config: AppConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }
}

impl eframe::App for PinCollectorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters and export options ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: grid or gallery ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.layout {
            Layout::Grid => grid::pin_grid(ui, &mut self.state),
            Layout::Gallery => {
                let colors = CollectionColors::from_table(&self.state.table);
                gallery::pin_gallery(ui, &mut self.state, &colors);
            }
        });
    }
}
