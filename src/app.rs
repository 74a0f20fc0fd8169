use std::path::Path;

use eframe::egui;

use crate::data::loader::DEFAULT_DATA_PATH;
use crate::state::AppState;
use crate::ui::{charts, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PaperLensApp {
    pub state: AppState,
}

impl PaperLensApp {
    /// Start the app, picking up `metadata.csv` from the working directory
    /// when it exists.
    pub fn startup() -> Self {
        let mut state = AppState::default();
        let default_path = Path::new(DEFAULT_DATA_PATH);
        if default_path.exists() {
            state.load_from_path(default_path);
        } else {
            log::info!("no {DEFAULT_DATA_PATH} in working directory, waiting for File → Open");
        }
        Self { state }
    }
}

impl eframe::App for PaperLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: year selection ----
        egui::SidePanel::left("filter_panel")
            .default_width(230.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: dashboard ----
        egui::CentralPanel::default().show(ctx, |ui| {
            charts::dashboard(ui, &self.state);
        });
    }
}
