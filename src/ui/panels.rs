use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::model::YearRange;
use crate::data::query::QueryOutcome;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – year selection
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    // Clone the Arc so we can mutate state below.
    let Some(dataset) = state.dataset.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    match dataset.year_bounds {
        Some((lo, hi)) => {
            ui.strong("Publication years");
            let current = state.year_range.unwrap_or(YearRange::new(lo, hi));
            let mut start = current.min;
            let mut end = current.max;

            let start_resp = ui.add(egui::Slider::new(&mut start, lo..=hi).text("from"));
            let end_resp = ui.add(egui::Slider::new(&mut end, lo..=hi).text("to"));

            // Keep the inclusive range ordered whichever handle moved.
            if start_resp.changed() && end < start {
                end = start;
            }
            if end_resp.changed() && start > end {
                start = end;
            }
            state.set_year_range(YearRange::new(start, end));
        }
        None => {
            if dataset.schema.has_publish_time {
                ui.label("No parseable publication years in this dataset.");
            } else {
                ui.label("No publish_time column in this dataset.");
            }
        }
    }

    ui.separator();
    ui.strong("Dataset");
    ui.label(format!("{} papers", dataset.len()));
    ui.label(format!("{} columns", dataset.column_names.len()));
    match &dataset.schema.source_column {
        Some(column) => {
            ui.label(format!("source column: {column}"));
        }
        None => {
            ui.label("no source-like column");
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(dataset) = &state.dataset {
            let in_range = match &state.outcome {
                Some(QueryOutcome::Ready(bundle)) => bundle.matched,
                _ => 0,
            };
            ui.label(format!("{} papers loaded, {} in range", dataset.len(), in_range));
            ui.separator();
        }

        if ui.selectable_label(state.show_raw, "Show raw data").clicked() {
            state.show_raw = !state.show_raw;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open paper metadata")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_from_path(&path);
    }
}
