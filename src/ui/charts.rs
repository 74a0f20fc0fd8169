use eframe::egui::{ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};

use crate::color::CategoryColors;
use crate::data::aggregate::ColumnCounts;
use crate::data::model::PaperDataset;
use crate::data::query::{DashboardBundle, QueryOutcome};
use crate::state::AppState;

const PREVIEW_ROWS: usize = 20;
const CHART_HEIGHT: f32 = 220.0;

// ---------------------------------------------------------------------------
// Dashboard (central panel)
// ---------------------------------------------------------------------------

/// Render the dashboard for the current query outcome.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a metadata CSV to explore papers  (File → Open…)");
        });
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            if state.show_raw {
                preview_table(ui, dataset);
                ui.separator();
            }

            match &state.outcome {
                None => {
                    ui.label("No parseable publication years in this dataset, nothing to aggregate.");
                }
                Some(QueryOutcome::EmptySelection) => {
                    ui.label("No papers found in the selected year range. Try expanding the range.");
                }
                Some(QueryOutcome::Ready(bundle)) => {
                    render_bundle(ui, bundle);
                }
            }
        });
}

fn render_bundle(ui: &mut Ui, bundle: &DashboardBundle) {
    ui.heading("Publications per year");
    per_year_charts(ui, &bundle.per_year);
    ui.separator();

    ui.heading("Top journals");
    match &bundle.top_journals {
        ColumnCounts::Ranked(ranked) => category_bars(ui, "top_journals", ranked),
        ColumnCounts::NotApplicable => {
            ui.label("No 'journal' column found in dataset.");
        }
    }
    ui.separator();

    ui.heading("Word cloud of titles");
    word_cloud_section(ui, bundle);
    ui.separator();

    ui.heading("Most frequent words in titles");
    if bundle.top_words.is_empty() {
        ui.label("No title text available to compute word frequencies.");
    } else {
        word_table(ui, &bundle.top_words);
    }
    ui.separator();

    ui.heading("Papers by source");
    match &bundle.top_sources {
        ColumnCounts::Ranked(ranked) => category_bars(ui, "top_sources", ranked),
        ColumnCounts::NotApplicable => {
            ui.label("No source-like column found in dataset.");
        }
    }
}

// ---------------------------------------------------------------------------
// Per-year time series
// ---------------------------------------------------------------------------

fn per_year_charts(ui: &mut Ui, per_year: &[(i32, u64)]) {
    let points: PlotPoints = per_year
        .iter()
        .map(|&(year, count)| [year as f64, count as f64])
        .collect();

    Plot::new("per_year_line")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(points).name("papers").width(2.0));
        });

    let bars: Vec<Bar> = per_year
        .iter()
        .map(|&(year, count)| Bar::new(year as f64, count as f64).width(0.7))
        .collect();

    Plot::new("per_year_bars")
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("papers"));
        });
}

// ---------------------------------------------------------------------------
// Categorical rankings (journals, sources)
// ---------------------------------------------------------------------------

/// One bar per category at integer x positions; the legend carries the
/// category names.
fn category_bars(ui: &mut Ui, id: &str, ranked: &[(String, u64)]) {
    if ranked.is_empty() {
        ui.label("No data in the selected range.");
        return;
    }

    let colors = CategoryColors::new(ranked.iter().map(|(label, _)| label.as_str()));

    Plot::new(id.to_string())
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (i, (label, count)) in ranked.iter().enumerate() {
                let color = colors.color_for(label);
                let bar = Bar::new(i as f64, *count as f64)
                    .width(0.7)
                    .name(label)
                    .fill(color);
                plot_ui.bar_chart(BarChart::new(vec![bar]).name(label).color(color));
            }
        });
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

fn word_table(ui: &mut Ui, words: &[(String, u64)]) {
    ui.push_id("word_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto().at_least(160.0))
            .column(Column::remainder())
            .header(18.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Word");
                });
                header.col(|ui| {
                    ui.strong("Frequency");
                });
            })
            .body(|mut body| {
                for (word, count) in words {
                    body.row(16.0, |mut row| {
                        row.col(|ui| {
                            ui.label(word.as_str());
                        });
                        row.col(|ui| {
                            ui.label(count.to_string());
                        });
                    });
                }
            });
    });
}

fn preview_table(ui: &mut Ui, dataset: &PaperDataset) {
    ui.heading("Raw data preview");
    ui.label(format!(
        "First {} of {} rows",
        PREVIEW_ROWS.min(dataset.len()),
        dataset.len()
    ));

    ui.push_id("raw_preview", |ui: &mut Ui| {
        ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .columns(Column::auto().at_least(80.0), dataset.column_names.len())
                .header(18.0, |mut header| {
                    for name in &dataset.column_names {
                        header.col(|ui| {
                            ui.strong(name.as_str());
                        });
                    }
                })
                .body(|mut body| {
                    for record in dataset.records.iter().take(PREVIEW_ROWS) {
                        body.row(16.0, |mut row| {
                            for name in &dataset.column_names {
                                row.col(|ui| {
                                    ui.label(record.field(name).unwrap_or(""));
                                });
                            }
                        });
                    }
                });
        });
    });
}

// ---------------------------------------------------------------------------
// Word cloud section
// ---------------------------------------------------------------------------

#[cfg(feature = "wordcloud")]
fn word_cloud_section(ui: &mut Ui, bundle: &DashboardBundle) {
    if bundle.cloud_words.is_empty() {
        ui.label("No titles available for the selected range.");
    } else {
        crate::ui::wordcloud::word_cloud(ui, &bundle.cloud_words);
    }
}

#[cfg(not(feature = "wordcloud"))]
fn word_cloud_section(ui: &mut Ui, _bundle: &DashboardBundle) {
    use eframe::egui::{Color32, RichText};

    ui.label(
        RichText::new(
            "Word cloud support is not compiled in; rebuild with the `wordcloud` feature to see it.",
        )
        .color(Color32::YELLOW),
    );
}
