use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::{FilterColumn, SalaryDataset};
use crate::data::source::DataSource;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    // Clone what we need so we can mutate state inside the loop.
    let unique = dataset.unique_values.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for col in FilterColumn::ALL {
                let Some(all_values) = unique.get(&col) else {
                    continue;
                };

                let n_selected = state.filters.get(&col).map_or(0, |s| s.len());
                let header_text = format!("{col}  ({n_selected}/{})", all_values.len());

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(col.label())
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                state.select_all(col);
                            }
                            if ui.small_button("None").clicked() {
                                state.select_none(col);
                            }
                        });

                        for val in all_values {
                            let mut checked = state
                                .filters
                                .get(&col)
                                .is_some_and(|s| s.contains(val));
                            if ui.checkbox(&mut checked, val.to_string()).changed() {
                                state.toggle_filter_value(col, val);
                            }
                        }
                    });
            }
        });
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
            if ui.button("Reload default dataset").clicked() {
                state.load(state.config.source.clone());
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} records loaded, {} matching filters  ·  source: {}",
                format_count(ds.len()),
                format_count(state.matching_count()),
                state.source
            ));
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
        .set_title("Open salary data")
        .add_filter("Supported files", &["csv", "parquet", "pq", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.load(DataSource::Path(path));
    }
}

// ---------------------------------------------------------------------------
// Blocking load error
// ---------------------------------------------------------------------------

/// Full-page error shown when the dataset could not be loaded.
pub fn load_error_screen(ui: &mut Ui, state: &mut AppState, message: &str) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(80.0);
        ui.heading(RichText::new("Could not load the salary dataset").color(Color32::RED));
        ui.add_space(12.0);
        ui.label(message);
        ui.add_space(12.0);
        ui.horizontal(|ui: &mut Ui| {
            if ui.button("Retry").clicked() {
                state.reload();
            }
            if ui.button("Open local file…").clicked() {
                open_file_dialog(state);
            }
        });
    });
}

// ---------------------------------------------------------------------------
// Metrics row
// ---------------------------------------------------------------------------

/// Integer with comma thousands separators, e.g. `1,234,567`.
pub fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Currency amount rounded to whole units, e.g. `$1,234`.
pub fn format_money(value: f64) -> String {
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}${}", format_count(rounded.abs() as usize))
}

fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(RichText::new(label).weak());
        ui.label(RichText::new(value).size(26.0).strong());
    });
}

pub fn metrics_row(ui: &mut Ui, state: &AppState) {
    let summary = &state.summary;
    ui.columns(4, |cols| {
        metric(&mut cols[0], "Mean salary", format_money(summary.mean_salary));
        metric(&mut cols[1], "Max salary", format_money(summary.max_salary));
        metric(&mut cols[2], "Records", format_count(summary.record_count));
        metric(
            &mut cols[3],
            "Most frequent seniority",
            summary
                .most_common_seniority
                .clone()
                .unwrap_or_else(|| "n/a".to_string()),
        );
    });
}

// ---------------------------------------------------------------------------
// Raw data table
// ---------------------------------------------------------------------------

const TABLE_HEADERS: [&str; 9] = [
    "Year",
    "Seniority",
    "Contract",
    "Company size",
    "Role",
    "Salary",
    "USD",
    "Remote",
    "Residence",
];

/// The unfiltered dataset, one row per record.
pub fn raw_data_table(ui: &mut Ui, dataset: &SalaryDataset) {
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .max_scroll_height(400.0)
        .columns(Column::auto().at_least(60.0), TABLE_HEADERS.len())
        .header(20.0, |mut header| {
            for title in TABLE_HEADERS {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, dataset.len(), |mut row| {
                let rec = &dataset.records[row.index()];
                let cells = [
                    rec.year.to_string(),
                    rec.seniority.clone(),
                    rec.contract_type.clone(),
                    rec.company_size.clone(),
                    rec.role.clone(),
                    format!("{:.0}", rec.salary),
                    format!("{:.0}", rec.usd),
                    rec.remote.clone(),
                    rec.residence_iso3.clone(),
                ];
                for cell in cells {
                    row.col(|ui: &mut Ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}
