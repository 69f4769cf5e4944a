use eframe::egui::{self, Ui};

use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SalaryDashboardApp {
    pub state: AppState,
}

impl SalaryDashboardApp {
    /// Build the app and load the configured dataset. The load is
    /// synchronous; a failure is shown in place of the dashboard.
    pub fn new(config: DashboardConfig) -> Self {
        let mut state = AppState::new(config);
        state.reload();
        Self { state }
    }
}

impl eframe::App for SalaryDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        if let Some(message) = self.state.load_error.clone() {
            egui::CentralPanel::default().show(ctx, |ui| {
                panels::load_error_screen(ui, &mut self.state, &message);
            });
            return;
        }

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: metrics and charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| dashboard(ui, &self.state));
        });
    }
}

fn dashboard(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to view salaries  (File → Open…)");
        });
        return;
    };

    ui.heading("Salary analysis in the job market");
    ui.label(
        "Explore salaries by year, seniority, contract type and company size \
         using the filters on the left.",
    );
    if dataset.is_empty() {
        ui.label("The loaded dataset contains no records.");
    }
    ui.add_space(8.0);

    panels::metrics_row(ui, state);
    ui.separator();

    let summary = &state.summary;
    ui.columns(2, |cols| {
        plot::top_roles_chart(&mut cols[0], &summary.top_roles);
        plot::usd_histogram_chart(&mut cols[1], &summary.usd_histogram);
    });
    ui.add_space(12.0);
    ui.columns(2, |cols| {
        plot::remote_work_donut(&mut cols[0], &summary.remote_work);
        plot::country_means_chart(
            &mut cols[1],
            &state.config.country_role,
            &summary.country_means,
        );
    });

    ui.add_space(12.0);
    egui::CollapsingHeader::new("About the data")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            panels::raw_data_table(ui, dataset);
        });
}
