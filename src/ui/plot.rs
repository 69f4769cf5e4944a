use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Color32, Mesh, Pos2, RichText, Sense, Shape, Ui, Vec2};
use egui_plot::{Bar, BarChart, Plot};

use crate::color::{ColorMap, RdYlGn};
use crate::data::aggregate::{Histogram, RoleMean};

pub const CHART_HEIGHT: f32 = 300.0;

const BAR_COLOR: Color32 = Color32::from_rgb(99, 110, 250);

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn chart_title(ui: &mut Ui, title: &str) {
    ui.label(RichText::new(title).strong().size(15.0));
}

/// Shown in place of a chart whose input is empty.
fn no_data(ui: &mut Ui, what: &str) {
    ui.allocate_ui(Vec2::new(ui.available_width(), CHART_HEIGHT), |ui: &mut Ui| {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label(
                RichText::new(format!("No data to display in the {what} chart."))
                    .color(Color32::from_rgb(200, 150, 0)),
            );
        });
    });
}

/// Label for an integer axis position, blank between categories.
fn category_label(labels: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

/// Show a horizontal bar chart on a fixed, non-interactive plot with
/// categorical labels on the y axis.
fn show_category_chart(
    ui: &mut Ui,
    id: &str,
    x_label: &str,
    labels: Vec<String>,
    height: f32,
    chart: BarChart,
) {
    Plot::new(id)
        .height(height)
        .x_axis_label(x_label.to_string())
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_grid([true, false])
        .y_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
}

// ---------------------------------------------------------------------------
// Chart 1: top roles by mean salary
// ---------------------------------------------------------------------------

/// Horizontal bars; the input is ascending so the largest mean ends on top.
pub fn top_roles_chart(ui: &mut Ui, top_roles: &[RoleMean]) {
    chart_title(ui, "Top roles by mean salary");
    if top_roles.is_empty() {
        no_data(ui, "roles");
        return;
    }

    let labels: Vec<String> = top_roles.iter().map(|r| r.role.clone()).collect();
    let bars: Vec<Bar> = top_roles
        .iter()
        .enumerate()
        .map(|(i, r)| {
            Bar::new(i as f64, r.mean_salary)
                .width(0.7)
                .name(&r.role)
                .fill(BAR_COLOR)
        })
        .collect();

    let chart = BarChart::new(bars).horizontal().color(BAR_COLOR).element_formatter(Box::new(
        |bar: &Bar, _chart: &BarChart| format!("{}\nmean salary: {:.0}", bar.name, bar.value),
    ));

    show_category_chart(ui, "top_roles_chart", "Mean salary", labels, CHART_HEIGHT, chart);
}

// ---------------------------------------------------------------------------
// Chart 2: salary distribution (USD)
// ---------------------------------------------------------------------------

pub fn usd_histogram_chart(ui: &mut Ui, histogram: &Histogram) {
    chart_title(ui, "Annual salary distribution");
    if histogram.is_empty() || histogram.total() == 0 {
        no_data(ui, "distribution");
        return;
    }

    let bars: Vec<Bar> = histogram
        .bins()
        .map(|(left, right, count)| {
            Bar::new((left + right) / 2.0, count as f64)
                .width(right - left)
                .fill(BAR_COLOR)
        })
        .collect();

    let chart = BarChart::new(bars).color(BAR_COLOR).element_formatter(Box::new(
        |bar: &Bar, _chart: &BarChart| {
            let half = bar.bar_width / 2.0;
            format!(
                "{:.0} - {:.0} USD\n{} records",
                bar.argument - half,
                bar.argument + half,
                bar.value
            )
        },
    ));

    Plot::new("usd_histogram_chart")
        .height(CHART_HEIGHT)
        .x_axis_label("Salary range (USD)")
        .y_axis_label("Records")
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
}

// ---------------------------------------------------------------------------
// Chart 3: remote-work proportions (donut)
// ---------------------------------------------------------------------------

/// Percentage of the total for each count; empty when the total is zero.
fn percentages(counts: &[(String, usize)]) -> Vec<f64> {
    let total: usize = counts.iter().map(|(_, c)| c).sum();
    if total == 0 {
        return Vec::new();
    }
    counts
        .iter()
        .map(|(_, c)| *c as f64 * 100.0 / total as f64)
        .collect()
}

/// Append a filled ring segment between `start` and `end` radians.
fn add_ring_segment(
    mesh: &mut Mesh,
    center: Pos2,
    radii: (f32, f32),
    start: f32,
    end: f32,
    color: Color32,
) {
    let (inner, outer) = radii;
    let steps = (((end - start) / TAU) * 128.0).ceil().max(1.0) as u32;
    let base = mesh.vertices.len() as u32;

    for i in 0..=steps {
        let angle = start + (end - start) * i as f32 / steps as f32;
        let dir = Vec2::angled(angle);
        mesh.colored_vertex(center + dir * outer, color);
        mesh.colored_vertex(center + dir * inner, color);
    }
    for i in 0..steps {
        let outer0 = base + 2 * i;
        mesh.add_triangle(outer0, outer0 + 1, outer0 + 2);
        mesh.add_triangle(outer0 + 1, outer0 + 3, outer0 + 2);
    }
}

pub fn remote_work_donut(ui: &mut Ui, counts: &[(String, usize)]) {
    chart_title(ui, "Share of work arrangements");
    let shares = percentages(counts);
    if shares.is_empty() {
        no_data(ui, "work arrangement");
        return;
    }

    let colors = ColorMap::new(counts.iter().map(|(label, _)| label.as_str()));

    ui.horizontal(|ui: &mut Ui| {
        let size = (ui.available_width() * 0.55).clamp(120.0, CHART_HEIGHT);
        let (response, painter) = ui.allocate_painter(Vec2::splat(size), Sense::hover());
        let center = response.rect.center();
        let outer = size * 0.48;

        let mut mesh = Mesh::default();
        // Start at twelve o'clock, clockwise.
        let mut start = -FRAC_PI_2;
        for ((label, _), share) in counts.iter().zip(&shares) {
            let sweep = TAU * (*share as f32 / 100.0);
            add_ring_segment(
                &mut mesh,
                center,
                (outer * 0.5, outer),
                start,
                start + sweep,
                colors.color_for(label),
            );
            start += sweep;
        }
        painter.add(Shape::mesh(mesh));

        ui.vertical(|ui: &mut Ui| {
            ui.add_space(8.0);
            for ((label, count), share) in counts.iter().zip(&shares) {
                ui.horizontal(|ui: &mut Ui| {
                    let (rect, _) = ui.allocate_exact_size(Vec2::splat(12.0), Sense::hover());
                    ui.painter().rect_filled(rect, 2.0, colors.color_for(label));
                    ui.label(format!("{label}  {share:.1}%  ({count})"));
                });
            }
        });
    });
}

// ---------------------------------------------------------------------------
// Chart 4: mean USD per country for one role
// ---------------------------------------------------------------------------

/// One bar per residence country, coloured on the red-yellow-green scale.
pub fn country_means_chart(ui: &mut Ui, role: &str, country_means: &[(String, f64)]) {
    chart_title(ui, &format!("Mean {role} salary by country (USD)"));
    let Some(scale) = RdYlGn::spanning(country_means.iter().map(|(_, v)| *v)) else {
        no_data(ui, "country");
        return;
    };

    let labels: Vec<String> = country_means.iter().map(|(c, _)| c.clone()).collect();
    let bars: Vec<Bar> = country_means
        .iter()
        .enumerate()
        .map(|(i, (country, mean))| {
            Bar::new(i as f64, *mean)
                .width(0.8)
                .name(country)
                .fill(scale.color_for(*mean))
        })
        .collect();

    let chart = BarChart::new(bars).horizontal().element_formatter(Box::new(
        |bar: &Bar, _chart: &BarChart| format!("{}\nmean: {:.0} USD", bar.name, bar.value),
    ));

    egui::ScrollArea::vertical()
        .id_salt("country_means_scroll")
        .max_height(CHART_HEIGHT + 20.0)
        .show(ui, |ui: &mut Ui| {
            let height = (country_means.len() as f32 * 18.0).max(CHART_HEIGHT);
            show_category_chart(ui, "country_means_chart", "Mean salary (USD)", labels, height, chart);
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_label_only_on_integer_positions() {
        let labels = vec!["A".to_string(), "B".to_string()];
        assert_eq!(category_label(&labels, 1.0), "B");
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, 2.0), "");
        assert_eq!(category_label(&labels, -1.0), "");
    }

    #[test]
    fn percentages_sum_to_hundred() {
        let counts = vec![
            ("Remote".to_string(), 3),
            ("Hybrid".to_string(), 2),
            ("On-site".to_string(), 1),
        ];
        let shares = percentages(&counts);
        assert_eq!(shares.len(), 3);
        assert!((shares.iter().sum::<f64>() - 100.0).abs() < 1e-9);
        assert!(percentages(&[]).is_empty());
    }

    #[test]
    fn ring_segment_builds_two_triangles_per_step() {
        let mut mesh = Mesh::default();
        add_ring_segment(&mut mesh, Pos2::ZERO, (5.0, 10.0), 0.0, TAU / 4.0, Color32::RED);
        // A quarter turn uses 32 steps: 33 vertex pairs, 64 triangles.
        assert_eq!(mesh.vertices.len(), 66);
        assert_eq!(mesh.indices.len(), 64 * 3);
    }
}
