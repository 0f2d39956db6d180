use eframe::egui::{Align2, Color32, RichText, Stroke, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::chart::{Figure, PieFigure, ScatterFigure};
use crate::reactive::OutputId;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Chart panels (central area)
// ---------------------------------------------------------------------------

/// Render both charts, the pie above the scatter.
pub fn charts(ui: &mut Ui, state: &AppState) {
    let pie_height = (ui.available_height() * 0.45).max(160.0);

    match state.figure(OutputId::SuccessPie) {
        Some(Figure::Pie(fig)) => success_pie(ui, fig, pie_height),
        _ => placeholder(ui, "Pie chart not rendered"),
    }
    ui.separator();
    match state.figure(OutputId::PayloadScatter) {
        Some(Figure::Scatter(fig)) => payload_scatter(ui, fig),
        _ => placeholder(ui, "Scatter chart not rendered"),
    }
}

fn placeholder(ui: &mut Ui, text: &str) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.label(RichText::new(text).italics());
    });
}

fn chart_title(ui: &mut Ui, title: &str) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(title);
    });
}

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

fn success_pie(ui: &mut Ui, fig: &PieFigure, height: f32) {
    chart_title(ui, &fig.title);

    if fig.is_empty() {
        ui.allocate_ui(eframe::egui::vec2(ui.available_width(), height), |ui: &mut Ui| {
            placeholder(ui, "No data");
        });
        return;
    }

    let wedges = fig.wedges();

    Plot::new("success_pie")
        .height(height)
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .include_x(-1.1)
        .include_x(1.1)
        .include_y(-1.1)
        .include_y(1.1)
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            for (slice, wedge) in fig.slices.iter().zip(&wedges) {
                // Every piece of a slice shares its name so the legend shows
                // one entry per slice.
                for poly in &wedge.polygons {
                    let points: PlotPoints = poly.iter().copied().collect();
                    plot_ui.polygon(
                        Polygon::new(points)
                            .name(&slice.label)
                            .fill_color(slice.color)
                            .stroke(Stroke::new(1.0, slice.color)),
                    );
                }

                let label = format!("{}\n{:.1}%", slice.label, wedge.percent());
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(wedge.label_at[0], wedge.label_at[1]),
                        RichText::new(label).color(Color32::WHITE).strong(),
                    )
                    .anchor(Align2::CENTER_CENTER),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

fn payload_scatter(ui: &mut Ui, fig: &ScatterFigure) {
    chart_title(ui, &fig.title);

    if fig.point_count() == 0 {
        placeholder(ui, "No launches in the selected payload range");
        return;
    }

    let hover = fig.clone();

    Plot::new("payload_scatter")
        .legend(Legend::default())
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("Launch Outcome")
        .include_y(-0.25)
        .include_y(1.25)
        .y_axis_formatter(|mark, _range| match mark.value {
            v if v == 0.0 => "Failure".to_string(),
            v if v == 1.0 => "Success".to_string(),
            _ => String::new(),
        })
        .label_formatter(move |name, value| {
            hover
                .describe(name, value.x, value.y)
                .unwrap_or_else(|| format!("{:.0} kg", value.x))
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &fig.series {
                let points: PlotPoints = series
                    .dots
                    .iter()
                    .map(|d| [d.payload_mass_kg, d.outcome.class() as f64])
                    .collect();

                plot_ui.points(
                    Points::new(points)
                        .name(&series.category)
                        .color(series.color)
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(4.0),
                );
            }
        });
}
