use eframe::egui::{self, Color32, RichText, Slider, SliderClamping, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::SiteSelection;
use crate::state::AppState;

const TITLE_COLOR: Color32 = Color32::from_rgb(0x50, 0x3D, 0x36);

// ---------------------------------------------------------------------------
// Left side panel – input controls
// ---------------------------------------------------------------------------

/// Render the control panel: site dropdown and payload range.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Controls");
    ui.separator();

    // ---- Site dropdown ----
    ui.strong("Launch Site");
    let current = state.inputs().site.clone();
    let mut picked: Option<SiteSelection> = None;
    egui::ComboBox::from_id_salt("site_dropdown")
        .width(ui.available_width())
        .selected_text(current.label())
        .show_ui(ui, |ui: &mut Ui| {
            for option in &state.site_options {
                if ui.selectable_label(current == *option, option.label()).clicked() {
                    picked = Some(option.clone());
                }
            }
        });
    if let Some(site) = picked {
        state.select_site(site);
    }
    ui.label(format!("{} launches at this selection", state.site_launch_count()));

    ui.add_space(12.0);
    ui.separator();

    // ---- Payload range: a low and a high handle ----
    ui.strong("Payload range (Kg):");
    let bounds = state.slider.min..=state.slider.max;
    let step = state.slider.step;
    let mut low = state.inputs().payload.low;
    let mut high = state.inputs().payload.high;

    // `Edits` keeps an off-grid startup range intact; only drags are snapped.
    let low_changed = ui
        .add(
            Slider::new(&mut low, bounds.clone())
                .clamping(SliderClamping::Edits)
                .step_by(step)
                .text("min"),
        )
        .changed();
    let high_changed = ui
        .add(
            Slider::new(&mut high, bounds)
                .clamping(SliderClamping::Edits)
                .step_by(step)
                .text("max"),
        )
        .changed();
    if low_changed || high_changed {
        state.set_payload_range(low, high);
    }

    let payload = state.inputs().payload;
    ui.label(format!("Showing {:.0} – {:.0} kg", payload.low, payload.high));
    if payload.low > payload.high {
        ui.label(RichText::new("min is above max: nothing matches").color(Color32::YELLOW));
    }

    ui.add_space(12.0);
    ui.separator();
    ui.checkbox(&mut state.show_table, "Show records table");
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the menu bar and the dashboard heading.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Export visible records…").clicked() {
                save_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} launches loaded, {} in payload range",
            state.dataset().len(),
            state.visible_points().len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(msg).color(color));
        }
    });

    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(
            RichText::new("SpaceX Launch Records Dashboard")
                .size(40.0)
                .color(TITLE_COLOR),
        );
    });
}

// ---------------------------------------------------------------------------
// Bottom panel – filtered records
// ---------------------------------------------------------------------------

/// Table of the records currently plotted in the scatter chart.
pub fn records_table(ui: &mut Ui, state: &AppState) {
    let points = state.visible_points();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(110.0))
        .column(Column::auto().at_least(70.0))
        .column(Column::auto().at_least(90.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in [
                "Launch Site",
                "Payload Mass (kg)",
                "Outcome",
                "Booster Category",
                "Booster Version",
            ] {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, points.len(), |mut row| {
                let rec = points[row.index()].record;
                row.col(|ui: &mut Ui| {
                    ui.label(&rec.launch_site);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("{:.1}", rec.payload_mass_kg));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(rec.outcome.to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&rec.booster_version_category);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&rec.booster_version);
                });
            });
        });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn save_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export visible launch records")
        .set_file_name("launches.csv")
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        state.export_visible(&path);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::Config;
    use crate::data::model::tests::{record, sample_dataset};
    use crate::data::model::{LaunchDataset, Outcome, PayloadRange};
    use crate::reactive::OutputId;

    /// Draw the control panel for `frames` frames with no user input.
    fn idle_frames(state: &mut AppState, frames: usize) {
        let ctx = egui::Context::default();
        for _ in 0..frames {
            let _ = ctx.run(egui::RawInput::default(), |ctx| {
                egui::CentralPanel::default().show(ctx, |ui| side_panel(ui, state));
            });
        }
    }

    fn render_counts(state: &AppState) -> (u64, u64) {
        (
            state.registry.render_count(OutputId::SuccessPie),
            state.registry.render_count(OutputId::PayloadScatter),
        )
    }

    #[test]
    fn first_frame_keeps_off_grid_startup_range() {
        let mut state = AppState::new(Arc::new(sample_dataset()), &Config::default());
        idle_frames(&mut state, 1);

        assert_eq!(state.inputs().payload, PayloadRange::new(500.0, 9000.0));
        assert_eq!(state.visible_points().len(), 3);
        assert_eq!(render_counts(&state), (1, 1));
    }

    #[test]
    fn range_beyond_slider_bounds_survives_idle_frames() {
        let ds = LaunchDataset::from_records(vec![
            record("CCAFS LC-40", 1.0, Outcome::Failure, "v1.0"),
            record("KSC LC-39A", 15_600.0, Outcome::Success, "B5"),
        ]);
        let mut state = AppState::new(Arc::new(ds), &Config::default());
        idle_frames(&mut state, 3);

        assert_eq!(state.inputs().payload, PayloadRange::new(1.0, 15_600.0));
        assert_eq!(state.visible_points().len(), 2);
        assert_eq!(render_counts(&state), (1, 1));
    }

    #[test]
    fn idle_frames_after_site_change_do_not_recompute() {
        let mut state = AppState::new(Arc::new(sample_dataset()), &Config::default());
        state.select_site(SiteSelection::Site("KSC LC-39A".into()));
        assert_eq!(render_counts(&state), (2, 2));

        idle_frames(&mut state, 2);
        assert_eq!(state.inputs().site, SiteSelection::Site("KSC LC-39A".into()));
        assert_eq!(render_counts(&state), (2, 2));
    }

    #[test]
    fn idle_frames_keep_user_picked_range() {
        let mut state = AppState::new(Arc::new(sample_dataset()), &Config::default());
        state.set_payload_range(2000.0, 7000.0);
        idle_frames(&mut state, 2);

        assert_eq!(state.inputs().payload, PayloadRange::new(2000.0, 7000.0));
        assert_eq!(render_counts(&state), (1, 2));
    }
}
