use std::path::Path;
use std::sync::Arc;

use crate::chart::{pie_figure, scatter_figure, Figure};
use crate::color::ColorMap;
use crate::config::{Config, SliderConfig};
use crate::data::aggregate::site_success;
use crate::data::export::export_records;
use crate::data::filter::{payload_filter, records_at_site, ScatterPoint};
use crate::data::model::{LaunchDataset, PayloadRange, SiteSelection};
use crate::reactive::{Binding, BindingRegistry, InputId, Inputs, OutputId};

// ---------------------------------------------------------------------------
// Chart bindings
// ---------------------------------------------------------------------------

fn compute_success_pie(dataset: &LaunchDataset, inputs: &Inputs) -> Figure {
    let colors = ColorMap::new(dataset.sites());
    let agg = site_success(dataset, &inputs.site);
    Figure::Pie(pie_figure(&agg, &inputs.site, &colors))
}

fn compute_payload_scatter(dataset: &LaunchDataset, inputs: &Inputs) -> Figure {
    let colors = ColorMap::new(dataset.booster_categories());
    let points = payload_filter(dataset, inputs.payload, &inputs.site);
    Figure::Scatter(scatter_figure(&points, &inputs.site, &colors))
}

/// The dashboard wiring: the pie follows the site dropdown, the scatter
/// follows both the dropdown and the payload range.
pub fn dashboard_bindings() -> Vec<Binding> {
    vec![
        Binding::new(OutputId::SuccessPie, &[InputId::Site], compute_success_pie),
        Binding::new(
            OutputId::PayloadScatter,
            &[InputId::Site, InputId::PayloadRange],
            compute_payload_scatter,
        ),
    ]
}

/// Startup inputs: every site, payload range spanning the whole dataset.
/// An empty dataset falls back to the slider bounds.
pub fn default_inputs(dataset: &LaunchDataset, slider: &SliderConfig) -> Inputs {
    Inputs {
        site: SiteSelection::All,
        payload: dataset
            .payload_bounds()
            .unwrap_or(PayloadRange::new(slider.min, slider.max)),
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Input values and the rendered figures.
    pub registry: BindingRegistry,

    /// Dropdown entries, "All Sites" first.
    pub site_options: Vec<SiteSelection>,

    /// Payload range control bounds.
    pub slider: SliderConfig,

    /// Whether the filtered-records table is expanded.
    pub show_table: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Wire the bindings over an already loaded dataset and render both
    /// charts once with the default inputs.
    pub fn new(dataset: Arc<LaunchDataset>, config: &Config) -> Self {
        let slider = config.controls.payload_slider;
        let inputs = default_inputs(&dataset, &slider);

        let mut registry = BindingRegistry::new(dataset, inputs);
        for binding in dashboard_bindings() {
            registry.register(binding);
        }
        registry.render_all();

        let site_options = std::iter::once(SiteSelection::All)
            .chain(config.controls.sites.iter().map(|s| SiteSelection::from_value(s)))
            .collect();

        Self {
            registry,
            site_options,
            slider,
            show_table: false,
            status_message: None,
        }
    }

    pub fn dataset(&self) -> &LaunchDataset {
        self.registry.dataset()
    }

    pub fn inputs(&self) -> &Inputs {
        self.registry.inputs()
    }

    pub fn figure(&self, output: OutputId) -> Option<&Figure> {
        self.registry.figure(output)
    }

    /// Dropdown changed.
    pub fn select_site(&mut self, site: SiteSelection) {
        self.registry.set_site(site);
    }

    /// Range control changed.
    pub fn set_payload_range(&mut self, low: f64, high: f64) {
        self.registry.set_payload_range(PayloadRange::new(low, high));
    }

    /// Records currently shown in the scatter chart.
    pub fn visible_points(&self) -> Vec<ScatterPoint<'_>> {
        let inputs = self.registry.inputs();
        payload_filter(self.registry.dataset(), inputs.payload, &inputs.site)
    }

    /// Launches at the selected site, ignoring the payload range.
    pub fn site_launch_count(&self) -> usize {
        records_at_site(self.registry.dataset(), &self.registry.inputs().site).count()
    }

    /// Write the visible records to `path` and report the outcome in the
    /// status line.
    pub fn export_visible(&mut self, path: &Path) {
        let points = self.visible_points();
        let result = export_records(path, points.iter().map(|p| p.record));
        match result {
            Ok(n) => {
                log::info!("Exported {n} records to {}", path.display());
                self.status_message = Some(format!("Exported {n} records to {}", path.display()));
            }
            Err(e) => {
                log::error!("Failed to export records: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::sample_dataset;
    use crate::reactive::ChartStatus;

    fn state() -> AppState {
        AppState::new(Arc::new(sample_dataset()), &Config::default())
    }

    fn pie_counts(state: &AppState) -> Vec<(String, usize)> {
        match state.figure(OutputId::SuccessPie) {
            Some(Figure::Pie(p)) => p.slices.iter().map(|s| (s.label.clone(), s.value)).collect(),
            other => panic!("expected pie, got {other:?}"),
        }
    }

    fn scatter_payloads(state: &AppState) -> Vec<f64> {
        match state.figure(OutputId::PayloadScatter) {
            Some(Figure::Scatter(s)) => {
                let mut v: Vec<f64> = s
                    .series
                    .iter()
                    .flat_map(|series| series.dots.iter().map(|d| d.payload_mass_kg))
                    .collect();
                v.sort_by(f64::total_cmp);
                v
            }
            other => panic!("expected scatter, got {other:?}"),
        }
    }

    #[test]
    fn starts_rendered_with_full_payload_range() {
        let state = state();
        assert_eq!(state.inputs().site, SiteSelection::All);
        assert_eq!(state.inputs().payload, PayloadRange::new(500.0, 9000.0));
        for id in [OutputId::SuccessPie, OutputId::PayloadScatter] {
            assert_eq!(state.registry.status(id), Some(ChartStatus::Rendered));
            assert_eq!(state.registry.render_count(id), 1);
        }
        assert_eq!(state.site_options.len(), 5);
        assert_eq!(state.site_options[0], SiteSelection::All);
    }

    #[test]
    fn end_to_end_example() {
        let mut state = state();
        assert_eq!(
            pie_counts(&state),
            vec![("CCAFS LC-40".to_string(), 1), ("KSC LC-39A".to_string(), 1)]
        );

        state.set_payload_range(0.0, 1000.0);
        assert_eq!(scatter_payloads(&state), vec![500.0]);
        assert_eq!(state.visible_points().len(), 1);
        // The pie does not depend on the payload range.
        assert_eq!(state.registry.render_count(OutputId::SuccessPie), 1);
    }

    #[test]
    fn selecting_a_site_updates_both_charts() {
        let mut state = state();
        state.select_site(SiteSelection::Site("CCAFS LC-40".into()));
        assert_eq!(
            pie_counts(&state),
            vec![("Failure".to_string(), 1), ("Success".to_string(), 1)]
        );
        assert_eq!(scatter_payloads(&state), vec![500.0, 9000.0]);
        assert_eq!(state.site_launch_count(), 2);
    }

    #[test]
    fn inverted_range_renders_empty_scatter() {
        let mut state = state();
        state.set_payload_range(8000.0, 2000.0);
        assert!(scatter_payloads(&state).is_empty());
    }

    #[test]
    fn empty_dataset_uses_slider_bounds() {
        let inputs = default_inputs(&LaunchDataset::from_records(Vec::new()), &SliderConfig::default());
        assert_eq!(inputs.payload, PayloadRange::new(0.0, 10_000.0));
    }

    #[test]
    fn export_reports_status() {
        let mut state = state();
        let dir = tempfile::tempdir().unwrap();
        state.set_payload_range(0.0, 5000.0);
        state.export_visible(&dir.path().join("visible.csv"));
        assert_eq!(
            state.status_message.as_deref(),
            Some(format!("Exported 2 records to {}", dir.path().join("visible.csv").display()).as_str())
        );

        state.export_visible(&dir.path().join("visible.bin"));
        assert!(state.status_message.unwrap().starts_with("Error:"));
    }
}
