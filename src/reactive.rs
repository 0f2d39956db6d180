use std::collections::BTreeMap;
use std::sync::Arc;

use crate::chart::Figure;
use crate::data::model::{LaunchDataset, PayloadRange, SiteSelection};

// ---------------------------------------------------------------------------
// Inputs and outputs
// ---------------------------------------------------------------------------

/// Identifies an input control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InputId {
    Site,
    PayloadRange,
}

/// Identifies an output chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OutputId {
    SuccessPie,
    PayloadScatter,
}

/// Current value of every input control.
#[derive(Debug, Clone, PartialEq)]
pub struct Inputs {
    pub site: SiteSelection,
    pub payload: PayloadRange,
}

/// Pure recomputation of one output from the dataset and the inputs.
pub type ComputeFn = fn(&LaunchDataset, &Inputs) -> Figure;

/// Declares that `output` is recomputed by `compute` whenever any input in
/// `depends_on` changes value.
#[derive(Clone)]
pub struct Binding {
    pub output: OutputId,
    pub depends_on: Vec<InputId>,
    pub compute: ComputeFn,
}

impl Binding {
    pub fn new(output: OutputId, depends_on: &[InputId], compute: ComputeFn) -> Self {
        Self {
            output,
            depends_on: depends_on.to_vec(),
            compute,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartStatus {
    /// An input changed and the figure has not been recomputed yet.
    Stale,
    /// The figure reflects the current inputs.
    Rendered,
}

struct OutputSlot {
    binding: Binding,
    status: ChartStatus,
    figure: Option<Figure>,
    renders: u64,
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Holds the input values and the bound outputs. Setting an input marks its
/// dependents stale and recomputes them before returning, so outside a call
/// every output is [`ChartStatus::Rendered`].
pub struct BindingRegistry {
    dataset: Arc<LaunchDataset>,
    inputs: Inputs,
    outputs: BTreeMap<OutputId, OutputSlot>,
}

impl BindingRegistry {
    pub fn new(dataset: Arc<LaunchDataset>, inputs: Inputs) -> Self {
        Self {
            dataset,
            inputs,
            outputs: BTreeMap::new(),
        }
    }

    /// Register an output. It starts stale until [`Self::render_all`] runs.
    /// Registering the same output again replaces its binding.
    pub fn register(&mut self, binding: Binding) {
        self.outputs.insert(
            binding.output,
            OutputSlot {
                binding,
                status: ChartStatus::Stale,
                figure: None,
                renders: 0,
            },
        );
    }

    /// Initial render: compute every output once with the current inputs.
    pub fn render_all(&mut self) {
        for slot in self.outputs.values_mut() {
            slot.status = ChartStatus::Stale;
        }
        self.flush();
    }

    pub fn inputs(&self) -> &Inputs {
        &self.inputs
    }

    pub fn dataset(&self) -> &LaunchDataset {
        &self.dataset
    }

    /// Change the site selection. Returns whether the value changed.
    pub fn set_site(&mut self, site: SiteSelection) -> bool {
        if self.inputs.site == site {
            return false;
        }
        log::debug!("input Site changed: {} -> {}", self.inputs.site, site);
        self.inputs.site = site;
        self.input_changed(InputId::Site);
        true
    }

    /// Change the payload interval. Returns whether the value changed.
    pub fn set_payload_range(&mut self, range: PayloadRange) -> bool {
        if self.inputs.payload == range {
            return false;
        }
        log::debug!("input PayloadRange changed: {} -> {}", self.inputs.payload, range);
        self.inputs.payload = range;
        self.input_changed(InputId::PayloadRange);
        true
    }

    fn input_changed(&mut self, input: InputId) {
        for slot in self.outputs.values_mut() {
            if slot.binding.depends_on.contains(&input) {
                slot.status = ChartStatus::Stale;
            }
        }
        self.flush();
    }

    /// Recompute every stale output.
    fn flush(&mut self) {
        for (id, slot) in self.outputs.iter_mut() {
            if slot.status != ChartStatus::Stale {
                continue;
            }
            slot.figure = Some((slot.binding.compute)(&self.dataset, &self.inputs));
            slot.status = ChartStatus::Rendered;
            slot.renders += 1;
            log::debug!("recomputed {id:?} (render #{})", slot.renders);
        }
    }

    pub fn figure(&self, output: OutputId) -> Option<&Figure> {
        self.outputs.get(&output).and_then(|s| s.figure.as_ref())
    }

    pub fn status(&self, output: OutputId) -> Option<ChartStatus> {
        self.outputs.get(&output).map(|s| s.status)
    }

    /// How many times the output has been computed.
    pub fn render_count(&self, output: OutputId) -> u64 {
        self.outputs.get(&output).map_or(0, |s| s.renders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{PieFigure, PieSlice};
    use crate::data::model::tests::sample_dataset;
    use eframe::egui::Color32;

    /// Encodes the inputs in the figure so tests can see what was used.
    fn echo_site(_: &LaunchDataset, inputs: &Inputs) -> Figure {
        Figure::Pie(PieFigure {
            title: inputs.site.to_string(),
            slices: Vec::new(),
        })
    }

    fn echo_both(ds: &LaunchDataset, inputs: &Inputs) -> Figure {
        Figure::Pie(PieFigure {
            title: format!("{} {}", inputs.site, inputs.payload),
            slices: vec![PieSlice {
                label: "n".into(),
                value: ds.len(),
                color: Color32::WHITE,
            }],
        })
    }

    fn registry() -> BindingRegistry {
        let mut reg = BindingRegistry::new(
            Arc::new(sample_dataset()),
            Inputs {
                site: SiteSelection::All,
                payload: PayloadRange::new(0.0, 10000.0),
            },
        );
        reg.register(Binding::new(OutputId::SuccessPie, &[InputId::Site], echo_site));
        reg.register(Binding::new(
            OutputId::PayloadScatter,
            &[InputId::Site, InputId::PayloadRange],
            echo_both,
        ));
        reg
    }

    fn title(reg: &BindingRegistry, id: OutputId) -> String {
        match reg.figure(id) {
            Some(Figure::Pie(p)) => p.title.clone(),
            other => panic!("unexpected figure {other:?}"),
        }
    }

    #[test]
    fn outputs_are_stale_until_first_render() {
        let mut reg = registry();
        assert_eq!(reg.status(OutputId::SuccessPie), Some(ChartStatus::Stale));
        assert!(reg.figure(OutputId::SuccessPie).is_none());

        reg.render_all();
        assert_eq!(reg.status(OutputId::SuccessPie), Some(ChartStatus::Rendered));
        assert_eq!(reg.status(OutputId::PayloadScatter), Some(ChartStatus::Rendered));
        assert_eq!(reg.render_count(OutputId::SuccessPie), 1);
        assert_eq!(title(&reg, OutputId::SuccessPie), "ALL");
    }

    #[test]
    fn only_dependents_are_recomputed() {
        let mut reg = registry();
        reg.render_all();

        assert!(reg.set_payload_range(PayloadRange::new(0.0, 1000.0)));
        assert_eq!(reg.render_count(OutputId::SuccessPie), 1);
        assert_eq!(reg.render_count(OutputId::PayloadScatter), 2);
        assert_eq!(title(&reg, OutputId::PayloadScatter), "ALL [0, 1000] kg");

        assert!(reg.set_site(SiteSelection::Site("KSC LC-39A".into())));
        assert_eq!(reg.render_count(OutputId::SuccessPie), 2);
        assert_eq!(reg.render_count(OutputId::PayloadScatter), 3);
        assert_eq!(title(&reg, OutputId::SuccessPie), "KSC LC-39A");
        assert_eq!(reg.status(OutputId::PayloadScatter), Some(ChartStatus::Rendered));
    }

    #[test]
    fn unchanged_value_does_not_recompute() {
        let mut reg = registry();
        reg.render_all();
        assert!(!reg.set_site(SiteSelection::All));
        assert!(!reg.set_payload_range(PayloadRange::new(0.0, 10000.0)));
        assert_eq!(reg.render_count(OutputId::SuccessPie), 1);
        assert_eq!(reg.render_count(OutputId::PayloadScatter), 1);
    }

    #[test]
    fn unknown_output_has_no_state() {
        let reg = BindingRegistry::new(
            Arc::new(sample_dataset()),
            Inputs {
                site: SiteSelection::All,
                payload: PayloadRange::new(0.0, 1.0),
            },
        );
        assert_eq!(reg.status(OutputId::SuccessPie), None);
        assert_eq!(reg.render_count(OutputId::SuccessPie), 0);
    }
}
