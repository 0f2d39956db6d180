use super::model::{LaunchDataset, LaunchRecord, Outcome, PayloadRange, SiteSelection};

// ---------------------------------------------------------------------------
// Payload-range filter (scatter chart data)
// ---------------------------------------------------------------------------

/// A record that passed the filter, seen through the fields the scatter chart
/// plots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterPoint<'a> {
    pub record: &'a LaunchRecord,
}

impl<'a> ScatterPoint<'a> {
    pub fn payload_mass_kg(&self) -> f64 {
        self.record.payload_mass_kg
    }

    pub fn outcome(&self) -> Outcome {
        self.record.outcome
    }

    pub fn booster_category(&self) -> &'a str {
        &self.record.booster_version_category
    }
}

/// Records launched from the selected site, in dataset order.
pub fn records_at_site<'a>(
    dataset: &'a LaunchDataset,
    selection: &'a SiteSelection,
) -> impl Iterator<Item = &'a LaunchRecord> + 'a {
    dataset
        .records()
        .iter()
        .filter(move |r| selection.matches(&r.launch_site))
}

/// Return the records whose payload lies inside `range` (inclusive) and whose
/// site matches `selection`, in dataset order.
///
/// The two predicates are independent, so the result does not depend on the
/// order they are applied in.
pub fn payload_filter<'a>(
    dataset: &'a LaunchDataset,
    range: PayloadRange,
    selection: &SiteSelection,
) -> Vec<ScatterPoint<'a>> {
    dataset
        .records()
        .iter()
        .filter(|r| range.contains(r.payload_mass_kg))
        .filter(|r| selection.matches(&r.launch_site))
        .map(|record| ScatterPoint { record })
        .collect()
}
