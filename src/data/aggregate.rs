use std::collections::BTreeMap;

use super::model::{LaunchDataset, Outcome, SiteSelection};

// ---------------------------------------------------------------------------
// Site-success aggregation (pie chart data)
// ---------------------------------------------------------------------------

/// Pie segments for the current site selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteSuccess {
    /// All sites: successful launches per site.
    BySite(BTreeMap<String, usize>),
    /// One site: launches per outcome at that site.
    ByOutcome(BTreeMap<Outcome, usize>),
}

impl SiteSuccess {
    /// Sum of every segment.
    pub fn total(&self) -> usize {
        match self {
            SiteSuccess::BySite(m) => m.values().sum(),
            SiteSuccess::ByOutcome(m) => m.values().sum(),
        }
    }

    /// Number of segments; zero when nothing matched.
    pub fn len(&self) -> usize {
        match self {
            SiteSuccess::BySite(m) => m.len(),
            SiteSuccess::ByOutcome(m) => m.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Count launches for the pie chart.
///
/// * `All`     → keep successful launches, count per site.
/// * `Site(s)` → keep launches from `s`, count per outcome.
///
/// Only values that actually occur become segments, so an unknown site
/// produces an empty result rather than an error.
pub fn site_success(dataset: &LaunchDataset, selection: &SiteSelection) -> SiteSuccess {
    match selection {
        SiteSelection::All => {
            let mut counts: BTreeMap<String, usize> = BTreeMap::new();
            for rec in dataset.records().iter().filter(|r| r.outcome.is_success()) {
                *counts.entry(rec.launch_site.clone()).or_default() += 1;
            }
            SiteSuccess::BySite(counts)
        }
        SiteSelection::Site(site) => {
            let mut counts: BTreeMap<Outcome, usize> = BTreeMap::new();
            for rec in dataset.records().iter().filter(|r| &r.launch_site == site) {
                *counts.entry(rec.outcome).or_default() += 1;
            }
            SiteSuccess::ByOutcome(counts)
        }
    }
}
