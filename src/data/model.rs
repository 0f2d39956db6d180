use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Outcome – the binary `class` column
// ---------------------------------------------------------------------------

/// Launch outcome class. Serialized as the integer `0` / `1` used by the
/// source data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Numeric class value, also used as the scatter y coordinate.
    pub fn class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }
}

impl From<Outcome> for u8 {
    fn from(outcome: Outcome) -> Self {
        outcome.class()
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Failure => write!(f, "Failure"),
            Outcome::Success => write!(f, "Success"),
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the table
// ---------------------------------------------------------------------------

/// A single launch attempt. Serialized field names mirror the source column
/// headers so exports load back through the loader.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchRecord {
    #[serde(rename = "Launch Site")]
    pub launch_site: String,
    #[serde(rename = "Payload Mass (kg)")]
    pub payload_mass_kg: f64,
    #[serde(rename = "class")]
    pub outcome: Outcome,
    #[serde(rename = "Booster Version Category")]
    pub booster_version_category: String,
    #[serde(rename = "Booster Version")]
    pub booster_version: String,
}

/// Source column names, in the order the loaders look them up.
pub mod columns {
    pub const LAUNCH_SITE: &str = "Launch Site";
    pub const PAYLOAD_MASS: &str = "Payload Mass (kg)";
    pub const CLASS: &str = "class";
    pub const BOOSTER_CATEGORY: &str = "Booster Version Category";
    pub const BOOSTER_VERSION: &str = "Booster Version";

    pub const REQUIRED: [&str; 5] = [
        LAUNCH_SITE,
        PAYLOAD_MASS,
        CLASS,
        BOOSTER_CATEGORY,
        BOOSTER_VERSION,
    ];
}

// ---------------------------------------------------------------------------
// Input values driving the charts
// ---------------------------------------------------------------------------

/// Site dropdown value: either every site or one named site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    /// Wire value of the "all sites" sentinel.
    pub const ALL: &'static str = "ALL";

    /// Parse a dropdown value, mapping the sentinel to [`SiteSelection::All`].
    pub fn from_value(value: &str) -> Self {
        if value == Self::ALL {
            SiteSelection::All
        } else {
            SiteSelection::Site(value.to_string())
        }
    }

    /// Whether a record's site passes this selection.
    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(s) => s == site,
        }
    }

    /// Human label for dropdowns and titles.
    pub fn label(&self) -> &str {
        match self {
            SiteSelection::All => "All Sites",
            SiteSelection::Site(s) => s,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelection::All => write!(f, "{}", Self::ALL),
            SiteSelection::Site(s) => write!(f, "{s}"),
        }
    }
}

/// Inclusive payload interval in kilograms. An interval with `low > high`
/// contains nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, mass: f64) -> bool {
        self.low <= mass && mass <= self.high
    }
}

impl fmt::Display for PayloadRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}] kg", self.low, self.high)
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full, immutable launch table with pre-computed summaries.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    payload_bounds: Option<PayloadRange>,
    sites: BTreeSet<String>,
    booster_categories: BTreeSet<String>,
}

impl LaunchDataset {
    /// Build summaries from the loaded records. Record order is preserved.
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let mut sites = BTreeSet::new();
        let mut booster_categories = BTreeSet::new();
        let mut bounds: Option<PayloadRange> = None;

        for rec in &records {
            sites.insert(rec.launch_site.clone());
            booster_categories.insert(rec.booster_version_category.clone());
            let m = rec.payload_mass_kg;
            bounds = Some(match bounds {
                None => PayloadRange::new(m, m),
                Some(b) => PayloadRange::new(b.low.min(m), b.high.max(m)),
            });
        }

        LaunchDataset {
            records,
            payload_bounds: bounds,
            sites,
            booster_categories,
        }
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    /// Global `[min, max]` of the payload column, `None` for an empty table.
    pub fn payload_bounds(&self) -> Option<PayloadRange> {
        self.payload_bounds
    }

    /// Distinct launch sites, sorted.
    pub fn sites(&self) -> &BTreeSet<String> {
        &self.sites
    }

    /// Distinct booster version categories, sorted.
    pub fn booster_categories(&self) -> &BTreeSet<String> {
        &self.booster_categories
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(site: &str, payload: f64, outcome: Outcome, category: &str) -> LaunchRecord {
        LaunchRecord {
            launch_site: site.to_string(),
            payload_mass_kg: payload,
            outcome,
            booster_version_category: category.to_string(),
            booster_version: format!("{category} B10{}", payload as u32 % 10),
        }
    }

    /// The three-launch table used across the data tests.
    pub(crate) fn sample_dataset() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            record("CCAFS LC-40", 500.0, Outcome::Success, "v1.0"),
            record("CCAFS LC-40", 9000.0, Outcome::Failure, "FT"),
            record("KSC LC-39A", 3000.0, Outcome::Success, "FT"),
        ])
    }

    #[test]
    fn summaries_are_computed_from_records() {
        let ds = sample_dataset();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.payload_bounds(), Some(PayloadRange::new(500.0, 9000.0)));
        let sites: Vec<_> = ds.sites().iter().cloned().collect();
        assert_eq!(sites, vec!["CCAFS LC-40", "KSC LC-39A"]);
        assert_eq!(ds.booster_categories().len(), 2);
    }

    #[test]
    fn empty_dataset_has_no_bounds() {
        let ds = LaunchDataset::from_records(Vec::new());
        assert!(ds.is_empty());
        assert_eq!(ds.payload_bounds(), None);
    }

    #[test]
    fn payload_range_is_inclusive() {
        let r = PayloadRange::new(0.0, 1000.0);
        assert!(r.contains(0.0));
        assert!(r.contains(1000.0));
        assert!(!r.contains(1000.5));
        assert!(!PayloadRange::new(5.0, 1.0).contains(3.0));
    }

    #[test]
    fn site_selection_parses_sentinel() {
        assert_eq!(SiteSelection::from_value("ALL"), SiteSelection::All);
        assert_eq!(
            SiteSelection::from_value("KSC LC-39A"),
            SiteSelection::Site("KSC LC-39A".into())
        );
        assert_eq!(SiteSelection::All.to_string(), "ALL");
        assert!(SiteSelection::All.matches("anything"));
        assert!(!SiteSelection::Site("A".into()).matches("B"));
    }

    #[test]
    fn outcome_classes_order_failure_first() {
        assert_eq!(Outcome::Failure.class(), 0);
        assert_eq!(Outcome::Success.class(), 1);
        assert_eq!(u8::from(Outcome::Success), 1);
        assert!(Outcome::Failure < Outcome::Success);
    }
}
