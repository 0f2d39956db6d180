use std::collections::BTreeMap;
use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::Color32;

use crate::color::{outcome_color, ColorMap};
use crate::data::aggregate::SiteSuccess;
use crate::data::filter::ScatterPoint;
use crate::data::model::{Outcome, SiteSelection};

// ---------------------------------------------------------------------------
// Figures – renderer-independent chart descriptions
// ---------------------------------------------------------------------------

/// Output of a chart binding.
#[derive(Debug, Clone, PartialEq)]
pub enum Figure {
    Pie(PieFigure),
    Scatter(ScatterFigure),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: usize,
    pub color: Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieFigure {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

/// One point of the scatter plot, with the hover details.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterDot {
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub launch_site: String,
    pub booster_version: String,
}

/// Points sharing a booster version category; one legend entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub category: String,
    pub color: Color32,
    pub dots: Vec<ScatterDot>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterFigure {
    pub title: String,
    pub series: Vec<ScatterSeries>,
}

// ---------------------------------------------------------------------------
// Pie
// ---------------------------------------------------------------------------

/// Points per full turn used to approximate arcs.
const ARC_RESOLUTION: usize = 96;

/// Label radius as a fraction of the pie radius.
const LABEL_RADIUS: f64 = 0.62;

pub fn pie_figure(agg: &SiteSuccess, selection: &SiteSelection, site_colors: &ColorMap) -> PieFigure {
    let (title, slices) = match agg {
        SiteSuccess::BySite(counts) => (
            "Total Success Launches by Site".to_string(),
            counts
                .iter()
                .map(|(site, &value)| PieSlice {
                    label: site.clone(),
                    value,
                    color: site_colors.color_for(site),
                })
                .collect(),
        ),
        SiteSuccess::ByOutcome(counts) => (
            format!("Launch Success Rate for {}", selection.label()),
            counts
                .iter()
                .map(|(&outcome, &value)| PieSlice {
                    label: outcome.to_string(),
                    value,
                    color: outcome_color(outcome),
                })
                .collect(),
        ),
    };
    PieFigure { title, slices }
}

/// Angle (radians) of a turn fraction; the pie starts at twelve o'clock and
/// runs clockwise.
fn angle_at(fraction: f64) -> f64 {
    FRAC_PI_2 - TAU * fraction
}

fn point_at(fraction: f64, radius: f64) -> [f64; 2] {
    let a = angle_at(fraction);
    [radius * a.cos(), radius * a.sin()]
}

/// A laid-out slice: turn fractions `[start, end)`, convex fill polygons and
/// a label anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct Wedge {
    pub start: f64,
    pub end: f64,
    pub polygons: Vec<Vec<[f64; 2]>>,
    pub label_at: [f64; 2],
}

impl Wedge {
    pub fn percent(&self) -> f64 {
        (self.end - self.start) * 100.0
    }
}

/// Split `[start, end)` into pieces of at most a quarter turn so every fill
/// polygon stays convex.
fn wedge_polygons(start: f64, end: f64) -> Vec<Vec<[f64; 2]>> {
    let mut polygons = Vec::new();
    let mut from = start;
    while end - from > f64::EPSILON {
        let to = (from + 0.25).min(end);
        let steps = (((to - from) * ARC_RESOLUTION as f64).ceil() as usize).max(2);
        let mut poly = Vec::with_capacity(steps + 2);
        poly.push([0.0, 0.0]);
        for i in 0..=steps {
            poly.push(point_at(from + (to - from) * i as f64 / steps as f64, 1.0));
        }
        polygons.push(poly);
        from = to;
    }
    polygons
}

impl PieFigure {
    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.value).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Lay out the slices around the unit circle, in slice order.
    pub fn wedges(&self) -> Vec<Wedge> {
        let total = self.total();
        if total == 0 {
            return Vec::new();
        }
        let mut start = 0.0;
        self.slices
            .iter()
            .map(|slice| {
                let end = start + slice.value as f64 / total as f64;
                let wedge = Wedge {
                    start,
                    end,
                    polygons: wedge_polygons(start, end),
                    label_at: point_at((start + end) / 2.0, LABEL_RADIUS),
                };
                start = end;
                wedge
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Scatter
// ---------------------------------------------------------------------------

pub fn scatter_title(selection: &SiteSelection) -> String {
    match selection {
        SiteSelection::All => "Payload vs Launch Success (All Sites)".to_string(),
        SiteSelection::Site(site) => format!("Payload vs Launch Success ({site})"),
    }
}

/// Group filtered points by booster category, one series per category.
pub fn scatter_figure(
    points: &[ScatterPoint<'_>],
    selection: &SiteSelection,
    category_colors: &ColorMap,
) -> ScatterFigure {
    let mut groups: BTreeMap<&str, Vec<ScatterDot>> = BTreeMap::new();
    for p in points {
        groups.entry(p.booster_category()).or_default().push(ScatterDot {
            payload_mass_kg: p.payload_mass_kg(),
            outcome: p.outcome(),
            launch_site: p.record.launch_site.clone(),
            booster_version: p.record.booster_version.clone(),
        });
    }

    ScatterFigure {
        title: scatter_title(selection),
        series: groups
            .into_iter()
            .map(|(category, dots)| ScatterSeries {
                category: category.to_string(),
                color: category_colors.color_for(category),
                dots,
            })
            .collect(),
    }
}

impl ScatterFigure {
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.dots.len()).sum()
    }

    /// Hover text for the point of `category` at plot coordinates `(x, y)`.
    pub fn describe(&self, category: &str, x: f64, y: f64) -> Option<String> {
        let series = self.series.iter().find(|s| s.category == category)?;
        let dot = series.dots.iter().min_by(|a, b| {
            let da = (a.payload_mass_kg - x).abs() + (a.outcome.class() as f64 - y).abs();
            let db = (b.payload_mass_kg - x).abs() + (b.outcome.class() as f64 - y).abs();
            da.total_cmp(&db)
        })?;
        Some(format!(
            "{category}\nPayload Mass (kg): {}\nLaunch Outcome: {}\nLaunch Site: {}\nBooster Version: {}",
            dot.payload_mass_kg, dot.outcome, dot.launch_site, dot.booster_version
        ))
    }
}
