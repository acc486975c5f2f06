//! Admin dashboard aggregation
//!
//! Turns the live report collection into what the map shows: a heat circle
//! per open report, a marker per located report, and the region to frame.
//! Everything here is a pure function of the reports passed in.

use serde::Serialize;

use crate::error::{FixMyCityError, Result};
use crate::store::ReportStore;
use crate::types::{IssueType, Location, Report, ReportId, Status};

/// Map span when framing the whole city
pub const OVERVIEW_DELTA: f64 = 0.1;
/// Map span when zoomed onto a single report
pub const FOCUS_DELTA: f64 = 0.01;

const MIN_RADIUS_M: f64 = 100.0;
const BASE_RADIUS_M: f64 = 200.0;
const RADIUS_PER_UPVOTE_M: f64 = 150.0;
const BASE_OPACITY: f64 = 0.15;
const OPACITY_PER_UPVOTE: f64 = 0.1;
const MAX_OPACITY: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayColor {
    /// In Progress
    Amber,
    /// Submitted
    Red,
}

impl OverlayColor {
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Self::Amber => (255, 165, 0),
            Self::Red => (255, 0, 0),
        }
    }
}

/// Translucent circle sized and shaded by community support
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatCircle {
    pub report_id: ReportId,
    pub center: Location,
    /// Meters
    pub radius: f64,
    pub opacity: f64,
    pub color: OverlayColor,
}

impl HeatCircle {
    /// CSS-style fill, e.g. `rgba(255,165,0,0.45)`
    pub fn rgba(&self) -> String {
        let (r, g, b) = self.color.rgb();
        format!("rgba({},{},{},{})", r, g, b, self.opacity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub report_id: ReportId,
    pub coordinate: Location,
    pub title: IssueType,
    pub description: String,
    pub status: Status,
}

/// Visible map area
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Region {
    pub center: Location,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl Region {
    pub fn around(center: Location, delta: f64) -> Self {
        Self {
            center,
            latitude_delta: delta,
            longitude_delta: delta,
        }
    }
}

/// Heat circle for one report, or `None` if it is resolved or unlocated
pub fn heat_circle(report: &Report) -> Option<HeatCircle> {
    if report.status == Status::Resolved {
        return None;
    }
    let center = report.location?;
    let upvotes = report.upvotes as f64;

    let radius = (upvotes * RADIUS_PER_UPVOTE_M + BASE_RADIUS_M).max(MIN_RADIUS_M);
    // Heavily downvoted reports fade out entirely.
    let opacity = (BASE_OPACITY + (upvotes * OPACITY_PER_UPVOTE).min(1.0)).clamp(0.0, MAX_OPACITY);
    let color = match report.status {
        Status::InProgress => OverlayColor::Amber,
        _ => OverlayColor::Red,
    };

    Some(HeatCircle {
        report_id: report.id,
        center,
        radius,
        opacity,
        color,
    })
}

pub fn heat_circles(reports: &[Report]) -> Vec<HeatCircle> {
    reports.iter().filter_map(heat_circle).collect()
}

/// One marker per report with a location, whatever its status
pub fn markers(reports: &[Report]) -> Vec<Marker> {
    reports
        .iter()
        .filter_map(|report| {
            report.location.map(|coordinate| Marker {
                report_id: report.id,
                coordinate,
                title: report.issue_type,
                description: report.description.clone(),
                status: report.status,
            })
        })
        .collect()
}

/// Frame the most recent report, or `default_center` if it has no location
pub fn initial_region(reports: &[Report], default_center: Location) -> Region {
    let center = reports
        .first()
        .and_then(|report| report.location)
        .unwrap_or(default_center);
    Region::around(center, OVERVIEW_DELTA)
}

/// Zoom onto one report
///
/// # Errors
///
/// Returns `FixMyCityError::NoLocation` if the report was filed without one.
pub fn focus_on(report: &Report) -> Result<Region> {
    report
        .location
        .map(|center| Region::around(center, FOCUS_DELTA))
        .ok_or(FixMyCityError::NoLocation)
}

/// Everything the dashboard draws, from one snapshot
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub reports: Vec<Report>,
    pub heat_circles: Vec<HeatCircle>,
    pub markers: Vec<Marker>,
    pub region: Region,
}

#[derive(Clone)]
pub struct DashboardService {
    store: ReportStore,
    default_center: Location,
}

impl DashboardService {
    pub fn new(store: ReportStore, default_center: Location) -> Self {
        Self {
            store,
            default_center,
        }
    }

    pub fn view(&self) -> DashboardView {
        let reports = self.store.list();
        DashboardView {
            heat_circles: heat_circles(&reports),
            markers: markers(&reports),
            region: initial_region(&reports, self.default_center),
            reports,
        }
    }

    pub fn focus(&self, id: ReportId) -> Result<Region> {
        let report = self.store.get(id).ok_or(FixMyCityError::NotFound(id))?;
        focus_on(&report)
    }
}
