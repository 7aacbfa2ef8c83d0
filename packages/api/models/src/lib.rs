#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Request and response types for the DriveSmart backend API.
//!
//! Every field the backend may omit carries a `#[serde(default)]` so that a
//! partial payload deserializes to documented defaults (`0`, empty list,
//! `None`) instead of failing. Rendering code never has to guard against
//! missing fields; the contract with the backend is isolated here.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single heatmap point in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatmapPoint {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
}

/// Response of `GET /api/mapdata`: the mapping provider API key plus the
/// heatmap point list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MapData {
    /// API key for the external mapping/geocoding provider.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Heatmap locations.
    #[serde(default)]
    pub locations: Vec<HeatmapPoint>,
}

/// One bucket of the severity distribution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeverityBucket {
    /// Severity name as reported by the backend (`"Fatal"`, `"Serious"`,
    /// `"Slight"`).
    #[serde(default)]
    pub severity_level: String,
    /// Incident count in this bucket.
    #[serde(default)]
    pub count: u64,
    /// Share of the total, when the backend includes it.
    #[serde(default)]
    pub percentage: Option<f64>,
}

/// Response of `GET /api/reports/severity-distribution`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeverityDistribution {
    /// Per-severity buckets.
    #[serde(default)]
    pub distribution: Vec<SeverityBucket>,
    /// Total incidents across all buckets.
    #[serde(default)]
    pub total_incidents: u64,
}

/// Named severity counts for the summary cards.
///
/// Derived from a [`SeverityDistribution`] by matching `severity_level`
/// against the three fixed names; unmatched or missing buckets stay at 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    /// Fatal incident count.
    pub fatal: u64,
    /// Serious incident count.
    pub serious: u64,
    /// Slight incident count.
    pub slight: u64,
    /// Total incidents reported by the backend.
    pub total: u64,
}

impl SeverityCounts {
    /// Extracts named counts from a severity distribution.
    #[must_use]
    pub fn from_distribution(dist: &SeverityDistribution) -> Self {
        let mut counts = Self {
            total: dist.total_incidents,
            ..Self::default()
        };
        for bucket in &dist.distribution {
            match bucket.severity_level.as_str() {
                "Fatal" => counts.fatal = bucket.count,
                "Serious" => counts.serious = bucket.count,
                "Slight" => counts.slight = bucket.count,
                _ => {}
            }
        }
        counts
    }
}

/// One month of the incident trend series.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonthlyTrend {
    /// Month as `"YYYY-MM"`.
    #[serde(default)]
    pub month: String,
    /// Incident count for the month.
    #[serde(default)]
    pub incidents: u64,
}

/// Response of `GET /api/reports/monthly-trends`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonthlyTrends {
    /// Ordered month series.
    #[serde(default)]
    pub trends: Vec<MonthlyTrend>,
}

/// One contributing subfactor within a risk-factor category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RiskSubfactor {
    /// Subfactor name, when the backend labels it `factor`.
    #[serde(default)]
    pub factor: Option<String>,
    /// Subfactor name, when the backend labels it `name`.
    #[serde(default)]
    pub name: Option<String>,
    /// Incident count attributed to this subfactor.
    #[serde(default)]
    pub count: u64,
}

impl RiskSubfactor {
    /// Display label, preferring `factor` over `name`.
    #[must_use]
    pub fn label(&self) -> &str {
        self.factor
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("N/A")
    }
}

/// Response of `GET /api/reports/risk-factors`: subfactor tallies grouped
/// by category (weather, road surface, ...).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RiskFactors {
    /// Subfactors keyed by category label.
    #[serde(default)]
    pub factors: BTreeMap<String, Vec<RiskSubfactor>>,
}

/// Request body of `POST /api/predict`.
///
/// Categorical fields are sent as the backend's textual codes (`"car"`,
/// `"clear"`, ...); the backend maps them to model features itself. The two
/// age fields carry the natural log of the entered integer because the
/// remote model was trained on log-transformed ages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRequest {
    /// Whether a police officer attended (`"0"` / `"1"`).
    #[serde(rename = "Did_Police_Officer_Attend")]
    pub did_police_officer_attend: String,
    /// Natural log of the driver's age.
    pub age_of_driver: f64,
    /// Vehicle type code (`"car"`, `"bike"`, `"truck"`, `"bus"`).
    pub vehicle: String,
    /// Natural log of the vehicle's age in years.
    pub age_of_vehicle: f64,
    /// Engine size in cc.
    pub engine_cc: f64,
    /// Day-of-week code.
    pub day: String,
    /// Weather code (`"clear"`, `"rain"`, `"fog"`, `"snow"`).
    pub weather: String,
    /// Light condition code.
    pub light: String,
    /// Road surface code (`"dry"`, `"wet"`, `"ice"`, `"pothole"`).
    pub roadsc: String,
    /// Gender code.
    pub gender: String,
    /// Speed limit in km/h.
    pub speedl: f64,
}

/// The predicted class label: the model emits numeric labels but the
/// endpoint may stringify them, so both forms are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PredictionLabel {
    /// Label already delivered as text.
    Text(String),
    /// Raw numeric class label.
    Number(f64),
}

impl PredictionLabel {
    /// Canonical textual form of the label (`1.0` becomes `"1"`).
    #[must_use]
    pub fn as_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) if n.fract() == 0.0 => {
                #[allow(clippy::cast_possible_truncation)]
                let whole = *n as i64;
                whole.to_string()
            }
            Self::Number(n) => n.to_string(),
        }
    }
}

/// Response of `POST /api/predict`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictionResponse {
    /// Predicted class label; absent when the backend had no model loaded.
    #[serde(default)]
    pub prediction: Option<PredictionLabel>,
    /// Confidence in percent, when the model exposes probabilities.
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// The three pre-built report documents the backend can produce.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    /// Month-by-month safety summary.
    MonthlySafety,
    /// High-risk location analysis.
    HotspotAnalysis,
    /// Police response metrics.
    EmergencyResponse,
}

impl ReportKind {
    /// All report kinds, in menu order.
    pub const ALL: &[Self] = &[
        Self::MonthlySafety,
        Self::HotspotAnalysis,
        Self::EmergencyResponse,
    ];

    /// Backend endpoint path for this report.
    #[must_use]
    pub fn endpoint_path(self) -> String {
        format!("/api/reports/{self}")
    }

    /// Human-readable report title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::MonthlySafety => "Monthly Safety Report",
            Self::HotspotAnalysis => "Hotspot Analysis Report",
            Self::EmergencyResponse => "Emergency Response Metrics",
        }
    }

    /// One-line description shown in the report picker.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::MonthlySafety => "Comprehensive analysis of accident trends",
            Self::HotspotAnalysis => "High-risk zones and recommendations",
            Self::EmergencyResponse => "Response time and resource allocation data",
        }
    }
}

/// Per-severity breakdown nested inside report rows.
///
/// Note the middle level is named `severe` here (not `serious`); that is
/// what the report generator emits.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SeverityBreakdown {
    /// Fatal incidents.
    #[serde(default)]
    pub fatal: u64,
    /// Severe incidents.
    #[serde(default)]
    pub severe: u64,
    /// Slight incidents.
    #[serde(default)]
    pub slight: u64,
}

/// Aggregate statistics block of the monthly safety report.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SafetyStatistics {
    /// Mean incidents per month over the covered period.
    #[serde(default)]
    pub avg_incidents_per_month: f64,
}

/// One month row of the monthly safety report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SafetyTrendRow {
    /// Month as a human-readable name, when present.
    #[serde(default)]
    pub month_name: Option<String>,
    /// Month as `"YYYY-MM"`, when `month_name` is absent.
    #[serde(default)]
    pub month: Option<String>,
    /// Incidents in the month.
    #[serde(default)]
    pub incidents: u64,
    /// Casualties in the month.
    #[serde(default)]
    pub casualties: u64,
    /// Severity breakdown for the month.
    #[serde(default)]
    pub severity_breakdown: SeverityBreakdown,
}

impl SafetyTrendRow {
    /// Month label, preferring the pre-formatted name.
    #[must_use]
    pub fn month_label(&self) -> &str {
        self.month_name
            .as_deref()
            .or(self.month.as_deref())
            .unwrap_or("N/A")
    }
}

/// `GET /api/reports/monthly-safety` payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonthlySafetyReport {
    /// Total incidents over the covered period.
    #[serde(default)]
    pub total_incidents: u64,
    /// Total casualties over the covered period.
    #[serde(default)]
    pub total_casualties: u64,
    /// Aggregate statistics.
    #[serde(default)]
    pub statistics: SafetyStatistics,
    /// Month-by-month rows.
    #[serde(default)]
    pub trends: Vec<SafetyTrendRow>,
}

/// One hotspot row of the hotspot analysis report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HotspotRow {
    /// Raw location key (often a coordinate pair).
    #[serde(default)]
    pub location: Option<String>,
    /// Geocoded human-readable location name.
    #[serde(default)]
    pub location_name: Option<String>,
    /// Incidents at this hotspot.
    #[serde(default)]
    pub incidents: u64,
    /// Casualties at this hotspot.
    #[serde(default)]
    pub casualties: u64,
    /// Qualitative risk level (e.g. `"High"`).
    #[serde(default)]
    pub risk_level: Option<String>,
    /// Severity breakdown at this hotspot.
    #[serde(default)]
    pub severity_breakdown: SeverityBreakdown,
}

impl HotspotRow {
    /// Display name, preferring the geocoded name over the raw key.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.location_name
            .as_deref()
            .or(self.location.as_deref())
            .unwrap_or("N/A")
    }
}

/// `GET /api/reports/hotspot-analysis` payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HotspotReport {
    /// Number of distinct hotspot locations.
    #[serde(default)]
    pub total_unique_hotspots: u64,
    /// Highest-count hotspots, descending.
    #[serde(default)]
    pub top_hotspots: Vec<HotspotRow>,
    /// Free-text safety recommendations.
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// One police-force row of the emergency response report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoliceForceRow {
    /// Police force name.
    #[serde(default)]
    pub force_name: Option<String>,
    /// Incidents recorded by this force.
    #[serde(default)]
    pub total_incidents: u64,
    /// Incidents where an officer attended.
    #[serde(default)]
    pub attended: u64,
    /// Incidents with no attendance.
    #[serde(default)]
    pub not_attended: u64,
    /// Attendance rate in percent.
    #[serde(default)]
    pub response_rate: Option<f64>,
}

/// Police response block of the emergency response report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoliceResponse {
    /// Overall attendance rate in percent.
    #[serde(default)]
    pub overall_response_rate: Option<f64>,
    /// Per-force rows.
    #[serde(default)]
    pub by_police_force: Vec<PoliceForceRow>,
}

/// `GET /api/reports/emergency-response` payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmergencyResponseReport {
    /// Police response metrics.
    #[serde(default)]
    pub police_response: PoliceResponse,
    /// Optional resource allocation advice, shape not fixed.
    #[serde(default)]
    pub resource_allocation_recommendations: Option<serde_json::Value>,
}

/// A fetched report, decoded into its kind-specific shape when possible.
#[derive(Debug, Clone)]
pub enum ReportDocument {
    /// Monthly safety report.
    MonthlySafety(MonthlySafetyReport),
    /// Hotspot analysis report.
    HotspotAnalysis(HotspotReport),
    /// Emergency response report.
    EmergencyResponse(EmergencyResponseReport),
    /// Payload did not match the expected shape; kept for raw display.
    Raw(serde_json::Value),
}

impl ReportDocument {
    /// Decodes a raw report payload according to the selected kind.
    ///
    /// A payload that does not match the kind's expected shape is kept as
    /// [`Self::Raw`] so the caller can still show it.
    #[must_use]
    pub fn decode(kind: ReportKind, value: serde_json::Value) -> Self {
        let result = match kind {
            ReportKind::MonthlySafety => {
                serde_json::from_value(value.clone()).map(Self::MonthlySafety)
            }
            ReportKind::HotspotAnalysis => {
                serde_json::from_value(value.clone()).map(Self::HotspotAnalysis)
            }
            ReportKind::EmergencyResponse => {
                serde_json::from_value(value.clone()).map(Self::EmergencyResponse)
            }
        };
        result.unwrap_or(Self::Raw(value))
    }
}
