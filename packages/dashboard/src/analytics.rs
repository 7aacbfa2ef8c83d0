//! Analytics screen: trend bars, top risk factors, severity pie.

use drive_smart_analytics::{MonthBar, PieSlice, RiskFactorSummary};
use drive_smart_api::{AnalyticsBundle, ApiError, Backend, fetch_analytics_bundle};

use crate::ViewState;

/// Render props for the analytics screen, derived once per activation.
#[derive(Debug, Clone)]
pub struct AnalyticsProps {
    /// Trend-chart bars, one per month.
    pub bars: Vec<MonthBar>,
    /// Top subfactor count per risk category.
    pub factors: Vec<RiskFactorSummary>,
    /// Severity pie arcs.
    pub pie: Vec<PieSlice>,
    /// Total incidents behind the pie.
    pub total_incidents: u64,
}

/// The analytics view.
///
/// Its three fetches are joined all-or-nothing; one rejection fails the
/// whole activation with a single error and nothing partial is rendered.
#[derive(Debug, Default)]
pub struct AnalyticsView {
    seq: u64,
    state: ViewState<AnalyticsProps>,
}

impl AnalyticsView {
    /// Creates the view in its loading state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> &ViewState<AnalyticsProps> {
        &self.state
    }

    /// Fetches the three analytics payloads and derives the chart props.
    pub async fn activate<B: Backend + ?Sized>(&mut self, backend: &B) {
        self.seq += 1;
        let seq = self.seq;
        self.state = ViewState::Loading;
        let result = fetch_analytics_bundle(backend).await;
        self.apply(seq, result);
    }

    fn apply(&mut self, seq: u64, result: Result<AnalyticsBundle, ApiError>) {
        if seq != self.seq {
            log::debug!("dropping stale analytics response");
            return;
        }
        self.state = match result {
            Ok(bundle) => ViewState::Ready(AnalyticsProps {
                bars: drive_smart_analytics::monthly_bars(&bundle.trends),
                factors: drive_smart_analytics::top_risk_factors(&bundle.factors),
                pie: drive_smart_analytics::severity_pie(&bundle.distribution),
                total_incidents: bundle.distribution.total_incidents,
            }),
            Err(e) => ViewState::Error(e.to_string()),
        };
    }
}
