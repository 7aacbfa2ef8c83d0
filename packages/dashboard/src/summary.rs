//! Summary cards: aggregate severity counts.

use drive_smart_api::Backend;
use drive_smart_api_models::{SeverityCounts, SeverityDistribution};

use crate::ViewState;

/// The dashboard's summary-card view.
///
/// One GET per activation; a failed fetch is terminal for that activation.
#[derive(Debug, Default)]
pub struct SummaryView {
    seq: u64,
    state: ViewState<SeverityCounts>,
}

impl SummaryView {
    /// Creates the view in its loading state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> &ViewState<SeverityCounts> {
        &self.state
    }

    /// Fetches the severity distribution and reshapes it into card counts.
    pub async fn activate<B: Backend + ?Sized>(&mut self, backend: &B) {
        self.seq += 1;
        let seq = self.seq;
        self.state = ViewState::Loading;
        let result = backend.severity_distribution().await;
        self.apply(seq, result);
    }

    fn apply(
        &mut self,
        seq: u64,
        result: Result<SeverityDistribution, drive_smart_api::ApiError>,
    ) {
        if seq != self.seq {
            log::debug!("dropping stale summary response");
            return;
        }
        self.state = match result {
            Ok(distribution) => ViewState::Ready(SeverityCounts::from_distribution(&distribution)),
            Err(e) => ViewState::Error(e.to_string()),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockBackend;

    #[tokio::test]
    async fn renders_named_counts_from_distribution() {
        let backend = MockBackend::healthy();
        let mut view = SummaryView::new();
        view.activate(&backend).await;

        let counts = view.state().ready().copied().unwrap();
        assert_eq!(counts.fatal, 50);
        assert_eq!(counts.serious, 30);
        assert_eq!(counts.slight, 20);
        assert_eq!(counts.total, 100);
    }

    #[tokio::test]
    async fn rejected_fetch_is_a_terminal_error() {
        let backend = MockBackend::failing();
        let mut view = SummaryView::new();
        view.activate(&backend).await;

        assert!(view.state().error().is_some());
    }
}
