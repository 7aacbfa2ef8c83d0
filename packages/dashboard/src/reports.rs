//! Reports screen: on-demand fetch of one of three pre-built documents.
//!
//! Selection bumps a request sequence number and a response is applied only
//! if it still carries the current sequence. Switching reports while a
//! fetch is in flight therefore can never render a stale body under the
//! newly selected report's layout.

use drive_smart_api::{ApiError, Backend};
use drive_smart_api_models::{ReportDocument, ReportKind};

use crate::ViewState;

/// A decoded report bound to the selection that requested it.
#[derive(Debug, Clone)]
pub struct ReportPreview {
    /// Which report this is.
    pub kind: ReportKind,
    /// The decoded document (or raw JSON fallback).
    pub document: ReportDocument,
}

/// Token returned by [`ReportsView::select`]; responses are applied against
/// it so stale ones can be dropped.
#[derive(Debug, Clone, Copy)]
pub struct ReportRequest {
    /// The report kind this request is for.
    pub kind: ReportKind,
    seq: u64,
}

/// The reports view.
#[derive(Debug, Default)]
pub struct ReportsView {
    seq: u64,
    selected: Option<ReportKind>,
    state: ViewState<ReportPreview>,
}

impl ReportsView {
    /// Creates the view with nothing selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The report kind the user last selected.
    #[must_use]
    pub const fn selected(&self) -> Option<ReportKind> {
        self.selected
    }

    /// Current lifecycle state. Meaningful only once a report is selected.
    #[must_use]
    pub const fn state(&self) -> &ViewState<ReportPreview> {
        &self.state
    }

    /// Records a new selection and returns the request token for it.
    ///
    /// Any response for an earlier token is stale from this point on.
    pub fn select(&mut self, kind: ReportKind) -> ReportRequest {
        self.seq += 1;
        self.selected = Some(kind);
        self.state = ViewState::Loading;
        ReportRequest {
            kind,
            seq: self.seq,
        }
    }

    /// Applies a fetch result for a previously issued request.
    ///
    /// Returns `false` when the request is stale and the result was
    /// dropped.
    pub fn apply(
        &mut self,
        request: ReportRequest,
        result: Result<serde_json::Value, ApiError>,
    ) -> bool {
        if request.seq != self.seq {
            log::debug!("dropping stale {} report response", request.kind);
            return false;
        }
        self.state = match result {
            Ok(value) => ViewState::Ready(ReportPreview {
                kind: request.kind,
                document: ReportDocument::decode(request.kind, value),
            }),
            Err(e) => ViewState::Error(e.to_string()),
        };
        true
    }

    /// Selects, fetches, and applies in one step.
    pub async fn fetch<B: Backend + ?Sized>(&mut self, backend: &B, kind: ReportKind) {
        let request = self.select(kind);
        let result = backend.report(kind).await;
        self.apply(request, result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockBackend;

    #[tokio::test]
    async fn fetch_decodes_the_selected_kind() {
        let backend = MockBackend::healthy();
        let mut view = ReportsView::new();
        view.fetch(&backend, ReportKind::MonthlySafety).await;

        let preview = view.state().ready().unwrap();
        assert_eq!(preview.kind, ReportKind::MonthlySafety);
        let ReportDocument::MonthlySafety(report) = &preview.document else {
            panic!("expected monthly safety document");
        };
        assert_eq!(report.total_incidents, 120);
    }

    #[tokio::test]
    async fn stale_response_never_renders_under_a_newer_selection() {
        let backend = MockBackend::healthy();
        let mut view = ReportsView::new();

        // First selection's fetch is still in flight when the user switches.
        let first = view.select(ReportKind::HotspotAnalysis);
        let first_body = backend.report(ReportKind::HotspotAnalysis).await;

        let second = view.select(ReportKind::EmergencyResponse);
        let second_body = backend.report(ReportKind::EmergencyResponse).await;

        // The late first response must be dropped.
        assert!(!view.apply(first, first_body));
        assert!(view.state().ready().is_none());

        assert!(view.apply(second, second_body));
        let preview = view.state().ready().unwrap();
        assert_eq!(preview.kind, ReportKind::EmergencyResponse);
        assert!(matches!(
            preview.document,
            ReportDocument::EmergencyResponse(_)
        ));
    }

    #[tokio::test]
    async fn rejected_fetch_surfaces_an_error() {
        let backend = MockBackend::failing();
        let mut view = ReportsView::new();
        view.fetch(&backend, ReportKind::HotspotAnalysis).await;
        assert!(view.state().error().is_some());
        assert_eq!(view.selected(), Some(ReportKind::HotspotAnalysis));
    }
}
