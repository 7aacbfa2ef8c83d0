#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! HTTP client for the DriveSmart backend.
//!
//! Every view issues its reads and the single predict write through
//! [`ApiClient`]. The [`Backend`] trait sits between the views and the HTTP
//! layer so view lifecycles can be exercised against in-memory fakes.
//!
//! The backend origin defaults to a fixed development address and can be
//! overridden with the `DRIVE_SMART_BACKEND` environment variable.

use async_trait::async_trait;
use drive_smart_api_models::{
    MapData, MonthlyTrends, PredictionRequest, PredictionResponse, ReportKind, RiskFactors,
    SeverityDistribution,
};
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Default backend origin when `DRIVE_SMART_BACKEND` is not set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:4000";

/// Errors from backend API calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport or body decoding failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("backend returned {status}")]
    Status {
        /// The HTTP status code.
        status: reqwest::StatusCode,
    },
}

/// Read/write operations the dashboard needs from the backend.
///
/// Implemented by [`ApiClient`] over HTTP; tests implement it in memory.
#[async_trait]
pub trait Backend: Send + Sync {
    /// `GET /api/mapdata`: mapping API key plus heatmap point list.
    async fn map_data(&self) -> Result<MapData, ApiError>;

    /// `POST /api/predict`: severity prediction for one set of conditions.
    async fn predict(&self, request: &PredictionRequest)
    -> Result<PredictionResponse, ApiError>;

    /// `GET /api/reports/severity-distribution`.
    async fn severity_distribution(&self) -> Result<SeverityDistribution, ApiError>;

    /// `GET /api/reports/monthly-trends`.
    async fn monthly_trends(&self) -> Result<MonthlyTrends, ApiError>;

    /// `GET /api/reports/risk-factors`.
    async fn risk_factors(&self) -> Result<RiskFactors, ApiError>;

    /// `GET` one of the pre-built report documents, undecoded.
    async fn report(&self, kind: ReportKind) -> Result<serde_json::Value, ApiError>;
}

/// The three analytics payloads, fetched together.
#[derive(Debug, Clone)]
pub struct AnalyticsBundle {
    /// Monthly incident trend series.
    pub trends: MonthlyTrends,
    /// Risk subfactor tallies by category.
    pub factors: RiskFactors,
    /// Severity distribution.
    pub distribution: SeverityDistribution,
}

/// Fetches the three analytics endpoints concurrently.
///
/// All-or-nothing: the first rejection aborts the whole bundle, so callers
/// never render a partial analytics view.
///
/// # Errors
///
/// Returns the first [`ApiError`] any of the three fetches produced.
pub async fn fetch_analytics_bundle<B: Backend + ?Sized>(
    backend: &B,
) -> Result<AnalyticsBundle, ApiError> {
    let (trends, factors, distribution) = futures::try_join!(
        backend.monthly_trends(),
        backend.risk_factors(),
        backend.severity_distribution(),
    )?;
    Ok(AnalyticsBundle {
        trends,
        factors,
        distribution,
    })
}

/// HTTP client for the DriveSmart backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client against the given backend origin.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: normalize_base_url(&base_url.into()),
        }
    }

    /// Creates a client from `DRIVE_SMART_BACKEND`, falling back to
    /// [`DEFAULT_BASE_URL`].
    #[must_use]
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("DRIVE_SMART_BACKEND").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    /// The backend origin this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{path}", self.base_url);
        log::debug!("GET {url}");
        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Status { status });
        }
        Ok(resp.json().await?)
    }
}

#[async_trait]
impl Backend for ApiClient {
    async fn map_data(&self) -> Result<MapData, ApiError> {
        self.get_json("/api/mapdata").await
    }

    async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResponse, ApiError> {
        let url = format!("{}/api/predict", self.base_url);
        log::debug!("POST {url}");
        let resp = self.client.post(&url).json(request).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Status { status });
        }
        Ok(resp.json().await?)
    }

    async fn severity_distribution(&self) -> Result<SeverityDistribution, ApiError> {
        self.get_json("/api/reports/severity-distribution").await
    }

    async fn monthly_trends(&self) -> Result<MonthlyTrends, ApiError> {
        self.get_json("/api/reports/monthly-trends").await
    }

    async fn risk_factors(&self) -> Result<RiskFactors, ApiError> {
        self.get_json("/api/reports/risk-factors").await
    }

    async fn report(&self, kind: ReportKind) -> Result<serde_json::Value, ApiError> {
        self.get_json(&kind.endpoint_path()).await
    }
}

/// Strips trailing slashes so path concatenation stays predictable.
fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use drive_smart_api_models::MonthlyTrend;

    struct FakeBackend {
        fail_risk_factors: bool,
    }

    #[async_trait]
    impl Backend for FakeBackend {
        async fn map_data(&self) -> Result<MapData, ApiError> {
            Ok(MapData::default())
        }

        async fn predict(
            &self,
            _request: &PredictionRequest,
        ) -> Result<PredictionResponse, ApiError> {
            Ok(PredictionResponse::default())
        }

        async fn severity_distribution(&self) -> Result<SeverityDistribution, ApiError> {
            Ok(SeverityDistribution {
                total_incidents: 3,
                ..SeverityDistribution::default()
            })
        }

        async fn monthly_trends(&self) -> Result<MonthlyTrends, ApiError> {
            Ok(MonthlyTrends {
                trends: vec![MonthlyTrend {
                    month: "2024-01".to_string(),
                    incidents: 3,
                }],
            })
        }

        async fn risk_factors(&self) -> Result<RiskFactors, ApiError> {
            if self.fail_risk_factors {
                Err(ApiError::Status {
                    status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                })
            } else {
                Ok(RiskFactors::default())
            }
        }

        async fn report(&self, _kind: ReportKind) -> Result<serde_json::Value, ApiError> {
            Ok(serde_json::json!({}))
        }
    }

    #[tokio::test]
    async fn bundle_joins_all_three_endpoints() {
        let backend = FakeBackend {
            fail_risk_factors: false,
        };
        let bundle = fetch_analytics_bundle(&backend).await.unwrap();
        assert_eq!(bundle.trends.trends.len(), 1);
        assert_eq!(bundle.distribution.total_incidents, 3);
    }

    #[tokio::test]
    async fn bundle_is_all_or_nothing() {
        let backend = FakeBackend {
            fail_risk_factors: true,
        };
        assert!(fetch_analytics_bundle(&backend).await.is_err());
    }

    #[test]
    fn trailing_slashes_are_stripped() {
        assert_eq!(
            normalize_base_url("http://localhost:4000/"),
            "http://localhost:4000"
        );
        assert_eq!(
            ApiClient::new("http://localhost:4000//").base_url(),
            "http://localhost:4000"
        );
    }
}
