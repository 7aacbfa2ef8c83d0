//! In-memory [`Backend`] fake for view lifecycle tests.

use async_trait::async_trait;
use drive_smart_api::{ApiError, Backend};
use drive_smart_api_models::{
    HeatmapPoint, MapData, MonthlyTrend, MonthlyTrends, PredictionLabel, PredictionRequest,
    PredictionResponse, ReportKind, RiskFactors, RiskSubfactor, SeverityBucket,
    SeverityDistribution,
};

pub(crate) struct MockBackend {
    pub fail_all: bool,
    pub fail_risk_factors: bool,
    pub fail_predict: bool,
    pub locations: Vec<HeatmapPoint>,
    pub api_key: Option<String>,
}

impl MockBackend {
    pub fn healthy() -> Self {
        Self {
            fail_all: false,
            fail_risk_factors: false,
            fail_predict: false,
            locations: vec![
                HeatmapPoint {
                    lat: 53.0,
                    lng: -1.0,
                },
                HeatmapPoint {
                    lat: 52.5,
                    lng: -1.5,
                },
                HeatmapPoint {
                    lat: 53.0,
                    lng: -1.0,
                },
            ],
            api_key: Some("test-key".to_string()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::healthy()
        }
    }

    fn error() -> ApiError {
        ApiError::Status {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn map_data(&self) -> Result<MapData, ApiError> {
        if self.fail_all {
            return Err(Self::error());
        }
        Ok(MapData {
            api_key: self.api_key.clone(),
            locations: self.locations.clone(),
        })
    }

    async fn predict(
        &self,
        _request: &PredictionRequest,
    ) -> Result<PredictionResponse, ApiError> {
        if self.fail_all || self.fail_predict {
            return Err(Self::error());
        }
        Ok(PredictionResponse {
            prediction: Some(PredictionLabel::Text("2".to_string())),
            confidence: Some(87.4),
        })
    }

    async fn severity_distribution(&self) -> Result<SeverityDistribution, ApiError> {
        if self.fail_all {
            return Err(Self::error());
        }
        let bucket = |level: &str, count| SeverityBucket {
            severity_level: level.to_string(),
            count,
            percentage: None,
        };
        Ok(SeverityDistribution {
            distribution: vec![
                bucket("Fatal", 50),
                bucket("Serious", 30),
                bucket("Slight", 20),
            ],
            total_incidents: 100,
        })
    }

    async fn monthly_trends(&self) -> Result<MonthlyTrends, ApiError> {
        if self.fail_all {
            return Err(Self::error());
        }
        Ok(MonthlyTrends {
            trends: vec![
                MonthlyTrend {
                    month: "2024-01".to_string(),
                    incidents: 40,
                },
                MonthlyTrend {
                    month: "2024-02".to_string(),
                    incidents: 60,
                },
            ],
        })
    }

    async fn risk_factors(&self) -> Result<RiskFactors, ApiError> {
        if self.fail_all || self.fail_risk_factors {
            return Err(Self::error());
        }
        let mut factors = RiskFactors::default();
        factors.factors.insert(
            "weather".to_string(),
            [3, 7, 2]
                .into_iter()
                .map(|count| RiskSubfactor {
                    count,
                    ..RiskSubfactor::default()
                })
                .collect(),
        );
        Ok(factors)
    }

    async fn report(&self, kind: ReportKind) -> Result<serde_json::Value, ApiError> {
        if self.fail_all {
            return Err(Self::error());
        }
        Ok(match kind {
            ReportKind::MonthlySafety => serde_json::json!({
                "total_incidents": 120,
                "total_casualties": 150,
                "statistics": { "avg_incidents_per_month": 10.0 },
                "trends": [{
                    "month_name": "January",
                    "incidents": 12,
                    "casualties": 15,
                    "severity_breakdown": { "fatal": 1, "severe": 4, "slight": 7 }
                }]
            }),
            ReportKind::HotspotAnalysis => serde_json::json!({
                "total_unique_hotspots": 2,
                "top_hotspots": [{
                    "location_name": "High Street",
                    "incidents": 9,
                    "casualties": 11,
                    "risk_level": "High"
                }],
                "recommendations": ["Install traffic calming"]
            }),
            ReportKind::EmergencyResponse => serde_json::json!({
                "police_response": {
                    "overall_response_rate": 81.5,
                    "by_police_force": [{
                        "force_name": "Metropolitan Police",
                        "total_incidents": 40,
                        "attended": 33,
                        "not_attended": 7,
                        "response_rate": 82.5
                    }]
                }
            }),
        })
    }
}
