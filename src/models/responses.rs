use serde::{Deserialize, Serialize};
use crate::models::domain::ScoredCandidate;

/// Response for the rank endpoint
#[derive(Debug, Clone, Serialize)]
pub struct RankResponse<'a> {
    pub matches: Vec<ScoredCandidate<'a>>,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
    #[serde(rename = "fallbackCount")]
    pub fallback_count: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Session refresh response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshSessionResponse {
    pub success: bool,
}
