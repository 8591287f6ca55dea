use crate::core::matcher::{CompatibilityScorer, ScoreFuture};
use crate::core::scoring::{extract_score, ScoringError};
use crate::models::{CompatibilityRequest, CompatibilityResponse};
use reqwest::Client;
use std::time::Duration;

/// Client for the external AI compatibility backend
///
/// Any failure here is absorbed by the matcher, which substitutes the
/// fallback heuristic for the affected candidate.
pub struct CompatibilityClient {
    base_url: String,
    client: Client,
}

impl CompatibilityClient {
    /// Create a new compatibility client
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, ScoringError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { base_url, client })
    }

    /// Score one requester/candidate pair
    ///
    /// POST /api/match/compatibility
    ///
    /// Returns the raw overall score, expected in `[0, 1]`.
    pub async fn compatibility(&self, request: &CompatibilityRequest) -> Result<f64, ScoringError> {
        let url = format!(
            "{}/api/match/compatibility",
            self.base_url.trim_end_matches('/')
        );

        let response = self.client.post(&url).json(request).send().await?;

        if !response.status().is_success() {
            return Err(ScoringError::Status(response.status().as_u16()));
        }

        let body: CompatibilityResponse = response.json().await?;

        extract_score(&body)
    }
}

impl CompatibilityScorer for CompatibilityClient {
    fn score<'a>(&'a self, request: &'a CompatibilityRequest) -> ScoreFuture<'a> {
        Box::pin(self.compatibility(request))
    }
}
