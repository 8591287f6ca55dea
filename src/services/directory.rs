use crate::models::{sample::sample_profiles, UserProfile};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use validator::Validate;

/// Errors that can occur when interacting with the profile backend
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Profile backend client
///
/// Handles:
/// - Listing the candidate pool (`GET /api/users`)
/// - Fetching a single profile (`GET /api/users/{id}`)
/// - Serving the built-in sample pool when the backend is unreachable
pub struct DirectoryClient {
    base_url: String,
    client: Client,
    fallback: Vec<UserProfile>,
}

impl DirectoryClient {
    /// Create a new directory client backed by the built-in sample pool
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, DirectoryError> {
        Self::with_fallback(base_url, timeout, sample_profiles())
    }

    pub fn with_fallback(
        base_url: String,
        timeout: Duration,
        fallback: Vec<UserProfile>,
    ) -> Result<Self, DirectoryError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            client,
            fallback,
        })
    }

    /// Fetch every profile the backend exposes
    pub async fn list_profiles(&self) -> Result<Vec<UserProfile>, DirectoryError> {
        let url = format!("{}/api/users", self.base_url.trim_end_matches('/'));

        tracing::debug!("Fetching profile pool from: {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(DirectoryError::ApiError(format!(
                "Failed to list profiles: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;
        let entries = unwrap_envelope(&json)
            .as_array()
            .ok_or_else(|| DirectoryError::InvalidResponse("Missing profile array".into()))?;

        let profiles: Vec<UserProfile> = entries.iter().filter_map(parse_profile).collect();

        tracing::debug!("Loaded {} of {} profiles", profiles.len(), entries.len());

        Ok(profiles)
    }

    /// Get a single profile by id
    pub async fn get_profile(&self, user_id: &str) -> Result<UserProfile, DirectoryError> {
        let url = format!(
            "{}/api/users/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(user_id)
        );

        tracing::debug!("Fetching profile for user: {}", user_id);

        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(DirectoryError::NotFound(format!("Profile not found for user {}", user_id)));
        }

        if !response.status().is_success() {
            return Err(DirectoryError::ApiError(format!(
                "Failed to fetch profile: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let profile: UserProfile = serde_json::from_value(unwrap_envelope(&json).clone())
            .map_err(|e| DirectoryError::InvalidResponse(format!("Failed to parse profile: {}", e)))?;

        profile
            .validate()
            .map_err(|e| DirectoryError::InvalidResponse(format!("Invalid profile {}: {}", user_id, e)))?;

        Ok(profile)
    }

    /// Candidate pool for a session, falling back to the sample pool
    pub async fn load_pool(&self) -> Vec<UserProfile> {
        match self.list_profiles().await {
            Ok(profiles) => profiles,
            Err(e) => {
                tracing::warn!(
                    "Profile backend unavailable ({}), serving {} sample profiles",
                    e,
                    self.fallback.len()
                );
                self.fallback.clone()
            }
        }
    }
}

/// Strip the `{"success": ..., "data": ...}` envelope when present
fn unwrap_envelope(json: &Value) -> &Value {
    json.get("data").unwrap_or(json)
}

fn parse_profile(entry: &Value) -> Option<UserProfile> {
    let profile: UserProfile = match serde_json::from_value(entry.clone()) {
        Ok(profile) => profile,
        Err(e) => {
            tracing::warn!("Skipping unparseable profile: {}", e);
            return None;
        }
    };

    if let Err(e) = profile.validate() {
        tracing::warn!("Skipping invalid profile {}: {}", profile.id, e);
        return None;
    }

    Some(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwrap_envelope() {
        let wrapped = json!({"success": true, "data": [1, 2]});
        let bare = json!([1, 2]);

        assert_eq!(unwrap_envelope(&wrapped), &json!([1, 2]));
        assert_eq!(unwrap_envelope(&bare), &json!([1, 2]));
    }

    #[test]
    fn test_parse_profile_drops_invalid_tags() {
        let valid = json!({"id": "u1", "tags": [{"name": "tech", "weight": 9}]});
        let bad_weight = json!({"id": "u2", "tags": [{"name": "tech", "weight": 42}]});
        let empty_id = json!({"id": ""});

        assert!(parse_profile(&valid).is_some());
        assert!(parse_profile(&bad_weight).is_none());
        assert!(parse_profile(&empty_id).is_none());
    }
}
