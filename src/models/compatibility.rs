use serde::{Deserialize, Serialize};
use crate::models::domain::{MatchMode, UserProfile};

/// Profile normalized to the shape the compatibility backend expects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityProfile {
    pub name: String,
    pub age: Option<u32>,
    pub location: String,
    pub bio: String,
    pub current_role: String,
    pub personality_tags: Vec<String>,
}

impl From<&UserProfile> for CompatibilityProfile {
    fn from(profile: &UserProfile) -> Self {
        Self {
            name: profile.username.clone(),
            age: profile.age,
            location: profile.location_label(),
            bio: profile.bio_text().to_string(),
            current_role: profile.occupation_text().to_string(),
            personality_tags: profile.tags.iter().map(|t| t.name.clone()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityContext {
    pub mode: MatchMode,
    pub query: String,
}

/// Body of `POST /api/match/compatibility`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityRequest {
    pub user_a: CompatibilityProfile,
    pub user_b: CompatibilityProfile,
    pub context: CompatibilityContext,
}

impl CompatibilityRequest {
    /// Build a request for one requester/candidate pair
    ///
    /// A blank query falls back to the candidate's bio.
    pub fn new(
        requester: &UserProfile,
        candidate: &UserProfile,
        mode: MatchMode,
        query: &str,
    ) -> Self {
        let query = if query.trim().is_empty() {
            candidate.bio_text().to_string()
        } else {
            query.to_string()
        };

        Self {
            user_a: CompatibilityProfile::from(requester),
            user_b: CompatibilityProfile::from(candidate),
            context: CompatibilityContext { mode, query },
        }
    }
}

/// Envelope returned by the compatibility backend
///
/// Every level is optional; absence of any of them counts as a failed call.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompatibilityResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<CompatibilityData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompatibilityData {
    #[serde(default)]
    pub overall_compatibility: Option<OverallCompatibility>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OverallCompatibility {
    #[serde(default)]
    pub score: Option<f64>,
}
