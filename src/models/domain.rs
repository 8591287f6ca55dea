use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use validator::Validate;

/// Declared gender of a profile
///
/// Unknown strings coming from the backend collapse into `Unspecified`
/// instead of failing the whole profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Gender {
    Male,
    Female,
    NonBinary,
    Other,
    #[default]
    Unspecified,
}

impl Gender {
    /// Strict binary opposite used by romantic matching
    ///
    /// Only `Male` and `Female` have an opposite; every other value yields
    /// `None` and therefore never matches in romantic mode.
    pub fn opposite(self) -> Option<Gender> {
        match self {
            Gender::Male => Some(Gender::Female),
            Gender::Female => Some(Gender::Male),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::NonBinary => "non-binary",
            Gender::Other => "other",
            Gender::Unspecified => "unspecified",
        }
    }
}

impl From<&str> for Gender {
    fn from(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "male" | "m" => Gender::Male,
            "female" | "f" => Gender::Female,
            "non-binary" | "nonbinary" | "non_binary" => Gender::NonBinary,
            "other" => Gender::Other,
            _ => Gender::Unspecified,
        }
    }
}

impl From<String> for Gender {
    fn from(value: String) -> Self {
        Gender::from(value.as_str())
    }
}

impl From<Gender> for String {
    fn from(value: Gender) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weighted interest/personality label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Tag {
    #[validate(length(min = 1))]
    #[serde(alias = "tag_name", alias = "tagName")]
    pub name: String,
    #[validate(range(min = 1, max = 10))]
    #[serde(default = "default_weight")]
    pub weight: u8,
}

impl Tag {
    pub fn new(name: impl Into<String>, weight: u8) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }
}

fn default_weight() -> u8 { 5 }

/// User profile as served by the profile backend
///
/// Every optional field defaults to empty so that partially filled profiles
/// still flow through the ranking pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UserProfile {
    #[validate(length(min = 1))]
    #[serde(alias = "userId", alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default, alias = "locationCity")]
    pub location_city: Option<String>,
    #[serde(default, alias = "locationState")]
    pub location_state: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default, alias = "lookingFor")]
    pub looking_for: BTreeSet<String>,
    #[validate(nested)]
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl UserProfile {
    /// City, treating blank strings as absent
    pub fn city(&self) -> Option<&str> {
        non_blank(self.location_city.as_deref())
    }

    /// State/province, treating blank strings as absent
    pub fn state(&self) -> Option<&str> {
        non_blank(self.location_state.as_deref())
    }

    pub fn bio_text(&self) -> &str {
        self.bio.as_deref().unwrap_or("")
    }

    pub fn occupation_text(&self) -> &str {
        self.occupation.as_deref().unwrap_or("")
    }

    /// Absolute age difference, when both ages are known
    pub fn age_gap(&self, other: &UserProfile) -> Option<u32> {
        match (self.age, other.age) {
            (Some(a), Some(b)) => Some(a.abs_diff(b)),
            _ => None,
        }
    }

    /// Whether any declared goal is part of `vocabulary`
    pub fn seeks_any(&self, vocabulary: &[&str]) -> bool {
        self.looking_for
            .iter()
            .any(|goal| vocabulary.contains(&goal.as_str()))
    }

    /// "City, State" for display, skipping missing parts
    pub fn location_label(&self) -> String {
        [self.city(), self.state()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Matching intent selected by the requester per search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    Romantic,
    Collaboration,
}

impl MatchMode {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchMode::Romantic => "romantic",
            MatchMode::Collaboration => "collaboration",
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a candidate's score came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreSource {
    External,
    Fallback,
}

/// Scored candidate produced for a single ranking call
#[derive(Debug, Clone, Serialize)]
pub struct ScoredCandidate<'a> {
    pub profile: &'a UserProfile,
    pub score: u8,
    #[serde(rename = "matchFactors")]
    pub match_factors: Vec<String>,
    #[serde(rename = "scoreSource")]
    pub score_source: ScoreSource,
}

/// Requester plus the candidate pool loaded for them
///
/// Replaces process-wide "current user" / "all users" state: everything the
/// ranker needs is passed in explicitly.
#[derive(Debug, Clone)]
pub struct MatchSession {
    pub requester: UserProfile,
    pub pool: std::sync::Arc<Vec<UserProfile>>,
}

impl MatchSession {
    pub fn new(requester: UserProfile, pool: std::sync::Arc<Vec<UserProfile>>) -> Self {
        Self { requester, pool }
    }
}
