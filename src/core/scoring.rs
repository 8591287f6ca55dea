use crate::core::tags::common_tag_count;
use crate::models::{CompatibilityResponse, ScoreSource, UserProfile};
use thiserror::Error;

/// Base score every candidate starts from in the fallback heuristic
pub const BASE_SCORE: u32 = 50;
pub const SAME_CITY_BONUS: u32 = 20;
pub const SAME_STATE_BONUS: u32 = 10;
pub const CLOSE_AGE_BONUS: u32 = 15;
pub const NEAR_AGE_BONUS: u32 = 10;
pub const PER_TAG_BONUS: u32 = 5;
pub const MAX_TAG_BONUS: u32 = 15;
pub const MAX_SCORE: u32 = 100;

/// Reasons an external compatibility score could not be used
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Compatibility service returned status {0}")]
    Status(u16),

    #[error("Compatibility service reported failure")]
    Unsuccessful,

    #[error("Missing field in compatibility response: {0}")]
    MissingField(&'static str),

    #[error("Compatibility score outside [0, 1]: {0}")]
    InvalidScore(f64),

    #[error("Compatibility call timed out")]
    Timeout,

    #[error("Compatibility call cancelled")]
    Cancelled,

    #[error("Compatibility service disabled")]
    Disabled,
}

/// Location relation between two profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationMatch {
    SameCity,
    SameState,
    None,
}

/// City match wins over state match; blank values never match
pub fn location_match(a: &UserProfile, b: &UserProfile) -> LocationMatch {
    if matches!((a.city(), b.city()), (Some(x), Some(y)) if x == y) {
        return LocationMatch::SameCity;
    }
    if matches!((a.state(), b.state()), (Some(x), Some(y)) if x == y) {
        return LocationMatch::SameState;
    }
    LocationMatch::None
}

/// Fallback compatibility heuristic, always in `[50, 100]`
///
/// score = min(
///     50
///     + location (20 same city | 10 same state)
///     + age      (15 if gap <= 2 | 10 if gap <= 5)
///     + tags     min(shared * 5, 15),
///     100)
pub fn score_simple(requester: &UserProfile, candidate: &UserProfile) -> u8 {
    let location_bonus = match location_match(requester, candidate) {
        LocationMatch::SameCity => SAME_CITY_BONUS,
        LocationMatch::SameState => SAME_STATE_BONUS,
        LocationMatch::None => 0,
    };

    let age_bonus = match requester.age_gap(candidate) {
        Some(gap) if gap <= 2 => CLOSE_AGE_BONUS,
        Some(gap) if gap <= 5 => NEAR_AGE_BONUS,
        _ => 0,
    };

    let shared = common_tag_count(&requester.tags, &candidate.tags) as u32;
    let tag_bonus = shared.saturating_mul(PER_TAG_BONUS).min(MAX_TAG_BONUS);

    (BASE_SCORE + location_bonus + age_bonus + tag_bonus).min(MAX_SCORE) as u8
}

/// Map an external score in `[0, 1]` onto `[0, 100]`
///
/// Anything outside the range, NaN included, is a malformed response.
pub fn normalize_external_score(raw: f64) -> Result<u8, ScoringError> {
    if !(0.0..=1.0).contains(&raw) {
        return Err(ScoringError::InvalidScore(raw));
    }
    Ok((raw * 100.0).round() as u8)
}

/// Pull the overall score out of a compatibility response envelope
pub fn extract_score(response: &CompatibilityResponse) -> Result<f64, ScoringError> {
    if !response.success {
        return Err(ScoringError::Unsuccessful);
    }

    let data = response
        .data
        .as_ref()
        .ok_or(ScoringError::MissingField("data"))?;

    data.overall_compatibility
        .as_ref()
        .and_then(|overall| overall.score)
        .ok_or(ScoringError::MissingField("data.overall_compatibility.score"))
}

/// Combine an external scoring outcome with the fallback heuristic
///
/// Any failure, including an unusable score, resolves to `score_simple`.
pub fn resolve_score(
    outcome: Result<f64, ScoringError>,
    requester: &UserProfile,
    candidate: &UserProfile,
) -> (u8, ScoreSource) {
    match outcome.and_then(normalize_external_score) {
        Ok(score) => (score, ScoreSource::External),
        Err(e) => {
            tracing::debug!(
                "Falling back to heuristic for candidate {}: {}",
                candidate.id,
                e
            );
            (score_simple(requester, candidate), ScoreSource::Fallback)
        }
    }
}
