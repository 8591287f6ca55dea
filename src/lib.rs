//! Match Ranker - candidate ranking service for romantic and collaboration matching
//!
//! Ranks a requester's candidate pool: eligibility by mode, free-text query
//! filtering, external compatibility scoring with a deterministic heuristic
//! fallback, and human-readable match factors.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Matcher, MatcherOptions, CompatibilityScorer, CancellationToken, rank_offline, score_simple};
pub use crate::models::{UserProfile, Tag, Gender, MatchMode, MatchSession, ScoredCandidate, ScoreSource};
