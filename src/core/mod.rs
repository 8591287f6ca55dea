// Core algorithm exports
pub mod cancel;
pub mod factors;
pub mod filters;
pub mod matcher;
pub mod scoring;
pub mod tags;

pub use cancel::CancellationToken;
pub use factors::match_factors;
pub use filters::{filter_by_mode, filter_by_query, searchable_text, ROMANTIC_GOALS, COLLABORATION_GOALS};
pub use matcher::{Matcher, MatcherOptions, RankResult, CompatibilityScorer, HeuristicOnly, ScoreFuture, rank_offline};
pub use scoring::{score_simple, resolve_score, normalize_external_score, ScoringError};
pub use tags::common_tags;
