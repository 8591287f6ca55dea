// Model exports
pub mod compatibility;
pub mod domain;
pub mod requests;
pub mod responses;
pub mod sample;

pub use compatibility::{CompatibilityRequest, CompatibilityResponse, CompatibilityProfile, CompatibilityContext};
pub use domain::{UserProfile, Tag, Gender, MatchMode, ScoreSource, ScoredCandidate, MatchSession};
pub use requests::{RankRequest, RefreshSessionRequest};
pub use responses::{RankResponse, HealthResponse, ErrorResponse, RefreshSessionResponse};
