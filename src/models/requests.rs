use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::MatchMode;

/// Request to rank candidates for a requester
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    pub mode: MatchMode,
    #[validate(length(max = 256))]
    #[serde(default)]
    pub query: String,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Request to drop a requester's cached session
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshSessionRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
}
