use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::config::MatchingSettings;
use crate::core::{CancellationToken, Matcher};
use crate::models::{
    ErrorResponse, HealthResponse, RankRequest, RankResponse, RefreshSessionRequest,
    RefreshSessionResponse,
};
use crate::services::{DirectoryError, SessionStore};
use std::sync::Arc;
use std::time::Duration;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionStore>,
    pub matcher: Matcher,
    pub matching: MatchingSettings,
    /// Deadline for all compatibility calls of one request
    pub request_deadline: Duration,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/rank", web::post().to(rank_matches))
        .route("/sessions/refresh", web::post().to(refresh_session));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Rank candidates endpoint
///
/// POST /api/v1/matches/rank
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "mode": "romantic|collaboration",
///   "query": "string",
///   "limit": 20
/// }
/// ```
async fn rank_matches(
    state: web::Data<AppState>,
    req: web::Json<RankRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for rank request: field_errors={:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let user_id = &req.user_id;
    let limit = req
        .limit
        .unwrap_or(state.matching.default_limit)
        .min(state.matching.max_limit) as usize;

    tracing::info!(
        "Ranking matches for user: {}, mode: {}, limit: {}",
        user_id,
        req.mode,
        limit
    );

    let session = match state.sessions.session(user_id).await {
        Ok(session) => session,
        Err(e) if matches!(e.as_ref(), DirectoryError::NotFound(_)) => {
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "Unknown user".to_string(),
                message: e.to_string(),
                status_code: 404,
            });
        }
        Err(e) => {
            tracing::error!("Failed to load session for {}: {}", user_id, e);
            return HttpResponse::BadGateway().json(ErrorResponse {
                error: "Failed to load user profile".to_string(),
                message: e.to_string(),
                status_code: 502,
            });
        }
    };

    // Calls still pending at the deadline resolve to the heuristic score.
    let token = CancellationToken::new();
    let deadline = {
        let token = token.clone();
        let after = state.request_deadline;
        actix_web::rt::spawn(async move {
            actix_web::rt::time::sleep(after).await;
            token.cancel();
        })
    };

    let result = state
        .matcher
        .rank(&session, req.mode, &req.query, Some(&token))
        .await;
    deadline.abort();

    tracing::info!(
        "Returning {} of {} matches for user {} ({} fallback scores)",
        result.matches.len().min(limit),
        result.total_candidates,
        user_id,
        result.fallback_count
    );

    let mut matches = result.matches;
    matches.truncate(limit);

    HttpResponse::Ok().json(RankResponse {
        matches,
        total_results: result.total_candidates,
        fallback_count: result.fallback_count,
    })
}

/// Drop the cached session for a user
///
/// POST /api/v1/sessions/refresh
async fn refresh_session(
    state: web::Data<AppState>,
    req: web::Json<RefreshSessionRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    state.sessions.invalidate(&req.user_id).await;
    tracing::debug!("Session invalidated for {}", req.user_id);

    HttpResponse::Ok().json(RefreshSessionResponse { success: true })
}
