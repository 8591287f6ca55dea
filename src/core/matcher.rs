use crate::core::{
    cancel::CancellationToken,
    factors::match_factors,
    filters::{filter_by_mode, filter_by_query},
    scoring::{resolve_score, score_simple, ScoringError},
};
use crate::models::{
    CompatibilityRequest, MatchMode, MatchSession, ScoreSource, ScoredCandidate, UserProfile,
};
use futures::stream::{self, StreamExt};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

/// Future returned by a compatibility scorer, resolving to a raw score in `[0, 1]`
pub type ScoreFuture<'a> = Pin<Box<dyn Future<Output = Result<f64, ScoringError>> + Send + 'a>>;

/// External compatibility scoring seam
pub trait CompatibilityScorer: Send + Sync {
    fn score<'a>(&'a self, request: &'a CompatibilityRequest) -> ScoreFuture<'a>;
}

/// Scorer that always fails, forcing the fallback heuristic
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicOnly;

impl CompatibilityScorer for HeuristicOnly {
    fn score<'a>(&'a self, _request: &'a CompatibilityRequest) -> ScoreFuture<'a> {
        Box::pin(async { Err(ScoringError::Disabled) })
    }
}

/// Fan-out limits for external scoring
#[derive(Debug, Clone, Copy)]
pub struct MatcherOptions {
    /// Maximum number of compatibility calls in flight
    pub concurrency: usize,
    /// Per-call deadline; expiry counts as a failed call
    pub call_timeout: Duration,
}

impl Default for MatcherOptions {
    fn default() -> Self {
        Self {
            concurrency: 8,
            call_timeout: Duration::from_secs(5),
        }
    }
}

/// Result of one ranking call
#[derive(Debug)]
pub struct RankResult<'a> {
    pub matches: Vec<ScoredCandidate<'a>>,
    pub total_candidates: usize,
    pub fallback_count: usize,
}

/// Ranking orchestrator
///
/// # Pipeline Stages
/// 1. Eligibility filter (self-exclusion + mode rules)
/// 2. Free-text query filter
/// 3. Scoring (external with heuristic fallback) and match factors
/// 4. Sort by score descending, candidate id ascending
#[derive(Clone)]
pub struct Matcher {
    scorer: Arc<dyn CompatibilityScorer>,
    options: MatcherOptions,
}

impl Matcher {
    pub fn new(scorer: Arc<dyn CompatibilityScorer>, options: MatcherOptions) -> Self {
        Self { scorer, options }
    }

    /// Matcher that never calls out and scores with the heuristic only
    pub fn heuristic_only() -> Self {
        Self::new(Arc::new(HeuristicOnly), MatcherOptions::default())
    }

    pub fn options(&self) -> MatcherOptions {
        self.options
    }

    /// Rank the session's pool for its requester
    ///
    /// Never fails: every external problem resolves to the heuristic score.
    /// Compatibility calls run with bounded concurrency and the final order
    /// is computed only once they have all resolved. The full ranked list
    /// is returned; truncation is left to the caller.
    pub async fn rank<'a>(
        &self,
        session: &'a MatchSession,
        mode: MatchMode,
        query: &str,
        cancel: Option<&CancellationToken>,
    ) -> RankResult<'a> {
        let requester = &session.requester;
        let matched = filter_by_query(filter_by_mode(&session.pool, requester, mode), query);
        let total_candidates = matched.len();

        tracing::debug!(
            "Scoring {} candidates for {} (mode: {}, concurrency: {})",
            total_candidates,
            requester.id,
            mode,
            self.options.concurrency
        );

        let mut matches: Vec<ScoredCandidate<'a>> = stream::iter(matched)
            .map(|candidate| self.score_candidate(requester, candidate, mode, query, cancel))
            .buffer_unordered(self.options.concurrency.max(1))
            .collect()
            .await;

        sort_ranked(&mut matches);

        let fallback_count = matches
            .iter()
            .filter(|m| m.score_source == ScoreSource::Fallback)
            .count();

        RankResult {
            matches,
            total_candidates,
            fallback_count,
        }
    }

    async fn score_candidate<'a>(
        &self,
        requester: &UserProfile,
        candidate: &'a UserProfile,
        mode: MatchMode,
        query: &str,
        cancel: Option<&CancellationToken>,
    ) -> ScoredCandidate<'a> {
        let request = CompatibilityRequest::new(requester, candidate, mode, query);
        let outcome = self.call_scorer(&request, cancel).await;
        let (score, score_source) = resolve_score(outcome, requester, candidate);

        ScoredCandidate {
            profile: candidate,
            score,
            match_factors: match_factors(requester, candidate),
            score_source,
        }
    }

    async fn call_scorer(
        &self,
        request: &CompatibilityRequest,
        cancel: Option<&CancellationToken>,
    ) -> Result<f64, ScoringError> {
        let call = tokio::time::timeout(self.options.call_timeout, self.scorer.score(request));

        let result = match cancel {
            Some(token) => tokio::select! {
                result = call => result,
                _ = token.cancelled() => return Err(ScoringError::Cancelled),
            },
            None => call.await,
        };

        match result {
            Ok(outcome) => outcome,
            Err(_) => Err(ScoringError::Timeout),
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::heuristic_only()
    }
}

/// Synchronous ranking using only the fallback heuristic
pub fn rank_offline<'a>(
    pool: &'a [UserProfile],
    requester: &UserProfile,
    mode: MatchMode,
    query: &str,
) -> Vec<ScoredCandidate<'a>> {
    let mut matches: Vec<ScoredCandidate<'a>> = filter_by_query(filter_by_mode(pool, requester, mode), query)
        .into_iter()
        .map(|candidate| ScoredCandidate {
            profile: candidate,
            score: score_simple(requester, candidate),
            match_factors: match_factors(requester, candidate),
            score_source: ScoreSource::Fallback,
        })
        .collect();

    sort_ranked(&mut matches);
    matches
}

/// Score descending, then candidate id ascending
pub fn sort_ranked(matches: &mut [ScoredCandidate<'_>]) {
    matches.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.profile.id.cmp(&b.profile.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, Tag};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn create_candidate(id: &str, gender: Gender, city: &str, age: u32, goals: &[&str]) -> UserProfile {
        UserProfile {
            id: id.to_string(),
            username: format!("user_{}", id),
            age: Some(age),
            gender,
            location_city: Some(city.to_string()),
            location_state: Some("Guangdong".to_string()),
            looking_for: goals.iter().map(|g| g.to_string()).collect(),
            tags: vec![Tag::new("tech", 7)],
            ..Default::default()
        }
    }

    fn create_session() -> MatchSession {
        let requester = create_candidate("me", Gender::Male, "Shenzhen", 25, &["find-love"]);
        let pool = vec![
            requester.clone(),
            create_candidate("b", Gender::Female, "Guangzhou", 40, &["find-love"]),
            create_candidate("a", Gender::Female, "Shenzhen", 26, &["romance"]),
            create_candidate("c", Gender::Female, "Guangzhou", 40, &["marriage"]),
            create_candidate("d", Gender::Male, "Shenzhen", 25, &["find-love"]),
        ];
        MatchSession::new(requester, Arc::new(pool))
    }

    /// Scores by candidate name, failing for names listed in `failing`
    struct TableScorer {
        failing: Vec<String>,
        calls: AtomicUsize,
    }

    impl CompatibilityScorer for TableScorer {
        fn score<'a>(&'a self, request: &'a CompatibilityRequest) -> ScoreFuture<'a> {
            Box::pin(async move {
                self.calls.fetch_add(1, Ordering::SeqCst);
                if self.failing.contains(&request.user_b.name) {
                    Err(ScoringError::Unsuccessful)
                } else {
                    Ok(0.3)
                }
            })
        }
    }

    struct SlowScorer;

    impl CompatibilityScorer for SlowScorer {
        fn score<'a>(&'a self, _request: &'a CompatibilityRequest) -> ScoreFuture<'a> {
            Box::pin(async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(0.99)
            })
        }
    }

    #[test]
    fn test_rank_offline_order_and_tie_break() {
        let session = create_session();
        let result = rank_offline(&session.pool, &session.requester, MatchMode::Romantic, "");
        let ids: Vec<&str> = result.iter().map(|m| m.profile.id.as_str()).collect();

        // a: 50+20+15+5 = 90; b and c tie at 50+10+5 = 65 and sort by id
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(result[0].score, 90);
        assert_eq!(result[1].score, result[2].score);
    }

    #[tokio::test]
    async fn test_heuristic_only_matches_offline() {
        let session = create_session();
        let matcher = Matcher::heuristic_only();

        let result = matcher.rank(&session, MatchMode::Romantic, "", None).await;
        let offline = rank_offline(&session.pool, &session.requester, MatchMode::Romantic, "");

        assert_eq!(result.matches.len(), offline.len());
        assert_eq!(result.fallback_count, offline.len());
        for (x, y) in result.matches.iter().zip(offline.iter()) {
            assert_eq!(x.profile.id, y.profile.id);
            assert_eq!(x.score, y.score);
        }
    }

    #[tokio::test]
    async fn test_partial_failure_does_not_abort_siblings() {
        let session = create_session();
        let scorer = Arc::new(TableScorer {
            failing: vec!["user_a".to_string()],
            calls: AtomicUsize::new(0),
        });
        let matcher = Matcher::new(scorer.clone(), MatcherOptions::default());

        let result = matcher.rank(&session, MatchMode::Romantic, "", None).await;

        assert_eq!(scorer.calls.load(Ordering::SeqCst), 3);
        assert_eq!(result.fallback_count, 1);
        assert_eq!(result.matches[0].profile.id, "a");
        assert_eq!(result.matches[0].score, 90);
        assert_eq!(result.matches[0].score_source, ScoreSource::Fallback);
        assert!(result.matches[1..].iter().all(|m| m.score == 30));
    }

    #[tokio::test]
    async fn test_timeout_uses_fallback() {
        let session = create_session();
        let matcher = Matcher::new(
            Arc::new(SlowScorer),
            MatcherOptions {
                concurrency: 2,
                call_timeout: Duration::from_millis(20),
            },
        );

        let result = matcher.rank(&session, MatchMode::Romantic, "", None).await;

        assert_eq!(result.fallback_count, result.matches.len());
        assert_eq!(result.matches[0].score, 90);
    }

    #[tokio::test]
    async fn test_cancelled_token_uses_fallback() {
        let session = create_session();
        let matcher = Matcher::new(Arc::new(SlowScorer), MatcherOptions::default());
        let token = CancellationToken::new();
        token.cancel();

        let result = matcher
            .rank(&session, MatchMode::Romantic, "", Some(&token))
            .await;

        assert_eq!(result.fallback_count, 3);
        assert!(result.matches.iter().all(|m| m.score >= 50));
    }

    #[tokio::test]
    async fn test_query_narrows_results() {
        let session = create_session();
        let matcher = Matcher::heuristic_only();

        let result = matcher
            .rank(&session, MatchMode::Romantic, "shenzhen", None)
            .await;

        assert_eq!(result.total_candidates, 1);
        assert_eq!(result.matches[0].profile.id, "a");
    }
}
