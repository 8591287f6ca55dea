use crate::models::{MatchSession, UserProfile};
use crate::services::directory::{DirectoryClient, DirectoryError};
use std::sync::Arc;
use std::time::Duration;

/// Per-requester session cache
///
/// A session holds the requester's profile and a handle to the candidate
/// pool. The pool is loaded once and shared by every session built while it
/// is cached. Sessions are read-only once built and expire after the
/// configured TTL.
pub struct SessionStore {
    directory: Arc<DirectoryClient>,
    pool: moka::future::Cache<(), Arc<Vec<UserProfile>>>,
    sessions: moka::future::Cache<String, Arc<MatchSession>>,
}

impl SessionStore {
    pub fn new(directory: Arc<DirectoryClient>, max_sessions: u64, ttl_secs: u64) -> Self {
        let ttl = Duration::from_secs(ttl_secs);

        let pool = moka::future::CacheBuilder::new(1)
            .time_to_live(ttl)
            .build();

        let sessions = moka::future::CacheBuilder::new(max_sessions)
            .time_to_live(ttl)
            .build();

        Self {
            directory,
            pool,
            sessions,
        }
    }

    /// Get the cached session for a requester, loading it on a miss
    ///
    /// Concurrent misses for the same requester share a single load.
    pub async fn session(&self, user_id: &str) -> Result<Arc<MatchSession>, Arc<DirectoryError>> {
        self.sessions
            .try_get_with(user_id.to_string(), async {
                let pool = self.pool().await;

                let requester = match pool.iter().find(|p| p.id == user_id) {
                    Some(profile) => profile.clone(),
                    None => self.directory.get_profile(user_id).await?,
                };

                tracing::debug!(
                    "Session created for {} with {} candidates",
                    user_id,
                    pool.len()
                );

                Ok::<_, DirectoryError>(Arc::new(MatchSession::new(requester, pool)))
            })
            .await
    }

    /// Shared candidate pool, loaded from the directory on a miss
    pub async fn pool(&self) -> Arc<Vec<UserProfile>> {
        self.pool
            .get_with((), async {
                let pool = self.directory.load_pool().await;
                tracing::debug!("Candidate pool loaded with {} profiles", pool.len());
                Arc::new(pool)
            })
            .await
    }

    /// Drop a requester's session and the shared pool so the next lookup reloads both
    pub async fn invalidate(&self, user_id: &str) {
        self.sessions.invalidate(user_id).await;
        self.pool.invalidate(&()).await;
    }
}
