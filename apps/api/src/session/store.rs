use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::session::{Session, SessionSnapshot};

/// In-memory registry of live sessions, keyed by session id.
///
/// Closures passed to `read` / `update` run under the lock and must not await;
/// workflows release the lock before any network or rendering work.
/// Every access refreshes the session's idle clock, so both take the write lock.
/// Sessions idle past the TTL are dropped by the sweeper, credential included.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self) -> SessionSnapshot {
        let session = Session::new();
        let snapshot = session.snapshot();
        self.inner.write().await.insert(session.id(), session);
        info!("Created session {}", snapshot.id);
        snapshot
    }

    /// Discards a session. Returns false if it did not exist.
    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.inner.write().await.remove(&id).is_some();
        if removed {
            info!("Discarded session {id}");
        }
        removed
    }

    pub async fn read<R>(&self, id: Uuid, f: impl FnOnce(&Session) -> R) -> Result<R, AppError> {
        let mut sessions = self.inner.write().await;
        let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        session.touch();
        Ok(f(&*session))
    }

    pub async fn update<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut Session) -> Result<R, AppError>,
    ) -> Result<R, AppError> {
        let mut sessions = self.inner.write().await;
        let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        session.touch();
        f(session)
    }

    pub async fn snapshot(&self, id: Uuid) -> Result<SessionSnapshot, AppError> {
        self.read(id, Session::snapshot).await
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Drops every session untouched for at least `ttl`. Sessions with a
    /// generation or export in flight are kept. Returns how many were dropped.
    pub async fn evict_idle(&self, ttl: Duration) -> usize {
        let now = Instant::now();
        let mut sessions = self.inner.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| session.is_busy() || session.idle_for(now) < ttl);
        before - sessions.len()
    }

    /// Runs `evict_idle` on a fixed period for the life of the process.
    pub fn spawn_sweeper(&self, ttl: Duration) -> JoinHandle<()> {
        let store = self.clone();
        let period = sweep_period(ttl);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                let evicted = store.evict_idle(ttl).await;
                if evicted > 0 {
                    info!("Evicted {evicted} idle session(s)");
                } else {
                    debug!("Session sweep: nothing idle");
                }
            }
        })
    }
}

/// A quarter of the TTL, between one second and one minute.
fn sweep_period(ttl: Duration) -> Duration {
    (ttl / 4).clamp(Duration::from_secs(1), Duration::from_secs(60))
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resignation::FormPatch;

    #[tokio::test]
    async fn test_create_then_snapshot() {
        let store = SessionStore::new();
        let created = store.create().await;

        let fetched = store.snapshot(created.id).await.unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let store = SessionStore::new();
        let err = store.snapshot(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_mutates_in_place() {
        let store = SessionStore::new();
        let id = store.create().await.id;

        store
            .update(id, |s| {
                s.apply_patch(FormPatch {
                    company_name: Some("Acme Corp".to_string()),
                    ..Default::default()
                });
                Ok(())
            })
            .await
            .unwrap();

        let company = store.read(id, |s| s.form().company_name.clone()).await.unwrap();
        assert_eq!(company, "Acme Corp");
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_sessions_are_evicted_after_ttl() {
        let store = SessionStore::new();
        let idle = store.create().await.id;
        let active = store.create().await.id;
        let ttl = Duration::from_secs(30 * 60);

        tokio::time::advance(Duration::from_secs(20 * 60)).await;
        store.snapshot(active).await.unwrap();
        tokio::time::advance(Duration::from_secs(11 * 60)).await;

        assert_eq!(store.evict_idle(ttl).await, 1);
        assert!(matches!(
            store.snapshot(idle).await,
            Err(AppError::NotFound(_))
        ));
        assert!(store.snapshot(active).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_in_flight_session_is_never_evicted() {
        let store = SessionStore::new();
        let id = store.create().await.id;
        store
            .update(id, |s| s.begin_generation("p".to_string()).map(|_| ()))
            .await
            .unwrap();

        tokio::time::advance(Duration::from_secs(2 * 60 * 60)).await;

        assert_eq!(store.evict_idle(Duration::from_secs(60)).await, 0);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_discards_abandoned_sessions() {
        let store = SessionStore::new();
        store.create().await;
        let sweeper = store.spawn_sweeper(Duration::from_secs(60));

        tokio::time::sleep(Duration::from_secs(120)).await;

        assert_eq!(store.len().await, 0);
        sweeper.abort();
    }

    #[test]
    fn test_sweep_period_is_bounded() {
        assert_eq!(sweep_period(Duration::from_secs(2)), Duration::from_secs(1));
        assert_eq!(sweep_period(Duration::from_secs(120)), Duration::from_secs(30));
        assert_eq!(sweep_period(Duration::from_secs(3600)), Duration::from_secs(60));
    }

    #[tokio::test]
    async fn test_remove_discards_session() {
        let store = SessionStore::new();
        let id = store.create().await.id;

        assert!(store.remove(id).await);
        assert!(!store.remove(id).await);
        assert!(store.snapshot(id).await.is_err());
    }
}
