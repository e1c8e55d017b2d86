//! Per-session UI state.
//!
//! Each browser session owns one `SessionState` value. Handlers never mutate
//! it in place: they build a `SessionEvent` and swap in the state returned by
//! `SessionState::apply`. Sessions left idle for longer than the store's TTL
//! are dropped, along with any result they held.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};
use std::time::{Duration, Instant};

use nutrifit_core::RecipeResult;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing generated yet.
    #[default]
    Empty,
    /// The most recent generation succeeded.
    Ready(RecipeResult),
    /// The most recent generation failed; any earlier result is gone.
    Failed(String),
}

#[derive(Debug, Clone)]
pub enum SessionEvent {
    Generated(RecipeResult),
    GenerationFailed(String),
}

/// What the page renders for a session.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SessionView {
    pub session_id: Uuid,
    pub result: Option<RecipeResult>,
    pub error: Option<String>,
}

impl SessionState {
    pub fn apply(self, event: SessionEvent) -> SessionState {
        match event {
            SessionEvent::Generated(result) => SessionState::Ready(result),
            SessionEvent::GenerationFailed(message) => SessionState::Failed(message),
        }
    }

    pub fn result(&self) -> Option<&RecipeResult> {
        match self {
            SessionState::Ready(result) => Some(result),
            _ => None,
        }
    }

    pub fn view(&self, session_id: Uuid) -> SessionView {
        let (result, error) = match self {
            SessionState::Empty => (None, None),
            SessionState::Ready(result) => (Some(result.clone()), None),
            SessionState::Failed(message) => (None, Some(message.clone())),
        };
        SessionView {
            session_id,
            result,
            error,
        }
    }
}

/// Sessions untouched for this long are dropped.
pub const DEFAULT_SESSION_IDLE_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug)]
struct SessionEntry {
    state: SessionState,
    last_touched: Instant,
}

impl SessionEntry {
    fn is_idle(&self, now: Instant, idle_ttl: Duration) -> bool {
        now.saturating_duration_since(self.last_touched) >= idle_ttl
    }
}

/// In-memory map of live sessions.
///
/// Every access refreshes a session's idle timer. Idle sessions are swept on
/// `create` and `apply`, and are never returned once their timer has run out.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, SessionEntry>>>,
    idle_ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_idle_ttl(DEFAULT_SESSION_IDLE_TTL)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_idle_ttl(idle_ttl: Duration) -> Self {
        Self {
            sessions: Arc::default(),
            idle_ttl,
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<Uuid, SessionEntry>> {
        self.sessions.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn evict_idle(&self, sessions: &mut HashMap<Uuid, SessionEntry>, now: Instant) {
        let before = sessions.len();
        sessions.retain(|_, entry| !entry.is_idle(now, self.idle_ttl));

        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::debug!(evicted, live = sessions.len(), "evicted idle sessions");
        }
    }

    pub fn create(&self) -> Uuid {
        self.create_at(Instant::now())
    }

    fn create_at(&self, now: Instant) -> Uuid {
        let id = Uuid::new_v4();
        let mut sessions = self.write();
        self.evict_idle(&mut sessions, now);
        sessions.insert(
            id,
            SessionEntry {
                state: SessionState::Empty,
                last_touched: now,
            },
        );
        id
    }

    pub fn get(&self, id: Uuid) -> Option<SessionState> {
        self.get_at(id, Instant::now())
    }

    fn get_at(&self, id: Uuid, now: Instant) -> Option<SessionState> {
        let mut sessions = self.write();
        let entry = sessions.get_mut(&id)?;
        if entry.is_idle(now, self.idle_ttl) {
            sessions.remove(&id);
            return None;
        }
        entry.last_touched = now;
        Some(entry.state.clone())
    }

    pub fn contains(&self, id: Uuid) -> bool {
        let now = Instant::now();
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .is_some_and(|entry| !entry.is_idle(now, self.idle_ttl))
    }

    /// Number of sessions held, including idle ones not yet swept.
    pub fn live_count(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Advance session `id` with `event`. Returns the new state, or `None`
    /// if the session doesn't exist or has expired.
    pub fn apply(&self, id: Uuid, event: SessionEvent) -> Option<SessionState> {
        self.apply_at(id, event, Instant::now())
    }

    fn apply_at(&self, id: Uuid, event: SessionEvent, now: Instant) -> Option<SessionState> {
        let mut sessions = self.write();
        self.evict_idle(&mut sessions, now);
        let entry = sessions.get_mut(&id)?;
        let next = std::mem::take(&mut entry.state).apply(event);
        entry.state = next.clone();
        entry.last_touched = now;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(tag: &str) -> RecipeResult {
        RecipeResult {
            recipe: format!("recipe {}", tag),
            nutrition: format!("nutrition {}", tag),
        }
    }

    #[test]
    fn test_transitions() {
        let state = SessionState::Empty;
        assert_eq!(state.result(), None);

        let state = state.apply(SessionEvent::Generated(result("a")));
        assert_eq!(state.result(), Some(&result("a")));

        let state = state.apply(SessionEvent::Generated(result("b")));
        assert_eq!(state.result(), Some(&result("b")));

        let state = state.apply(SessionEvent::GenerationFailed("boom".to_string()));
        assert_eq!(state, SessionState::Failed("boom".to_string()));
        assert_eq!(state.result(), None);

        let state = state.apply(SessionEvent::Generated(result("c")));
        assert_eq!(state.result(), Some(&result("c")));
    }

    #[test]
    fn test_view() {
        let id = Uuid::new_v4();

        let view = SessionState::Failed("boom".to_string()).view(id);
        assert_eq!(view.session_id, id);
        assert!(view.result.is_none());
        assert_eq!(view.error.as_deref(), Some("boom"));

        let view = SessionState::Ready(result("a")).view(id);
        assert_eq!(view.result, Some(result("a")));
        assert!(view.error.is_none());
    }

    #[test]
    fn test_store_isolates_sessions() {
        let store = SessionStore::new();
        let a = store.create();
        let b = store.create();

        store.apply(a, SessionEvent::Generated(result("a")));

        assert_eq!(store.get(a), Some(SessionState::Ready(result("a"))));
        assert_eq!(store.get(b), Some(SessionState::Empty));
    }

    #[test]
    fn test_store_unknown_session() {
        let store = SessionStore::new();
        let missing = Uuid::new_v4();
        assert!(!store.contains(missing));
        assert!(store.get(missing).is_none());
        assert!(store
            .apply(missing, SessionEvent::Generated(result("a")))
            .is_none());
    }

    #[test]
    fn test_idle_session_is_evicted() {
        let store = SessionStore::with_idle_ttl(Duration::from_secs(60));
        let start = Instant::now();

        let stale = store.create_at(start);
        store.apply_at(stale, SessionEvent::Generated(result("a")), start);

        let later = start + Duration::from_secs(61);
        let fresh = store.create_at(later);

        assert_eq!(store.live_count(), 1);
        assert_eq!(store.get_at(stale, later), None);
        assert_eq!(store.get_at(fresh, later), Some(SessionState::Empty));
    }

    #[test]
    fn test_access_keeps_session_alive() {
        let store = SessionStore::with_idle_ttl(Duration::from_secs(60));
        let start = Instant::now();
        let id = store.create_at(start);

        let t1 = start + Duration::from_secs(45);
        assert_eq!(store.get_at(id, t1), Some(SessionState::Empty));

        // 90s after creation but only 45s after the last read.
        let t2 = start + Duration::from_secs(90);
        store.create_at(t2);
        assert_eq!(
            store.apply_at(id, SessionEvent::Generated(result("a")), t2),
            Some(SessionState::Ready(result("a")))
        );

        let t3 = t2 + Duration::from_secs(60);
        assert_eq!(store.get_at(id, t3), None);
    }

    #[test]
    fn test_store_size_is_bounded_by_idle_ttl() {
        let store = SessionStore::with_idle_ttl(Duration::from_secs(60));
        let start = Instant::now();

        for second in 0..10_000u64 {
            store.create_at(start + Duration::from_secs(second));
        }

        assert_eq!(store.live_count(), 60);
    }
}
