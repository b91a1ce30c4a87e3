//! The session store itself.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use tastematch_core::{Error, Result, TasteProfile};
use tracing::{debug, info};
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};

/// Sessions expire this many minutes after creation. Joining or updating
/// does not extend the deadline.
pub const SESSION_TTL_MINUTES: i64 = 30;

/// One pending or completed comparison between two users.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonSession {
    pub id: String,
    pub user1_profile: TasteProfile,
    pub user2_profile: Option<TasteProfile>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl ComparisonSession {
    /// Whether both participants have supplied a profile.
    pub const fn is_complete(&self) -> bool {
        self.user2_profile.is_some()
    }
}

/// In-memory session store.
///
/// All state lives behind one mutex; every operation is a short critical
/// section. Expired sessions are dropped lazily on lookup and swept on
/// every create.
pub struct SessionStore {
    sessions: Mutex<HashMap<String, ComparisonSession>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a store with an injected time source.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl: Duration::minutes(SESSION_TTL_MINUTES),
            clock,
        }
    }

    /// Create a session owned by the first user. Returns the session id to
    /// share with the second user.
    pub fn create_session(&self, user1_profile: TasteProfile) -> String {
        let id = Uuid::new_v4().to_string();
        let now = self.clock.now();
        let session = ComparisonSession {
            id: id.clone(),
            user1_profile,
            user2_profile: None,
            created_at: now,
            expires_at: now + self.ttl,
        };

        let mut sessions = self.sessions.lock();
        sessions.insert(id.clone(), session);
        info!("Created session {id} ({} total)", sessions.len());

        // Sweep expired sessions while we hold the lock anyway.
        sessions.retain(|_, s| s.expires_at > now);

        id
    }

    /// Look up a live session. Expired sessions are removed and reported
    /// as not found.
    pub fn get_session(&self, session_id: &str) -> Result<ComparisonSession> {
        let mut sessions = self.sessions.lock();
        match sessions.get(session_id) {
            Some(session) if self.clock.now() > session.expires_at => {
                debug!("Session {session_id} expired");
                sessions.remove(session_id);
                Err(Error::SessionNotFound(session_id.to_string()))
            }
            Some(session) => Ok(session.clone()),
            None => Err(Error::SessionNotFound(session_id.to_string())),
        }
    }

    /// Attach the second user's profile to a session.
    pub fn join_session(&self, session_id: &str, user2_profile: TasteProfile) -> Result<()> {
        let mut sessions = self.sessions.lock();
        let session = Self::live_entry(&mut sessions, session_id, self.clock.now())?;
        session.user2_profile = Some(user2_profile);
        Ok(())
    }

    /// Replace both profiles on an existing session, used when a comparison
    /// is recomputed for a different listening window.
    pub fn update_session(
        &self,
        session_id: &str,
        user1_profile: TasteProfile,
        user2_profile: TasteProfile,
    ) -> Result<()> {
        let mut sessions = self.sessions.lock();
        let session = Self::live_entry(&mut sessions, session_id, self.clock.now())?;
        session.user1_profile = user1_profile;
        session.user2_profile = Some(user2_profile);
        Ok(())
    }

    /// Slot a caller's fresh profile into the seat they own: the creator's
    /// side when the user ids match, otherwise the second seat. The lookup
    /// and the write happen under one lock, so two concurrent callers
    /// cannot overwrite each other's seat. Returns the updated session.
    pub fn submit_profile(
        &self,
        session_id: &str,
        profile: TasteProfile,
    ) -> Result<ComparisonSession> {
        let mut sessions = self.sessions.lock();
        let session = Self::live_entry(&mut sessions, session_id, self.clock.now())?;
        if session.user1_profile.user.id == profile.user.id {
            session.user1_profile = profile;
        } else {
            session.user2_profile = Some(profile);
        }
        Ok(session.clone())
    }

    /// Drop every expired session now. Returns how many were removed.
    pub fn cleanup(&self) -> usize {
        let now = self.clock.now();
        let mut sessions = self.sessions.lock();
        let before = sessions.len();
        sessions.retain(|_, s| s.expires_at > now);
        before - sessions.len()
    }

    /// Number of sessions currently held, including not-yet-swept expired
    /// ones.
    pub fn session_count(&self) -> usize {
        self.sessions.lock().len()
    }

    fn live_entry<'a>(
        sessions: &'a mut HashMap<String, ComparisonSession>,
        session_id: &str,
        now: DateTime<Utc>,
    ) -> Result<&'a mut ComparisonSession> {
        if sessions
            .get(session_id)
            .is_some_and(|s| now > s.expires_at)
        {
            sessions.remove(session_id);
        }
        sessions
            .get_mut(session_id)
            .ok_or_else(|| Error::SessionNotFound(session_id.to_string()))
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use tastematch_core::{TrackMetrics, UserIdentity};

    fn profile(id: &str) -> TasteProfile {
        TasteProfile::new(
            UserIdentity::new(id, format!("User {id}")),
            Vec::new(),
            Vec::new(),
            TrackMetrics::empty(),
        )
    }

    fn store_with_clock() -> (SessionStore, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        (SessionStore::with_clock(clock.clone()), clock)
    }

    #[test]
    fn test_create_and_get() {
        let (store, _) = store_with_clock();
        let id = store.create_session(profile("u1"));
        let session = store.get_session(&id).unwrap();
        assert_eq!(session.user1_profile.user.id, "u1");
        assert!(!session.is_complete());
    }

    #[test]
    fn test_unknown_session() {
        let (store, _) = store_with_clock();
        assert!(matches!(
            store.get_session("nope"),
            Err(Error::SessionNotFound(_))
        ));
    }

    #[test]
    fn test_join_completes_session() {
        let (store, _) = store_with_clock();
        let id = store.create_session(profile("u1"));
        store.join_session(&id, profile("u2")).unwrap();

        let session = store.get_session(&id).unwrap();
        assert!(session.is_complete());
        assert_eq!(
            session.user2_profile.unwrap().user.id,
            "u2"
        );
    }

    #[test]
    fn test_session_expires() {
        let (store, clock) = store_with_clock();
        let id = store.create_session(profile("u1"));

        clock.advance(chrono::Duration::minutes(SESSION_TTL_MINUTES + 1));
        assert!(store.get_session(&id).is_err());
        // The expired entry was dropped on lookup.
        assert_eq!(store.session_count(), 0);
    }

    #[test]
    fn test_join_expired_session_fails() {
        let (store, clock) = store_with_clock();
        let id = store.create_session(profile("u1"));

        clock.advance(chrono::Duration::minutes(SESSION_TTL_MINUTES + 1));
        assert!(store.join_session(&id, profile("u2")).is_err());
    }

    #[test]
    fn test_join_does_not_extend_ttl() {
        let (store, clock) = store_with_clock();
        let id = store.create_session(profile("u1"));

        clock.advance(chrono::Duration::minutes(SESSION_TTL_MINUTES - 1));
        store.join_session(&id, profile("u2")).unwrap();

        clock.advance(chrono::Duration::minutes(2));
        assert!(store.get_session(&id).is_err());
    }

    #[test]
    fn test_create_sweeps_expired_sessions() {
        let (store, clock) = store_with_clock();
        store.create_session(profile("u1"));
        store.create_session(profile("u2"));
        assert_eq!(store.session_count(), 2);

        clock.advance(chrono::Duration::minutes(SESSION_TTL_MINUTES + 1));
        store.create_session(profile("u3"));
        assert_eq!(store.session_count(), 1);
    }

    #[test]
    fn test_explicit_cleanup() {
        let (store, clock) = store_with_clock();
        store.create_session(profile("u1"));
        store.create_session(profile("u2"));

        assert_eq!(store.cleanup(), 0);
        clock.advance(chrono::Duration::minutes(SESSION_TTL_MINUTES + 1));
        assert_eq!(store.cleanup(), 2);
        assert_eq!(store.session_count(), 0);
    }

    #[test]
    fn test_update_replaces_both_profiles() {
        let (store, _) = store_with_clock();
        let id = store.create_session(profile("u1"));
        store.join_session(&id, profile("u2")).unwrap();

        store
            .update_session(&id, profile("u1b"), profile("u2b"))
            .unwrap();
        let session = store.get_session(&id).unwrap();
        assert_eq!(session.user1_profile.user.id, "u1b");
        assert_eq!(session.user2_profile.unwrap().user.id, "u2b");
    }

    #[test]
    fn test_submit_slots_by_user_id() {
        let (store, _) = store_with_clock();
        let id = store.create_session(profile("u1"));

        // A creator refresh before anyone joined updates seat one only.
        let session = store.submit_profile(&id, profile("u1")).unwrap();
        assert!(!session.is_complete());

        let session = store.submit_profile(&id, profile("u2")).unwrap();
        assert!(session.is_complete());

        // Another creator refresh keeps the joined profile in place.
        let session = store.submit_profile(&id, profile("u1")).unwrap();
        assert_eq!(session.user1_profile.user.id, "u1");
        assert_eq!(session.user2_profile.unwrap().user.id, "u2");
    }

    #[test]
    fn test_concurrent_submits_keep_both_seats() {
        let (store, _) = store_with_clock();
        let store = Arc::new(store);
        let id = store.create_session(profile("u1"));

        // A creator refresh and a join racing each other must not lose
        // either write, whichever order the lock grants.
        let refresh = {
            let (store, id) = (store.clone(), id.clone());
            std::thread::spawn(move || store.submit_profile(&id, profile("u1")).unwrap())
        };
        let join = {
            let (store, id) = (store.clone(), id.clone());
            std::thread::spawn(move || store.submit_profile(&id, profile("u2")).unwrap())
        };
        refresh.join().unwrap();
        join.join().unwrap();

        let session = store.get_session(&id).unwrap();
        assert_eq!(session.user1_profile.user.id, "u1");
        assert_eq!(session.user2_profile.unwrap().user.id, "u2");
    }

    #[test]
    fn test_submit_to_expired_session_fails() {
        let (store, clock) = store_with_clock();
        let id = store.create_session(profile("u1"));

        clock.advance(chrono::Duration::minutes(SESSION_TTL_MINUTES + 1));
        assert!(store.submit_profile(&id, profile("u2")).is_err());
    }

    #[test]
    fn test_session_ids_are_unique() {
        let (store, _) = store_with_clock();
        let a = store.create_session(profile("u1"));
        let b = store.create_session(profile("u1"));
        assert_ne!(a, b);
    }
}
