//! Server-side session store
//!
//! Maps opaque tokens to user ids. Entries are keyed by the token digest and
//! expire on whichever comes first: the idle timeout since last use or the
//! absolute timeout since login. Expired entries are dropped lazily on access
//! and by [`SessionStore::run_sweeper`].

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use rentbook_shared::config::SessionSettings;
use rentbook_shared::EntityId;
use tracing::{debug, info};

use crate::token::{digest_token, generate_session_token};

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub idle_timeout: Duration,
    pub absolute_timeout: Duration,
}

impl From<&SessionSettings> for SessionConfig {
    fn from(settings: &SessionSettings) -> Self {
        Self {
            idle_timeout: Duration::seconds(settings.idle_timeout_secs),
            absolute_timeout: Duration::seconds(settings.absolute_timeout_secs),
        }
    }
}

#[derive(Debug, Clone)]
struct Session {
    user_id: EntityId,
    created_at: DateTime<Utc>,
    last_seen_at: DateTime<Utc>,
}

impl Session {
    fn is_expired(&self, now: DateTime<Utc>, config: &SessionConfig) -> bool {
        now - self.last_seen_at >= config.idle_timeout
            || now - self.created_at >= config.absolute_timeout
    }
}

pub struct SessionStore {
    sessions: DashMap<String, Session>,
    config: SessionConfig,
}

impl SessionStore {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            sessions: DashMap::new(),
            config,
        }
    }

    /// Start a session for `user_id` and return the raw token for the client.
    pub fn create(&self, user_id: EntityId) -> String {
        self.create_at(user_id, Utc::now())
    }

    pub fn create_at(&self, user_id: EntityId, now: DateTime<Utc>) -> String {
        let token = generate_session_token();
        self.sessions.insert(
            digest_token(&token),
            Session {
                user_id,
                created_at: now,
                last_seen_at: now,
            },
        );
        debug!("Session created for user {}", user_id);
        token
    }

    /// User id behind a live token. Unknown and expired tokens both yield `None`.
    pub fn resolve(&self, token: &str) -> Option<EntityId> {
        self.resolve_at(token, Utc::now())
    }

    pub fn resolve_at(&self, token: &str, now: DateTime<Utc>) -> Option<EntityId> {
        let key = digest_token(token);
        {
            let mut entry = self.sessions.get_mut(&key)?;
            if !entry.is_expired(now, &self.config) {
                entry.last_seen_at = now;
                return Some(entry.user_id);
            }
        }
        self.sessions
            .remove_if(&key, |_, session| session.is_expired(now, &self.config));
        debug!("Expired session dropped on access");
        None
    }

    pub fn revoke(&self, token: &str) -> bool {
        self.sessions.remove(&digest_token(token)).is_some()
    }

    pub fn sweep_expired(&self) -> usize {
        self.sweep_expired_at(Utc::now())
    }

    pub fn sweep_expired_at(&self, now: DateTime<Utc>) -> usize {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, session| !session.is_expired(now, &self.config));
        before.saturating_sub(self.sessions.len())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Periodically drop expired sessions. Never returns.
    pub async fn run_sweeper(self: Arc<Self>, interval: std::time::Duration) {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            let removed = self.sweep_expired();
            if removed > 0 {
                info!("Session sweep removed {} expired sessions", removed);
            }
        }
    }
}
