//! # Shopping Sessions
//!
//! One cart and one checkout per shopper, held in process memory only.
//! Nothing here survives a restart; orders leave through the Messenger
//! handoff, never through storage.
//!
//! A session idle for `idle_ttl` is gone: the background sweep removes it,
//! and `with_session` treats it as unknown if the sweep has not run yet.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use pares_core::cart::Cart;
use pares_core::checkout::Checkout;

use crate::error::{ApiError, ApiResult};

#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub cart: Cart,
    pub checkout: Checkout,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Idle for at least `ttl` at `now`. A clock that moved backwards never
    /// expires anything.
    fn is_idle(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        (now - self.updated_at)
            .to_std()
            .map(|idle| idle >= ttl)
            .unwrap_or(false)
    }

    fn new() -> Self {
        let now = Utc::now();
        Session {
            id: Uuid::new_v4(),
            cart: Cart::new(),
            checkout: Checkout::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Default idle lifetime when none is configured.
pub const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(2 * 60 * 60);

/// All open sessions behind one mutex.
///
/// Lock order when both are needed: catalog first, then sessions.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<Uuid, Session>>>,
    idle_ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        SessionStore::with_idle_ttl(DEFAULT_IDLE_TTL)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        SessionStore::default()
    }

    pub fn with_idle_ttl(idle_ttl: Duration) -> Self {
        SessionStore {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            idle_ttl,
        }
    }

    /// Opens a session with an empty cart on the details step.
    pub fn create(&self) -> Session {
        let session = Session::new();
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(session.id, session.clone());

        info!(session = %session.id, "Session opened");
        session
    }

    /// Executes `f` with write access to one session.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let total = sessions.with_session(id, |s| Ok(s.cart.total_price()))?;
    /// ```
    pub fn with_session<F, R>(&self, id: Uuid, f: F) -> ApiResult<R>
    where
        F: FnOnce(&mut Session) -> ApiResult<R>,
    {
        let now = Utc::now();
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);

        if sessions.get(&id).is_some_and(|s| s.is_idle(now, self.idle_ttl)) {
            sessions.remove(&id);
            debug!(session = %id, "Expired session accessed");
        }
        let session = sessions
            .get_mut(&id)
            .ok_or_else(|| ApiError::not_found("Session", &id.to_string()))?;

        let result = f(session)?;
        session.updated_at = Utc::now();
        Ok(result)
    }

    /// Drops every session idle for at least the TTL at `now` and returns how
    /// many went.
    pub fn evict_idle(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_idle(now, self.idle_ttl));
        let evicted = before - sessions.len();

        if evicted > 0 {
            info!(evicted, remaining = sessions.len(), "Idle sessions evicted");
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
