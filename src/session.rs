//! Session state store
//!
//! Per-chat cache of the last rendered message id and the resolved role.
//! This is a cache, not a system of record: a restart only forces role
//! re-resolution on the next interaction. Bounded by an LRU so a
//! long-lived process cannot grow without limit.

use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;

use crate::roles::Role;

/// Cached per-chat state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    /// Identity of the currently displayed message, overwritten on every
    /// render.
    pub last_message_id: Option<i32>,
    /// Role cached after the first resolution.
    pub role: Option<Role>,
}

/// Merge patch for `update`; `None` fields keep the stored value.
#[derive(Debug, Clone, Default)]
pub struct SessionPatch {
    pub role: Option<Role>,
}

pub struct SessionStore {
    sessions: Mutex<LruCache<i64, Session>>,
}

impl SessionStore {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            sessions: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Merge the patch into the chat's session, always overwriting the
    /// last message id. Last write wins on conflicting keys.
    pub fn update(&self, chat_id: i64, message_id: i32, patch: SessionPatch) {
        let mut sessions = self.sessions.lock();
        let session = sessions.get_or_insert_mut(chat_id, Session::default);
        session.last_message_id = Some(message_id);
        if let Some(role) = patch.role {
            session.role = Some(role);
        }
    }

    /// Snapshot of the chat's session, or an empty one if absent.
    pub fn get(&self, chat_id: i64) -> Session {
        let mut sessions = self.sessions.lock();
        sessions.get(&chat_id).cloned().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
