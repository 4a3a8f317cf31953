#[cfg(test)]
#[path = "sessions_test.rs"]
mod tests;

use std::collections::HashMap;

use chrono::Local;
use uuid::Uuid;

use crate::domain::models::RouteUpdate;
use crate::domain::models::Session;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("No session found for id {0}")]
    NotFound(String),

    #[error("Message index {index} is out of range for a session with {len} messages")]
    MessageIndexOutOfRange { index: usize, len: usize },
}

/// Owns every conversation and the route derived for it. Sessions are keyed
/// by id and ordered by creation; exactly one is active, and the store is
/// never empty.
pub struct SessionStore {
    sessions: HashMap<String, Session>,
    active_id: String,
    next_order: u64,
}

impl Default for SessionStore {
    fn default() -> SessionStore {
        return SessionStore::new();
    }
}

impl SessionStore {
    pub fn new() -> SessionStore {
        let mut store = SessionStore {
            sessions: HashMap::new(),
            active_id: "".to_string(),
            next_order: 0,
        };
        store.create_session();

        return store;
    }

    pub fn create_id() -> String {
        return Uuid::new_v4()
            .to_string()
            .split('-')
            .enumerate()
            .filter_map(|(idx, str)| {
                if idx > 1 {
                    return None;
                }
                return Some(str);
            })
            .collect::<Vec<&str>>()
            .join("-");
    }

    pub fn default_name() -> String {
        return Local::now().format("%-m/%-d/%Y, %-I:%M:%S %p").to_string();
    }

    pub fn create_session(&mut self) -> String {
        let mut id = SessionStore::create_id();
        while self.sessions.contains_key(&id) {
            id = SessionStore::create_id();
        }

        let session = Session::new(id.to_string(), SessionStore::default_name(), self.next_order);
        self.next_order += 1;
        self.sessions.insert(id.to_string(), session);
        self.active_id = id.to_string();

        tracing::debug!(session_id = %id, "Created session");
        return id;
    }

    /// Removes a session. When the active one goes, the nearest earlier
    /// session takes over, falling back to the first remaining one, or to a
    /// fresh session if nothing is left.
    pub fn delete_session(&mut self, id: &str) -> Result<(), SessionError> {
        let removed = self
            .sessions
            .remove(id)
            .ok_or_else(|| return SessionError::NotFound(id.to_string()))?;
        tracing::debug!(session_id = id, "Deleted session");

        if self.is_empty() {
            self.create_session();
            return Ok(());
        }

        if removed.id != self.active_id {
            return Ok(());
        }

        let previous = self
            .sessions
            .values()
            .filter(|session| return session.order < removed.order)
            .max_by_key(|session| return session.order);
        let next = previous.or_else(|| {
            return self
                .sessions
                .values()
                .min_by_key(|session| return session.order);
        });

        if let Some(session) = next {
            self.active_id = session.id.to_string();
        }

        return Ok(());
    }

    pub fn rename_session(&mut self, id: &str, name: &str) -> Result<(), SessionError> {
        let session = self.get_mut(id)?;
        session.name = name.to_string();

        return Ok(());
    }

    pub fn select_session(&mut self, id: &str) -> Result<(), SessionError> {
        if !self.sessions.contains_key(id) {
            return Err(SessionError::NotFound(id.to_string()));
        }

        self.active_id = id.to_string();
        return Ok(());
    }

    /// Appends a user message and returns its index, used to correlate the
    /// eventual directions response.
    pub fn append_message(&mut self, id: &str, text: &str) -> Result<usize, SessionError> {
        let session = self.get_mut(id)?;
        session.messages.push(text.to_string());
        session.last_modified = Local::now();

        return Ok(session.messages.len() - 1);
    }

    /// Replaces the session's route with `update`. Nothing from a previous
    /// response survives. Attaching twice for the same message is harmless.
    pub fn attach_response(
        &mut self,
        id: &str,
        message_index: usize,
        update: RouteUpdate,
    ) -> Result<(), SessionError> {
        let session = self.get_mut(id)?;
        if message_index >= session.messages.len() {
            return Err(SessionError::MessageIndexOutOfRange {
                index: message_index,
                len: session.messages.len(),
            });
        }

        session.timeline = update.timeline;
        session.waypoints = update.waypoints;
        session.legs = update.legs;
        session.totals = update.totals;
        session.encoded_path = update.encoded_path;
        session.response_indices.insert(message_index);
        session.last_modified = Local::now();

        return Ok(());
    }

    pub fn get(&self, id: &str) -> Option<&Session> {
        return self.sessions.get(id);
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Session, SessionError> {
        return self
            .sessions
            .get_mut(id)
            .ok_or_else(|| return SessionError::NotFound(id.to_string()));
    }

    pub fn active_id(&self) -> &str {
        return &self.active_id;
    }

    pub fn active(&self) -> &Session {
        return &self.sessions[&self.active_id];
    }

    pub fn is_active(&self, id: &str) -> bool {
        return self.active_id == id;
    }

    /// Sessions in creation order.
    pub fn list(&self) -> Vec<&Session> {
        let mut sessions = self.sessions.values().collect::<Vec<&Session>>();
        sessions.sort_by_key(|session| return session.order);

        return sessions;
    }

    /// Resolves a 1-based position from [`SessionStore::list`] or a session id.
    pub fn resolve(&self, reference: &str) -> Option<String> {
        if let Ok(position) = reference.parse::<usize>() {
            if position >= 1 {
                if let Some(session) = self.list().get(position - 1) {
                    return Some(session.id.to_string());
                }
            }
        }

        if self.sessions.contains_key(reference) {
            return Some(reference.to_string());
        }

        return None;
    }

    pub fn len(&self) -> usize {
        return self.sessions.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.sessions.is_empty();
    }
}
