#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use reqwest::Url;
use tokio::sync::mpsc;

use super::itinerary;
use super::navigation;
use super::RouteSynchronizer;
use super::SessionStore;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::RoutePrompt;

/// What became of a directions result once it reached the app.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Attached to its session. `shown` is set when that session is active
    /// and the map was redrawn.
    Attached {
        session_id: String,
        message_index: usize,
        shown: bool,
    },
    Failed {
        session_id: String,
        message_index: usize,
        error: String,
    },
}

/// Conversation and map state for one running app. Every change to the
/// active session goes through here so the map always shows the active
/// session's route.
pub struct AppState {
    pub sessions: SessionStore,
    pub map: RouteSynchronizer,
    action_tx: mpsc::UnboundedSender<Action>,
    in_flight: usize,
}

impl AppState {
    pub fn new(map: RouteSynchronizer, action_tx: mpsc::UnboundedSender<Action>) -> AppState {
        return AppState {
            sessions: SessionStore::new(),
            map,
            action_tx,
            in_flight: 0,
        };
    }

    pub fn waiting_for_directions(&self) -> bool {
        return self.in_flight > 0;
    }

    /// Records the prompt on the active session and asks for directions. The
    /// request remembers which session and message it belongs to.
    pub fn submit_prompt(&mut self, text: &str) -> Result<RoutePrompt> {
        let text = text.trim();
        if text.is_empty() {
            bail!("Describe where you want to go first.");
        }

        let session_id = self.sessions.active_id().to_string();
        let message_index = self.sessions.append_message(&session_id, text)?;
        let prompt = RoutePrompt::new(&session_id, message_index, text);

        self.action_tx.send(Action::RouteRequest(prompt.clone()))?;
        self.in_flight += 1;

        return Ok(prompt);
    }

    pub async fn handle_event(&mut self, event: Event) -> Result<RouteOutcome> {
        self.in_flight = self.in_flight.saturating_sub(1);

        match event {
            Event::RouteResponse {
                session_id,
                message_index,
                response,
            } => {
                let update = itinerary::route_update(&response);
                self.sessions
                    .attach_response(&session_id, message_index, update)?;

                let shown = self.sessions.is_active(&session_id);
                if shown {
                    self.sync_map().await;
                }

                tracing::debug!(%session_id, message_index, shown, "Attached route");
                return Ok(RouteOutcome::Attached {
                    session_id,
                    message_index,
                    shown,
                });
            }
            Event::RouteFailed {
                session_id,
                message_index,
                error,
            } => {
                return Ok(RouteOutcome::Failed {
                    session_id,
                    message_index,
                    error,
                });
            }
        }
    }

    /// Redraws the map from the active session.
    pub async fn sync_map(&mut self) {
        let (geometry, coords) = itinerary::map_view(self.sessions.active());
        self.map.sync(geometry, coords).await;
    }

    pub async fn new_session(&mut self) -> String {
        let id = self.sessions.create_session();
        self.sync_map().await;

        return id;
    }

    pub async fn select_session(&mut self, id: &str) -> Result<()> {
        self.sessions.select_session(id)?;
        self.sync_map().await;

        return Ok(());
    }

    pub async fn delete_session(&mut self, id: &str) -> Result<()> {
        let was_active = self.sessions.is_active(id);
        self.sessions.delete_session(id)?;
        if was_active {
            self.sync_map().await;
        }

        return Ok(());
    }

    pub fn rename_session(&mut self, id: &str, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            bail!("Session names can't be empty.");
        }

        self.sessions.rename_session(id, name)?;
        return Ok(());
    }

    /// Google Maps link for the active session's waypoints.
    pub fn export_url(&self, travel_mode: &str, navigate: bool) -> Option<Url> {
        let coords = itinerary::waypoint_coords(&self.sessions.active().waypoints);
        return navigation::google_maps_url(&coords, travel_mode, navigate);
    }
}
