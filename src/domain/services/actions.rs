#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::DirectionsBox;
use crate::domain::models::Event;
use crate::domain::models::RoutePrompt;

async fn request_route(directions: &DirectionsBox, prompt: RoutePrompt) -> Event {
    tracing::debug!(
        session_id = %prompt.session_id,
        message_index = prompt.message_index,
        "Requesting directions"
    );

    match directions.request_route(&prompt.text).await {
        Ok(response) => {
            return Event::RouteResponse {
                session_id: prompt.session_id,
                message_index: prompt.message_index,
                response,
            };
        }
        Err(err) => {
            tracing::error!(
                session_id = %prompt.session_id,
                message_index = prompt.message_index,
                error = ?err,
                "Directions request failed"
            );
            return Event::RouteFailed {
                session_id: prompt.session_id,
                message_index: prompt.message_index,
                error: err.to_string(),
            };
        }
    }
}

pub struct ActionsService {}

impl ActionsService {
    /// Serves actions until every sender is dropped. Each route request runs
    /// on its own task, so a slow response never holds up the next prompt.
    pub async fn start(
        directions: DirectionsBox,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        let directions = Arc::new(directions);

        while let Some(action) = rx.recv().await {
            match action {
                Action::RouteRequest(prompt) => {
                    let directions = directions.clone();
                    let worker_tx = tx.clone();
                    tokio::spawn(async move {
                        let event = request_route(&directions, prompt).await;
                        if worker_tx.send(event).is_err() {
                            tracing::debug!("Dropping directions result, nobody is listening");
                        }
                    });
                }
            }
        }

        return Ok(());
    }
}
