use std::time::Duration;

use anyhow::Result;
use test_utils::directions_fixture;
use tokio::sync::mpsc;

use super::AppState;
use super::RouteOutcome;
use crate::domain::models::Action;
use crate::domain::models::DirectionsResponse;
use crate::domain::models::Event;
use crate::domain::models::LatLng;
use crate::domain::models::LocatorBox;
use crate::domain::models::MarkerStyle;
use crate::domain::services::RouteSynchronizer;
use crate::domain::services::SessionError;
use crate::domain::services::SidePanel;
use crate::infrastructure::locators::fixed::FixedLocator;
use crate::infrastructure::renderers::headless::HeadlessHandle;
use crate::infrastructure::renderers::headless::HeadlessRenderer;

fn fixture() -> DirectionsResponse {
    return serde_json::from_str(directions_fixture()).unwrap();
}

async fn app() -> (AppState, HeadlessHandle, mpsc::UnboundedReceiver<Action>) {
    let renderer = HeadlessRenderer::default();
    let handle = renderer.handle();
    let mut map = RouteSynchronizer::new(Box::new(renderer), SidePanel::default());
    let locator: LocatorBox = Box::new(FixedLocator::new(LatLng::new(37.77, -122.42)));
    map.initialize(&locator, Duration::from_millis(5000)).await;

    let (tx, rx) = mpsc::unbounded_channel::<Action>();
    return (AppState::new(map, tx), handle, rx);
}

fn route_markers(handle: &HeadlessHandle) -> usize {
    return handle
        .markers()
        .iter()
        .filter(|(_, style)| return *style != MarkerStyle::UserLocation)
        .count();
}

fn response_for(session_id: &str, message_index: usize) -> Event {
    return Event::RouteResponse {
        session_id: session_id.to_string(),
        message_index,
        response: fixture(),
    };
}

#[tokio::test]
async fn it_submits_prompts_for_the_active_session() -> Result<()> {
    let (mut app, _handle, mut rx) = app().await;
    let session_id = app.sessions.active_id().to_string();

    let prompt = app.submit_prompt("  coffee then books  ")?;

    assert_eq!(prompt.session_id, session_id);
    assert_eq!(prompt.message_index, 0);
    assert_eq!(prompt.text, "coffee then books");
    assert_eq!(app.sessions.active().messages, vec!["coffee then books"]);
    assert!(app.waiting_for_directions());
    assert_eq!(rx.recv().await, Some(Action::RouteRequest(prompt)));

    return Ok(());
}

#[tokio::test]
async fn it_rejects_empty_prompts() {
    let (mut app, _handle, _rx) = app().await;

    assert!(app.submit_prompt("   ").is_err());
    assert!(app.sessions.active().messages.is_empty());
    assert!(!app.waiting_for_directions());
}

#[tokio::test]
async fn it_shows_responses_for_the_active_session() -> Result<()> {
    let (mut app, handle, _rx) = app().await;
    let prompt = app.submit_prompt("coffee")?;

    let outcome = app
        .handle_event(response_for(&prompt.session_id, prompt.message_index))
        .await?;

    assert_eq!(
        outcome,
        RouteOutcome::Attached {
            session_id: prompt.session_id.to_string(),
            message_index: 0,
            shown: true,
        }
    );
    assert!(!app.waiting_for_directions());
    assert!(app.sessions.active().has_response(0));
    assert_eq!(handle.path("route").map(|path| return path.len()), Some(3));
    assert_eq!(route_markers(&handle), 3);

    return Ok(());
}

#[tokio::test]
async fn it_keeps_late_responses_off_the_map() -> Result<()> {
    let (mut app, handle, _rx) = app().await;
    let prompt = app.submit_prompt("coffee")?;
    app.new_session().await;

    let outcome = app
        .handle_event(response_for(&prompt.session_id, prompt.message_index))
        .await?;

    assert!(matches!(outcome, RouteOutcome::Attached { shown: false, .. }));
    assert!(app.sessions.get(&prompt.session_id).unwrap().has_route());
    assert!(!app.sessions.active().has_route());
    assert_eq!(handle.path_count(), 0);
    assert_eq!(route_markers(&handle), 0);

    app.select_session(&prompt.session_id).await?;
    assert_eq!(handle.path_count(), 1);
    assert_eq!(route_markers(&handle), 3);

    return Ok(());
}

#[tokio::test]
async fn it_clears_markers_when_switching_to_an_empty_session() -> Result<()> {
    let (mut app, handle, _rx) = app().await;
    let prompt = app.submit_prompt("coffee")?;
    app.handle_event(response_for(&prompt.session_id, 0)).await?;

    app.new_session().await;

    assert_eq!(route_markers(&handle), 0);
    return Ok(());
}

#[tokio::test]
async fn it_drops_responses_for_deleted_sessions() -> Result<()> {
    let (mut app, _handle, _rx) = app().await;
    let prompt = app.submit_prompt("coffee")?;
    app.delete_session(&prompt.session_id).await?;

    let err = app
        .handle_event(response_for(&prompt.session_id, 0))
        .await
        .unwrap_err();

    assert_eq!(
        err.downcast_ref::<SessionError>(),
        Some(&SessionError::NotFound(prompt.session_id.to_string()))
    );
    assert!(!app.sessions.active().has_route());

    return Ok(());
}

#[tokio::test]
async fn it_leaves_sessions_alone_on_failure() -> Result<()> {
    let (mut app, handle, _rx) = app().await;
    let prompt = app.submit_prompt("coffee")?;

    let outcome = app
        .handle_event(Event::RouteFailed {
            session_id: prompt.session_id.to_string(),
            message_index: 0,
            error: "Network error".to_string(),
        })
        .await?;

    assert!(matches!(outcome, RouteOutcome::Failed { .. }));
    assert!(!app.sessions.active().has_response(0));
    assert_eq!(app.sessions.active().messages.len(), 1);
    assert_eq!(handle.path_count(), 0);

    return Ok(());
}

#[tokio::test]
async fn it_renames_sessions() -> Result<()> {
    let (mut app, _handle, _rx) = app().await;
    let id = app.sessions.active_id().to_string();

    app.rename_session(&id, " Weekend ")?;
    assert_eq!(app.sessions.active().name, "Weekend");
    assert!(app.rename_session(&id, "  ").is_err());

    return Ok(());
}

#[tokio::test]
async fn it_exports_the_active_route() -> Result<()> {
    let (mut app, _handle, _rx) = app().await;
    assert!(app.export_url("driving", false).is_none());

    let prompt = app.submit_prompt("coffee")?;
    app.handle_event(response_for(&prompt.session_id, 0)).await?;

    let url = app.export_url("driving", false).unwrap();
    assert!(url.as_str().contains("origin=38.5%2C-120.2"));
    assert!(url.as_str().contains("destination=43.252%2C-126.453"));

    return Ok(());
}
