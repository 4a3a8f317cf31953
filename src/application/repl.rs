#[cfg(test)]
#[path = "repl_test.rs"]
mod tests;

use std::io::Write;
use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use chrono::Local;
use chrono::NaiveDateTime;
use chrono::Timelike;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::RendererName;
use crate::domain::models::Session;
use crate::domain::models::SlashCommand;
use crate::domain::services::aggregator;
use crate::domain::services::hours::HoursStatus;
use crate::domain::services::hours::OpeningHours;
use crate::domain::services::itinerary;
use crate::domain::services::itinerary::Maneuver;
use crate::domain::services::AppState;
use crate::domain::services::CameraMode;
use crate::domain::services::MapState;
use crate::domain::services::PanelSide;
use crate::domain::services::RouteOutcome;
use crate::domain::services::RouteSynchronizer;
use crate::domain::services::SessionStore;
use crate::domain::services::SidePanel;
use crate::infrastructure::locators::LocatorManager;
use crate::infrastructure::renderers::RendererManager;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /new (/n) - Starts a new trip in its own session.
- /sessions (/ls) - Lists every session. The active one is marked with *.
- /select (/s) [NUMBER,ID] - Switches to a session by its number from /sessions or its ID.
- /rename [NAME] - Renames the active session.
- /delete (/d) [NUMBER,ID?] - Deletes a session. Defaults to the active one.
- /stops - Shows the stops of the active route with hours and leg times.
- /directions (/dir) - Shows turn-by-turn directions for the active route.
- /export (/x) - Prints a Google Maps link for the active route.
- /navigate (/nav) - Prints a Google Maps link that starts navigation.
- /panel (/p) [open,close,left,right?] - Toggles the chat panel, or moves it to a side. Routes are fit around it.
- /locate - Looks up your location again and recenters the map.
- /map (/m) - Shows what the map is currently displaying.
- /quit /exit (/q) - Exit Polaris.
- /help (/h) - Provides this help menu.

Anything else you type is sent as a trip description, e.g. "coffee, a bookstore, then a walk in the park".
        "#;

    return text.trim().to_string();
}

pub fn greeting(username: &str, hour: u32) -> String {
    if hour < 12 {
        return format!("Good Morning, {username}!");
    }
    if hour < 18 {
        return format!("Good Afternoon, {username}!");
    }

    return format!("Good Evening, {username}!");
}

fn plural(count: usize, unit: &str) -> String {
    return aggregator::plural(count as u64, unit);
}

/// One line describing the route attached to a session.
pub fn route_summary(session: &Session) -> String {
    let stops = plural(session.waypoints.len(), "stop");
    if session.legs.is_empty() {
        return stops;
    }

    return format!(
        "{stops} · {} · {}",
        aggregator::format_total_distance(session.totals.total_distance_km),
        aggregator::format_total_duration(session.totals.total_duration_min)
    );
}

pub fn render_sessions(store: &SessionStore) -> String {
    return store
        .list()
        .iter()
        .enumerate()
        .map(|(idx, session)| {
            let marker = if store.is_active(&session.id) { "*" } else { " " };
            let route = if session.has_route() { ", route ready" } else { "" };
            return format!(
                "{marker} {}. {} (ID: {}, {}{route})",
                idx + 1,
                session.name,
                session.id,
                plural(session.messages.len(), "message")
            );
        })
        .collect::<Vec<String>>()
        .join("\n");
}

/// The conversation so far. Route details only follow the messages that
/// received one.
pub fn render_transcript(session: &Session) -> String {
    let mut lines = vec![format!("Trip: {}", session.name)];
    if session.messages.is_empty() {
        lines.push("No messages yet. Describe a trip to get started.".to_string());
    }

    for (idx, message) in session.messages.iter().enumerate() {
        lines.push(format!("› {message}"));
        if session.has_response(idx) {
            lines.push(format!("  ↳ {}", route_summary(session)));
        }
    }

    return lines.join("\n");
}

pub fn render_stops(session: &Session, now: &NaiveDateTime) -> String {
    if session.waypoints.is_empty() {
        return "No stops yet. Describe a trip to plan one.".to_string();
    }

    let mut lines = vec!["Stops".to_string()];
    if !session.legs.is_empty() {
        lines.push(format!(
            "Total distance: {} · Total time: {}",
            aggregator::format_total_distance(session.totals.total_distance_km),
            aggregator::format_total_duration(session.totals.total_duration_min)
        ));
    }

    for (idx, waypoint) in session.waypoints.iter().enumerate() {
        let mut title = format!("{}. {}", idx + 1, waypoint.name);
        if !waypoint.category.is_empty() {
            title = format!("{title} ({})", waypoint.category);
        }
        lines.push(title);

        if !waypoint.address.is_empty() {
            lines.push(format!("   {}", waypoint.address));
        }

        if let Some(leg) = itinerary::leg_into(&session.legs, idx) {
            lines.push(format!(
                "   {} · {} from the previous stop",
                leg.duration, leg.distance
            ));
        }

        if !waypoint.hours.is_empty() {
            lines.push("   Hours:".to_string());
            for line in &waypoint.hours {
                let hours = OpeningHours::parse(line);
                let status = match hours.status_at(now) {
                    HoursStatus::OpenNow => " (open now)",
                    HoursStatus::ClosedNow => " (closed now)",
                    HoursStatus::NotToday => "",
                };
                lines.push(format!("     {}{status}", hours.display()));
            }
        }

        if !waypoint.photos.is_empty() {
            lines.push(format!("   {}", plural(waypoint.photos.len(), "photo")));
        }
    }

    return lines.join("\n");
}

pub fn render_directions(session: &Session) -> String {
    if session.timeline.is_empty() {
        return "No directions yet. Describe a trip to plan one.".to_string();
    }

    let mut lines = vec!["Directions".to_string()];
    for (idx, event) in session.timeline.iter().enumerate() {
        let arrow = Maneuver::classify(&event.description).arrow();
        let mut line = format!(
            "{}. {arrow} {}",
            idx + 1,
            itinerary::instruction_text(&event.description)
        );
        if let Some(distance) = itinerary::instruction_distance(&event.description) {
            line = format!("{line} · {distance}");
        }
        lines.push(line);
    }

    return lines.join("\n");
}

pub fn render_outcome(outcome: &RouteOutcome, store: &SessionStore) -> String {
    match outcome {
        RouteOutcome::Attached {
            session_id,
            shown: true,
            ..
        } => {
            let summary = store
                .get(session_id)
                .map(route_summary)
                .unwrap_or_default();
            return format!("Route ready: {summary}. See /stops and /directions for details.");
        }
        RouteOutcome::Attached { session_id, .. } => {
            let name = store
                .get(session_id)
                .map(|session| return session.name.to_string())
                .unwrap_or_default();
            return format!("Route ready for \"{name}\". Use /select to see it on the map.");
        }
        RouteOutcome::Failed { error, .. } => {
            return format!("Couldn't plan that route: {error}");
        }
    }
}

pub fn render_panel(panel: &SidePanel) -> String {
    if !panel.open {
        return "Chat panel closed.".to_string();
    }

    return format!("Chat panel open on the {} ({} px).", panel.side, panel.width);
}

/// What the map is showing right now.
pub fn render_map(map: &RouteSynchronizer) -> String {
    let mut lines = vec![];
    let camera = match (map.state(), map.camera()) {
        (MapState::Uninitialized, _) | (_, None) => "not open".to_string(),
        (_, Some(CameraMode::Located(position))) => {
            format!("centered on you at {}", position.to_lat_lng())
        }
        (_, Some(CameraMode::Degraded)) if map.is_rotating() => "spinning globe".to_string(),
        (_, Some(CameraMode::Degraded)) => "globe".to_string(),
    };
    lines.push(format!("Map: {camera}"));

    if let Some(marker) = map.user_marker() {
        lines.push(format!("Your location: marker #{}", marker.0));
    }

    if map.route().len() < 2 {
        lines.push("Route: none".to_string());
    } else {
        lines.push(format!("Route: {}", plural(map.route().len(), "point")));
    }

    lines.push(render_panel(&map.panel()));
    return lines.join("\n");
}

pub struct ReplOptions {
    pub travel_mode: String,
    pub location: String,
    pub geolocation_timeout: Duration,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    Say(String),
    Silent,
    Quit,
}

fn resolve_session(app: &AppState, reference: &str) -> Result<String> {
    if let Some(id) = app.sessions.resolve(reference) {
        return Ok(id);
    }

    bail!(format!(
        "No session matches \"{reference}\". Run /sessions to see them."
    ))
}

pub async fn handle_line(
    app: &mut AppState,
    line: &str,
    options: &ReplOptions,
    now: &NaiveDateTime,
) -> Result<Reply> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Reply::Silent);
    }

    if !line.starts_with('/') {
        app.submit_prompt(line)?;
        return Ok(Reply::Say("Planning your route...".to_string()));
    }

    let command = match SlashCommand::parse(line) {
        Some(command) => command,
        None => bail!(format!(
            "Unknown command \"{line}\". Run /help to see what's available."
        )),
    };

    if command.is_quit() {
        return Ok(Reply::Quit);
    }

    if command.is_help() {
        return Ok(Reply::Say(help_text()));
    }

    if command.is_new_session() {
        app.new_session().await;
        return Ok(Reply::Say(format!(
            "Started a new trip: {}. You have {}.",
            app.sessions.active().name,
            plural(app.sessions.len(), "trip")
        )));
    }

    if command.is_list_sessions() {
        return Ok(Reply::Say(render_sessions(&app.sessions)));
    }

    if command.is_select_session() {
        let id = resolve_session(app, &command.rest())?;
        app.select_session(&id).await?;
        return Ok(Reply::Say(render_transcript(app.sessions.active())));
    }

    if command.is_rename_session() {
        let id = app.sessions.active_id().to_string();
        app.rename_session(&id, &command.rest())?;
        return Ok(Reply::Say(format!(
            "Renamed this trip to {}",
            app.sessions.active().name
        )));
    }

    if command.is_delete_session() {
        let id = if command.args.is_empty() {
            app.sessions.active_id().to_string()
        } else {
            resolve_session(app, &command.rest())?
        };
        let name = app
            .sessions
            .get(&id)
            .map(|session| return session.name.to_string())
            .unwrap_or_default();

        app.delete_session(&id).await?;
        return Ok(Reply::Say(format!(
            "Deleted {name}. Now on {}.",
            app.sessions.active().name
        )));
    }

    if command.is_stops() {
        return Ok(Reply::Say(render_stops(app.sessions.active(), now)));
    }

    if command.is_directions() {
        return Ok(Reply::Say(render_directions(app.sessions.active())));
    }

    if command.is_export() || command.is_navigate() {
        return match app.export_url(&options.travel_mode, command.is_navigate()) {
            Some(url) => Ok(Reply::Say(url.to_string())),
            None => Ok(Reply::Say(
                "Plan a route with at least two stops first.".to_string(),
            )),
        };
    }

    if command.is_panel() {
        let mut panel = app.map.panel();
        match command.rest().as_str() {
            "" => panel.open = !panel.open,
            "open" => panel.open = true,
            "close" => panel.open = false,
            side => match PanelSide::parse(side.to_string()) {
                Some(side) => {
                    panel.side = side;
                    panel.open = true;
                }
                None => bail!("Usage: /panel [open|close|left|right]"),
            },
        }

        app.map.set_side_panel(panel).await;
        return Ok(Reply::Say(render_panel(&panel)));
    }

    if command.is_locate() {
        let locator = LocatorManager::get(&options.location)?;
        let camera = app
            .map
            .reinitialize(&locator, options.geolocation_timeout)
            .await;
        return Ok(Reply::Say(camera_status(camera)));
    }

    if command.is_map() {
        return Ok(Reply::Say(render_map(&app.map)));
    }

    bail!(format!("Unhandled command \"{line}\""))
}

fn camera_status(camera: CameraMode) -> String {
    match camera {
        CameraMode::Located(position) => {
            return format!(
                "Map centered on your location ({}).",
                position.to_lat_lng()
            );
        }
        CameraMode::Degraded => {
            return "Couldn't find your location, showing the globe instead.".to_string();
        }
    }
}

fn print_prompt(waiting: bool) {
    if waiting {
        print!("{}", Paint::new("(planning) ").dimmed());
    }
    print!("{} ", Paint::blue("›").bold());
    if let Err(err) = std::io::stdout().flush() {
        tracing::warn!(error = ?err, "Failed to flush stdout");
    }
}

fn build_map() -> Result<RouteSynchronizer> {
    let renderer_name = match RendererName::parse(Config::get(ConfigKey::Renderer)) {
        Some(name) => name,
        None => bail!(format!(
            "Unknown renderer {}",
            Config::get(ConfigKey::Renderer)
        )),
    };
    let side = match PanelSide::parse(Config::get(ConfigKey::PanelSide)) {
        Some(side) => side,
        None => bail!(format!(
            "Unknown panel side {}",
            Config::get(ConfigKey::PanelSide)
        )),
    };

    let panel = SidePanel {
        open: true,
        side,
        width: Config::get_number(ConfigKey::PanelWidth)? as f64,
    };

    return Ok(RouteSynchronizer::new(
        RendererManager::get(renderer_name)?,
        panel,
    ));
}

pub async fn start(
    action_tx: mpsc::UnboundedSender<Action>,
    mut event_rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let options = ReplOptions {
        travel_mode: Config::get(ConfigKey::TravelMode),
        location: Config::get(ConfigKey::Location),
        geolocation_timeout: Duration::from_millis(Config::get_number(
            ConfigKey::GeolocationTimeout,
        )?),
    };
    let mut map = build_map()?;
    let locator = LocatorManager::get(&options.location)?;

    println!("{}", Paint::new("Locating you...").dimmed());
    let camera = map.initialize(&locator, options.geolocation_timeout).await;
    println!("{}", Paint::new(camera_status(camera)).dimmed());

    let mut app = AppState::new(map, action_tx);

    let now = Local::now();
    println!(
        "\n{}\nWhere would you like to go? Type /help for commands.\n",
        Paint::new(greeting(&Config::get(ConfigKey::Username), now.hour())).bold()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print_prompt(app.waiting_for_directions());

        tokio::select! {
            line = lines.next_line() => {
                let line = match line? {
                    Some(line) => line,
                    None => break,
                };

                let now = Local::now().naive_local();
                match handle_line(&mut app, &line, &options, &now).await {
                    Ok(Reply::Quit) => break,
                    Ok(Reply::Say(text)) => println!("{text}"),
                    Ok(Reply::Silent) => {}
                    Err(err) => eprintln!("{}", Paint::red(err)),
                }
            }
            event = event_rx.recv() => {
                let event = match event {
                    Some(event) => event,
                    None => bail!("Directions worker stopped unexpectedly"),
                };

                match app.handle_event(event).await {
                    Ok(outcome) => {
                        println!("\n{}", render_outcome(&outcome, &app.sessions));
                    }
                    Err(err) => {
                        tracing::warn!(error = ?err, "Dropped directions result");
                    }
                }
            }
        }
    }

    app.map.unmount().await;
    return Ok(());
}
