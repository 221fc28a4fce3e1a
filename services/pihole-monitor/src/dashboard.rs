//! Web dashboard with JSON API endpoints and the action surface

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::actions::{ActionDispatcher, Command};
use crate::countdown::DisableCountdown;
use crate::state::StateHandle;
use crate::status::ObservedStatus;

/// Dashboard application state
#[derive(Clone)]
pub struct DashboardState {
    pub state: StateHandle,
    pub actions: Arc<ActionDispatcher>,
}

/// Body of `GET /api/status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    #[serde(flatten)]
    pub status: ObservedStatus,
    pub countdown: DisableCountdown,
    pub last_poll_epoch_ms: u64,
    pub consecutive_errors: u32,
    pub last_error: Option<String>,
    pub admin_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandRequest {
    pub command: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResponse {
    pub command: String,
    pub success: bool,
}

/// Build the dashboard axum router
pub fn build_router(state: StateHandle, actions: Arc<ActionDispatcher>) -> Router {
    let dashboard_state = DashboardState { state, actions };

    Router::new()
        .route("/", get(index_handler))
        .route("/api/status", get(status_handler))
        .route("/api/command", post(command_handler))
        .route("/health", get(health_handler))
        .with_state(dashboard_state)
}

async fn snapshot(state: &StateHandle) -> StatusResponse {
    let state = state.read().await;
    StatusResponse {
        status: state.cache.read(),
        countdown: state.countdown,
        last_poll_epoch_ms: state.cache.last_poll_epoch_ms(),
        consecutive_errors: state.cache.consecutive_errors(),
        last_error: state.cache.last_error().map(str::to_string),
        admin_url: state.endpoint.admin_url(),
    }
}

/// Escape text taken from Pi-hole responses before it goes into the page
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

async fn index_handler(State(dashboard): State<DashboardState>) -> impl IntoResponse {
    let snap = snapshot(&dashboard.state).await;

    let (label, color, bg) = if snap.status.reachable {
        ("Online", "#155724", "#d4edda")
    } else {
        ("Offline", "#721c24", "#f8d7da")
    };
    let blocking = if snap.status.service_enabled {
        "enabled"
    } else {
        "disabled"
    };
    let admin_link = snap
        .admin_url
        .as_deref()
        .map(|url| {
            format!(
                r#"<p><a href="{}" target="_blank">Open Pi-hole admin</a></p>"#,
                escape_html(url)
            )
        })
        .unwrap_or_default();

    let html = format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Pi-hole Monitor</title>
    <script>
        function send(command) {{
            fetch('/api/command', {{
                method: 'POST',
                headers: {{ 'Content-Type': 'application/json' }},
                body: JSON.stringify({{ command }})
            }}).then(() => location.reload());
        }}
        setTimeout(() => location.reload(), 5000);
    </script>
</head>
<body style="font-family: system-ui, sans-serif; max-width: 640px; margin: 0 auto; padding: 1rem;">
    <h1>Pi-hole Monitor</h1>
    <p>
        <span style="display: inline-block; padding: 0.25em 0.6em; border-radius: 0.25rem; font-weight: 600; color: {color}; background-color: {bg};">{label}</span>
        Blocking {blocking}, {countdown}
    </p>
    <table style="border-collapse: collapse;">
        <tr><td style="padding: 0.5rem;">Total</td><td style="padding: 0.5rem; text-align: right;">{total}</td></tr>
        <tr><td style="padding: 0.5rem;">Ads</td><td style="padding: 0.5rem; text-align: right;">{ads}</td></tr>
    </table>
    <p>
        <button onclick="send('disable')">Disable</button>
        <button onclick="send('disable=10')">Disable 10s</button>
        <button onclick="send('disable=30')">Disable 30s</button>
        <button onclick="send('disable=300')">Disable 5min</button>
        <button onclick="send('enable')">Enable</button>
    </p>
    {admin_link}
</body>
</html>"#,
        color = color,
        bg = bg,
        label = label,
        blocking = blocking,
        countdown = snap.countdown,
        total = escape_html(&snap.status.dns_queries_today),
        ads = escape_html(&snap.status.ads_blocked_today),
        admin_link = admin_link,
    );

    Html(html)
}

async fn status_handler(State(dashboard): State<DashboardState>) -> impl IntoResponse {
    Json(snapshot(&dashboard.state).await)
}

async fn command_handler(
    State(dashboard): State<DashboardState>,
    Json(request): Json<CommandRequest>,
) -> Response {
    let command = Command::parse(&request.command);
    if command.is_local() {
        return (
            StatusCode::BAD_REQUEST,
            format!("'{}' is not a Pi-hole command", command),
        )
            .into_response();
    }

    let success = dashboard.actions.send(&command).await;
    Json(CommandResponse {
        command: command.to_string(),
        success,
    })
    .into_response()
}

async fn health_handler() -> impl IntoResponse {
    "OK"
}
