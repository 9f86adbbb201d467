//! HTTP server for Slack events.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

use crate::commands::Dispatcher;
use crate::slack::events::{verify_token, EventEnvelope, EVENT_CALLBACK, URL_VERIFICATION};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Token Slack includes in every event payload.
    pub app_token: Arc<str>,
    /// Runs mention commands.
    pub dispatcher: Dispatcher,
}

/// Build the HTTP router for the bot.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/slack/event", post(slack_event_handler))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// Handle a Slack Events API request.
///
/// Slack expects an answer within three seconds, so mentions are acknowledged
/// immediately and the command runs on a background task.
async fn slack_event_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, StatusCode> {
    let envelope: EventEnvelope = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, "Invalid event payload");
        StatusCode::BAD_REQUEST
    })?;

    let (Some(kind), Some(token)) = (envelope.kind(), envelope.token()) else {
        warn!("Event payload is missing its type or token");
        return Err(StatusCode::BAD_REQUEST);
    };

    if !verify_token(token, &state.app_token) {
        error!("Unauthorized event payload");
        return Err(StatusCode::UNAUTHORIZED);
    }

    if kind == URL_VERIFICATION {
        info!("Answering URL verification challenge");
        return Ok(Json(json!({
            "challenge": envelope.challenge.as_deref().unwrap_or_default()
        })));
    }

    if kind != EVENT_CALLBACK {
        warn!(event_type = %kind, "Unsupported event type");
        return Err(StatusCode::BAD_REQUEST);
    }

    // Slack retries any non-2xx delivery, so events without text are
    // acknowledged and dropped.
    let Some(text) = envelope.mention_text().map(str::to_string) else {
        debug!("Event callback without mention text");
        return Ok(Json(json!({ "status": "ignored" })));
    };

    let dispatcher = state.dispatcher.clone();
    tokio::spawn(async move {
        dispatcher.handle_mention(&text).await;
    });

    Ok(Json(json!({ "status": "accepted" })))
}
