//! HTTP endpoints
//!
//! REST API for the hostel assistant.

use axum::{
    extract::{Json, Path, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use hostel_agent_tools::ToolExecutor;

use crate::state::AppState;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let cors_layer = build_cors_layer(
        &state.settings.server.cors_origins,
        state.settings.server.cors_enabled,
    );

    Router::new()
        // Session endpoints
        .route("/api/sessions", post(create_session).get(list_sessions))
        .route("/api/sessions/:id", get(get_session).delete(delete_session))
        // Chat endpoint
        .route("/api/chat/:session_id", post(chat))
        // Tool endpoints
        .route("/api/tools", get(list_tools))
        .route("/api/tools/:name", post(call_tool))
        // Health checks
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state)
}

/// Build the CORS layer from configured origins.
///
/// - Disabled means permissive (development only)
/// - No configured origins defaults to localhost:3000
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        tracing::warn!("CORS is disabled - allowing all origins (NOT FOR PRODUCTION)");
        return CorsLayer::permissive();
    }

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    if parsed_origins.is_empty() {
        tracing::info!("No CORS origins configured, defaulting to localhost:3000");
        return CorsLayer::new()
            .allow_origin("http://localhost:3000".parse::<HeaderValue>().unwrap())
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers(Any);
    }

    tracing::info!("CORS configured with {} origins", parsed_origins.len());
    // Credentials rule out wildcard headers, so name the ones the UI sends
    CorsLayer::new()
        .allow_origin(parsed_origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

/// Create session
async fn create_session(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let session = state
        .sessions
        .create()
        .map_err(|e| {
            tracing::error!("Session creation failed: {}", e);
            StatusCode::from(e)
        })?;

    Ok(Json(serde_json::json!({
        "session_id": session.id,
        "greeting": session.agent.greeting(),
    })))
}

/// Get session info
async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let session = state.sessions.get(&id).ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(serde_json::json!({
        "session_id": session.id,
        "active": session.is_active(),
        "flow_state": session.agent.flow_state().map(|s| s.to_string()),
        "turn_count": session.agent.history().len(),
    })))
}

/// Delete session
async fn delete_session(State(state): State<AppState>, Path(id): Path<String>) -> StatusCode {
    state.sessions.remove(&id);
    StatusCode::NO_CONTENT
}

/// List sessions
async fn list_sessions(State(state): State<AppState>) -> Json<serde_json::Value> {
    let sessions = state.sessions.list();
    Json(serde_json::json!({
        "sessions": sessions,
        "count": sessions.len(),
    }))
}

/// Chat request
#[derive(Debug, Deserialize)]
struct ChatRequest {
    message: String,
}

/// Chat response
#[derive(Debug, Serialize)]
struct ChatResponse {
    response: String,
    intent: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    photos: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    complaint_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    flow_state: Option<String>,
    turn_count: usize,
}

/// Chat endpoint
async fn chat(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, StatusCode> {
    let session = state.sessions.get(&session_id).ok_or(StatusCode::NOT_FOUND)?;

    session.touch();

    match session.agent.process(&request.message).await {
        Ok(reply) => Ok(Json(ChatResponse {
            response: reply.text,
            intent: reply.intent.to_string(),
            photos: reply.photos,
            complaint_url: reply.portal_url,
            flow_state: reply.flow_state,
            turn_count: session.agent.history().len(),
        })),
        Err(e) => {
            tracing::error!("Chat error: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// List tools
async fn list_tools(State(state): State<AppState>) -> Json<serde_json::Value> {
    let tools: Vec<serde_json::Value> = state
        .tools
        .list_tools()
        .into_iter()
        .map(|t| {
            serde_json::json!({
                "name": t.name,
                "description": t.description,
                "input_schema": t.input_schema,
            })
        })
        .collect();

    Json(serde_json::json!({ "tools": tools }))
}

/// Tool call request
#[derive(Debug, Deserialize)]
struct ToolCallRequest {
    #[serde(default)]
    arguments: serde_json::Value,
}

/// Call tool
async fn call_tool(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(request): Json<ToolCallRequest>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    match state.tools.execute(&name, request.arguments).await {
        Ok(output) => {
            let content: Vec<serde_json::Value> = output
                .content
                .into_iter()
                .map(|c| match c {
                    hostel_agent_tools::ContentBlock::Text { text } => {
                        serde_json::json!({ "type": "text", "text": text })
                    }
                    hostel_agent_tools::ContentBlock::Image { path } => {
                        serde_json::json!({ "type": "image", "path": path })
                    }
                })
                .collect();

            Ok(Json(serde_json::json!({
                "content": content,
                "is_error": output.is_error,
            })))
        }
        Err(e) => {
            tracing::error!("Tool error: {:?}", e);
            Ok(Json(serde_json::json!({
                "content": [{ "type": "text", "text": e.to_string() }],
                "is_error": true,
            })))
        }
    }
}

/// Health check
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Readiness check
async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ready",
        "sessions": state.sessions.count(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostel_agent_config::Settings;

    #[test]
    fn test_router_creation() {
        let state = AppState::new(Settings::default());
        let _ = create_router(state);
    }

    #[test]
    fn test_cors_defaults_to_localhost() {
        let _ = build_cors_layer(&[], true);
        let _ = build_cors_layer(&["https://hostel.example.edu".to_string()], true);
        let _ = build_cors_layer(&[], false);
    }
}
