use crate::types::{
    AssessmentRequest, ChatRequest, ErrorBody, InsightsResponse, LearnResponse, MoodRequest,
    StatusResponse, ThoughtsResponse, WsRequest,
};
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use eunoia_agent::WellnessAgent;
use eunoia_core::AgentError;
use futures_util::{SinkExt, StreamExt};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Shared state for the gateway routes.
#[derive(Clone)]
struct AppState {
    agent: Arc<WellnessAgent>,
    /// Number of active WebSocket connections.
    active_ws: Arc<AtomicUsize>,
}

/// Build the gateway router around a shared agent.
pub fn router(agent: Arc<WellnessAgent>) -> Router {
    let state = AppState {
        agent,
        active_ws: Arc::new(AtomicUsize::new(0)),
    };
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/ai/status", get(status))
        .route("/ai/chat", post(chat))
        .route("/ai/learn", post(learn))
        .route("/ai/insights", get(insights))
        .route("/ai/thoughts", get(thoughts))
        .route("/ai/assessment", post(assessment))
        .route("/ai/mood", post(mood))
        .route("/ws/:user_id", get(ws_upgrade))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until `shutdown` resolves.
pub async fn serve(
    agent: Arc<WellnessAgent>,
    host: &str,
    port: u16,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("Gateway failed to bind {addr}: {e}"))?;
    tracing::info!("Gateway listening on {addr}");
    axum::serve(listener, router(agent))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

// ============================================================================
// Route handlers
// ============================================================================

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Eunoia wellness service is running",
        "status": "active",
    }))
}

async fn health() -> &'static str {
    "ok"
}

async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "active",
        capabilities: state.agent.capabilities().await,
        learning_stats: state.agent.learning_stats().await,
        neural_network: state.agent.network_state().await,
        timestamp: Utc::now(),
    })
}

async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorBody>)> {
    let reply = state
        .agent
        .process_message(&req.text, &req.user_id)
        .await
        .map_err(reject)?;
    Ok(Json(reply))
}

async fn learn(State(state): State<AppState>) -> Result<impl IntoResponse, StatusCode> {
    match state.agent.trigger_learn().await {
        Ok(result) => Ok(Json(LearnResponse {
            status: "learning_started",
            result,
        })),
        Err(e) => {
            tracing::error!("Error triggering learning: {e:#}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

async fn insights(State(state): State<AppState>) -> Json<InsightsResponse> {
    Json(InsightsResponse {
        insights: state.agent.insights().await,
        timestamp: Utc::now(),
    })
}

async fn thoughts(State(state): State<AppState>) -> Json<ThoughtsResponse> {
    Json(ThoughtsResponse {
        thoughts: state.agent.thoughts().await,
        timestamp: Utc::now(),
    })
}

async fn assessment(
    State(state): State<AppState>,
    Json(req): Json<AssessmentRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorBody>)> {
    let result = state
        .agent
        .analyze_assessment(&req.kind, &req.answers)
        .map_err(reject)?;
    Ok(Json(result))
}

async fn mood(State(state): State<AppState>, Json(req): Json<MoodRequest>) -> impl IntoResponse {
    Json(state.agent.analyze_mood(&req.entries))
}

/// Map a request-level agent error to a 422 with a JSON body.
fn reject(err: AgentError) -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorBody {
            error: err.to_string(),
        }),
    )
}

// ============================================================================
// WebSocket
// ============================================================================

async fn ws_upgrade(
    ws: WebSocketUpgrade,
    Path(user_id): Path<String>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, user_id, state))
}

/// Per-connection loop: each inbound JSON frame is processed as a chat
/// message; the reply payload goes back as JSON, optionally followed by a
/// thoughts frame.
async fn handle_ws(socket: WebSocket, user_id: String, state: AppState) {
    let count = state.active_ws.fetch_add(1, Ordering::Relaxed) + 1;
    tracing::info!(%user_id, active = count, "WebSocket connected");
    let (mut ws_tx, mut ws_rx) = socket.split();

    while let Some(Ok(msg)) = ws_rx.next().await {
        match msg {
            Message::Text(text) => {
                let req: WsRequest = match serde_json::from_str(&text) {
                    Ok(r) => r,
                    Err(e) => {
                        let err = serde_json::json!({"error": format!("Invalid JSON: {e}")});
                        let _ = ws_tx.send(Message::Text(err.to_string())).await;
                        continue;
                    }
                };

                match state.agent.process_message(&req.text, &user_id).await {
                    Ok(reply) => {
                        let json = serde_json::to_string(&reply).unwrap_or_default();
                        if ws_tx.send(Message::Text(json)).await.is_err() {
                            break;
                        }
                        if req.include_thoughts {
                            let frame = serde_json::json!({
                                "type": "thoughts",
                                "data": state.agent.thoughts().await,
                            });
                            if ws_tx.send(Message::Text(frame.to_string())).await.is_err() {
                                break;
                            }
                        }
                    }
                    Err(e) => {
                        let err = serde_json::json!({"error": e.to_string()});
                        if ws_tx.send(Message::Text(err.to_string())).await.is_err() {
                            break;
                        }
                    }
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }

    let count = state.active_ws.fetch_sub(1, Ordering::Relaxed) - 1;
    tracing::info!(%user_id, active = count, "WebSocket disconnected");
}
