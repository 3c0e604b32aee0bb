use chrono::{DateTime, Utc};
use eunoia_agent::{Capabilities, Insight, LearnReport, LearningStats, MoodEntry, NetworkState, ThoughtStep};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Inbound chat message.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub text: String,
    pub user_id: String,
    /// Free-form client context; accepted and currently unused.
    #[serde(default)]
    pub context: serde_json::Value,
}

/// Inbound WebSocket frame. The user id comes from the socket path.
#[derive(Debug, Clone, Deserialize)]
pub struct WsRequest {
    pub text: String,
    #[serde(default)]
    pub include_thoughts: bool,
    #[serde(default)]
    pub context: serde_json::Value,
}

/// Assessment submission: a kind label plus question→answer map (0–3 scale).
#[derive(Debug, Clone, Deserialize)]
pub struct AssessmentRequest {
    #[serde(rename = "type", default = "unknown_kind")]
    pub kind: String,
    #[serde(default)]
    pub answers: BTreeMap<String, i64>,
}

fn unknown_kind() -> String {
    "unknown".to_string()
}

/// Mood analysis submission.
#[derive(Debug, Clone, Deserialize)]
pub struct MoodRequest {
    #[serde(default)]
    pub entries: Vec<MoodEntry>,
}

/// `GET /ai/status` payload.
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub capabilities: Capabilities,
    pub learning_stats: LearningStats,
    pub neural_network: NetworkState,
    pub timestamp: DateTime<Utc>,
}

/// `POST /ai/learn` payload.
#[derive(Debug, Clone, Serialize)]
pub struct LearnResponse {
    pub status: &'static str,
    pub result: LearnReport,
}

/// `GET /ai/insights` payload.
#[derive(Debug, Clone, Serialize)]
pub struct InsightsResponse {
    pub insights: Vec<Insight>,
    pub timestamp: DateTime<Utc>,
}

/// `GET /ai/thoughts` payload.
#[derive(Debug, Clone, Serialize)]
pub struct ThoughtsResponse {
    pub thoughts: Vec<ThoughtStep>,
    pub timestamp: DateTime<Utc>,
}

/// Error body for rejected requests.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
}
