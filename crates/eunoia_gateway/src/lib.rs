//! HTTP + WebSocket gateway for the wellness agent.
//!
//! Thin I/O layer: every route delegates straight to the shared
//! [`eunoia_agent::WellnessAgent`]; the only state held here is the
//! WebSocket connection registry.

mod server;
mod types;

pub use server::{router, serve};
pub use types::{AssessmentRequest, ChatRequest, MoodRequest, StatusResponse};
