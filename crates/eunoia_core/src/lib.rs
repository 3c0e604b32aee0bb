//! Eunoia core — stateless analyzers shared across the agent and gateway.
//!
//! Everything in this crate is a pure function of its inputs: emotion
//! classification, behavioral pattern tagging, and crisis scoring. Stateful
//! composition lives in `eunoia_agent`.

pub mod config;
pub mod crisis;
pub mod emotion;
pub mod error;
pub mod patterns;
pub mod sentiment;

pub use config::EunoiaConfig;
pub use emotion::Emotion;
pub use error::AgentError;
