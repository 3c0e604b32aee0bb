//! The Eunoia wellness agent.
//!
//! One long-lived [`WellnessAgent`] owns all mutable state: per-user
//! profiles, the global conversation log, the reasoning trace, and the
//! simulated learning subsystem. Request handlers and the background
//! learning scheduler share it behind an `Arc`.

pub mod agent;
pub mod assessment;
pub mod composer;
pub mod learning;
pub mod mood;
pub mod profile;
pub mod recommend;
pub mod snapshot;
pub mod trace;

pub use agent::{AgentOptions, AgentReply, Capabilities, ConversationRecord, WellnessAgent};
pub use assessment::AssessmentResult;
pub use learning::{Insight, LearnReport, LearningStats, NetworkState};
pub use mood::{MoodAnalysis, MoodEntry};
pub use profile::UserProfile;
pub use snapshot::AgentSnapshot;
pub use trace::{ThoughtKind, ThoughtStep};
