//! The agent facade.
//!
//! `WellnessAgent` composes the analyzers into a single `process_message`
//! pipeline and exposes the read accessors the gateway serves. All mutable
//! state lives behind two lock domains: conversation state (profiles,
//! global log, reasoning trace) and learning state (stats, network,
//! insights). The learning cycle's simulated sleep is held outside both.

use crate::assessment::{self, AssessmentResult};
use crate::composer;
use crate::learning::{self, Insight, LearnReport, LearningStats, NetworkState};
use crate::mood::{self, MoodAnalysis, MoodEntry};
use crate::profile::ProfileStore;
use crate::snapshot::AgentSnapshot;
use crate::trace::{ReasoningTrace, ThoughtKind, ThoughtStep};
use chrono::{DateTime, Local, Timelike, Utc};
use eunoia_core::{crisis, patterns, AgentError, Emotion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Global conversation log retention. The reference behavior never trims
/// this log; we bound it instead (see DESIGN.md).
const CONVERSATION_LOG_LIMIT: usize = 1000;

// ============================================================================
// Payload types
// ============================================================================

/// Full response payload for one processed message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentReply {
    pub text: String,
    pub confidence: f64,
    pub reasoning: String,
    pub emotion_detected: Emotion,
    pub patterns_identified: Vec<String>,
    pub recommendations: Vec<String>,
    /// Crisis score, 0–10.
    pub crisis_level: u8,
    pub timestamp: DateTime<Utc>,
    /// The 5 most recent reasoning-trace steps, oldest-first.
    pub thinking_process: Vec<ThoughtStep>,
}

/// One entry in the global conversation log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationRecord {
    pub id: Uuid,
    pub user_id: String,
    pub message: String,
    pub response: AgentReply,
    pub timestamp: DateTime<Utc>,
}

/// Static capability descriptor served by the status endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct Capabilities {
    pub autonomous_learning: bool,
    pub pattern_recognition: bool,
    pub emotional_intelligence: bool,
    pub crisis_detection: bool,
    pub personalization: bool,
    pub real_time_adaptation: bool,
    pub personality_traits: BTreeMap<String, f64>,
    pub supported_emotions: Vec<&'static str>,
    pub neural_network_layers: usize,
}

/// Construction options; defaults match production behavior.
#[derive(Debug, Clone)]
pub struct AgentOptions {
    /// Simulated duration of one learning cycle.
    pub learn_cycle: Duration,
    /// Seed for all stochastic choices; `None` seeds from entropy.
    pub rng_seed: Option<u64>,
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self {
            learn_cycle: Duration::from_secs(2),
            rng_seed: None,
        }
    }
}

// ============================================================================
// Lock domains
// ============================================================================

struct ConvState {
    profiles: ProfileStore,
    conversation_log: VecDeque<ConversationRecord>,
    trace: ReasoningTrace,
    rng: StdRng,
}

impl ConvState {
    /// Record a reasoning step with a randomized confidence in [0.70, 0.95].
    fn think(&mut self, kind: ThoughtKind, content: String) {
        let confidence = self.rng.gen_range(0.70..0.95);
        self.trace.push(kind, content, confidence);
    }
}

struct LearnState {
    stats: LearningStats,
    network: NetworkState,
    insights: VecDeque<Insight>,
    rng: StdRng,
}

/// Resets the reentrancy flag on every exit path, including cancellation.
struct LearnGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for LearnGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

// ============================================================================
// The agent
// ============================================================================

pub struct WellnessAgent {
    conv: Mutex<ConvState>,
    learn: Mutex<LearnState>,
    is_learning: AtomicBool,
    learn_cycle: Duration,
}

impl WellnessAgent {
    pub fn new() -> Self {
        Self::with_options(AgentOptions::default())
    }

    pub fn with_options(options: AgentOptions) -> Self {
        Self::restore(AgentSnapshot::default(), options)
    }

    /// Build the agent from a restored snapshot.
    pub fn restore(snapshot: AgentSnapshot, options: AgentOptions) -> Self {
        let (conv_rng, learn_rng) = match options.rng_seed {
            Some(seed) => (
                StdRng::seed_from_u64(seed),
                StdRng::seed_from_u64(seed.wrapping_add(1)),
            ),
            None => (StdRng::from_entropy(), StdRng::from_entropy()),
        };
        Self {
            conv: Mutex::new(ConvState {
                profiles: ProfileStore::from_profiles(snapshot.user_profiles),
                conversation_log: VecDeque::new(),
                trace: ReasoningTrace::new(),
                rng: conv_rng,
            }),
            learn: Mutex::new(LearnState {
                stats: snapshot.learning_stats,
                network: snapshot.neural_network,
                insights: VecDeque::new(),
                rng: learn_rng,
            }),
            is_learning: AtomicBool::new(false),
            learn_cycle: options.learn_cycle,
        }
    }

    // ------------------------------------------------------------------
    // Message pipeline
    // ------------------------------------------------------------------

    /// Process one user message through the full analysis pipeline.
    pub async fn process_message(&self, text: &str, user_id: &str) -> Result<AgentReply, AgentError> {
        if text.trim().is_empty() {
            return Err(AgentError::EmptyMessage);
        }
        if user_id.trim().is_empty() {
            return Err(AgentError::MissingField("user_id"));
        }

        let local_hour = Local::now().hour();
        let mut conv = self.conv.lock().await;

        let preview: String = text.chars().take(50).collect();
        conv.think(
            ThoughtKind::Analysis,
            format!("Processing message from user {user_id}: '{preview}...'"),
        );

        let (history_messages, history_len) = {
            let profile = conv.profiles.get_or_create(user_id);
            (profile.history_messages(), profile.conversation_history.len())
        };

        let emotion = eunoia_core::emotion::detect_emotion(text);
        conv.think(ThoughtKind::Emotion, format!("Detected emotion: {emotion}"));

        let identified = patterns::identify(text, &history_messages, local_hour);
        conv.think(
            ThoughtKind::Pattern,
            format!("Identified patterns: {}", identified.join(", ")),
        );

        let response_text = {
            let state = &mut *conv;
            composer::compose(&mut state.rng, emotion, &identified, history_len)
        };
        conv.think(
            ThoughtKind::Generation,
            format!("Generated response with {} characters", response_text.len()),
        );

        let confidence = calculate_confidence(text, emotion, &identified);
        let crisis_level = crisis::assess(text, emotion);
        let recommendations = crate::recommend::recommend(emotion, &identified, crisis_level);

        conv.profiles.record_interaction(user_id, text, emotion, &identified);

        let reply = AgentReply {
            text: response_text,
            confidence,
            reasoning: format!(
                "Emotion-based response for {emotion} with {} patterns identified",
                identified.len()
            ),
            emotion_detected: emotion,
            patterns_identified: identified,
            recommendations,
            crisis_level,
            timestamp: Utc::now(),
            thinking_process: conv.trace.for_reply(),
        };

        conv.conversation_log.push_back(ConversationRecord {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            message: text.to_string(),
            response: reply.clone(),
            timestamp: reply.timestamp,
        });
        while conv.conversation_log.len() > CONVERSATION_LOG_LIMIT {
            conv.conversation_log.pop_front();
        }
        drop(conv);

        {
            let mut learn = self.learn.lock().await;
            let state = &mut *learn;
            state.stats.note_interaction(&mut state.rng);
        }

        tracing::debug!(
            user_id,
            emotion = %reply.emotion_detected,
            crisis = reply.crisis_level,
            "Processed message"
        );
        Ok(reply)
    }

    // ------------------------------------------------------------------
    // Learning
    // ------------------------------------------------------------------

    /// Run one learning cycle, or report `already_learning` if one is in
    /// flight. The reentrancy flag is released on every exit path.
    pub async fn trigger_learn(&self) -> anyhow::Result<LearnReport> {
        if self
            .is_learning
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Ok(LearnReport::already_learning());
        }
        let _guard = LearnGuard {
            flag: &self.is_learning,
        };

        {
            let mut conv = self.conv.lock().await;
            conv.think(
                ThoughtKind::Learning,
                "Starting autonomous learning process...".to_string(),
            );
        }

        // Simulated workload; stands in for I/O-bound processing and must
        // not hold either lock.
        tokio::time::sleep(self.learn_cycle).await;

        let (delta, insight_count) = {
            let mut learn = self.learn.lock().await;
            let state = &mut *learn;
            let delta = state.network.apply_cycle(&mut state.rng);
            learning::push_insights(&mut state.insights, learning::synthetic_insights(Utc::now()));
            (delta, state.insights.len())
        };

        {
            let mut conv = self.conv.lock().await;
            conv.think(
                ThoughtKind::Learning,
                "Learning process completed successfully".to_string(),
            );
        }

        Ok(LearnReport::completed(delta, insight_count))
    }

    /// Whether a learning cycle is currently in flight.
    pub fn is_learning(&self) -> bool {
        self.is_learning.load(Ordering::SeqCst)
    }

    // ------------------------------------------------------------------
    // Stateless analyses
    // ------------------------------------------------------------------

    pub fn analyze_assessment(
        &self,
        kind: &str,
        answers: &BTreeMap<String, i64>,
    ) -> Result<AssessmentResult, AgentError> {
        assessment::analyze(kind, answers)
    }

    pub fn analyze_mood(&self, entries: &[MoodEntry]) -> MoodAnalysis {
        mood::analyze(entries)
    }

    // ------------------------------------------------------------------
    // Read accessors
    // ------------------------------------------------------------------

    pub async fn learning_stats(&self) -> LearningStats {
        self.learn.lock().await.stats.clone()
    }

    pub async fn network_state(&self) -> NetworkState {
        self.learn.lock().await.network.clone()
    }

    pub async fn insights(&self) -> Vec<Insight> {
        self.learn.lock().await.insights.iter().cloned().collect()
    }

    /// The 10 most recent reasoning steps, oldest-first.
    pub async fn thoughts(&self) -> Vec<ThoughtStep> {
        self.conv.lock().await.trace.recent()
    }

    pub async fn has_conversations(&self) -> bool {
        !self.conv.lock().await.conversation_log.is_empty()
    }

    pub async fn capabilities(&self) -> Capabilities {
        let layers = self.learn.lock().await.network.layers.len();
        let personality_traits: BTreeMap<String, f64> = [
            ("empathy", 0.9),
            ("curiosity", 0.8),
            ("analytical", 0.95),
            ("creativity", 0.7),
            ("patience", 0.9),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        Capabilities {
            autonomous_learning: true,
            pattern_recognition: true,
            emotional_intelligence: true,
            crisis_detection: true,
            personalization: true,
            real_time_adaptation: true,
            personality_traits,
            supported_emotions: Emotion::ALL.iter().map(|e| e.as_str()).collect(),
            neural_network_layers: layers,
        }
    }

    /// Export the persistable state.
    pub async fn export_snapshot(&self) -> AgentSnapshot {
        let profiles = self.conv.lock().await.profiles.export();
        let learn = self.learn.lock().await;
        AgentSnapshot {
            user_profiles: profiles,
            learning_stats: learn.stats.clone(),
            neural_network: learn.network.clone(),
        }
    }
}

impl Default for WellnessAgent {
    fn default() -> Self {
        Self::new()
    }
}

/// Confidence in the composed reply, capped at 0.95.
fn calculate_confidence(message: &str, emotion: Emotion, patterns: &[String]) -> f64 {
    let mut confidence = 0.75;
    if emotion != Emotion::Neutral {
        confidence += 0.1;
    }
    confidence += patterns.len() as f64 * 0.02;
    if message.split_whitespace().count() > 20 {
        confidence += 0.05;
    }
    confidence.min(0.95)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_agent() -> WellnessAgent {
        WellnessAgent::with_options(AgentOptions {
            learn_cycle: Duration::from_millis(10),
            rng_seed: Some(42),
        })
    }

    #[tokio::test]
    async fn test_process_message_payload_shape() {
        let agent = test_agent();
        let reply = agent
            .process_message("I feel so anxious about work deadlines", "ada")
            .await
            .unwrap();
        assert_eq!(reply.emotion_detected, Emotion::Anxiety);
        assert!(!reply.text.is_empty());
        assert!(reply.confidence > 0.75 && reply.confidence <= 0.95);
        assert!(reply.thinking_process.len() <= 5);
        assert!(reply.reasoning.contains("anxiety"));
    }

    #[tokio::test]
    async fn test_empty_message_rejected() {
        let agent = test_agent();
        assert_eq!(
            agent.process_message("   ", "ada").await.unwrap_err(),
            AgentError::EmptyMessage
        );
        assert_eq!(
            agent.process_message("hello", "").await.unwrap_err(),
            AgentError::MissingField("user_id")
        );
    }

    #[tokio::test]
    async fn test_interaction_counter_advances() {
        let agent = test_agent();
        agent.process_message("hello there friend", "ada").await.unwrap();
        agent.process_message("hello again friend", "ada").await.unwrap();
        assert_eq!(agent.learning_stats().await.total_interactions, 2);
    }

    #[tokio::test]
    async fn test_crisis_message_gets_crisis_recommendations_first() {
        let agent = test_agent();
        let reply = agent
            .process_message(
                "I feel hopeless, like I should end it all, it's unbearable",
                "ada",
            )
            .await
            .unwrap();
        assert!(reply.crisis_level > 5);
        assert!(reply.recommendations[0].contains("988"));
        assert!(reply.recommendations[1].contains("emergency"));
        assert!(reply.recommendations[2].contains("trusted"));
    }

    #[tokio::test]
    async fn test_confidence_capped() {
        let agent = test_agent();
        let long = format!("I am so anxious and worried {}", "word ".repeat(60));
        let reply = agent.process_message(&long, "ada").await.unwrap();
        assert!(reply.confidence <= 0.95);
    }

    #[tokio::test]
    async fn test_capabilities_descriptor() {
        let agent = test_agent();
        let caps = agent.capabilities().await;
        assert!(caps.crisis_detection);
        assert_eq!(caps.neural_network_layers, 7);
        assert!(caps.supported_emotions.contains(&"neutral"));
        assert_eq!(caps.personality_traits["analytical"], 0.95);
    }

    #[tokio::test]
    async fn test_snapshot_roundtrip_preserves_state() {
        let agent = test_agent();
        agent.process_message("work is so stressful", "ada").await.unwrap();
        let snapshot = agent.export_snapshot().await;
        assert_eq!(snapshot.learning_stats.total_interactions, 1);
        assert!(snapshot.user_profiles.contains_key("ada"));

        let restored = WellnessAgent::restore(
            snapshot,
            AgentOptions {
                learn_cycle: Duration::from_millis(10),
                rng_seed: Some(1),
            },
        );
        assert_eq!(restored.learning_stats().await.total_interactions, 1);
    }

    #[test]
    fn test_confidence_formula() {
        assert_eq!(calculate_confidence("short note", Emotion::Neutral, &[]), 0.75);
        let one_pattern = vec!["seeking_information".to_string()];
        let c = calculate_confidence("short note?", Emotion::Anxiety, &one_pattern);
        assert!((c - 0.87).abs() < 1e-9);
    }
}
