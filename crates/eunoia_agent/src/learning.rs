//! Simulated learning subsystem.
//!
//! None of this is real training: the stats and network structure are
//! display-only telemetry that drifts upward over time. Two distinct
//! mutation paths exist — the per-message nudge (every 10th interaction)
//! and the full learning cycle (on demand or scheduled) — and both keep
//! every metric monotonic and bounded.

use crate::agent::WellnessAgent;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Retained insight records; oldest evicted first.
pub const INSIGHT_LIMIT: usize = 10;

const ACCURACY_CAP: f64 = 0.99;
const CONFIDENCE_CAP: f64 = 0.98;

// ============================================================================
// Telemetry structures
// ============================================================================

/// Self-improvement counters shown to clients. Monotonic by construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningStats {
    pub total_interactions: u64,
    pub patterns_learned: u64,
    pub accuracy_score: f64,
    pub confidence_level: f64,
    pub neural_connections: u64,
    pub learning_rate: f64,
    pub memory_size_mb: f64,
}

impl Default for LearningStats {
    fn default() -> Self {
        Self {
            total_interactions: 0,
            patterns_learned: 0,
            accuracy_score: 0.75,
            confidence_level: 0.80,
            neural_connections: 847,
            learning_rate: 0.001,
            memory_size_mb: 2.5,
        }
    }
}

impl LearningStats {
    /// Count one processed message. Every 10th interaction applies a
    /// bounded random nudge to the displayed metrics.
    pub fn note_interaction(&mut self, rng: &mut StdRng) {
        self.total_interactions += 1;
        if self.total_interactions % 10 == 0 {
            self.patterns_learned += rng.gen_range(1..4);
            self.accuracy_score =
                (self.accuracy_score + rng.gen_range(0.001..0.005)).min(ACCURACY_CAP);
            self.confidence_level =
                (self.confidence_level + rng.gen_range(0.001..0.003)).min(CONFIDENCE_CAP);
            self.neural_connections += rng.gen_range(1..5);
            self.memory_size_mb += rng.gen_range(0.01..0.05);
        }
    }
}

/// One named layer of the simulated network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkLayer {
    pub name: String,
    pub neurons: u32,
    /// Activation level in [0, 1].
    pub activation: f64,
}

/// Display-only network telemetry. Mutated only during a learning cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkState {
    pub layers: Vec<NetworkLayer>,
    pub connections: u64,
    pub learning_rate: f64,
    pub accuracy: f64,
    pub training_epochs: u64,
}

impl Default for NetworkState {
    fn default() -> Self {
        let layer = |name: &str, neurons, activation| NetworkLayer {
            name: name.to_string(),
            neurons,
            activation,
        };
        Self {
            layers: vec![
                layer("Input Layer", 128, 0.70),
                layer("Embedding Layer", 256, 0.80),
                layer("LSTM Layer", 512, 0.75),
                layer("Attention Layer", 256, 0.82),
                layer("Dense Layer 1", 128, 0.78),
                layer("Dense Layer 2", 64, 0.85),
                layer("Output Layer", 32, 0.90),
            ],
            connections: 2847,
            learning_rate: 0.001,
            accuracy: 87.5,
            training_epochs: 0,
        }
    }
}

impl NetworkState {
    /// Apply one learning cycle's worth of drift: each layer's activation
    /// rises by a small random increment (capped at 1.0), and accuracy,
    /// connections, and the epoch counter all advance.
    pub fn apply_cycle(&mut self, rng: &mut StdRng) -> CycleDelta {
        for layer in &mut self.layers {
            layer.activation = (layer.activation + rng.gen_range(0.01..0.05)).min(1.0);
        }
        let accuracy_increase = rng.gen_range(0.1..0.5);
        let new_connections = rng.gen_range(5..15);
        self.accuracy += accuracy_increase;
        self.connections += new_connections;
        self.training_epochs += 1;
        CycleDelta {
            accuracy_increase,
            new_connections,
        }
    }
}

/// What one cycle changed, reported back to the caller.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CycleDelta {
    pub accuracy_increase: f64,
    pub new_connections: u64,
}

// ============================================================================
// Insights
// ============================================================================

/// A synthetic insight record. Content is templated, not derived from
/// real analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    pub category: String,
    pub title: String,
    pub description: String,
    pub confidence: f64,
    pub evidence: Vec<String>,
    pub action_items: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

/// The fixed pair of insights every learning cycle produces.
pub fn synthetic_insights(now: DateTime<Utc>) -> [Insight; 2] {
    let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
    [
        Insight {
            category: "pattern".to_string(),
            title: "Evening Anxiety Pattern Detected".to_string(),
            description: "Users show 68% higher anxiety levels during evening hours (6-10 PM)"
                .to_string(),
            confidence: 0.89,
            evidence: strings(&[
                "Increased anxiety keywords",
                "Time correlation analysis",
                "User feedback patterns",
            ]),
            action_items: strings(&[
                "Adjust evening response tone",
                "Offer proactive coping strategies",
            ]),
            timestamp: now,
        },
        Insight {
            category: "learning".to_string(),
            title: "Empathetic Response Effectiveness".to_string(),
            description: "Responses with high empathy scores show 45% better user engagement"
                .to_string(),
            confidence: 0.92,
            evidence: strings(&[
                "User response analysis",
                "Conversation length correlation",
                "Satisfaction indicators",
            ]),
            action_items: strings(&[
                "Increase empathy weighting",
                "Enhance emotional vocabulary",
            ]),
            timestamp: now,
        },
    ]
}

/// Append insights, evicting the oldest past [`INSIGHT_LIMIT`].
pub fn push_insights(list: &mut VecDeque<Insight>, insights: impl IntoIterator<Item = Insight>) {
    for insight in insights {
        list.push_back(insight);
    }
    while list.len() > INSIGHT_LIMIT {
        list.pop_front();
    }
}

// ============================================================================
// Cycle report
// ============================================================================

/// Outcome of a `trigger_learn` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearnReport {
    pub status: LearnStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub improvements: Option<Improvements>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearnStatus {
    Completed,
    AlreadyLearning,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Improvements {
    pub accuracy_increase: f64,
    pub new_connections: u64,
    pub insights_generated: usize,
}

impl LearnReport {
    pub fn already_learning() -> Self {
        Self {
            status: LearnStatus::AlreadyLearning,
            improvements: None,
        }
    }

    pub fn completed(delta: CycleDelta, insights_generated: usize) -> Self {
        Self {
            status: LearnStatus::Completed,
            improvements: Some(Improvements {
                accuracy_increase: delta.accuracy_increase,
                new_connections: delta.new_connections,
                insights_generated,
            }),
        }
    }
}

// ============================================================================
// Background scheduler
// ============================================================================

/// Spawn the continuous-learning task.
///
/// Every `interval_secs` the task triggers a learning cycle if the agent is
/// idle and has at least one stored conversation. A failed cycle logs and
/// backs off for `retry_secs`; the task only exits on the shutdown signal.
pub fn spawn_scheduler(
    agent: Arc<WellnessAgent>,
    interval_secs: u64,
    retry_secs: u64,
    mut shutdown: watch::Receiver<bool>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
        // The first tick fires immediately; skip it so startup doesn't learn.
        interval.tick().await;
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if !agent.has_conversations().await || agent.is_learning() {
                        continue;
                    }
                    match agent.trigger_learn().await {
                        Ok(report) => {
                            tracing::debug!(status = ?report.status, "Scheduled learning cycle finished");
                        }
                        Err(e) => {
                            tracing::error!("Error in continuous learning: {e:#}");
                            tokio::time::sleep(Duration::from_secs(retry_secs.max(1))).await;
                        }
                    }
                }
                _ = shutdown.changed() => {
                    tracing::info!("Learning scheduler shutting down");
                    break;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(11)
    }

    #[test]
    fn test_stats_nudge_every_tenth_interaction() {
        let mut stats = LearningStats::default();
        let mut rng = rng();
        for _ in 0..9 {
            stats.note_interaction(&mut rng);
        }
        assert_eq!(stats.total_interactions, 9);
        assert_eq!(stats.patterns_learned, 0);
        assert_eq!(stats.accuracy_score, 0.75);

        stats.note_interaction(&mut rng);
        assert_eq!(stats.total_interactions, 10);
        assert!(stats.patterns_learned >= 1);
        assert!(stats.accuracy_score > 0.75);
        assert!(stats.neural_connections > 847);
        assert!(stats.memory_size_mb > 2.5);
    }

    #[test]
    fn test_stats_caps_hold_under_heavy_use() {
        let mut stats = LearningStats::default();
        let mut rng = rng();
        for _ in 0..5000 {
            stats.note_interaction(&mut rng);
        }
        assert!(stats.accuracy_score <= ACCURACY_CAP);
        assert!(stats.confidence_level <= CONFIDENCE_CAP);
    }

    #[test]
    fn test_cycle_monotonic_and_capped() {
        let mut network = NetworkState::default();
        let before = network.clone();
        let mut rng = rng();
        let delta = network.apply_cycle(&mut rng);

        for (b, a) in before.layers.iter().zip(&network.layers) {
            assert!(a.activation >= b.activation);
            assert!(a.activation <= 1.0);
        }
        assert!(network.accuracy > before.accuracy);
        assert!(network.connections > before.connections);
        assert_eq!(network.training_epochs, before.training_epochs + 1);
        assert!(delta.accuracy_increase > 0.0);
        assert!(delta.new_connections >= 5);
    }

    #[test]
    fn test_activations_saturate_at_one() {
        let mut network = NetworkState::default();
        let mut rng = rng();
        for _ in 0..200 {
            network.apply_cycle(&mut rng);
        }
        for layer in &network.layers {
            assert!(layer.activation <= 1.0);
        }
    }

    #[test]
    fn test_insight_list_bounded() {
        let mut list = VecDeque::new();
        let now = Utc::now();
        for _ in 0..8 {
            push_insights(&mut list, synthetic_insights(now));
        }
        assert_eq!(list.len(), INSIGHT_LIMIT);
    }

    #[test]
    fn test_default_network_shape() {
        let network = NetworkState::default();
        assert_eq!(network.layers.len(), 7);
        assert_eq!(network.layers[0].name, "Input Layer");
        assert_eq!(network.layers[2].neurons, 512);
        assert_eq!(network.connections, 2847);
        assert_eq!(network.training_epochs, 0);
    }

    #[test]
    fn test_report_serialization() {
        let report = LearnReport::already_learning();
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("already_learning"));
        assert!(!json.contains("improvements"));
    }
}
