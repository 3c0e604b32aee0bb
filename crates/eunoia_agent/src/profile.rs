//! Per-user profiles with bounded conversation history.

use chrono::{DateTime, Utc};
use eunoia_core::Emotion;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

/// Most recent history entries retained per user; oldest evicted first.
pub const HISTORY_LIMIT: usize = 100;

/// One recorded interaction in a user's history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationEntry {
    pub message: String,
    pub emotion: Emotion,
    pub patterns: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

/// Everything the agent remembers about one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    #[serde(default)]
    pub preferences: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub conversation_history: VecDeque<ConversationEntry>,
    /// Occurrence count per detected emotion label.
    #[serde(default)]
    pub emotional_patterns: HashMap<Emotion, u32>,
    #[serde(default)]
    pub learned_insights: Vec<String>,
    pub last_interaction: DateTime<Utc>,
}

impl UserProfile {
    fn new(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            preferences: HashMap::new(),
            conversation_history: VecDeque::new(),
            emotional_patterns: HashMap::new(),
            learned_insights: Vec::new(),
            last_interaction: Utc::now(),
        }
    }

    /// History message texts, oldest-first, for pattern mining.
    pub fn history_messages(&self) -> Vec<String> {
        self.conversation_history
            .iter()
            .map(|e| e.message.clone())
            .collect()
    }
}

/// Lazily-created store of user profiles. Not internally synchronized;
/// the agent mutates it under its state lock.
#[derive(Debug, Default)]
pub struct ProfileStore {
    profiles: HashMap<String, UserProfile>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_profiles(profiles: HashMap<String, UserProfile>) -> Self {
        Self { profiles }
    }

    /// Return the existing profile or create an empty one. Idempotent per
    /// identifier: a second call never resets state.
    pub fn get_or_create(&mut self, user_id: &str) -> &UserProfile {
        self.profiles
            .entry(user_id.to_string())
            .or_insert_with(|| UserProfile::new(user_id))
    }

    /// Append an interaction, bump the emotion counter, and truncate
    /// history to the most recent [`HISTORY_LIMIT`] entries.
    pub fn record_interaction(
        &mut self,
        user_id: &str,
        message: &str,
        emotion: Emotion,
        patterns: &[String],
    ) {
        let now = Utc::now();
        let profile = self
            .profiles
            .entry(user_id.to_string())
            .or_insert_with(|| UserProfile::new(user_id));

        profile.conversation_history.push_back(ConversationEntry {
            message: message.to_string(),
            emotion,
            patterns: patterns.to_vec(),
            timestamp: now,
        });
        while profile.conversation_history.len() > HISTORY_LIMIT {
            profile.conversation_history.pop_front();
        }

        *profile.emotional_patterns.entry(emotion).or_insert(0) += 1;
        profile.last_interaction = now;
    }

    pub fn get(&self, user_id: &str) -> Option<&UserProfile> {
        self.profiles.get(user_id)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Owned copy of every profile, for snapshot export.
    pub fn export(&self) -> HashMap<String, UserProfile> {
        self.profiles.clone()
    }
}
