//! Bounded reasoning trace.
//!
//! Every processing stage records a step here. The live trace keeps the 20
//! most recent steps; read accessors expose the 10 (introspection endpoint)
//! or 5 (chat reply payload) most recent, oldest-first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

const TRACE_LIMIT: usize = 20;
const INTROSPECTION_LIMIT: usize = 10;
const REPLY_LIMIT: usize = 5;

/// Kind of processing step being recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThoughtKind {
    Analysis,
    Emotion,
    Pattern,
    Generation,
    Learning,
}

/// One recorded reasoning step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThoughtStep {
    /// Monotonic sequence index across the trace's lifetime.
    pub step: u64,
    pub kind: ThoughtKind,
    pub content: String,
    /// In [0, 1].
    pub confidence: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct ReasoningTrace {
    steps: VecDeque<ThoughtStep>,
    next_index: u64,
}

impl ReasoningTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a step, evicting the oldest once past the retention limit.
    pub fn push(&mut self, kind: ThoughtKind, content: impl Into<String>, confidence: f64) {
        self.next_index += 1;
        self.steps.push_back(ThoughtStep {
            step: self.next_index,
            kind,
            content: content.into(),
            confidence: confidence.clamp(0.0, 1.0),
            timestamp: Utc::now(),
        });
        while self.steps.len() > TRACE_LIMIT {
            self.steps.pop_front();
        }
    }

    /// The 10 most recent steps, oldest-first.
    pub fn recent(&self) -> Vec<ThoughtStep> {
        self.tail(INTROSPECTION_LIMIT)
    }

    /// The 5 most recent steps, oldest-first, attached to each chat reply.
    pub fn for_reply(&self) -> Vec<ThoughtStep> {
        self.tail(REPLY_LIMIT)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    fn tail(&self, n: usize) -> Vec<ThoughtStep> {
        let skip = self.steps.len().saturating_sub(n);
        self.steps.iter().skip(skip).cloned().collect()
    }
}
