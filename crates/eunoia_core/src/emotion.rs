//! Keyword + sentiment emotion classification.
//!
//! Scores a message against per-emotion keyword sets, folds in the sentiment
//! signal, and picks the highest-scoring label. Fully deterministic: ties are
//! broken by the fixed order of [`Emotion::SCORED`], and a zero maximum yields
//! [`Emotion::Neutral`].

use crate::sentiment;
use serde::{Deserialize, Serialize};

/// The closed set of emotion labels used throughout scoring and templating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Anxiety,
    Depression,
    Stress,
    Joy,
    Anger,
    Sadness,
    Neutral,
}

impl Emotion {
    /// Emotions that participate in scoring, in tie-break order.
    /// The first emotion to reach the maximum score wins.
    pub const SCORED: [Emotion; 6] = [
        Emotion::Anxiety,
        Emotion::Depression,
        Emotion::Stress,
        Emotion::Joy,
        Emotion::Anger,
        Emotion::Sadness,
    ];

    /// Every label, including `neutral` (for capability listings).
    pub const ALL: [Emotion; 7] = [
        Emotion::Anxiety,
        Emotion::Depression,
        Emotion::Stress,
        Emotion::Joy,
        Emotion::Anger,
        Emotion::Sadness,
        Emotion::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Anxiety => "anxiety",
            Emotion::Depression => "depression",
            Emotion::Stress => "stress",
            Emotion::Joy => "joy",
            Emotion::Anger => "anger",
            Emotion::Sadness => "sadness",
            Emotion::Neutral => "neutral",
        }
    }

    /// Keyword set for this emotion. `sadness` carries no keywords of its
    /// own; it is only reachable through the sentiment adjustment.
    fn keywords(&self) -> &'static [&'static str] {
        match self {
            Emotion::Anxiety => &[
                "worried", "anxious", "nervous", "panic", "fear", "scared",
                "overwhelmed", "stressed", "tense", "restless",
            ],
            Emotion::Depression => &[
                "sad", "depressed", "hopeless", "empty", "worthless",
                "lonely", "tired", "exhausted", "numb", "dark",
            ],
            Emotion::Stress => &[
                "stressed", "pressure", "overwhelmed", "busy", "rushed",
                "deadline", "burden", "heavy", "intense", "demanding",
            ],
            Emotion::Joy => &[
                "happy", "excited", "joyful", "pleased", "content",
                "grateful", "optimistic", "cheerful", "delighted", "thrilled",
            ],
            Emotion::Anger => &[
                "angry", "frustrated", "mad", "irritated", "annoyed",
                "furious", "rage", "upset", "agitated", "hostile",
            ],
            Emotion::Sadness | Emotion::Neutral => &[],
        }
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score each emotion against the message: keyword hits plus the
/// sentiment adjustment. Transient; built per call and discarded.
pub fn score_emotions(message: &str) -> [(Emotion, i32); 6] {
    let lower = message.to_lowercase();

    let mut scores = Emotion::SCORED.map(|e| {
        let hits = e.keywords().iter().filter(|k| lower.contains(*k)).count() as i32;
        (e, hits)
    });

    let (polarity, _magnitude) = sentiment::analyze(&lower);
    for (emotion, score) in scores.iter_mut() {
        if polarity < -0.3 {
            match emotion {
                Emotion::Sadness => *score += 2,
                Emotion::Depression => *score += 1,
                _ => {}
            }
        } else if polarity > 0.3 {
            if *emotion == Emotion::Joy {
                *score += 2;
            }
        }
        if polarity.abs() > 0.5 && *emotion == Emotion::Stress {
            *score += 1;
        }
    }

    scores
}

/// Pick the emotion with the strictly highest combined score.
///
/// Returns [`Emotion::Neutral`] when no emotion scores above zero.
pub fn detect_emotion(message: &str) -> Emotion {
    let scores = score_emotions(message);
    let mut best = Emotion::Neutral;
    let mut best_score = 0;
    for (emotion, score) in scores {
        if score > best_score {
            best = emotion;
            best_score = score;
        }
    }
    best
}
