//! Crisis risk scoring.
//!
//! Additive 0–10 score over explicit crisis phrases, the detected emotion,
//! and intensity phrases. Scores above [`CRISIS_THRESHOLD`] gate the
//! crisis-first recommendations downstream.

use crate::emotion::Emotion;

/// Explicit crisis keyword phrases, each worth +3.
pub const CRISIS_KEYWORDS: &[&str] = &[
    "suicide",
    "kill myself",
    "end it all",
    "not worth living",
    "better off dead",
    "hurt myself",
    "self harm",
    "give up",
];

/// Intensity phrases, each worth +1.
pub const INTENSITY_PHRASES: &[&str] = &["extremely", "unbearable", "can't take it", "hopeless"];

/// Scores strictly above this trigger crisis-first recommendations.
pub const CRISIS_THRESHOLD: u8 = 5;

const MAX_SCORE: i32 = 10;

/// Compute the crisis score for a message and its detected emotion.
pub fn assess(message: &str, emotion: Emotion) -> u8 {
    let lower = message.to_lowercase();
    let mut score = 0i32;

    for keyword in CRISIS_KEYWORDS {
        if lower.contains(keyword) {
            score += 3;
        }
    }

    if matches!(emotion, Emotion::Depression | Emotion::Anxiety) {
        score += 1;
    }

    for phrase in INTENSITY_PHRASES {
        if lower.contains(phrase) {
            score += 1;
        }
    }

    score.min(MAX_SCORE) as u8
}
