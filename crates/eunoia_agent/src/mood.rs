//! Mood tracking analysis.
//!
//! Stateless trend/pattern/trigger extraction over caller-supplied mood
//! entries. Fewer than three entries is a defined "insufficient data"
//! result, not an error.

use serde::{Deserialize, Serialize};

const MIN_ENTRIES: usize = 3;
const TREND_WINDOW: usize = 7;
const INSUFFICIENT_CONFIDENCE: f64 = 0.3;
const ANALYSIS_CONFIDENCE: f64 = 0.78;

/// One tracked mood data point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodEntry {
    /// Numeric mood value (higher is better).
    pub mood_value: f64,
    /// Time-of-day label, e.g. "morning", "evening_late".
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub activities: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodAnalysis {
    pub mood_trend: String,
    pub patterns_detected: Vec<String>,
    pub triggers_identified: Vec<String>,
    pub recommendations: Vec<String>,
    pub risk_assessment: String,
    pub confidence: f64,
}

/// Analyze a sequence of mood entries, oldest-first.
pub fn analyze(entries: &[MoodEntry]) -> MoodAnalysis {
    if entries.len() < MIN_ENTRIES {
        return MoodAnalysis {
            mood_trend: "insufficient_data".to_string(),
            patterns_detected: Vec::new(),
            triggers_identified: Vec::new(),
            recommendations: vec!["Continue tracking mood for better analysis".to_string()],
            risk_assessment: "low".to_string(),
            confidence: INSUFFICIENT_CONFIDENCE,
        };
    }

    // Trend: most recent of the last 7 vs the earliest of those same 7.
    let window_start = entries.len().saturating_sub(TREND_WINDOW);
    let window = &entries[window_start..];
    let first = window.first().map(|e| e.mood_value).unwrap_or(0.0);
    let last = window.last().map(|e| e.mood_value).unwrap_or(0.0);
    let trend = if last > first {
        "improving"
    } else if last < first {
        "declining"
    } else {
        "stable"
    };

    let mut patterns = Vec::new();
    if entries.iter().any(|e| e.time.starts_with("evening")) {
        patterns.push("evening_mood_variations".to_string());
    }

    let mut triggers = Vec::new();
    if entries
        .iter()
        .flat_map(|e| e.activities.iter())
        .any(|a| a == "work")
    {
        triggers.push("work_related_stress".to_string());
    }

    MoodAnalysis {
        mood_trend: trend.to_string(),
        patterns_detected: patterns,
        triggers_identified: triggers,
        recommendations: vec![
            "Continue regular mood tracking".to_string(),
            "Notice patterns in daily activities".to_string(),
            "Practice mindfulness during mood changes".to_string(),
        ],
        risk_assessment: if trend == "declining" { "moderate" } else { "low" }.to_string(),
        confidence: ANALYSIS_CONFIDENCE,
    }
}
