//! Recommendation assembly.
//!
//! Crisis recommendations always come first, then the per-emotion list,
//! then pattern-conditioned additions; the final list is capped at 5.

use eunoia_core::crisis::CRISIS_THRESHOLD;
use eunoia_core::Emotion;

/// Maximum recommendations returned per message.
pub const RECOMMENDATION_LIMIT: usize = 5;

const CRISIS_RECOMMENDATIONS: &[&str] = &[
    "Consider reaching out to a crisis helpline: 988",
    "Contact emergency services if you're in immediate danger",
    "Reach out to a trusted friend or family member",
];

fn emotion_recommendations(emotion: Emotion) -> &'static [&'static str] {
    match emotion {
        Emotion::Anxiety => &[
            "Practice deep breathing exercises",
            "Try progressive muscle relaxation",
            "Consider mindfulness meditation",
            "Limit caffeine intake",
        ],
        Emotion::Depression => &[
            "Maintain a regular sleep schedule",
            "Try to get some sunlight each day",
            "Consider gentle physical activity",
            "Connect with supportive people",
        ],
        Emotion::Stress => &[
            "Break large tasks into smaller steps",
            "Practice time management techniques",
            "Consider delegation when possible",
            "Take regular breaks",
        ],
        Emotion::Joy | Emotion::Anger | Emotion::Sadness | Emotion::Neutral => &[],
    }
}

/// Build the capped, ordered recommendation list.
pub fn recommend(emotion: Emotion, patterns: &[String], crisis_score: u8) -> Vec<String> {
    let mut recommendations: Vec<String> = Vec::new();

    if crisis_score > CRISIS_THRESHOLD {
        recommendations.extend(CRISIS_RECOMMENDATIONS.iter().map(|r| r.to_string()));
    }

    recommendations.extend(
        emotion_recommendations(emotion)
            .iter()
            .map(|r| r.to_string()),
    );

    if patterns.iter().any(|p| p == "late_night_communication") {
        recommendations.push("Consider establishing a regular sleep routine".to_string());
    }
    if patterns.iter().any(|p| p == "recurring_work_concern") {
        recommendations.push("Consider discussing work stress with a supervisor or HR".to_string());
    }

    recommendations.truncate(RECOMMENDATION_LIMIT);
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crisis_recommendations_come_first() {
        let recs = recommend(Emotion::Depression, &[], 7);
        assert_eq!(recs.len(), RECOMMENDATION_LIMIT);
        assert_eq!(recs[0], CRISIS_RECOMMENDATIONS[0]);
        assert_eq!(recs[1], CRISIS_RECOMMENDATIONS[1]);
        assert_eq!(recs[2], CRISIS_RECOMMENDATIONS[2]);
        // Remaining slots filled from the depression list, in order.
        assert_eq!(recs[3], "Maintain a regular sleep schedule");
    }

    #[test]
    fn test_threshold_is_strict() {
        let recs = recommend(Emotion::Neutral, &[], 5);
        assert!(recs.iter().all(|r| !r.contains("988")));
        let recs = recommend(Emotion::Neutral, &[], 6);
        assert!(recs[0].contains("988"));
    }

    #[test]
    fn test_emotion_without_list_yields_pattern_recs_only() {
        let patterns = vec!["late_night_communication".to_string()];
        let recs = recommend(Emotion::Joy, &patterns, 0);
        assert_eq!(recs, vec!["Consider establishing a regular sleep routine".to_string()]);
    }

    #[test]
    fn test_pattern_recommendations_appended() {
        let patterns = vec![
            "late_night_communication".to_string(),
            "recurring_work_concern".to_string(),
        ];
        let recs = recommend(Emotion::Neutral, &patterns, 0);
        assert_eq!(recs.len(), 2);
        assert!(recs[0].contains("sleep routine"));
        assert!(recs[1].contains("supervisor or HR"));
    }

    #[test]
    fn test_capped_at_five() {
        let patterns = vec![
            "late_night_communication".to_string(),
            "recurring_work_concern".to_string(),
        ];
        let recs = recommend(Emotion::Anxiety, &patterns, 9);
        assert_eq!(recs.len(), RECOMMENDATION_LIMIT);
    }
}
