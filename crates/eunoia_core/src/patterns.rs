//! Behavioral pattern tagging.
//!
//! Derives pattern tags from the message text, the local hour, and the
//! user's prior conversation history. Pure function of its inputs; the
//! caller reads the clock once and passes the hour in.

/// Recurring-theme vocabulary checked against message and history.
pub const THEMES: &[&str] = &[
    "work", "family", "sleep", "health", "relationship", "money", "future",
];

/// Intensifier words signalling high emotional intensity.
pub const INTENSIFIERS: &[&str] = &["very", "extremely", "really", "so", "too"];

/// Hours before which / after which a message counts as late-night.
const LATE_NIGHT_BEFORE: u32 = 6;
const LATE_NIGHT_AFTER: u32 = 22;

/// Identify pattern tags for a message.
///
/// All applicable tags are included; they are not mutually exclusive
/// (except `detailed_expression` / `brief_communication`, whose word-count
/// thresholds cannot overlap). `prior_messages` is the user's history of
/// raw message texts, oldest-first.
pub fn identify(message: &str, prior_messages: &[String], local_hour: u32) -> Vec<String> {
    let mut patterns = Vec::new();
    let lower = message.to_lowercase();

    if local_hour < LATE_NIGHT_BEFORE || local_hour > LATE_NIGHT_AFTER {
        patterns.push("late_night_communication".to_string());
    }

    for theme in THEMES {
        if lower.contains(theme) {
            let recurring = prior_messages
                .iter()
                .filter(|m| m.to_lowercase().contains(theme))
                .count();
            if recurring > 2 {
                patterns.push(format!("recurring_{theme}_concern"));
            }
        }
    }

    if message.contains('?') {
        patterns.push("seeking_information".to_string());
    }

    let word_count = message.split_whitespace().count();
    if word_count > 50 {
        patterns.push("detailed_expression".to_string());
    } else if word_count < 5 {
        patterns.push("brief_communication".to_string());
    }

    if INTENSIFIERS.iter().any(|w| lower.contains(w)) {
        patterns.push("high_emotional_intensity".to_string());
    }

    patterns
}
