//! Simple keyword-based sentiment analysis.
//!
//! Shared across the classifier and tests to avoid duplicating word lists.
//! In production, this should be replaced with an ML model.

const POSITIVE: &[&str] = &[
    "love", "great", "wonderful", "amazing", "glad", "thank", "beautiful",
    "enjoy", "proud", "laugh", "smile", "good news", "awesome", "fantastic",
];

const NEGATIVE: &[&str] = &[
    "hate", "awful", "terrible", "horrible", "miserable", "cry", "crying",
    "alone", "broken", "failure", "useless", "pointless", "hurt", "pain",
];

const INTENSE: &[&str] = &["!", "!!", "?!", "never", "always", "completely"];

/// Analyze text for sentiment polarity and magnitude.
///
/// Returns `(polarity, magnitude)` where:
/// - `polarity` is in `[-1.0, 1.0]` (negative to positive)
/// - `magnitude` is in `[0.0, 1.0]` (how loaded the text is, subjectivity aside)
///
/// The caller is expected to pass lower-cased text.
pub fn analyze(text: &str) -> (f64, f64) {
    let pos = POSITIVE.iter().filter(|w| text.contains(*w)).count() as f64;
    let neg = NEGATIVE.iter().filter(|w| text.contains(*w)).count() as f64;
    let int = INTENSE.iter().filter(|w| text.contains(*w)).count() as f64;

    let polarity = (pos - neg) / (pos + neg + 1.0);
    let magnitude = ((pos + neg + int) / 5.0).clamp(0.0, 1.0);

    (polarity, magnitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_text() {
        let (p, m) = analyze("the meeting starts at three");
        assert!((p - 0.0).abs() < f64::EPSILON);
        assert!((m - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_positive_text() {
        let (p, _) = analyze("i love this, thank you, it was wonderful");
        assert!(p > 0.3);
    }

    #[test]
    fn test_negative_text() {
        let (p, _) = analyze("everything is awful and i feel so alone and broken");
        assert!(p < -0.3);
    }

    #[test]
    fn test_magnitude_grows_with_intensity() {
        let (_, m1) = analyze("good news");
        let (_, m2) = analyze("good news! completely amazing!");
        assert!(m2 > m1);
    }

    #[test]
    fn test_empty_text() {
        let (p, m) = analyze("");
        assert_eq!(p, 0.0);
        assert_eq!(m, 0.0);
    }

    #[test]
    fn test_polarity_bounded() {
        let (p, _) = analyze("love great wonderful amazing glad thank proud");
        assert!(p <= 1.0);
        let (p, _) = analyze("hate awful terrible horrible miserable useless");
        assert!(p >= -1.0);
    }
}
