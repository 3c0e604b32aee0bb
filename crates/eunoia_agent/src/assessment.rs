//! Structured questionnaire analysis.
//!
//! Stateless: scores a kind label plus question→answer map (0–3 scale)
//! into a severity band. An empty answer set is a rejected request, not a
//! defaulted one — the percentage would be undefined.

use eunoia_core::AgentError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const ANSWER_MAX: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Minimal,
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    /// Band the score percentage; upper bounds inclusive, checked in order.
    fn from_percentage(percentage: f64) -> Self {
        if percentage <= 25.0 {
            Severity::Minimal
        } else if percentage <= 50.0 {
            Severity::Mild
        } else if percentage <= 75.0 {
            Severity::Moderate
        } else {
            Severity::Severe
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Minimal => "Minimal",
            Severity::Mild => "Mild",
            Severity::Moderate => "Moderate",
            Severity::Severe => "Severe",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub assessment_type: String,
    pub score: i64,
    pub max_score: i64,
    pub severity_level: Severity,
    pub recommendations: Vec<String>,
    pub ai_analysis: String,
    pub confidence: f64,
    pub follow_up_needed: bool,
}

/// Analyze an assessment submission.
///
/// `answers` maps question identifiers to integer answers on a 0–3 scale.
pub fn analyze(kind: &str, answers: &BTreeMap<String, i64>) -> Result<AssessmentResult, AgentError> {
    if answers.is_empty() {
        return Err(AgentError::EmptyAssessment);
    }

    let score: i64 = answers.values().sum();
    let max_score = answers.len() as i64 * ANSWER_MAX;
    let percentage = (score as f64 / max_score as f64) * 100.0;
    let severity = Severity::from_percentage(percentage);

    let ai_analysis = format!(
        "Based on the {} assessment, the agent detected {} symptoms. \
         The response pattern suggests specific areas for attention and potential intervention.",
        kind,
        severity.as_str().to_lowercase(),
    );

    Ok(AssessmentResult {
        assessment_type: kind.to_string(),
        score,
        max_score,
        severity_level: severity,
        recommendations: vec![
            "Continue monitoring symptoms".to_string(),
            "Consider professional consultation".to_string(),
            "Practice self-care strategies".to_string(),
            "Maintain regular sleep schedule".to_string(),
        ],
        ai_analysis,
        confidence: 0.87,
        follow_up_needed: percentage > 50.0,
    })
}
