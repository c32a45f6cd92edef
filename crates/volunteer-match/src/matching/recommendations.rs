use std::fmt;

use serde::{Deserialize, Serialize};

use super::weights::{
    GREAT_MATCH_SCORE, HIGH_LABEL_MIN, MEDIUM_LABEL_MIN, PERFECT_MATCH_SCORE, SKILL_GAP_BELOW,
    TIME_GAP_BELOW,
};
use super::MatchBreakdown;

pub const PERFECT_MATCH: &str =
    "Perfect match! This opportunity aligns excellently with your profile.";
pub const GREAT_MATCH: &str = "Great match! Highly recommended for you.";
pub const DEVELOP_SKILLS: &str = "Consider developing skills to improve match.";
pub const NEEDS_MORE_TIME: &str =
    "This opportunity requires more time than you typically have available.";

/// Qualitative band for a rounded match score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchLabel {
    High,
    Medium,
    Low,
}

impl MatchLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchLabel::High => "High",
            MatchLabel::Medium => "Medium",
            MatchLabel::Low => "Low",
        }
    }
}

impl fmt::Display for MatchLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn match_label(score: u8) -> MatchLabel {
    if score >= HIGH_LABEL_MIN {
        MatchLabel::High
    } else if score >= MEDIUM_LABEL_MIN {
        MatchLabel::Medium
    } else {
        MatchLabel::Low
    }
}

pub(crate) fn generate(total: f64, breakdown: &MatchBreakdown) -> Vec<String> {
    let mut recommendations = Vec::new();

    if total >= PERFECT_MATCH_SCORE {
        recommendations.push(PERFECT_MATCH.to_string());
    } else if total >= GREAT_MATCH_SCORE {
        recommendations.push(GREAT_MATCH.to_string());
    }

    if breakdown.skills < SKILL_GAP_BELOW {
        recommendations.push(DEVELOP_SKILLS.to_string());
    }

    if breakdown.availability < TIME_GAP_BELOW {
        recommendations.push(NEEDS_MORE_TIME.to_string());
    }

    recommendations
}
