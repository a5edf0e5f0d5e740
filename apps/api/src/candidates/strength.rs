use serde::{Deserialize, Serialize};

use crate::models::candidate::{Candidate, Project};

pub const DEFAULT_MAX_STRENGTH: u32 = 10;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StrengthLevel {
    Beginner,
    Intermediate,
    Expert,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StrengthReport {
    pub strength: u32,
    pub max_strength: u32,
    /// 0.0 – 100.0, capped.
    pub percentage: f64,
    pub level: StrengthLevel,
}

/// One point per listed skill and one per project.
pub fn compute_profile_strength(skills: &[String], projects: &[Project]) -> u32 {
    (skills.len() + projects.len()) as u32
}

/// Positions `strength` on a meter that tops out at `max_strength`.
pub fn strength_report(strength: u32, max_strength: u32) -> StrengthReport {
    let percentage = if max_strength == 0 {
        if strength > 0 {
            100.0
        } else {
            0.0
        }
    } else {
        (strength as f64 * 100.0 / max_strength as f64).min(100.0)
    };

    let level = match percentage {
        p if p < 30.0 => StrengthLevel::Beginner,
        p if p < 70.0 => StrengthLevel::Intermediate,
        _ => StrengthLevel::Expert,
    };

    StrengthReport {
        strength,
        max_strength,
        percentage,
        level,
    }
}

pub fn candidate_strength(candidate: &Candidate, max_strength: u32) -> StrengthReport {
    strength_report(candidate.profile_strength, max_strength)
}
