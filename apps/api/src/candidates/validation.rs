use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::candidate::{NewCandidate, Project};

pub const NAME_REQUIRED: &str = "Name is required";
pub const SKILLS_REQUIRED: &str = "Skills are required";
pub const PROJECT_REQUIRED: &str = "You need at least one project";
pub const PROJECT_NAMES_REQUIRED: &str = "All projects must have names";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProjectInput {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
}

/// Profile form as submitted by a candidate. Skills arrive as one
/// comma-separated string, the way the profile form collects them.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProfileForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub projects: Vec<ProjectInput>,
}

/// Splits a comma-separated skill list, trimming entries and dropping blanks.
pub fn parse_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|skill| !skill.is_empty())
        .map(str::to_string)
        .collect()
}

/// Checks the form and normalizes it into a `NewCandidate`.
/// Returns the first failing rule's message.
pub fn validate_profile(form: &ProfileForm) -> Result<NewCandidate, String> {
    if form.name.trim().is_empty() {
        return Err(NAME_REQUIRED.to_string());
    }
    if form.skills.trim().is_empty() {
        return Err(SKILLS_REQUIRED.to_string());
    }
    if form.projects.is_empty() {
        return Err(PROJECT_REQUIRED.to_string());
    }
    if form.projects.iter().any(|p| p.name.trim().is_empty()) {
        return Err(PROJECT_NAMES_REQUIRED.to_string());
    }

    let skills = parse_skills(&form.skills);
    if skills.is_empty() {
        // e.g. ", ,"
        return Err(SKILLS_REQUIRED.to_string());
    }

    let projects = form
        .projects
        .iter()
        .map(|p| Project {
            id: match p.id.as_deref().map(str::trim) {
                Some(id) if !id.is_empty() => id.to_string(),
                _ => Uuid::new_v4().to_string(),
            },
            name: p.name.trim().to_string(),
        })
        .collect();

    Ok(NewCandidate {
        name: form.name.trim().to_string(),
        skills,
        projects,
        domain: form.domain.trim().to_string(),
    })
}
