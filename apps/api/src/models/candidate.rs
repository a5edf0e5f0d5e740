use serde::{Deserialize, Serialize};

/// A named project attached to a candidate profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Project {
    pub id: String,
    pub name: String,
}

/// A stored candidate record.
///
/// Field names serialize in camelCase so the persisted list keeps the same
/// shape as the browser-storage payload it replaces.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub skills: Vec<String>,
    pub projects: Vec<Project>,
    #[serde(default)]
    pub domain: String,
    pub profile_strength: u32,
}

/// A candidate before the store has assigned an id and strength.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewCandidate {
    pub name: String,
    pub skills: Vec<String>,
    pub projects: Vec<Project>,
    pub domain: String,
}

impl NewCandidate {
    pub fn into_candidate(self, id: String, profile_strength: u32) -> Candidate {
        Candidate {
            id,
            name: self.name,
            skills: self.skills,
            projects: self.projects,
            domain: self.domain,
            profile_strength,
        }
    }
}
