use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::candidates::store::{CandidateRepository, StoreError};
use crate::candidates::strength::{candidate_strength, StrengthReport};
use crate::errors::AppError;
use crate::models::candidate::{Candidate, NewCandidate};

pub const ADDED_NOTICE: &str = "Candidate added successfully!";
pub const UPDATED_NOTICE: &str = "Candidate updated successfully!";

/// A candidate record paired with its strength meter, as shown on dashboards
/// and search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateCard {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub strength: StrengthReport,
}

/// Result of a create or update, with the notice to surface to the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateMutation {
    pub candidate: Candidate,
    pub message: String,
}

/// Candidate use-cases over a repository, with the round-trip latency of the
/// mock backend layered on top.
#[derive(Clone)]
pub struct CandidateService {
    repo: Arc<dyn CandidateRepository>,
    latency: Duration,
    max_strength: u32,
}

impl CandidateService {
    pub fn new(repo: Arc<dyn CandidateRepository>, latency: Duration, max_strength: u32) -> Self {
        Self {
            repo,
            latency,
            max_strength,
        }
    }

    pub fn max_strength(&self) -> u32 {
        self.max_strength
    }

    pub fn card(&self, candidate: Candidate) -> CandidateCard {
        let strength = candidate_strength(&candidate, self.max_strength);
        CandidateCard {
            candidate,
            strength,
        }
    }

    pub fn cards(&self, candidates: Vec<Candidate>) -> Vec<CandidateCard> {
        candidates.into_iter().map(|c| self.card(c)).collect()
    }

    pub async fn list(&self) -> Result<Vec<Candidate>, AppError> {
        self.simulate_latency().await;
        let candidates = self
            .repo
            .list()
            .await
            .map_err(|e| storage_failure(e, "Failed to fetch candidates"))?;
        info!(count = candidates.len(), "Fetched candidates");
        Ok(candidates)
    }

    pub async fn get(&self, id: &str) -> Result<Candidate, AppError> {
        self.simulate_latency().await;
        self.repo
            .get(id)
            .await
            .map_err(|e| storage_failure(e, "Failed to fetch candidates"))?
            .ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))
    }

    pub async fn add(&self, candidate: NewCandidate) -> Result<CandidateMutation, AppError> {
        self.simulate_latency().await;
        let created = self
            .repo
            .add(candidate)
            .await
            .map_err(|e| storage_failure(e, "Failed to add candidate"))?;
        info!(
            candidate_id = %created.id,
            profile_strength = created.profile_strength,
            "Candidate added"
        );
        Ok(CandidateMutation {
            candidate: created,
            message: ADDED_NOTICE.to_string(),
        })
    }

    pub async fn update(&self, candidate: Candidate) -> Result<CandidateMutation, AppError> {
        self.simulate_latency().await;
        let updated = self
            .repo
            .update(candidate)
            .await
            .map_err(|e| storage_failure(e, "Failed to update candidate"))?;
        info!(
            candidate_id = %updated.id,
            profile_strength = updated.profile_strength,
            "Candidate updated"
        );
        Ok(CandidateMutation {
            candidate: updated,
            message: UPDATED_NOTICE.to_string(),
        })
    }

    pub async fn search_by_skill(&self, skill: &str) -> Result<Vec<Candidate>, AppError> {
        self.simulate_latency().await;
        let hits = self
            .repo
            .search_by_skill(skill)
            .await
            .map_err(|e| storage_failure(e, "Failed to search candidates"))?;
        info!(skill = %skill.trim(), hits = hits.len(), "Skill search");
        Ok(hits)
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

fn storage_failure(err: StoreError, user_message: &str) -> AppError {
    match err {
        StoreError::NotFound(id) => AppError::NotFound(format!("Candidate {id} not found")),
        other => {
            error!("{user_message}: {other}");
            AppError::Storage(user_message.to_string())
        }
    }
}
