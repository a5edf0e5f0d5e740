use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::candidates::contact::{simulate_send, validate_contact, ContactReceipt, ContactRequest};
use crate::candidates::service::{CandidateCard, CandidateMutation};
use crate::candidates::strength::{candidate_strength, StrengthReport};
use crate::candidates::validation::{validate_profile, ProfileForm};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize, Default)]
pub struct SkillQuery {
    #[serde(default)]
    pub skill: Option<String>,
}

/// GET /api/v1/candidates
/// Lists every candidate; `?skill=` narrows it the same way the search route does.
pub async fn handle_list_candidates(
    State(state): State<AppState>,
    Query(params): Query<SkillQuery>,
) -> Result<Json<Vec<CandidateCard>>, AppError> {
    let svc = &state.candidates;
    let candidates = match params.skill.as_deref() {
        Some(skill) => svc.search_by_skill(skill).await?,
        None => svc.list().await?,
    };
    Ok(Json(svc.cards(candidates)))
}

/// GET /api/v1/candidates/search
pub async fn handle_search_candidates(
    State(state): State<AppState>,
    Query(params): Query<SkillQuery>,
) -> Result<Json<Vec<CandidateCard>>, AppError> {
    let svc = &state.candidates;
    let hits = svc
        .search_by_skill(params.skill.as_deref().unwrap_or_default())
        .await?;
    Ok(Json(svc.cards(hits)))
}

/// POST /api/v1/candidates
pub async fn handle_create_candidate(
    State(state): State<AppState>,
    Json(form): Json<ProfileForm>,
) -> Result<(StatusCode, Json<CandidateMutation>), AppError> {
    let new_candidate = validate_profile(&form).map_err(AppError::Validation)?;
    let created = state.candidates.add(new_candidate).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/v1/candidates/:id
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CandidateCard>, AppError> {
    let candidate = state.candidates.get(&id).await?;
    Ok(Json(state.candidates.card(candidate)))
}

/// PUT /api/v1/candidates/:id
/// Replaces the profile wholesale; strength is recomputed by the store.
pub async fn handle_update_candidate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(form): Json<ProfileForm>,
) -> Result<Json<CandidateMutation>, AppError> {
    let edited = validate_profile(&form).map_err(AppError::Validation)?;
    let updated = state.candidates.update(edited.into_candidate(id, 0)).await?;
    Ok(Json(updated))
}

/// GET /api/v1/candidates/:id/strength
pub async fn handle_candidate_strength(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StrengthReport>, AppError> {
    let candidate = state.candidates.get(&id).await?;
    Ok(Json(candidate_strength(
        &candidate,
        state.candidates.max_strength(),
    )))
}

/// POST /api/v1/candidates/:id/contact
/// Validates before looking the candidate up, matching the form's behaviour
/// of rejecting bad input without a round-trip.
pub async fn handle_contact_candidate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ContactRequest>,
) -> Result<Json<ContactReceipt>, AppError> {
    validate_contact(&req).map_err(AppError::Validation)?;
    let candidate = state.candidates.get(&id).await?;
    let receipt = simulate_send(&candidate, &req, state.config.contact_delay).await;
    Ok(Json(receipt))
}
