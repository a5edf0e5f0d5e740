use crate::candidates::service::CandidateService;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub candidates: CandidateService,
    pub config: Config,
}
