//! Candidate store: trait-based persistence for candidate records.
//!
//! `JsonFileRepository` keeps the whole list as one JSON document on disk,
//! re-read on every call. `InMemoryRepository` holds the list in process.
//! `AppState` carries an `Arc<dyn CandidateRepository>` chosen from config.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::candidates::strength::compute_profile_strength;
use crate::models::candidate::{Candidate, NewCandidate};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Candidate {0} not found")]
    NotFound(String),

    #[error("Failed to read candidate storage: {0}")]
    Read(#[source] std::io::Error),

    #[error("Candidate storage is not a valid candidate list: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Failed to write candidate storage: {0}")]
    Write(#[source] std::io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait CandidateRepository: Send + Sync {
    /// All candidates in insertion order.
    async fn list(&self) -> StoreResult<Vec<Candidate>>;
    async fn get(&self, id: &str) -> StoreResult<Option<Candidate>>;
    /// Assigns an id and profile strength, then appends.
    async fn add(&self, candidate: NewCandidate) -> StoreResult<Candidate>;
    /// Replaces the record with the same id in place.
    async fn update(&self, candidate: Candidate) -> StoreResult<Candidate>;
    async fn search_by_skill(&self, query: &str) -> StoreResult<Vec<Candidate>> {
        let candidates = self.list().await?;
        Ok(filter_by_skill(candidates, query))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Shared list operations
// ────────────────────────────────────────────────────────────────────────────

/// Keeps candidates with at least one skill containing `query`,
/// case-insensitively. A blank query keeps everyone.
pub fn filter_by_skill(candidates: Vec<Candidate>, query: &str) -> Vec<Candidate> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return candidates;
    }
    candidates
        .into_iter()
        .filter(|c| c.skills.iter().any(|s| s.to_lowercase().contains(&needle)))
        .collect()
}

/// Epoch-millisecond id, bumped past any id already in use.
fn next_id(existing: &[Candidate]) -> String {
    let mut millis = Utc::now().timestamp_millis();
    loop {
        let id = millis.to_string();
        if !existing.iter().any(|c| c.id == id) {
            return id;
        }
        millis += 1;
    }
}

fn append_new(candidates: &mut Vec<Candidate>, new: NewCandidate) -> Candidate {
    let id = next_id(candidates.as_slice());
    let strength = compute_profile_strength(&new.skills, &new.projects);
    let candidate = new.into_candidate(id, strength);
    candidates.push(candidate.clone());
    candidate
}

fn replace_existing(candidates: &mut [Candidate], mut updated: Candidate) -> StoreResult<Candidate> {
    updated.profile_strength = compute_profile_strength(&updated.skills, &updated.projects);
    let slot = candidates
        .iter_mut()
        .find(|c| c.id == updated.id)
        .ok_or_else(|| StoreError::NotFound(updated.id.clone()))?;
    *slot = updated.clone();
    Ok(updated)
}

// ────────────────────────────────────────────────────────────────────────────
// JsonFileRepository
// ────────────────────────────────────────────────────────────────────────────

pub struct JsonFileRepository {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> StoreResult<Vec<Candidate>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Vec::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(StoreError::Read(e)),
        }
    }

    async fn save(&self, candidates: &[Candidate]) -> StoreResult<()> {
        let bytes = encode_list(candidates)?;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_atomic(&path, &bytes))
            .await
            .map_err(|e| StoreError::Write(std::io::Error::new(std::io::ErrorKind::Other, e)))?
            .map_err(StoreError::Write)?;
        debug!(path = %self.path.display(), count = candidates.len(), "Candidate list persisted");
        Ok(())
    }
}

/// Encoding failures surface as `StoreError::Write`.
fn encode_list(candidates: &[Candidate]) -> StoreResult<Vec<u8>> {
    serde_json::to_vec_pretty(candidates).map_err(|e| StoreError::Write(e.into()))
}

/// Writes through a sibling temp file and renames it over `path`, so readers
/// never observe a half-written list.
fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[async_trait]
impl CandidateRepository for JsonFileRepository {
    async fn list(&self) -> StoreResult<Vec<Candidate>> {
        self.load().await
    }

    async fn get(&self, id: &str) -> StoreResult<Option<Candidate>> {
        Ok(self.load().await?.into_iter().find(|c| c.id == id))
    }

    async fn add(&self, candidate: NewCandidate) -> StoreResult<Candidate> {
        let _guard = self.write_lock.lock().await;
        let mut candidates = self.load().await?;
        let created = append_new(&mut candidates, candidate);
        self.save(&candidates).await?;
        Ok(created)
    }

    async fn update(&self, candidate: Candidate) -> StoreResult<Candidate> {
        let _guard = self.write_lock.lock().await;
        let mut candidates = self.load().await?;
        let updated = replace_existing(&mut candidates, candidate)?;
        self.save(&candidates).await?;
        Ok(updated)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// InMemoryRepository
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryRepository {
    candidates: RwLock<Vec<Candidate>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CandidateRepository for InMemoryRepository {
    async fn list(&self) -> StoreResult<Vec<Candidate>> {
        Ok(self.candidates.read().await.clone())
    }

    async fn get(&self, id: &str) -> StoreResult<Option<Candidate>> {
        Ok(self
            .candidates
            .read()
            .await
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn add(&self, candidate: NewCandidate) -> StoreResult<Candidate> {
        let mut candidates = self.candidates.write().await;
        Ok(append_new(&mut candidates, candidate))
    }

    async fn update(&self, candidate: Candidate) -> StoreResult<Candidate> {
        let mut candidates = self.candidates.write().await;
        replace_existing(&mut candidates, candidate)
    }
}
