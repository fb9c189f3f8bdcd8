use super::domain::{PromoCode, PromoCodeDraft, PromoCodeId};

/// Storage abstraction for promo codes so the service can run against any backend.
pub trait PromoCodeRepository: Send + Sync {
    /// All records, ordered by id.
    fn list(&self) -> Result<Vec<PromoCode>, RepositoryError>;
    fn fetch(&self, id: PromoCodeId) -> Result<Option<PromoCode>, RepositoryError>;
    /// Record whose normalized code equals the normalized `code`.
    fn find_by_code(&self, code: &str) -> Result<Option<PromoCode>, RepositoryError>;
    /// Persists a draft under the next identifier.
    fn insert(&self, draft: PromoCodeDraft) -> Result<PromoCode, RepositoryError>;
    fn update(&self, record: PromoCode) -> Result<(), RepositoryError>;
    /// Returns `false` when nothing was stored under `id`.
    fn delete(&self, id: PromoCodeId) -> Result<bool, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
